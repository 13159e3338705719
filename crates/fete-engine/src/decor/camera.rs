use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera for the decorative scene.
/// Produces a view-projection matrix mapping world units to clip space.
pub struct SceneCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Camera distance from the origin along +Z, looking at the origin.
    pub z: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl SceneCamera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            fov_y_deg: 75.0,
            aspect: viewport_width / viewport_height.max(1.0),
            near: 0.1,
            far: 1000.0,
            z: 5.0,
        }
    }

    /// Build the view-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.z), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }

    /// Recompute the projection for a new viewport so the scene stays
    /// undistorted after a resize.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.aspect = viewport_width / viewport_height.max(1.0);
    }
}
