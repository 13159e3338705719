use bytemuck::{Pod, Zeroable};

/// Per-shape render data read by the JS renderer each frame.
/// Must match the TypeScript protocol: 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ShapeInstance {
    /// Position in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation in radians per axis.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Shape variant code (heart/gift/star mesh lookup).
    pub variant: f32,
    pub _pad: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One background star point. Written once at init; the buffer is static.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Point brightness (0, 1].
    pub brightness: f32,
}

impl StarInstance {
    pub const FLOATS: usize = 4;
}

/// One confetti particle, rendered as a screen-space quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ConfettiInstance {
    /// Position in viewport pixels.
    pub x: f32,
    pub y: f32,
    /// Spin angle in radians.
    pub rotation: f32,
    /// Quad size in pixels.
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
}

impl ConfettiInstance {
    pub const FLOATS: usize = 8;
}

/// Per-panel display state read by the DOM layer each frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PanelState {
    /// 1.0 = display, 0.0 = hidden.
    pub visible: f32,
    pub opacity: f32,
    pub scale: f32,
    pub _pad: f32,
}

impl PanelState {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_instance_is_10_floats() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 40);
        assert_eq!(ShapeInstance::FLOATS, 10);
    }

    #[test]
    fn star_instance_is_4_floats() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 16);
    }

    #[test]
    fn confetti_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<ConfettiInstance>(), 32);
    }

    #[test]
    fn panel_state_is_4_floats() {
        assert_eq!(std::mem::size_of::<PanelState>(), 16);
    }
}
