use fete_engine::{
    CameraUniform, ConfettiInstance, InputEvent, InputQueue, PanelState, PresentationConfig,
    ShapeInstance, StarInstance, Viewer, ViewerEvent, WishStore,
};
use fete_engine::types::EVENT_CLIPBOARD_WRITE;

/// Drives the engine loop for the browser host.
///
/// The concrete presentation (`Viewer`) lives in a `thread_local!` runner,
/// and `lib.rs` exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export stateful generics directly.
pub struct ViewerRunner {
    viewer: Viewer,
    input: InputQueue,
    /// Per-frame rebuilt buffers with stable pointers for JS reads.
    shape_instances: Vec<ShapeInstance>,
    confetti_instances: Vec<ConfettiInstance>,
    panel_states: Vec<PanelState>,
    events: Vec<ViewerEvent>,
    /// Copied once at init; the starfield never changes.
    star_points: Vec<StarInstance>,
    camera: CameraUniform,
}

impl ViewerRunner {
    pub fn new(config: PresentationConfig, store: Box<dyn WishStore>, seed: u64) -> Self {
        let viewer = Viewer::new(config, store, seed);
        let star_points = viewer.starfield_points().to_vec();
        let camera = viewer.camera_uniform();
        Self {
            viewer,
            input: InputQueue::new(),
            shape_instances: Vec::new(),
            confetti_instances: Vec::new(),
            panel_states: Vec::new(),
            events: Vec::new(),
            star_points,
            camera,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: advance the viewer, rebuild the read buffers.
    pub fn tick(&mut self, dt: f32) {
        self.viewer.tick(dt, &mut self.input);

        self.viewer.build_shape_instances(&mut self.shape_instances);
        self.viewer.build_confetti_instances(&mut self.confetti_instances);
        self.viewer.build_panel_states(&mut self.panel_states);
        self.events.clear();
        self.events.extend_from_slice(self.viewer.events());
        self.camera = self.viewer.camera_uniform();
    }

    /// If this frame asked for a clipboard write, hand back the text.
    pub fn clipboard_request(&self) -> Option<String> {
        if self
            .events
            .iter()
            .any(|e| e.kind == EVENT_CLIPBOARD_WRITE)
        {
            Some(self.viewer.export_text())
        } else {
            None
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    // ---- Pointer accessors for JS reads ----

    pub fn shape_instances_ptr(&self) -> *const f32 {
        self.shape_instances.as_ptr() as *const f32
    }

    pub fn shape_instance_count(&self) -> u32 {
        self.shape_instances.len() as u32
    }

    pub fn confetti_instances_ptr(&self) -> *const f32 {
        self.confetti_instances.as_ptr() as *const f32
    }

    pub fn confetti_instance_count(&self) -> u32 {
        self.confetti_instances.len() as u32
    }

    pub fn panel_states_ptr(&self) -> *const f32 {
        self.panel_states.as_ptr() as *const f32
    }

    pub fn panel_state_count(&self) -> u32 {
        self.panel_states.len() as u32
    }

    pub fn star_points_ptr(&self) -> *const f32 {
        self.star_points.as_ptr() as *const f32
    }

    pub fn star_point_count(&self) -> u32 {
        self.star_points.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera.view_proj.as_ptr() as *const f32
    }
}
