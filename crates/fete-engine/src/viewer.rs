// viewer.rs
//
// The presentation spine. Owns every subsystem, drains input once per
// tick, and collects the frame's outgoing events for the host. Data flow
// is one-directional: the configuration comes in once at construction and
// is never mutated here — edits produce a new document via the external
// form.

use crate::config::PresentationConfig;
use crate::core::clock::Clock;
use crate::core::rng::Rng;
use crate::decor::camera::{CameraUniform, SceneCamera};
use crate::decor::field::DecorField;
use crate::decor::starfield::Starfield;
use crate::effects::ConfettiState;
use crate::input::{InputEvent, InputQueue};
use crate::overlay::GalleryOverlay;
use crate::player::{PlayerCommand, PlayerController, PlayerPhase};
use crate::render::instance::{ConfettiInstance, PanelState, ShapeInstance, StarInstance};
use crate::render::protocol::MAX_EVENTS;
use crate::steps::sequencer::StepSequencer;
use crate::steps::step::Step;
use crate::types::{
    ViewerEvent, ACTION_BEGIN, ACTION_CELEBRATE, ACTION_COPY_WISHES, ACTION_GO_HOME,
    ACTION_GO_TO_STEP, ACTION_LAUNCH_WISH, ACTION_PLAY_TRACK, ACTION_START_OVER,
    ACTION_TOGGLE_MUSIC, EVENT_CLIPBOARD_WRITE, EVENT_PLAYER_CREATE, EVENT_PLAYER_CUE,
    EVENT_PLAYER_PAUSE, EVENT_PLAYER_PLAY, EVENT_PLAYER_VOLUME, EVENT_START_OVER,
    EVENT_STEP_CHANGED,
};
use crate::wishes::{CopyStatus, LaunchScript, WishLedger, WishStore};

/// Default viewport before the host reports a real size.
const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);

/// The presentation engine for one configuration and one viewer session.
pub struct Viewer {
    config: PresentationConfig,
    store: Box<dyn WishStore>,
    clock: Clock,
    field: DecorField,
    starfield: Starfield,
    camera: SceneCamera,
    sequencer: StepSequencer,
    player: PlayerController,
    ledger: WishLedger,
    launch: LaunchScript,
    overlay: GalleryOverlay,
    confetti: ConfettiState,
    events: Vec<ViewerEvent>,
}

impl Viewer {
    /// Build the viewer from a parsed configuration. The wish store is
    /// injected so the engine stays headless; the seed fixes shape and
    /// confetti placement.
    pub fn new(config: PresentationConfig, mut store: Box<dyn WishStore>, seed: u64) -> Self {
        let ledger = WishLedger::load(&config.recipient_name, &mut *store);
        let player = PlayerController::new(config.playlist.len());
        let mut star_rng = Rng::new(seed.wrapping_add(31));

        Self {
            field: DecorField::new(seed),
            starfield: Starfield::new(&mut star_rng),
            camera: SceneCamera::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1),
            sequencer: StepSequencer::new(),
            confetti: ConfettiState::new(seed),
            overlay: GalleryOverlay::new(),
            launch: LaunchScript::new(),
            clock: Clock::new(),
            events: Vec::with_capacity(MAX_EVENTS),
            config,
            store,
            player,
            ledger,
        }
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    /// Run one frame: drain input, advance every subsystem, collect the
    /// frame's outgoing events.
    pub fn tick(&mut self, dt: f32, input: &mut InputQueue) {
        self.events.clear();

        for event in input.drain() {
            self.dispatch(event);
        }

        self.clock.advance(dt);

        if let Some(step) = self.sequencer.tick(dt) {
            self.emit(ViewerEvent::new(
                EVENT_STEP_CHANGED,
                step.index() as f32,
                0.0,
                0.0,
            ));
            self.overlay.set_active(step == Step::Gallery);
        }

        self.field.tick(dt, self.clock.elapsed());
        self.overlay.tick(dt);
        self.confetti.tick(dt);
        self.launch.tick(dt);
        self.ledger.tick(dt);

        for command in self.player.drain_commands() {
            let event = match command {
                PlayerCommand::Create { track } => {
                    ViewerEvent::new(EVENT_PLAYER_CREATE, track as f32, 0.0, 0.0)
                }
                PlayerCommand::Cue { track } => {
                    ViewerEvent::new(EVENT_PLAYER_CUE, track as f32, 0.0, 0.0)
                }
                PlayerCommand::Play => ViewerEvent::new(EVENT_PLAYER_PLAY, 0.0, 0.0, 0.0),
                PlayerCommand::Pause => ViewerEvent::new(EVENT_PLAYER_PAUSE, 0.0, 0.0, 0.0),
                PlayerCommand::SetVolume { percent } => {
                    ViewerEvent::new(EVENT_PLAYER_VOLUME, percent as f32, 0.0, 0.0)
                }
            };
            self.emit(event);
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.overlay.pointer_move(x, y),
            InputEvent::PointerLeave => self.overlay.pointer_leave(),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Action { kind, value } => self.dispatch_action(kind, value),
        }
    }

    fn dispatch_action(&mut self, kind: u32, value: f32) {
        match kind {
            ACTION_BEGIN => self.begin(),
            ACTION_GO_TO_STEP => self.go_to_index(value as usize),
            ACTION_GO_HOME => self.go_home(),
            ACTION_TOGGLE_MUSIC => self.player.toggle(),
            ACTION_PLAY_TRACK => self.player.play_track(value as usize),
            ACTION_CELEBRATE => self.celebrate(),
            ACTION_LAUNCH_WISH => self.launch_wish(),
            ACTION_COPY_WISHES => self.copy_wishes(),
            ACTION_START_OVER => self.start_over(),
            other => log::warn!("ignoring unknown action kind {other}"),
        }
    }

    fn emit(&mut self, event: ViewerEvent) {
        if self.events.len() < MAX_EVENTS {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping kind {}", event.kind);
        }
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// The begin button: start the music (inert until the embed is ready)
    /// and advance to the greeting.
    pub fn begin(&mut self) {
        self.player.play();
        self.sequencer.go_to_step(Step::Greeting);
    }

    pub fn go_to_step(&mut self, step: Step) {
        self.sequencer.go_to_step(step);
    }

    /// Navigate by 1-based index; out-of-range indices are no-ops.
    pub fn go_to_index(&mut self, index: usize) {
        if let Some(step) = Step::from_index(index) {
            self.sequencer.go_to_step(step);
        }
    }

    /// Home: recall every decorative shape to rest, then return to the
    /// first panel.
    pub fn go_home(&mut self) {
        self.field.recall();
        self.sequencer.go_to_step(Step::Welcome);
    }

    pub fn current_step(&self) -> Step {
        self.sequencer.current()
    }

    pub fn progress(&self) -> f32 {
        self.sequencer.progress()
    }

    // ── Celebration & launch ───────────────────────────────────────

    /// Confetti from both edges plus the shape disperse. Repeat calls
    /// open independent burst windows.
    pub fn celebrate(&mut self) {
        self.confetti.celebrate();
        self.field.disperse();
    }

    /// Launch the most recent wish (or the fallback phrase) and scatter
    /// the decorative shapes. One-shot: a second call is ignored.
    pub fn launch_wish(&mut self) {
        let text = self.ledger.launch_text();
        if self.launch.launch(text) {
            self.field.disperse();
        }
    }

    pub fn launch(&self) -> &LaunchScript {
        &self.launch
    }

    // ── Wishes ─────────────────────────────────────────────────────

    pub fn add_wish(&mut self, text: &str) -> bool {
        self.ledger.add(text, &mut *self.store)
    }

    pub fn remove_wish(&mut self, index: usize) -> bool {
        self.ledger.remove(index, &mut *self.store)
    }

    pub fn wishes(&self) -> &[String] {
        self.ledger.entries()
    }

    /// Ask the host to write the export text to the clipboard. The
    /// outcome comes back through `clipboard_result`.
    pub fn copy_wishes(&mut self) {
        self.emit(ViewerEvent::new(EVENT_CLIPBOARD_WRITE, 0.0, 0.0, 0.0));
    }

    pub fn export_text(&self) -> String {
        self.ledger.export_text()
    }

    pub fn clipboard_result(&mut self, ok: bool) {
        self.ledger.copy_result(ok);
    }

    /// Transient copy status code for the UI: 0 none, 1 copied, 2 failed.
    pub fn copy_status_code(&self) -> u32 {
        match self.ledger.copy_status() {
            None => 0,
            Some(CopyStatus::Copied) => 1,
            Some(CopyStatus::Failed) => 2,
        }
    }

    // ── Player notifications ───────────────────────────────────────

    pub fn player_ready(&mut self) {
        self.player.ready();
    }

    pub fn player_state_changed(&mut self, playing: bool) {
        self.player.state_changed(playing);
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn player_phase(&self) -> PlayerPhase {
        self.player.phase()
    }

    pub fn current_track(&self) -> usize {
        self.player.current_track()
    }

    // ── Viewport & gallery input ───────────────────────────────────

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        self.confetti.set_viewport(width, height);
    }

    pub fn set_gallery_bounds(&mut self, width: f32, height: f32) {
        self.overlay.set_bounds(width, height);
    }

    /// Synchronous wheel handling: the host needs the consumed decision
    /// immediately to suppress the default scroll.
    pub fn wheel(&mut self, dx: f32, dy: f32) -> bool {
        self.overlay.wheel(dx, dy)
    }

    pub fn take_scroll(&mut self) -> f32 {
        self.overlay.take_scroll()
    }

    pub fn tilt(&self) -> glam::Vec2 {
        self.overlay.tilt()
    }

    pub fn start_over(&mut self) {
        self.emit(ViewerEvent::new(EVENT_START_OVER, 0.0, 0.0, 0.0));
    }

    // ── Frame outputs ──────────────────────────────────────────────

    pub fn events(&self) -> &[ViewerEvent] {
        &self.events
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }

    pub fn starfield_points(&self) -> &[StarInstance] {
        self.starfield.points()
    }

    pub fn build_shape_instances(&self, out: &mut Vec<ShapeInstance>) {
        self.field.build_instances(out);
    }

    pub fn build_confetti_instances(&self, out: &mut Vec<ConfettiInstance>) {
        self.confetti.build_instances(out);
    }

    pub fn build_panel_states(&self, out: &mut Vec<PanelState>) {
        self.sequencer.build_panel_states(out);
    }

    #[cfg(test)]
    pub(crate) fn decor(&self) -> &DecorField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wishes::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store handle that survives viewer teardown, for round-trip tests.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl WishStore for SharedStore {
        fn load(&mut self, key: &str) -> Option<String> {
            self.0.borrow_mut().load(key)
        }
        fn save(&mut self, key: &str, payload: &str) {
            self.0.borrow_mut().save(key, payload)
        }
    }

    fn config_json() -> &'static str {
        r#"{
            "recipientName": "Maya",
            "welcomeMessage": "hello",
            "bentoItems": [],
            "photos": [],
            "playlist": [
                { "title": "Track A", "id": "a" },
                { "title": "Track B", "id": "b" }
            ]
        }"#
    }

    fn make_viewer() -> Viewer {
        let config = PresentationConfig::from_json(config_json()).unwrap();
        Viewer::new(config, Box::new(MemoryStore::new()), 42)
    }

    fn run(viewer: &mut Viewer, input: &mut InputQueue, seconds: f32) {
        let steps = (seconds / 0.016).ceil() as usize;
        for _ in 0..steps {
            viewer.tick(0.016, input);
        }
    }

    #[test]
    fn empty_collections_render_without_error() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        run(&mut viewer, &mut input, 2.0);

        for step in Step::ALL {
            viewer.go_to_step(step);
            run(&mut viewer, &mut input, 2.0);
            assert_eq!(viewer.current_step(), step);
        }
    }

    #[test]
    fn action_queue_drives_navigation() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        run(&mut viewer, &mut input, 2.0);

        input.push(InputEvent::Action {
            kind: ACTION_GO_TO_STEP,
            value: 4.0,
        });
        run(&mut viewer, &mut input, 2.0);
        assert_eq!(viewer.current_step(), Step::Gallery);

        // Out-of-range index is a no-op
        input.push(InputEvent::Action {
            kind: ACTION_GO_TO_STEP,
            value: 99.0,
        });
        run(&mut viewer, &mut input, 1.0);
        assert_eq!(viewer.current_step(), Step::Gallery);
    }

    #[test]
    fn step_change_emits_event_and_gates_overlay() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        run(&mut viewer, &mut input, 2.0);

        viewer.go_to_step(Step::Gallery);
        let mut saw_change = false;
        for _ in 0..200 {
            viewer.tick(0.016, &mut input);
            if viewer
                .events()
                .iter()
                .any(|e| e.kind == EVENT_STEP_CHANGED && e.a == 4.0)
            {
                saw_change = true;
            }
        }
        assert!(saw_change);

        // Overlay only reacts while the gallery is current
        viewer.set_gallery_bounds(800.0, 400.0);
        assert!(viewer.wheel(0.0, 30.0));
        viewer.go_to_step(Step::Letter);
        run(&mut viewer, &mut input, 2.0);
        assert!(!viewer.wheel(0.0, 30.0));
    }

    #[test]
    fn begin_is_inert_for_music_until_ready() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        // First tick flushes the initial Create command
        viewer.tick(0.016, &mut input);
        assert!(viewer
            .events()
            .iter()
            .any(|e| e.kind == EVENT_PLAYER_CREATE));

        viewer.begin();
        viewer.tick(0.016, &mut input);
        assert!(
            !viewer.events().iter().any(|e| e.kind == EVENT_PLAYER_PLAY),
            "play before ready must be dropped"
        );

        viewer.player_ready();
        viewer.tick(0.016, &mut input);
        assert!(viewer
            .events()
            .iter()
            .any(|e| e.kind == EVENT_PLAYER_VOLUME && e.a == 30.0));

        input.push(InputEvent::Action {
            kind: ACTION_TOGGLE_MUSIC,
            value: 0.0,
        });
        viewer.tick(0.016, &mut input);
        assert!(viewer.events().iter().any(|e| e.kind == EVENT_PLAYER_PLAY));
    }

    #[test]
    fn full_walk_then_home_restores_decor() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        run(&mut viewer, &mut input, 2.0);

        for step in Step::ALL.iter().skip(1) {
            viewer.go_to_step(*step);
            run(&mut viewer, &mut input, 1.5);
        }
        viewer.celebrate();
        run(&mut viewer, &mut input, 2.0);

        input.push(InputEvent::Action {
            kind: ACTION_GO_HOME,
            value: 0.0,
        });
        run(&mut viewer, &mut input, 3.0);

        assert_eq!(viewer.current_step(), Step::Welcome);
        for shape in viewer.decor().shapes() {
            assert_eq!(shape.pos, shape.rest_pos);
            assert!((shape.opacity - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn double_celebrate_does_not_panic_and_runs_out() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        input.push(InputEvent::Action {
            kind: ACTION_CELEBRATE,
            value: 0.0,
        });
        input.push(InputEvent::Action {
            kind: ACTION_CELEBRATE,
            value: 0.0,
        });
        run(&mut viewer, &mut input, 12.0);
        let mut out = Vec::new();
        viewer.build_confetti_instances(&mut out);
        assert!(out.is_empty(), "all confetti should have expired");
    }

    #[test]
    fn clipboard_failure_leaves_ledger_untouched() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        viewer.add_wish("stay gold");

        input.push(InputEvent::Action {
            kind: ACTION_COPY_WISHES,
            value: 0.0,
        });
        viewer.tick(0.016, &mut input);
        assert!(viewer
            .events()
            .iter()
            .any(|e| e.kind == EVENT_CLIPBOARD_WRITE));
        assert_eq!(viewer.export_text(), "stay gold");

        viewer.clipboard_result(false);
        assert_eq!(viewer.copy_status_code(), 2);
        run(&mut viewer, &mut input, 2.5);
        assert_eq!(viewer.copy_status_code(), 0);
        assert_eq!(viewer.wishes(), &["stay gold".to_string()]);
    }

    #[test]
    fn wishes_round_trip_between_sessions() {
        let store = SharedStore::default();
        let config = PresentationConfig::from_json(config_json()).unwrap();
        {
            let mut viewer = Viewer::new(config.clone(), Box::new(store.clone()), 42);
            viewer.add_wish("  remember this  ");
            viewer.add_wish("");
        }
        let reloaded = Viewer::new(config, Box::new(store), 42);
        assert_eq!(reloaded.wishes(), &["remember this".to_string()]);
    }

    #[test]
    fn launch_scatters_shapes_once() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        viewer.add_wish("fly");
        input.push(InputEvent::Action {
            kind: ACTION_LAUNCH_WISH,
            value: 0.0,
        });
        viewer.tick(0.016, &mut input);
        assert!(viewer.launch().is_launched());
        assert_eq!(viewer.launch().wish_text(), "fly");
        assert!(viewer.decor().is_animating());

        // Second launch is ignored
        viewer.launch_wish();
        run(&mut viewer, &mut input, 8.0);
        assert_eq!(
            viewer.launch().phase(),
            crate::wishes::LaunchPhase::Settled
        );
    }

    #[test]
    fn start_over_reaches_the_host() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        input.push(InputEvent::Action {
            kind: ACTION_START_OVER,
            value: 0.0,
        });
        viewer.tick(0.016, &mut input);
        assert!(viewer.events().iter().any(|e| e.kind == EVENT_START_OVER));
    }

    #[test]
    fn resize_updates_camera_and_confetti() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        input.push(InputEvent::Resize {
            width: 1920.0,
            height: 1080.0,
        });
        viewer.tick(0.016, &mut input);
        let uniform = viewer.camera_uniform();
        let reference = {
            let mut cam = SceneCamera::new(1920.0, 1080.0);
            cam.resize(1920.0, 1080.0);
            cam.uniform()
        };
        assert_eq!(uniform.view_proj, reference.view_proj);
    }

    #[test]
    fn frame_buffers_have_expected_shapes() {
        let mut viewer = make_viewer();
        let mut input = InputQueue::new();
        run(&mut viewer, &mut input, 2.0);

        let mut shapes = Vec::new();
        viewer.build_shape_instances(&mut shapes);
        assert_eq!(shapes.len(), crate::decor::field::SHAPE_COUNT);

        let mut panels = Vec::new();
        viewer.build_panel_states(&mut panels);
        assert_eq!(panels.len(), Step::COUNT);

        assert_eq!(
            viewer.starfield_points().len(),
            crate::decor::starfield::STAR_COUNT
        );
    }
}
