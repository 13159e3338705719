pub mod platform;
pub mod runner;

pub use runner::ViewerRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use fete_engine::types::{
    ACTION_BEGIN, ACTION_CELEBRATE, ACTION_COPY_WISHES, ACTION_GO_HOME, ACTION_GO_TO_STEP,
    ACTION_LAUNCH_WISH, ACTION_PLAY_TRACK, ACTION_START_OVER, ACTION_TOGGLE_MUSIC,
};
use fete_engine::{InputEvent, PresentationConfig};

thread_local! {
    static RUNNER: RefCell<Option<ViewerRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut ViewerRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Viewer not initialized. Call viewer_init() first.");
        f(runner)
    })
}

/// Like `with_runner`, but silently skips if the viewer is already gone.
/// Used by asynchronous completions that may outlive the view.
fn with_runner_opt(f: impl FnOnce(&mut ViewerRunner)) {
    RUNNER.with(|cell| {
        if let Some(runner) = cell.borrow_mut().as_mut() {
            f(runner);
        }
    });
}

/// Create the viewer from a configuration JSON document. `seed` feeds the
/// decorative shape placement; the host typically passes a time-derived
/// value so every load looks a little different. Returns false (and logs)
/// on a malformed document.
#[wasm_bindgen]
pub fn viewer_init(config_json: &str, seed: u32) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    let config = match PresentationConfig::from_json(config_json) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration document: {err}");
            return false;
        }
    };

    let runner = ViewerRunner::new(config, platform::store(), seed as u64);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("fete viewer: initialized");
    true
}

/// Tear the viewer down. The host is responsible for cancelling its frame
/// loop and destroying the embed player alongside this call.
#[wasm_bindgen]
pub fn viewer_destroy() {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = None;
    });
    log::info!("fete viewer: destroyed");
}

/// Advance one frame. Any clipboard write requested this frame is started
/// here; its outcome flows back into the viewer when the promise settles.
#[wasm_bindgen]
pub fn viewer_tick(dt: f32) {
    let clipboard = with_runner(|r| {
        r.tick(dt);
        r.clipboard_request()
    });
    if let Some(text) = clipboard {
        platform::write_clipboard(
            text,
            Box::new(|ok| with_runner_opt(|r| r.viewer_mut().clipboard_result(ok))),
        );
    }
}

// ---- Input ----

#[wasm_bindgen]
pub fn viewer_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn viewer_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

/// Wheel input over the gallery. Returns true when the engine consumed
/// the gesture — the host must preventDefault exactly then.
#[wasm_bindgen]
pub fn viewer_wheel(dx: f32, dy: f32) -> bool {
    with_runner(|r| r.viewer_mut().wheel(dx, dy))
}

#[wasm_bindgen]
pub fn viewer_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn viewer_set_gallery_bounds(width: f32, height: f32) {
    with_runner(|r| r.viewer_mut().set_gallery_bounds(width, height));
}

/// Generic UI action: one of the ACTION_* kinds plus its value.
#[wasm_bindgen]
pub fn viewer_action(kind: u32, value: f32) {
    with_runner(|r| r.push_input(InputEvent::Action { kind, value }));
}

// Named helpers for the common buttons, so the host code reads cleanly.

#[wasm_bindgen]
pub fn viewer_begin() {
    viewer_action(ACTION_BEGIN, 0.0);
}

#[wasm_bindgen]
pub fn viewer_go_to_step(index: u32) {
    viewer_action(ACTION_GO_TO_STEP, index as f32);
}

#[wasm_bindgen]
pub fn viewer_go_home() {
    viewer_action(ACTION_GO_HOME, 0.0);
}

#[wasm_bindgen]
pub fn viewer_toggle_music() {
    viewer_action(ACTION_TOGGLE_MUSIC, 0.0);
}

#[wasm_bindgen]
pub fn viewer_play_track(index: u32) {
    viewer_action(ACTION_PLAY_TRACK, index as f32);
}

#[wasm_bindgen]
pub fn viewer_celebrate() {
    viewer_action(ACTION_CELEBRATE, 0.0);
}

#[wasm_bindgen]
pub fn viewer_launch_wish() {
    viewer_action(ACTION_LAUNCH_WISH, 0.0);
}

#[wasm_bindgen]
pub fn viewer_copy_wishes() {
    viewer_action(ACTION_COPY_WISHES, 0.0);
}

#[wasm_bindgen]
pub fn viewer_start_over() {
    viewer_action(ACTION_START_OVER, 0.0);
}

// ---- Wish ledger ----

#[wasm_bindgen]
pub fn viewer_add_wish(text: &str) -> bool {
    with_runner(|r| r.viewer_mut().add_wish(text))
}

#[wasm_bindgen]
pub fn viewer_remove_wish(index: u32) -> bool {
    with_runner(|r| r.viewer_mut().remove_wish(index as usize))
}

#[wasm_bindgen]
pub fn viewer_wish_count() -> u32 {
    with_runner(|r| r.viewer().wishes().len() as u32)
}

#[wasm_bindgen]
pub fn viewer_wish(index: u32) -> String {
    with_runner(|r| {
        r.viewer()
            .wishes()
            .get(index as usize)
            .cloned()
            .unwrap_or_default()
    })
}

#[wasm_bindgen]
pub fn viewer_export_text() -> String {
    with_runner(|r| r.viewer().export_text())
}

// ---- Embed player notifications ----

#[wasm_bindgen]
pub fn viewer_player_ready() {
    with_runner(|r| r.viewer_mut().player_ready());
}

#[wasm_bindgen]
pub fn viewer_player_state(playing: bool) {
    with_runner(|r| r.viewer_mut().player_state_changed(playing));
}

// ---- Scalar state accessors ----

#[wasm_bindgen]
pub fn get_current_step() -> u32 {
    with_runner(|r| r.viewer().current_step().index() as u32)
}

#[wasm_bindgen]
pub fn get_progress() -> f32 {
    with_runner(|r| r.viewer().progress())
}

#[wasm_bindgen]
pub fn get_is_playing() -> bool {
    with_runner(|r| r.viewer().is_playing())
}

#[wasm_bindgen]
pub fn get_current_track() -> u32 {
    with_runner(|r| r.viewer().current_track() as u32)
}

/// Transient copy status: 0 none, 1 copied, 2 failed.
#[wasm_bindgen]
pub fn get_copy_status() -> u32 {
    with_runner(|r| r.viewer().copy_status_code())
}

#[wasm_bindgen]
pub fn get_tilt_x() -> f32 {
    with_runner(|r| r.viewer().tilt().x)
}

#[wasm_bindgen]
pub fn get_tilt_y() -> f32 {
    with_runner(|r| r.viewer().tilt().y)
}

/// Redirected horizontal scroll accumulated since the last call; the host
/// adds this to the gallery strip's scrollLeft.
#[wasm_bindgen]
pub fn viewer_take_scroll() -> f32 {
    with_runner(|r| r.viewer_mut().take_scroll())
}

// ---- Launch script accessors ----

#[wasm_bindgen]
pub fn get_launch_phase() -> f32 {
    with_runner(|r| r.viewer().launch().phase().code())
}

#[wasm_bindgen]
pub fn get_launch_entry_opacity() -> f32 {
    with_runner(|r| r.viewer().launch().entry_opacity)
}

#[wasm_bindgen]
pub fn get_launch_wish_opacity() -> f32 {
    with_runner(|r| r.viewer().launch().wish_opacity)
}

#[wasm_bindgen]
pub fn get_launch_wish_scale() -> f32 {
    with_runner(|r| r.viewer().launch().wish_scale)
}

#[wasm_bindgen]
pub fn get_launch_wish_rise() -> f32 {
    with_runner(|r| r.viewer().launch().wish_rise)
}

#[wasm_bindgen]
pub fn get_launch_confirm_opacity() -> f32 {
    with_runner(|r| r.viewer().launch().confirm_opacity)
}

#[wasm_bindgen]
pub fn get_launch_wish_text() -> String {
    with_runner(|r| r.viewer().launch().wish_text().to_string())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_shape_instances_ptr() -> *const f32 {
    with_runner(|r| r.shape_instances_ptr())
}

#[wasm_bindgen]
pub fn get_shape_instance_count() -> u32 {
    with_runner(|r| r.shape_instance_count())
}

#[wasm_bindgen]
pub fn get_confetti_instances_ptr() -> *const f32 {
    with_runner(|r| r.confetti_instances_ptr())
}

#[wasm_bindgen]
pub fn get_confetti_instance_count() -> u32 {
    with_runner(|r| r.confetti_instance_count())
}

#[wasm_bindgen]
pub fn get_panel_states_ptr() -> *const f32 {
    with_runner(|r| r.panel_states_ptr())
}

#[wasm_bindgen]
pub fn get_panel_state_count() -> u32 {
    with_runner(|r| r.panel_state_count())
}

#[wasm_bindgen]
pub fn get_star_points_ptr() -> *const f32 {
    with_runner(|r| r.star_points_ptr())
}

#[wasm_bindgen]
pub fn get_star_point_count() -> u32 {
    with_runner(|r| r.star_point_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr())
}

// ---- Wire-format accessors ----

#[wasm_bindgen]
pub fn get_shape_floats() -> u32 {
    fete_engine::render::protocol::SHAPE_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_confetti_floats() -> u32 {
    fete_engine::render::protocol::CONFETTI_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_panel_floats() -> u32 {
    fete_engine::render::protocol::PANEL_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_star_floats() -> u32 {
    fete_engine::render::protocol::STAR_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_event_floats() -> u32 {
    fete_engine::render::protocol::EVENT_FLOATS as u32
}
