//! Browser platform glue: localStorage-backed wish persistence and the
//! asynchronous clipboard write. Native builds get inert stand-ins so the
//! bridge stays unit-testable off the web.

use fete_engine::WishStore;

/// Wish persistence backed by `window.localStorage` (wasm only).
pub struct LocalWishStore;

#[cfg(target_arch = "wasm32")]
impl WishStore for LocalWishStore {
    fn load(&mut self, key: &str) -> Option<String> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, payload: &str) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if let Some(storage) = storage {
            if storage.set_item(key, payload).is_err() {
                log::warn!("failed to persist wishes under {key}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl WishStore for LocalWishStore {
    fn load(&mut self, _key: &str) -> Option<String> {
        None
    }

    fn save(&mut self, _key: &str, _payload: &str) {}
}

/// The wish store for this platform.
pub fn store() -> Box<dyn WishStore> {
    Box::new(LocalWishStore)
}

/// Write `text` to the system clipboard, then report the outcome through
/// `on_done`. The write is a promise; `on_done` runs when it settles.
#[cfg(target_arch = "wasm32")]
pub fn write_clipboard(text: String, on_done: Box<dyn FnOnce(bool)>) {
    use wasm_bindgen_futures::JsFuture;

    let Some(window) = web_sys::window() else {
        on_done(false);
        return;
    };
    let clipboard = window.navigator().clipboard();
    let promise = clipboard.write_text(&text);
    wasm_bindgen_futures::spawn_local(async move {
        let ok = JsFuture::from(promise).await.is_ok();
        on_done(ok);
    });
}

/// Off the web there is no clipboard; the write always fails, which
/// exercises the same transient-status path the browser would.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_clipboard(_text: String, on_done: Box<dyn FnOnce(bool)>) {
    on_done(false);
}
