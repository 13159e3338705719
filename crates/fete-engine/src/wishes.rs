// wishes.rs
//
// The wish ledger: a small persisted list of free-text wishes captured on
// the final step, plus the one-shot launch choreography. Persistence goes
// through the WishStore trait so the engine stays headless — the web
// bridge plugs in localStorage, tests plug in a map.

use std::collections::HashMap;

use crate::anim::easing::{ease, Easing};

/// Durable storage for the ledger payload. Absence on read is an empty
/// ledger, not an error.
pub trait WishStore {
    fn load(&mut self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, payload: &str);
}

/// In-memory store used by tests and non-wasm hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WishStore for MemoryStore {
    fn load(&mut self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn save(&mut self, key: &str, payload: &str) {
        self.map.insert(key.to_string(), payload.to_string());
    }
}

/// Storage key for a recipient's ledger. Deterministic, so reloading the
/// same configuration finds the same wishes.
pub fn storage_key(recipient: &str) -> String {
    format!("wishes:{recipient}")
}

/// How long a copy status stays on screen.
const STATUS_DURATION: f32 = 2.0;

/// Launched when the ledger is empty.
const FALLBACK_WISH: &str = "May every wish you make come true";

/// Outcome of the most recent clipboard export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    Failed,
}

/// The persisted wish list. Append-only via `add`, except explicit
/// per-index removal. Entries are opaque free text: no dedup, insertion
/// order preserved.
pub struct WishLedger {
    key: String,
    entries: Vec<String>,
    status: Option<CopyStatus>,
    status_timer: f32,
}

impl WishLedger {
    /// Load the recipient's ledger from the store. A malformed payload is
    /// logged and dropped rather than crashing the view.
    pub fn load(recipient: &str, store: &mut dyn WishStore) -> Self {
        let key = storage_key(recipient);
        let entries = match store.load(&key) {
            Some(payload) => match serde_json::from_str::<Vec<String>>(&payload) {
                Ok(list) => list,
                Err(err) => {
                    log::warn!("discarding malformed wish payload for {key}: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self {
            key,
            entries,
            status: None,
            status_timer: 0.0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a wish. Blank or whitespace-only input is ignored.
    /// Returns whether the ledger changed.
    pub fn add(&mut self, text: &str, store: &mut dyn WishStore) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.entries.push(trimmed.to_string());
        self.persist(store);
        true
    }

    /// Remove the wish at `index`, keeping the rest in order.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize, store: &mut dyn WishStore) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        self.persist(store);
        true
    }

    fn persist(&self, store: &mut dyn WishStore) {
        match serde_json::to_string(&self.entries) {
            Ok(payload) => store.save(&self.key, &payload),
            Err(err) => log::warn!("failed to encode wish payload: {err}"),
        }
    }

    /// Newline-joined entries for the clipboard export.
    pub fn export_text(&self) -> String {
        self.entries.join("\n")
    }

    /// The wish the launch sequence presents: the most recent entry, or a
    /// fixed fallback phrase when the ledger is empty.
    pub fn launch_text(&self) -> String {
        self.entries
            .last()
            .cloned()
            .unwrap_or_else(|| FALLBACK_WISH.to_string())
    }

    /// Record the asynchronous clipboard outcome. The status is transient
    /// and clears itself after a fixed time.
    pub fn copy_result(&mut self, ok: bool) {
        self.status = Some(if ok { CopyStatus::Copied } else { CopyStatus::Failed });
        self.status_timer = STATUS_DURATION;
    }

    pub fn copy_status(&self) -> Option<CopyStatus> {
        self.status
    }

    /// Advance the status timer.
    pub fn tick(&mut self, dt: f32) {
        if self.status.is_some() {
            self.status_timer -= dt;
            if self.status_timer <= 0.0 {
                self.status = None;
                self.status_timer = 0.0;
            }
        }
    }
}

// ── Launch choreography ──────────────────────────────────────────────

/// Entry UI fade-out.
const FADE_ENTRY_DURATION: f32 = 0.5;
/// Wish text scale-in.
const REVEAL_DURATION: f32 = 0.8;
/// Pause with the wish fully visible.
const HOLD_DURATION: f32 = 1.2;
/// Upward drift and fade.
const DRIFT_DURATION: f32 = 2.5;
/// Confirmation line fade-in after the drift.
const CONFIRM_DURATION: f32 = 1.0;
/// How far the wish rises during the drift, in viewport pixels.
const RISE_DISTANCE: f32 = 260.0;

/// Phases of the launch sequence, in order. Terminal state is `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    Dormant,
    FadingEntry,
    Revealing,
    Holding,
    Drifting,
    Settled,
}

impl LaunchPhase {
    /// Numeric code for the wire buffer.
    pub fn code(self) -> f32 {
        match self {
            LaunchPhase::Dormant => 0.0,
            LaunchPhase::FadingEntry => 1.0,
            LaunchPhase::Revealing => 2.0,
            LaunchPhase::Holding => 3.0,
            LaunchPhase::Drifting => 4.0,
            LaunchPhase::Settled => 5.0,
        }
    }
}

/// The scripted "launch the wish" sequence. Fixed and non-interruptible:
/// once started it runs to `Settled` and stays there.
pub struct LaunchScript {
    phase: LaunchPhase,
    t: f32,
    wish_text: String,
    /// Wish-entry UI opacity (input + list fade out first).
    pub entry_opacity: f32,
    /// The launched wish line.
    pub wish_opacity: f32,
    pub wish_scale: f32,
    /// Upward drift offset in viewport pixels.
    pub wish_rise: f32,
    /// The confirmation line shown at the end.
    pub confirm_opacity: f32,
}

impl LaunchScript {
    pub fn new() -> Self {
        Self {
            phase: LaunchPhase::Dormant,
            t: 0.0,
            wish_text: String::new(),
            entry_opacity: 1.0,
            wish_opacity: 0.0,
            wish_scale: 0.5,
            wish_rise: 0.0,
            confirm_opacity: 0.0,
        }
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    pub fn is_launched(&self) -> bool {
        self.phase != LaunchPhase::Dormant
    }

    pub fn wish_text(&self) -> &str {
        &self.wish_text
    }

    /// Start the sequence with the chosen wish. A launch while one is
    /// already running (or finished) is ignored.
    pub fn launch(&mut self, wish: String) -> bool {
        if self.phase != LaunchPhase::Dormant {
            return false;
        }
        self.phase = LaunchPhase::FadingEntry;
        self.t = 0.0;
        self.wish_text = wish;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.phase == LaunchPhase::Dormant {
            return;
        }
        self.t += dt;
        match self.phase {
            LaunchPhase::Dormant => {}
            LaunchPhase::FadingEntry => {
                let p = self.t / FADE_ENTRY_DURATION;
                self.entry_opacity = ease(1.0, 0.0, p, Easing::QuadIn);
                if p >= 1.0 {
                    self.entry_opacity = 0.0;
                    self.advance(LaunchPhase::Revealing);
                }
            }
            LaunchPhase::Revealing => {
                let p = self.t / REVEAL_DURATION;
                self.wish_opacity = ease(0.0, 1.0, p, Easing::QuadOut);
                self.wish_scale = ease(0.5, 1.0, p, Easing::BackOut);
                if p >= 1.0 {
                    self.wish_opacity = 1.0;
                    self.wish_scale = 1.0;
                    self.advance(LaunchPhase::Holding);
                }
            }
            LaunchPhase::Holding => {
                if self.t >= HOLD_DURATION {
                    self.advance(LaunchPhase::Drifting);
                }
            }
            LaunchPhase::Drifting => {
                let p = self.t / DRIFT_DURATION;
                self.wish_rise = ease(0.0, RISE_DISTANCE, p, Easing::QuadIn);
                self.wish_opacity = ease(1.0, 0.0, p, Easing::QuadIn);
                if p >= 1.0 {
                    self.wish_opacity = 0.0;
                    self.advance(LaunchPhase::Settled);
                }
            }
            LaunchPhase::Settled => {
                let p = self.t / CONFIRM_DURATION;
                self.confirm_opacity = ease(0.0, 1.0, p.min(1.0), Easing::QuadOut);
            }
        }
    }

    fn advance(&mut self, next: LaunchPhase) {
        self.phase = next;
        self.t = 0.0;
    }
}

impl Default for LaunchScript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(store: &mut MemoryStore, recipient: &str) -> WishLedger {
        WishLedger::load(recipient, store)
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        assert!(!ledger.add("", &mut store));
        assert!(!ledger.add("   ", &mut store));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_trims_and_appends_once() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        assert!(ledger.add("  make a wish  ", &mut store));
        assert_eq!(ledger.entries(), &["make a wish".to_string()]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        for wish in ["one", "two", "three"] {
            ledger.add(wish, &mut store);
        }
        assert!(ledger.remove(1, &mut store));
        assert_eq!(ledger.entries(), &["one".to_string(), "three".to_string()]);
        // Out of range is a no-op
        assert!(!ledger.remove(9, &mut store));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn round_trips_through_the_store() {
        let mut store = MemoryStore::new();
        {
            let mut ledger = ledger_with(&mut store, "Maya");
            ledger.add("stay golden", &mut store);
            ledger.add("travel more", &mut store);
        }
        let reloaded = ledger_with(&mut store, "Maya");
        assert_eq!(
            reloaded.entries(),
            &["stay golden".to_string(), "travel more".to_string()]
        );
        // A different recipient sees an independent ledger
        let other = ledger_with(&mut store, "Sam");
        assert!(other.is_empty());
    }

    #[test]
    fn malformed_payload_falls_back_to_empty() {
        let mut store = MemoryStore::new();
        store.save(&storage_key("Maya"), "not json at all");
        let ledger = ledger_with(&mut store, "Maya");
        assert!(ledger.is_empty());
    }

    #[test]
    fn export_joins_with_newlines() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        ledger.add("one", &mut store);
        ledger.add("two", &mut store);
        assert_eq!(ledger.export_text(), "one\ntwo");
    }

    #[test]
    fn copy_failure_status_clears_after_timeout() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        ledger.add("one", &mut store);

        ledger.copy_result(false);
        assert_eq!(ledger.copy_status(), Some(CopyStatus::Failed));
        // The ledger itself is untouched by the failure
        assert_eq!(ledger.len(), 1);

        ledger.tick(1.0);
        assert_eq!(ledger.copy_status(), Some(CopyStatus::Failed));
        ledger.tick(1.1);
        assert_eq!(ledger.copy_status(), None);
    }

    #[test]
    fn launch_text_prefers_latest_entry() {
        let mut store = MemoryStore::new();
        let mut ledger = ledger_with(&mut store, "Maya");
        assert_eq!(ledger.launch_text(), FALLBACK_WISH);
        ledger.add("first", &mut store);
        ledger.add("latest", &mut store);
        assert_eq!(ledger.launch_text(), "latest");
    }

    #[test]
    fn launch_script_runs_to_settled() {
        let mut script = LaunchScript::new();
        assert!(!script.is_launched());
        assert!(script.launch("latest".to_string()));
        assert!(script.is_launched());
        assert_eq!(script.wish_text(), "latest");

        // A second launch mid-flight is ignored
        assert!(!script.launch("other".to_string()));

        let mut saw_reveal = false;
        for _ in 0..1000 {
            script.tick(0.016);
            if script.phase() == LaunchPhase::Holding {
                saw_reveal = true;
                assert_eq!(script.wish_opacity, 1.0);
                assert_eq!(script.wish_scale, 1.0);
            }
        }
        assert!(saw_reveal);
        assert_eq!(script.phase(), LaunchPhase::Settled);
        assert_eq!(script.entry_opacity, 0.0);
        assert_eq!(script.wish_opacity, 0.0);
        assert!(script.wish_rise > 0.0);
        assert!((script.confirm_opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn launch_phase_codes_are_distinct_and_ordered() {
        let phases = [
            LaunchPhase::Dormant,
            LaunchPhase::FadingEntry,
            LaunchPhase::Revealing,
            LaunchPhase::Holding,
            LaunchPhase::Drifting,
            LaunchPhase::Settled,
        ];
        for pair in phases.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
    }
}
