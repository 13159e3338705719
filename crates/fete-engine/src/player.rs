// player.rs
//
// Media controller for the third-party streaming embed. The embed instance
// itself lives in the host page; this side owns the state machine and
// emits commands, and learns about actual playback only from the embed's
// own state-change notifications. Autoplay restrictions and network stalls
// make optimistic local playback state wrong, so `is_playing` is never set
// by a command, only by a notification.

/// Volume set once when the player becomes ready, in percent.
const DEFAULT_VOLUME: u32 = 30;

/// Lifecycle of the managed embed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// No playlist, or init not requested yet.
    Uninitialized,
    /// Creation requested; waiting for the embed's ready callback.
    Initializing,
    /// The embed accepted control operations.
    Ready,
}

/// A control operation for the host to apply to the embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Create the managed player loaded with playlist track `track`.
    Create { track: usize },
    /// Swap the loaded media to playlist track `track`.
    Cue { track: usize },
    Play,
    Pause,
    SetVolume { percent: u32 },
}

/// The media controller state machine.
pub struct PlayerController {
    phase: PlayerPhase,
    is_playing: bool,
    current_track: usize,
    track_count: usize,
    commands: Vec<PlayerCommand>,
}

impl PlayerController {
    /// Controller over a playlist of `track_count` entries. An empty
    /// playlist never requests a player: the view stays navigable, just
    /// without playback control.
    pub fn new(track_count: usize) -> Self {
        let mut controller = Self {
            phase: PlayerPhase::Uninitialized,
            is_playing: false,
            current_track: 0,
            track_count,
            commands: Vec::new(),
        };
        if track_count > 0 {
            controller.phase = PlayerPhase::Initializing;
            controller.commands.push(PlayerCommand::Create { track: 0 });
        }
        controller
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Whether the embed reported it is actually playing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Index of the currently loaded playlist track.
    pub fn current_track(&self) -> usize {
        self.current_track
    }

    /// The embed finished initializing. Volume is set once here.
    pub fn ready(&mut self) {
        if self.phase != PlayerPhase::Initializing {
            return;
        }
        self.phase = PlayerPhase::Ready;
        self.commands.push(PlayerCommand::SetVolume {
            percent: DEFAULT_VOLUME,
        });
    }

    /// The embed reported a playback state change.
    pub fn state_changed(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Request playback. Inert unless ready.
    pub fn play(&mut self) {
        if self.phase != PlayerPhase::Ready {
            return;
        }
        self.commands.push(PlayerCommand::Play);
    }

    /// Toggle play/pause. Inert unless ready.
    pub fn toggle(&mut self) {
        if self.phase != PlayerPhase::Ready {
            return;
        }
        if self.is_playing {
            self.commands.push(PlayerCommand::Pause);
        } else {
            self.commands.push(PlayerCommand::Play);
        }
    }

    /// Select a playlist track. A different track is cued and played;
    /// the already-loaded track toggles play/pause instead of reloading.
    /// Inert unless ready or if the index is out of range.
    pub fn play_track(&mut self, track: usize) {
        if self.phase != PlayerPhase::Ready || track >= self.track_count {
            return;
        }
        if track != self.current_track {
            self.current_track = track;
            self.commands.push(PlayerCommand::Cue { track });
            self.commands.push(PlayerCommand::Play);
        } else {
            self.toggle();
        }
    }

    /// Drain pending commands for the host to apply.
    pub fn drain_commands(&mut self) -> Vec<PlayerCommand> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_playlist_never_initializes() {
        let mut player = PlayerController::new(0);
        assert_eq!(player.phase(), PlayerPhase::Uninitialized);
        assert!(player.drain_commands().is_empty());
        // Ready without a pending init is ignored
        player.ready();
        assert_eq!(player.phase(), PlayerPhase::Uninitialized);
    }

    #[test]
    fn init_requests_creation_with_first_track() {
        let mut player = PlayerController::new(3);
        assert_eq!(player.phase(), PlayerPhase::Initializing);
        assert_eq!(
            player.drain_commands(),
            vec![PlayerCommand::Create { track: 0 }]
        );
    }

    #[test]
    fn controls_inert_before_ready() {
        let mut player = PlayerController::new(2);
        player.drain_commands();

        player.play();
        player.toggle();
        player.play_track(1);

        assert!(player.drain_commands().is_empty());
        assert!(!player.is_playing());
        assert_eq!(player.current_track(), 0);
    }

    #[test]
    fn ready_sets_volume_once() {
        let mut player = PlayerController::new(1);
        player.drain_commands();
        player.ready();
        assert_eq!(
            player.drain_commands(),
            vec![PlayerCommand::SetVolume { percent: 30 }]
        );
        // A duplicate ready is ignored
        player.ready();
        assert!(player.drain_commands().is_empty());
    }

    #[test]
    fn toggle_follows_reported_state() {
        let mut player = PlayerController::new(1);
        player.drain_commands();
        player.ready();
        player.drain_commands();

        // Not playing -> requests play, but does not assume it happened
        player.toggle();
        assert_eq!(player.drain_commands(), vec![PlayerCommand::Play]);
        assert!(!player.is_playing());

        // The embed confirms playback; the next toggle pauses
        player.state_changed(true);
        player.toggle();
        assert_eq!(player.drain_commands(), vec![PlayerCommand::Pause]);
    }

    #[test]
    fn play_track_cues_a_different_track() {
        let mut player = PlayerController::new(3);
        player.drain_commands();
        player.ready();
        player.drain_commands();

        player.play_track(2);
        assert_eq!(
            player.drain_commands(),
            vec![PlayerCommand::Cue { track: 2 }, PlayerCommand::Play]
        );
        assert_eq!(player.current_track(), 2);
    }

    #[test]
    fn play_track_same_index_toggles_instead() {
        let mut player = PlayerController::new(3);
        player.drain_commands();
        player.ready();
        player.drain_commands();

        player.play_track(2);
        player.drain_commands();
        player.state_changed(true);

        // Same track again: toggles pause, does not re-cue
        player.play_track(2);
        assert_eq!(player.drain_commands(), vec![PlayerCommand::Pause]);
        assert_eq!(player.current_track(), 2);
    }

    #[test]
    fn out_of_range_track_is_ignored() {
        let mut player = PlayerController::new(2);
        player.drain_commands();
        player.ready();
        player.drain_commands();

        player.play_track(7);
        assert!(player.drain_commands().is_empty());
        assert_eq!(player.current_track(), 0);
    }
}
