use std::sync::Arc;
use std::time::Duration;

use crate::episode::{Episode, duration_to_time_string};
use crate::player::{PlayerContext, PlayerState};

/// What a call to [`PlaybackClock::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing selected, or paused
    Idle,
    /// Position moved forward within the episode
    Advanced,
    /// Episode ended and restarted because looping is on
    Restarted,
    /// Episode ended and the player moved to the next one
    Skipped,
    /// Episode ended with nothing after it; the queue was cleared
    Finished,
}

/// Elapsed-time tracker standing in for the media element.
///
/// Reads `is_playing`/`is_looping` from the player and reports the end of an
/// episode back into it.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    /// Seconds into the current episode
    position: f32,
    /// Queue and cursor the position belongs to
    track: Option<(Arc<Vec<Episode>>, usize)>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Reset the position when the selected episode changed
    pub fn sync(&mut self, state: &PlayerState) {
        let same_track = matches!(
            &self.track,
            Some((list, index))
                if Arc::ptr_eq(list, &state.episode_list)
                    && *index == state.current_episode_index
        );
        if !same_track {
            self.position = 0.0;
            self.track = Some((Arc::clone(&state.episode_list), state.current_episode_index));
        }
    }

    /// Advance by `elapsed` and handle the end of the episode.
    pub fn tick(&mut self, player: &mut PlayerContext, elapsed: Duration) -> TickOutcome {
        let state = player.snapshot();
        self.sync(&state);

        let Some(episode) = state.current_episode() else {
            return TickOutcome::Idle;
        };
        if !state.is_playing {
            return TickOutcome::Idle;
        }

        let duration = episode.duration as f32;
        self.position = (self.position + elapsed.as_secs_f32()).min(duration);
        if self.position < duration {
            return TickOutcome::Advanced;
        }

        log::debug!("Episode '{}' ended", episode.title);
        if state.is_looping {
            self.position = 0.0;
            TickOutcome::Restarted
        } else if state.has_next() {
            player.play_next();
            // Shuffle may land on the same episode; start it over either way
            self.position = 0.0;
            self.track = None;
            self.sync(&player.snapshot());
            TickOutcome::Skipped
        } else {
            player.clear_player_state();
            self.position = 0.0;
            TickOutcome::Finished
        }
    }

    /// Jump to `seconds`, clamped to the current episode
    pub fn seek(&mut self, state: &PlayerState, seconds: f32) {
        self.sync(state);
        let duration = state.current_episode().map_or(0.0, |e| e.duration as f32);
        self.position = seconds.clamp(0.0, duration);
    }

    /// Progress through the current episode (0.0 to 1.0)
    pub fn progress(&self, state: &PlayerState) -> f32 {
        match state.current_episode() {
            Some(episode) if episode.duration > 0 => {
                (self.position / episode.duration as f32).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn position_string(&self) -> String {
        duration_to_time_string(self.position as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> Vec<Episode> {
        vec![
            Episode::new("first", "https://cdn.example/1.m4a", 10),
            Episode::new("second", "https://cdn.example/2.m4a", 20),
        ]
    }

    #[test]
    fn paused_player_does_not_advance() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 0);
        player.set_play_state(false);

        assert_eq!(clock.tick(&mut player, Duration::from_secs(4)), TickOutcome::Idle);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn empty_queue_is_idle() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.set_play_state(true);

        assert_eq!(clock.tick(&mut player, Duration::from_secs(1)), TickOutcome::Idle);
    }

    #[test]
    fn advances_then_skips_to_next_episode() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 0);

        assert_eq!(clock.tick(&mut player, Duration::from_secs(4)), TickOutcome::Advanced);
        assert_eq!(clock.position(), 4.0);
        assert!((clock.progress(&player.snapshot()) - 0.4).abs() < f32::EPSILON);

        assert_eq!(clock.tick(&mut player, Duration::from_secs(8)), TickOutcome::Skipped);
        assert_eq!(player.snapshot().current_episode_index, 1);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn looping_restarts_the_same_episode() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 0);
        player.toggle_loop();

        assert_eq!(clock.tick(&mut player, Duration::from_secs(30)), TickOutcome::Restarted);
        assert_eq!(player.snapshot().current_episode_index, 0);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn end_of_queue_clears_the_player() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 1);

        assert_eq!(clock.tick(&mut player, Duration::from_secs(25)), TickOutcome::Finished);
        let state = player.snapshot();
        assert!(state.is_empty());
        assert!(state.is_playing);
    }

    #[test]
    fn changing_episode_resets_position() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 0);
        clock.tick(&mut player, Duration::from_secs(5));

        player.play_next();
        clock.sync(&player.snapshot());
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn replaying_an_episode_restarts_it() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play(queue()[0].clone());
        clock.tick(&mut player, Duration::from_secs(5));

        player.play(queue()[0].clone());
        clock.sync(&player.snapshot());
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn seek_is_clamped_to_episode() {
        let mut player = PlayerContext::with_seed(3);
        let mut clock = PlaybackClock::new();
        player.play_list(queue(), 1);

        clock.seek(&player.snapshot(), 99.0);
        assert_eq!(clock.position(), 20.0);
        clock.seek(&player.snapshot(), -3.0);
        assert_eq!(clock.position(), 0.0);
        assert_eq!(clock.position_string(), "00:00:00");
    }
}
