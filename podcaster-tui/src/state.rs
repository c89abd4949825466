use std::sync::Arc;

use podcaster_core::{
    PlayerState,
    catalog::{Catalog, CatalogEpisode},
    transport::PlaybackClock,
};
use ratatui::widgets::ListState;

/// Application state for the TUI
pub struct AppState {
    /// Episodes shown on the homepage
    pub catalog: Catalog,
    /// Homepage selection, as a position in `catalog.queue()`
    pub home_state: ListState,
    /// Queue tab selection
    pub queue_state: ListState,
    /// Latest snapshot published by the player
    pub player: Arc<PlayerState>,
    /// Simulated media position
    pub clock: PlaybackClock,
    pub status_message: String,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(catalog: Catalog, player: Arc<PlayerState>) -> Self {
        let mut home_state = ListState::default();
        if !catalog.is_empty() {
            home_state.select(Some(0));
        }

        let status_message = if catalog.is_empty() {
            "No episodes in catalog.".to_string()
        } else {
            format!("{} episodes loaded", catalog.len())
        };

        Self {
            catalog,
            home_state,
            queue_state: ListState::default(),
            player,
            clock: PlaybackClock::new(),
            status_message,
            error_message: None,
        }
    }

    /// Take a new snapshot from the player
    pub fn handle_update(&mut self, snapshot: Arc<PlayerState>) {
        self.error_message = None;
        self.clock.sync(&snapshot);

        self.status_message = match snapshot.current_episode() {
            Some(episode) => format!(
                "{} {} ({}/{})",
                if snapshot.is_playing { "Playing" } else { "Paused" },
                episode.title,
                snapshot.current_episode_index + 1,
                snapshot.episode_list.len()
            ),
            None => "Queue is empty".to_string(),
        };

        if snapshot.is_empty() {
            self.queue_state.select(None);
        } else {
            self.queue_state.select(Some(snapshot.current_episode_index));
        }

        self.player = snapshot;
    }

    pub fn report_error(&mut self, error: &anyhow::Error) {
        log::error!("{:#}", error);
        self.error_message = Some(format!("{:#}", error));
        self.status_message = format!("Error: {:#}", error);
    }

    // ==============================================
    // Homepage Navigation Methods
    // ==============================================

    pub fn home_next(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = match self.home_state.selected() {
            Some(i) if i + 1 < self.catalog.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.home_state.select(Some(i));
    }

    pub fn home_prev(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = match self.home_state.selected() {
            Some(0) | None => self.catalog.len() - 1,
            Some(i) => i - 1,
        };
        self.home_state.select(Some(i));
    }

    pub fn home_selected(&self) -> Option<&CatalogEpisode> {
        self.home_state.selected().and_then(|i| self.catalog.get(i))
    }

    // ==============================================
    // Queue Navigation Methods
    // ==============================================

    pub fn queue_next(&mut self) {
        let len = self.player.episode_list.len();
        if len == 0 {
            return;
        }
        let i = match self.queue_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.queue_state.select(Some(i));
    }

    pub fn queue_prev(&mut self) {
        let len = self.player.episode_list.len();
        if len == 0 {
            return;
        }
        let i = match self.queue_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.queue_state.select(Some(i));
    }

    pub fn queue_selected(&self) -> Option<usize> {
        self.queue_state.selected()
    }
}

#[cfg(test)]
mod tests {
    use podcaster_core::{Episode, PlayerContext, catalog::CatalogOptions};

    use super::*;

    const CATALOG: &str = r#"[
        { "id": "one", "title": "One", "published_at": "2021-01-22 10:00:00",
          "file": { "url": "https://cdn.example/1.mp3", "duration": 100 } },
        { "id": "two", "title": "Two", "published_at": "2021-01-21 10:00:00",
          "file": { "url": "https://cdn.example/2.mp3", "duration": 200 } },
        { "id": "three", "title": "Three", "published_at": "2021-01-20 10:00:00",
          "file": { "url": "https://cdn.example/3.mp3", "duration": 300 } }
    ]"#;

    fn app() -> (AppState, PlayerContext) {
        let catalog = Catalog::from_json(CATALOG, CatalogOptions::default()).unwrap();
        let player = PlayerContext::with_seed(5);
        (AppState::new(catalog, player.snapshot()), player)
    }

    #[test]
    fn home_selection_wraps() {
        let (mut state, _) = app();
        assert_eq!(state.home_selected().map(|e| e.id.as_str()), Some("one"));

        state.home_prev();
        assert_eq!(state.home_selected().map(|e| e.id.as_str()), Some("three"));
        state.home_next();
        assert_eq!(state.home_selected().map(|e| e.id.as_str()), Some("one"));
    }

    #[test]
    fn update_follows_the_player_cursor() {
        let (mut state, mut player) = app();
        player.play_list(state.catalog.queue(), 1);
        state.handle_update(player.snapshot());

        assert_eq!(state.queue_selected(), Some(1));
        assert_eq!(state.status_message, "Playing Two (2/3)");

        player.play(Episode::new("Solo", "https://cdn.example/solo.mp3", 10));
        player.toggle_play();
        state.handle_update(player.snapshot());
        assert_eq!(state.status_message, "Paused Solo (1/1)");

        player.clear_player_state();
        state.handle_update(player.snapshot());
        assert_eq!(state.queue_selected(), None);
        assert_eq!(state.status_message, "Queue is empty");
    }
}
