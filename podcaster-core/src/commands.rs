use crate::episode::Episode;

/// Commands sent from a front end to the player
#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
pub enum PlayerCommand {
    /// Play a single episode, replacing the queue
    Play(Episode),
    /// Replace the queue and start at the given position
    #[strum(to_string = "PlayList(index={index})")]
    PlayList { list: Vec<Episode>, index: usize },
    /// Flip play/pause
    TogglePlay,
    /// Mirror a play/pause reported by the playback surface
    SetPlayState(bool),
    ToggleLoop,
    ToggleShuffle,
    /// Skip to the next episode (random while shuffling)
    Next,
    /// Skip to the previous episode
    Previous,
    /// Empty the queue
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_commands() {
        assert_eq!(PlayerCommand::TogglePlay.to_string(), "TogglePlay");
        assert_eq!(
            PlayerCommand::PlayList { list: Vec::new(), index: 4 }.to_string(),
            "PlayList(index=4)"
        );
    }
}
