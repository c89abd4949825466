/// A single playable episode as seen by the player.
///
/// Only `url` and `duration` matter to playback; the rest is display data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Episode {
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    /// Length in seconds
    pub duration: u64,
    pub url: String,
}

impl Episode {
    pub fn new(title: impl Into<String>, url: impl Into<String>, duration: u64) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            duration,
            ..Default::default()
        }
    }

    pub fn with_members(mut self, members: impl Into<String>) -> Self {
        self.members = members.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Duration formatted as HH:MM:SS
    pub fn duration_string(&self) -> String {
        duration_to_time_string(self.duration)
    }
}

/// Format seconds as HH:MM:SS
pub fn duration_to_time_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(duration_to_time_string(0), "00:00:00");
        assert_eq!(duration_to_time_string(59), "00:00:59");
        assert_eq!(duration_to_time_string(3_661), "01:01:01");
        assert_eq!(duration_to_time_string(8_190), "02:16:30");
    }

    #[test]
    fn builder_fills_display_fields() {
        let episode = Episode::new("Faladev #30", "https://cdn/faladev30.m4a", 3_981)
            .with_members("Diego e Richard")
            .with_thumbnail("https://cdn/faladev30.jpg");

        assert_eq!(episode.members, "Diego e Richard");
        assert_eq!(episode.thumbnail, "https://cdn/faladev30.jpg");
        assert_eq!(episode.duration_string(), "01:06:21");
    }
}
