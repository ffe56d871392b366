use serde::{Deserialize, Serialize};

/// A playable entry: where to load it from and what to call it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    #[serde(alias = "src")]
    pub source: String,
    #[serde(default)]
    pub title: String,
}

impl Track {
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
        }
    }

    /// Title for the label, falling back to the file name of the source.
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
        self.source
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown track")
            .to_string()
    }
}

/// Tracks shipped with the widget.
pub fn default_playlist() -> Vec<Track> {
    vec![
        Track::new(
            "audio/Soft-Background-for-Interview.webm",
            "Soft Background for Interview",
        ),
        Track::new("audio/Audio_2.wav", "Audio 2"),
    ]
}
