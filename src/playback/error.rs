/// Failures the player can run into. None of them are fatal: the widget stays interactive.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("{0}")]
    SourceUnavailable(String),
    #[error("Seek to {requested}s is out of range, clamped to {clamped}s")]
    InvalidSeekValue { requested: f64, clamped: f64 },
    #[error("Playlist has no tracks")]
    EmptyPlaylist,
}
