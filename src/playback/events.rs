//! Notifications the controller consumes and commands it hands back to the media element.

/// Lifecycle notifications coming from the media source.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaNotification {
    /// Duration became available (`loadedmetadata`). May be non-finite for live streams.
    MetadataLoaded { duration: f64 },
    /// Playback position moved (`timeupdate`).
    TimeUpdate { current_time: f64 },
    /// Enough data buffered to play through (`canplaythrough`).
    CanPlayThrough,
    Started,
    Paused,
    Ended,
    /// The source could not be loaded or decoded.
    SourceFailed { message: String },
}

/// Input from the range control next to the time labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekControlEvent {
    /// The user grabbed or moved the knob (`input`).
    DragStart { value: f64 },
    /// The user released the knob (`change`).
    DragCommit { value: f64 },
}

/// Everything that can happen to the widget, routed through `PlayerController::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Media(MediaNotification),
    Seek(SeekControlEvent),
    TogglePlayback,
    Next,
    Previous,
    SetVolume(f64),
}

impl From<MediaNotification> for PlayerEvent {
    fn from(notification: MediaNotification) -> Self {
        PlayerEvent::Media(notification)
    }
}

impl From<SeekControlEvent> for PlayerEvent {
    fn from(event: SeekControlEvent) -> Self {
        PlayerEvent::Seek(event)
    }
}

/// Side effects for the media element. Applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Play,
    Pause,
    SetPosition(f64),
    SetSource(String),
    SetVolume(f64),
}
