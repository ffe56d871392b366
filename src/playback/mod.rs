//! Playback core for the audio widget.
//!
//! Platform independent: the browser shell feeds `MediaNotification`s and user input into
//! a `PlayerController` and applies the `MediaCommand`s it returns.
//!
//! - `state`: `PlaybackClock`, the position/duration of the loaded source
//! - `seek_sync`: seek bar ownership between the clock and the user's drag
//! - `playlist`: cyclic track cursor
//! - `time_format`: `M:SS` / `HH:MM:SS` labels
//! - `controller`: the dispatcher tying the above together

pub mod controller;
pub mod error;
pub mod events;
pub mod playlist;
pub mod seek_sync;
pub mod state;
pub mod time_format;

pub use controller::{PlayerController, ToggleVisual};
pub use events::{MediaCommand, PlayerEvent, SeekControlEvent};
