//! Seek bar ownership: the playback clock drives the knob unless the user is holding it.

use super::error::PlayerError;
use super::state::PlaybackClock;
use super::time_format::whole_seconds;

/// Who owns the seek control's value right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Playback updates drive the knob.
    #[default]
    Idle,
    /// The user holds the knob; playback updates must not move it.
    Dragging,
}

/// Result of releasing the knob.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekCommit {
    /// Position applied to the clock, in seconds.
    pub position: f64,
    /// Set when the requested value had to be clamped into range.
    pub out_of_range: Option<PlayerError>,
}

/// Integral range control state kept in sync with a `PlaybackClock`.
#[derive(Debug, Clone, Default)]
pub struct SeekSynchronizer {
    drag: DragState,
    value: u64,
    max: u64,
}

impl SeekSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// Current knob value, in whole seconds.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Range upper bound from the track duration. Unknown durations collapse the range to zero.
    pub fn set_max(&mut self, duration: Option<f64>) {
        self.max = duration.map(whole_seconds).unwrap_or(0);
        self.value = self.value.min(self.max);
    }

    /// User grabbed or moved the knob. From here on the value follows the user only.
    pub fn begin_drag(&mut self, value: f64) {
        self.drag = DragState::Dragging;
        self.value = whole_seconds(value).min(self.max);
    }

    /// Follow a clock position, bounded by the range. Ignored while dragging; returns whether
    /// the knob moved.
    pub fn follow_clock(&mut self, position: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.value = whole_seconds(position).min(self.max);
        true
    }

    /// Release the knob: seek the clock to the committed value and take the knob back.
    ///
    /// Values outside `[0, duration]` are clamped. The knob is set exactly once here,
    /// to the position the clock actually accepted.
    pub fn commit(&mut self, clock: &mut PlaybackClock, value: f64) -> SeekCommit {
        let position = clock.seek(value);
        self.drag = DragState::Idle;
        self.value = whole_seconds(position);

        let out_of_range = if value != position {
            Some(PlayerError::InvalidSeekValue {
                requested: value,
                clamped: position,
            })
        } else {
            None
        };

        SeekCommit {
            position,
            out_of_range,
        }
    }

    /// Rewind the knob unless the user currently owns it.
    pub fn rewind(&mut self) {
        if !self.is_dragging() {
            self.value = 0;
        }
    }

    /// Source change: drop any drag in progress and the old range.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
