//! Playback position and duration for the current source.

/// Position/duration snapshot for one media source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    /// Current position in seconds. Never above `duration` once it is known.
    pub position: f64,
    /// Track length in seconds, `None` until metadata arrives or for live streams.
    pub duration: Option<f64>,
    pub is_playing: bool,
}

/// Wraps the media source's clock. Owns the `PlaybackState` for the loaded source.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    state: PlaybackState,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[cfg(test)]
    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.state.duration
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Record the duration from metadata. Non-finite or negative values leave it unknown.
    pub fn set_duration(&mut self, duration: f64) -> Option<f64> {
        self.state.duration = if duration.is_finite() && duration >= 0.0 {
            Some(duration)
        } else {
            None
        };
        self.state.position = self.clamp(self.state.position);
        self.state.duration
    }

    /// Apply a position reported by the media source.
    pub fn observe_position(&mut self, current_time: f64) -> f64 {
        self.state.position = self.clamp(current_time);
        self.state.position
    }

    /// Reposition the clock. Returns the position actually applied.
    pub fn seek(&mut self, target: f64) -> f64 {
        self.state.position = self.clamp(target);
        self.state.position
    }

    /// Clamp a position to `[0, duration]` (or `[0, inf)` while the duration is unknown).
    pub fn clamp(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        match self.state.duration {
            Some(duration) => secs.min(duration),
            None => secs,
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
    }

    /// Natural end of playback: back to zero, not playing. Duration is kept.
    pub fn finish(&mut self) {
        self.state.position = 0.0;
        self.state.is_playing = false;
    }

    /// New source: forget everything about the previous one.
    pub fn reset(&mut self) {
        self.state = PlaybackState::default();
    }
}
