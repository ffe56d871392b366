//! Fixed, cyclic list of tracks with a cursor.

use super::error::PlayerError;
use crate::models::Track;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistCursor {
    tracks: Vec<Track>,
    index: usize,
}

impl PlaylistCursor {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks, index: 0 })
    }

    /// Start at `index`, wrapped into range.
    #[cfg(test)]
    pub fn starting_at(tracks: Vec<Track>, index: usize) -> Result<Self, PlayerError> {
        let mut cursor = Self::new(tracks)?;
        cursor.index = index % cursor.tracks.len();
        Ok(cursor)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    /// Advance, wrapping past the last track back to the first.
    pub fn next(&mut self) -> &Track {
        self.index = (self.index + 1) % self.tracks.len();
        self.current()
    }

    /// Step back, wrapping before the first track to the last.
    pub fn previous(&mut self) -> &Track {
        let len = self.tracks.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }
}
