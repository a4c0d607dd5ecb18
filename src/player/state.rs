use std::time::Duration;

use crate::selection::TrackResource;

/// One entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub resource: TrackResource,
    /// Position in the playlist, assigned when the playlist is loaded.
    pub index: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Observable playback state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    /// `None` until a playlist is loaded; otherwise a valid playlist index.
    pub current_index: Option<usize>,
    /// A scrub gesture is in progress; position ticks are not applied.
    pub seeking: bool,
    pub position: Duration,
    /// `None` until the output reports the length of the bound track.
    pub duration: Option<Duration>,
    pub status: PlaybackStatus,
}

impl PlayerState {
    /// Seek bar position on a 0..=1 scale; 0 while the duration is unknown or zero.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}
