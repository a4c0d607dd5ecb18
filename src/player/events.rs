use std::time::Duration;

use crate::metadata::CoverImage;

use super::state::PlaybackStatus;

/// State changes broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    PlaylistReplaced { len: usize },
    TrackChanged { index: usize },
    StatusChanged(PlaybackStatus),
    DurationKnown(Option<Duration>),
    /// `progress` uses the 0..=1 scale.
    PositionChanged { position: Duration, progress: f64 },
    MetadataChanged { index: usize },
}

/// Everything a renderer needs for the "now playing" area.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub index: Option<usize>,
    pub status: PlaybackStatus,
    pub title: String,
    pub artist: String,
    pub cover: CoverImage,
    /// `false` while tags for the current track are still being read.
    pub metadata_ready: bool,
    /// `MM:SS`
    pub elapsed: String,
    /// `MM:SS`, `00:00` while unknown.
    pub total: String,
    /// 0..=1
    pub progress: f64,
}
