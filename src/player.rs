//! The playlist player: which track is current, how it changes, and where
//! playback is.
//!
//! [`PlaylistPlayer`] is driven from a single thread. Commands are plain
//! method calls; everything asynchronous (decoder timing, tag reading)
//! arrives later as a [`Signal`](crate::audio::Signal) through
//! [`PlaylistPlayer::handle_signal`], and anything issued for a superseded
//! load is dropped there.

mod events;
mod playlist_player;
mod state;
mod time;

pub use events::{NowPlaying, PlayerEvent};
pub use playlist_player::PlaylistPlayer;
pub use state::{PlaybackStatus, Track};
