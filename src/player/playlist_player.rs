use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::audio::{DecodePrimitive, LoadId, Signal};
use crate::metadata::{CoverImage, Metadata, MetadataWorker, UNKNOWN_ARTIST};
use crate::selection::TrackResource;

use super::events::{NowPlaying, PlayerEvent};
use super::state::{PlaybackStatus, PlayerState, Track};
use super::time::format_time;

type Observer = Box<dyn FnMut(&PlayerEvent)>;

/// Ordered playlist bound to one decode primitive.
pub struct PlaylistPlayer<D: DecodePrimitive> {
    playlist: Vec<Track>,
    state: PlayerState,
    /// Generation of the most recent load; signals carrying another one are stale.
    load: LoadId,
    /// The one-shot metadata-ready waiter for `load` has not fired yet.
    awaiting_ready: bool,
    metadata: Option<Metadata>,
    decode_failures: usize,
    output: D,
    resolver: MetadataWorker,
    observers: Vec<Observer>,
}

impl<D: DecodePrimitive> PlaylistPlayer<D> {
    pub fn new(output: D, resolver: MetadataWorker) -> Self {
        Self {
            playlist: Vec::new(),
            state: PlayerState::default(),
            load: LoadId::default(),
            awaiting_ready: false,
            metadata: None,
            decode_failures: 0,
            output,
            resolver,
            observers: Vec::new(),
        }
    }

    /// Register an observer called with every state change, in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&PlayerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: PlayerEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }

    fn emit_position(&mut self) {
        let event = PlayerEvent::PositionChanged {
            position: self.state.position,
            progress: self.state.progress(),
        };
        self.emit(event);
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.state.status != status {
            self.state.status = status;
            self.emit(PlayerEvent::StatusChanged(status));
        }
    }

    /// A track is bound and the output has not given up on it.
    fn has_bound_track(&self) -> bool {
        self.state.current_index.is_some() && self.state.status != PlaybackStatus::Idle
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_index.and_then(|i| self.playlist.get(i))
    }

    /// Tags of the current track, once resolved.
    #[cfg(test)]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    #[cfg(test)]
    pub fn load_id(&self) -> LoadId {
        self.load
    }

    #[cfg(test)]
    pub fn output(&self) -> &D {
        &self.output
    }

    /// Replace the playlist and start the first track. An empty selection is ignored.
    pub fn load_playlist(&mut self, resources: Vec<TrackResource>) {
        if resources.is_empty() {
            debug!("empty selection, keeping current playlist");
            return;
        }

        self.playlist = resources
            .into_iter()
            .enumerate()
            .map(|(index, resource)| Track { resource, index })
            .collect();
        self.state = PlayerState::default();
        self.metadata = None;
        self.awaiting_ready = false;
        self.decode_failures = 0;

        let len = self.playlist.len();
        info!(len, "playlist replaced");
        self.emit(PlayerEvent::PlaylistReplaced { len });

        self.load_track(0);
    }

    /// Bind the track at `index` and start it once the output knows its length.
    /// Out-of-range indices are ignored.
    pub fn load_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            debug!(index, len = self.playlist.len(), "ignoring out-of-range track");
            return;
        };
        let resource = track.resource.clone();

        self.load = self.load.next();
        let status_changed = self.state.status != PlaybackStatus::Loading;
        self.state.status = PlaybackStatus::Loading;
        self.state.current_index = Some(index);

        self.output.bind(self.load, &resource);

        self.state.position = Duration::ZERO;
        self.state.duration = None;
        self.state.seeking = false;
        self.metadata = None;

        self.resolver.request(self.load, index, resource.clone());
        self.awaiting_ready = true;

        info!(index, path = %resource.path().display(), load = ?self.load, "loading track");
        self.emit(PlayerEvent::TrackChanged { index });
        if status_changed {
            self.emit(PlayerEvent::StatusChanged(PlaybackStatus::Loading));
        }
        self.emit_position();
    }

    pub fn play(&mut self) {
        if !self.has_bound_track() {
            return;
        }
        self.output.play();
        self.set_status(PlaybackStatus::Playing);
    }

    pub fn pause(&mut self) {
        if self.state.status != PlaybackStatus::Playing {
            return;
        }
        self.output.pause();
        self.set_status(PlaybackStatus::Paused);
    }

    pub fn toggle_pause(&mut self) {
        if self.state.status == PlaybackStatus::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// One step of a scrub gesture: jump to `fraction` (0..=1) of the track.
    ///
    /// The displayed position follows immediately; ticks are held back until
    /// [`commit_seek`](Self::commit_seek).
    pub fn seek_to(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        self.state.seeking = true;

        if !self.has_bound_track() {
            return;
        }
        let Some(duration) = self.state.duration else {
            trace!("seek before duration is known");
            return;
        };

        let target = duration.mul_f64(fraction);
        self.output.seek_to(target);
        self.state.position = target;
        self.emit_position();
    }

    /// End of the scrub gesture.
    pub fn commit_seek(&mut self) {
        self.state.seeking = false;
    }

    pub fn next(&mut self) {
        let target = match self.state.current_index {
            Some(i) if i + 1 < self.playlist.len() => i + 1,
            _ => 0,
        };
        self.load_track(target);
    }

    pub fn previous(&mut self) {
        let target = match self.state.current_index {
            Some(i) if i > 0 => i - 1,
            _ => match self.playlist.len().checked_sub(1) {
                Some(last) => last,
                None => return,
            },
        };
        self.load_track(target);
    }

    /// Let the output emit due ticks and end-of-track signals.
    pub fn poll_output(&mut self) {
        self.output.poll();
    }

    /// Apply an asynchronous completion. Signals from superseded loads are dropped.
    pub fn handle_signal(&mut self, signal: Signal) {
        if signal.load() != self.load {
            trace!(stale = ?signal.load(), current = ?self.load, "discarding stale signal");
            return;
        }

        match signal {
            Signal::MetadataReady { duration, .. } => self.on_metadata_ready(duration),
            Signal::PositionTick { position, .. } => self.on_position_tick(position),
            Signal::Ended { .. } => self.on_track_ended(),
            Signal::DecodeFailed { reason, .. } => self.on_decode_failed(&reason),
            Signal::MetadataResolved {
                index, metadata, ..
            } => self.on_metadata_resolved(index, metadata),
        }
    }

    fn on_metadata_ready(&mut self, duration: Option<Duration>) {
        if !self.awaiting_ready {
            trace!("metadata-ready already handled for this load");
            return;
        }
        self.awaiting_ready = false;
        self.decode_failures = 0;

        self.state.duration = duration;
        debug!(?duration, "output ready");
        self.emit(PlayerEvent::DurationKnown(duration));

        self.output.play();
        self.set_status(PlaybackStatus::Playing);
    }

    fn on_position_tick(&mut self, position: Duration) {
        if self.state.seeking {
            return;
        }
        self.state.position = match self.state.duration {
            Some(d) => position.min(d),
            None => position,
        };
        self.emit_position();
    }

    fn on_track_ended(&mut self) {
        debug!(index = ?self.state.current_index, "track ended");
        self.next();
    }

    fn on_decode_failed(&mut self, reason: &str) {
        self.awaiting_ready = false;
        self.decode_failures += 1;
        warn!(
            index = ?self.state.current_index,
            failures = self.decode_failures,
            reason,
            "track cannot be played"
        );

        if self.decode_failures >= self.playlist.len() {
            warn!("no playable track in playlist, stopping");
            self.set_status(PlaybackStatus::Idle);
        } else {
            self.next();
        }
    }

    fn on_metadata_resolved(&mut self, index: usize, metadata: Metadata) {
        debug!(index, title = %metadata.title, artist = %metadata.artist, "metadata applied");
        self.metadata = Some(metadata);
        self.emit(PlayerEvent::MetadataChanged { index });
    }

    /// Snapshot for renderers.
    pub fn now_playing(&self) -> NowPlaying {
        let (title, artist, cover, metadata_ready) = match (&self.metadata, self.current_track())
        {
            (Some(m), _) => (m.title.clone(), m.artist.clone(), m.cover.clone(), true),
            (None, Some(track)) => (
                track.resource.display_name(),
                UNKNOWN_ARTIST.to_string(),
                CoverImage::Default,
                false,
            ),
            (None, None) => (String::new(), String::new(), CoverImage::Default, false),
        };

        NowPlaying {
            index: self.state.current_index,
            status: self.state.status,
            title,
            artist,
            cover,
            metadata_ready,
            elapsed: format_time(self.state.position),
            total: format_time(self.state.duration.unwrap_or_default()),
            progress: self.state.progress(),
        }
    }

    /// Fade out, release the output and stop the metadata worker.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.output.release(fade_out);
        self.resolver.shutdown();
        self.state.status = PlaybackStatus::Idle;
    }
}
