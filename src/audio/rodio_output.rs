use std::path::PathBuf;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::selection::TrackResource;

use super::error::AudioError;
use super::output::DecodePrimitive;
use super::sink::{PreparedSink, create_sink_at, fade_out_sink};
use super::types::{LoadId, Signal, SignalSender};

/// The resource currently bound to the output.
struct Bound {
    load: LoadId,
    path: PathBuf,
    sink: Sink,
    /// Where the current sink started; `Sink::get_pos` counts from there.
    offset: Duration,
    playing: bool,
    ended: bool,
}

impl Bound {
    fn position(&self) -> Duration {
        self.offset + self.sink.get_pos()
    }
}

/// `DecodePrimitive` backed by the default `rodio` output device.
pub struct RodioOutput {
    stream: OutputStream,
    signals: SignalSender,
    tick: Duration,
    last_tick: Instant,
    bound: Option<Bound>,
}

impl RodioOutput {
    pub fn open(signals: SignalSender, settings: &AudioSettings) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            signals,
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            last_tick: Instant::now(),
            bound: None,
        })
    }

    fn emit(&self, signal: Signal) {
        // The receiver only goes away during shutdown.
        let _ = self.signals.send(signal);
    }

    fn drop_bound(&mut self) {
        if let Some(old) = self.bound.take() {
            old.sink.stop();
        }
    }
}

impl DecodePrimitive for RodioOutput {
    fn bind(&mut self, load: LoadId, resource: &TrackResource) {
        self.drop_bound();

        match create_sink_at(&self.stream, resource.path(), Duration::ZERO) {
            Ok(PreparedSink { sink, total }) => {
                debug!(path = %resource.path().display(), ?total, "bound resource");
                self.bound = Some(Bound {
                    load,
                    path: resource.path().to_path_buf(),
                    sink,
                    offset: Duration::ZERO,
                    playing: false,
                    ended: false,
                });
                self.last_tick = Instant::now();
                self.emit(Signal::MetadataReady {
                    load,
                    duration: total,
                });
            }
            Err(e) => {
                warn!(path = %resource.path().display(), error = %e, "cannot bind resource");
                self.emit(Signal::DecodeFailed {
                    load,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn play(&mut self) {
        if let Some(b) = self.bound.as_mut() {
            b.sink.play();
            b.playing = true;
        }
    }

    fn pause(&mut self) {
        if let Some(b) = self.bound.as_mut() {
            b.sink.pause();
            b.playing = false;
        }
    }

    fn seek_to(&mut self, position: Duration) {
        let Some(b) = self.bound.take() else {
            return;
        };

        // Rebuild the sink and skip into the file; works for every format rodio decodes.
        b.sink.stop();
        match create_sink_at(&self.stream, &b.path, position) {
            Ok(PreparedSink { sink, .. }) => {
                if b.playing {
                    sink.play();
                }
                self.bound = Some(Bound {
                    sink,
                    offset: position,
                    ended: false,
                    ..b
                });
            }
            Err(e) => {
                warn!(path = %b.path.display(), error = %e, "seek failed");
                self.emit(Signal::DecodeFailed {
                    load: b.load,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn poll(&mut self) {
        let mut due: Vec<Signal> = Vec::new();

        if let Some(b) = self.bound.as_mut() {
            if b.playing && !b.ended && b.sink.empty() {
                b.ended = true;
                due.push(Signal::Ended { load: b.load });
            } else if self.last_tick.elapsed() >= self.tick {
                self.last_tick = Instant::now();
                due.push(Signal::PositionTick {
                    load: b.load,
                    position: b.position(),
                });
            }
        }

        for signal in due {
            self.emit(signal);
        }
    }

    fn release(&mut self, fade_out: Duration) {
        if let Some(b) = self.bound.take() {
            if b.playing {
                fade_out_sink(&b.sink, fade_out);
            }
            b.sink.stop();
        }
    }
}
