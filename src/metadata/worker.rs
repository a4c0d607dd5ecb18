use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::trace;

use crate::audio::{LoadId, Signal, SignalSender};
use crate::selection::TrackResource;

use super::resolver::MetadataResolver;

struct Request {
    load: LoadId,
    index: usize,
    resource: TrackResource,
}

/// Handle to the thread that resolves metadata for the newest request.
///
/// Requests queued behind the one being resolved are superseded by the last
/// of them, so a burst of track changes costs one tag read.
pub struct MetadataWorker {
    tx: Option<Sender<Request>>,
    join: Option<JoinHandle<()>>,
}

/// Start a worker owning `resolver`; completions go to `signals`.
pub fn spawn_worker<R: MetadataResolver>(resolver: R, signals: SignalSender) -> MetadataWorker {
    let (tx, rx) = mpsc::channel::<Request>();

    let join = thread::spawn(move || {
        while let Ok(mut req) = rx.recv() {
            while let Ok(newer) = rx.try_recv() {
                trace!(index = req.index, "skipping superseded metadata request");
                req = newer;
            }

            let metadata = resolver.resolve(&req.resource);
            trace!(index = req.index, title = %metadata.title, "metadata resolved");
            let done = Signal::MetadataResolved {
                load: req.load,
                index: req.index,
                metadata,
            };
            if signals.send(done).is_err() {
                break;
            }
        }
    });

    MetadataWorker {
        tx: Some(tx),
        join: Some(join),
    }
}

impl MetadataWorker {
    /// Queue `resource` for resolution on behalf of `load`.
    pub fn request(&self, load: LoadId, index: usize, resource: TrackResource) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Request {
                load,
                index,
                resource,
            });
        }
    }

    /// Stop accepting work and wait for the thread to finish.
    pub fn shutdown(&mut self) {
        self.tx = None;
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for MetadataWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
