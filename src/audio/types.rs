//! Audio-related small types.
//!
//! This module defines the load generation counter and the signals through
//! which asynchronous completions reach the player.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::metadata::Metadata;

/// Generation number of a `load_track` call.
///
/// Every load bumps it; anything produced on behalf of an older load is stale.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(u64);

impl LoadId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Asynchronous completions delivered to the player.
#[derive(Debug, Clone)]
pub enum Signal {
    /// The output decoded enough of the resource to know its length.
    /// `None` means the container does not report one.
    MetadataReady {
        load: LoadId,
        duration: Option<Duration>,
    },
    /// Periodic playback position report.
    PositionTick { load: LoadId, position: Duration },
    /// The bound resource played to its end.
    Ended { load: LoadId },
    /// The bound resource could not be opened or decoded.
    DecodeFailed { load: LoadId, reason: String },
    /// Tag data for the track at `index` finished resolving.
    MetadataResolved {
        load: LoadId,
        index: usize,
        metadata: Metadata,
    },
}

impl Signal {
    /// The load this signal was produced for.
    pub fn load(&self) -> LoadId {
        match self {
            Signal::MetadataReady { load, .. }
            | Signal::PositionTick { load, .. }
            | Signal::Ended { load }
            | Signal::DecodeFailed { load, .. }
            | Signal::MetadataResolved { load, .. } => *load,
        }
    }
}

pub type SignalSender = Sender<Signal>;
