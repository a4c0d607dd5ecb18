use std::time::Duration;

use crate::selection::TrackResource;

use super::types::LoadId;

/// The capability that turns a resource into sound and reports timing.
///
/// Implementations report back through the [`Signal`](super::Signal) channel
/// they were built with, tagging every signal with the `LoadId` passed to
/// the most recent [`bind`](DecodePrimitive::bind).
pub trait DecodePrimitive {
    /// Release whatever is bound and bind `resource`, paused at position zero.
    ///
    /// Must eventually emit `MetadataReady` or `DecodeFailed` for `load`.
    fn bind(&mut self, load: LoadId, resource: &TrackResource);

    fn play(&mut self);

    fn pause(&mut self);

    /// Jump within the bound resource.
    fn seek_to(&mut self, position: Duration);

    /// Emit due position ticks and end-of-track. Called from the owner's loop.
    fn poll(&mut self) {}

    /// Fade out over `fade_out` and let go of the device.
    fn release(&mut self, _fade_out: Duration) {}
}
