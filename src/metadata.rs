//! Track metadata: tag reading with a guaranteed fallback.
//!
//! Resolution is best effort. A [`MetadataResolver`] always produces a
//! [`Metadata`] value; when the tags cannot be read it returns
//! [`Metadata::fallback`] instead of an error. The [`MetadataWorker`] runs a
//! resolver off the player's thread and reports back through the signal
//! channel.

mod error;
mod model;
mod resolver;
mod worker;

pub use model::{CoverImage, Metadata, UNKNOWN_ARTIST};
pub use resolver::{LoftyResolver, MetadataResolver};
pub use worker::{MetadataWorker, spawn_worker};

#[cfg(test)]
mod tests;
