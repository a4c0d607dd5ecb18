//! Audio output: the decode primitive seam and its `rodio` implementation.
//!
//! The player never talks to `rodio` directly. It drives a
//! [`DecodePrimitive`] and receives timing information back as [`Signal`]s,
//! each tagged with the [`LoadId`] the primitive was bound under.

mod error;
mod output;
mod rodio_output;
mod sink;
mod types;

pub use output::DecodePrimitive;
pub use rodio_output::RodioOutput;
pub use types::{LoadId, Signal, SignalSender};

#[cfg(test)]
mod tests;
