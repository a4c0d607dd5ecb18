//! Turns the user's selection (paths given on the command line) into an
//! ordered list of playable resources.
//!
//! Plain files are taken as-is when their extension is a known audio
//! extension; directories are expanded with `walkdir` according to
//! `LibrarySettings`.

mod model;
mod scan;

pub use model::TrackResource;
pub use scan::collect;
