use std::path::PathBuf;

use thiserror::Error;

/// Reasons tag extraction can fail. Never leaves the resolver.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("no tags in {0:?}")]
    NoTags(PathBuf),

    #[error("unreadable tags: {0}")]
    Read(#[from] lofty::error::LoftyError),
}
