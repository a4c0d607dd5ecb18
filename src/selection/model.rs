use std::path::{Path, PathBuf};

/// Opaque handle to the raw bytes of one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackResource {
    pub path: PathBuf,
}

impl TrackResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name, extension included. Used as the title of last resort.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
