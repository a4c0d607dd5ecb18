use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::TrackResource;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn expand_dir(dir: &Path, settings: &LibrarySettings) -> Vec<TrackResource> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_audio_file(path, settings))
        .collect();

    found.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    found.into_iter().map(TrackResource::new).collect()
}

/// Build the playlist order from the selected `paths`.
///
/// Paths keep the order they were given in; each directory contributes its
/// audio files sorted case-insensitively by path. Missing paths and files
/// with an unknown extension are skipped.
pub fn collect(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<TrackResource> {
    let mut resources = Vec::new();

    for path in paths {
        if path.is_dir() {
            let expanded = expand_dir(path, settings);
            debug!(dir = %path.display(), count = expanded.len(), "expanded directory");
            resources.extend(expanded);
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                resources.push(TrackResource::new(path.clone()));
            } else {
                debug!(path = %path.display(), "skipping non-audio file");
            }
        } else {
            warn!(path = %path.display(), "selected path does not exist");
        }
    }

    resources
}
