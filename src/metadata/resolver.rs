use std::path::Path;

use lofty::picture::{Picture, PictureType};
use lofty::prelude::*;
use tracing::{debug, warn};

use crate::config::MetadataSettings;
use crate::selection::TrackResource;

use super::error::MetadataError;
use super::model::{CoverImage, Metadata};

/// Mime type assumed for pictures that do not declare one.
const FALLBACK_COVER_MIME: &str = "image/jpeg";

/// Produces display metadata for a resource. Must not fail.
pub trait MetadataResolver: Send + 'static {
    fn resolve(&self, resource: &TrackResource) -> Metadata;
}

/// Reads ID3/Vorbis/MP4/... tags with `lofty`.
#[derive(Debug, Clone)]
pub struct LoftyResolver {
    max_cover_bytes: Option<usize>,
}

impl LoftyResolver {
    pub fn new(settings: &MetadataSettings) -> Self {
        Self {
            max_cover_bytes: settings.max_cover_bytes,
        }
    }

    fn read_tags(&self, path: &Path) -> Result<Metadata, MetadataError> {
        if !path.exists() {
            return Err(MetadataError::NotFound(path.to_path_buf()));
        }

        let tagged = lofty::read_from_path(path)?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Err(MetadataError::NoTags(path.to_path_buf()));
        };

        let title = tag.title();
        let artist = tag.artist();
        let cover = self.pick_cover(path, tag.pictures());

        Ok(Metadata::from_tags(title.as_deref(), artist.as_deref(), cover))
    }

    fn pick_cover(&self, path: &Path, pictures: &[Picture]) -> CoverImage {
        // Prefer front cover, otherwise use first picture
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first());

        let Some(picture) = picture else {
            return CoverImage::Default;
        };

        let data = picture.data();
        if let Some(max) = self.max_cover_bytes.filter(|max| data.len() > *max) {
            warn!(
                path = %path.display(),
                size = data.len(),
                max,
                "embedded cover too large, using default"
            );
            return CoverImage::Default;
        }

        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| FALLBACK_COVER_MIME.to_string());

        CoverImage::Embedded {
            data: data.to_vec(),
            mime_type,
        }
    }
}

impl MetadataResolver for LoftyResolver {
    fn resolve(&self, resource: &TrackResource) -> Metadata {
        match self.read_tags(resource.path()) {
            Ok(metadata) => metadata,
            Err(MetadataError::NoTags(_)) => {
                debug!(path = %resource.path().display(), "no tags present, using file name");
                Metadata::fallback(resource.display_name())
            }
            Err(e) => {
                warn!(path = %resource.path().display(), error = %e, "tag read failed, using fallback");
                Metadata::fallback(resource.display_name())
            }
        }
    }
}
