use base64::{Engine as _, engine::general_purpose::STANDARD};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Cover art attached to a track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoverImage {
    /// Picture bytes exactly as embedded, with their declared mime type.
    Embedded { data: Vec<u8>, mime_type: String },
    /// No usable picture; renderers show their default cover.
    #[default]
    Default,
}

impl CoverImage {
    #[cfg(test)]
    pub fn is_default(&self) -> bool {
        matches!(self, CoverImage::Default)
    }

    /// `data:<mime>;base64,<payload>` for embedded pictures.
    pub fn to_data_uri(&self) -> Option<String> {
        match self {
            CoverImage::Embedded { data, mime_type } => {
                Some(format!("data:{mime_type};base64,{}", STANDARD.encode(data)))
            }
            CoverImage::Default => None,
        }
    }

    /// Image source to render: the data URI, or `default_cover` for the sentinel.
    pub fn source(&self, default_cover: &str) -> String {
        self.to_data_uri()
            .unwrap_or_else(|| default_cover.to_string())
    }
}

/// What the UI shows for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub cover: CoverImage,
}

impl Metadata {
    /// Values used when tags cannot be read at all.
    pub fn fallback(display_name: impl Into<String>) -> Self {
        Self {
            title: display_name.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            cover: CoverImage::Default,
        }
    }

    /// Build from parsed tag values, substituting placeholders for blanks.
    pub fn from_tags(title: Option<&str>, artist: Option<&str>, cover: CoverImage) -> Self {
        let pick = |v: Option<&str>, placeholder: &str| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        };

        Self {
            title: pick(title, UNKNOWN_TITLE),
            artist: pick(artist, UNKNOWN_ARTIST),
            cover,
        }
    }
}
