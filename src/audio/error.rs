use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening the output or decoding a resource.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
