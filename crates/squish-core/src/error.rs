//! Error types for the compression dispatcher.

use thiserror::Error;

use crate::media::MediaKind;

/// Errors surfaced by the compression dispatcher.
///
/// Both variants are fatal to the request: there is no retry, no partial
/// output, and no fallback between modes or codecs.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The requested media kind is not one of audio, image, or video.
    #[error("unsupported media kind: '{0}' (expected one of: audio, image, video)")]
    UnsupportedMediaKind(String),

    /// The external encode step failed: unreadable input, missing encoder,
    /// nonzero encoder exit, or timeout.
    #[error("{kind} codec invocation failed: {message}")]
    CodecInvocationFailed { kind: MediaKind, message: String },
}

impl CompressError {
    pub(crate) fn codec(kind: MediaKind, message: impl Into<String>) -> Self {
        CompressError::CodecInvocationFailed {
            kind,
            message: message.into(),
        }
    }
}
