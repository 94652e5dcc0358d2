//! Request and result value objects for one compression call.
//!
//! Everything here is a single-request transient: a request is built from
//! one user interaction, consumed once by the dispatcher, and discarded.

use std::path::Path;

use crate::media::{CompressionMode, MediaKind};

/// Quality selector for lossy compression.
///
/// Audio and video take a bitrate string ("128k", "500k"), images take a
/// JPEG quality step. Neither is validated here: whatever the host passes
/// in goes straight to the codec, and malformed values surface as a codec
/// failure rather than a local one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityParam {
    /// Target bitrate for audio/video encoders (e.g. "128k")
    Bitrate(String),
    /// JPEG quality for image encoding (nominally 1-100, passed through as-is)
    Quality(u8),
}

impl QualityParam {
    /// String form handed to bitrate-driven encoders.
    pub fn as_codec_value(&self) -> String {
        match self {
            QualityParam::Bitrate(rate) => rate.clone(),
            QualityParam::Quality(step) => step.to_string(),
        }
    }
}

/// One compression request, consumed once by the dispatcher.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    pub media_kind: MediaKind,
    /// Original filename; only used to recover the extension, never sniffed
    pub input_name: String,
    pub input_bytes: Vec<u8>,
    pub mode: CompressionMode,
    /// Present for lossy requests; ignored (whatever its value) for lossless
    pub quality: Option<QualityParam>,
}

impl CompressionRequest {
    pub fn new(
        media_kind: MediaKind,
        input_name: impl Into<String>,
        input_bytes: Vec<u8>,
        mode: CompressionMode,
        quality: Option<QualityParam>,
    ) -> Self {
        Self {
            media_kind,
            input_name: input_name.into(),
            input_bytes,
            mode,
            quality,
        }
    }
}

/// Output of a successful compression call.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
    pub mime_type: &'static str,
}

impl CompressionResult {
    /// Suggested delivery filename: `{original-stem}_compressed.{extension}`.
    pub fn suggested_filename(&self, original_name: &str) -> String {
        let stem = Path::new(original_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        format!("{}_compressed.{}", stem, self.extension)
    }
}
