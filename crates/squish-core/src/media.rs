use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CompressError;

/// Supported media kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Image,
    Video,
}

/// Compression mode selected by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    #[default]
    Lossy,
    Lossless,
}

/// Output container metadata resolved from (kind, mode).
///
/// Depends on nothing else: not on the quality parameter, not on the
/// input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub extension: &'static str,
    pub mime_type: &'static str,
}

impl MediaKind {
    /// Get the string identifier for this media kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Human-readable display name for this media kind
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }

    /// List all supported media kinds
    pub fn all() -> &'static [MediaKind] {
        &[MediaKind::Audio, MediaKind::Image, MediaKind::Video]
    }

    /// Resolve the output container and MIME type for this kind and mode.
    pub fn output_format(&self, mode: CompressionMode) -> OutputFormat {
        match (self, mode) {
            (MediaKind::Audio, CompressionMode::Lossy) => OutputFormat {
                extension: "mp3",
                mime_type: "audio/mpeg",
            },
            (MediaKind::Audio, CompressionMode::Lossless) => OutputFormat {
                extension: "opus",
                mime_type: "audio/opus",
            },
            (MediaKind::Image, CompressionMode::Lossy) => OutputFormat {
                extension: "jpg",
                mime_type: "image/jpeg",
            },
            (MediaKind::Image, CompressionMode::Lossless) => OutputFormat {
                extension: "webp",
                mime_type: "image/webp",
            },
            (MediaKind::Video, CompressionMode::Lossy)
            | (MediaKind::Video, CompressionMode::Lossless) => OutputFormat {
                extension: "mp4",
                mime_type: "video/mp4",
            },
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "audio" => Ok(MediaKind::Audio),
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(CompressError::UnsupportedMediaKind(s.to_string())),
        }
    }
}

impl CompressionMode {
    /// Get the string identifier for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionMode::Lossy => "lossy",
            CompressionMode::Lossless => "lossless",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CompressionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lossy" => Ok(CompressionMode::Lossy),
            "lossless" => Ok(CompressionMode::Lossless),
            _ => Err(format!("Unknown mode: {}. Available: lossy, lossless", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_table() {
        let cases = [
            (MediaKind::Audio, CompressionMode::Lossy, "mp3", "audio/mpeg"),
            (MediaKind::Audio, CompressionMode::Lossless, "opus", "audio/opus"),
            (MediaKind::Image, CompressionMode::Lossy, "jpg", "image/jpeg"),
            (MediaKind::Image, CompressionMode::Lossless, "webp", "image/webp"),
            (MediaKind::Video, CompressionMode::Lossy, "mp4", "video/mp4"),
            (MediaKind::Video, CompressionMode::Lossless, "mp4", "video/mp4"),
        ];
        for (kind, mode, ext, mime) in cases {
            let format = kind.output_format(mode);
            assert_eq!(format.extension, ext);
            assert_eq!(format.mime_type, mime);
        }
    }

    #[test]
    fn test_media_kind_parsing() {
        assert_eq!(MediaKind::from_str("audio").unwrap(), MediaKind::Audio);
        assert_eq!(MediaKind::from_str("IMAGE").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_str("Video").unwrap(), MediaKind::Video);
    }

    #[test]
    fn test_unknown_media_kind_is_unsupported() {
        let err = MediaKind::from_str("pdf").unwrap_err();
        match err {
            CompressError::UnsupportedMediaKind(kind) => assert_eq!(kind, "pdf"),
            other => panic!("expected UnsupportedMediaKind, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            CompressionMode::from_str("lossless").unwrap(),
            CompressionMode::Lossless
        );
        assert!(CompressionMode::from_str("medium").is_err());
    }

    #[test]
    fn test_round_trip_as_str() {
        for kind in MediaKind::all() {
            assert_eq!(MediaKind::from_str(kind.as_str()).unwrap(), *kind);
        }
    }
}
