//! Codec strategies, one per media kind.
//!
//! Audio and video delegate to an FFmpeg invocation; images are encoded
//! in-process with the `image` crate. All three implement [`CodecStrategy`]
//! and are selected by the dispatcher.

mod audio;
mod ffmpeg;
mod image;
mod video;

pub use audio::AudioCodec;
pub use ffmpeg::FfmpegRunner;
pub use self::image::ImageCodec;
pub use video::VideoCodec;

use crate::error::CompressError;
use crate::request::CompressionRequest;

/// Default bitrate for lossy audio when the host supplies none
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// Default bitrate for lossy video when the host supplies none
pub const DEFAULT_VIDEO_BITRATE: &str = "500k";

/// Default JPEG quality for lossy images when the host supplies none
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// One compression strategy for a single media kind.
///
/// A strategy turns input bytes into compressed output bytes; the output
/// container and MIME type are resolved by the dispatcher, not here.
pub trait CodecStrategy: Send + Sync {
    /// Compress the request's input bytes.
    ///
    /// # Errors
    /// Any decode or encode failure surfaces as
    /// [`CompressError::CodecInvocationFailed`]; nothing is retried.
    fn compress(&self, request: &CompressionRequest) -> Result<Vec<u8>, CompressError>;
}
