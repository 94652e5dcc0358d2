//! The compression dispatcher: one request in, one result out.

use crate::codec::{AudioCodec, CodecStrategy, ImageCodec, VideoCodec};
use crate::error::CompressError;
use crate::media::MediaKind;
use crate::request::{CompressionRequest, CompressionResult};
use crate::settings::CodecSettings;

/// Maps a [`CompressionRequest`] to the codec strategy for its media kind
/// and packages the encoded bytes with the resolved container metadata.
///
/// The dispatcher holds no per-request state; every call is independent
/// and blocking, and concurrent calls share nothing mutable.
pub struct Dispatcher {
    audio: AudioCodec,
    image: ImageCodec,
    video: VideoCodec,
}

impl Dispatcher {
    /// Build a dispatcher with explicit codec configuration.
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            audio: AudioCodec::new(settings),
            image: ImageCodec::new(),
            video: VideoCodec::new(settings),
        }
    }

    /// Compress one request.
    ///
    /// Invokes exactly one encode per call. The output extension and MIME
    /// type are resolved from (kind, mode) alone and never depend on the
    /// quality parameter or the input bytes.
    ///
    /// # Errors
    /// [`CompressError::CodecInvocationFailed`] on any encode failure;
    /// the request either fully succeeds or fully fails.
    pub fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<CompressionResult, CompressError> {
        let format = request.media_kind.output_format(request.mode);
        let strategy: &dyn CodecStrategy = match request.media_kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
        };

        let bytes = strategy.compress(request)?;

        Ok(CompressionResult {
            bytes,
            extension: format.extension,
            mime_type: format.mime_type,
        })
    }
}
