//! Image compression via the `image` crate.
//!
//! Unlike audio and video this path runs in-process: decode from memory,
//! re-encode to JPEG (lossy) or lossless WebP, no external binary.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};

use crate::error::CompressError;
use crate::media::{CompressionMode, MediaKind};
use crate::request::{CompressionRequest, QualityParam};
use crate::verbose;

use super::{CodecStrategy, DEFAULT_JPEG_QUALITY};

/// Re-encodes images: JPEG at a requested quality in lossy mode, WebP with
/// the lossless flag in lossless mode.
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }

    /// JPEG quality step for a lossy request.
    ///
    /// The value is used exactly as given. Out-of-range steps are not
    /// clamped here; whether they work is up to the encoder.
    fn jpeg_quality(request: &CompressionRequest) -> u8 {
        match &request.quality {
            Some(QualityParam::Quality(step)) => *step,
            _ => DEFAULT_JPEG_QUALITY,
        }
    }

    fn encode_lossy(&self, request: &CompressionRequest) -> Result<Vec<u8>, CompressError> {
        let sniffed = image::guess_format(&request.input_bytes).ok();
        let img = image::load_from_memory(&request.input_bytes)
            .map_err(|e| CompressError::codec(MediaKind::Image, e.to_string()))?;

        // Non-JPEG sources are flattened to RGB before the JPEG encode,
        // discarding alpha and palette data. The user picked lossy.
        let img = if sniffed != Some(ImageFormat::Jpeg) {
            verbose!("Source is not JPEG ({sniffed:?}); converting to RGB");
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };

        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, Self::jpeg_quality(request));
        img.write_with_encoder(encoder)
            .map_err(|e| CompressError::codec(MediaKind::Image, e.to_string()))?;
        Ok(out.into_inner())
    }

    fn encode_lossless(&self, request: &CompressionRequest) -> Result<Vec<u8>, CompressError> {
        let img = image::load_from_memory(&request.input_bytes)
            .map_err(|e| CompressError::codec(MediaKind::Image, e.to_string()))?;

        // The lossless WebP encoder takes RGB8/RGBA8 only; other layouts
        // are expanded to RGBA8, which preserves 8-bit pixel data exactly.
        let img = match img {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
            other => DynamicImage::ImageRgba8(other.to_rgba8()),
        };

        let mut out = Cursor::new(Vec::new());
        img.write_with_encoder(WebPEncoder::new_lossless(&mut out))
            .map_err(|e| CompressError::codec(MediaKind::Image, e.to_string()))?;
        Ok(out.into_inner())
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecStrategy for ImageCodec {
    fn compress(&self, request: &CompressionRequest) -> Result<Vec<u8>, CompressError> {
        match request.mode {
            CompressionMode::Lossy => self.encode_lossy(request),
            CompressionMode::Lossless => self.encode_lossless(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn codec() -> ImageCodec {
        ImageCodec::new()
    }

    fn png_with_alpha() -> Vec<u8> {
        let img = RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 128, 200])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn jpeg_source() -> Vec<u8> {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 64]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        out.into_inner()
    }

    fn request(
        bytes: Vec<u8>,
        mode: CompressionMode,
        quality: Option<QualityParam>,
    ) -> CompressionRequest {
        CompressionRequest::new(MediaKind::Image, "test.png", bytes, mode, quality)
    }

    #[test]
    fn test_png_lossy_produces_jpeg_without_alpha() {
        let req = request(
            png_with_alpha(),
            CompressionMode::Lossy,
            Some(QualityParam::Quality(50)),
        );
        let bytes = codec().compress(&req).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_jpeg_lossless_round_trips_pixels_exactly() {
        let source = jpeg_source();
        let source_pixels = image::load_from_memory(&source).unwrap().to_rgb8();

        let req = request(source, CompressionMode::Lossless, None);
        let bytes = codec().compress(&req).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, source_pixels);
    }

    #[test]
    fn test_quality_boundaries_succeed() {
        for quality in [1u8, 100] {
            let req = request(
                png_with_alpha(),
                CompressionMode::Lossy,
                Some(QualityParam::Quality(quality)),
            );
            let bytes = codec().compress(&req).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        }
    }

    #[test]
    fn test_out_of_range_quality_is_passed_through() {
        // 0 and 101 are forwarded unvalidated; the encoder decides. We only
        // assert the call completes without panicking either way.
        for quality in [0u8, 101] {
            let req = request(
                png_with_alpha(),
                CompressionMode::Lossy,
                Some(QualityParam::Quality(quality)),
            );
            let _ = codec().compress(&req);
        }
    }

    #[test]
    fn test_lossless_ignores_quality_param() {
        let req = request(
            png_with_alpha(),
            CompressionMode::Lossless,
            Some(QualityParam::Quality(3)),
        );
        let bytes = codec().compress(&req).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_corrupt_input_fails_with_codec_error() {
        let req = request(
            b"definitely not an image".to_vec(),
            CompressionMode::Lossy,
            Some(QualityParam::Quality(50)),
        );
        let err = codec().compress(&req).unwrap_err();
        match err {
            CompressError::CodecInvocationFailed { kind, .. } => {
                assert_eq!(kind, MediaKind::Image);
            }
            other => panic!("expected CodecInvocationFailed, got {other:?}"),
        }
    }
}
