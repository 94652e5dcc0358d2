//! Video compression via FFmpeg.

use crate::error::CompressError;
use crate::media::CompressionMode;
use crate::request::CompressionRequest;
use crate::settings::CodecSettings;

use super::{CodecStrategy, DEFAULT_VIDEO_BITRATE, FfmpegRunner};

/// Re-encodes video as H.264 in an MP4 container.
///
/// Lossy mode targets a bitrate with the slow preset; lossless mode uses
/// CRF 0 with the ultrafast preset, which is mathematically lossless for
/// the pixel data. The audio track is left to FFmpeg's mp4 defaults.
pub struct VideoCodec {
    runner: FfmpegRunner,
}

impl VideoCodec {
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            runner: FfmpegRunner::new(settings),
        }
    }

    /// Encoder arguments for the requested mode; the bitrate string is
    /// passed through unvalidated.
    fn build_args(request: &CompressionRequest) -> Vec<String> {
        match request.mode {
            CompressionMode::Lossy => {
                let bitrate = request
                    .quality
                    .as_ref()
                    .map(|q| q.as_codec_value())
                    .unwrap_or_else(|| DEFAULT_VIDEO_BITRATE.to_string());
                vec![
                    "-codec:v".into(),
                    "libx264".into(),
                    "-preset".into(),
                    "slow".into(),
                    "-b:v".into(),
                    bitrate,
                ]
            }
            CompressionMode::Lossless => vec![
                "-codec:v".into(),
                "libx264".into(),
                "-preset".into(),
                "ultrafast".into(),
                "-crf".into(),
                "0".into(),
            ],
        }
    }
}

impl CodecStrategy for VideoCodec {
    fn compress(&self, request: &CompressionRequest) -> Result<Vec<u8>, CompressError> {
        let args = Self::build_args(request);
        let output_ext = request.media_kind.output_format(request.mode).extension;
        self.runner.encode(
            request.media_kind,
            &request.input_name,
            &request.input_bytes,
            &args,
            output_ext,
        )
    }
}
