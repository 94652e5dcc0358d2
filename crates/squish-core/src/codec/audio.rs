//! Audio compression via FFmpeg.

use crate::error::CompressError;
use crate::media::CompressionMode;
use crate::request::CompressionRequest;
use crate::settings::CodecSettings;

use super::{CodecStrategy, DEFAULT_AUDIO_BITRATE, FfmpegRunner};

/// Output sample rate for both audio modes
const AUDIO_SAMPLE_RATE: &str = "48000";

/// Re-encodes audio to 48kHz mono: MP3 in lossy mode, Opus in lossless mode.
pub struct AudioCodec {
    runner: FfmpegRunner,
}

impl AudioCodec {
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            runner: FfmpegRunner::new(settings),
        }
    }

    /// Encoder arguments for the requested mode.
    ///
    /// The bitrate string is not validated; whatever the host chose is
    /// handed to FFmpeg verbatim and bad values fail inside the encoder.
    fn build_args(request: &CompressionRequest) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-ar".into(),
            AUDIO_SAMPLE_RATE.into(),
            "-ac".into(),
            "1".into(),
        ];

        match request.mode {
            CompressionMode::Lossy => {
                let bitrate = request
                    .quality
                    .as_ref()
                    .map(|q| q.as_codec_value())
                    .unwrap_or_else(|| DEFAULT_AUDIO_BITRATE.to_string());
                args.extend(["-codec:a".into(), "libmp3lame".into(), "-b:a".into(), bitrate]);
            }
            CompressionMode::Lossless => {
                args.extend([
                    "-codec:a".into(),
                    "libopus".into(),
                    "-vbr".into(),
                    "on".into(),
                    "-compression_level".into(),
                    "10".into(),
                ]);
            }
        }

        args
    }
}

impl CodecStrategy for AudioCodec {
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
