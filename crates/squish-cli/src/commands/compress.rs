//! The compress command: builds one request, hands it to the dispatcher,
//! and writes the result next to the input.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use squish_core::{
    CompressionMode, CompressionRequest, CompressionResult, Dispatcher, MediaKind, QualityParam,
    Settings, DEFAULT_AUDIO_BITRATE, DEFAULT_JPEG_QUALITY, DEFAULT_VIDEO_BITRATE,
};

use crate::app;

#[derive(Args)]
pub struct CompressArgs {
    /// File to compress
    pub input: PathBuf,

    /// Compression mode: lossy or lossless
    #[arg(long, default_value = "lossy")]
    pub mode: CompressionMode,

    /// Target bitrate for lossy audio/video (e.g. 128k, 500k, 1000k)
    #[arg(long)]
    pub bitrate: Option<String>,

    /// JPEG quality for lossy images (1-100)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Output path (defaults to {stem}_compressed.{ext} next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Input extensions accepted per media kind, mirroring the kinds of files
/// the tool is meant for. The dispatcher itself never checks these.
fn supported_extensions(kind: MediaKind) -> &'static [&'static str] {
    match kind {
        MediaKind::Audio => &["mp3", "wav", "ogg", "flac", "m4a"],
        MediaKind::Image => &["png", "jpg", "jpeg", "webp", "bmp", "gif"],
        MediaKind::Video => &["mp4", "avi", "mov", "mkv"],
    }
}

fn check_input_extension(kind: MediaKind, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !supported_extensions(kind).contains(&extension.as_str()) {
        anyhow::bail!(
            "Unsupported {} format: '{}'. Supported: {}",
            kind,
            extension,
            supported_extensions(kind).join(", ")
        );
    }
    Ok(())
}

/// Quality parameter for a lossy request; lossless requests carry none.
fn resolve_quality(kind: MediaKind, args: &CompressArgs) -> Option<QualityParam> {
    if args.mode == CompressionMode::Lossless {
        return None;
    }
    let param = match kind {
        MediaKind::Image => {
            QualityParam::Quality(args.quality.unwrap_or(DEFAULT_JPEG_QUALITY))
        }
        MediaKind::Audio => QualityParam::Bitrate(
            args.bitrate
                .clone()
                .unwrap_or_else(|| DEFAULT_AUDIO_BITRATE.to_string()),
        ),
        MediaKind::Video => QualityParam::Bitrate(
            args.bitrate
                .clone()
                .unwrap_or_else(|| DEFAULT_VIDEO_BITRATE.to_string()),
        ),
    };
    Some(param)
}

fn default_output_path(input: &Path, result: &CompressionResult) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output");
    input.with_file_name(result.suggested_filename(name))
}

pub fn run(kind: MediaKind, args: CompressArgs) -> Result<()> {
    check_input_extension(kind, &args.input)?;

    let settings = Settings::load();
    if matches!(kind, MediaKind::Audio | MediaKind::Video) {
        app::ensure_ffmpeg_installed(&settings.codec)?;
    }

    let input_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string();
    let input_bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    app::print_status(&format!(
        "Compressing {} ({}, {} {})...",
        input_name,
        app::format_size(input_bytes.len()),
        args.mode,
        kind
    ));

    let quality = resolve_quality(kind, &args);
    let request = CompressionRequest::new(kind, input_name, input_bytes, args.mode, quality);
    let input_len = request.input_bytes.len();

    let dispatcher = Dispatcher::new(&settings.codec);
    let result = dispatcher.compress(&request)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &result));
    std::fs::write(&output_path, &result.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let ratio = result.bytes.len() as f64 / input_len.max(1) as f64 * 100.0;
    app::print_success(&format!(
        "{} compression successful: {} ({}, {:.0}% of original, {})",
        kind.display_name(),
        output_path.display(),
        app::format_size(result.bytes.len()),
        ratio,
        result.mime_type
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(mode: CompressionMode) -> CompressArgs {
        CompressArgs {
            input: PathBuf::from("in.png"),
            mode,
            bitrate: None,
            quality: None,
            output: None,
        }
    }

    #[test]
    fn test_extension_allowlists() {
        assert!(check_input_extension(MediaKind::Video, Path::new("a.mkv")).is_ok());
        assert!(check_input_extension(MediaKind::Video, Path::new("a.webm")).is_err());
        assert!(check_input_extension(MediaKind::Image, Path::new("a.JPG")).is_ok());
        assert!(check_input_extension(MediaKind::Audio, Path::new("a")).is_err());
    }

    #[test]
    fn test_lossless_carries_no_quality() {
        assert_eq!(
            resolve_quality(MediaKind::Image, &args(CompressionMode::Lossless)),
            None
        );
    }

    #[test]
    fn test_lossy_defaults_per_kind() {
        assert_eq!(
            resolve_quality(MediaKind::Audio, &args(CompressionMode::Lossy)),
            Some(QualityParam::Bitrate("128k".to_string()))
        );
        assert_eq!(
            resolve_quality(MediaKind::Video, &args(CompressionMode::Lossy)),
            Some(QualityParam::Bitrate("500k".to_string()))
        );
        assert_eq!(
            resolve_quality(MediaKind::Image, &args(CompressionMode::Lossy)),
            Some(QualityParam::Quality(75))
        );
    }

    #[test]
    fn test_default_output_path_sits_next_to_input() {
        let result = CompressionResult {
            bytes: vec![],
            extension: "jpg",
            mime_type: "image/jpeg",
        };
        let path = default_output_path(Path::new("/tmp/photos/cat.png"), &result);
        assert_eq!(path, PathBuf::from("/tmp/photos/cat_compressed.jpg"));
    }
}
