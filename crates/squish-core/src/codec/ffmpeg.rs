//! FFmpeg process invocation shared by the audio and video codecs.
//!
//! Each call gets its own scratch directory, so concurrent requests never
//! collide on temp-file names. The contract stays bytes-in/bytes-out: the
//! temp files are an implementation detail and are removed with the
//! scratch directory when the call returns.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::CompressError;
use crate::media::MediaKind;
use crate::settings::CodecSettings;
use crate::verbose;

/// How often the child process is polled while waiting for it to exit
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs one FFmpeg encode per call against a configured binary.
pub struct FfmpegRunner {
    binary: PathBuf,
    timeout: Duration,
}

impl FfmpegRunner {
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            binary: settings.ffmpeg_binary(),
            timeout: settings.timeout(),
        }
    }

    /// Re-encode `input_bytes` with the given codec arguments.
    ///
    /// # Parameters
    /// - `kind`: media kind, attached to any failure
    /// - `input_name`: original filename, used only for its extension
    /// - `input_bytes`: raw bytes of the source file
    /// - `codec_args`: encoder arguments inserted between input and output
    /// - `output_ext`: extension of the output scratch file, which FFmpeg
    ///   uses to pick the container
    ///
    /// # Errors
    /// Returns [`CompressError::CodecInvocationFailed`] if FFmpeg cannot be
    /// started, exits nonzero, or exceeds the configured timeout.
    pub fn encode(
        &self,
        kind: MediaKind,
        input_name: &str,
        input_bytes: &[u8],
        codec_args: &[String],
        output_ext: &str,
    ) -> Result<Vec<u8>, CompressError> {
        let scratch = tempfile::Builder::new()
            .prefix("squish_")
            .tempdir()
            .map_err(|e| CompressError::codec(kind, format!("failed to create scratch dir: {e}")))?;

        let input_ext = Path::new(input_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_lowercase();
        let input_path = scratch.path().join(format!("input.{input_ext}"));
        let output_path = scratch.path().join(format!("output.{output_ext}"));
        let stderr_path = scratch.path().join("stderr.log");

        std::fs::write(&input_path, input_bytes)
            .map_err(|e| CompressError::codec(kind, format!("failed to stage input: {e}")))?;

        let stderr_file = File::create(&stderr_path)
            .map_err(|e| CompressError::codec(kind, format!("failed to create stderr log: {e}")))?;

        let mut command = Command::new(&self.binary);
        command
            .arg("-hide_banner")
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(&input_path)
            .args(codec_args)
            .arg("-y")
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_file));

        verbose!(
            "Running {} with args {:?}",
            self.binary.display(),
            codec_args
        );

        let mut child = command.spawn().map_err(|e| {
            CompressError::codec(
                kind,
                format!(
                    "failed to execute {}: {e}. Make sure FFmpeg is installed.",
                    self.binary.display()
                ),
            )
        })?;

        let status = self.wait_with_timeout(&mut child, kind)?;

        if !status.success() {
            let stderr = std::fs::read_to_string(&stderr_path).unwrap_or_default();
            return Err(CompressError::codec(
                kind,
                format!("ffmpeg exited with {status}: {}", stderr.trim()),
            ));
        }

        let output = std::fs::read(&output_path)
            .map_err(|e| CompressError::codec(kind, format!("failed to read encoder output: {e}")))?;

        verbose!(
            "Encoded {:.1} KB -> {:.1} KB",
            input_bytes.len() as f64 / 1024.0,
            output.len() as f64 / 1024.0
        );

        Ok(output)
    }

    /// Poll the child until it exits or the deadline passes.
    ///
    /// On timeout the child is killed and the call fails; a timed-out
    /// encode is indistinguishable from any other codec failure for the
    /// caller.
    fn wait_with_timeout(
        &self,
        child: &mut std::process::Child,
        kind: MediaKind,
    ) -> Result<std::process::ExitStatus, CompressError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(CompressError::codec(
                            kind,
                            format!("encoder timed out after {}s", self.timeout.as_secs()),
                        ));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(CompressError::codec(
                        kind,
                        format!("failed to wait for encoder: {e}"),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_surfaces_as_codec_failure() {
        let settings = CodecSettings {
            ffmpeg_path: Some(PathBuf::from("/nonexistent/squish-test/ffmpeg")),
            timeout_secs: 5,
        };
        let runner = FfmpegRunner::new(&settings);
        let err = runner
            .encode(MediaKind::Audio, "clip.wav", &[0u8; 16], &[], "mp3")
            .unwrap_err();
        match err {
            CompressError::CodecInvocationFailed { kind, message } => {
                assert_eq!(kind, MediaKind::Audio);
                assert!(message.contains("failed to execute"));
            }
            other => panic!("expected CodecInvocationFailed, got {other:?}"),
        }
    }
}
