//! Persisted settings and explicit codec configuration.
//!
//! The external encoder binary location used to be a process-wide
//! environment mutation in earlier incarnations of this tool; here it is
//! explicit configuration handed to the dispatcher at construction time.
//! `FFMPEG_BINARY` is still honored as a fallback, but it is read once
//! when settings are loaded, never by the dispatcher itself.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the external codec invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecSettings {
    /// Path to the FFmpeg binary (None = resolve "ffmpeg" from PATH)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Hard ceiling on one external encode call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CodecSettings {
    /// The FFmpeg binary to invoke.
    pub fn ffmpeg_binary(&self) -> PathBuf {
        self.ffmpeg_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }

    /// Timeout applied around each external encode call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application settings persisted as JSON in the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub codec: CodecSettings,
}

impl Settings {
    /// Load settings from disk, falling back to defaults.
    ///
    /// A missing or unreadable settings file is not an error; the
    /// `FFMPEG_BINARY` environment variable fills in the binary path when
    /// the file does not pin one.
    pub fn load() -> Self {
        let mut settings = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|contents| serde_json::from_str::<Self>(&contents).ok())
            .unwrap_or_default();

        if settings.codec.ffmpeg_path.is_none()
            && let Ok(binary) = std::env::var("FFMPEG_BINARY")
            && !binary.is_empty()
        {
            settings.codec.ffmpeg_path = Some(PathBuf::from(binary));
        }

        settings
    }

    /// Write settings to the user config directory, creating it if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        use anyhow::Context;

        let path = Self::config_path().context("Could not determine config directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&path, contents).context("Failed to write settings file")?;
        Ok(())
    }

    /// Location of the settings file (`<config_dir>/squish/settings.json`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("squish").join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CodecSettings::default();
        assert_eq!(settings.ffmpeg_binary(), PathBuf::from("ffmpeg"));
        assert_eq!(settings.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"codec": {}}"#).unwrap();
        assert_eq!(settings.codec.timeout_secs, 600);
        assert!(settings.codec.ffmpeg_path.is_none());
    }

    #[test]
    fn test_explicit_binary_wins() {
        let settings: Settings =
            serde_json::from_str(r#"{"codec": {"ffmpeg_path": "/opt/ffmpeg/bin/ffmpeg"}}"#)
                .unwrap();
        assert_eq!(
            settings.codec.ffmpeg_binary(),
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = Settings::default();
        settings.codec.ffmpeg_path = Some(PathBuf::from("/usr/bin/ffmpeg"));
        settings.codec.timeout_secs = 120;

        let json = serde_json::to_string(&settings).unwrap();
        let reloaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.codec.ffmpeg_path, settings.codec.ffmpeg_path);
        assert_eq!(reloaded.codec.timeout_secs, 120);
    }
}
