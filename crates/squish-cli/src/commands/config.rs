//! Show or change the persisted settings file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use squish_core::Settings;

#[derive(Args)]
pub struct ConfigArgs {
    /// Set the FFmpeg binary path
    #[arg(long)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Set the per-encode timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the current settings
    #[arg(long)]
    pub show: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(path) = args.ffmpeg_path {
        settings.codec.ffmpeg_path = Some(path);
        changed = true;
    }
    if let Some(secs) = args.timeout_secs {
        settings.codec.timeout_secs = secs;
        changed = true;
    }

    if changed {
        settings.save()?;
        println!("Settings saved.");
    }

    if args.show || !changed {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        if let Some(path) = Settings::config_path() {
            println!("\nSettings file: {}", path.display());
        }
    }

    Ok(())
}
