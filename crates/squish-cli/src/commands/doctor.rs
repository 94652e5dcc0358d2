//! Environment check for the external encoder toolchain.

use anyhow::Result;
use console::style;
use squish_core::Settings;

pub fn run() -> Result<()> {
    let settings = Settings::load();
    let binary = settings.codec.ffmpeg_binary();

    println!("{}", style("squish doctor").bold());
    println!("  Image codecs: built in (JPEG, WebP)");

    match std::process::Command::new(&binary).arg("-version").output() {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = stdout.lines().next().unwrap_or("unknown version");
            println!("  FFmpeg: {} ({})", style("ok").green(), version);
            println!("  Binary: {}", binary.display());
            Ok(())
        }
        _ => {
            println!("  FFmpeg: {}", style("missing").red());
            println!();
            println!("Audio and video compression need FFmpeg. Install it:");
            println!("  - Ubuntu/Debian: sudo apt install ffmpeg");
            println!("  - macOS: brew install ffmpeg");
            println!("  - Windows: choco install ffmpeg");
            println!();
            println!("Or point squish at an existing binary:");
            println!("  squish config --ffmpeg-path /path/to/ffmpeg");
            anyhow::bail!("FFmpeg not available at '{}'", binary.display())
        }
    }
}
