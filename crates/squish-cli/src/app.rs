use anyhow::Result;
use console::style;
use squish_core::CodecSettings;

/// Verify the configured FFmpeg binary runs, with install hints otherwise.
pub fn ensure_ffmpeg_installed(settings: &CodecSettings) -> Result<()> {
    let binary = settings.ffmpeg_binary();
    if std::process::Command::new(&binary)
        .arg("-version")
        .output()
        .is_err()
    {
        eprintln!(
            "Error: FFmpeg is not installed or not runnable at '{}'.",
            binary.display()
        );
        eprintln!("\nsquish needs FFmpeg for audio and video compression.");
        eprintln!("Please install FFmpeg:");
        eprintln!("  - Ubuntu/Debian: sudo apt install ffmpeg");
        eprintln!("  - macOS: brew install ffmpeg");
        eprintln!("  - Windows: choco install ffmpeg or download from ffmpeg.org");
        eprintln!("\nOr point squish at an existing binary:");
        eprintln!("  squish config --ffmpeg-path /path/to/ffmpeg\n");
        anyhow::bail!("FFmpeg not available");
    }
    Ok(())
}

/// Print a green success line.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a dimmed status line.
pub fn print_status(message: &str) {
    println!("{}", style(message).dim());
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
