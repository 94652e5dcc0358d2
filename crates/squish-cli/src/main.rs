mod app;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use squish_core::MediaKind;

use commands::compress::CompressArgs;
use commands::config::ConfigArgs;

#[derive(Parser)]
#[command(
    name = "squish",
    version,
    about = "Compress audio, image, and video files"
)]
struct Cli {
    /// Print diagnostic output while compressing
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress an audio file to MP3 (lossy) or Opus (lossless)
    Audio(CompressArgs),
    /// Compress an image to JPEG (lossy) or lossless WebP
    Image(CompressArgs),
    /// Compress a video to H.264 MP4
    Video(CompressArgs),
    /// Check that the external encoder toolchain is available
    Doctor,
    /// Show or change persisted settings
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    squish_core::set_verbose(cli.verbose);

    match cli.command {
        Command::Audio(args) => commands::compress::run(MediaKind::Audio, args),
        Command::Image(args) => commands::compress::run(MediaKind::Image, args),
        Command::Video(args) => commands::compress::run(MediaKind::Video, args),
        Command::Doctor => commands::doctor::run(),
        Command::Config(args) => commands::config::run(args),
    }
}
