pub mod codec;
pub mod dispatch;
pub mod error;
pub mod media;
pub mod request;
pub mod settings;
pub mod verbose;

pub use codec::{
    CodecStrategy, DEFAULT_AUDIO_BITRATE, DEFAULT_JPEG_QUALITY, DEFAULT_VIDEO_BITRATE,
};
pub use dispatch::Dispatcher;
pub use error::CompressError;
pub use media::{CompressionMode, MediaKind, OutputFormat};
pub use request::{CompressionRequest, CompressionResult, QualityParam};
pub use settings::{CodecSettings, Settings};
pub use verbose::set_verbose;
