//! Video export through the system `ffmpeg`.

pub mod ffmpeg;
pub mod video;

pub use video::{export_video, transcode, VideoSettings};
