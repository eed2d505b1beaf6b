//! Configuration threaded through a single bake.

use std::path::PathBuf;

/// Voice used when none is chosen.
pub const DEFAULT_VOICE: &str = "Amy";
/// Fixed subtitle placed under level-1 headings.
pub const DEFAULT_SUBTITLE: &str = "The Python Bakery";
/// Default location of the folder images are loaded from.
pub const DEFAULT_GRAPHICS_FOLDER: &str = "../graphics/";
/// Default root of the speech clip cache.
pub const DEFAULT_VOICES_DIR: &str = "voices";

/// Settings the document visitor needs while rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Voice name for synthesized narration.
    pub voice: String,
    /// Whether clips missing from the cache may be synthesized remotely.
    pub narrate: bool,
    /// Folder image destinations are resolved against.
    pub graphics_folder: PathBuf,
    /// Subtitle for title slides.
    pub subtitle: String,
    /// Recorded in the clip usage log.
    pub input_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            narrate: false,
            graphics_folder: PathBuf::from(DEFAULT_GRAPHICS_FOLDER),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            input_label: String::new(),
        }
    }
}

/// Video export preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VideoQuality {
    /// No video.
    #[default]
    None,
    /// 720 lines, quality 40.
    Low,
    /// 1080 lines, quality 100.
    High,
}

impl VideoQuality {
    /// `(vertical resolution, quality percentage)`, or `None` when no video is wanted.
    pub fn preset(self) -> Option<(u32, u32)> {
        match self {
            Self::None => None,
            Self::Low => Some((720, 40)),
            Self::High => Some((1080, 100)),
        }
    }
}

/// Everything the pipeline driver needs for one run.
#[derive(Debug, Clone)]
pub struct BakeOptions {
    pub input: PathBuf,
    /// Base path for outputs. Derived from the input name when absent.
    pub output: Option<PathBuf>,
    pub render: RenderConfig,
    pub wmv: VideoQuality,
    pub mp4: bool,
    pub force: bool,
    pub nosave: bool,
    pub transcript: bool,
    pub outline: bool,
    /// Location of the content-hash index.
    pub hash_file: PathBuf,
}

impl BakeOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            render: RenderConfig::default(),
            wmv: VideoQuality::None,
            mp4: false,
            force: false,
            nosave: false,
            transcript: false,
            outline: false,
            hash_file: PathBuf::from(crate::build_cache::HASH_FILE_NAME),
        }
    }
}
