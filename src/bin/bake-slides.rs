use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use slide_baker::config::{
    BakeOptions, RenderConfig, VideoQuality, DEFAULT_GRAPHICS_FOLDER, DEFAULT_SUBTITLE,
    DEFAULT_VOICES_DIR,
};
use slide_baker::pipeline::bake;
use slide_baker::speech::{CachingSynthesizer, FfprobeAudioProbe, HttpSpeechClient, RemoteSpeech};

/// Bake an annotated Markdown lesson into a narrated slide deck.
#[derive(Parser, Debug)]
#[command(name = "bake-slides", version)]
struct Cli {
    /// The input Markdown file (.md).
    input: PathBuf,

    /// Base path for the outputs. Derived from the input name when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Folder images are loaded from.
    #[arg(long, default_value = DEFAULT_GRAPHICS_FOLDER)]
    graphics: PathBuf,

    /// Synthesize narration that is not cached yet.
    #[arg(short = 'a', long)]
    narrate: bool,

    /// Voice used for narration.
    #[arg(short, long, value_enum, default_value_t = Voice::Amy)]
    voice: Voice,

    /// Export a WMV video too.
    #[arg(short, long, value_enum, default_value_t = VideoQuality::None)]
    wmv: VideoQuality,

    /// Export an MP4 video too (converted from the WMV).
    #[arg(short, long)]
    mp4: bool,

    /// Rebuild even if this input was already baked.
    #[arg(short, long)]
    force: bool,

    /// Render without writing any output.
    #[arg(short, long)]
    nosave: bool,

    /// Write WebVTT captions of the narration.
    #[arg(short, long)]
    transcript: bool,

    /// Write a Markdown outline of the deck.
    #[arg(long)]
    outline: bool,

    /// Root of the narration clip cache.
    #[arg(long, default_value = DEFAULT_VOICES_DIR)]
    voices_dir: PathBuf,

    /// Subtitle placed under level-1 headings.
    #[arg(long, default_value = DEFAULT_SUBTITLE)]
    subtitle: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Voice {
    #[value(name = "Amy")]
    Amy,
    #[value(name = "Bart")]
    Bart,
}

impl Voice {
    fn name(self) -> &'static str {
        match self {
            Voice::Amy => "Amy",
            Voice::Bart => "Bart",
        }
    }
}

impl Cli {
    fn bake_options(&self) -> BakeOptions {
        let mut options = BakeOptions::new(&self.input);
        options.output = self.output.clone();
        options.render = RenderConfig {
            voice: self.voice.name().to_string(),
            narrate: self.narrate,
            graphics_folder: self.graphics.clone(),
            subtitle: self.subtitle.clone(),
            input_label: self.input.to_string_lossy().into_owned(),
        };
        options.wmv = self.wmv;
        options.mp4 = self.mp4;
        options.force = self.force;
        options.nosave = self.nosave;
        options.transcript = self.transcript;
        options.outline = self.outline;
        options
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let remote: Option<Box<dyn RemoteSpeech>> = match HttpSpeechClient::from_env() {
        Some(client) => Some(Box::new(client)),
        None => {
            if cli.narrate {
                log::warn!("TTS_API_KEY is not set; only cached narration can be used");
            }
            None
        }
    };
    let synthesizer = CachingSynthesizer::new(&cli.voices_dir, remote, Box::new(FfprobeAudioProbe))
        .with_context(|| format!("failed to open voice cache {}", cli.voices_dir.display()))?;

    let options = cli.bake_options();
    let progress = bake(&options, &synthesizer)
        .with_context(|| format!("failed to bake {}", cli.input.display()))?;
    for step in progress {
        println!("{step}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env file loaded: {e}");
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
