//! The bake driver: one Markdown file in, deck, video and captions out.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::build_cache::BuildCache;
use crate::captions::make_captions;
use crate::config::BakeOptions;
use crate::converters::outline::extract_text_from_presentation;
use crate::errors::{BakeError, Result};
use crate::export::{export_video, transcode, VideoSettings};
use crate::markdown::{extract_front_matter, parse_markdown};
use crate::render::render_document;
use crate::speech::SpeechSynthesizer;

/// Folder outputs land in when no output base is given.
pub const DEFAULT_BUILD_DIR: &str = "../build/";
const READ_SUFFIX: &str = "_read";

/// A milestone reached by [`bake`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The input was baked before; carries the recorded output.
    SkippedHashed(String),
    SkippedNoSave,
    FinishedDeck,
    FinishedWmv,
    FinishedMp4,
    FinishedCaptions,
    FinishedOutline,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedHashed(path) => {
                write!(f, "Skipping - hashed output already exists: {path}")
            }
            Self::SkippedNoSave => f.write_str("Skipping - nosave parameter was given."),
            Self::FinishedDeck => f.write_str("Finished deck"),
            Self::FinishedWmv => f.write_str("Finished wmv"),
            Self::FinishedMp4 => f.write_str("Finished mp4"),
            Self::FinishedCaptions => f.write_str("Finished captions"),
            Self::FinishedOutline => f.write_str("Finished outline"),
        }
    }
}

/// `../build/<stem>` with a trailing `_read` dropped from the stem.
pub fn default_output_base(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix(READ_SUFFIX).unwrap_or(&stem);
    Path::new(DEFAULT_BUILD_DIR).join(stem)
}

/// `base` with `suffix` appended to its final component.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

fn record(progress: &mut Vec<Progress>, step: Progress) {
    log::debug!("{step}");
    progress.push(step);
}

/// Bakes `options.input`. Each milestone is logged and returned in order.
pub fn bake(options: &BakeOptions, synthesizer: &dyn SpeechSynthesizer) -> Result<Vec<Progress>> {
    let mut progress = Vec::new();
    let mut build_cache = BuildCache::load(&options.hash_file)?;

    let input_text = fs::read_to_string(&options.input)?;
    let base = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_base(&options.input));
    let front_matter = extract_front_matter(&input_text)?;

    if !options.force {
        if let Some(previous) = build_cache.lookup(&input_text) {
            record(&mut progress, Progress::SkippedHashed(previous.to_string()));
            return Ok(progress);
        }
    }

    let mut render_config = options.render.clone();
    if render_config.input_label.is_empty() {
        render_config.input_label = options.input.to_string_lossy().into_owned();
    }
    let voice = render_config.voice.clone();
    let deck_id = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());

    let root = parse_markdown(&front_matter.content);
    let (markup, mut output) = render_document(&root, &deck_id, &render_config, synthesizer)?;
    output.presentation.title = front_matter
        .metadata
        .get("title")
        .and_then(serde_yaml::Value::as_str)
        .map(str::to_string);
    log::debug!(
        "Rendered {} slides with {} narrated",
        output.presentation.slides.len(),
        output.transcript.len()
    );

    if options.nosave {
        record(&mut progress, Progress::SkippedNoSave);
        return Ok(progress);
    }

    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(with_suffix(&base, ".html"), markup)?;
    fs::write(
        with_suffix(&base, &format!("-{voice}.deck.json")),
        serde_json::to_string_pretty(&output.presentation)?,
    )?;
    record(&mut progress, Progress::FinishedDeck);

    let wmv_path = with_suffix(&base, &format!("-{voice}.wmv"));
    if let Some(preset) = options.wmv.preset() {
        let resources = std::env::current_dir().ok();
        export_video(
            &output.presentation,
            &wmv_path,
            VideoSettings::from_preset(preset),
            resources.as_deref(),
        )?;
        build_cache.record(&input_text, &wmv_path)?;
        record(&mut progress, Progress::FinishedWmv);
    }

    if options.mp4 {
        if !wmv_path.exists() {
            return Err(BakeError::Export(format!(
                "mp4 export converts {}, which does not exist; request a wmv as well",
                wmv_path.display()
            )));
        }
        transcode(&wmv_path, &with_suffix(&base, &format!("-{voice}.mp4")))?;
        record(&mut progress, Progress::FinishedMp4);
    }

    if options.transcript {
        let captions = make_captions(&output.transcript, &output.durations);
        fs::write(with_suffix(&base, &format!("-{voice}.vtt")), captions.join("\n"))?;
        record(&mut progress, Progress::FinishedCaptions);
    }

    if options.outline {
        fs::write(
            with_suffix(&base, ".outline.md"),
            extract_text_from_presentation(&output.presentation),
        )?;
        record(&mut progress, Progress::FinishedOutline);
    }

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::presentation::Presentation;
    use crate::speech::testing::FakeSynthesizer;

    const LESSON: &str = "---\ntitle: Loops\nwaltz:\n  id: 7\n---\n# Loops\n\n## For loops\n\nA for loop walks a sequence.\n\n- first\n- second\n";

    fn options(dir: &Path) -> BakeOptions {
        let input = dir.join("loops_read.md");
        fs::write(&input, LESSON).unwrap();
        let mut options = BakeOptions::new(input);
        options.output = Some(dir.join("out").join("loops"));
        options.hash_file = dir.join("hashes.json");
        options
    }

    #[test]
    fn output_base_drops_read_suffix() {
        assert_eq!(
            default_output_base(Path::new("lessons/loops_read.md")),
            Path::new("../build/").join("loops")
        );
        assert_eq!(
            default_output_base(Path::new("intro.md")),
            Path::new("../build/").join("intro")
        );
    }

    #[test]
    fn writes_markup_deck_captions_and_outline() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options(dir.path());
        options.transcript = true;
        options.outline = true;
        let synth = FakeSynthesizer::default();

        let progress = bake(&options, &synth).unwrap();
        assert_eq!(
            progress,
            vec![
                Progress::FinishedDeck,
                Progress::FinishedCaptions,
                Progress::FinishedOutline
            ]
        );

        let out = dir.path().join("out");
        let html = fs::read_to_string(out.join("loops.html")).unwrap();
        assert!(html.contains("A for loop walks a sequence."));

        let deck: Presentation =
            serde_json::from_str(&fs::read_to_string(out.join("loops-Amy.deck.json")).unwrap())
                .unwrap();
        assert_eq!(deck.title.as_deref(), Some("Loops"));
        assert!(deck.slides.len() >= 2);

        let vtt = fs::read_to_string(out.join("loops-Amy.vtt")).unwrap();
        assert!(vtt.starts_with("WEBVTT\n"));
        assert!(vtt.contains("A for loop walks a sequence."));

        let outline = fs::read_to_string(out.join("loops.outline.md")).unwrap();
        assert!(outline.contains("For loops"));
        assert_eq!(
            synth.texts().last().map(String::as_str),
            Some("A for loop walks a sequence.")
        );
    }

    #[test]
    fn nosave_renders_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options(dir.path());
        options.nosave = true;
        let progress = bake(&options, &FakeSynthesizer::default()).unwrap();
        assert_eq!(progress, vec![Progress::SkippedNoSave]);
        assert!(!dir.path().join("out").exists());
        assert_eq!(
            progress[0].to_string(),
            "Skipping - nosave parameter was given."
        );
    }

    #[test]
    fn hashed_inputs_are_skipped_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options(dir.path());
        let mut cache = BuildCache::load(&options.hash_file).unwrap();
        cache
            .record(LESSON, Path::new("../build/loops-Amy.wmv"))
            .unwrap();

        let synth = FakeSynthesizer::default();
        let progress = bake(&options, &synth).unwrap();
        assert_eq!(
            progress[0].to_string(),
            "Skipping - hashed output already exists: ../build/loops-Amy.wmv"
        );
        assert!(synth.texts().is_empty());

        options.force = true;
        options.nosave = true;
        let progress = bake(&options, &synth).unwrap();
        assert_eq!(progress, vec![Progress::SkippedNoSave]);
    }

    #[test]
    fn mp4_needs_a_wmv() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = options(dir.path());
        options.mp4 = true;
        let err = bake(&options, &FakeSynthesizer::default()).unwrap_err();
        assert!(matches!(err, BakeError::Export(_)));
    }
}
