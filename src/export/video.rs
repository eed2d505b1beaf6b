//! Turns a baked deck into a video: one still segment per slide carrying its
//! narration, concatenated into a single WMV.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::converters::{raster::rasterize_svg, svg::convert_presentation_to_svg};
use crate::errors::{BakeError, Result};
use crate::export::ffmpeg::{ensure_parent_dir, is_ffmpeg_on_path, run_ffmpeg};
use crate::models::page::Page;
use crate::models::presentation::Presentation;

/// Seconds a slide stays up when it has no narration timing. Captions only
/// cover narrated slides, so untimed slides shift later cues.
pub const DEFAULT_SLIDE_SECONDS: u64 = 4;
pub const FRAME_RATE: u32 = 24;
/// Narration starts this long after its slide appears.
pub const NARRATION_DELAY_MS: u64 = 1000;
const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Resolution and quality of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSettings {
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Quality percentage, 1 to 100.
    pub quality: u32,
}

impl VideoSettings {
    pub fn from_preset((height, quality): (u32, u32)) -> Self {
        Self { height, quality }
    }

    /// Maps the quality percentage onto the wmv2 quantizer scale (2 best, 31 worst).
    pub fn qscale(&self) -> u32 {
        let quality = self.quality.clamp(1, 100);
        2 + (100 - quality) * 29 / 100
    }
}

/// What a single slide contributes to the video.
#[derive(Debug, Clone, PartialEq)]
struct SlideSegment {
    seconds: u64,
    narration: Option<PathBuf>,
}

impl SlideSegment {
    /// A timed slide holds for its advance time plus the transition out of it,
    /// the same span the captions allot to its narration.
    fn for_slide(slide: &Page) -> Self {
        let seconds = slide
            .transition()
            .and_then(|t| {
                t.advance_after_ms
                    .map(|ms| (ms + u64::from(t.duration_ms)).div_ceil(1000).max(1))
            })
            .unwrap_or(DEFAULT_SLIDE_SECONDS);
        let narration = slide
            .audio_elements()
            .next()
            .map(|audio| PathBuf::from(&audio.source_url));
        Self { seconds, narration }
    }
}

/// Renders every slide of `deck` and encodes them into `output`.
///
/// Picture references relative to `resources_dir` are resolved while drawing.
/// Intermediate stills and segments live in `<output>.parts/` and are removed
/// once the final file is written.
pub fn export_video(
    deck: &Presentation,
    output: &Path,
    settings: VideoSettings,
    resources_dir: Option<&Path>,
) -> Result<()> {
    if deck.slides.is_empty() {
        return Err(BakeError::Export("deck has no slides to export".to_string()));
    }
    if !is_ffmpeg_on_path() {
        return Err(BakeError::Export(
            "ffmpeg is required for video export but was not found on PATH".to_string(),
        ));
    }
    ensure_parent_dir(output)?;
    let work_dir = parts_dir(output);
    fs::create_dir_all(&work_dir)?;

    let svgs = convert_presentation_to_svg(deck)?;
    let mut segment_paths = Vec::with_capacity(svgs.len());
    for (index, (slide, svg)) in deck.slides.iter().zip(&svgs).enumerate() {
        let still = rasterize_svg(svg, resources_dir, Some(settings.height))?;
        let still_path = work_dir.join(format!("slide_{:04}.png", index + 1));
        fs::write(&still_path, &still.png)?;

        let segment = SlideSegment::for_slide(slide);
        let segment_path = work_dir.join(format!("segment_{:04}.wmv", index + 1));
        log::info!(
            "Encoding slide {}/{} ({}s{})",
            index + 1,
            svgs.len(),
            segment.seconds,
            if segment.narration.is_some() { ", narrated" } else { "" }
        );
        run_ffmpeg(
            &format!("slide {}", index + 1),
            &segment_args(&still_path, &segment, settings, &segment_path),
        )?;
        segment_paths.push(segment_path);
    }

    let list_path = work_dir.join("segments.txt");
    fs::write(&list_path, concat_list(&segment_paths))?;
    run_ffmpeg(
        "concatenate",
        &[
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_path.into_os_string(),
            "-c".into(),
            "copy".into(),
            output.as_os_str().to_owned(),
        ],
    )?;

    if let Err(e) = fs::remove_dir_all(&work_dir) {
        log::warn!("Could not remove {}: {}", work_dir.display(), e);
    }
    Ok(())
}

/// Rewraps `src` into the container implied by the extension of `dst`.
pub fn transcode(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    run_ffmpeg(
        "transcode",
        &[
            "-i".into(),
            src.as_os_str().to_owned(),
            "-c:v".into(),
            "libx264".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-c:a".into(),
            "aac".into(),
            "-movflags".into(),
            "+faststart".into(),
            dst.as_os_str().to_owned(),
        ],
    )
}

fn parts_dir(output: &Path) -> PathBuf {
    let mut name = output.file_name().map(OsString::from).unwrap_or_default();
    name.push(".parts");
    output.with_file_name(name)
}

fn segment_args(
    still: &Path,
    segment: &SlideSegment,
    settings: VideoSettings,
    out: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-loop".into(),
        "1".into(),
        "-framerate".into(),
        FRAME_RATE.to_string().into(),
        "-i".into(),
        still.as_os_str().to_owned(),
    ];
    match &segment.narration {
        Some(audio) => {
            args.extend([
                "-i".into(),
                audio.as_os_str().to_owned(),
                "-filter_complex".into(),
                format!("[1:a]adelay={0}|{0},apad[a]", NARRATION_DELAY_MS).into(),
            ]);
        }
        None => {
            args.extend([
                OsString::from("-f"),
                "lavfi".into(),
                "-i".into(),
                format!("anullsrc=r={AUDIO_SAMPLE_RATE}:cl=stereo").into(),
            ]);
        }
    }
    args.extend([
        OsString::from("-map"),
        "0:v".into(),
        "-map".into(),
        (if segment.narration.is_some() { "[a]" } else { "1:a" }).into(),
        "-t".into(),
        segment.seconds.to_string().into(),
        "-vf".into(),
        "scale=trunc(iw/2)*2:trunc(ih/2)*2".into(),
        "-c:v".into(),
        "wmv2".into(),
        "-q:v".into(),
        settings.qscale().to_string().into(),
        "-c:a".into(),
        "wmav2".into(),
        "-ar".into(),
        AUDIO_SAMPLE_RATE.to_string().into(),
        out.as_os_str().to_owned(),
    ]);
    args
}

fn concat_list(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("file '{}'\n", name.replace('\'', r"'\''"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::make_captions;
    use crate::models::audio::{Audio, AudioProperties};
    use crate::models::common::Rect;
    use crate::models::elements::{PageElement, PageElementKind};
    use crate::models::layout::LayoutKind;
    use crate::models::transition::SlideTransition;

    #[test]
    fn quality_maps_to_quantizer() {
        assert_eq!(VideoSettings::from_preset((1080, 100)).qscale(), 2);
        assert_eq!(VideoSettings::from_preset((720, 40)).qscale(), 19);
    }

    #[test]
    fn silent_slides_last_four_seconds() {
        let slide = Page::from_layout("s", LayoutKind::Title);
        let segment = SlideSegment::for_slide(&slide);
        assert_eq!(segment.seconds, DEFAULT_SLIDE_SECONDS);
        assert!(segment.narration.is_none());
        let args = segment_args(
            Path::new("s.png"),
            &segment,
            VideoSettings::from_preset((720, 40)),
            Path::new("s.wmv"),
        );
        assert!(args.contains(&OsString::from("anullsrc=r=44100:cl=stereo")));
        assert!(args.contains(&OsString::from("1:a")));
    }

    fn narrated_slide(id: &str, seconds: u32) -> Page {
        let mut slide = Page::from_layout(id, LayoutKind::TitleContent);
        slide.set_transition(SlideTransition::narrated(seconds));
        slide.elements_mut().push(PageElement::new(
            format!("{id}_e001"),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            PageElementKind::Audio(Audio {
                source_url: "voices/Amy/speech1.mp3".to_string(),
                audio_properties: Some(AudioProperties {
                    auto_play: Some(true),
                    start_delay_ms: Some(1000),
                    length_seconds: Some(7.2),
                }),
            }),
        ));
        slide
    }

    #[test]
    fn narrated_slides_follow_their_timing() {
        let slide = narrated_slide("s", 10);
        let segment = SlideSegment::for_slide(&slide);
        assert_eq!(segment.seconds, 11);
        assert_eq!(
            segment.narration.as_deref(),
            Some(Path::new("voices/Amy/speech1.mp3"))
        );
        let args = segment_args(
            Path::new("s.png"),
            &segment,
            VideoSettings::from_preset((720, 40)),
            Path::new("s.wmv"),
        );
        assert!(args.contains(&OsString::from("[1:a]adelay=1000|1000,apad[a]")));
    }

    #[test]
    fn narration_starts_line_up_with_caption_cues() {
        let slides: Vec<Page> = (0..3).map(|i| narrated_slide(&format!("s{i}"), 10)).collect();
        let mut start = 0;
        let mut narration_starts = Vec::new();
        for slide in &slides {
            narration_starts.push(start + NARRATION_DELAY_MS / 1000);
            start += SlideSegment::for_slide(slide).seconds;
        }
        assert_eq!(narration_starts, vec![1, 12, 23]);

        let transcript = vec!["One.".to_string(), "Two.".to_string(), "Three.".to_string()];
        let cue_starts: Vec<String> = make_captions(&transcript, &[10, 10, 10])
            .iter()
            .filter_map(|line| line.split_once(" --> ").map(|(from, _)| from.to_string()))
            .collect();
        let expected: Vec<String> = narration_starts
            .iter()
            .map(|s| crate::captions::as_time(*s as u32))
            .collect();
        assert_eq!(cue_starts, expected);
    }

    #[test]
    fn concat_list_quotes_names() {
        let list = concat_list(&[PathBuf::from("/tmp/x/segment_0001.wmv")]);
        assert_eq!(list, "file 'segment_0001.wmv'\n");
        assert_eq!(
            parts_dir(Path::new("build/deck-Amy.wmv")),
            PathBuf::from("build/deck-Amy.wmv.parts")
        );
    }
}
