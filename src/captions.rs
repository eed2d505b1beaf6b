//! WebVTT captions from the narration transcript.

/// Seconds between a slide appearing and its narration starting.
pub const SLIDE_DELAY: u32 = 1;
pub const MAX_LINE_LENGTH: usize = 80;
pub const MIN_LINE_LENGTH: usize = 40;
/// How far either side of a split point to look for a space.
const SPACE_SEARCH_EXTENT: usize = 5;

/// Builds the caption file as a list of lines, starting with the `WEBVTT` header.
///
/// Each transcript span is spread over its slide's duration in proportion to
/// sentence length. The last sentence of a span absorbs the slide delay.
pub fn make_captions(transcript: &[String], durations: &[u32]) -> Vec<String> {
    let mut lines = vec!["WEBVTT\n".to_string()];
    let mut current_time = SLIDE_DELAY;

    for (text, &duration) in transcript.iter().zip(durations) {
        let text = text.replace('\n', " ");
        let sentences = split_sentences(&text, MAX_LINE_LENGTH, MIN_LINE_LENGTH);
        let total_length: usize = sentences.iter().map(|s| s.chars().count()).sum();

        if total_length > 0 {
            let mut sentence_durations: Vec<u32> = sentences
                .iter()
                .map(|s| {
                    let share = s.chars().count() as f64 / total_length as f64;
                    (f64::from(duration) * share).round_ties_even() as u32
                })
                .collect();
            if let Some(last) = sentence_durations.last_mut() {
                *last += SLIDE_DELAY;
            }

            let mut offset = current_time;
            for (sentence, seconds) in sentences.iter().zip(sentence_durations) {
                lines.push(format!("{} --> {}", as_time(offset), as_time(offset + seconds)));
                lines.push(format!("{}\n", sentence.trim()));
                offset += seconds;
            }
        } else {
            log::debug!("Skipping captions for an empty narration span");
        }
        current_time += duration + SLIDE_DELAY;
    }
    lines
}

/// `MM:SS.000`
pub fn as_time(seconds: u32) -> String {
    format!("{:02}:{:02}.000", seconds / 60, seconds % 60)
}

/// Splits `text` into sentences, then breaks sentences longer than
/// `max_line_length` characters. When the piece left after a break would be
/// shorter than `min_line_length`, the sentence is halved at the space nearest
/// its middle instead.
pub fn split_sentences(text: &str, max_line_length: usize, min_line_length: usize) -> Vec<String> {
    let mut out = Vec::new();
    for sentence in sentences(text) {
        let mut pieces: Vec<Vec<char>> = vec![sentence.chars().collect()];
        while pieces.last().is_some_and(|p| p.len() > max_line_length) {
            let Some(current) = pieces.pop() else { break };
            let mut split_at = max_line_length;
            if current.len() - max_line_length < min_line_length {
                split_at = find_nearest_space(&current, current.len() / 2, SPACE_SEARCH_EXTENT);
            }
            if split_at == 0 || split_at >= current.len() {
                pieces.push(current);
                break;
            }
            let (first, rest) = current.split_at(split_at);
            pieces.push(first.to_vec());
            pieces.push(rest.to_vec());
        }
        out.extend(pieces.into_iter().map(|p| p.into_iter().collect::<String>()));
    }
    out
}

/// Sentences end at `.`, `!` or `?` followed by whitespace. Each is trimmed.
fn sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in chars.iter().enumerate() {
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.get(i + 1).is_some_and(|next| next.is_whitespace());
        if at_boundary {
            push_trimmed(&mut out, &chars[start..=i]);
            start = i + 1;
        }
    }
    push_trimmed(&mut out, &chars[start..]);
    out
}

fn push_trimmed(out: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

/// Index of the space closest to `index`, looking at most `extent - 1`
/// characters either way. Falls back to `index`.
fn find_nearest_space(text: &[char], index: usize, extent: usize) -> usize {
    for offset in 0..extent {
        if text.get(index + offset) == Some(&' ') {
            return index + offset;
        }
        if index >= offset && text.get(index - offset) == Some(&' ') {
            return index - offset;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_transcript_timing() {
        let transcript = vec![
            "This is a test of the sentence splitter. It should split this sentence into two."
                .to_string(),
            "However are you doing today, this will be a very long sentence indeed, twice as long in fact."
                .to_string(),
        ];
        let captions = make_captions(&transcript, &[5, 10]);
        assert_eq!(
            captions,
            vec![
                "WEBVTT\n",
                "00:01.000 --> 00:04.000",
                "This is a test of the sentence splitter.\n",
                "00:04.000 --> 00:07.000",
                "It should split this sentence into two.\n",
                "00:07.000 --> 00:12.000",
                "However are you doing today, this will be a very\n",
                "00:12.000 --> 00:18.000",
                "long sentence indeed, twice as long in fact.\n",
            ]
        );
    }

    #[test]
    fn newlines_become_spaces() {
        let captions = make_captions(&["Two\nlines".to_string()], &[3]);
        assert_eq!(captions[1], "00:01.000 --> 00:05.000");
        assert_eq!(captions[2], "Two lines\n");
    }

    #[test]
    fn long_sentences_split_at_the_limit() {
        let sentence = "word ".repeat(40);
        let pieces = split_sentences(sentence.trim(), MAX_LINE_LENGTH, MIN_LINE_LENGTH);
        assert!(pieces.len() >= 2);
        assert_eq!(pieces[0].chars().count(), MAX_LINE_LENGTH);
    }

    #[test]
    fn times_roll_over_minutes() {
        assert_eq!(as_time(0), "00:00.000");
        assert_eq!(as_time(75), "01:15.000");
    }

    #[test]
    fn empty_spans_still_advance_time() {
        let captions = make_captions(&[String::new(), "Hi.".to_string()], &[4, 2]);
        assert_eq!(captions[1], "00:06.000 --> 00:09.000");
    }
}
