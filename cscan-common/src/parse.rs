//! Text-line reconstruction core
//!
//! Turns noisy recognizer output into structured contact records. The
//! pipeline is: filter low-confidence/irrelevant fragments, split each
//! surviving line into a fixed-width date prefix and a free-text remainder,
//! then split the remainder into name/channel/note by locating a channel
//! label from an ordered vocabulary.
//!
//! Everything in this module is pure and synchronous. A line that cannot be
//! structured is dropped from the output; nothing here returns an error or
//! panics on malformed input. All position arithmetic counts Unicode scalar
//! values (chars), not bytes, because the input is predominantly CJK text.

use serde::{Deserialize, Serialize};

/// Fragments scoring below this are discarded by [`filter_fragments`]
/// unless the caller overrides the threshold.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.2;

/// Number of leading characters treated as the date token.
///
/// Fixed-width by contract: the segmenter does not scan for a digit/non-digit
/// boundary and does not validate that the prefix is a well-formed date.
pub const DEFAULT_DATE_PREFIX_CHARS: usize = 8;

/// One recognized text span with its confidence score, as produced by the
/// external recognizer capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    pub text: String,
    /// Recognizer confidence in [0, 1].
    pub confidence: f32,
}

/// A structured contact reconstructed from one accepted line.
///
/// `channel` is always a verbatim, case-sensitive member of the vocabulary
/// that produced the record, and `display_name + channel + note` reproduces
/// the post-date remainder of the source line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub date: String,
    pub display_name: String,
    pub channel: String,
    pub note: String,
}

/// Borrowed three-way split of a remainder around a channel label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSplit<'a> {
    pub display_name: &'a str,
    pub channel: &'a str,
    pub note: &'a str,
}

/// Filter raw recognizer fragments down to candidate text lines.
///
/// Rules, applied in order:
/// 1. drop fragments with `confidence < confidence_threshold`
/// 2. drop fragments with empty text
/// 3. drop fragments whose first character is not an ASCII decimal digit
///
/// The filter is stable: surviving lines keep their input order.
pub fn filter_fragments(fragments: &[RawFragment], confidence_threshold: f32) -> Vec<String> {
    fragments
        .iter()
        .filter(|f| f.confidence >= confidence_threshold)
        .filter(|f| f.text.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(|f| f.text.clone())
        .collect()
}

/// Split a line into a fixed-width date prefix and the remainder.
///
/// The prefix is the first `min(date_prefix_chars, char count)` characters;
/// lines shorter than the prefix width yield an empty remainder, which the
/// channel splitter then rejects for lacking a match. No date validation is
/// performed; malformed or truncated dates pass through uncorrected.
pub fn split_date_prefix(line: &str, date_prefix_chars: usize) -> (&str, &str) {
    match line.char_indices().nth(date_prefix_chars) {
        Some((idx, _)) => line.split_at(idx),
        None => (line, ""),
    }
}

/// Split a remainder into name/channel/note around the first vocabulary
/// label that occurs in it exactly once.
///
/// The vocabulary is scanned in order and the first label found in the
/// remainder wins, so vocabulary ordering is a user-controlled priority.
/// A label occurring zero times is skipped; a label occurring two or more
/// times is ambiguous and is also skipped, advancing to the next candidate.
/// Returns `None` when no label cleanly splits the remainder ("no channel
/// match") — that is rejection, not an error.
///
/// A label is accepted anywhere in the remainder, including inside what a
/// human would read as part of the display name.
pub fn split_on_channel<'a>(remainder: &'a str, vocabulary: &[String]) -> Option<ChannelSplit<'a>> {
    for label in vocabulary.iter().filter(|l| !l.is_empty()) {
        let mut occurrences = remainder.match_indices(label.as_str());
        let Some((start, matched)) = occurrences.next() else {
            continue;
        };
        if occurrences.next().is_some() {
            // ambiguous: label occurs more than once
            continue;
        }
        return Some(ChannelSplit {
            display_name: &remainder[..start],
            channel: matched,
            note: &remainder[start + matched.len()..],
        });
    }
    None
}

/// Parse one line into a contact record, or `None` if no vocabulary label
/// cleanly splits its remainder.
pub fn parse_line(
    line: &str,
    vocabulary: &[String],
    date_prefix_chars: usize,
) -> Option<ContactRecord> {
    let (date, remainder) = split_date_prefix(line, date_prefix_chars);
    let split = split_on_channel(remainder, vocabulary)?;
    Some(ContactRecord {
        date: date.to_string(),
        display_name: split.display_name.to_string(),
        channel: split.channel.to_string(),
        note: split.note.to_string(),
    })
}

/// Parse a batch of filtered lines into contact records.
///
/// This is the sole entry point surrounding components should call. Lines
/// are processed independently and results concatenated in input order; a
/// line with no channel match is dropped and never aborts the batch. With
/// an empty vocabulary every line is dropped and the result is empty.
pub fn parse_batch(
    lines: &[String],
    vocabulary: &[String],
    date_prefix_chars: usize,
) -> Vec<ContactRecord> {
    lines
        .iter()
        .filter_map(|line| parse_line(line, vocabulary, date_prefix_chars))
        .collect()
}
