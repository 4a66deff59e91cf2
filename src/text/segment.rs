// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Text segmentation: paragraphs, sentences, words and content units.
//!
//! All splitting is done on byte spans into the original string so that
//! callers can rewrite a span in place and keep every other byte intact.
//! Reserved invisible code points are never whitespace and never
//! alphanumeric, so they neither split nor count as words.

use std::ops::Range;

use super::hidden::{is_hidden, visible_len};

/// Minimum number of blank-line paragraphs before paragraphs are used as
/// content units directly.
pub const MIN_PARAGRAPH_UNITS: usize = 5;

/// Sentences per synthesized unit when re-segmenting.
pub const UNIT_SENTENCES: usize = 3;

/// Visible characters after which a synthesized unit is closed early.
pub const UNIT_CHARS: usize = 200;

/// Characters that may trail a sentence terminator.
const CLOSERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '\u{BB}'];

#[inline]
pub fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

#[inline]
fn is_closer(c: char) -> bool {
    CLOSERS.contains(&c)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '\'' || c == '\u{2019}'
}

/// Byte spans of blank-line separated paragraphs, trimmed of surrounding
/// whitespace.
pub fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut current: Option<Range<usize>> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            if let Some(span) = current.take() {
                spans.push(span);
            }
            continue;
        }

        let lead = line.len() - line.trim_start().len();
        let content_end = line_start + line.trim_end().len();
        match current.as_mut() {
            Some(span) => span.end = content_end,
            None => current = Some(line_start + lead..content_end),
        }
    }
    if let Some(span) = current {
        spans.push(span);
    }
    spans
}

/// Blank-line separated paragraphs.
pub fn paragraphs(text: &str) -> Vec<&str> {
    paragraph_spans(text).into_iter().map(|r| &text[r]).collect()
}

/// Byte spans of sentences. Paragraph boundaries always end a sentence.
///
/// A sentence ends after a run of `.`, `!` or `?` (plus any closing quotes,
/// brackets or reserved code points) that is followed by whitespace or the
/// end of the paragraph.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for para in paragraph_spans(text) {
        sentences_in(text, para, &mut spans);
    }
    spans
}

fn sentences_in(text: &str, para: Range<usize>, out: &mut Vec<Range<usize>>) {
    let body = &text[para.clone()];
    let chars: Vec<(usize, char)> = body.char_indices().collect();
    let mut start: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        let Some(sentence_start) = start else {
            if !c.is_whitespace() {
                start = Some(pos);
            } else {
                i += 1;
            }
            continue;
        };

        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        while j < chars.len() && (is_closer(chars[j].1) || is_hidden(chars[j].1)) {
            j += 1;
        }
        if j == chars.len() || chars[j].1.is_whitespace() {
            let end = chars.get(j).map_or(body.len(), |&(p, _)| p);
            out.push(para.start + sentence_start..para.start + end);
            start = None;
        }
        i = j;
    }

    if let Some(sentence_start) = start {
        out.push(para.start + sentence_start..para.start + body.trim_end().len());
    }
}

/// Sentences as string slices.
pub fn sentences(text: &str) -> Vec<&str> {
    sentence_spans(text).into_iter().map(|r| &text[r]).collect()
}

/// Number of whitespace-separated tokens that contain an alphanumeric
/// character.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .count()
}

/// Byte offsets where each whitespace-separated token starts.
pub fn token_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev_ws = true;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if prev_ws && !ws {
            starts.push(i);
        }
        prev_ws = ws;
    }
    starts
}

/// Byte spans of lexical words: runs of letters and apostrophes, with
/// leading and trailing apostrophes trimmed.
pub fn lexical_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut run_start: Option<usize> = None;

    let push = |spans: &mut Vec<Range<usize>>, start: usize, end: usize| {
        let run = &text[start..end];
        let apostrophe = |c: char| c == '\'' || c == '\u{2019}';
        let lead = run.len() - run.trim_start_matches(apostrophe).len();
        let core = run.trim_matches(apostrophe);
        if !core.is_empty() {
            spans.push(start + lead..start + lead + core.len());
        }
    };

    for (i, c) in text.char_indices() {
        match (is_word_char(c), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                push(&mut spans, start, i);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        push(&mut spans, start, text.len());
    }
    spans
}

/// Lowercase a lexical word and fold typographic apostrophes.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .map(|c| if c == '\u{2019}' { '\'' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized lexical words of `text`.
pub fn lexical_words(text: &str) -> Vec<String> {
    lexical_spans(text)
        .into_iter()
        .map(|r| normalize_word(&text[r]))
        .collect()
}

/// Byte range of the sentence-final terminator run, ignoring trailing
/// whitespace, closers and reserved code points.
///
/// For an unterminated sentence the range is empty and sits where a
/// terminator would be inserted.
pub fn terminator_range(sentence: &str) -> Range<usize> {
    let trimmed = sentence.trim_end();
    let mut end = trimmed.len();
    for (i, c) in trimmed.char_indices().rev() {
        if is_closer(c) || is_hidden(c) {
            end = i;
        } else {
            break;
        }
    }
    let mut start = end;
    for (i, c) in trimmed[..end].char_indices().rev() {
        if is_terminator(c) {
            start = i;
        } else {
            break;
        }
    }
    start..end
}

/// The last terminator character of a sentence, if any.
pub fn terminal_mark(sentence: &str) -> Option<char> {
    sentence[terminator_range(sentence)].chars().last()
}

/// Append a period if the text does not end in a sentence terminator, so
/// that anything appended afterwards starts a new sentence.
pub fn ensure_terminated(text: &mut String) {
    let range = terminator_range(text);
    if range.is_empty() {
        text.insert(range.start, '.');
    }
}

/// Split text into content units.
///
/// Blank-line paragraphs are used directly when there are at least
/// [`MIN_PARAGRAPH_UNITS`] of them. Otherwise sentences are regrouped into
/// units of [`UNIT_SENTENCES`] sentences, closing a unit early once it
/// reaches [`UNIT_CHARS`] visible characters. Regrouped sentences are
/// terminated so that joining them never merges two sentences.
pub fn segment_units(text: &str) -> Vec<String> {
    let paras = paragraphs(text);
    if paras.len() >= MIN_PARAGRAPH_UNITS {
        return paras.into_iter().map(str::to_string).collect();
    }

    let mut units = Vec::new();
    let mut group: Vec<String> = Vec::new();
    let mut group_len = 0;
    for sentence in sentences(text) {
        let mut sentence = sentence.to_string();
        ensure_terminated(&mut sentence);
        group_len += visible_len(&sentence);
        group.push(sentence);
        if group.len() >= UNIT_SENTENCES || group_len >= UNIT_CHARS {
            units.push(group.join(" "));
            group.clear();
            group_len = 0;
        }
    }
    if !group.is_empty() {
        units.push(group.join(" "));
    }
    units
}
