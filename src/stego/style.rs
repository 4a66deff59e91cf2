// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Style channel: one bit per eligible sentence.
//!
//! A sentence is eligible when it has at least [`MIN_WORDS`] words. Bit 1
//! ends it in `!` (or keeps an existing `?`) and may lead it with an adverb;
//! bit 0 ends it in `.` and removes every recognized adverb. A marker
//! sentence is prepended once so the decoder knows where to start reading.

use log::debug;

use crate::stego::channel::{Channel, ChannelKind};
use crate::stego::config::StyleConfig;
use crate::stego::error::StegoError;
use crate::stego::filler::{self, Filler};
use crate::stego::frame::{self, LENGTH_PREFIX_BITS};
use crate::text::hidden::find_visible;
use crate::text::lexicon::{self, contains};
use crate::text::segment::{
    lexical_spans, lexical_words, normalize_word, sentence_spans, terminal_mark,
    terminator_range, word_count,
};

/// Marker sentence flagging the presence of this channel.
pub const STYLE_MARKER: &str = "Composed with deliberate care.";

/// Sentences with fewer words are skipped and carry no bit.
pub const MIN_WORDS: usize = 3;

/// Adverbs are only inserted into sentences at least this long.
const ADVERB_MIN_WORDS: usize = 6;

/// Sentences per appended elaboration paragraph.
const ELABORATION_PARAGRAPH: usize = 3;

/// Stand-in for an adverb that cannot be removed without dropping the
/// sentence below [`MIN_WORDS`].
const NEUTRAL_WORD: &str = "so";

/// Sentence-initial words that are safe to lowercase after a lead adverb.
const COMMON_LEADS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "there", "in", "on", "at", "for",
    "after", "before", "when", "each", "every", "some", "most", "many", "all", "one",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleChannel {
    config: StyleConfig,
}

impl StyleChannel {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }
}

#[inline]
fn is_eligible(sentence: &str) -> bool {
    word_count(sentence) >= MIN_WORDS
}

/// Number of eligible sentences in `text`.
pub fn eligible_sentences(text: &str) -> usize {
    sentence_spans(text)
        .into_iter()
        .filter(|r| is_eligible(&text[r.clone()]))
        .count()
}

/// Bit carried by an eligible sentence.
pub fn read_bit(sentence: &str) -> u8 {
    let marked = matches!(terminal_mark(sentence), Some('!' | '?'));
    let has_adverb = lexical_words(sentence)
        .iter()
        .any(|w| contains(lexicon::STYLE_ADVERBS, w));
    u8::from(marked || has_adverb)
}

impl Channel for StyleChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Style
    }

    fn encode_bits(&self, text: &str, bits: &[u8]) -> Result<String, StegoError> {
        // Re-encoding keeps the existing marker and rewrites what follows it.
        let (prefix, body) = match find_visible(text, STYLE_MARKER) {
            Some(marker) => (text[..marker.end].to_string(), &text[marker.end..]),
            None => (format!("{STYLE_MARKER} "), text),
        };

        let mut filler = Filler::for_text(text, b"style");
        let available = eligible_sentences(body);
        let mut body = body.to_string();
        if available < bits.len() {
            if !self.config.elaborate {
                return Err(StegoError::InsufficientSentences {
                    needed: bits.len(),
                    available,
                });
            }
            let extra: Vec<&str> = (available..bits.len())
                .map(|_| filler.pick(filler::ELABORATION))
                .collect();
            debug!("style: elaborating with {} sentences", extra.len());
            let trimmed = body.trim_end().len();
            body.truncate(trimmed);
            if !body.is_empty() {
                body.push_str("\n\n");
            }
            let paragraphs: Vec<String> = extra
                .chunks(ELABORATION_PARAGRAPH)
                .map(|chunk| chunk.join(" "))
                .collect();
            body.push_str(&paragraphs.join("\n\n"));
        }

        let mut out = prefix;
        out.reserve(body.len() + bits.len() * 12);
        let mut cursor = 0;
        let mut next_bit = bits.iter();
        for span in sentence_spans(&body) {
            let sentence = &body[span.clone()];
            if !is_eligible(sentence) {
                continue;
            }
            let Some(&bit) = next_bit.next() else {
                break;
            };
            out.push_str(&body[cursor..span.start]);
            out.push_str(&rewrite_sentence(sentence, bit, &mut filler));
            cursor = span.end;
        }
        out.push_str(&body[cursor..]);

        debug!("style: embedded {} bits", bits.len());
        Ok(out)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, StegoError> {
        let marker = find_visible(text, STYLE_MARKER)
            .ok_or(StegoError::MarkerNotFound(ChannelKind::Style))?;
        let body = &text[marker.end..];

        let mut bits = Vec::new();
        let mut needed = LENGTH_PREFIX_BITS;
        for span in sentence_spans(body) {
            let sentence = &body[span];
            if !is_eligible(sentence) {
                continue;
            }
            bits.push(read_bit(sentence));
            if bits.len() == LENGTH_PREFIX_BITS {
                needed = frame::frame_len(&bits).unwrap_or(LENGTH_PREFIX_BITS);
            }
            if bits.len() >= needed {
                break;
            }
        }
        frame::from_bits(&bits)
    }
}

/// Rewrite one eligible sentence so that [`read_bit`] returns `bit`.
pub fn rewrite_sentence(sentence: &str, bit: u8, filler: &mut Filler) -> String {
    if bit & 1 == 1 {
        mark_sentence(sentence, filler)
    } else {
        plain_sentence(sentence)
    }
}

fn mark_sentence(sentence: &str, filler: &mut Filler) -> String {
    let mut s = sentence.to_string();
    let range = terminator_range(&s);
    if !s[range.clone()].ends_with('?') {
        s.replace_range(range, "!");
    }

    let has_adverb = lexical_words(&s)
        .iter()
        .any(|w| contains(lexicon::STYLE_ADVERBS, w));
    if !has_adverb && word_count(&s) >= ADVERB_MIN_WORDS && filler.chance() {
        let adverb = filler.pick(filler::LEAD_ADVERBS);
        lower_common_lead(&mut s);
        s.insert_str(0, &format!("{adverb}, "));
    }
    s
}

fn plain_sentence(sentence: &str) -> String {
    let mut tokens = Tokens::split(sentence);
    let mut i = 0;
    while i < tokens.words.len() {
        let token = &tokens.words[i];
        let spans = lexical_spans(token);
        let adverbs: Vec<_> = spans
            .iter()
            .filter(|r| contains(lexicon::STYLE_ADVERBS, &normalize_word(&token[(*r).clone()])))
            .cloned()
            .collect();
        if adverbs.is_empty() {
            i += 1;
            continue;
        }

        let core = adverbs[0].clone();
        let suffix_movable = i > 0
            || token[core.end..]
                .chars()
                .all(|c| matches!(c, ',' | ';' | ':'));
        if spans.len() == 1 && suffix_movable && tokens.word_count() > MIN_WORDS {
            tokens.remove(i, core);
            continue;
        }

        let mut rewritten = token.clone();
        for r in adverbs.iter().rev() {
            let capital = rewritten[r.clone()].starts_with(char::is_uppercase);
            rewritten.replace_range(r.clone(), if capital { "So" } else { NEUTRAL_WORD });
        }
        tokens.words[i] = rewritten;
        i += 1;
    }

    let mut s = tokens.join();
    let range = terminator_range(&s);
    if range.is_empty() || s[range.clone()].contains(&['!', '?'][..]) {
        s.replace_range(range, ".");
    }
    s
}

/// Lowercase the first word if it is a common function word.
fn lower_common_lead(s: &mut String) {
    let Some(first) = lexical_spans(s).into_iter().next() else {
        return;
    };
    if !contains(COMMON_LEADS, &normalize_word(&s[first.clone()])) {
        return;
    }
    let lowered: String = s[first.clone()].to_lowercase();
    s.replace_range(first, &lowered);
}

fn capitalize_first(token: &mut String) {
    if let Some((at, c)) = token.char_indices().find(|(_, c)| c.is_alphabetic()) {
        let upper: String = c.to_uppercase().collect();
        token.replace_range(at..at + c.len_utf8(), &upper);
    }
}

/// Whitespace tokens with the exact whitespace between them, so a sentence
/// can be edited word by word and reassembled byte for byte.
struct Tokens {
    /// `gaps.len() == words.len() + 1`; `gaps[i]` precedes `words[i]`.
    gaps: Vec<String>,
    words: Vec<String>,
}

impl Tokens {
    fn split(s: &str) -> Self {
        let mut gaps = vec![String::new()];
        let mut words: Vec<String> = Vec::new();
        let mut in_word = false;
        for c in s.chars() {
            if c.is_whitespace() {
                if in_word {
                    gaps.push(String::new());
                    in_word = false;
                }
                if let Some(gap) = gaps.last_mut() {
                    gap.push(c);
                }
            } else {
                if !in_word {
                    words.push(String::new());
                    in_word = true;
                }
                if let Some(word) = words.last_mut() {
                    word.push(c);
                }
            }
        }
        if in_word {
            gaps.push(String::new());
        }
        Self { gaps, words }
    }

    fn word_count(&self) -> usize {
        self.words
            .iter()
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .count()
    }

    /// Remove word `i` whose lexical core is `core`. Leading characters
    /// move to the next word, trailing punctuation to the previous one.
    fn remove(&mut self, i: usize, core: std::ops::Range<usize>) {
        let token = self.words.remove(i);
        let prefix = &token[..core.start];
        let suffix = &token[core.end..];
        let capital = token[core].starts_with(char::is_uppercase);

        if i < self.words.len() {
            self.gaps.remove(i + 1);
            self.words[i].insert_str(0, prefix);
            if i == 0 && capital {
                capitalize_first(&mut self.words[0]);
            }
        } else {
            self.gaps.remove(i);
            self.words[i - 1].push_str(prefix);
        }
        if i > 0 {
            self.words[i - 1].push_str(suffix);
        }
    }

    fn join(&self) -> String {
        let mut out = self.gaps[0].clone();
        for (word, gap) in self.words.iter().zip(&self.gaps[1..]) {
            out.push_str(word);
            out.push_str(gap);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segment::sentences;

    fn filler() -> Filler {
        Filler::for_text("test", b"style")
    }

    fn cover(n: usize) -> String {
        (0..n)
            .map(|i| match i % 4 {
                0 => format!("Sentence number {i} is really here."),
                1 => format!("Does line {i} ask a question?"),
                2 => format!("Line {i} moved quickly, then stopped!"),
                _ => format!("The plain line {i} rests."),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn bit_zero_removes_adverbs_and_marks() {
        assert_eq!(plain_sentence("He ran quickly, then stopped!"), "He ran, then stopped.");
        assert_eq!(plain_sentence("Clearly, the plan works now?"), "The plan works now.");
        assert_eq!(plain_sentence("He really ran quickly."), "He ran so.");
        assert_eq!(plain_sentence("No end here at all"), "No end here at all.");
    }

    #[test]
    fn bit_zero_keeps_three_words() {
        assert_eq!(plain_sentence("It really works!"), "It so works.");
        assert_eq!(read_bit(&plain_sentence("It really works!")), 0);
    }

    #[test]
    fn bit_zero_moves_hidden_prefix_forward() {
        let s = "We \u{200D}\u{200C}quickly went home today.";
        let out = plain_sentence(s);
        assert_eq!(out, "We \u{200D}\u{200C}went home today.");
    }

    #[test]
    fn bit_one_marks_and_keeps_questions() {
        let mut f = filler();
        assert!(mark_sentence("The plan works.", &mut f).ends_with('!'));
        assert_eq!(mark_sentence("Is it fine?", &mut f), "Is it fine?");
        assert!(mark_sentence("No end here", &mut f).ends_with("here!"));
    }

    #[test]
    fn lead_adverb_lowercases_common_words() {
        let mut s = "The long road wound across the hills.".to_string();
        lower_common_lead(&mut s);
        assert!(s.starts_with("the long"));
        let mut t = "London sat under a grey sky today.".to_string();
        lower_common_lead(&mut t);
        assert!(t.starts_with("London"));
    }

    #[test]
    fn rewritten_sentences_read_back() {
        let mut f = filler();
        for s in sentences(&cover(24)) {
            assert_eq!(read_bit(&rewrite_sentence(s, 0, &mut f)), 0, "{s}");
            assert_eq!(read_bit(&rewrite_sentence(s, 1, &mut f)), 1, "{s}");
        }
    }

    #[test]
    fn roundtrip_without_elaboration() {
        let text = cover(40);
        let channel = StyleChannel::default();
        let encoded = channel.encode(&text, b"Z").unwrap();
        assert!(encoded.starts_with(STYLE_MARKER));
        assert_eq!(channel.decode(&encoded).unwrap(), b"Z");
    }

    #[test]
    fn short_sentences_are_skipped_verbatim() {
        let text = (0..30)
            .map(|i| format!("Line {i} moves quickly onward! Yes. No way."))
            .collect::<Vec<_>>()
            .join(" ");
        let channel = StyleChannel::default();
        let encoded = channel.encode(&text, b"A").unwrap();
        assert_eq!(encoded.matches(" Yes. No way.").count(), 30);
        assert_eq!(channel.decode(&encoded).unwrap(), b"A");
    }

    #[test]
    fn insufficient_sentences() {
        match StyleChannel::default().encode(&cover(10), b"hi") {
            Err(StegoError::InsufficientSentences { needed, available }) => {
                assert_eq!(needed, 32);
                assert_eq!(available, 10);
            }
            other => panic!("expected InsufficientSentences, got {other:?}"),
        }
    }

    #[test]
    fn elaboration_fills_missing_capacity() {
        let channel = StyleChannel::new(StyleConfig { elaborate: true });
        let encoded = channel.encode(&cover(10), b"hi").unwrap();
        assert!(eligible_sentences(&encoded) > 32);
        assert_eq!(channel.decode(&encoded).unwrap(), b"hi");
    }

    #[test]
    fn decode_stops_at_declared_length() {
        let channel = StyleChannel::default();
        let mut encoded = channel.encode(&cover(40), b"Q").unwrap();
        encoded.push_str(" Wild extra words appear here! Another odd line follows today?");
        assert_eq!(channel.decode(&encoded).unwrap(), b"Q");
    }

    #[test]
    fn missing_marker() {
        assert!(matches!(
            StyleChannel::default().decode(&cover(40)),
            Err(StegoError::MarkerNotFound(ChannelKind::Style))
        ));
    }

    #[test]
    fn reencode_keeps_single_marker() {
        let channel = StyleChannel::default();
        let first = channel.encode(&cover(40), b"a").unwrap();
        let second = channel.encode(&first, b"b").unwrap();
        assert_eq!(second.matches(STYLE_MARKER).count(), 1);
        assert_eq!(channel.decode(&second).unwrap(), b"b");
    }
}
