// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Lexical indicator tables.
//!
//! Every table holds normalized (lowercase, straight-apostrophe) words.
//! The analyzer counts these; the channels only ever insert or substitute
//! words drawn from the same tables, which is what makes decoding agree
//! with encoding.

pub const FIRST_PERSON: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves",
];

pub const SECOND_PERSON: &[&str] = &["you", "your", "yours", "yourself", "yourselves"];

pub const THIRD_PERSON: &[&str] = &[
    "he", "him", "his", "himself", "she", "her", "hers", "herself", "they", "them", "their",
    "theirs", "themselves",
];

pub const PAST_MARKERS: &[&str] = &[
    "was", "were", "had", "did", "been", "ago", "yesterday", "previously", "formerly",
];

pub const PRESENT_MARKERS: &[&str] = &[
    "is", "are", "am", "does", "do", "has", "have", "now", "today", "currently",
];

pub const FUTURE_MARKERS: &[&str] = &[
    "will", "shall", "won't", "going", "tomorrow", "soon", "upcoming", "eventually",
];

/// Regular past-tense suffix; only counted on words of at least this length.
pub const PAST_SUFFIX: &str = "ed";
pub const PAST_SUFFIX_MIN_LEN: usize = 5;

/// Contracted future auxiliary (`they'll`, `it'll`).
pub const FUTURE_SUFFIX: &str = "'ll";

pub const EMPHASIS_WORDS: &[&str] = &[
    "indeed", "truly", "certainly", "absolutely", "undoubtedly", "definitely", "surely",
];

pub const ARGUMENTATIVE: &[&str] = &[
    "because", "therefore", "however", "thus", "hence", "although", "consequently",
    "moreover", "furthermore", "but", "since", "should", "must",
];

pub const DESCRIPTIVE: &[&str] = &[
    "appears", "looks", "seems", "resembles", "like", "bright", "dark", "colour", "color",
    "shape", "tall", "wide", "soft", "smooth",
];

pub const NARRATIVE: &[&str] = &[
    "then", "after", "before", "when", "suddenly", "finally", "later", "meanwhile", "next",
    "once", "afterwards",
];

/// Adverbs recognized by the style channel.
pub const STYLE_ADVERBS: &[&str] = &[
    "quickly", "clearly", "really", "truly", "certainly", "definitely", "simply", "actually",
    "naturally", "obviously", "surely", "carefully", "quietly", "rapidly", "honestly",
    "frankly", "genuinely", "remarkably",
];

#[inline]
pub fn contains(table: &[&str], word: &str) -> bool {
    table.contains(&word)
}

/// Substitute pronoun forms, indexed by grammatical slot.
///
/// Each row maps a normalized pronoun to its first-, second- and
/// third-person counterpart.
const PRONOUN_FORMS: &[(&str, [&str; 3])] = &[
    ("i", ["we", "you", "they"]),
    ("me", ["us", "you", "them"]),
    ("my", ["our", "your", "their"]),
    ("mine", ["ours", "yours", "theirs"]),
    ("myself", ["ourselves", "yourselves", "themselves"]),
    ("we", ["we", "you", "they"]),
    ("us", ["us", "you", "them"]),
    ("our", ["our", "your", "their"]),
    ("ours", ["ours", "yours", "theirs"]),
    ("ourselves", ["ourselves", "yourselves", "themselves"]),
    ("you", ["we", "you", "they"]),
    ("your", ["our", "your", "their"]),
    ("yours", ["ours", "yours", "theirs"]),
    ("yourself", ["ourselves", "yourself", "themselves"]),
    ("yourselves", ["ourselves", "yourselves", "themselves"]),
    ("he", ["we", "you", "they"]),
    ("him", ["us", "you", "them"]),
    ("his", ["our", "your", "their"]),
    ("himself", ["ourselves", "yourself", "themselves"]),
    ("she", ["we", "you", "they"]),
    ("her", ["us", "you", "them"]),
    ("hers", ["ours", "yours", "theirs"]),
    ("herself", ["ourselves", "yourself", "themselves"]),
    ("they", ["we", "you", "they"]),
    ("them", ["us", "you", "them"]),
    ("their", ["our", "your", "their"]),
    ("theirs", ["ours", "yours", "theirs"]),
    ("themselves", ["ourselves", "yourselves", "themselves"]),
];

/// Person slot used by [`pronoun_form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    First = 0,
    Second = 1,
    Third = 2,
}

/// The `person` counterpart of a normalized pronoun, or `None` if `word` is
/// not a pronoun.
pub fn pronoun_form(word: &str, person: Person) -> Option<&'static str> {
    PRONOUN_FORMS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, forms)| forms[person as usize])
}
