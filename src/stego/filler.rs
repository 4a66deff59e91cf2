// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Deterministic filler text.
//!
//! Filler is inserted where a channel needs room (padding, closings,
//! synthesized units). Decoders only read the *class* of a filler phrase
//! (its word count, its final punctuation, its indicator words), never which
//! phrase was picked, so the choice is cosmetic. It is still seeded from a
//! CRC-32 of the cover text so that encoding is reproducible.
//!
//! Picks use `u32` ranges so the sequence is identical on 32- and 64-bit
//! targets.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Neutral sentences of at least three words: no pronouns, no recognized
/// adverbs, no emphasis lead, ending in a period.
pub const ELABORATION: &[&str] = &[
    "The account continues along the same line.",
    "Further detail follows from the points above.",
    "The same pattern holds across the remaining material.",
    "Each section builds on the previous one.",
    "The discussion moves on to related matters.",
    "Several related points deserve attention here.",
    "The broader context remains relevant throughout.",
    "This part adds supporting detail to the record.",
];

/// Two-word neutral sentences used to lengthen a unit.
pub const PADDING: &[&str] = &["Quite so.", "Even so.", "Just so.", "More so.", "And so."];

/// Two-word question closings (rhetorical close = question).
pub const QUESTION_CLOSINGS: &[&str] = &["Why not?", "Who knows?", "What else?", "How so?"];

/// Short emphatic closings (rhetorical close = emphasis).
pub const EMPHASIS_CLOSINGS: &[&str] = &["Absolutely!", "Without doubt!", "Quite right!", "Of course!"];

/// Two-word past-tense phrases.
pub const PAST_PHRASES: &[&str] = &["Long ago.", "It was.", "Years ago."];

/// Two-word future-tense phrases.
pub const FUTURE_PHRASES: &[&str] = &["Soon enough.", "It will.", "Tomorrow, perhaps."];

/// Sentence-initial adverbs for the style channel (all recognized adverbs).
pub const LEAD_ADVERBS: &[&str] = &["Clearly", "Honestly", "Naturally", "Frankly", "Certainly", "Remarkably"];

pub struct Filler {
    rng: ChaCha20Rng,
}

impl Filler {
    /// Seed from the cover text and a per-channel domain tag so channels draw
    /// independent sequences from the same document.
    pub fn for_text(text: &str, domain: &[u8]) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(domain);
        hasher.update(text.as_bytes());
        Self {
            rng: ChaCha20Rng::seed_from_u64(hasher.finalize() as u64),
        }
    }

    pub fn pick(&mut self, table: &'static [&'static str]) -> &'static str {
        table[self.rng.gen_range(0..table.len() as u32) as usize]
    }

    /// Fair coin.
    pub fn chance(&mut self) -> bool {
        self.rng.gen_range(0..2u32) == 0
    }

    /// A synthesized content unit of two elaboration sentences.
    pub fn unit(&mut self) -> String {
        let first = self.rng.gen_range(0..ELABORATION.len() as u32) as usize;
        let mut second = self.rng.gen_range(0..ELABORATION.len() as u32) as usize;
        if second == first {
            second = (first + 1) % ELABORATION.len();
        }
        format!("{} {}", ELABORATION[first], ELABORATION[second])
    }
}
