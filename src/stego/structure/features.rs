// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Narrative features carrying one payload bit per content unit.
//!
//! Encoder and decoder share [`PRECEDENCE`]: the first feature that reads
//! decisively on a unit decides its bit. The encoder only ever makes the
//! first decisive feature agree with the target, by rewriting pronouns or by
//! appending a closing sentence, so reading the unit back walks the same
//! table to the same feature.

use crate::stego::config::{Strength, StructureConfig};
use crate::stego::filler::{self, Filler};
use crate::text::analysis::{
    ContentAnalysis, ContentAnalyzer, Dialectic, PointOfView, RhetoricalClose, Tense,
};
use crate::text::hidden::{is_hidden, visible_len};
use crate::text::lexicon::{pronoun_form, Person};
use crate::text::segment::{ensure_terminated, is_terminator, lexical_spans, normalize_word};
use crate::text::AnalyzerThresholds;

/// Units longer than this (visible characters) get point-of-view
/// adjustment at moderate strength and above.
pub const POV_MIN_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    PointOfView,
    RhetoricalClose,
    Tense,
    Dialectic,
    Complexity,
}

/// Order in which features are consulted.
pub const PRECEDENCE: [Feature; 5] = [
    Feature::PointOfView,
    Feature::RhetoricalClose,
    Feature::Tense,
    Feature::Dialectic,
    Feature::Complexity,
];

impl Feature {
    /// The bit this feature reads on `analysis`, or `None` if it is not
    /// decisive. [`Feature::Complexity`] is always decisive.
    pub fn bit(self, analysis: &ContentAnalysis, thresholds: &AnalyzerThresholds) -> Option<u8> {
        match self {
            Feature::PointOfView => match analysis.point_of_view {
                PointOfView::First => Some(0),
                PointOfView::Third => Some(1),
                _ => None,
            },
            Feature::RhetoricalClose => match analysis.rhetorical_close {
                RhetoricalClose::Question => Some(0),
                RhetoricalClose::Emphasis => Some(1),
                RhetoricalClose::Plain => None,
            },
            Feature::Tense => match analysis.tense {
                Tense::Past => Some(0),
                Tense::Future => Some(1),
                _ => None,
            },
            Feature::Dialectic => match analysis.dialectic {
                Dialectic::Narrative => Some(0),
                Dialectic::Argumentative => Some(1),
                _ => None,
            },
            Feature::Complexity => Some(u8::from(analysis.complexity >= thresholds.complexity_split)),
        }
    }
}

/// The first decisive feature and the bit it reads.
pub fn deciding(analysis: &ContentAnalysis, thresholds: &AnalyzerThresholds) -> (Feature, u8) {
    PRECEDENCE
        .iter()
        .find_map(|&f| f.bit(analysis, thresholds).map(|bit| (f, bit)))
        .unwrap_or((Feature::Complexity, 0))
}

/// Bit carried by a content unit.
pub fn read_unit(unit: &str, analyzer: &ContentAnalyzer) -> u8 {
    deciding(&analyzer.analyze(unit), analyzer.thresholds()).1
}

fn target_person(bit: u8) -> Person {
    if bit & 1 == 0 {
        Person::First
    } else {
        Person::Third
    }
}

/// Rewrite `unit` in place so that [`read_unit`] returns `bit`.
pub fn encode_unit(
    unit: &mut String,
    bit: u8,
    config: &StructureConfig,
    analyzer: &ContentAnalyzer,
    filler: &mut Filler,
) {
    let bit = bit & 1;
    let thresholds = analyzer.thresholds();
    let analysis = analyzer.analyze(unit);
    if config.preserve_existing_structure && deciding(&analysis, thresholds).1 == bit {
        return;
    }

    ensure_terminated(unit);

    let pov = Feature::PointOfView.bit(&analysis, thresholds);
    let long_unit = visible_len(unit) > POV_MIN_CHARS;
    let adjust_pov = match pov {
        Some(current) => current != bit,
        None => config.strength != Strength::Subtle && long_unit,
    };
    if adjust_pov {
        rewrite_point_of_view(unit, target_person(bit));
    }

    let settled = Feature::PointOfView.bit(&analyzer.analyze(unit), thresholds) == Some(bit);
    if settled && config.preserve_existing_structure {
        return;
    }

    if config.strength == Strength::Aggressive && !settled {
        let phrases = if bit == 0 {
            filler::PAST_PHRASES
        } else {
            filler::FUTURE_PHRASES
        };
        unit.push(' ');
        unit.push_str(filler.pick(phrases));
    }

    let closings = if bit == 0 {
        filler::QUESTION_CLOSINGS
    } else {
        filler::EMPHASIS_CLOSINGS
    };
    unit.push(' ');
    unit.push_str(filler.pick(closings));
}

/// Substitute every personal pronoun with its `person` form, word for word.
pub fn rewrite_point_of_view(unit: &mut String, person: Person) {
    for span in lexical_spans(unit).into_iter().rev() {
        let word = &unit[span.clone()];
        let Some(form) = pronoun_form(&normalize_word(word), person) else {
            continue;
        };
        let cased = match_case(word, form, at_sentence_start(unit, span.start));
        unit.replace_range(span, &cased);
    }
}

fn match_case(original: &str, form: &str, sentence_start: bool) -> String {
    let all_caps = original.chars().count() > 1 && !original.chars().any(char::is_lowercase);
    if all_caps {
        return form.to_uppercase();
    }
    let capitalized = original.starts_with(char::is_uppercase);
    // "I" is capitalized everywhere; its substitutes only at a sentence start.
    if capitalized && (original != "I" || sentence_start) {
        let mut chars = form.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    form.to_string()
}

fn at_sentence_start(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .rev()
        .find(|&c| {
            !(c.is_whitespace()
                || is_hidden(c)
                || matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}'))
        })
        .map_or(true, is_terminator)
}
