// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Heuristic narrative-feature classification of a content unit.
//!
//! [`ContentAnalyzer::analyze`] is a pure function of the unit text: it
//! counts lexical indicators per axis and resolves each axis with a single
//! dominance rule. The structure channel runs the same analysis when it
//! chooses which feature to adjust and when it reads a bit back, so the rule
//! here is the contract between encoder and decoder.

use std::collections::HashSet;

use super::lexicon::{self, contains};
use super::segment::{lexical_words, sentences, terminal_mark};

/// Calibration constants for the analyzer.
///
/// These are heuristic and have no derivation beyond "works on prose";
/// encoder and decoder must use identical values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerThresholds {
    /// A class dominates when its count is at least this multiple of the
    /// combined count of the other classes.
    pub dominance_ratio: f64,
    /// Complexity below this value reads as bit 0 in the fallback tier.
    pub complexity_split: f64,
}

impl Default for AnalyzerThresholds {
    fn default() -> Self {
        Self {
            dominance_ratio: 2.0,
            complexity_split: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointOfView {
    First,
    Second,
    Third,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Past,
    Present,
    Future,
    Mixed,
}

/// How the unit's final sentence closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RhetoricalClose {
    Question,
    Emphasis,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialectic {
    Argumentative,
    Descriptive,
    Narrative,
    Mixed,
}

/// Per-unit classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentAnalysis {
    pub point_of_view: PointOfView,
    pub tense: Tense,
    pub rhetorical_close: RhetoricalClose,
    pub dialectic: Dialectic,
    /// Mean words per sentence × unique-word ratio × 10.
    pub complexity: f64,
}

/// Index of the class that dominates the others, if any.
///
/// A class dominates when its count is positive and at least `ratio` times
/// the sum of all other counts.
pub fn dominant(counts: &[usize], ratio: f64) -> Option<usize> {
    let total: usize = counts.iter().sum();
    counts.iter().position(|&count| {
        let others = (total - count) as f64;
        count > 0 && count as f64 >= ratio * others
    })
}

#[derive(Debug, Clone, Default)]
pub struct ContentAnalyzer {
    thresholds: AnalyzerThresholds,
}

impl ContentAnalyzer {
    pub fn new(thresholds: AnalyzerThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AnalyzerThresholds {
        &self.thresholds
    }

    pub fn analyze(&self, unit: &str) -> ContentAnalysis {
        let words = lexical_words(unit);
        let sentence_list = sentences(unit);
        let ratio = self.thresholds.dominance_ratio;

        let pov = count_classes(
            &words,
            &[lexicon::FIRST_PERSON, lexicon::SECOND_PERSON, lexicon::THIRD_PERSON],
        );
        let point_of_view = match dominant(&pov, ratio) {
            Some(0) => PointOfView::First,
            Some(1) => PointOfView::Second,
            Some(2) => PointOfView::Third,
            _ => PointOfView::Mixed,
        };

        let tense = match dominant(&tense_counts(&words), ratio) {
            Some(0) => Tense::Past,
            Some(1) => Tense::Present,
            Some(2) => Tense::Future,
            _ => Tense::Mixed,
        };

        let dialectic_counts = count_classes(
            &words,
            &[lexicon::ARGUMENTATIVE, lexicon::DESCRIPTIVE, lexicon::NARRATIVE],
        );
        let dialectic = match dominant(&dialectic_counts, ratio) {
            Some(0) => Dialectic::Argumentative,
            Some(1) => Dialectic::Descriptive,
            Some(2) => Dialectic::Narrative,
            _ => Dialectic::Mixed,
        };

        let rhetorical_close = sentence_list
            .last()
            .map_or(RhetoricalClose::Plain, |s| closing_of(s));

        let complexity = complexity(&words, sentence_list.len());

        ContentAnalysis {
            point_of_view,
            tense,
            rhetorical_close,
            dialectic,
            complexity,
        }
    }
}

fn count_classes<const N: usize>(words: &[String], tables: &[&[&str]; N]) -> [usize; N] {
    let mut counts = [0usize; N];
    for word in words {
        for (slot, table) in tables.iter().enumerate() {
            if contains(table, word) {
                counts[slot] += 1;
            }
        }
    }
    counts
}

fn tense_counts(words: &[String]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for word in words {
        if contains(lexicon::PAST_MARKERS, word)
            || (word.len() >= lexicon::PAST_SUFFIX_MIN_LEN && word.ends_with(lexicon::PAST_SUFFIX))
        {
            counts[0] += 1;
        } else if contains(lexicon::PRESENT_MARKERS, word) {
            counts[1] += 1;
        } else if contains(lexicon::FUTURE_MARKERS, word) || word.ends_with(lexicon::FUTURE_SUFFIX) {
            counts[2] += 1;
        }
    }
    counts
}

/// Classify how a single sentence closes.
pub fn closing_of(sentence: &str) -> RhetoricalClose {
    match terminal_mark(sentence) {
        Some('?') => RhetoricalClose::Question,
        Some('!') => RhetoricalClose::Emphasis,
        _ => {
            let leads_with_emphasis = lexical_words(sentence)
                .first()
                .is_some_and(|w| contains(lexicon::EMPHASIS_WORDS, w));
            if leads_with_emphasis {
                RhetoricalClose::Emphasis
            } else {
                RhetoricalClose::Plain
            }
        }
    }
}

fn complexity(words: &[String], sentence_count: usize) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let mean_words = words.len() as f64 / sentence_count.max(1) as f64;
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    let unique_ratio = unique.len() as f64 / words.len() as f64;
    mean_words * unique_ratio * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> ContentAnalysis {
        ContentAnalyzer::default().analyze(text)
    }

    #[test]
    fn dominance_rule() {
        assert_eq!(dominant(&[4, 1, 1], 2.0), Some(0));
        assert_eq!(dominant(&[3, 1, 1], 2.0), None);
        assert_eq!(dominant(&[0, 0, 2], 2.0), Some(2));
        assert_eq!(dominant(&[0, 0, 0], 2.0), None);
        assert_eq!(dominant(&[2, 2, 0], 2.0), None);
    }

    #[test]
    fn dominance_ratio_is_a_calibration_parameter() {
        // 3 vs 2: mixed at the default ratio, dominant at 1.5.
        assert_eq!(dominant(&[3, 2, 0], 2.0), None);
        assert_eq!(dominant(&[3, 2, 0], 1.5), Some(0));
    }

    #[test]
    fn point_of_view() {
        assert_eq!(analyze("I went home and my dog met me.").point_of_view, PointOfView::First);
        assert_eq!(analyze("They said their plan was his.").point_of_view, PointOfView::Third);
        assert_eq!(analyze("You and I, we and they.").point_of_view, PointOfView::Mixed);
        assert_eq!(analyze("The river runs.").point_of_view, PointOfView::Mixed);
    }

    #[test]
    fn tense() {
        assert_eq!(analyze("It was late and we walked home.").tense, Tense::Past);
        assert_eq!(analyze("It will rain soon.").tense, Tense::Future);
        assert_eq!(analyze("It is here now.").tense, Tense::Present);
        assert_eq!(analyze("It was here, it is here, it will be here.").tense, Tense::Mixed);
    }

    #[test]
    fn rhetorical_close() {
        assert_eq!(analyze("Plain. Is it?").rhetorical_close, RhetoricalClose::Question);
        assert_eq!(analyze("Plain. Wow!").rhetorical_close, RhetoricalClose::Emphasis);
        assert_eq!(analyze("Plain. Indeed it holds.").rhetorical_close, RhetoricalClose::Emphasis);
        assert_eq!(analyze("Is it? Plain.").rhetorical_close, RhetoricalClose::Plain);
    }

    #[test]
    fn dialectic() {
        assert_eq!(
            analyze("Because costs rise, prices must follow; therefore we wait.").dialectic,
            Dialectic::Argumentative
        );
        assert_eq!(
            analyze("Then the door opened. Suddenly the wind rose, and finally it stopped.").dialectic,
            Dialectic::Narrative
        );
    }

    #[test]
    fn complexity_formula() {
        // 4 words, 1 sentence, 4 unique: 4 × 1.0 × 10.
        let a = analyze("Alpha beta gamma delta.");
        assert!((a.complexity - 40.0).abs() < 1e-9);
        // 4 words, 2 sentences, 2 unique: 2 × 0.5 × 10.
        let b = analyze("Go went. Go went.");
        assert!((b.complexity - 10.0).abs() < 1e-9);
    }

    #[test]
    fn analysis_is_deterministic() {
        let text = "We walked along the shore because the tide was low. Then the light faded?";
        let analyzer = ContentAnalyzer::default();
        let first = analyzer.analyze(text);
        for _ in 0..10 {
            assert_eq!(analyzer.analyze(text), first);
        }
    }
}
