// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Per-call configuration for the channels and the orchestrator.

use crate::stego::channel::ChannelKind;
use crate::text::AnalyzerThresholds;

/// Default minimum cover length (visible characters) for the structure channel.
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 400;

/// Default cap on bits (prefix included) the structure channel will embed.
pub const DEFAULT_MAX_ENCODABLE_BITS: usize = 4096;

/// How aggressively the structure channel rewrites content units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strength {
    /// Only the rhetorical closing of a unit is adjusted.
    Subtle,
    /// Also adjusts point of view on units longer than 150 characters.
    #[default]
    Moderate,
    /// Also injects tense-indicator phrasing.
    Aggressive,
}

/// Whether a single successful channel counts as integrity-verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrityMode {
    /// One successful channel is enough; several must agree.
    #[default]
    Permissive,
    /// At least two channels must succeed and agree.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleConfig {
    /// Append neutral filler sentences when the cover has too few eligible
    /// sentences, instead of failing with `InsufficientSentences`.
    pub elaborate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureConfig {
    /// Covers shorter than this (visible characters) are rejected.
    pub min_content_length: usize,
    /// Largest bit string (prefix included) the channel accepts.
    pub max_encodable_bits: usize,
    /// Leave units alone whose features already read as the target bit.
    pub preserve_existing_structure: bool,
    pub strength: Strength,
    /// Synthesize extra units when the cover has too few, instead of failing
    /// with `InsufficientUnits`.
    pub elaborate: bool,
    pub thresholds: AnalyzerThresholds,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            max_encodable_bits: DEFAULT_MAX_ENCODABLE_BITS,
            preserve_existing_structure: true,
            strength: Strength::default(),
            elaborate: true,
            thresholds: AnalyzerThresholds::default(),
        }
    }
}

/// Configuration surface for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecConfig {
    pub use_invisible: bool,
    pub use_style: bool,
    pub use_structure: bool,
    pub structural_strength: Strength,
    /// `true`: every channel carries the full payload. `false`: each channel
    /// carries a partition of a metadata record linked by its `id`.
    pub redundant_encoding: bool,
    pub min_content_length: usize,
    pub max_encodable_bits: usize,
    pub preserve_existing_structure: bool,
    /// Let style and structure extend the cover with filler text when it
    /// lacks capacity.
    pub allow_elaboration: bool,
    pub integrity: IntegrityMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            use_invisible: true,
            use_style: true,
            use_structure: true,
            structural_strength: Strength::default(),
            redundant_encoding: true,
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            max_encodable_bits: DEFAULT_MAX_ENCODABLE_BITS,
            preserve_existing_structure: true,
            allow_elaboration: true,
            integrity: IntegrityMode::default(),
        }
    }
}

impl CodecConfig {
    pub fn style_config(&self) -> StyleConfig {
        StyleConfig {
            elaborate: self.allow_elaboration,
        }
    }

    pub fn structure_config(&self) -> StructureConfig {
        StructureConfig {
            min_content_length: self.min_content_length,
            max_encodable_bits: self.max_encodable_bits,
            preserve_existing_structure: self.preserve_existing_structure,
            strength: self.structural_strength,
            elaborate: self.allow_elaboration,
            thresholds: AnalyzerThresholds::default(),
        }
    }

    /// Whether `kind` is enabled.
    pub fn uses(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Invisible => self.use_invisible,
            ChannelKind::Style => self.use_style,
            ChannelKind::Structure => self.use_structure,
        }
    }
}
