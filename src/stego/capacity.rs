// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Per-channel capacity estimation.
//!
//! Estimates how many payload bits each channel can carry in a given cover
//! without elaboration. The length prefix is already accounted for.

use crate::stego::channel::ChannelKind;
use crate::stego::config::CodecConfig;
use crate::stego::frame::{LENGTH_PREFIX_BITS, MAX_PAYLOAD_BITS};
use crate::stego::structure::layout::PREFIX_UNITS;
use crate::stego::style::eligible_sentences;
use crate::text::hidden::visible_len;
use crate::text::segment::segment_units;

/// Payload bits per channel. Disabled channels report 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelCapacity {
    pub invisible: usize,
    pub style: usize,
    pub structure: usize,
}

impl ChannelCapacity {
    pub fn bits(&self, kind: ChannelKind) -> usize {
        match kind {
            ChannelKind::Invisible => self.invisible,
            ChannelKind::Style => self.style,
            ChannelKind::Structure => self.structure,
        }
    }

    /// Whole payload bytes `kind` can carry.
    pub fn bytes(&self, kind: ChannelKind) -> usize {
        self.bits(kind) / 8
    }

    /// Bytes every enabled channel can carry, i.e. the largest payload that
    /// fits redundant mode without elaboration.
    pub fn redundant_bytes(&self, config: &CodecConfig) -> usize {
        ChannelKind::ENCODE_ORDER
            .iter()
            .filter(|&&kind| config.uses(kind))
            .map(|&kind| self.bytes(kind))
            .min()
            .unwrap_or(0)
    }
}

/// Estimate the payload capacity of `text` for each enabled channel.
pub fn estimate_capacity(text: &str, config: &CodecConfig) -> ChannelCapacity {
    let invisible = if config.use_invisible {
        MAX_PAYLOAD_BITS
    } else {
        0
    };

    let style = if config.use_style {
        eligible_sentences(text)
            .saturating_sub(LENGTH_PREFIX_BITS)
            .min(MAX_PAYLOAD_BITS)
    } else {
        0
    };

    let structure = if config.use_structure && visible_len(text) >= config.min_content_length {
        segment_units(text)
            .len()
            .saturating_sub(PREFIX_UNITS)
            .min(config.max_encodable_bits.saturating_sub(LENGTH_PREFIX_BITS))
    } else {
        0
    };

    ChannelCapacity {
        invisible,
        style,
        structure,
    }
}
