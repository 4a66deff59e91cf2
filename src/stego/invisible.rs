// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Invisible channel: the bit string as a run of zero-width code points.
//!
//! ```text
//! [ZWJ ×3] [ZWSP | ZWNJ per bit] [ZWJ ×3]
//! ```
//!
//! The run is inserted at the start of the middle whitespace token, so the
//! visible text is unchanged. Any reserved code points already present are
//! removed first; a document carries at most one frame.

use crate::stego::channel::{Channel, ChannelKind};
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::text::hidden::{strip_hidden, ZW_FRAME, ZW_ONE, ZW_ZERO};
use crate::text::segment::token_starts;

/// Number of frame code points that open and close a frame.
pub const FRAME_REPEAT: usize = 3;

const FRAME_MARKER: &str = "\u{200D}\u{200D}\u{200D}";

#[derive(Debug, Clone, Copy, Default)]
pub struct InvisibleChannel;

impl InvisibleChannel {
    pub fn new() -> Self {
        Self
    }
}

/// Byte offset where the frame goes: start of token `⌊n / 2⌋`, or the end
/// of the text when it has no tokens.
fn insertion_offset(text: &str) -> usize {
    let starts = token_starts(text);
    starts.get(starts.len() / 2).copied().unwrap_or(text.len())
}

impl Channel for InvisibleChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Invisible
    }

    fn encode_bits(&self, text: &str, bits: &[u8]) -> Result<String, StegoError> {
        let clean = strip_hidden(text);
        let offset = insertion_offset(&clean);

        let run_len = (2 * FRAME_REPEAT + bits.len()) * ZW_FRAME.len_utf8();
        let mut out = String::with_capacity(clean.len() + run_len);
        out.push_str(&clean[..offset]);
        out.push_str(FRAME_MARKER);
        out.extend(bits.iter().map(|&b| if b & 1 == 1 { ZW_ONE } else { ZW_ZERO }));
        out.push_str(FRAME_MARKER);
        out.push_str(&clean[offset..]);
        Ok(out)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, StegoError> {
        let start = text
            .find(FRAME_MARKER)
            .ok_or(StegoError::MarkerNotFound(ChannelKind::Invisible))?;
        let body_start = start + FRAME_MARKER.len();
        let body_len = text[body_start..]
            .find(FRAME_MARKER)
            .ok_or(StegoError::MarkerNotFound(ChannelKind::Invisible))?;

        let bits: Vec<u8> = text[body_start..body_start + body_len]
            .chars()
            .filter_map(|c| match c {
                ZW_ZERO => Some(0),
                ZW_ONE => Some(1),
                _ => None,
            })
            .collect();
        frame::from_bits(&bits)
    }
}
