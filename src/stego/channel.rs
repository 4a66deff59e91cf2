// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! The channel abstraction shared by the three carriers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::stego::error::StegoError;
use crate::stego::frame;

/// Identifies one of the three carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Zero-width code points. Highest capacity, lowest resilience.
    Invisible,
    /// Sentence endings and adverbs.
    Style,
    /// Paragraph lengths and narrative features. Lowest capacity, highest
    /// resilience.
    Structure,
}

impl ChannelKind {
    /// Order in which channels are applied on encode. Each channel sees the
    /// output of the previous one.
    pub const ENCODE_ORDER: [ChannelKind; 3] =
        [ChannelKind::Invisible, ChannelKind::Style, ChannelKind::Structure];

    /// Order in which channels are tried on decode (most resilient first).
    pub const RESILIENCE_ORDER: [ChannelKind; 3] =
        [ChannelKind::Structure, ChannelKind::Style, ChannelKind::Invisible];
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invisible => write!(f, "invisible"),
            Self::Style => write!(f, "style"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// A reversible mapping of a bit string onto text.
///
/// Implementations are pure: the output depends only on the input text, the
/// bits and the channel's own configuration, and `decode` depends only on
/// the text it is given.
pub trait Channel {
    fn kind(&self) -> ChannelKind;

    /// Embed a length-prefixed bit string (as produced by
    /// [`frame::to_bits`]) into `text`.
    fn encode_bits(&self, text: &str, bits: &[u8]) -> Result<String, StegoError>;

    /// Recover the payload bytes carried by `text`.
    fn decode(&self, text: &str) -> Result<Vec<u8>, StegoError>;

    /// Frame `payload` and embed it into `text`.
    fn encode(&self, text: &str, payload: &[u8]) -> Result<String, StegoError> {
        let bits = frame::to_bits(payload)?;
        self.encode_bits(text, &bits)
    }
}
