// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Text steganography channels and the multi-channel pipeline.
//!
//! Three independent channels carry the same framed payload:
//!
//! - **Invisible** ([`InvisibleChannel`]): zero-width code points inserted
//!   mid-text. Highest capacity, lost on any Unicode normalization that
//!   strips them.
//! - **Style** ([`StyleChannel`]): one bit per eligible sentence, carried
//!   by terminal punctuation and stylistic adverbs.
//! - **Structure** ([`StructureChannel`]): paragraph length patterns and
//!   narrative features. Lowest capacity, survives copy/paste and
//!   reformatting.
//!
//! All channels share the length-prefixed bit frame in [`frame`]. The
//! `encode` / `decode` functions run every enabled channel and cross-check
//! what they recover.

pub mod error;
pub mod frame;
pub mod channel;
pub mod config;
pub mod filler;
pub mod invisible;
pub mod style;
pub mod structure;
pub mod payload;
pub mod capacity;
mod pipeline;

pub use error::StegoError;
pub use channel::{Channel, ChannelKind};
pub use config::{CodecConfig, IntegrityMode, Strength, StructureConfig, StyleConfig};
pub use invisible::InvisibleChannel;
pub use style::StyleChannel;
pub use structure::StructureChannel;
pub use payload::{decode_metadata, encode_metadata, Metadata};
pub use capacity::{estimate_capacity, ChannelCapacity};
pub use pipeline::{
    decode, decode_verified, encode, encode_partitioned, seal, Candidate, EncodeReport,
    ExtractionOutcome,
};
