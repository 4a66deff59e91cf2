// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the text codec.
//!
//! [`StegoError`] covers every failure from bit framing through channel
//! encode/decode, orchestration and signature handling. Signature failures
//! are kept distinct from extraction failures so callers can tell
//! untrusted content from unreadable content.

use thiserror::Error;

use crate::stego::channel::ChannelKind;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The payload needs more bits than the 16-bit length prefix can declare,
    /// or more than the channel is configured to carry.
    #[error("payload too large: {bits} bits exceeds the limit of {limit}")]
    PayloadTooLarge { bits: usize, limit: usize },

    /// The cover text is shorter than the configured minimum.
    #[error("content too short: {length} characters, at least {minimum} required")]
    ContentTooShort { length: usize, minimum: usize },

    /// Not enough eligible sentences for the style channel.
    #[error("insufficient sentences: {needed} needed, {available} available")]
    InsufficientSentences { needed: usize, available: usize },

    /// Not enough content units for the structure channel.
    #[error("insufficient content units: {needed} needed, {available} available")]
    InsufficientUnits { needed: usize, available: usize },

    /// The channel's in-band marker is absent.
    #[error("{0} channel marker not found")]
    MarkerNotFound(ChannelKind),

    /// The length prefix declares more bits than the text carries.
    #[error("truncated data: {declared} payload bits declared, {available} available")]
    TruncatedData { declared: usize, available: usize },

    /// No private key is available for the requested signing identity.
    #[error("no signing key available for identity {0:?}")]
    SignatureUnavailable(String),

    /// The signature does not verify against any known public key.
    #[error("signature invalid or signer unknown")]
    SignatureInvalid,

    /// Every enabled channel failed to decode.
    #[error("no channel could recover a payload")]
    NoChannelSucceeded,

    /// The recovered bytes are not a valid metadata envelope.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<serde_json::Error> for StegoError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidPayload(e.to_string())
    }
}
