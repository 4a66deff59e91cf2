// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Multi-channel encode/decode orchestration.
//!
//! Encoding applies the enabled channels in [`ChannelKind::ENCODE_ORDER`],
//! each to the output of the previous one. Decoding tries every enabled
//! channel, ranks the successes by [`ChannelKind::RESILIENCE_ORDER`] and
//! checks that they agree:
//!
//! - redundant mode: every candidate must be byte-identical;
//! - partitioned mode: every candidate must be a metadata record with the
//!   same `id`.

use log::{debug, info, warn};

use crate::signing::{SignedPackage, Signer, Verifier};
use crate::stego::channel::{Channel, ChannelKind};
use crate::stego::config::{CodecConfig, IntegrityMode};
use crate::stego::error::StegoError;
use crate::stego::invisible::InvisibleChannel;
use crate::stego::payload::{decode_metadata, encode_metadata, Metadata};
use crate::stego::structure::StructureChannel;
use crate::stego::style::StyleChannel;
use crate::text::hidden::visible_len;

/// Result of an encode: the final text and what happened per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    pub text: String,
    /// Channels that embedded the payload, in application order.
    pub applied: Vec<ChannelKind>,
    /// Enabled channels skipped because the text was below the structure
    /// channel's minimum content length.
    pub skipped: Vec<ChannelKind>,
}

/// A payload recovered by one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub channel: ChannelKind,
    pub payload: Vec<u8>,
    /// The decoded record, in partitioned mode.
    pub metadata: Option<Metadata>,
}

/// Result of a best-effort or verified decode.
#[derive(Debug)]
pub struct ExtractionOutcome {
    /// Channel of the primary (most resilient successful) candidate.
    pub source: ChannelKind,
    /// Payload of the primary candidate.
    pub payload: Vec<u8>,
    /// Whether the candidates agree under the configured integrity mode.
    pub integrity: bool,
    /// Every successful candidate, most resilient first.
    pub candidates: Vec<Candidate>,
    /// Enabled channels that failed, with the reason.
    pub failures: Vec<(ChannelKind, StegoError)>,
    /// Identity that signed the package, for verified decodes.
    pub signer: Option<String>,
}

impl ExtractionOutcome {
    /// The primary candidate's metadata record (partitioned mode).
    pub fn metadata(&self) -> Option<&Metadata> {
        self.candidates.first().and_then(|c| c.metadata.as_ref())
    }

    /// Union of every partition agreeing with the primary `id`, most
    /// resilient channel first.
    pub fn merged_metadata(&self) -> Option<Metadata> {
        let mut merged = self.metadata()?.clone();
        for record in self.candidates[1..].iter().filter_map(|c| c.metadata.as_ref()) {
            if record.id == merged.id {
                merged.merge(record);
            }
        }
        Some(merged)
    }
}

fn channel_for(kind: ChannelKind, config: &CodecConfig) -> Box<dyn Channel> {
    match kind {
        ChannelKind::Invisible => Box::new(InvisibleChannel::new()),
        ChannelKind::Style => Box::new(StyleChannel::new(config.style_config())),
        ChannelKind::Structure => Box::new(StructureChannel::new(config.structure_config())),
    }
}

/// Encode `payload` into `cover` with every enabled channel.
///
/// In redundant mode (the default) each channel carries `payload` verbatim.
/// With `redundant_encoding` off, `payload` must be a JSON [`Metadata`]
/// record and is split with [`encode_partitioned`].
///
/// # Errors
/// The first channel error aborts the encode. A cover below
/// `min_content_length` only skips the structure channel.
pub fn encode(cover: &str, payload: &[u8], config: &CodecConfig) -> Result<EncodeReport, StegoError> {
    if !config.redundant_encoding {
        let metadata: Metadata = serde_json::from_slice(payload)?;
        return encode_partitioned(cover, &metadata, config);
    }
    encode_with(cover, config, |_| Ok(payload.to_vec()))
}

/// Encode a metadata record, each channel carrying its partition.
pub fn encode_partitioned(
    cover: &str,
    metadata: &Metadata,
    config: &CodecConfig,
) -> Result<EncodeReport, StegoError> {
    encode_with(cover, config, |kind| encode_metadata(&metadata.partition(kind)))
}

fn encode_with(
    cover: &str,
    config: &CodecConfig,
    mut payload_for: impl FnMut(ChannelKind) -> Result<Vec<u8>, StegoError>,
) -> Result<EncodeReport, StegoError> {
    let mut text = cover.to_string();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for kind in ChannelKind::ENCODE_ORDER {
        if !config.uses(kind) {
            continue;
        }
        if kind == ChannelKind::Structure {
            let length = visible_len(&text);
            if length < config.min_content_length {
                warn!(
                    "skipping {kind} channel: {length} characters, {} required",
                    config.min_content_length
                );
                skipped.push(kind);
                continue;
            }
        }

        let payload = payload_for(kind)?;
        text = channel_for(kind, config).encode(&text, &payload)?;
        debug!("{kind} channel embedded {} bytes", payload.len());
        applied.push(kind);
    }

    Ok(EncodeReport {
        text,
        applied,
        skipped,
    })
}

/// Encode and sign. Signing failure aborts and returns no package.
pub fn seal(
    cover: &str,
    payload: &[u8],
    config: &CodecConfig,
    signer: &impl Signer,
    identity: &str,
) -> Result<SignedPackage, StegoError> {
    let report = encode(cover, payload, config)?;
    let signature = signer.sign(identity, &report.text)?;
    info!(
        "sealed document for {identity} via {:?} ({} characters)",
        report.applied,
        report.text.len()
    );
    Ok(SignedPackage {
        content: report.text,
        signature,
        signer: identity.to_string(),
    })
}

/// Verify the package signature, then decode its content.
///
/// # Errors
/// [`StegoError::SignatureInvalid`] without trying any channel when no
/// known key verifies the signature.
pub fn decode_verified(
    package: &SignedPackage,
    verifier: &impl Verifier,
    config: &CodecConfig,
) -> Result<ExtractionOutcome, StegoError> {
    let signer = package
        .verify_with(verifier)
        .ok_or(StegoError::SignatureInvalid)?;
    let mut outcome = decode(&package.content, config)?;
    outcome.signer = Some(signer);
    Ok(outcome)
}

/// Best-effort decode: no signature involved.
///
/// # Errors
/// [`StegoError::NoChannelSucceeded`] if every enabled channel fails.
pub fn decode(text: &str, config: &CodecConfig) -> Result<ExtractionOutcome, StegoError> {
    let mut candidates = Vec::new();
    let mut failures = Vec::new();

    for (kind, result) in attempt_all(text, config) {
        let candidate = result.and_then(|payload| {
            let metadata = if config.redundant_encoding {
                None
            } else {
                Some(decode_metadata(&payload)?)
            };
            Ok(Candidate {
                channel: kind,
                payload,
                metadata,
            })
        });
        match candidate {
            Ok(c) => {
                debug!("{kind} channel recovered {} bytes", c.payload.len());
                candidates.push(c);
            }
            Err(e) => {
                debug!("{kind} channel failed: {e}");
                failures.push((kind, e));
            }
        }
    }

    let primary = candidates.first().ok_or(StegoError::NoChannelSucceeded)?;
    let agree = candidates[1..].iter().all(|c| match (&primary.metadata, &c.metadata) {
        (Some(a), Some(b)) => a.id == b.id,
        _ => c.payload == primary.payload,
    });
    let integrity = agree
        && match config.integrity {
            IntegrityMode::Permissive => true,
            IntegrityMode::Strict => candidates.len() >= 2,
        };
    let source = primary.channel;
    let payload = primary.payload.clone();

    Ok(ExtractionOutcome {
        source,
        payload,
        integrity,
        candidates,
        failures,
        signer: None,
    })
}

fn attempt(kind: ChannelKind, text: &str, config: &CodecConfig) -> Option<Result<Vec<u8>, StegoError>> {
    config
        .uses(kind)
        .then(|| channel_for(kind, config).decode(text))
}

/// Every enabled channel's decode result, in resilience order.
#[cfg(not(feature = "parallel"))]
fn attempt_all(text: &str, config: &CodecConfig) -> Vec<(ChannelKind, Result<Vec<u8>, StegoError>)> {
    ChannelKind::RESILIENCE_ORDER
        .into_iter()
        .filter_map(|kind| attempt(kind, text, config).map(|r| (kind, r)))
        .collect()
}

/// Parallel variant: the three decoders run concurrently via rayon; the
/// results are still ranked in resilience order.
#[cfg(feature = "parallel")]
fn attempt_all(text: &str, config: &CodecConfig) -> Vec<(ChannelKind, Result<Vec<u8>, StegoError>)> {
    let (structure, (style, invisible)) = rayon::join(
        || attempt(ChannelKind::Structure, text, config),
        || {
            rayon::join(
                || attempt(ChannelKind::Style, text, config),
                || attempt(ChannelKind::Invisible, text, config),
            )
        },
    );
    ChannelKind::RESILIENCE_ORDER
        .into_iter()
        .zip([structure, style, invisible])
        .filter_map(|(kind, r)| r.map(|r| (kind, r)))
        .collect()
}
