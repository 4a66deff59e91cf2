// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Metadata records and their byte envelope.
//!
//! A [`Metadata`] record is serialized as compact JSON and wrapped in a
//! one-byte envelope:
//!
//! ```text
//! [1 byte ] flags
//! [M bytes] JSON (raw or Brotli-compressed depending on flags)
//! ```
//!
//! In partitioned mode each channel carries a subset of the record, all
//! sharing the same `id`.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::stego::channel::ChannelKind;
use crate::stego::error::StegoError;

/// Compression algorithm flags (bits 0-1 of flags byte).
const COMPRESS_NONE: u8 = 0b00;
const COMPRESS_BROTLI: u8 = 0b01;
const COMPRESS_MASK: u8 = 0b11;

/// Brotli compression quality (0-11). Records are tiny, so max quality is cheap.
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Upper bound on a decompressed record.
const MAX_DECOMPRESSED: u64 = 128 * 1024;

/// Provenance metadata carried through the channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Identifier shared by every partition of the same record.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub claims: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// The subset of the record carried by `kind` in partitioned mode.
    ///
    /// Structure (lowest capacity) carries only the id, Style adds author
    /// and creation time, Invisible carries everything.
    pub fn partition(&self, kind: ChannelKind) -> Metadata {
        match kind {
            ChannelKind::Structure => Metadata::new(self.id.clone()),
            ChannelKind::Style => Metadata {
                id: self.id.clone(),
                author: self.author.clone(),
                created: self.created.clone(),
                ..Metadata::default()
            },
            ChannelKind::Invisible => self.clone(),
        }
    }

    /// Fill fields missing from `self` with those of `other`. Existing
    /// values win; claims are unioned.
    pub fn merge(&mut self, other: &Metadata) {
        if self.author.is_none() {
            self.author = other.author.clone();
        }
        if self.created.is_none() {
            self.created = other.created.clone();
        }
        if self.source.is_none() {
            self.source = other.source.clone();
        }
        for (key, value) in &other.claims {
            self.claims.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

/// Serialize a record into `[flags][json or brotli(json)]`.
pub fn encode_metadata(metadata: &Metadata) -> Result<Vec<u8>, StegoError> {
    let json = serde_json::to_vec(metadata)?;
    try_compress(&json)
}

/// Parse a record produced by [`encode_metadata`].
pub fn decode_metadata(data: &[u8]) -> Result<Metadata, StegoError> {
    let (&flags, body) = data
        .split_first()
        .ok_or_else(|| StegoError::InvalidPayload("empty envelope".into()))?;

    let json = match flags & COMPRESS_MASK {
        COMPRESS_NONE => body.to_vec(),
        COMPRESS_BROTLI => decompress_brotli(body)?,
        other => {
            return Err(StegoError::InvalidPayload(format!(
                "unknown compression flag {other:#04b}"
            )))
        }
    };
    Ok(serde_json::from_slice(&json)?)
}

/// Envelope size in bytes for `metadata`, as [`encode_metadata`] would
/// produce it.
pub fn encoded_size(metadata: &Metadata) -> Result<usize, StegoError> {
    encode_metadata(metadata).map(|v| v.len())
}

/// Try Brotli compression; return `[flags][data]` using whichever is smaller.
fn try_compress(inner: &[u8]) -> Result<Vec<u8>, StegoError> {
    let compressed = compress_brotli(inner)?;

    // Both paths include the 1-byte flags prefix.
    let (flags, body) = if compressed.len() < inner.len() {
        (COMPRESS_BROTLI, compressed.as_slice())
    } else {
        (COMPRESS_NONE, inner)
    };
    let mut result = Vec::with_capacity(1 + body.len());
    result.push(flags);
    result.extend_from_slice(body);
    Ok(result)
}

fn compress_brotli(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    {
        let mut compressor = brotli::CompressorWriter::new(
            &mut output,
            4096, // buffer size
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW_SIZE,
        );
        compressor
            .write_all(data)
            .map_err(|e| StegoError::InvalidPayload(e.to_string()))?;
        // CompressorWriter flushes on drop
    }
    Ok(output)
}

fn decompress_brotli(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut output = Vec::new();
    let decompressor = brotli::Decompressor::new(data, 4096);
    decompressor
        .take(MAX_DECOMPRESSED)
        .read_to_end(&mut output)
        .map_err(|_| StegoError::InvalidPayload("corrupt compressed record".into()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Metadata {
        Metadata::new("abc")
            .with_author("Ada")
            .with_created("2026-10-18T09:00:00Z")
            .with_source("newsroom")
            .with_claim("license", "CC-BY-4.0")
    }

    #[test]
    fn compact_json_skips_empty_fields() {
        let bytes = encode_metadata(&Metadata::new("abc")).unwrap();
        assert_eq!(bytes[0], COMPRESS_NONE);
        assert_eq!(&bytes[1..], br#"{"id":"abc"}"#);
        assert_eq!(decode_metadata(&bytes).unwrap(), Metadata::new("abc"));
    }

    #[test]
    fn repetitive_record_is_compressed() {
        let mut record = Metadata::new("abc");
        for i in 0..40 {
            record = record.with_claim(format!("claim-{i:02}"), "the same long repeated value");
        }
        let bytes = encode_metadata(&record).unwrap();
        assert_eq!(bytes[0], COMPRESS_BROTLI);
        assert!(bytes.len() < serde_json::to_vec(&record).unwrap().len());
        assert_eq!(decode_metadata(&bytes).unwrap(), record);
    }

    #[test]
    fn partitions_share_id_and_shrink() {
        let record = full();
        let structure = record.partition(ChannelKind::Structure);
        let style = record.partition(ChannelKind::Style);
        let invisible = record.partition(ChannelKind::Invisible);

        assert_eq!(structure, Metadata::new("abc"));
        assert_eq!(style.author.as_deref(), Some("Ada"));
        assert!(style.source.is_none() && style.claims.is_empty());
        assert_eq!(invisible, record);

        let sizes: Vec<usize> = [&structure, &style, &invisible]
            .iter()
            .map(|m| encoded_size(m).unwrap())
            .collect();
        assert!(sizes[0] < sizes[1] && sizes[1] < sizes[2]);
    }

    #[test]
    fn merge_fills_missing_fields() {
        let mut merged = full().partition(ChannelKind::Structure);
        merged.merge(&full().partition(ChannelKind::Style));
        assert_eq!(merged.author.as_deref(), Some("Ada"));
        assert!(merged.source.is_none());
        merged.merge(&full());
        assert_eq!(merged, full());
    }

    #[test]
    fn malformed_envelopes() {
        assert!(matches!(decode_metadata(&[]), Err(StegoError::InvalidPayload(_))));
        assert!(matches!(decode_metadata(&[0b10, b'{']), Err(StegoError::InvalidPayload(_))));
        assert!(matches!(decode_metadata(b"\x00not json"), Err(StegoError::InvalidPayload(_))));
        assert!(matches!(
            decode_metadata(&[COMPRESS_BROTLI, 0xFF, 0xFF, 0xFF]),
            Err(StegoError::InvalidPayload(_))
        ));
    }
}
