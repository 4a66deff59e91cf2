// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-text
//!
//! Pure-Rust steganography for natural-language text. A payload (usually a
//! provenance [`Metadata`] record) is hidden in a cover document through up
//! to three independent channels:
//!
//! - **Invisible**: zero-width code points, survives nothing but exact copy.
//! - **Style**: sentence punctuation and adverbs, survives hidden-character
//!   stripping.
//! - **Structure**: paragraph lengths and narrative features, survives
//!   reformatting.
//!
//! Decoding tries every channel and reports whether the recovered payloads
//! agree. Encoded documents can be signed with Ed25519 ([`signing`]) and
//! verified before extraction.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use phasm_text::{decode, encode, CodecConfig};
//!
//! let config = CodecConfig::default();
//! let report = encode(&cover, br#"{"id":"abc"}"#, &config).unwrap();
//! let outcome = decode(&report.text, &config).unwrap();
//! assert_eq!(outcome.payload, br#"{"id":"abc"}"#);
//! assert!(outcome.integrity);
//! ```

pub mod signing;
pub mod stego;
pub mod text;

pub use signing::{Keyring, SignedPackage, Signer, Verifier};
pub use stego::{decode, decode_verified, encode, encode_partitioned, seal};
pub use stego::{Candidate, EncodeReport, ExtractionOutcome, StegoError};
pub use stego::{Channel, ChannelKind, InvisibleChannel, StructureChannel, StyleChannel};
pub use stego::{CodecConfig, IntegrityMode, Strength, StructureConfig, StyleConfig};
pub use stego::{estimate_capacity, ChannelCapacity, Metadata};
