// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Structure channel: paragraph lengths and narrative features.
//!
//! The cover is split into content units (see
//! [`segment_units`](crate::text::segment::segment_units)). Bits are placed
//! in two tiers:
//!
//! 1. The 16 length-prefix bits go into the length pattern of sixteen
//!    groups of three units ([`layout`]).
//! 2. Payload bits go one per unit from unit 48 onward, carried by the
//!    unit's first decisive narrative feature ([`features`]).
//!
//! The output is the marker sentence followed by the units, one paragraph
//! each, so the decoder always sees exactly the units the encoder wrote.

pub mod features;
pub mod layout;

use log::debug;

use crate::stego::channel::{Channel, ChannelKind};
use crate::stego::config::StructureConfig;
use crate::stego::error::StegoError;
use crate::stego::filler::Filler;
use crate::stego::frame::{self, LENGTH_PREFIX_BITS};
use crate::text::analysis::ContentAnalyzer;
use crate::text::hidden::{find_visible, is_hidden, visible_len};
use crate::text::segment::{segment_units, MIN_PARAGRAPH_UNITS};

use layout::{GROUP_SIZE, PREFIX_UNITS};

/// Marker sentence flagging the presence of this channel.
pub const STRUCTURE_MARKER: &str = "Arranged in measured sections.";

const UNIT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Default)]
pub struct StructureChannel {
    config: StructureConfig,
    analyzer: ContentAnalyzer,
}

impl StructureChannel {
    pub fn new(config: StructureConfig) -> Self {
        Self {
            analyzer: ContentAnalyzer::new(config.thresholds),
            config,
        }
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }
}

/// Units needed to carry a bit string of `bit_len` bits.
pub fn units_needed(bit_len: usize) -> usize {
    PREFIX_UNITS + bit_len.saturating_sub(LENGTH_PREFIX_BITS)
}

/// Remove an existing marker sentence, keeping any reserved code points
/// that sat inside it.
fn without_marker(text: &str) -> String {
    match find_visible(text, STRUCTURE_MARKER) {
        Some(marker) => {
            let hidden: String = text[marker.clone()].chars().filter(|&c| is_hidden(c)).collect();
            format!("{}{hidden}{}", &text[..marker.start], &text[marker.end..])
        }
        None => text.to_string(),
    }
}

impl Channel for StructureChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Structure
    }

    fn encode_bits(&self, text: &str, bits: &[u8]) -> Result<String, StegoError> {
        let length = visible_len(text);
        if length < self.config.min_content_length {
            return Err(StegoError::ContentTooShort {
                length,
                minimum: self.config.min_content_length,
            });
        }
        if bits.len() > self.config.max_encodable_bits {
            return Err(StegoError::PayloadTooLarge {
                bits: bits.len(),
                limit: self.config.max_encodable_bits,
            });
        }

        let body = without_marker(text);
        let mut units = segment_units(&body);
        let needed = units_needed(bits.len());
        let mut filler = Filler::for_text(text, b"structure");
        if units.len() < needed {
            if !self.config.elaborate {
                return Err(StegoError::InsufficientUnits {
                    needed,
                    available: units.len(),
                });
            }
            debug!(
                "structure: elaborating {} units to {}",
                units.len(),
                needed
            );
            while units.len() < needed {
                units.push(filler.unit());
            }
        }

        let (prefix, payload) = bits.split_at(bits.len().min(LENGTH_PREFIX_BITS));
        for (group, &bit) in units.chunks_mut(GROUP_SIZE).zip(prefix) {
            layout::impose(group, bit, &mut filler);
        }
        for (unit, &bit) in units[PREFIX_UNITS..].iter_mut().zip(payload) {
            features::encode_unit(unit, bit, &self.config, &self.analyzer, &mut filler);
        }

        debug!(
            "structure: embedded {} bits across {} units",
            bits.len(),
            units.len()
        );
        let mut out = String::with_capacity(
            STRUCTURE_MARKER.len() + units.iter().map(|u| u.len() + 2).sum::<usize>() + 2,
        );
        out.push_str(STRUCTURE_MARKER);
        for unit in &units {
            out.push_str(UNIT_SEPARATOR);
            out.push_str(unit);
        }
        Ok(out)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, StegoError> {
        let marker = find_visible(text, STRUCTURE_MARKER)
            .ok_or(StegoError::MarkerNotFound(ChannelKind::Structure))?;
        let units = segment_units(&text[marker.end..]);
        if units.len() < MIN_PARAGRAPH_UNITS {
            return Err(StegoError::InsufficientUnits {
                needed: MIN_PARAGRAPH_UNITS,
                available: units.len(),
            });
        }

        let mut bits: Vec<u8> = units
            .chunks_exact(GROUP_SIZE)
            .take(LENGTH_PREFIX_BITS)
            .map(layout::read_group)
            .collect();
        let declared = frame::declared_len(&bits).unwrap_or(0);
        bits.extend(
            units
                .iter()
                .skip(PREFIX_UNITS)
                .take(declared)
                .map(|unit| features::read_unit(unit, &self.analyzer)),
        );
        frame::from_bits(&bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::config::Strength;
    use crate::text::hidden::strip_hidden;
    use crate::text::segment::paragraphs;

    fn document(paragraphs: usize) -> String {
        (0..paragraphs)
            .map(|i| match i % 3 {
                0 => format!(
                    "In section {i} the committee reviewed the budget because costs had risen. \
                     Members argued about priorities and finally agreed on a plan."
                ),
                1 => format!("Paragraph {i} is brief. It says little."),
                _ => format!(
                    "Then the visitors arrived at the station in part {i}, tired after the long \
                     journey, and walked slowly into town while the light faded over the hills."
                ),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn roundtrip_with_enough_units() {
        let text = document(80);
        let channel = StructureChannel::new(StructureConfig {
            elaborate: false,
            ..StructureConfig::default()
        });
        let encoded = channel.encode(&text, b"abc").unwrap();
        assert!(encoded.starts_with(STRUCTURE_MARKER));
        assert_eq!(channel.decode(&encoded).unwrap(), b"abc");
    }

    #[test]
    fn every_strength_roundtrips() {
        let text = document(90);
        for strength in [Strength::Subtle, Strength::Moderate, Strength::Aggressive] {
            let channel = StructureChannel::new(StructureConfig {
                strength,
                ..StructureConfig::default()
            });
            let encoded = channel.encode(&text, b"key=42").unwrap();
            assert_eq!(channel.decode(&encoded).unwrap(), b"key=42", "{strength:?}");
        }
    }

    #[test]
    fn original_content_survives_in_order() {
        let text = document(60);
        let encoded = StructureChannel::default().encode(&text, b"x").unwrap();
        let out = paragraphs(&encoded);
        assert_eq!(out[0], STRUCTURE_MARKER);
        assert!(out[1].starts_with("In section 0 the committee"));
        assert!(out[2].starts_with("Paragraph 1 is brief."));
    }

    #[test]
    fn content_length_boundary() {
        let config = StructureConfig {
            min_content_length: 400,
            ..StructureConfig::default()
        };
        let channel = StructureChannel::new(config);
        let base = document(6);
        let exact: String = base.chars().take(400).collect();
        let short: String = base.chars().take(399).collect();
        assert!(channel.encode(&exact, b"ok").is_ok());
        match channel.encode(&short, b"ok") {
            Err(StegoError::ContentTooShort { length, minimum }) => {
                assert_eq!(length, 399);
                assert_eq!(minimum, 400);
            }
            other => panic!("expected ContentTooShort, got {other:?}"),
        }
    }

    #[test]
    fn max_encodable_bits_enforced() {
        let channel = StructureChannel::new(StructureConfig {
            max_encodable_bits: 40,
            ..StructureConfig::default()
        });
        let text = document(10);
        assert!(channel.encode(&text, b"abc").is_ok());
        assert!(matches!(
            channel.encode(&text, b"abcd"),
            Err(StegoError::PayloadTooLarge { bits: 48, limit: 40 })
        ));
    }

    #[test]
    fn insufficient_units_without_elaboration() {
        let channel = StructureChannel::new(StructureConfig {
            elaborate: false,
            ..StructureConfig::default()
        });
        match channel.encode(&document(10), b"hi") {
            Err(StegoError::InsufficientUnits { needed, available }) => {
                assert_eq!(needed, 64);
                assert_eq!(available, 10);
            }
            other => panic!("expected InsufficientUnits, got {other:?}"),
        }
    }

    #[test]
    fn decode_errors() {
        let channel = StructureChannel::default();
        assert!(matches!(
            channel.decode(&document(60)),
            Err(StegoError::MarkerNotFound(ChannelKind::Structure))
        ));

        let few = format!("{STRUCTURE_MARKER}\n\nOne.\n\nTwo.");
        assert!(matches!(
            channel.decode(&few),
            Err(StegoError::InsufficientUnits { needed: 5, available: 1 })
        ));

        let encoded = channel.encode(&document(60), b"abcdef").unwrap();
        let cut: Vec<&str> = paragraphs(&encoded).into_iter().take(1 + 50).collect();
        assert!(matches!(
            channel.decode(&cut.join("\n\n")),
            Err(StegoError::TruncatedData { declared: 48, .. })
        ));
    }

    #[test]
    fn hidden_code_points_do_not_disturb_decode() {
        let channel = StructureChannel::default();
        let encoded = channel.encode(&document(70), b"zz").unwrap();
        let noisy = encoded.replacen("the ", "the \u{200D}\u{200C}\u{200B}", 40);
        assert_eq!(strip_hidden(&noisy), encoded);
        assert_eq!(channel.decode(&noisy).unwrap(), b"zz");
    }

    #[test]
    fn reencode_replaces_marker() {
        let channel = StructureChannel::default();
        let first = channel.encode(&document(70), b"one").unwrap();
        let second = channel.encode(&first, b"two").unwrap();
        assert_eq!(second.matches(STRUCTURE_MARKER).count(), 1);
        assert_eq!(channel.decode(&second).unwrap(), b"two");
    }
}
