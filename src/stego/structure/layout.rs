// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Paragraph-length patterns carrying the 16-bit length prefix.
//!
//! Units `0..48` form sixteen disjoint groups of three. A group `(a, b, c)`
//! of visible lengths reads as bit 0 when its middle unit stands out
//! (alternating short/long) and as bit 1 otherwise (medium lengths).
//! Lengths only ever grow: a unit is lengthened by appending a short neutral
//! sentence.

use crate::stego::filler::{self, Filler};
use crate::stego::frame::LENGTH_PREFIX_BITS;
use crate::text::hidden::visible_len;
use crate::text::segment::ensure_terminated;

/// Units per length-prefix group.
pub const GROUP_SIZE: usize = 3;

/// Units consumed by the length prefix.
pub const PREFIX_UNITS: usize = GROUP_SIZE * LENGTH_PREFIX_BITS;

/// Ratio by which the middle unit must differ from both neighbours for the
/// group to read as alternating.
pub const CONTRAST: f64 = 1.6;

/// Encoding bit 1 lengthens every unit to at least this fraction of the
/// longest one.
pub const MEDIUM_FLOOR: f64 = 0.8;

fn lengths(group: &[String]) -> [usize; GROUP_SIZE] {
    [visible_len(&group[0]), visible_len(&group[1]), visible_len(&group[2])]
}

/// Whether the middle length stands out from both neighbours.
pub fn is_alternating([a, b, c]: [usize; GROUP_SIZE]) -> bool {
    let b = b as f64;
    b >= CONTRAST * a.max(c) as f64 || CONTRAST * b <= a.min(c) as f64
}

/// Bit carried by a group of three units.
pub fn read_group(group: &[String]) -> u8 {
    u8::from(!is_alternating(lengths(group)))
}

/// Append one padding sentence to `unit`.
fn pad(unit: &mut String, filler: &mut Filler) {
    ensure_terminated(unit);
    unit.push(' ');
    unit.push_str(filler.pick(filler::PADDING));
}

fn pad_to(unit: &mut String, target: f64, filler: &mut Filler) {
    while (visible_len(unit) as f64) < target {
        pad(unit, filler);
    }
}

/// Lengthen units of `group` until [`read_group`] returns `bit`.
pub fn impose(group: &mut [String], bit: u8, filler: &mut Filler) {
    if read_group(group) == bit & 1 {
        return;
    }

    let [a, b, c] = lengths(group);
    if bit & 1 == 0 {
        // Either lift the middle above both neighbours or both neighbours
        // above the middle, whichever adds less text.
        let lift_middle = CONTRAST * a.max(c) as f64 - b as f64;
        let target = CONTRAST * b as f64;
        let lift_outer = (target - a as f64).max(0.0) + (target - c as f64).max(0.0);
        if lift_middle <= lift_outer {
            pad_to(&mut group[1], CONTRAST * a.max(c) as f64, filler);
        } else {
            pad_to(&mut group[0], target, filler);
            pad_to(&mut group[2], target, filler);
        }
    } else {
        let floor = MEDIUM_FLOOR * a.max(b).max(c) as f64;
        for unit in group.iter_mut() {
            pad_to(unit, floor, filler);
        }
        while is_alternating(lengths(group)) {
            let shortest = (0..GROUP_SIZE)
                .min_by_key(|&i| visible_len(&group[i]))
                .unwrap_or(0);
            pad(&mut group[shortest], filler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(lens: [usize; 3]) -> Vec<String> {
        lens.iter().map(|&n| "x".repeat(n)).collect()
    }

    #[test]
    fn alternating_rule() {
        assert!(is_alternating([100, 160, 100]));
        assert!(is_alternating([160, 100, 170]));
        assert!(!is_alternating([100, 150, 100]));
        assert!(!is_alternating([100, 100, 100]));
        assert!(!is_alternating([100, 70, 200]));
    }

    #[test]
    fn lengths_ignore_hidden_code_points() {
        let mut g = group([100, 100, 100]);
        g[1].push_str(&"\u{200B}".repeat(200));
        assert_eq!(read_group(&g), 1);
    }

    #[test]
    fn impose_both_bits() {
        let mut f = Filler::for_text("layout", b"t");
        for lens in [[100, 100, 100], [40, 200, 40], [300, 120, 310], [20, 900, 30], [500, 480, 20]] {
            for bit in [0u8, 1] {
                let mut g = group(lens);
                impose(&mut g, bit, &mut f);
                assert_eq!(read_group(&g), bit, "{lens:?} -> {bit}");
            }
        }
    }

    #[test]
    fn bit_one_gives_medium_lengths() {
        let mut f = Filler::for_text("layout", b"t");
        let mut g = group([200, 40, 180]);
        impose(&mut g, 1, &mut f);
        let lens = lengths(&g);
        let max = *lens.iter().max().unwrap() as f64;
        assert!(lens.iter().all(|&n| n as f64 >= MEDIUM_FLOOR * max * 0.9));
    }

    #[test]
    fn matching_group_is_untouched() {
        let mut f = Filler::for_text("layout", b"t");
        let mut g = group([100, 100, 100]);
        let before = g.clone();
        impose(&mut g, 1, &mut f);
        assert_eq!(g, before);
    }
}
