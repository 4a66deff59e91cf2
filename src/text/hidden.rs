// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reserved zero-width code points.
//!
//! Three code points are reserved for the invisible channel. Everything else
//! in the crate measures and matches text with these code points ignored, so
//! stripping them never changes what the other channels read.

use std::ops::Range;

/// Bit 0 symbol (ZERO WIDTH SPACE).
pub const ZW_ZERO: char = '\u{200B}';
/// Bit 1 symbol (ZERO WIDTH NON-JOINER).
pub const ZW_ONE: char = '\u{200C}';
/// Frame marker (ZERO WIDTH JOINER), repeated to open and close a frame.
pub const ZW_FRAME: char = '\u{200D}';

/// Returns `true` for the three reserved code points.
#[inline]
pub fn is_hidden(c: char) -> bool {
    matches!(c, ZW_ZERO | ZW_ONE | ZW_FRAME)
}

/// Remove every reserved code point.
pub fn strip_hidden(text: &str) -> String {
    text.chars().filter(|&c| !is_hidden(c)).collect()
}

/// Length in characters, not counting reserved code points.
pub fn visible_len(text: &str) -> usize {
    text.chars().filter(|&c| !is_hidden(c)).count()
}

/// Find `needle` in `haystack`, skipping reserved code points in the haystack.
///
/// Returns the byte range of the match in `haystack` (which may contain
/// reserved code points between matched characters).
pub fn find_visible(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let pattern: Vec<char> = needle.chars().filter(|&c| !is_hidden(c)).collect();
    if pattern.is_empty() {
        return Some(0..0);
    }

    for (start, first) in haystack.char_indices() {
        if first != pattern[0] {
            continue;
        }
        let mut matched = 1;
        let mut end = start + first.len_utf8();
        for (offset, c) in haystack[end..].char_indices() {
            if matched == pattern.len() {
                break;
            }
            if is_hidden(c) {
                continue;
            }
            if c != pattern[matched] {
                break;
            }
            matched += 1;
            end = start + first.len_utf8() + offset + c.len_utf8();
        }
        if matched == pattern.len() {
            return Some(start..end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_len_ignores_reserved() {
        let s = format!("ab{ZW_FRAME}{ZW_ZERO}c{ZW_ONE}");
        assert_eq!(visible_len(&s), 3);
        assert_eq!(strip_hidden(&s), "abc");
    }

    #[test]
    fn find_visible_plain() {
        assert_eq!(find_visible("hello world", "world"), Some(6..11));
        assert_eq!(find_visible("hello world", "planet"), None);
    }

    #[test]
    fn find_visible_skips_reserved_inside_match() {
        let hay = format!("xx wo{ZW_FRAME}{ZW_ONE}rld yy");
        let range = find_visible(&hay, "world").unwrap();
        assert_eq!(strip_hidden(&hay[range]), "world");
    }

    #[test]
    fn find_visible_multibyte() {
        let hay = "café — crème brûlée";
        let range = find_visible(hay, "crème").unwrap();
        assert_eq!(&hay[range], "crème");
    }
}
