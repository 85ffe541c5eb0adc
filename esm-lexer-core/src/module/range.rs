//! Offset ranges into module source

use serde::Serialize;

/// Half-open range `[start, end)` of UTF-8 byte offsets into the scanned
/// `&str`
///
/// Both ends fall on character boundaries of the source it was produced
/// from, so [`Range::slice`] of that source never fails. After
/// [`Range::to_utf16`] the offsets count UTF-16 code units instead and must
/// not be used to slice the Rust string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Text covered by the range; empty when it does not fit `source`
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }

    pub fn to_utf16(&self, index: &Utf16Index) -> Range {
        Range::new(index.to_utf16(self.start), index.to_utf16(self.end))
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start..r.end
    }
}

/// Maps UTF-8 byte offsets to UTF-16 code unit offsets
///
/// Stores one checkpoint per non-ASCII character; everything between
/// checkpoints is ASCII and maps one to one.
#[derive(Debug, Clone, Default)]
pub struct Utf16Index {
    /// (byte offset, utf16 offset) just past each non-ASCII character
    checkpoints: Vec<(usize, usize)>,
}

impl Utf16Index {
    pub fn new(source: &str) -> Self {
        let mut checkpoints = Vec::new();
        let mut utf16 = 0;
        for (i, c) in source.char_indices() {
            utf16 += c.len_utf16();
            if !c.is_ascii() {
                checkpoints.push((i + c.len_utf8(), utf16));
            }
        }
        Self { checkpoints }
    }

    /// Whether the source was pure ASCII (conversion is the identity)
    pub fn is_identity(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn to_utf16(&self, byte_offset: usize) -> usize {
        let idx = self
            .checkpoints
            .partition_point(|&(byte, _)| byte <= byte_offset);
        match idx.checked_sub(1).and_then(|i| self.checkpoints.get(i)) {
            Some(&(byte, utf16)) => utf16 + (byte_offset - byte),
            None => byte_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let src = "import 'x'";
        let r = Range::new(7, 10);
        assert_eq!(r.slice(src), "'x'");
        assert_eq!(r.len(), 3);
        assert_eq!(Range::new(4, 40).slice(src), "");
    }

    #[test]
    fn test_utf16_ascii_identity() {
        let index = Utf16Index::new("export const a = 1");
        assert!(index.is_identity());
        assert_eq!(index.to_utf16(13), 13);
    }

    #[test]
    fn test_utf16_after_astral() {
        // '𓀀' is 4 bytes in UTF-8 and 2 units in UTF-16
        let src = "export var p𓀀s,q";
        let index = Utf16Index::new(src);
        let q = src.find('q').unwrap();
        assert_eq!(q, 18);
        assert_eq!(index.to_utf16(q), 16);
        let name = Range::new(11, 17);
        assert_eq!(name.slice(src), "p𓀀s");
        assert_eq!(name.to_utf16(&index), Range::new(11, 15));
    }

    #[test]
    fn test_utf16_two_byte_chars() {
        let src = "'é' + 'ü'";
        let index = Utf16Index::new(src);
        assert_eq!(index.to_utf16(src.len()), 9);
    }
}
