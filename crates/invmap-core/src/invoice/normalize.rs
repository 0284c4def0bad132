//! Whitespace flattening with a way back to the original text.

use std::ops::Range;

/// Page text with every whitespace run collapsed to a single space.
///
/// Anchors are located on the flat form; `raw_span` maps a flat range back
/// onto the original so that line structure survives for item parsing.
#[derive(Debug, Clone)]
pub struct NormalizedText<'a> {
    raw: &'a str,
    flat: String,
    /// `offsets[i]` is the raw byte offset of flat byte `i`; one extra entry
    /// holds `raw.len()`.
    offsets: Vec<usize>,
}

impl<'a> NormalizedText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let mut flat = String::with_capacity(raw.len());
        let mut offsets = Vec::with_capacity(raw.len() + 1);
        let mut in_whitespace = false;

        for (idx, c) in raw.char_indices() {
            if c.is_whitespace() {
                if !in_whitespace {
                    flat.push(' ');
                    offsets.push(idx);
                }
                in_whitespace = true;
            } else {
                flat.push(c);
                offsets.extend(idx..idx + c.len_utf8());
                in_whitespace = false;
            }
        }
        offsets.push(raw.len());

        Self { raw, flat, offsets }
    }

    /// The original text.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The whitespace-flattened text.
    pub fn flat(&self) -> &str {
        &self.flat
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Original text covering a byte range of the flat text.
    ///
    /// Both ends of `range` must fall on char boundaries of the flat text.
    pub fn raw_span(&self, range: Range<usize>) -> &'a str {
        let start = self.offsets[range.start];
        let end = self.offsets[range.end];
        &self.raw[start..end]
    }
}
