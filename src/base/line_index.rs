//! Byte offset to line/column conversion.

use super::Position;

/// Precomputed line start offsets for a UTF-8 source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a [u8],
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Convert a byte offset to a 1-based line/column position.
    pub fn position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let end = offset.min(self.text.len()).max(start);
        // Continuation bytes (0b10xx_xxxx) do not start a character.
        let column = self.text[start..end]
            .iter()
            .filter(|b| (**b & 0xC0) != 0x80)
            .count();
        Position::new(line + 1, column + 1)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
