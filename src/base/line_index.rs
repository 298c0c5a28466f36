//! Conversion between byte offsets and line/column positions.

use text_size::TextSize;

use super::Position;

/// Index of line start offsets for one text snapshot.
///
/// Columns are counted in Unicode scalar values, matching the columns the
/// lexer assigns to tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let column = text
            .get(start..usize::from(offset))
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Position::new(line as u32, column as u32)
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// A column past the end of its line clamps to the line end; a line past
    /// the last line yields `None`.
    pub fn offset(&self, text: &str, position: Position) -> Option<TextSize> {
        let line = position.line as usize;
        let start = usize::from(*self.line_starts.get(line)?);
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| usize::from(*next) - 1)
            .unwrap_or_else(|| usize::from(self.len));
        let line_text = text.get(start..end)?;

        let byte_col = line_text
            .char_indices()
            .nth(position.column as usize)
            .map(|(idx, _)| idx)
            .unwrap_or(line_text.len());
        Some(TextSize::from((start + byte_col) as u32))
    }

    /// Text of a single line without its trailing newline.
    pub fn line_text<'t>(&self, text: &'t str, line: u32) -> Option<&'t str> {
        let line = line as usize;
        let start = usize::from(*self.line_starts.get(line)?);
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| usize::from(*next) - 1)
            .unwrap_or_else(|| usize::from(self.len));
        text.get(start..end).map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}
