/// A 0-based position within a source text.
///
/// Columns are tracked twice: `col_utf8` counts characters while
/// `col_utf16` counts UTF-16 code units (what editors speaking LSP expect).
/// For ASCII text both are equal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SourcePosition {
    line: usize,
    col_utf8: usize,
    col_utf16: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(
        line: usize,
        col_utf8: usize,
        col_utf16: usize,
        byte_offset: usize,
    ) -> Self {
        Self {
            line,
            col_utf8,
            col_utf16,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character count within the current line.
    pub fn col_utf8(&self) -> usize {
        self.col_utf8
    }

    /// Returns the 0-based UTF-16 code unit offset within the current line.
    pub fn col_utf16(&self) -> usize {
        self.col_utf16
    }

    /// Returns the 0-based byte offset from the start of the source.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the `(line, column)` pair as humans read it (1-based).
    pub fn to_line_col(&self) -> (usize, usize) {
        (self.line + 1, self.col_utf8 + 1)
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (line, col) = self.to_line_col();
        write!(f, "{line}:{col}")
    }
}
