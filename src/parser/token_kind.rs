//! Token kinds produced by the lexer.

/// Kind of a lexical token.
///
/// The lexer is zone-agnostic: the same kinds are produced for the route
/// line, blocks and geometry. The parser decides what a word means from
/// where it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // =========================================================================
    // MARKERS
    // =========================================================================
    /// `!` route line marker
    Bang,
    /// `%` block marker
    Percent,
    /// `*` geometry marker
    Star,
    /// `end` block terminator (any case)
    EndKw,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer or floating point number, optionally signed
    Number,
    /// Keyword, identifier or any other whitespace-delimited word
    Word,
    /// Double-quoted string
    String,
    /// `=`, `,` or a stray quote
    Symbol,

    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// `#` comment up to the end of the line
    Comment,
    Whitespace,
    Newline,

    /// Anything the lexer could not match
    Unknown,
}

impl TokenKind {
    /// Tokens the parser never looks at.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Whitespace | Self::Newline)
    }

    /// Tokens that open a top-level zone when they start a line.
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Bang | Self::Percent | Self::Star)
    }
}
