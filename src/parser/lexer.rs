//! Logos-based lexer for ORCA input files
//!
//! Fast tokenization using the logos crate. The lexer never fails: input
//! it cannot match is returned as [`TokenKind::Unknown`].

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::token_kind::TokenKind;
use crate::base::{Position, Span};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte range in the source
    pub range: TextRange,
    /// Line/column range in the source
    pub span: Span,
}

impl Token<'_> {
    /// Text with surrounding quotes removed from string tokens.
    pub fn unquoted(&self) -> &str {
        if self.kind == TokenKind::String {
            self.text.trim_matches('"')
        } else {
            self.text
        }
    }
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Cloning a lexer restarts nothing; it forks the sequence at the current
/// position. Call [`Lexer::new`] again to start over.
#[derive(Clone)]
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            line: 0,
            column: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let byte_range = self.inner.span();
        let range = TextRange::new(
            TextSize::from(byte_range.start as u32),
            TextSize::from(byte_range.end as u32),
        );

        let start = Position::new(self.line, self.column);
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        let end = if text.ends_with('\n') {
            // A newline token ends on its own line.
            Position::new(start.line, start.column + 1)
        } else {
            Position::new(self.line, self.column)
        };

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Unknown,
        };

        Some(Token {
            kind,
            text,
            range,
            span: Span::new(start, end),
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"#[^\n]*")]
    Comment,

    // =========================================================================
    // MARKERS
    // =========================================================================
    #[token("!")]
    Bang,

    #[token("%")]
    Percent,

    #[token("*")]
    Star,

    #[token("end", ignore(ascii_case))]
    EndKw,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", priority = 10)]
    Number,

    #[regex(r#"[^\s\x00-\x1f\x7f#!%*"'=,][^\s\x00-\x1f\x7f#!%"'=,]*"#)]
    Word,

    #[regex(r#""[^"\n]*""#)]
    String,

    #[regex(r#"[=,"']"#)]
    Symbol,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => TokenKind::Whitespace,
            LogosToken::Newline => TokenKind::Newline,
            LogosToken::Comment => TokenKind::Comment,
            LogosToken::Bang => TokenKind::Bang,
            LogosToken::Percent => TokenKind::Percent,
            LogosToken::Star => TokenKind::Star,
            LogosToken::EndKw => TokenKind::EndKw,
            LogosToken::Number => TokenKind::Number,
            LogosToken::Word => TokenKind::Word,
            LogosToken::String => TokenKind::String,
            LogosToken::Symbol => TokenKind::Symbol,
        }
    }
}
