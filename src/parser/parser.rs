//! Structural parser for ORCA input files.
//!
//! The parser is a small state machine over lines of tokens:
//!
//! ```text
//! Default ──!──▶ route line ──▶ Default
//! Default ──%──▶ InBlock(name) ──end──▶ Default
//! Default ──*──▶ InGeometry ──*──▶ Default
//! ```
//!
//! A marker at the start of a line inside a block or geometry closes that
//! zone early (it is reported as unterminated) and is then parsed again in
//! `Default`. Lines that fit nowhere are reported and skipped.

use indexmap::IndexMap;

use super::ast::{
    Atom, GeometryBlock, NamedBlock, Parameter, RouteLine, SourceFile, UnknownLine, Value,
    ValueKind, Word, Zone,
};
use super::errors::{ErrorCode, RelatedInfo, SyntaxError};
use super::lexer::{Lexer, Token};
use super::token_kind::TokenKind;
use crate::base::Span;
use crate::knowledge::{BlockSpec, CoordinateKind, KnowledgeBase};

/// Result of parsing one document.
#[derive(Clone, Debug, PartialEq)]
pub struct Parse {
    pub file: SourceFile,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse ORCA input text into a document model.
///
/// Never fails; malformed input yields a best-effort model and errors.
pub fn parse(input: &str, kb: &KnowledgeBase) -> Parse {
    let mut errors = Vec::new();
    let lines = split_lines(input, &mut errors);

    let mut parser = Parser {
        lines: &lines,
        pos: 0,
        kb,
        zones: Vec::new(),
        errors,
    };
    parser.parse_source_file();

    tracing::trace!(
        lines = lines.len(),
        zones = parser.zones.len(),
        errors = parser.errors.len(),
        "parsed document"
    );
    parser.finish()
}

/// Non-empty line of significant tokens.
#[derive(Debug)]
struct Line<'a> {
    tokens: Vec<Token<'a>>,
}

impl Line<'_> {
    fn first(&self) -> &Token<'_> {
        &self.tokens[0]
    }

    fn span(&self) -> Span {
        span_of(&self.tokens).unwrap_or_default()
    }
}

/// Group tokens into lines, dropping trivia and separators.
///
/// Markers only mean something at the start of a line; anywhere else they
/// are reported and dropped, as are characters the lexer did not match.
fn split_lines<'a>(input: &'a str, errors: &mut Vec<SyntaxError>) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut current: Vec<Token<'a>> = Vec::new();

    for token in Lexer::new(input) {
        match token.kind {
            TokenKind::Newline => {
                if !current.is_empty() {
                    lines.push(Line {
                        tokens: std::mem::take(&mut current),
                    });
                }
            }
            TokenKind::Whitespace | TokenKind::Comment => {}
            TokenKind::Symbol if matches!(token.text, "=" | ",") => {}
            TokenKind::Symbol => errors.push(SyntaxError::from_code(ErrorCode::E0102, token.span)),
            TokenKind::Unknown => errors.push(SyntaxError::from_code(ErrorCode::E0101, token.span)),
            kind if kind.is_marker() && !current.is_empty() => errors.push(
                SyntaxError::new(
                    format!("unexpected '{}'", token.text),
                    token.span,
                    ErrorCode::E0101,
                )
                .with_hint("markers are only recognized at the start of a line"),
            ),
            _ => current.push(token),
        }
    }
    if !current.is_empty() {
        lines.push(Line { tokens: current });
    }
    lines
}

fn span_of(tokens: &[Token<'_>]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(first.span.cover(last.span))
}

fn word(token: &Token<'_>) -> Word {
    Word::new(token.unquoted(), token.span)
}

fn value(token: &Token<'_>) -> Value {
    let kind = match token.kind {
        TokenKind::Number => token
            .text
            .parse::<i64>()
            .map(ValueKind::Integer)
            .or_else(|_| token.text.parse::<f64>().map(ValueKind::Float))
            .unwrap_or(ValueKind::Text),
        TokenKind::String => ValueKind::Quoted,
        _ => ValueKind::Text,
    };
    Value {
        text: token.unquoted().into(),
        kind,
        span: token.span,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(unicode_ident::is_xid_continue)
}

/// The parser state
struct Parser<'t, 'kb> {
    lines: &'t [Line<'t>],
    pos: usize,
    kb: &'kb KnowledgeBase,
    zones: Vec<Zone>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'kb> Parser<'t, 'kb> {
    fn finish(self) -> Parse {
        Parse {
            file: SourceFile { zones: self.zones },
            errors: self.errors,
        }
    }

    fn error(&mut self, code: ErrorCode, span: Span) {
        self.errors.push(SyntaxError::from_code(code, span));
    }

    /// The next line, without consuming it.
    fn peek(&self) -> Option<&'t Line<'t>> {
        self.lines.get(self.pos)
    }

    /// Next line that does not start a new zone.
    fn next_body_line(&mut self) -> Option<&'t Line<'t>> {
        let line = self.peek()?;
        if line.first().kind.is_marker() {
            return None;
        }
        self.pos += 1;
        Some(line)
    }

    // =========================================================================
    // Default state
    // =========================================================================

    fn parse_source_file(&mut self) {
        while let Some(line) = self.peek() {
            self.pos += 1;
            match line.first().kind {
                TokenKind::Bang => self.parse_route(line),
                TokenKind::Percent => self.parse_block(line),
                TokenKind::Star => self.parse_geometry(line),
                TokenKind::EndKw => self.errors.push(
                    SyntaxError::from_code(ErrorCode::E0203, line.span())
                        .with_hint("remove it, or open a block with '%name' above"),
                ),
                _ => {
                    self.error(ErrorCode::E0901, line.span());
                    self.zones.push(Zone::Unknown(UnknownLine {
                        words: line.tokens.iter().map(word).collect(),
                        span: line.span(),
                    }));
                }
            }
        }
    }

    fn parse_route(&mut self, line: &Line<'_>) {
        let marker = line.first().span;
        self.zones.push(Zone::Route(RouteLine {
            marker,
            keywords: line.tokens[1..].iter().map(word).collect(),
            span: line.span(),
        }));
    }

    // =========================================================================
    // InBlock state
    // =========================================================================

    fn parse_block(&mut self, line: &Line<'_>) {
        let marker = line.first().span;
        let Some(name_token) = line.tokens.get(1) else {
            self.error(ErrorCode::E0301, marker);
            return;
        };
        if name_token.kind != TokenKind::Word || !is_identifier(name_token.text) {
            self.errors.push(SyntaxError::new(
                format!("invalid block name '{}'", name_token.text),
                name_token.span,
                ErrorCode::E0302,
            ));
            return;
        }

        let kb = self.kb;
        let name = word(name_token);
        let spec = kb.block(&name.text);
        let mut block = NamedBlock {
            marker,
            span: marker.cover(name.span),
            name,
            arguments: Vec::new(),
            params: IndexMap::new(),
            terminated: false,
        };
        let rest = &line.tokens[2..];

        if spec.is_some_and(BlockSpec::is_line_directive) {
            let args = rest
                .iter()
                .take_while(|token| token.kind != TokenKind::EndKw);
            block.arguments = args.map(value).collect();
            block.span = line.span();
            block.terminated = true;
            self.zones.push(Zone::Block(block));
            return;
        }

        let mut closed = self.parse_block_line(&mut block, spec, rest);
        while !closed {
            match self.next_body_line() {
                Some(body) => closed = self.parse_block_line(&mut block, spec, &body.tokens),
                None => break,
            }
        }

        if closed {
            block.terminated = true;
        } else {
            let mut error = SyntaxError::new(
                format!("block '%{}' is not terminated by 'end'", block.name.text),
                block.header_span(),
                ErrorCode::E0201,
            )
            .with_hint("add 'end' after the last parameter");
            if let Some(next) = self.peek() {
                error = error.with_related(RelatedInfo::new(
                    "block interrupted here",
                    next.first().span,
                ));
            }
            self.errors.push(error);
        }
        self.zones.push(Zone::Block(block));
    }

    /// Parse one line of block content. Returns `true` if it closed the block.
    fn parse_block_line(
        &mut self,
        block: &mut NamedBlock,
        spec: Option<&'kb BlockSpec>,
        tokens: &[Token<'_>],
    ) -> bool {
        let end = tokens.iter().position(|t| t.kind == TokenKind::EndKw);
        let body = &tokens[..end.unwrap_or(tokens.len())];
        self.parse_parameters(block, spec, body);

        let Some(end) = end else {
            return false;
        };
        block.span = block.span.cover(tokens[end].span);
        if let Some(trailing) = span_of(&tokens[end + 1..]) {
            self.error(ErrorCode::E0204, trailing);
        }
        true
    }

    /// Split `key value... key value...` into parameters.
    ///
    /// A word starts a new parameter only when the current one already has a
    /// value and the block declares a parameter of that name.
    fn parse_parameters(
        &mut self,
        block: &mut NamedBlock,
        spec: Option<&BlockSpec>,
        tokens: &[Token<'_>],
    ) {
        let Some(first) = tokens.first() else {
            return;
        };
        if first.kind != TokenKind::Word {
            if let Some(span) = span_of(tokens) {
                self.error(ErrorCode::E0401, span);
            }
            return;
        }

        let mut current: Option<Parameter> = None;
        for token in tokens {
            let starts_key = match &current {
                None => true,
                Some(param) => {
                    token.kind == TokenKind::Word
                        && !param.values.is_empty()
                        && spec.is_some_and(|s| s.parameter(token.text).is_some())
                }
            };
            match current.as_mut() {
                Some(param) if !starts_key => {
                    param.span = param.span.cover(token.span);
                    param.values.push(value(token));
                }
                _ => {
                    if let Some(done) = current.take() {
                        push_parameter(block, done);
                    }
                    current = Some(Parameter {
                        key: word(token),
                        values: Vec::new(),
                        span: token.span,
                    });
                }
            }
        }
        if let Some(done) = current {
            push_parameter(block, done);
        }
    }

    // =========================================================================
    // InGeometry state
    // =========================================================================

    fn parse_geometry(&mut self, line: &Line<'_>) {
        let marker = line.first().span;
        let header_tokens = &line.tokens[1..];
        let Some(tag) = header_tokens.first() else {
            self.errors.push(
                SyntaxError::from_code(ErrorCode::E0303, marker)
                    .with_hint("geometry headers read '* xyz charge multiplicity'"),
            );
            return;
        };

        let (coord_system, values) = if tag.kind == TokenKind::Word {
            (Some(word(tag)), &header_tokens[1..])
        } else {
            self.error(ErrorCode::E0303, tag.span);
            (None, header_tokens)
        };
        let kind = coord_system
            .as_ref()
            .and_then(|tag| self.kb.coordinate_system(&tag.text))
            .map_or(CoordinateKind::Cartesian, |system| system.kind);

        let header = line.span();
        let mut geometry = GeometryBlock {
            marker,
            coord_system,
            charge: values.first().map(value),
            multiplicity: values.get(1).map(value),
            file: None,
            atoms: Vec::new(),
            terminated: false,
            header,
            span: header,
        };

        if kind == CoordinateKind::File {
            geometry.file = values.get(2).map(value);
            if geometry.file.is_none() && values.len() >= 2 {
                self.error(ErrorCode::E0304, header);
            }
            if let Some(extra) = values.get(3..).and_then(span_of) {
                self.error(ErrorCode::E0305, extra);
            }
            geometry.terminated = true;
            self.zones.push(Zone::Geometry(geometry));
            return;
        }
        if let Some(extra) = values.get(2..).and_then(span_of) {
            self.error(ErrorCode::E0305, extra);
        }

        loop {
            let Some(next) = self.peek() else {
                break;
            };
            let first = next.first();
            if first.kind == TokenKind::Star && next.tokens.len() == 1 {
                self.pos += 1;
                geometry.span = geometry.span.cover(first.span);
                geometry.terminated = true;
                break;
            }
            let Some(record) = self.next_body_line() else {
                break;
            };
            match parse_atom(kind, &record.tokens) {
                Some(atom) => {
                    geometry.span = geometry.span.cover(atom.span);
                    geometry.atoms.push(atom);
                }
                None => self.errors.push(
                    SyntaxError::from_code(ErrorCode::E0402, record.span())
                        .with_hint(atom_hint(kind)),
                ),
            }
        }

        // Running into end of input is accepted; only an interrupting zone is an error.
        if let Some(next) = self.peek().filter(|_| !geometry.terminated) {
            self.errors.push(
                SyntaxError::from_code(ErrorCode::E0202, geometry.header)
                    .with_hint("close the coordinates with a line containing only '*'")
                    .with_related(RelatedInfo::new(
                        "geometry interrupted here",
                        next.first().span,
                    )),
            );
        }
        self.zones.push(Zone::Geometry(geometry));
    }
}

fn push_parameter(block: &mut NamedBlock, param: Parameter) {
    block.span = block.span.cover(param.span);
    block
        .params
        .entry(param.key.text.to_ascii_lowercase().into())
        .or_default()
        .push(param);
}

fn atom_hint(kind: CoordinateKind) -> &'static str {
    match kind {
        CoordinateKind::Internal => "expected 'Element a b c r angle dihedral'",
        CoordinateKind::ZMatrix => "expected 'Element [a r [b angle [c dihedral]]]'",
        CoordinateKind::Cartesian | CoordinateKind::File => "expected 'Element x y z'",
    }
}

/// Parse an atom record laid out for the given coordinate system.
fn parse_atom(kind: CoordinateKind, tokens: &[Token<'_>]) -> Option<Atom> {
    let (element, rest) = tokens.split_first()?;
    if element.kind != TokenKind::Word {
        return None;
    }
    let numbers = rest
        .iter()
        .map(|token| match token.kind {
            TokenKind::Number => token.text.parse::<f64>().ok(),
            _ => None,
        })
        .collect::<Option<Vec<f64>>>()?;
    let index = |i: usize| -> Option<u32> {
        let value = rest[i].text.parse::<u32>().ok()?;
        Some(value)
    };

    let (refs, coords) = match (kind, numbers.len()) {
        (CoordinateKind::Cartesian, 3) => (Vec::new(), [numbers[0], numbers[1], numbers[2]]),
        (CoordinateKind::Internal, 6) => (
            vec![index(0)?, index(1)?, index(2)?],
            [numbers[3], numbers[4], numbers[5]],
        ),
        (CoordinateKind::ZMatrix, n @ (0 | 2 | 4 | 6)) => {
            let mut refs = Vec::new();
            let mut coords = [0.0; 3];
            for (slot, pair) in (0..n).step_by(2).enumerate() {
                refs.push(index(pair)?);
                coords[slot] = numbers[pair + 1];
            }
            (refs, coords)
        }
        _ => return None,
    };

    Some(Atom {
        element: word(element),
        x: coords[0],
        y: coords[1],
        z: coords[2],
        refs,
        span: span_of(tokens)?,
    })
}
