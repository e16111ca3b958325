//! A small S-expression parser for KiCad files that keeps the byte span of
//! every node, so callers can rewrite individual atoms or lists without
//! reformatting the rest of the document.
//!
//! - [`parse`] - Parse a single top-level expression
//! - [`Sexpr::text`] - Recover the exact source text of a node
//! - [`PatchSet`] - Collect span replacements and insertions, then apply them in one pass
//! - [`kicad`] - Query helpers for KiCad list nodes

pub mod escape;
pub mod kicad;

use std::fmt;

pub use escape::quote_string;

/// Byte span in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`, used for insertions.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// The kind of S-expression value
#[derive(Debug, Clone, PartialEq)]
pub enum SexprKind {
    /// Unquoted identifier such as `symbol` or `yes`
    Symbol(String),
    /// Quoted text, stored unescaped
    String(String),
    Int(i64),
    F64(f64),
    List(Vec<Sexpr>),
}

/// An S-expression value with source span
#[derive(Debug, Clone)]
pub struct Sexpr {
    pub kind: SexprKind,
    pub span: Span,
}

impl PartialEq for Sexpr {
    fn eq(&self, other: &Self) -> bool {
        // Spans are positional noise for structural comparison.
        self.kind == other.kind
    }
}

impl Sexpr {
    pub fn with_span(kind: SexprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Get the symbol name if this is a symbol
    pub fn as_sym(&self) -> Option<&str> {
        match &self.kind {
            SexprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get the string content if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            SexprKind::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the text of a symbol or string atom.
    pub fn as_atom(&self) -> Option<&str> {
        match &self.kind {
            SexprKind::Symbol(s) | SexprKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match &self.kind {
            SexprKind::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match &self.kind {
            SexprKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// The leading symbol of a list, e.g. `property` for `(property "Value" "10k")`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_sym()
    }

    /// Exact source text of this node.
    ///
    /// Panics if the span does not belong to `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// Parser for S-expressions
pub struct Parser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            chars: input.char_indices().peekable(),
            current_pos: 0,
        }
    }

    /// Parse the next S-expression.
    pub fn parse(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEof);
        }

        if self.peek_char() == Some('(') {
            self.parse_list()
        } else {
            self.parse_atom()
        }
    }

    /// Parse exactly one expression, allowing only whitespace and comments after it.
    pub fn parse_document(&mut self) -> Result<Sexpr, ParseError> {
        let root = self.parse()?;
        self.skip_whitespace();
        if self.is_at_end() {
            Ok(root)
        } else {
            Err(ParseError::TrailingInput(self.current_pos))
        }
    }

    fn parse_list(&mut self) -> Result<Sexpr, ParseError> {
        let start_pos = self.current_pos;
        self.expect('(')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                return Err(ParseError::UnclosedList(start_pos));
            }

            if self.peek_char() == Some(')') {
                self.advance();
                break;
            }

            items.push(self.parse()?);

            if items.len() % 1000 == 0 {
                log::trace!(
                    "Parsed {} items in list at position {start_pos}",
                    items.len()
                );
            }
        }

        Ok(Sexpr::with_span(
            SexprKind::List(items),
            Span::new(start_pos, self.current_pos),
        ))
    }

    fn parse_atom(&mut self) -> Result<Sexpr, ParseError> {
        if self.peek_char() == Some('"') {
            return self.parse_string();
        }

        let start = self.current_pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            self.advance();
        }

        if self.current_pos == start {
            return Err(ParseError::EmptyAtom(start));
        }

        let atom = &self.input[start..self.current_pos];
        let span = Span::new(start, self.current_pos);

        let kind = if let Ok(n) = atom.parse::<i64>() {
            SexprKind::Int(n)
        } else if let Ok(f) = atom.parse::<f64>() {
            SexprKind::F64(f)
        } else {
            SexprKind::Symbol(atom.to_string())
        };
        Ok(Sexpr::with_span(kind, span))
    }

    fn parse_string(&mut self) -> Result<Sexpr, ParseError> {
        let start_pos = self.current_pos;
        self.expect('"')?;
        let mut result = String::new();

        loop {
            match self.peek_char() {
                None => return Err(ParseError::UnterminatedString(start_pos)),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek_char() {
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some(ch) => ch,
                        None => return Err(ParseError::UnterminatedString(start_pos)),
                    };
                    result.push(escaped);
                    self.advance();
                }
                Some(ch) => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Ok(Sexpr::with_span(
            SexprKind::String(result),
            Span::new(start_pos, self.current_pos),
        ))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                // Comment runs to end of line
                while let Some(ch) = self.peek_char() {
                    self.advance();
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn advance(&mut self) {
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos + ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError::UnexpectedChar {
                found: ch,
                expected,
                offset: self.current_pos,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }
}

/// Parse a whole document consisting of one top-level S-expression.
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    log::trace!("Parsing S-expression from {} bytes of input", input.len());
    let result = Parser::new(input).parse_document();
    if let Err(e) = &result {
        log::trace!("Failed to parse S-expression: {e}");
    }
    result
}

/// Errors that can occur during parsing. Offsets are byte positions in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedEof,
    UnexpectedChar {
        found: char,
        expected: char,
        offset: usize,
    },
    UnclosedList(usize),
    UnterminatedString(usize),
    EmptyAtom(usize),
    TrailingInput(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::UnexpectedChar {
                found,
                expected,
                offset,
            } => write!(f, "Expected '{expected}', found '{found}' at byte {offset}"),
            ParseError::UnclosedList(offset) => write!(f, "Unclosed list opened at byte {offset}"),
            ParseError::UnterminatedString(offset) => {
                write!(f, "Unterminated string starting at byte {offset}")
            }
            ParseError::EmptyAtom(offset) => write!(f, "Empty atom at byte {offset}"),
            ParseError::TrailingInput(offset) => {
                write!(f, "Unexpected input after document at byte {offset}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A single edit: replace `span` with `new_text`. An empty span inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub span: Span,
    pub new_text: String,
}

/// A collection of edits against one source text.
///
/// Patches are sorted by span start and applied in a single forward pass.
/// Patches must not overlap; insertions at the same offset keep their
/// insertion order.
#[derive(Debug, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a span with exact text.
    pub fn replace_raw(&mut self, span: Span, new_text: String) {
        self.patches.push(Patch { span, new_text });
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, offset: usize, text: String) {
        self.replace_raw(Span::at(offset), text);
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Stream the patched source to a writer.
    pub fn write_to<W: std::io::Write>(&self, source: &str, mut writer: W) -> std::io::Result<()> {
        if self.patches.is_empty() {
            return writer.write_all(source.as_bytes());
        }

        let mut sorted: Vec<&Patch> = self.patches.iter().collect();
        // Stable sort keeps same-offset insertions in the order they were added.
        sorted.sort_by_key(|p| p.span.start);

        debug_assert!(
            sorted
                .windows(2)
                .all(|w| w[0].span.end <= w[1].span.start && w[1].span.end <= source.len())
        );

        let bytes = source.as_bytes();
        let mut cursor = 0;
        for patch in sorted {
            if patch.span.start > cursor {
                writer.write_all(&bytes[cursor..patch.span.start])?;
            }
            writer.write_all(patch.new_text.as_bytes())?;
            cursor = cursor.max(patch.span.end);
        }

        if cursor < bytes.len() {
            writer.write_all(&bytes[cursor..])?;
        }

        Ok(())
    }

    /// Apply all patches and return the new text.
    pub fn apply(&self, source: &str) -> String {
        let mut out = Vec::with_capacity(source.len());
        self.write_to(source, &mut out)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("patches splice whole UTF-8 fragments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_atom() {
        assert_eq!(
            parse("hello").unwrap().kind,
            SexprKind::Symbol("hello".to_string())
        );
        assert_eq!(parse("123").unwrap().kind, SexprKind::Int(123));
        assert_eq!(parse("1.27").unwrap().kind, SexprKind::F64(1.27));
        assert_eq!(
            parse("Device:R").unwrap().kind,
            SexprKind::Symbol("Device:R".to_string())
        );
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            parse(r#""with\"quotes\"""#).unwrap().kind,
            SexprKind::String("with\"quotes\"".to_string())
        );
        assert_eq!(
            parse(r#""line\nbreak""#).unwrap().kind,
            SexprKind::String("line\nbreak".to_string())
        );
    }

    #[test]
    fn test_parse_property_node() {
        let input = r#"(property "Value" "10k" (at 10.16 5.08 0) (effects (font (size 1.27 1.27))))"#;
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.tag(), Some("property"));
        let items = parsed.as_list().unwrap();
        assert_eq!(items[1].as_str(), Some("Value"));
        assert_eq!(items[2].as_str(), Some("10k"));
        assert_eq!(items[3].tag(), Some("at"));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "
        ; leading comment
        (dnp ; inline comment
          no)
        ";
        let parsed = parse(input).unwrap();
        let items = parsed.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_sym(), Some("no"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEof));
        assert_eq!(parse("(a (b)"), Err(ParseError::UnclosedList(0)));
        assert_eq!(parse(r#"(a "b)"#), Err(ParseError::UnterminatedString(3)));
        assert_eq!(parse("(a) (b)"), Err(ParseError::TrailingInput(4)));
    }

    #[test]
    fn test_span_tracking_utf8() {
        let input = r#"(property "Value" "4.7µF")"#;
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.span, Span::new(0, input.len()));
        let items = parsed.as_list().unwrap();
        assert_eq!(items[0].text(input), "property");
        assert_eq!(items[1].text(input), "\"Value\"");
        assert_eq!(items[2].text(input), "\"4.7µF\"");
    }

    #[test]
    fn test_patch_set_replace_and_insert() {
        let input = "(symbol (in_bom yes) (dnp no))";
        let parsed = parse(input).unwrap();
        let items = parsed.as_list().unwrap();
        let in_bom = items[1].as_list().unwrap();
        let dnp = items[2].as_list().unwrap();

        let mut patches = PatchSet::new();
        patches.replace_raw(in_bom[1].span, "no".to_string());
        patches.replace_raw(dnp[1].span, "yes".to_string());
        patches.insert(items[2].span.end, " (uuid \"x\")".to_string());
        assert_eq!(patches.len(), 3);
        assert_eq!(
            patches.apply(input),
            r#"(symbol (in_bom no) (dnp yes) (uuid "x"))"#
        );
    }

    #[test]
    fn test_patch_set_replace_with_quoted_string() {
        let input = r#"(property "Value" "1k")"#;
        let parsed = parse(input).unwrap();
        let value = &parsed.as_list().unwrap()[2];

        let mut patches = PatchSet::new();
        patches.replace_raw(value.span, quote_string("say \"hi\""));
        assert_eq!(patches.apply(input), r#"(property "Value" "say \"hi\"")"#);
    }

    #[test]
    fn test_empty_patch_set_is_identity() {
        let input = "(kicad_sch\n\t(version 20231120)\n)\n";
        assert_eq!(PatchSet::new().apply(input), input);
    }
}
