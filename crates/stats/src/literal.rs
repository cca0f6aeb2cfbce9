//! Structural parser for serialized literal values.
//!
//! The `genres` column stores lists of mappings written in a quoted-literal
//! syntax that is close to, but not, JSON:
//!
//! ```text
//! [{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': "Children's"}]
//! ```
//!
//! This module only recognises data: strings, numbers, booleans, none, lists,
//! tuples, sets and mappings. Anything else (names, calls, operators) is a
//! [`LiteralError`]. Both `True`/`False`/`None` and `true`/`false`/`null` are
//! accepted so JSON-encoded fields parse too.

use thiserror::Error;

/// Nesting beyond this depth is rejected instead of recursing further
pub const MAX_DEPTH: usize = 64;

/// A parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    /// Entries in source order; duplicate keys are kept, lookups take the last
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Look up a string key in a mapping
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| matches!(k, Literal::Str(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("nesting deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

pub type Result<T> = std::result::Result<T, LiteralError>;

/// Parse a complete literal. Leading and trailing whitespace is ignored.
pub fn parse(input: &str) -> Result<Literal> {
    let mut parser = Parser { input, pos: 0 };
    let value = parser.value(0)?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(found) => Err(LiteralError::UnexpectedChar {
            found,
            offset: parser.pos,
        }),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(LiteralError::UnexpectedChar {
                found,
                offset: self.pos - found.len_utf8(),
            }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self, depth: usize) -> Result<Literal> {
        if depth > MAX_DEPTH {
            return Err(LiteralError::TooDeep);
        }
        self.skip_whitespace();

        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('\'' | '"') => self.strings(),
            Some('[') => {
                self.bump();
                self.sequence(']', depth).map(Literal::List)
            }
            Some('(') => self.tuple_or_group(depth),
            Some('{') => self.mapping_or_set(depth),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            Some(found) => Err(LiteralError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
        }
    }

    /// Comma-separated values up to `close`, trailing comma allowed.
    /// The opening bracket has already been consumed.
    fn sequence(&mut self, close: char, depth: usize) -> Result<Vec<Literal>> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        found,
                        offset: self.pos,
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// `()` and `(a,)` are tuples, `(a)` is just `a`
    fn tuple_or_group(&mut self, depth: usize) -> Result<Literal> {
        self.expect('(')?;
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Literal::Tuple(Vec::new()));
        }

        let first = self.value(depth + 1)?;
        self.skip_whitespace();
        match self.bump() {
            Some(')') => Ok(first),
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.sequence(')', depth)?);
                Ok(Literal::Tuple(items))
            }
            Some(found) => Err(LiteralError::UnexpectedChar {
                found,
                offset: self.pos - found.len_utf8(),
            }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    /// `{}` is an empty mapping; otherwise the first separator decides
    fn mapping_or_set(&mut self, depth: usize) -> Result<Literal> {
        self.expect('{')?;
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Literal::Dict(Vec::new()));
        }

        let first = self.value(depth + 1)?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            let mut items = vec![first];
            match self.bump() {
                Some('}') => {}
                Some(',') => items.extend(self.sequence('}', depth)?),
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        found,
                        offset: self.pos - found.len_utf8(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
            return Ok(Literal::Set(items));
        }

        let mut entries = Vec::new();
        let mut key = first;
        loop {
            self.expect(':')?;
            let value = self.value(depth + 1)?;
            entries.push((key, value));

            self.skip_whitespace();
            match self.bump() {
                Some('}') => return Ok(Literal::Dict(entries)),
                Some(',') => {
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        self.bump();
                        return Ok(Literal::Dict(entries));
                    }
                    key = self.value(depth + 1)?;
                    self.skip_whitespace();
                }
                Some(found) => {
                    return Err(LiteralError::UnexpectedChar {
                        found,
                        offset: self.pos - found.len_utf8(),
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn keyword(&mut self) -> Result<Literal> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }

        match &self.input[start..self.pos] {
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            "None" | "null" => Ok(Literal::None),
            _ => Err(LiteralError::UnexpectedChar {
                found: self.input[start..].chars().next().unwrap_or(' '),
                offset: start,
            }),
        }
    }

    fn number(&mut self) -> Result<Literal> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '-' | '+')
                && matches!(self.input[..self.pos].chars().last(), Some('e' | 'E'));
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        let digits = text.replace('_', "");
        let invalid = || LiteralError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        };

        if text.contains("__") || text.ends_with('_') {
            return Err(invalid());
        }
        if digits.contains(['.', 'e', 'E']) {
            digits
                .parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| invalid())
        } else {
            digits.parse::<i64>().map(Literal::Int).map_err(|_| invalid())
        }
    }

    /// One or more adjacent quoted strings, concatenated
    fn strings(&mut self) -> Result<Literal> {
        let mut out = self.string()?;
        loop {
            let checkpoint = self.pos;
            self.skip_whitespace();
            if matches!(self.peek(), Some('\'' | '"')) {
                out.push_str(&self.string()?);
            } else {
                self.pos = checkpoint;
                return Ok(Literal::Str(out));
            }
        }
    }

    fn string(&mut self) -> Result<String> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            let offset = self.pos;
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == quote => return Ok(out),
                Some('\n') => {
                    return Err(LiteralError::UnexpectedChar {
                        found: '\n',
                        offset,
                    });
                }
                Some('\\') => self.escape(&mut out, offset)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String, offset: usize) -> Result<()> {
        let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        match c {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(self.hex_escape(2, offset)?),
            'u' => out.push(self.hex_escape(4, offset)?),
            'U' => out.push(self.hex_escape(8, offset)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })?);
            }
            // Unknown escapes keep the backslash
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, len: usize, offset: usize) -> Result<char> {
        let end = self.pos + len;
        let digits = self
            .input
            .get(self.pos..end)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or(LiteralError::InvalidEscape { offset })?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| LiteralError::InvalidEscape { offset })?;
        self.pos = end;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })
    }
}
