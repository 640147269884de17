//! Minimal TextProto reader and writer, bridged through `serde_json::Value`
//!
//! Supports the subset of the text format the prober config uses: scalar
//! fields (`name: "value"`, numbers, bools, bare enum identifiers), nested
//! messages (`probe { ... }`, colon before the brace optional), repeated
//! fields by repetition or `[v, ...]` lists, `#` comments, and optional
//! `,`/`;` separators. The writer emits two-space-indented blocks with one
//! line per field and quoted strings throughout.

use std::fmt;

use serde_json::{Map, Number, Value};

/// Parse error with the 1-based line it occurred on
#[derive(Debug)]
pub struct TextPbError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for TextPbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for TextPbError {}

/// Parse TextProto text into a JSON value tree.
///
/// Repeated occurrences of a field collect into an array; a field that
/// appears once stays a scalar/object (the schema layer accepts both
/// shapes).
pub fn parse(input: &str) -> Result<Value, TextPbError> {
    let mut parser = Parser::new(input);
    let fields = parser.parse_message(None)?;
    Ok(Value::Object(fields))
}

/// Render a JSON value tree as TextProto.
///
/// `value` is expected to be an object at the top level; anything else
/// renders as empty output. Null values are skipped.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    if let Value::Object(fields) = value {
        write_fields(&mut out, fields, 0);
    }
    out
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn err(&self, message: impl Into<String>) -> TextPbError {
        TextPbError {
            line: self.line,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn skip_ws(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'#') => {
                    while let Some(b) = self.bump() {
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn parse_ident(&mut self) -> Result<String, TextPbError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.err("expected identifier"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    /// Parse a message body until `terminator` (or end of input for the
    /// top-level message).
    fn parse_message(&mut self, terminator: Option<u8>) -> Result<Map<String, Value>, TextPbError> {
        let mut fields = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => {
                    if terminator.is_some() {
                        return Err(self.err("unexpected end of input, expected '}'"));
                    }
                    return Ok(fields);
                }
                Some(b'}') => {
                    if terminator == Some(b'}') {
                        self.bump();
                        return Ok(fields);
                    }
                    return Err(self.err("unexpected '}'"));
                }
                _ => {}
            }

            let field = self.parse_ident()?;
            self.skip_ws();
            let value = match self.peek() {
                Some(b':') => {
                    self.bump();
                    self.skip_ws();
                    if self.peek() == Some(b'{') {
                        self.bump();
                        Value::Object(self.parse_message(Some(b'}'))?)
                    } else {
                        self.parse_scalar()?
                    }
                }
                Some(b'{') => {
                    self.bump();
                    Value::Object(self.parse_message(Some(b'}'))?)
                }
                _ => {
                    return Err(self.err(format!("expected ':' or '{{' after field `{field}`")))
                }
            };
            insert_field(&mut fields, field, value);

            self.skip_ws();
            if matches!(self.peek(), Some(b',') | Some(b';')) {
                self.bump();
            }
        }
    }

    fn parse_scalar(&mut self) -> Result<Value, TextPbError> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(b'[') => self.parse_list(),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.parse_number(),
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                let ident = self.parse_ident()?;
                Ok(match ident.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    // Bare identifiers (enum values) become strings.
                    _ => Value::String(ident),
                })
            }
            _ => Err(self.err("expected a value")),
        }
    }

    fn parse_list(&mut self) -> Result<Value, TextPbError> {
        self.bump(); // consume '['
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(self.err("unexpected end of input, expected ']'")),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(b'{') => {
                    self.bump();
                    items.push(Value::Object(self.parse_message(Some(b'}'))?));
                }
                _ => items.push(self.parse_scalar()?),
            }
            self.skip_ws();
            if self.peek() == Some(b',') {
                self.bump();
            }
        }
    }

    fn parse_string(&mut self) -> Result<Value, TextPbError> {
        let Some(quote) = self.bump() else {
            return Err(self.err("expected string literal"));
        };
        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.bump() {
                None => return Err(self.err("unterminated string literal")),
                Some(b) if b == quote => break,
                Some(b'\\') => match self.bump() {
                    Some(b'n') => out.push(b'\n'),
                    Some(b't') => out.push(b'\t'),
                    Some(b'r') => out.push(b'\r'),
                    Some(b'\\') => out.push(b'\\'),
                    Some(b'"') => out.push(b'"'),
                    Some(b'\'') => out.push(b'\''),
                    _ => return Err(self.err("invalid escape sequence in string literal")),
                },
                Some(b) => out.push(b),
            }
        }
        String::from_utf8(out)
            .map(Value::String)
            .map_err(|_| self.err("invalid UTF-8 in string literal"))
    }

    fn parse_number(&mut self) -> Result<Value, TextPbError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-') {
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(i)));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Ok(Value::Number(Number::from(u)));
        }
        let f = text
            .parse::<f64>()
            .map_err(|_| self.err(format!("invalid number `{text}`")))?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.err(format!("non-finite number `{text}`")))
    }
}

fn insert_field(fields: &mut Map<String, Value>, field: String, value: Value) {
    match fields.get_mut(&field) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(field, value);
        }
    }
}

fn write_fields(out: &mut String, fields: &Map<String, Value>, indent: usize) {
    for (field, value) in fields {
        write_field(out, field, value, indent);
    }
}

fn write_field(out: &mut String, field: &str, value: &Value, indent: usize) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                write_field(out, field, item, indent);
            }
        }
        Value::Object(fields) => {
            push_indent(out, indent);
            out.push_str(field);
            out.push_str(" {\n");
            write_fields(out, fields, indent + 1);
            push_indent(out, indent);
            out.push_str("}\n");
        }
        scalar => {
            push_indent(out, indent);
            out.push_str(field);
            out.push_str(": ");
            write_scalar(out, scalar);
            out.push('\n');
        }
    }
}

fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    '\r' => out.push_str("\\r"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        _ => {}
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}
