//! Parser for the schema export text.
//!
//! Produces a JSON object that [`Schema::define`](super::Schema::define)
//! accepts. Blocks are returned as written: colors keep their `mode` marker
//! and vectors their `type`/`data` tags, so plain blocks stay nested schemas.

use serde_json::{Map, Number, Value as JsonValue};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("{line}:{column}: expected {expected}")]
    Expected {
        expected: &'static str,
        line: usize,
        column: usize,
    },
    #[error("{line}:{column}: number '{text}' cannot be imported")]
    Number {
        text: String,
        line: usize,
        column: usize,
    },
    #[error("{line}:{column}: unexpected trailing input")]
    Trailing { line: usize, column: usize },
}

pub fn parse_export(text: &str) -> Result<Map<String, JsonValue>, ImportError> {
    let mut p = Parser::new(text);
    p.skip_ws();
    let block = p.block()?;
    p.skip_ws();
    if p.peek().is_some() {
        return Err(p.trailing());
    }
    Ok(block)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expected(&self, expected: &'static str) -> ImportError {
        ImportError::Expected {
            expected,
            line: self.line,
            column: self.column,
        }
    }

    fn trailing(&self) -> ImportError {
        ImportError::Trailing {
            line: self.line,
            column: self.column,
        }
    }

    fn eat(&mut self, ch: char, expected: &'static str) -> Result<(), ImportError> {
        if self.peek() == Some(ch) {
            self.bump();
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn block(&mut self) -> Result<Map<String, JsonValue>, ImportError> {
        self.eat('{', "'{'")?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(map);
                }
                None => return Err(self.expected("'}'")),
                Some(_) => {}
            }
            let key = self.key()?;
            self.skip_ws();
            self.eat(':', "':'")?;
            self.skip_ws();
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            if self.peek() == Some(',') {
                self.bump();
            }
        }
    }

    fn key(&mut self) -> Result<String, ImportError> {
        let mut key = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == ':' {
                break;
            }
            key.push(ch);
            self.bump();
        }
        if key.is_empty() {
            Err(self.expected("attribute name"))
        } else {
            Ok(key)
        }
    }

    fn value(&mut self) -> Result<JsonValue, ImportError> {
        match self.peek() {
            Some('{') => self.block().map(JsonValue::Object),
            Some('\'') => self.quoted().map(JsonValue::String),
            Some(_) => self.bare(),
            None => Err(self.expected("value")),
        }
    }

    fn quoted(&mut self) -> Result<String, ImportError> {
        self.eat('\'', "quote")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(ch) => out.push(ch),
                    None => return Err(self.expected("escaped character")),
                },
                Some(ch) => out.push(ch),
                None => return Err(self.expected("closing quote")),
            }
        }
    }

    fn bare(&mut self) -> Result<JsonValue, ImportError> {
        let (line, column) = (self.line, self.column);
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == ',' || ch == '}' {
                break;
            }
            token.push(ch);
            self.bump();
        }
        match token.as_str() {
            "" => Err(self.expected("value")),
            "true" => Ok(JsonValue::Bool(true)),
            "false" => Ok(JsonValue::Bool(false)),
            _ => token
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(JsonValue::Number)
                .ok_or(ImportError::Number {
                    text: token,
                    line,
                    column,
                }),
        }
    }
}
