//! Strict parser for the model's quiz reply.
//!
//! The prompt asks for a Python list literal with single-quoted keys, which
//! is not valid JSON, so the reply is parsed with a small recursive-descent
//! grammar over Python literal syntax (strings in either quote style,
//! lists, dicts, numbers, True/False/None). Nothing is ever evaluated.
//!
//! The two error kinds drive different recovery policies upstream: a
//! `Syntax` error means the reply was cut off or garbled and the whole
//! completion round-trip may be retried; a `Structure` error means the
//! reply parsed cleanly but is not a list of well-shaped question records,
//! which is fatal for the request.

use thiserror::Error;

use crate::models::domain::QuizQuestion;

#[derive(Debug, Error)]
pub enum QuizReplyError {
    #[error("malformed reply at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("reply has the wrong shape: {0}")]
    Structure(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "a string",
            Literal::Int(_) => "an integer",
            Literal::Float(_) => "a float",
            Literal::Bool(_) => "a boolean",
            Literal::None => "None",
            Literal::List(_) => "a list",
            Literal::Dict(_) => "a mapping",
        }
    }
}

/// Parse a completion's raw text into quiz questions.
pub fn parse_quiz_reply(raw: &str) -> Result<Vec<QuizQuestion>, QuizReplyError> {
    let mut parser = Parser::new(raw);
    parser.skip_whitespace();
    let literal = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }

    questions_from_literal(literal)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> QuizReplyError {
        QuizReplyError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), QuizReplyError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, QuizReplyError> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('[') => self.parse_list(),
            Some('{') => self.parse_dict(),
            Some('\'') | Some('"') => self.parse_string().map(Literal::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    fn parse_string(&mut self) -> Result<String, QuizReplyError> {
        let quote = match self.bump() {
            Some(c) => c,
            None => return Err(self.error("unexpected end of input")),
        };
        let mut out = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => match self.bump() {
                    None => return Err(self.error("unterminated escape sequence")),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    // Covers \\ \' \" and passes anything else through,
                    // matching Python's tolerance for unknown escapes.
                    Some(other) => out.push(other),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal, QuizReplyError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !is_float {
                is_float = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            text.parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| self.error(format!("invalid number '{text}'")))
        } else {
            text.parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| self.error(format!("invalid number '{text}'")))
        }
    }

    fn parse_keyword(&mut self) -> Result<Literal, QuizReplyError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }

        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => Err(self.error(format!("unexpected identifier '{word}'"))),
        }
    }

    fn parse_list(&mut self) -> Result<Literal, QuizReplyError> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Literal::List(items));
            }

            items.push(self.parse_value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(']') => {
                    self.pos += 1;
                    return Ok(Literal::List(items));
                }
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated list")),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Literal, QuizReplyError> {
        self.expect('{')?;
        let mut entries = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Literal::Dict(entries));
            }

            let key = self.parse_value()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => {
                    self.pos += 1;
                    return Ok(Literal::Dict(entries));
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated mapping")),
            }
        }
    }
}

fn questions_from_literal(literal: Literal) -> Result<Vec<QuizQuestion>, QuizReplyError> {
    let items = match literal {
        Literal::List(items) => items,
        other => {
            return Err(QuizReplyError::Structure(format!(
                "expected a list of questions, found {}",
                other.kind()
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| question_from_literal(index, item))
        .collect()
}

fn question_from_literal(index: usize, item: Literal) -> Result<QuizQuestion, QuizReplyError> {
    let entries = match item {
        Literal::Dict(entries) => entries,
        other => {
            return Err(QuizReplyError::Structure(format!(
                "question {index} is {}, not a mapping",
                other.kind()
            )))
        }
    };

    let mut question = None;
    let mut options = None;
    let mut answer = None;

    for (key, value) in entries {
        let key = match key {
            Literal::Str(key) => key,
            other => {
                return Err(QuizReplyError::Structure(format!(
                    "question {index} has {} as a key",
                    other.kind()
                )))
            }
        };

        match key.as_str() {
            "question" => question = Some(expect_string(index, "question", value)?),
            "options" => options = Some(expect_string_list(index, value)?),
            "answer" => answer = Some(expect_string(index, "answer", value)?),
            // Extra keys in the reply are dropped.
            _ => {}
        }
    }

    Ok(QuizQuestion {
        question: question.ok_or_else(|| missing_field(index, "question"))?,
        options: options.ok_or_else(|| missing_field(index, "options"))?,
        answer: answer.ok_or_else(|| missing_field(index, "answer"))?,
    })
}

fn expect_string(index: usize, field: &str, value: Literal) -> Result<String, QuizReplyError> {
    match value {
        Literal::Str(s) => Ok(s),
        other => Err(QuizReplyError::Structure(format!(
            "question {index} field '{field}' is {}, not a string",
            other.kind()
        ))),
    }
}

fn expect_string_list(index: usize, value: Literal) -> Result<Vec<String>, QuizReplyError> {
    let items = match value {
        Literal::List(items) => items,
        other => {
            return Err(QuizReplyError::Structure(format!(
                "question {index} field 'options' is {}, not a list",
                other.kind()
            )))
        }
    };

    items
        .into_iter()
        .map(|item| expect_string(index, "options", item))
        .collect()
}

fn missing_field(index: usize, field: &str) -> QuizReplyError {
    QuizReplyError::Structure(format!("question {index} is missing '{field}'"))
}
