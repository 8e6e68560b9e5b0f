//! # SQL Lexer
//!
//! A single-pass tokenizer over one statement of input. Identifiers are
//! borrowed slices of the input (no allocation); string literals own
//! their text because the `''` escape can rewrite it.
//!
//! ## Recognised Input
//!
//! - **Keywords**: matched case-insensitively through the phf map
//! - **Identifiers**: `[A-Za-z_][A-Za-z0-9_]*`
//! - **Integers**: decimal digits, range-checked into i64
//! - **Strings**: single-quoted, `''` escapes a quote
//! - **Operators**: `= != <> < <= > >=` and unary `-`
//! - **Punctuation**: `( ) , ; *`
//!
//! An integer that overflows i64 surfaces `IntegerOverflow`; an
//! unterminated string is `InvalidSyntax`; any other character is
//! `UnexpectedToken`.

use super::token::{Token, KEYWORDS};
use super::SqlError;

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, SqlError> {
        self.skip_whitespace();

        let Some(b) = self.peek_byte() else {
            return Ok(Token::Eof);
        };

        match b {
            b'(' => self.single(Token::LParen),
            b')' => self.single(Token::RParen),
            b',' => self.single(Token::Comma),
            b';' => self.single(Token::Semicolon),
            b'*' => self.single(Token::Star),
            b'-' => self.single(Token::Minus),
            b'=' => self.single(Token::Eq),
            b'!' => {
                if self.input.as_bytes().get(self.pos + 1) == Some(&b'=') {
                    self.pos += 2;
                    Ok(Token::NotEq)
                } else {
                    Err(SqlError::UnexpectedToken("'!'".to_string()))
                }
            }
            b'<' => match self.input.as_bytes().get(self.pos + 1) {
                Some(&b'=') => {
                    self.pos += 2;
                    Ok(Token::LtEq)
                }
                Some(&b'>') => {
                    self.pos += 2;
                    Ok(Token::NotEq)
                }
                _ => self.single(Token::Lt),
            },
            b'>' => {
                if self.input.as_bytes().get(self.pos + 1) == Some(&b'=') {
                    self.pos += 2;
                    Ok(Token::GtEq)
                } else {
                    self.single(Token::Gt)
                }
            }
            b'\'' => self.string_literal(),
            b'0'..=b'9' => self.integer_literal(),
            b if b.is_ascii_alphabetic() || b == b'_' => Ok(self.identifier()),
            other => Err(SqlError::UnexpectedToken(format!(
                "character '{}'",
                other as char
            ))),
        }
    }

    fn single(&mut self, token: Token<'a>) -> Result<Token<'a>, SqlError> {
        self.pos += 1;
        Ok(token)
    }

    fn identifier(&mut self) -> Token<'a> {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let ident = &self.input[start..self.pos];
        match KEYWORDS.get(ident.to_ascii_uppercase().as_str()) {
            Some(&kw) => Token::Keyword(kw),
            None => Token::Ident(ident),
        }
    }

    fn integer_literal(&mut self) -> Result<Token<'a>, SqlError> {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_digit() {
                self.pos += 1;
            } else {
                break;
            }
        }

        self.input[start..self.pos]
            .parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| SqlError::IntegerOverflow)
    }

    fn string_literal(&mut self) -> Result<Token<'a>, SqlError> {
        self.pos += 1;
        let mut text = String::new();

        loop {
            let Some(b) = self.peek_byte() else {
                return Err(SqlError::InvalidSyntax("unterminated string".to_string()));
            };

            if b == b'\'' {
                if self.input.as_bytes().get(self.pos + 1) == Some(&b'\'') {
                    text.push('\'');
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return Ok(Token::StringLit(text));
            }

            // Step over a full UTF-8 scalar so multi-byte text survives.
            let ch = self.input[self.pos..]
                .chars()
                .next()
                .expect("peeked byte implies a char");
            text.push(ch);
            self.pos += ch.len_utf8();
        }
    }
}
