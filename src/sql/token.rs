//! # SQL Tokens
//!
//! Token and keyword definitions for the lexer. Identifier tokens borrow
//! directly from the input string; string literals own their text because
//! the `''` escape may require rewriting.
//!
//! Keywords are matched through a compile-time perfect hash map (`phf`),
//! keyed by the uppercased identifier.

use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Delete,
    And,
    Or,
    Not,
    True,
    False,
}

pub(crate) static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "INSERT" => Keyword::Insert,
    "INTO" => Keyword::Into,
    "VALUES" => Keyword::Values,
    "SELECT" => Keyword::Select,
    "FROM" => Keyword::From,
    "WHERE" => Keyword::Where,
    "DELETE" => Keyword::Delete,
    "AND" => Keyword::And,
    "OR" => Keyword::Or,
    "NOT" => Keyword::Not,
    "TRUE" => Keyword::True,
    "FALSE" => Keyword::False,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Keyword(Keyword),
    Ident(&'a str),
    Integer(i64),
    StringLit(String),
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Minus,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Star,
    Eof,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(kw) => write!(f, "{:?}", kw),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::StringLit(s) => write!(f, "string '{}'", s),
            Token::Eq => f.write_str("'='"),
            Token::NotEq => f.write_str("'!='"),
            Token::Lt => f.write_str("'<'"),
            Token::LtEq => f.write_str("'<='"),
            Token::Gt => f.write_str("'>'"),
            Token::GtEq => f.write_str("'>='"),
            Token::Minus => f.write_str("'-'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Semicolon => f.write_str("';'"),
            Token::Star => f.write_str("'*'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
