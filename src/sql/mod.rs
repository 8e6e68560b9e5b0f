//! # SQL Layer
//!
//! The minimal SQL surface over the database facade: a zero-copy lexer, a
//! recursive descent parser producing an owned [`Statement`](ast::Statement)
//! AST, and the execution VM that runs INSERT/SELECT/DELETE through the
//! key/value API.
//!
//! ```text
//! "INSERT INTO t VALUES(1, 'alice');"
//!        │ lexer
//!        ▼
//! [Keyword(Insert), Keyword(Into), Ident("t"), ...]
//!        │ parser
//!        ▼
//! Statement::Insert { table: "t", values: [1, "alice"] }
//!        │ executor
//!        ▼
//! Database::set(1, <encoded row>)
//! ```
//!
//! ## Module Organization
//!
//! - `token`: token and keyword definitions
//! - `lexer`: single-pass tokenizer
//! - `ast`: statement and expression types
//! - `parser`: recursive descent grammar
//! - `executor`: the VM over the facade

pub mod ast;
mod executor;
mod lexer;
mod parser;
mod token;

pub use executor::{execute, ExecuteResult};
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use token::{Keyword, Token};

use thiserror::Error;

use crate::error::StorageError;

/// Errors surfaced by the SQL layer.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A token that does not fit the grammar at this position.
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    /// Structurally invalid input (unterminated string, non-boolean
    /// filter, ...).
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    /// An integer literal that does not fit a 64-bit signed integer.
    #[error("integer literal out of range")]
    IntegerOverflow,

    /// A WHERE clause referencing a column the table does not have.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// An INSERT tuple with no integer column to serve as the key.
    #[error("INSERT requires an integer primary key column")]
    MissingPrimaryKey,

    /// An INSERT whose key column is negative.
    #[error("primary key must be non-negative, got {0}")]
    InvalidPrimaryKey(i64),

    /// A storage failure underneath the VM.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
