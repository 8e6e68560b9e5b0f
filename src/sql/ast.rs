//! # SQL Abstract Syntax Tree
//!
//! Owned AST types produced by the parser. Statements are single-line and
//! tiny, so nodes own their strings outright rather than borrowing from
//! the input.
//!
//! ## Statement Types
//!
//! - `Insert`: table name plus a literal tuple
//! - `Select`: `SELECT * FROM t` with an optional WHERE expression
//! - `Delete`: `DELETE FROM t` with an optional WHERE expression
//!
//! ## Expression Types
//!
//! `Expr` is a sum over literals, column references, unary NOT and binary
//! operations; comparison operands are expressions themselves, so
//! parenthesised combinations with NOT/AND/OR compose freely. `TRUE` and
//! `FALSE` are expression-level literals only: rows store integers and
//! text, so `Boolean` never appears in a VALUES tuple.

use crate::record::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(InsertStmt),
    Select(SelectStmt),
    Delete(DeleteStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub table: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub table: String,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub table: String,
    pub filter: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Boolean(bool),
    Column(String),
    Not(Box<Expr>),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}
