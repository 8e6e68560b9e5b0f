//! # Execution VM
//!
//! Runs parsed statements against the [`Database`] facade. The engine
//! exposes one implicit table; whatever name the statement uses is
//! accepted. Columns are addressed positionally as `c0`, `c1`, ... and an
//! unknown column name in a WHERE clause is `ColumnNotFound`.
//!
//! ## INSERT
//!
//! The primary key is the first `Integer` in the VALUES tuple: absent is
//! `MissingPrimaryKey`, negative is `InvalidPrimaryKey`. The tuple is
//! serialised with the row codec and stored under that key, so re-inserting
//! a key overwrites the previous row.
//!
//! ## SELECT / DELETE
//!
//! A WHERE clause of exactly `c0 = <non-negative integer>` takes the
//! point-lookup path: an integer first column is by definition the primary
//! key, so the row (if any) lives under that key. Every other filter walks
//! the index cursor, decodes each row and evaluates the predicate.
//! DELETE collects the matching keys during the scan, then removes them.
//!
//! ## Predicate Evaluation
//!
//! Comparisons are typed: integer against integer, text against text
//! (lexicographic). A type mismatch or a reference past the end of a row
//! makes the comparison false rather than an error. `TRUE` and `FALSE`
//! are boolean literals; NOT/AND/OR require boolean operands and the
//! filter as a whole must be boolean; anything else is `InvalidSyntax`.

use crate::database::Database;
use crate::record::{decode_row, encode_row, Value};

use super::ast::{BinaryOp, DeleteStmt, Expr, InsertStmt, SelectStmt, Statement};
use super::SqlError;

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Inserted,
    Deleted(usize),
    Rows(Vec<Vec<Value>>),
}

pub fn execute(db: &mut Database, statement: Statement) -> Result<ExecuteResult, SqlError> {
    match statement {
        Statement::Insert(insert) => execute_insert(db, insert),
        Statement::Select(select) => execute_select(db, select),
        Statement::Delete(delete) => execute_delete(db, delete),
    }
}

fn execute_insert(db: &mut Database, insert: InsertStmt) -> Result<ExecuteResult, SqlError> {
    let key = primary_key(&insert.values)?;
    let row = encode_row(&insert.values)?;
    db.set(key, &row)?;
    Ok(ExecuteResult::Inserted)
}

fn execute_select(db: &mut Database, select: SelectStmt) -> Result<ExecuteResult, SqlError> {
    if let Some(filter) = &select.filter {
        validate_columns(filter)?;

        if let Some(key) = key_point_lookup(filter) {
            let mut rows = Vec::new();
            if let Some(bytes) = db.get(key)? {
                let row = decode_row(&bytes)?;
                if eval_filter(filter, &row)? {
                    rows.push(row);
                }
            }
            return Ok(ExecuteResult::Rows(rows));
        }
    }

    let mut rows = Vec::new();
    let mut eval_error = None;
    db.scan(|_key, bytes| {
        if eval_error.is_some() {
            return Ok(());
        }
        match filter_row(select.filter.as_ref(), bytes) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(err) => eval_error = Some(err),
        }
        Ok(())
    })?;

    match eval_error {
        Some(err) => Err(err),
        None => Ok(ExecuteResult::Rows(rows)),
    }
}

fn execute_delete(db: &mut Database, delete: DeleteStmt) -> Result<ExecuteResult, SqlError> {
    if let Some(filter) = &delete.filter {
        validate_columns(filter)?;

        if let Some(key) = key_point_lookup(filter) {
            let mut removed = 0;
            if let Some(bytes) = db.get(key)? {
                let row = decode_row(&bytes)?;
                if eval_filter(filter, &row)? {
                    db.delete(key)?;
                    removed = 1;
                }
            }
            return Ok(ExecuteResult::Deleted(removed));
        }
    }

    let mut keys = Vec::new();
    let mut eval_error = None;
    db.scan(|key, bytes| {
        if eval_error.is_some() {
            return Ok(());
        }
        match filter_row(delete.filter.as_ref(), bytes) {
            Ok(Some(_)) => keys.push(key),
            Ok(None) => {}
            Err(err) => eval_error = Some(err),
        }
        Ok(())
    })?;
    if let Some(err) = eval_error {
        return Err(err);
    }

    for &key in &keys {
        db.delete(key)?;
    }
    Ok(ExecuteResult::Deleted(keys.len()))
}

/// The first integer in the tuple is the primary key.
fn primary_key(values: &[Value]) -> Result<u64, SqlError> {
    for value in values {
        if let Value::Integer(n) = value {
            if *n < 0 {
                return Err(SqlError::InvalidPrimaryKey(*n));
            }
            return Ok(*n as u64);
        }
    }
    Err(SqlError::MissingPrimaryKey)
}

/// Resolves a positional column name (`c0`, `c1`, ...) to its index.
fn column_index(name: &str) -> Result<usize, SqlError> {
    name.strip_prefix('c')
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|rest| rest.parse().ok())
        .ok_or_else(|| SqlError::ColumnNotFound(name.to_string()))
}

/// Rejects unknown column names before any row is touched, so the error
/// surfaces even on an empty table.
fn validate_columns(expr: &Expr) -> Result<(), SqlError> {
    match expr {
        Expr::Literal(_) | Expr::Boolean(_) => Ok(()),
        Expr::Column(name) => column_index(name).map(|_| ()),
        Expr::Not(inner) => validate_columns(inner),
        Expr::Binary { left, right, .. } => {
            validate_columns(left)?;
            validate_columns(right)
        }
    }
}

/// Matches the `c0 = <non-negative integer>` shape, in either operand
/// order, for the point-lookup path.
fn key_point_lookup(expr: &Expr) -> Option<u64> {
    let Expr::Binary { left, op, right } = expr else {
        return None;
    };
    if *op != BinaryOp::Eq {
        return None;
    }

    let (column, literal) = match (left.as_ref(), right.as_ref()) {
        (Expr::Column(name), Expr::Literal(value)) => (name, value),
        (Expr::Literal(value), Expr::Column(name)) => (name, value),
        _ => return None,
    };

    match (column.as_str(), literal) {
        ("c0", Value::Integer(n)) if *n >= 0 => Some(*n as u64),
        _ => None,
    }
}

fn filter_row(filter: Option<&Expr>, bytes: &[u8]) -> Result<Option<Vec<Value>>, SqlError> {
    let row = decode_row(bytes)?;
    match filter {
        Some(expr) if !eval_filter(expr, &row)? => Ok(None),
        _ => Ok(Some(row)),
    }
}

fn eval_filter(expr: &Expr, row: &[Value]) -> Result<bool, SqlError> {
    match eval(expr, row)? {
        Evaluated::Bool(b) => Ok(b),
        _ => Err(SqlError::InvalidSyntax(
            "WHERE clause must be a boolean expression".to_string(),
        )),
    }
}

enum Evaluated {
    Bool(bool),
    Value(Value),
    Missing,
}

fn eval(expr: &Expr, row: &[Value]) -> Result<Evaluated, SqlError> {
    match expr {
        Expr::Literal(value) => Ok(Evaluated::Value(value.clone())),
        Expr::Boolean(b) => Ok(Evaluated::Bool(*b)),
        Expr::Column(name) => {
            let index = column_index(name)?;
            Ok(match row.get(index) {
                Some(value) => Evaluated::Value(value.clone()),
                None => Evaluated::Missing,
            })
        }
        Expr::Not(inner) => match eval(inner, row)? {
            Evaluated::Bool(b) => Ok(Evaluated::Bool(!b)),
            _ => Err(SqlError::InvalidSyntax(
                "NOT operand must be boolean".to_string(),
            )),
        },
        Expr::Binary { left, op, right } => {
            let left = eval(left, row)?;
            let right = eval(right, row)?;
            match op {
                BinaryOp::And | BinaryOp::Or => {
                    let (Evaluated::Bool(l), Evaluated::Bool(r)) = (left, right) else {
                        return Err(SqlError::InvalidSyntax(
                            "AND/OR operands must be boolean".to_string(),
                        ));
                    };
                    Ok(Evaluated::Bool(match op {
                        BinaryOp::And => l && r,
                        _ => l || r,
                    }))
                }
                _ => Ok(Evaluated::Bool(compare(*op, left, right))),
            }
        }
    }
}

/// Typed comparison: mismatched types and missing columns are false.
fn compare(op: BinaryOp, left: Evaluated, right: Evaluated) -> bool {
    let ordering = match (left, right) {
        (Evaluated::Value(Value::Integer(l)), Evaluated::Value(Value::Integer(r))) => l.cmp(&r),
        (Evaluated::Value(Value::Text(l)), Evaluated::Value(Value::Text(r))) => l.cmp(&r),
        _ => return false,
    };

    match op {
        BinaryOp::Eq => ordering.is_eq(),
        BinaryOp::NotEq => ordering.is_ne(),
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled before compare"),
    }
}
