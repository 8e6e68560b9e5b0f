//! # SQL Parser
//!
//! A recursive descent parser over the lexer's token stream, producing one
//! [`Statement`] per input line. The grammar is the engine's minimal SQL
//! surface:
//!
//! ```text
//! statement  := insert | select | delete
//! insert     := INSERT INTO ident VALUES '(' literal (',' literal)* ')' ';'
//! select     := SELECT '*' FROM ident (WHERE expr)? ';'
//! delete     := DELETE FROM ident (WHERE expr)? ';'
//! expr       := and_expr (OR and_expr)*
//! and_expr   := not_expr (AND not_expr)*
//! not_expr   := NOT not_expr | comparison
//! comparison := primary (('=' | '!=' | '<' | '<=' | '>' | '>=') primary)?
//! primary    := literal | TRUE | FALSE | ident | '(' expr ')'
//! literal    := integer | '-' integer | string
//! ```
//!
//! OR binds loosest, then AND, then prefix NOT (the tightest-binding
//! unary operator), then the comparison operators, so `NOT c0 = 1` negates
//! the whole comparison. Parentheses override as usual. Anything after
//! the terminating semicolon is an error.

use super::ast::{BinaryOp, DeleteStmt, Expr, InsertStmt, SelectStmt, Statement};
use super::lexer::Lexer;
use super::token::{Keyword, Token};
use super::SqlError;
use crate::record::Value;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
}

/// Parses a single semicolon-terminated statement.
pub fn parse(input: &str) -> Result<Statement, SqlError> {
    Parser::new(input)?.parse_statement()
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, SqlError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    pub fn parse_statement(&mut self) -> Result<Statement, SqlError> {
        let statement = match self.current {
            Token::Keyword(Keyword::Insert) => self.parse_insert()?,
            Token::Keyword(Keyword::Select) => self.parse_select()?,
            Token::Keyword(Keyword::Delete) => self.parse_delete()?,
            ref other => {
                return Err(SqlError::UnexpectedToken(format!(
                    "expected INSERT, SELECT or DELETE, found {}",
                    other
                )))
            }
        };

        self.expect(Token::Semicolon)?;
        self.expect(Token::Eof)?;
        Ok(statement)
    }

    fn parse_insert(&mut self) -> Result<Statement, SqlError> {
        self.expect(Token::Keyword(Keyword::Insert))?;
        self.expect(Token::Keyword(Keyword::Into))?;
        let table = self.expect_ident()?;
        self.expect(Token::Keyword(Keyword::Values))?;
        self.expect(Token::LParen)?;

        let mut values = vec![self.parse_literal()?];
        while self.current == Token::Comma {
            self.advance()?;
            values.push(self.parse_literal()?);
        }
        self.expect(Token::RParen)?;

        Ok(Statement::Insert(InsertStmt { table, values }))
    }

    fn parse_select(&mut self) -> Result<Statement, SqlError> {
        self.expect(Token::Keyword(Keyword::Select))?;
        self.expect(Token::Star)?;
        self.expect(Token::Keyword(Keyword::From))?;
        let table = self.expect_ident()?;
        let filter = self.parse_optional_filter()?;

        Ok(Statement::Select(SelectStmt { table, filter }))
    }

    fn parse_delete(&mut self) -> Result<Statement, SqlError> {
        self.expect(Token::Keyword(Keyword::Delete))?;
        self.expect(Token::Keyword(Keyword::From))?;
        let table = self.expect_ident()?;
        let filter = self.parse_optional_filter()?;

        Ok(Statement::Delete(DeleteStmt { table, filter }))
    }

    fn parse_optional_filter(&mut self) -> Result<Option<Expr>, SqlError> {
        if self.current == Token::Keyword(Keyword::Where) {
            self.advance()?;
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, SqlError> {
        let mut left = self.parse_and_expr()?;
        while self.current == Token::Keyword(Keyword::Or) {
            self.advance()?;
            let right = self.parse_and_expr()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::Or,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<Expr, SqlError> {
        let mut left = self.parse_not_expr()?;
        while self.current == Token::Keyword(Keyword::And) {
            self.advance()?;
            let right = self.parse_not_expr()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::And,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_not_expr(&mut self) -> Result<Expr, SqlError> {
        if self.current == Token::Keyword(Keyword::Not) {
            self.advance()?;
            let inner = self.parse_not_expr()?;
            Ok(Expr::Not(Box::new(inner)))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, SqlError> {
        let left = self.parse_primary()?;

        let op = match self.current {
            Token::Eq => BinaryOp::Eq,
            Token::NotEq => BinaryOp::NotEq,
            Token::Lt => BinaryOp::Lt,
            Token::LtEq => BinaryOp::LtEq,
            Token::Gt => BinaryOp::Gt,
            Token::GtEq => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.advance()?;

        let right = self.parse_primary()?;
        Ok(Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, SqlError> {
        match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Ident(name) => {
                let expr = Expr::Column(name.to_string());
                self.current = self.lexer.next_token()?;
                Ok(expr)
            }
            Token::Keyword(Keyword::True) => {
                self.current = self.lexer.next_token()?;
                Ok(Expr::Boolean(true))
            }
            Token::Keyword(Keyword::False) => {
                self.current = self.lexer.next_token()?;
                Ok(Expr::Boolean(false))
            }
            Token::LParen => {
                self.current = self.lexer.next_token()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => {
                self.current = other;
                Ok(Expr::Literal(self.parse_literal()?))
            }
        }
    }

    fn parse_literal(&mut self) -> Result<Value, SqlError> {
        match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Integer(n) => {
                self.current = self.lexer.next_token()?;
                Ok(Value::Integer(n))
            }
            Token::Minus => {
                self.current = self.lexer.next_token()?;
                match std::mem::replace(&mut self.current, Token::Eof) {
                    Token::Integer(n) => {
                        self.current = self.lexer.next_token()?;
                        Ok(Value::Integer(-n))
                    }
                    other => {
                        let message = format!("expected integer after '-', found {}", other);
                        self.current = other;
                        Err(SqlError::UnexpectedToken(message))
                    }
                }
            }
            Token::StringLit(s) => {
                self.current = self.lexer.next_token()?;
                Ok(Value::Text(s))
            }
            other => {
                let message = format!("expected a literal, found {}", other);
                self.current = other;
                Err(SqlError::UnexpectedToken(message))
            }
        }
    }

    fn advance(&mut self) -> Result<(), SqlError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, token: Token<'_>) -> Result<(), SqlError> {
        if self.current == token {
            if self.current != Token::Eof {
                self.advance()?;
            }
            Ok(())
        } else {
            Err(SqlError::UnexpectedToken(format!(
                "expected {}, found {}",
                token, self.current
            )))
        }
    }

    fn expect_ident(&mut self) -> Result<String, SqlError> {
        match self.current {
            Token::Ident(name) => {
                let name = name.to_string();
                self.advance()?;
                Ok(name)
            }
            ref other => Err(SqlError::UnexpectedToken(format!(
                "expected an identifier, found {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_insert_with_mixed_literals() {
        let stmt = parse("INSERT INTO t VALUES(1, 'alice', -7);").unwrap();

        assert_eq!(
            stmt,
            Statement::Insert(InsertStmt {
                table: "t".to_string(),
                values: vec![
                    Value::Integer(1),
                    Value::Text("alice".to_string()),
                    Value::Integer(-7),
                ],
            })
        );
    }

    #[test]
    fn parses_bare_select() {
        let stmt = parse("SELECT * FROM t;").unwrap();

        assert_eq!(
            stmt,
            Statement::Select(SelectStmt {
                table: "t".to_string(),
                filter: None,
            })
        );
    }

    #[test]
    fn parses_select_with_comparison() {
        let stmt = parse("SELECT * FROM t WHERE c0 >= 10;").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        assert_eq!(
            select.filter,
            Some(Expr::Binary {
                left: Box::new(Expr::Column("c0".to_string())),
                op: BinaryOp::GtEq,
                right: Box::new(Expr::Literal(Value::Integer(10))),
            })
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let stmt = parse("SELECT * FROM t WHERE c0 = 1 OR c0 = 2 AND c1 = 'x';").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        let Some(Expr::Binary { op, right, .. }) = select.filter else {
            panic!("expected a binary filter");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        ));
    }

    #[test]
    fn parentheses_override_precedence() {
        let stmt = parse("SELECT * FROM t WHERE (c0 = 1 OR c0 = 2) AND c1 = 'x';").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        let Some(Expr::Binary { op, left, .. }) = select.filter else {
            panic!("expected a binary filter");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(*left, Expr::Binary { op: BinaryOp::Or, .. }));
    }

    #[test]
    fn not_negates_the_whole_comparison() {
        let stmt = parse("SELECT * FROM t WHERE NOT c0 = 1;").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        assert_eq!(
            select.filter,
            Some(Expr::Not(Box::new(Expr::Binary {
                left: Box::new(Expr::Column("c0".to_string())),
                op: BinaryOp::Eq,
                right: Box::new(Expr::Literal(Value::Integer(1))),
            })))
        );
    }

    #[test]
    fn not_binds_tighter_than_and() {
        let stmt = parse("SELECT * FROM t WHERE NOT c0 = 1 AND c1 = 'x';").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        let Some(Expr::Binary { op, left, .. }) = select.filter else {
            panic!("expected a binary filter");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(*left, Expr::Not(_)));
    }

    #[test]
    fn double_not_nests() {
        let stmt = parse("SELECT * FROM t WHERE NOT NOT TRUE;").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        assert_eq!(
            select.filter,
            Some(Expr::Not(Box::new(Expr::Not(Box::new(Expr::Boolean(
                true
            ))))))
        );
    }

    #[test]
    fn boolean_literals_parse_in_filters() {
        let stmt = parse("SELECT * FROM t WHERE FALSE OR c0 = 2;").unwrap();

        let Statement::Select(select) = stmt else {
            panic!("expected a select");
        };
        let Some(Expr::Binary { op, left, .. }) = select.filter else {
            panic!("expected a binary filter");
        };
        assert_eq!(op, BinaryOp::Or);
        assert_eq!(*left, Expr::Boolean(false));
    }

    #[test]
    fn parses_delete_with_filter() {
        let stmt = parse("DELETE FROM t WHERE c0 = 4;").unwrap();

        assert!(matches!(
            stmt,
            Statement::Delete(DeleteStmt { filter: Some(_), .. })
        ));
    }

    #[test]
    fn missing_semicolon_is_rejected() {
        let err = parse("SELECT * FROM t").unwrap_err();
        assert!(matches!(err, SqlError::UnexpectedToken(_)));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse("SELECT * FROM t; SELECT").unwrap_err();
        assert!(matches!(err, SqlError::UnexpectedToken(_)));
    }

    #[test]
    fn empty_values_list_is_rejected() {
        let err = parse("INSERT INTO t VALUES();").unwrap_err();
        assert!(matches!(err, SqlError::UnexpectedToken(_)));
    }

    #[test]
    fn unknown_statement_is_rejected() {
        let err = parse("UPDATE t;").unwrap_err();
        assert!(matches!(err, SqlError::UnexpectedToken(_)));
    }

    #[test]
    fn integer_overflow_propagates_from_the_lexer() {
        let err = parse("INSERT INTO t VALUES(99999999999999999999);").unwrap_err();
        assert!(matches!(err, SqlError::IntegerOverflow));
    }
}
