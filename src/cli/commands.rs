//! # Dot Command Handling
//!
//! Dispatches the REPL's dot commands. Unlike SQL statements, dot
//! commands execute immediately without a terminating semicolon.

use crate::database::Database;

pub enum CommandResult {
    Exit,
    Output(String),
    Error(String),
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn execute(db: &mut Database, line: &str) -> CommandResult {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            ".quit" | ".exit" | ".q" => CommandResult::Exit,
            ".help" | ".h" | ".?" => CommandResult::Output(help_text()),
            ".stats" => stats(db),
            ".flush" => flush(db),
            _ => CommandResult::Error(format!(
                "Unknown command: {}. Type .help for available commands.",
                cmd
            )),
        }
    }
}

fn help_text() -> String {
    r#"ZetaDB CLI Commands:

  .quit, .exit, .q     Exit the CLI
  .help, .h, .?        Show this help message
  .stats               Show key count and index height
  .flush               Write dirty pages to disk

SQL statements end with a semicolon (;):

  INSERT INTO t VALUES(1, 'alice');
  SELECT * FROM t WHERE c0 = 1;
  DELETE FROM t WHERE c1 = 'alice';

Columns are addressed positionally as c0, c1, ... and the first integer
column of an inserted row is its primary key."#
        .to_string()
}

fn stats(db: &Database) -> CommandResult {
    CommandResult::Output(format!(
        "keys: {}\nindex height: {}",
        db.len(),
        db.index_height()
    ))
}

fn flush(db: &mut Database) -> CommandResult {
    match db.flush() {
        Ok(()) => CommandResult::Output("Flushed.".to_string()),
        Err(err) => CommandResult::Error(format!("flush failed: {}", err)),
    }
}
