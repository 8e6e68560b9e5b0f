//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop for the ZetaDB CLI. Handles:
//!
//! - Reading input with rustyline (history, line editing)
//! - Dispatching dot commands vs SQL statements
//! - Executing SQL and formatting results
//! - Multi-line statement handling
//!
//! ## Input Handling
//!
//! The REPL distinguishes between:
//! - Dot commands: start with `.`, executed immediately
//! - SQL statements: accumulated until `;` is encountered
//!
//! Multi-line SQL is supported; the prompt changes from `zetadb>` to
//! `    ->` in continuation mode, and Ctrl+C cancels the buffer.
//!
//! ## Error Handling
//!
//! SQL errors are displayed but do not terminate the REPL. Use `.exit`
//! or Ctrl+D to leave; the database is flushed and closed on the way
//! out.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::cli::table::TableFormatter;
use crate::database::Database;
use crate::sql::{self, ExecuteResult};

const PRIMARY_PROMPT: &str = "zetadb> ";
const CONTINUATION_PROMPT: &str = "    -> ";

pub struct Repl {
    db: Database,
    editor: DefaultEditor,
    sql_buffer: String,
}

impl Repl {
    pub fn new(db: Database) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            db,
            editor,
            sql_buffer: String::new(),
        })
    }

    pub fn run(mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = if self.sql_buffer.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.sql_buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        if let Some(history_file) = history_path() {
            let _ = self.editor.save_history(&history_file);
        }

        if let Err(err) = self.db.flush() {
            eprintln!("Error: final flush failed: {}", err);
        }
        self.db.close();
        Ok(())
    }

    /// Returns false when the REPL should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }

        if self.sql_buffer.is_empty() && trimmed.starts_with('.') {
            let _ = self.editor.add_history_entry(trimmed);
            return self.handle_command(trimmed);
        }

        if !self.sql_buffer.is_empty() {
            self.sql_buffer.push(' ');
        }
        self.sql_buffer.push_str(trimmed);

        if self.sql_buffer.ends_with(';') {
            let statement = std::mem::take(&mut self.sql_buffer);
            let _ = self.editor.add_history_entry(&statement);
            self.execute_sql(&statement);
        }
        true
    }

    fn handle_command(&mut self, line: &str) -> bool {
        match CommandHandler::execute(&mut self.db, line) {
            CommandResult::Exit => {
                println!("Bye");
                false
            }
            CommandResult::Output(text) => {
                println!("{}", text);
                true
            }
            CommandResult::Error(message) => {
                eprintln!("Error: {}", message);
                true
            }
        }
    }

    fn execute_sql(&mut self, statement: &str) {
        let result = sql::parse(statement).and_then(|stmt| sql::execute(&mut self.db, stmt));

        match result {
            Ok(ExecuteResult::Inserted) => println!("OK"),
            Ok(ExecuteResult::Deleted(n)) => {
                println!("{} row{} deleted", n, if n == 1 { "" } else { "s" })
            }
            Ok(ExecuteResult::Rows(rows)) => {
                let formatter = TableFormatter::new(&rows);
                print!("{}", formatter.render());
                let n = formatter.row_count();
                println!("{} row{} in set", n, if n == 1 { "" } else { "s" });
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    fn print_welcome(&self) {
        println!("ZetaDB {}", env!("CARGO_PKG_VERSION"));
        println!("Type .help for usage, .exit to leave.");
    }
}
