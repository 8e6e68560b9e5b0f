//! # ZetaDB CLI Entry Point
//!
//! Binary entry point for the ZetaDB command-line interface.
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a database
//! zetadb ./my.zdb
//!
//! # Show version
//! zetadb --version
//!
//! # Show help
//! zetadb --help
//! ```
//!
//! Logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=zetadb=debug`).

use eyre::{bail, Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zetadb::cli::Repl;
use zetadb::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let mut db_path: Option<PathBuf> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("zetadb {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            arg => {
                if db_path.is_some() {
                    bail!("Multiple database paths given");
                }
                db_path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(path) = db_path else {
        print_usage();
        return Ok(());
    };

    let db = Database::open(&path)
        .wrap_err_with(|| format!("failed to open database at {:?}", path))?;

    Repl::new(db)?.run()
}

fn print_usage() {
    println!("Usage: zetadb [OPTIONS] <DB_PATH>");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message");
    println!("  -v, --version    Show version information");
    println!();
    println!("Opens the database at DB_PATH (creating it if missing) and");
    println!("starts an interactive SQL shell. The write-ahead log lives");
    println!("next to the data file with a .wal suffix.");
}
