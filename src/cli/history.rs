//! # History File Management
//!
//! Resolves the location of the REPL history file. By default history is
//! stored in `~/.zetadb_history`; the `ZETADB_HISTORY` environment
//! variable overrides the path, and setting it to an empty string
//! disables persistence. rustyline handles the actual file I/O.

use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".zetadb_history";
const HISTORY_ENV_VAR: &str = "ZETADB_HISTORY";

pub fn history_path() -> Option<PathBuf> {
    if let Ok(custom_path) = env::var(HISTORY_ENV_VAR) {
        if custom_path.is_empty() {
            return None;
        }
        return Some(PathBuf::from(custom_path));
    }

    env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_HISTORY_FILE))
}
