//! # ZetaDB - Embedded Key/Value Storage Engine
//!
//! ZetaDB is an embedded, single-process key/value storage engine with a
//! minimal SQL surface. The persistent core is four tightly coupled
//! subsystems:
//!
//! - **Slotted pages**: fixed 4096-byte pages with a record heap growing
//!   up and a slot table growing down
//! - **Pager**: a pinned, unbounded page cache with an intrusive dirty
//!   list and explicit flush
//! - **Write-ahead log**: a framed append-only log with CRC32C checksums,
//!   replayed on open
//! - **B-tree index**: an in-memory Cormen B-tree (t = 2) mapping 64-bit
//!   keys to record references
//!
//! ## Quick Start
//!
//! ```ignore
//! use zetadb::Database;
//!
//! let mut db = Database::open("./my.zdb")?;
//! db.set(1, b"hello")?;
//! assert_eq!(db.get(1)?, Some(b"hello".to_vec()));
//! db.flush()?;
//! db.close();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        REPL / CLI (zetadb bin)      │
//! ├─────────────────────────────────────┤
//! │  SQL layer (lexer/parser/VM) + row  │
//! │  tuple codec                        │
//! ├─────────────────────────────────────┤
//! │          Database facade            │
//! ├────────────────┬────────────────────┤
//! │  B-tree index  │  Pager (cache +    │
//! │  (in memory)   │  dirty list + WAL) │
//! ├────────────────┴────────────────────┤
//! │   Slotted pages over the data file  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Durability Model
//!
//! Every mutation appends to the WAL before touching the data file; on
//! open the WAL is replayed to rebuild both the index and the data page.
//! `flush` writes dirty pages and fsyncs; `close` flushes best-effort.
//! Single caller, no internal locking: the API takes `&mut self`.
//!
//! ## Module Overview
//!
//! - [`storage`]: slotted pages, WAL, pager
//! - [`btree`]: the in-memory ordered index
//! - [`database`]: the composing facade
//! - [`record`]: row tuple codec
//! - [`sql`]: lexer, parser, execution VM
//! - [`cli`]: interactive shell

#[macro_use]
mod macros;

pub mod btree;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod record;
pub mod sql;
pub mod storage;

pub use database::Database;
pub use error::{StorageError, StorageResult};
pub use record::Value;
pub use sql::{ExecuteResult, SqlError};
