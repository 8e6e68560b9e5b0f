//! # Storage Module
//!
//! The persistent core of the engine: the slotted page layout, the
//! write-ahead log and the pager that composes them over the data file.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Database facade              │
//! ├──────────────────┬──────────────────┤
//! │   Pager (cache,  │   WAL (framed    │
//! │   dirty list)    │   log + CRC32C)  │
//! ├──────────────────┴──────────────────┤
//! │   Slotted pages over the data file  │
//! └─────────────────────────────────────┘
//! ```
//!
//! The data file is an array of 4096-byte pages; holes read as empty pages
//! on first fetch and the file grows by whole pages at flush. The WAL
//! records logical key/value operations, not page images, and is the
//! source of truth on open: replay re-materialises both the index and the
//! data page, so the data file need not have been flushed before a crash.
//!
//! ## Ordering Guarantees
//!
//! A WAL append strictly precedes the data-file mutation for the same
//! logical operation, and `flush` drains the dirty list before fsync. No
//! reordering happens across those two barriers.
//!
//! ## Module Organization
//!
//! - `page`: slotted page layout and in-page operations
//! - `wal`: framed append-only log, header, replay driver
//! - `pager`: page cache, pin counting, dirty list, flush

mod page;
mod pager;
mod wal;

pub use page::{PageHeader, SlottedPage, SlottedPageMut};
pub use pager::{PageHandle, PageStore, Pager, RecordRef};
pub use wal::{ReplayHandler, Wal, WalHeader};
