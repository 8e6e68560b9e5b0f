//! # Database Facade
//!
//! The top of the storage core: composes the WAL, the pager and the
//! B-tree index behind a key/value API. The outer SQL layer sits on top
//! of this module and never touches the subsystems directly.
//!
//! ## Durability Protocol
//!
//! Every mutation follows the same ordering:
//!
//! ```text
//! 1. Append the logical operation to the WAL
//! 2. Mutate the data page through the pager (SET only)
//! 3. Update the in-memory index
//! ```
//!
//! The WAL is the source of truth. On open it is replayed through the same
//! write path `set` uses, re-materialising both the index and the data
//! page, so the data file need not have been flushed before a crash.
//! Replay never re-appends to the WAL.
//!
//! ## Space Management
//!
//! All records live on page 0 (the page id in `RecordRef` exists for
//! future expansion). When an insert does not fit, the page is
//! defragmented once; failing that, `set` reports `OutOfSpace`.
//! Defragmentation preserves slot indices, so the references held by the
//! index stay valid across it; only tombstoned heap space is reclaimed.
//! An upsert leaves the previous record's slot live but unreachable, and
//! a delete replayed from the WAL leaves the dead record in place for the
//! rest of the session. Both leaks are bounded by the page and vanish at
//! the next open, which rebuilds the page from the log.

use std::path::Path;

use crate::btree::{BTree, Cursor};
use crate::config::{DATA_PAGE_ID, MAX_VALUE_SIZE};
use crate::error::{StorageError, StorageResult};
use crate::storage::{PageStore, Pager, RecordRef, ReplayHandler};

#[derive(Debug)]
pub struct Database {
    pager: Pager,
    index: BTree,
}

impl Database {
    /// Opens or creates the database at `path` (the WAL lives next to it
    /// with a `.wal` suffix) and replays the log into a fresh index.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let mut pager = Pager::open(path)?;
        let mut index = BTree::new();

        // The WAL is the source of truth: replay rebuilds the data page
        // from scratch. Starting from the flushed image instead would
        // stack a fresh generation of records on top of it at every open.
        pager.get(DATA_PAGE_ID)?.page_mut().init();

        let (sets, deletes) = {
            let (store, wal) = pager.split();
            let mut recovery = Recovery {
                store,
                index: &mut index,
                sets: 0,
                deletes: 0,
            };
            wal.replay(&mut recovery)?;
            (recovery.sets, recovery.deletes)
        };

        tracing::info!(
            path = %path.display(),
            sets,
            deletes,
            keys = index.len(),
            "database opened"
        );

        Ok(Self { pager, index })
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&mut self, key: u64, value: &[u8]) -> StorageResult<()> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(StorageError::ValueTooLarge(value.len()));
        }

        self.pager.wal_mut().append_set(key, value)?;

        let slot = write_value(self.pager.store_mut(), value)?;
        self.index
            .insert(key, RecordRef::new(DATA_PAGE_ID, slot).encode());
        Ok(())
    }

    /// Looks up `key`, returning an owned copy of its value.
    pub fn get(&mut self, key: u64) -> StorageResult<Option<Vec<u8>>> {
        let Some(encoded) = self.index.search(key) else {
            return Ok(None);
        };

        let record = RecordRef::decode(encoded);
        let handle = self.pager.get(record.page_id)?;
        Ok(handle.page().get(record.slot).map(<[u8]>::to_vec))
    }

    /// Removes `key`. A delete of a missing key still appends to the WAL,
    /// which keeps replay idempotent.
    pub fn delete(&mut self, key: u64) -> StorageResult<()> {
        self.pager.wal_mut().append_delete(key)?;

        if let Some(encoded) = self.index.search(key) {
            let record = RecordRef::decode(encoded);
            let mut handle = self.pager.get(record.page_id)?;
            handle.page_mut().delete(record.slot)?;
            handle.mark_dirty();
            drop(handle);

            self.index.delete(key);
        }
        Ok(())
    }

    /// Visits every `(key, value bytes)` pair in ascending key order.
    pub fn scan<F>(&mut self, mut visitor: F) -> StorageResult<()>
    where
        F: FnMut(u64, &[u8]) -> StorageResult<()>,
    {
        let Self { pager, index } = self;
        let mut cursor = index.cursor_first();

        while let Some((key, encoded)) = cursor.entry() {
            let record = RecordRef::decode(encoded);
            let handle = pager.get(record.page_id)?;
            if let Some(bytes) = handle.page().get(record.slot) {
                visitor(key, bytes)?;
            }
            drop(handle);
            cursor.next();
        }
        Ok(())
    }

    /// Writes dirty pages back and fsyncs the data file.
    pub fn flush(&mut self) -> StorageResult<()> {
        self.pager.flush()
    }

    /// Best-effort flush and release of every resource.
    pub fn close(self) {
        tracing::info!(keys = self.index.len(), "database closing");
        self.pager.close();
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Height of the index tree, for diagnostics.
    pub fn index_height(&self) -> usize {
        self.index.height()
    }

    /// Ascending cursor over the raw index entries.
    pub fn cursor(&self) -> Cursor<'_> {
        self.index.cursor_first()
    }
}

/// The shared write path for `set` and replay: ensure capacity on the data
/// page (defragmenting once if needed) and insert, returning the slot.
fn write_value(store: &mut PageStore, value: &[u8]) -> StorageResult<u16> {
    let mut handle = store.get(DATA_PAGE_ID)?;

    if !handle.page().can_insert(value.len()) {
        handle.page_mut().defragment();
        if !handle.page().can_insert(value.len()) {
            return Err(StorageError::OutOfSpace);
        }
    }

    let slot = handle.page_mut().insert(value)?;
    handle.mark_dirty();
    Ok(slot)
}

/// Replay visitor: applies SETs through the shared write path and DELETEs
/// to the index alone (the dead page slot stays until defragmentation).
struct Recovery<'a> {
    store: &'a mut PageStore,
    index: &'a mut BTree,
    sets: usize,
    deletes: usize,
}

impl ReplayHandler for Recovery<'_> {
    fn on_set(&mut self, key: u64, value: &[u8]) -> StorageResult<()> {
        let slot = write_value(self.store, value)?;
        self.index
            .insert(key, RecordRef::new(DATA_PAGE_ID, slot).encode());
        self.sets += 1;
        Ok(())
    }

    fn on_delete(&mut self, key: u64) -> StorageResult<()> {
        self.index.delete(key);
        self.deletes += 1;
        Ok(())
    }
}
