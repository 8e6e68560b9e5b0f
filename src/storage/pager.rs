//! # Pager and Page Cache
//!
//! This module implements the page cache over the data file. Pages are
//! fetched on demand, pinned while in use and held until close; the cache
//! is unbounded so nothing is ever evicted.
//!
//! ## Cache Entry Layout
//!
//! ```text
//! CacheEntry {
//!     data: Box<[u8; 4096]>,   // page buffer
//!     dirty: bool,
//!     pin_count: u32,          // balanced by PageHandle
//!     next_dirty: Option<u32>, // intrusive dirty list link
//! }
//! ```
//!
//! Dirty entries form a singly linked list of page ids rooted at
//! `dirty_head`, most-recently-dirtied first. Marking an already-dirty
//! entry is a no-op and preserves its list position.
//!
//! ## Pin/Unpin Protocol
//!
//! [`PageStore::get`] returns a [`PageHandle`] that pins the entry; the
//! handle unpins on drop, so pins balance per call site by construction.
//! The pin count is a usage counter, not a lifetime gate (there is no
//! eviction here), and closing the pager with outstanding pins is a
//! programmer error caught by a debug assertion.
//!
//! ## Flush Protocol
//!
//! `flush` drains the dirty list, writing each page at `page_id * 4096`,
//! then fsyncs the data file. List order does not matter for correctness
//! since every page occupies a distinct file region.
//!
//! ## WAL Ownership
//!
//! The pager owns the WAL handle, opened next to the data file with a
//! `.wal` suffix. [`Pager::split`] lends the WAL and the page store
//! disjointly so the replay driver can write pages while reading the log.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::config::{PAGE_SIZE, WAL_FILE_SUFFIX};
use crate::error::StorageResult;
use crate::storage::page::{SlottedPage, SlottedPageMut};
use crate::storage::wal::Wal;

/// Location of a record: page id in the upper 32 bits of the payload,
/// slot index in the low 16. The top 16 bits are unused and zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef {
    pub page_id: u32,
    pub slot: u16,
}

impl RecordRef {
    pub fn new(page_id: u32, slot: u16) -> Self {
        Self { page_id, slot }
    }

    pub fn encode(self) -> u64 {
        ((self.page_id as u64) << 16) | self.slot as u64
    }

    pub fn decode(encoded: u64) -> Self {
        Self {
            page_id: (encoded >> 16) as u32,
            slot: encoded as u16,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    data: Box<[u8; PAGE_SIZE]>,
    dirty: bool,
    pin_count: u32,
    next_dirty: Option<u32>,
}

impl CacheEntry {
    fn new(data: Box<[u8; PAGE_SIZE]>) -> Self {
        Self {
            data,
            dirty: false,
            pin_count: 0,
            next_dirty: None,
        }
    }
}

/// The data file plus its page cache and dirty list.
#[derive(Debug)]
pub struct PageStore {
    file: File,
    cache: HashMap<u32, CacheEntry>,
    dirty_head: Option<u32>,
}

impl PageStore {
    fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Ok(Self {
            file,
            cache: HashMap::new(),
            dirty_head: None,
        })
    }

    /// Fetches a page, loading it from the data file on first access. A
    /// page beyond the end of the file comes back freshly initialised; a
    /// partially present page is zero-padded with its on-disk header
    /// preserved.
    pub fn get(&mut self, page_id: u32) -> StorageResult<PageHandle<'_>> {
        if !self.cache.contains_key(&page_id) {
            let entry = self.load(page_id)?;
            self.cache.insert(page_id, entry);
        }

        let entry = self.cache.get_mut(&page_id).expect("just inserted");
        entry.pin_count += 1;

        Ok(PageHandle {
            store: self,
            page_id,
        })
    }

    fn load(&mut self, page_id: u32) -> StorageResult<CacheEntry> {
        let mut data = Box::new([0u8; PAGE_SIZE]);

        self.file
            .seek(SeekFrom::Start(page_id as u64 * PAGE_SIZE as u64))?;

        let mut filled = 0usize;
        while filled < PAGE_SIZE {
            let n = self.file.read(&mut data[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            SlottedPageMut::new(data.as_mut_slice()).init();
        }

        Ok(CacheEntry::new(data))
    }

    fn unpin(&mut self, page_id: u32) {
        let entry = self.cache.get_mut(&page_id).expect("unpin of uncached page");
        debug_assert!(entry.pin_count > 0, "unbalanced unpin for page {page_id}");
        entry.pin_count -= 1;
    }

    fn make_dirty(&mut self, page_id: u32) {
        let entry = self.cache.get_mut(&page_id).expect("dirty mark of uncached page");
        if entry.dirty {
            return;
        }

        entry.dirty = true;
        entry.next_dirty = self.dirty_head;
        self.dirty_head = Some(page_id);
    }

    /// Writes every dirty page back to the data file and fsyncs it.
    pub fn flush(&mut self) -> StorageResult<()> {
        let mut flushed = 0usize;
        let mut cursor = self.dirty_head.take();

        while let Some(page_id) = cursor {
            let entry = self
                .cache
                .get_mut(&page_id)
                .expect("dirty list entry not in cache");

            self.file
                .seek(SeekFrom::Start(page_id as u64 * PAGE_SIZE as u64))?;
            self.file.write_all(entry.data.as_slice())?;

            cursor = entry.next_dirty.take();
            entry.dirty = false;
            flushed += 1;
        }

        self.file.sync_all()?;
        tracing::debug!(pages = flushed, "flushed dirty pages");
        Ok(())
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub fn has_dirty_pages(&self) -> bool {
        self.dirty_head.is_some()
    }

    fn assert_unpinned(&self) {
        for (page_id, entry) in &self.cache {
            debug_assert!(
                entry.pin_count == 0,
                "page {page_id} still pinned at close ({} pins)",
                entry.pin_count
            );
        }
    }
}

/// RAII pin over a cached page. Page operations go through the handle;
/// the pin is released on drop.
pub struct PageHandle<'a> {
    store: &'a mut PageStore,
    page_id: u32,
}

impl PageHandle<'_> {
    pub fn page_id(&self) -> u32 {
        self.page_id
    }

    pub fn page(&self) -> SlottedPage<'_> {
        let entry = &self.store.cache[&self.page_id];
        SlottedPage::new(entry.data.as_slice())
    }

    pub fn page_mut(&mut self) -> SlottedPageMut<'_> {
        let entry = self
            .store
            .cache
            .get_mut(&self.page_id)
            .expect("handle over uncached page");
        SlottedPageMut::new(entry.data.as_mut_slice())
    }

    pub fn mark_dirty(&mut self) {
        self.store.make_dirty(self.page_id);
    }
}

impl Drop for PageHandle<'_> {
    fn drop(&mut self) {
        self.store.unpin(self.page_id);
    }
}

/// The pager: a page store plus the WAL it owns.
#[derive(Debug)]
pub struct Pager {
    store: PageStore,
    wal: Wal,
}

impl Pager {
    /// Opens or creates the data file at `path` and its WAL sibling at
    /// `path + ".wal"`.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let store = PageStore::open(path)?;
        let wal = Wal::open(&wal_path(path))?;

        Ok(Self { store, wal })
    }

    pub fn get(&mut self, page_id: u32) -> StorageResult<PageHandle<'_>> {
        self.store.get(page_id)
    }

    pub fn flush(&mut self) -> StorageResult<()> {
        self.store.flush()
    }

    pub fn wal_mut(&mut self) -> &mut Wal {
        &mut self.wal
    }

    pub fn store_mut(&mut self) -> &mut PageStore {
        &mut self.store
    }

    /// Disjoint access to the store and the WAL, for the replay driver.
    pub fn split(&mut self) -> (&mut PageStore, &mut Wal) {
        (&mut self.store, &mut self.wal)
    }

    /// Best-effort flush, then release of every cached buffer and both
    /// file handles. Flush errors are swallowed so resources are always
    /// released.
    pub fn close(mut self) {
        if let Err(err) = self.store.flush() {
            tracing::debug!(%err, "flush during close failed");
        }
        self.store.assert_unpinned();
    }
}

fn wal_path(data_path: &Path) -> PathBuf {
    let mut os: OsString = data_path.as_os_str().to_owned();
    os.push(WAL_FILE_SUFFIX);
    PathBuf::from(os)
}
