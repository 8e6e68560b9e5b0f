//! # ZetaDB Configuration Constants
//!
//! This module centralizes the layout constants for the storage engine,
//! grouping interdependent values together and documenting their
//! relationships. Constants that depend on each other are co-located to
//! prevent mismatch bugs.
//!
//! ## Dependency Graph
//!
//! ```text
//! PAGE_SIZE (4096 bytes)
//!       │
//!       ├─> PAGE_HEADER_SIZE (6 bytes: num_records, free_start, free_end)
//!       │
//!       ├─> PAGE_USABLE_SIZE (derived: PAGE_SIZE - PAGE_HEADER_SIZE)
//!       │
//!       └─> SLOT_SIZE (2 bytes per slot table entry)
//!             Slot i occupies [PAGE_SIZE - 2(i+1), PAGE_SIZE - 2i)
//!
//! WAL_HEADER_SIZE (12 bytes)
//!       │
//!       ├─> WAL_MAGIC ("ZDB1", bytes 0..4)
//!       ├─> WAL_VERSION (1, bytes 4..8)
//!       └─> CRC32C over bytes 0..8 (bytes 8..12)
//!
//! MIN_DEGREE (t = 2)
//!       │
//!       ├─> MAX_KEYS (2t - 1 = 3 keys per node)
//!       └─> MAX_CHILDREN (2t = 4 children per node)
//! ```
//!
//! ## Critical Invariants
//!
//! These invariants are enforced by compile-time assertions:
//!
//! 1. `PAGE_USABLE_SIZE == PAGE_SIZE - PAGE_HEADER_SIZE`
//! 2. `MAX_KEYS == 2 * MIN_DEGREE - 1` and `MAX_CHILDREN == 2 * MIN_DEGREE`
//! 3. `MAX_VALUE_SIZE` fits the `u16` record length prefix
//!
//! ## Usage
//!
//! Import constants from this module rather than defining them locally:
//!
//! ```ignore
//! use crate::config::{PAGE_SIZE, MAX_VALUE_SIZE};
//! ```

// ============================================================================
// PAGE LAYOUT CONSTANTS
// These define the fundamental page structure used throughout the engine
// ============================================================================

/// Size of each database page in bytes (4KB).
/// This is the fundamental unit of I/O and caching.
pub const PAGE_SIZE: usize = 4096;

/// Size of the page header in bytes.
/// Every page begins with three little-endian u16 fields:
/// num_records, free_start, free_end.
pub const PAGE_HEADER_SIZE: usize = 6;

/// Usable space in a freshly initialised page.
pub const PAGE_USABLE_SIZE: usize = PAGE_SIZE - PAGE_HEADER_SIZE;

/// Size of one slot table entry (a u16 offset into the page).
pub const SLOT_SIZE: usize = 2;

/// Size of the length prefix stored before each record payload.
pub const RECORD_LEN_SIZE: usize = 2;

/// Sentinel slot value marking a logically deleted record.
pub const TOMBSTONE: u16 = 0xFFFF;

const _: () = assert!(
    PAGE_USABLE_SIZE == PAGE_SIZE - PAGE_HEADER_SIZE,
    "PAGE_USABLE_SIZE derivation mismatch"
);

// ============================================================================
// VALUE LIMITS
// ============================================================================

/// Maximum value size in bytes. Values are length-prefixed with a u16,
/// so anything larger cannot be represented in the record layout.
pub const MAX_VALUE_SIZE: usize = 65535;

const _: () = assert!(
    MAX_VALUE_SIZE == u16::MAX as usize,
    "MAX_VALUE_SIZE must fit the u16 record length prefix"
);

// ============================================================================
// WAL CONFIGURATION
// Framed append-only log layout for durability and recovery
// ============================================================================

/// Magic bytes at the start of every WAL file.
pub const WAL_MAGIC: [u8; 4] = *b"ZDB1";

/// Current WAL format version.
pub const WAL_VERSION: u32 = 1;

/// Size of the WAL file header: magic (4) + version (4) + CRC32C (4).
pub const WAL_HEADER_SIZE: usize = 12;

/// Suffix appended to the data file path to form the WAL path.
pub const WAL_FILE_SUFFIX: &str = ".wal";

/// Op byte for a SET record.
pub const WAL_OP_SET: u8 = 1;

/// Op byte for a DELETE record.
pub const WAL_OP_DELETE: u8 = 2;

// ============================================================================
// B-TREE CONFIGURATION
// Branching parameters for the in-memory index
// ============================================================================

/// B-tree minimum degree (t). Every non-root node holds between
/// `t - 1` and `2t - 1` keys.
pub const MIN_DEGREE: usize = 2;

/// Maximum keys per node (2t - 1).
pub const MAX_KEYS: usize = 2 * MIN_DEGREE - 1;

/// Maximum children per node (2t).
pub const MAX_CHILDREN: usize = 2 * MIN_DEGREE;

const _: () = assert!(MAX_KEYS == 2 * MIN_DEGREE - 1, "MAX_KEYS derivation mismatch");
const _: () = assert!(MAX_CHILDREN == 2 * MIN_DEGREE, "MAX_CHILDREN derivation mismatch");

// ============================================================================
// FACADE CONFIGURATION
// ============================================================================

/// The single page used by the database facade for record storage.
/// The page id field of `RecordRef` exists for future expansion.
pub const DATA_PAGE_ID: u32 = 0;
