//! # B-tree Index
//!
//! An in-memory ordered index mapping 64-bit keys to opaque 64-bit
//! payloads. The database facade stores encoded record references here and
//! rebuilds the whole structure from the WAL on open, so nothing in this
//! module touches disk.
//!
//! ## Architecture Overview
//!
//! The tree is a classic Cormen B-tree with minimum degree t = 2 (a 2-3-4
//! tree): each node holds 1 to 3 sorted keys with parallel values and up
//! to 4 children. Nodes live in an index-addressed arena rather than
//! behind heap pointers, which keeps ownership simple and teardown cheap.
//!
//! ```text
//!                 [ 17        ]
//!                 /            \
//!        [ 5   11 ]            [ 29 ]
//!        /   |    \            /    \
//!  [1 3] [7 9] [13 15]   [19 23]   [31 37 41]
//! ```
//!
//! ## Module Organization
//!
//! - `node`: node layout, arena allocation, free list
//! - `tree`: search, upsert, delete with rebalancing, range visits
//! - `cursor`: stateful ascending iterator for the execution VM

mod cursor;
mod node;
mod tree;

pub use cursor::Cursor;
pub use node::NodeId;
pub use tree::BTree;
