//! # Internal Macros
//!
//! This module provides internal macros for reducing boilerplate.
//!
//! ## le_accessors!
//!
//! Generates getter and setter methods for zerocopy struct fields that use
//! little-endian wrapper types (U16, U32).
//!
//! ### Usage
//!
//! ```ignore
//! use zerocopy::little_endian::{U16, U32};
//!
//! #[repr(C)]
//! struct Header {
//!     num_records: U16,
//!     version: U32,
//! }
//!
//! impl Header {
//!     le_accessors! {
//!         num_records: u16,
//!         version: u32,
//!     }
//! }
//!
//! // Generates:
//! // pub fn num_records(&self) -> u16 { self.num_records.get() }
//! // pub fn set_num_records(&mut self, val: u16) { self.num_records = U16::new(val); }
//! // pub fn version(&self) -> u32 { self.version.get() }
//! // pub fn set_version(&mut self, val: u32) { self.version = U32::new(val); }
//! ```

/// Generates getter and setter methods for zerocopy little-endian fields.
#[macro_export]
macro_rules! le_accessors {
    (@impl $field:ident, u16) => {
        ::paste::paste! {
            #[inline]
            pub fn $field(&self) -> u16 {
                self.$field.get()
            }

            #[inline]
            pub fn [<set_ $field>](&mut self, val: u16) {
                self.$field = ::zerocopy::little_endian::U16::new(val);
            }
        }
    };
    (@impl $field:ident, u32) => {
        ::paste::paste! {
            #[inline]
            pub fn $field(&self) -> u32 {
                self.$field.get()
            }

            #[inline]
            pub fn [<set_ $field>](&mut self, val: u32) {
                self.$field = ::zerocopy::little_endian::U32::new(val);
            }
        }
    };
    ($($field:ident: $ty:tt),* $(,)?) => {
        $(
            $crate::le_accessors!(@impl $field, $ty);
        )*
    };
}
