//! Ordered key-value map backed by an arena-based red-black tree.
//!
//! Point operations (`get` / `insert` / `remove`) are O(log n); iteration
//! is in key order, ascending or descending; floor/ceiling/higher/lower
//! navigation, bounded directional range views, detached fail-fast cursors,
//! and linear-time bulk construction from sorted input round out the
//! surface.
//!
//! Instead of raw pointers, all tree links are `Option<u32>` indices into a
//! slot arena owned by the map; rotations and unlinking are index
//! reassignment, and freed slots are reused.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`map`] | [`TreeMap`] container and its trait impls |
//! | `node` | node/arena representation |
//! | `rb` | rotations and red-black fix-ups |
//! | `navigate` | extremes, successor/predecessor, relational lookups |
//! | [`range`] | [`SubMap`] bounded directional views |
//! | [`cursor`] | [`Cursor`] fail-fast cursors and borrowing iterators |
//! | `build` | linear-time construction from sorted input |
//! | `print` | debug printer for test-failure triage |
//! | [`error`] | [`TreeMapError`] taxonomy |
//!
//! # Concurrency
//!
//! The map is not internally synchronized. Cursors detect structural
//! modification on a best-effort basis and report it as
//! [`TreeMapError::ConcurrentStructuralChange`]; the check is diagnostic
//! only and is not a substitute for external synchronization.

pub mod cursor;
pub mod error;
pub mod map;
pub mod range;

mod build;
mod navigate;
mod node;
mod print;
mod rb;

pub use cursor::{Cursor, Iter, Keys, Values};
pub use error::TreeMapError;
pub use map::{IntoIter, TreeMap};
pub use node::Color;
pub use range::SubMap;
