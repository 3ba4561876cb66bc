//! An ordered set of scalar keys backed by a randomized treap.
//!
//! `Treap<T>` keeps its keys unique and sorted, and balances itself probabilistically by giving
//! every node a random priority. Keys can be any signed integer type, `f32`, or `f64`.
//!
//! # Examples
//!
//! ```
//! use randomized_treap::Treap;
//!
//! let mut t = Treap::with_seed([1, 2, 3, 4]);
//! for key in &[5, 3, 8, 2, 4, 7, 9] {
//!     t.insert(*key)?;
//! }
//! assert!(t.search(&5));
//! assert!(!t.search(&6));
//!
//! t.erase(&3);
//! assert_eq!(t.to_string(), "2 4 5 7 8 9");
//! # Ok::<(), randomized_treap::Error>(())
//! ```

mod arena;
mod error;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::treap::{Key, Treap, TreapIntoIter, TreapIter};
