//! Probabilistic binary search tree where each node also maintains the heap invariant.
//!
//! Nodes live in a growable table and refer to their children by handle. Every handle has a
//! single owner, either its parent node or the treap itself for the root, so the structure is
//! always a tree. Split, merge, erase, copy, and clear recurse once per level of the tree. The
//! expected height is logarithmic, but a pathological sequence of priorities can make it linear,
//! which bounds how many keys a thread with a small stack can safely hold.

mod key;
mod node;
mod set;
mod tree;

pub use self::key::Key;
pub use self::set::{Treap, TreapIntoIter, TreapIter};
