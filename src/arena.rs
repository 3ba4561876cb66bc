//! Growable node table with a free-list of recycled slots.

use crate::error::Result;
use log::warn;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// Number of slots the table grows by when it runs out of vacant blocks.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// An owning reference to an object stored in an `Arena<T>`.
///
/// A handle is neither `Clone` nor `Copy`. Whoever holds the handle owns the object, and
/// `Arena::free` consumes it, so an object can never be reached through a handle after it has
/// been released.
#[derive(Debug, Eq, PartialEq)]
pub struct Handle(usize);

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A single-typed allocator backed by one `Vec`.
///
/// Freed blocks are threaded onto a free-list and recycled by later allocations before the
/// table grows. Growth goes through `Vec::try_reserve`, so running out of memory is reported to
/// the caller instead of aborting the process.
pub struct Arena<T> {
    blocks: Vec<Block<T>>,
    head: Option<usize>,
    chunk_size: usize,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>` that grows by `chunk_size` slots at a time.
    pub fn new(chunk_size: usize) -> Self {
        Arena {
            blocks: Vec::new(),
            head: None,
            chunk_size: chunk_size.max(1),
            len: 0,
        }
    }

    /// Returns the number of occupied blocks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no block is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn vacant(&self) -> usize {
        self.blocks.len() - self.len
    }

    /// Ensures that at least `additional` more objects can be allocated without growing the
    /// table. On failure the arena is left untouched.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self.vacant();
        if additional > vacant {
            let needed = additional - vacant;
            if let Err(err) = self.blocks.try_reserve(needed) {
                warn!("node table failed to grow by {} slots: {}", needed, err);
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Stores `value` in a vacant block and returns the handle that owns it.
    pub fn allocate(&mut self, value: T) -> Result<Handle> {
        if let Some(index) = self.head {
            let block = mem::replace(&mut self.blocks[index], Block::Occupied(value));
            match block {
                Block::Vacant(next) => self.head = next,
                Block::Occupied(_) => unreachable!("free-list points at an occupied block"),
            }
            self.len += 1;
            return Ok(Handle(index));
        }

        if self.blocks.len() == self.blocks.capacity() {
            let chunk_size = self.chunk_size;
            self.reserve(chunk_size)?;
        }
        self.blocks.push(Block::Occupied(value));
        self.len += 1;
        Ok(Handle(self.blocks.len() - 1))
    }

    /// Releases the object owned by `handle` and returns it. The block joins the free-list.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not refer to an occupied block.
    pub fn free(&mut self, handle: Handle) -> T {
        let Handle(index) = handle;
        if index >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[index], Block::Vacant(self.head));
        match old_block {
            Block::Occupied(value) => {
                self.head = Some(index);
                self.len -= 1;
                value
            },
            Block::Vacant(next) => {
                self.blocks[index] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
        }
    }

    /// Returns an immutable reference to the object owned by `handle`, if it is occupied.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.blocks.get(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object owned by `handle`, if it is occupied.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }
}

impl<'a, T> Index<&'a Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: &'a Handle) -> &Self::Output {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("Error: handle {} does not refer to an occupied block.", handle.0),
        }
    }
}

impl<'a, T> IndexMut<&'a Handle> for Arena<T> {
    fn index_mut(&mut self, handle: &'a Handle) -> &mut Self::Output {
        let index = handle.0;
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("Error: handle {} does not refer to an occupied block.", index),
        }
    }
}
