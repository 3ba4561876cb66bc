use crate::arena::{Arena, Handle, DEFAULT_CHUNK_SIZE};
use crate::error::Result;
use crate::treap::key::Key;
use crate::treap::node::Node;
use crate::treap::tree::{self, NodeArena, Tree};
use log::{debug, trace};
use rand::{Rng, SeedableRng, XorShiftRng};
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;

/// An ordered set of scalar keys implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left subtree
/// and less than all keys occuring in its right subtree. The priority of a node is greater than or
/// equal to the priority of all nodes in its subtrees. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Priorities are drawn from a generator owned by the treap. Seeding it with
/// [`Treap::with_seed`] makes the shape of the tree reproducible.
///
/// # Examples
///
/// ```
/// use randomized_treap::Treap;
///
/// let mut t = Treap::new();
/// t.insert(5)?;
/// t.insert(3)?;
/// t.insert(8)?;
///
/// assert!(t.search(&3));
/// assert!(!t.search(&4));
/// assert_eq!(t.len(), 3);
///
/// assert!(t.erase(&3));
/// assert_eq!(t.iter().collect::<Vec<&i32>>(), vec![&5, &8]);
/// # Ok::<(), randomized_treap::Error>(())
/// ```
///
/// Only signed integers and floating-point numbers can be stored:
///
/// ```compile_fail
/// use randomized_treap::Treap;
///
/// let t: Treap<u32> = Treap::new();
/// ```
pub struct Treap<T: Key> {
    root: Tree,
    arena: NodeArena<T>,
    rng: XorShiftRng,
}

impl<T: Key> Treap<T> {
    /// Constructs a new, empty `Treap<T>` whose priority generator is seeded from the thread-local
    /// random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let t: Treap<i32> = Treap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_rng(rand::weak_rng())
    }

    /// Constructs a new, empty `Treap<T>` whose priority generator is seeded with `seed`. Two
    /// treaps built with the same seed and the same sequence of operations have the same shape.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeroes.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let t: Treap<i64> = Treap::with_seed([1, 2, 3, 4]);
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_rng(XorShiftRng::from_seed(seed))
    }

    /// Constructs a new, empty `Treap<T>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let t: Treap<f64> = Treap::with_rng(rand::weak_rng());
    /// ```
    pub fn with_rng(rng: XorShiftRng) -> Self {
        Treap {
            root: None,
            arena: Arena::new(DEFAULT_CHUNK_SIZE),
            rng,
        }
    }

    /// Inserts a key into the treap. Returns `Ok(true)` if the key was added and `Ok(false)` if
    /// it was already present, in which case the treap is not modified.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocError` if no memory is available for the new node. The treap is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert_eq!(t.insert(1)?, true);
    /// assert_eq!(t.insert(1)?, false);
    /// assert_eq!(t.len(), 1);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn insert(&mut self, key: T) -> Result<bool> {
        let Treap {
            ref mut root,
            ref mut arena,
            ref mut rng,
        } = self;
        let priority = rng.next_u32();
        tree::insert(arena, root, key, priority)
    }

    /// Removes a key from the treap. Returns `true` if the key was present. Removing an absent
    /// key does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// assert_eq!(t.erase(&1), true);
    /// assert_eq!(t.erase(&1), false);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn erase(&mut self, key: &T) -> bool {
        let Treap {
            ref mut root,
            ref mut arena,
            ..
        } = self;
        tree::remove(arena, root, key).is_some()
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// assert_eq!(t.search(&0), false);
    /// assert_eq!(t.search(&1), true);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn search(&self, key: &T) -> bool {
        tree::contains(&self.arena, &self.root, key)
    }

    /// Removes every key from the treap. Nodes are released children first, and their slots are
    /// kept for reuse by later insertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// t.insert(2)?;
    /// t.clear();
    /// assert!(t.is_empty());
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn clear(&mut self) {
        let released = tree::clear(&mut self.arena, self.root.take());
        debug!("released {} treap nodes", released);
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// assert_eq!(t.len(), 1);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the treap holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let t: Treap<i32> = Treap::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. The expected
    /// height is logarithmic in the number of keys, but an unlucky sequence of priorities can make
    /// it linear. Recursive operations use one stack frame per level.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert_eq!(t.height(), 0);
    /// t.insert(1)?;
    /// assert_eq!(t.height(), 1);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.arena, &self.root)
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// t.insert(3)?;
    /// assert_eq!(t.min(), Some(&1));
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.arena, &self.root)
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1)?;
    /// t.insert(3)?;
    /// assert_eq!(t.max(), Some(&3));
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.arena, &self.root)
    }

    /// Reserves room for at least `additional` more keys so that the next `additional`
    /// insertions do not allocate.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocError` if the node table cannot grow. The treap is left unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.arena.reserve(additional)
    }

    /// Returns a deep copy of the treap with the same keys, priorities, and shape. The copy
    /// shares no nodes with `self`, and its priority generator starts from the current state of
    /// `self`'s generator.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocError` if the copy cannot be allocated. `self` is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut a = Treap::new();
    /// a.insert(5)?;
    /// let mut b = a.try_clone()?;
    /// b.erase(&5);
    /// assert!(a.search(&5));
    /// assert!(!b.search(&5));
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn try_clone(&self) -> Result<Self> {
        let mut arena = Arena::new(DEFAULT_CHUNK_SIZE);
        arena.reserve(self.len())?;
        let root = tree::clone_tree(&self.arena, &self.root, &mut arena)?;
        trace!("copied {} treap nodes", arena.len());
        Ok(Treap {
            root,
            arena,
            rng: self.rng.clone(),
        })
    }

    /// Replaces the contents of `self` with a deep copy of `source`. The copy is built in full
    /// before anything in `self` is touched, so on failure `self` keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocError` if the copy cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut a = Treap::new();
    /// a.insert(1)?;
    /// let mut b = Treap::new();
    /// b.insert(2)?;
    /// b.assign_from(&a)?;
    /// assert_eq!(b.iter().collect::<Vec<&i32>>(), vec![&1]);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn assign_from(&mut self, source: &Self) -> Result<()> {
        let mut copy = source.try_clone()?;
        mem::swap(&mut self.root, &mut copy.root);
        mem::swap(&mut self.arena, &mut copy.arena);
        Ok(())
    }

    /// Clears `self` and takes ownership of every node in `source`, leaving `source` empty. No
    /// node is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut a = Treap::new();
    /// a.insert(1)?;
    /// let mut b = Treap::new();
    /// b.insert(2)?;
    /// b.move_from(&mut a);
    /// assert!(a.is_empty());
    /// assert_eq!(b.iter().collect::<Vec<&i32>>(), vec![&1]);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        mem::swap(&mut self.arena, &mut source.arena);
        self.root = source.root.take();
        trace!("moved {} treap nodes", self.len());
    }

    /// Takes every node out of `self` into a new treap, leaving `self` empty. No node is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut a = Treap::new();
    /// a.insert(1)?;
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert!(b.search(&1));
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn take(&mut self) -> Self {
        let rng = self.rng.gen::<XorShiftRng>();
        let mut taken = Treap::with_rng(rng);
        taken.move_from(self);
        taken
    }

    /// Returns an iterator over the treap. The iterator yields keys in ascending order. Each call
    /// starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use randomized_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(3)?;
    /// t.insert(1)?;
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// # Ok::<(), randomized_treap::Error>(())
    /// ```
    pub fn iter(&self) -> TreapIter<T> {
        TreapIter {
            arena: &self.arena,
            current: &self.root,
            stack: Vec::new(),
            remaining: self.len(),
        }
    }
}

impl<T: Key> IntoIterator for Treap<T> {
    type Item = T;
    type IntoIter = TreapIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        let Treap { root, arena, .. } = self;
        TreapIntoIter {
            arena,
            current: root,
            stack: Vec::new(),
            remaining,
        }
    }
}

impl<'a, T: 'a + Key> IntoIterator for &'a Treap<T> {
    type Item = &'a T;
    type IntoIter = TreapIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `Treap<T>`.
///
/// This iterator traverses the elements of a treap in-order and yields owned keys. Each node is
/// released as soon as its key is yielded.
pub struct TreapIntoIter<T: Key> {
    arena: NodeArena<T>,
    current: Tree,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<T: Key> Iterator for TreapIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current.take() {
            self.current = self.arena[&handle].left.take();
            self.stack.push(handle);
        }
        self.stack.pop().map(|handle| {
            let Node { key, right, .. } = self.arena.free(handle);
            self.current = right;
            self.remaining -= 1;
            key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Key> ExactSizeIterator for TreapIntoIter<T> {}

/// An iterator for `Treap<T>`.
///
/// The cursor keeps an explicit stack of ancestors whose right subtrees are still to be visited,
/// so it can be suspended between calls to `next`. Modifying the treap while an iterator is alive
/// is prevented by the borrow checker.
pub struct TreapIter<'a, T: 'a + Key> {
    arena: &'a NodeArena<T>,
    current: &'a Tree,
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T: 'a + Key> Iterator for TreapIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(ref handle) = *self.current {
            let node = &arena[handle];
            self.stack.push(node);
            self.current = &node.left;
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            self.remaining -= 1;
            &node.key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a + Key> ExactSizeIterator for TreapIter<'a, T> {}

impl<T: Key> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Key> Clone for Treap<T> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated. Use `try_clone` to handle the failure instead.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("{}", err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            panic!("{}", err);
        }
    }
}

impl<T: Key> Extend<T> for Treap<T> {
    /// # Panics
    ///
    /// Panics if a node cannot be allocated.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            if let Err(err) = self.insert(key) {
                panic!("{}", err);
            }
        }
    }
}

impl<T: Key> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

impl<T: Key> PartialEq for Treap<T> {
    fn eq(&self, other: &Treap<T>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(l, r)| l.compare(r) == Ordering::Equal)
    }
}

impl<T: Key> Eq for Treap<T> {}

impl<T: Key> fmt::Debug for Treap<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Formats the keys in ascending order, separated by single spaces.
impl<T: Key> fmt::Display for Treap<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, key) in self.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl<T: Key + Serialize> Serialize for Treap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

// Upper bound on the length hint trusted from a deserializer.
const MAX_PREALLOCATED_KEYS: usize = 4096;

struct TreapVisitor<T> {
    _marker: PhantomData<T>,
}

impl<'de, T: Key + Deserialize<'de>> Visitor<'de> for TreapVisitor<T> {
    type Value = Treap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> ::std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut treap = Treap::new();
        if let Some(len) = seq.size_hint() {
            treap
                .reserve(len.min(MAX_PREALLOCATED_KEYS))
                .map_err(<A::Error as de::Error>::custom)?;
        }
        while let Some(key) = seq.next_element()? {
            treap.insert(key).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(treap)
    }
}

impl<'de, T: Key + Deserialize<'de>> Deserialize<'de> for Treap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
        deserializer.deserialize_seq(TreapVisitor {
            _marker: PhantomData,
        })
    }
}
