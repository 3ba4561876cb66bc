use crate::arena::{Arena, Handle};
use crate::error::Result;
use crate::treap::key::Key;
use crate::treap::node::Node;
use std::cmp::Ordering;

/// An exclusively-owned subtree. `None` is the empty subtree.
pub type Tree = Option<Handle>;

pub type NodeArena<T> = Arena<Node<T>>;

fn take_children<T>(arena: &mut NodeArena<T>, handle: &Handle) -> (Tree, Tree) {
    let node = &mut arena[handle];
    (node.left.take(), node.right.take())
}

/// Joins two subtrees where every key in `l_tree` is less than every key in `r_tree`. The root
/// with the strictly greater priority wins; on equal priorities the root of `r_tree` wins.
pub fn merge<T>(arena: &mut NodeArena<T>, l_tree: Tree, r_tree: Tree) -> Tree {
    match (l_tree, r_tree) {
        (Some(l_node), Some(r_node)) => {
            if arena[&l_node].priority > arena[&r_node].priority {
                let l_right = arena[&l_node].right.take();
                let merged = merge(arena, l_right, Some(r_node));
                arena[&l_node].right = merged;
                Some(l_node)
            } else {
                let r_left = arena[&r_node].left.take();
                let merged = merge(arena, Some(l_node), r_left);
                arena[&r_node].left = merged;
                Some(r_node)
            }
        },
        (tree, None) | (None, tree) => tree,
    }
}

/// Partitions `tree` into the keys less than `key` and the keys greater than or equal to `key`.
pub fn split<T: Key>(arena: &mut NodeArena<T>, tree: Tree, key: &T) -> (Tree, Tree) {
    match tree {
        Some(node) => {
            if arena[&node].key.compare(key) == Ordering::Less {
                let right = arena[&node].right.take();
                let (l_tree, r_tree) = split(arena, right, key);
                arena[&node].right = l_tree;
                (Some(node), r_tree)
            } else {
                let left = arena[&node].left.take();
                let (l_tree, r_tree) = split(arena, left, key);
                arena[&node].left = r_tree;
                (l_tree, Some(node))
            }
        },
        None => (None, None),
    }
}

pub fn contains<T: Key>(arena: &NodeArena<T>, tree: &Tree, key: &T) -> bool {
    let mut curr = tree;
    while let Some(handle) = curr {
        let node = &arena[handle];
        match key.compare(&node.key) {
            Ordering::Equal => return true,
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
        }
    }
    false
}

/// Inserts `key` with the given priority. Returns `false` without allocating if `key` is already
/// present. The node is allocated before the tree is split, so an allocation failure leaves the
/// tree unchanged.
pub fn insert<T: Key>(
    arena: &mut NodeArena<T>,
    tree: &mut Tree,
    key: T,
    priority: u32,
) -> Result<bool> {
    if tree.is_none() {
        *tree = Some(arena.allocate(Node::new(key, priority))?);
        return Ok(true);
    }
    if contains(arena, tree, &key) {
        return Ok(false);
    }

    let new_node = arena.allocate(Node::new(key, priority))?;
    let (l_tree, r_tree) = split(arena, tree.take(), &key);
    let l_tree = merge(arena, l_tree, Some(new_node));
    *tree = merge(arena, l_tree, r_tree);
    Ok(true)
}

/// Removes the node holding `key` and returns its key, or `None` if no such node exists.
pub fn remove<T: Key>(arena: &mut NodeArena<T>, tree: &mut Tree, key: &T) -> Option<T> {
    let ordering = match tree.as_ref() {
        Some(node) => key.compare(&arena[node].key),
        None => return None,
    };

    match ordering {
        Ordering::Less => {
            let node = tree.as_ref()?;
            let mut left = arena[node].left.take();
            let ret = remove(arena, &mut left, key);
            arena[node].left = left;
            ret
        },
        Ordering::Greater => {
            let node = tree.as_ref()?;
            let mut right = arena[node].right.take();
            let ret = remove(arena, &mut right, key);
            arena[node].right = right;
            ret
        },
        Ordering::Equal => {
            let node = tree.take()?;
            let (left, right) = take_children(arena, &node);
            *tree = merge(arena, left, right);
            Some(arena.free(node).key)
        },
    }
}

/// Releases every node of `tree`, children before their parent. Returns the number of nodes
/// released.
pub fn clear<T>(arena: &mut NodeArena<T>, tree: Tree) -> usize {
    match tree {
        Some(node) => {
            let (left, right) = take_children(arena, &node);
            let released = clear(arena, left) + clear(arena, right);
            arena.free(node);
            released + 1
        },
        None => 0,
    }
}

/// Copies `tree` node by node from `src` into `dst`, preserving keys, priorities, and shape.
/// On failure `src` is untouched; `dst` may hold a partial copy and should be discarded.
pub fn clone_tree<T: Copy>(
    src: &NodeArena<T>,
    tree: &Tree,
    dst: &mut NodeArena<T>,
) -> Result<Tree> {
    match tree {
        Some(handle) => {
            let node = &src[handle];
            let left = clone_tree(src, &node.left, dst)?;
            let right = clone_tree(src, &node.right, dst)?;
            let new_node = dst.allocate(Node {
                key: node.key,
                priority: node.priority,
                left,
                right,
            })?;
            Ok(Some(new_node))
        },
        None => Ok(None),
    }
}

pub fn height<T>(arena: &NodeArena<T>, tree: &Tree) -> usize {
    match tree {
        Some(handle) => {
            let node = &arena[handle];
            1 + height(arena, &node.left).max(height(arena, &node.right))
        },
        None => 0,
    }
}

pub fn min<'a, T>(arena: &'a NodeArena<T>, tree: &'a Tree) -> Option<&'a T> {
    tree.as_ref().map(|handle| {
        let mut curr = &arena[handle];
        while let Some(ref left_node) = curr.left {
            curr = &arena[left_node];
        }
        &curr.key
    })
}

pub fn max<'a, T>(arena: &'a NodeArena<T>, tree: &'a Tree) -> Option<&'a T> {
    tree.as_ref().map(|handle| {
        let mut curr = &arena[handle];
        while let Some(ref right_node) = curr.right {
            curr = &arena[right_node];
        }
        &curr.key
    })
}

/// Walks `tree` and panics if the search-tree or heap ordering is broken anywhere. Returns the
/// number of nodes visited.
#[cfg(test)]
pub fn check_invariants<T: Key>(arena: &NodeArena<T>, tree: &Tree) -> usize {
    fn check<T: Key>(
        arena: &NodeArena<T>,
        tree: &Tree,
        lower: Option<T>,
        upper: Option<T>,
    ) -> usize {
        let handle = match tree {
            Some(handle) => handle,
            None => return 0,
        };
        let node = &arena[handle];
        if let Some(lower) = lower {
            assert_eq!(lower.compare(&node.key), Ordering::Less, "{:?} out of order", node.key);
        }
        if let Some(upper) = upper {
            assert_eq!(node.key.compare(&upper), Ordering::Less, "{:?} out of order", node.key);
        }
        for child in [&node.left, &node.right].iter() {
            if let Some(child) = child {
                assert!(
                    arena[child].priority <= node.priority,
                    "heap order broken at {:?}",
                    node.key,
                );
            }
        }
        let left_len = check(arena, &node.left, lower, Some(node.key));
        let right_len = check(arena, &node.right, Some(node.key), upper);
        1 + left_len + right_len
    }

    check(arena, tree, None, None)
}
