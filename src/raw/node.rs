use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use crate::compare::{self, CharCompare};

/// Key characters stored inline before a segment spills to the heap.
pub(crate) const INLINE_KEY: usize = 16;
/// Child links stored inline before a node's child set spills to the heap.
pub(crate) const INLINE_CHILDREN: usize = 4;

/// A link to a child node, tagged with the first character of the child's key
/// so that lookups can binary search without touching the arena.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Child<C> {
    first: C,
    handle: Handle,
}

/// A node of a [`RadixTree`](crate::RadixTree).
///
/// A node's [`key`](Node::key) is the edge label from its parent; concatenating
/// the labels from the root down yields the full key the node stands for. The
/// root is the only node with an empty label.
#[derive(Clone, Debug)]
pub struct Node<V, C = u8> {
    key: SmallVec<[C; INLINE_KEY]>,
    // Sorted by `first` under the tree's comparison strategy. No two entries share
    // a first character.
    children: SmallVec<[Child<C>; INLINE_CHILDREN]>,
    values: Vec<V>,
}

impl<V, C: Copy> Node<V, C> {
    /// Creates a node with no children and no values.
    pub(crate) fn new(key: &[C]) -> Self {
        Self {
            key: SmallVec::from_slice(key),
            children: SmallVec::new(),
            values: Vec::new(),
        }
    }

    /// Returns this node's key segment.
    #[inline]
    pub fn key(&self) -> &[C] {
        &self.key
    }

    /// Returns the values attached at this exact key position, in insertion order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Returns true if this node is a branch.
    #[inline]
    pub fn has_child(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if any value is stored at this node.
    #[inline]
    pub fn has_value(&self) -> bool {
        !self.values.is_empty()
    }

    /// Returns the number of direct children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Handle of the child at `index` in sorted order.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index].handle
    }

    /// Child handles in sorted order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = Handle> + '_ {
        self.children.iter().map(|child| child.handle)
    }

    /// Binary searches the children for the one whose key starts with `first`.
    ///
    /// Returns `Ok(index)` for the unique candidate, or `Err(index)` with the
    /// position where a child starting with `first` would be inserted.
    #[inline]
    pub(crate) fn search_child<S>(&self, first: C, compare: &S) -> Result<usize, usize>
    where
        S: CharCompare<C>,
    {
        self.children.binary_search_by(|child| compare.compare(child.first, first))
    }

    /// Inserts a child link at `index`, as returned by [`Node::search_child`].
    pub(crate) fn insert_child(&mut self, index: usize, first: C, handle: Handle) {
        self.children.insert(index, Child { first, handle });
    }

    /// Replaces the child link at `index`. The new first character must sort to
    /// the same position as the old one.
    pub(crate) fn replace_child(&mut self, index: usize, first: C, handle: Handle) {
        self.children[index] = Child { first, handle };
    }

    /// Drops the first `len` characters of the key. Children and values are untouched.
    pub(crate) fn truncate_key_front(&mut self, len: usize) {
        debug_assert!(len < self.key.len(), "`Node::truncate_key_front()` - key would become empty!");
        self.key.drain(..len);
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    pub(crate) fn append_value(&mut self, value: V) {
        self.values.push(value);
    }

    /// Releases this node's children links and values.
    ///
    /// The child nodes themselves belong to the arena and are released with it.
    pub(crate) fn clear(&mut self) {
        self.children = SmallVec::new();
        self.values = Vec::new();
    }

    /// Finds the child whose whole key is a prefix of `key` under `compare`.
    pub(crate) fn find_prefix_child<S>(&self, nodes: &Arena<Self>, key: &[C], compare: &S) -> Option<Handle>
    where
        S: CharCompare<C>,
    {
        let &first = key.first()?;
        let index = self.search_child(first, compare).ok()?;
        let handle = self.child(index);
        compare::starts_with(key, nodes.get(handle).key(), compare).then_some(handle)
    }

    /// Asserts the child set is well formed: non-empty child keys, first
    /// characters matching their links, and distinct neighbours in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if any of the above does not hold.
    pub(crate) fn validate<S>(&self, nodes: &Arena<Self>, compare: &S)
    where
        S: CharCompare<C>,
    {
        for child in &self.children {
            let key = nodes.get(child.handle).key();
            assert!(!key.is_empty(), "`Node::validate()` - child with an empty key!");
            assert!(
                compare.equals(key[0], child.first),
                "`Node::validate()` - child link does not match the child's first character!"
            );
        }

        for pair in self.children.windows(2) {
            assert!(
                compare.less(pair[0].first, pair[1].first),
                "`Node::validate()` - children share a first character or are out of order!"
            );
        }
    }
}
