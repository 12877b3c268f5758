use super::RadixTree;
use crate::compare::CaseInsensitive;
use crate::raw::RawRadixTree;

impl<V> RadixTree<V> {
    /// Creates an empty case-insensitive tree with room for at least `capacity`
    /// nodes besides the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let tree: RadixTree<u32> = RadixTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, CaseInsensitive)
    }
}

impl<V, C: Copy, S> RadixTree<V, C, S> {
    /// Creates an empty tree using `compare`, with room for at least `capacity`
    /// nodes besides the root.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, compare: S) -> Self {
        RadixTree {
            raw: RawRadixTree::with_capacity(capacity, compare),
        }
    }

    /// Returns how many nodes besides the root the tree can hold without
    /// reallocating.
    ///
    /// A single insert allocates at most two nodes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
