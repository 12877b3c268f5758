use core::fmt;

use crate::compare::{CaseInsensitive, CharCompare};
use crate::raw::{Node, RawRadixTree};
use crate::statistics::Statistics;

mod capacity;
mod iter;

pub use iter::{Iter, Path};

/// A compressed prefix tree mapping string-like keys to ordered lists of values.
///
/// Keys are slices of a character type `C` (bytes by default, so `&str`,
/// `String` and byte strings all work as keys). Each key position can hold any
/// number of values, kept in insertion order. Characters are matched through a
/// [`CharCompare`] strategy `S`, which defaults to [`CaseInsensitive`]: `"ABC"`
/// and `"abc"` name the same position, and the node keeps the spelling it was
/// first created with.
///
/// Runs of keys sharing a prefix are stored once. Inserting a key that only
/// partly matches an existing edge splits that edge, moving the existing node
/// (with its values and children) below a new branch.
///
/// # Examples
///
/// ```
/// use radix_index::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("cat", 1);
/// tree.insert("car", 2);
/// tree.insert("Cart", 3);
///
/// assert_eq!(tree.get("CAT"), Some(&[1][..]));
/// assert_eq!(tree.longest_prefix("cartwheel"), Some((4, &[3][..])));
///
/// // Autocomplete style walk along the query.
/// let mut seen = Vec::new();
/// tree.traverse("carts", |node, segment| {
///     seen.push((segment.to_vec(), node.values().to_vec()));
///     false
/// });
/// assert_eq!(seen, [
///     (b"ca".to_vec(), vec![]),
///     (b"r".to_vec(), vec![2]),
///     (b"t".to_vec(), vec![3]),
/// ]);
/// ```
///
/// A case-sensitive tree over `char` keys:
///
/// ```
/// use radix_index::{Exact, RadixTree};
///
/// let mut tree = RadixTree::<u32, char, Exact>::with_comparator(Exact);
/// let key: Vec<char> = "Ωmega".chars().collect();
/// tree.insert(&key, 1);
/// assert!(tree.get(&['ω', 'm', 'e', 'g', 'a']).is_none());
/// assert_eq!(tree.get(&key), Some(&[1][..]));
/// ```
pub struct RadixTree<V, C = u8, S = CaseInsensitive> {
    raw: RawRadixTree<V, C, S>,
}

impl<V> RadixTree<V> {
    /// Makes a new, empty, case-insensitive tree over byte keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("key", "value");
    /// assert_eq!(tree.node_count(), 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(CaseInsensitive)
    }
}

impl<V, C: Copy, S> RadixTree<V, C, S> {
    /// Makes a new, empty tree that matches characters with `compare`.
    #[must_use]
    pub fn with_comparator(compare: S) -> Self {
        RadixTree {
            raw: RawRadixTree::new(compare),
        }
    }

    /// Returns the comparison strategy this tree was built with.
    pub fn comparator(&self) -> &S {
        self.raw.comparator()
    }

    /// Returns the root node. Its key is always empty.
    pub fn root(&self) -> &Node<V, C> {
        self.raw.root()
    }

    /// Removes every key and value.
    ///
    /// Node references obtained earlier cannot outlive this call; the borrow
    /// checker rejects holding one across it.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("a", 1);
    /// tree.clear();
    /// assert_eq!(tree.node_count(), 1);
    /// assert_eq!(tree.value_count(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of nodes, counting the root.
    ///
    /// An empty tree has one node.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Returns the total number of values stored across all nodes.
    ///
    /// # Complexity
    ///
    /// O(n) in the number of nodes.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.iter().map(|(node, _)| node.values().len()).sum()
    }

    /// Returns true if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.raw.nodes().is_empty() {
            return !self.raw.root().has_value();
        }
        self.iter().all(|(node, _)| !node.has_value())
    }

    /// Returns a lazy pre-order iterator over `(node, depth)` pairs.
    ///
    /// The root comes first at depth 0; children follow in sorted order. Each
    /// call starts a fresh walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("ab", 1);
    /// tree.insert("ac", 2);
    ///
    /// let shape: Vec<(&[u8], usize)> = tree.iter().map(|(node, depth)| (node.key(), depth)).collect();
    /// assert_eq!(shape, [(&b""[..], 0), (&b"a"[..], 1), (&b"b"[..], 2), (&b"c"[..], 2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V, C> {
        Iter::new(self.raw.root(), self.raw.nodes())
    }

    /// Visits every node in pre-order with its depth.
    pub fn traverse_all<F>(&self, mut visitor: F)
    where
        F: FnMut(&Node<V, C>, usize),
    {
        for (node, depth) in self.iter() {
            visitor(node, depth);
        }
    }

    /// Folds the tree into a [`Statistics`] report.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::from_tree(self)
    }
}

impl<V, C: Copy, S: CharCompare<C>> RadixTree<V, C, S> {
    /// Appends `value` to the list stored at `key`.
    ///
    /// Inserting an existing key (under the comparison strategy) adds the value
    /// after the ones already there and creates no nodes. The empty key stores
    /// values on the root.
    ///
    /// # Complexity
    ///
    /// O(k log c) for a key of length k and at most c children per node.
    pub fn insert<K>(&mut self, key: &K, value: V)
    where
        K: AsRef<[C]> + ?Sized,
    {
        self.raw.insert(key.as_ref(), value);
    }

    /// Returns the root's child whose whole key is a prefix of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("Apple", 1);
    /// let node = tree.find_prefix_child("apple").unwrap();
    /// assert_eq!(node.key(), b"Apple");
    /// assert!(tree.find_prefix_child("app").is_none());
    /// ```
    pub fn find_prefix_child<K>(&self, key: &K) -> Option<&Node<V, C>>
    where
        K: AsRef<[C]> + ?Sized,
    {
        self.raw.find_prefix_child(key.as_ref()).map(|handle| self.raw.node(handle))
    }

    /// Returns a lazy iterator over the nodes on the path spelled by `query`.
    ///
    /// Items are `(node, segment)` where `segment` is the part of `query` the
    /// node's key matched. The root comes first, with an empty segment, if it
    /// holds values. The walk stops at the deepest node whose accumulated key
    /// is a prefix of `query`.
    pub fn path<'a, 'q, K>(&'a self, query: &'q K) -> Path<'a, 'q, V, C, S>
    where
        K: AsRef<[C]> + ?Sized,
    {
        Path::new(&self.raw, query.as_ref())
    }

    /// Walks the path spelled by `query`, calling `visitor` with each node and
    /// the matched segment of `query`. Returning `true` from `visitor` stops
    /// the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("a", 1);
    /// tree.insert("ab", 2);
    /// tree.insert("abc", 3);
    ///
    /// let mut first_match = None;
    /// tree.traverse("abcd", |node, _| {
    ///     first_match = node.values().first().copied();
    ///     first_match.is_some()
    /// });
    /// assert_eq!(first_match, Some(1));
    /// ```
    pub fn traverse<K, F>(&self, query: &K, mut visitor: F)
    where
        K: AsRef<[C]> + ?Sized,
        F: FnMut(&Node<V, C>, &[C]) -> bool,
    {
        for (node, segment) in self.path(query) {
            if visitor(node, segment) {
                break;
            }
        }
    }

    /// Returns a lazy pre-order iterator over the subtree rooted at the node
    /// whose accumulated key equals `key`.
    ///
    /// Depths are relative to that node, which comes first at depth 0. Returns
    /// `None` if no node sits at exactly `key`, for example when `key` ends in
    /// the middle of an edge. The empty key names the root, so
    /// `subtree("")` walks the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("car", 1);
    /// tree.insert("cart", 2);
    /// tree.insert("cat", 3);
    /// tree.insert("dog", 4);
    ///
    /// let values: Vec<i32> = tree
    ///     .subtree("CA")
    ///     .unwrap()
    ///     .flat_map(|(node, _)| node.values().iter().copied())
    ///     .collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// assert!(tree.subtree("c").is_none());
    /// ```
    pub fn subtree<K>(&self, key: &K) -> Option<Iter<'_, V, C>>
    where
        K: AsRef<[C]> + ?Sized,
    {
        let node = self.node_at(key.as_ref())?;
        Some(Iter::new(node, self.raw.nodes()))
    }

    /// Returns the values stored at exactly `key`, if any.
    pub fn get<K>(&self, key: &K) -> Option<&[V]>
    where
        K: AsRef<[C]> + ?Sized,
    {
        let node = self.node_at(key.as_ref())?;
        node.has_value().then(|| node.values())
    }

    /// Returns the values stored at exactly `key` for in-place modification.
    pub fn get_mut<K>(&mut self, key: &K) -> Option<&mut [V]>
    where
        K: AsRef<[C]> + ?Sized,
    {
        let key = key.as_ref();
        let node = if key.is_empty() {
            self.raw.root_mut()
        } else {
            let handle = self.raw.locate(key)?;
            self.raw.node_mut(handle)
        };
        if node.has_value() { Some(node.values_mut()) } else { None }
    }

    /// Returns true if any value is stored at exactly `key`.
    pub fn contains_key<K>(&self, key: &K) -> bool
    where
        K: AsRef<[C]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the longest key stored in the tree that is a prefix of `query`,
    /// as its length together with its values.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::RadixTree;
    ///
    /// let mut routes = RadixTree::new();
    /// routes.insert("/api", "api");
    /// routes.insert("/api/users", "users");
    ///
    /// assert_eq!(routes.longest_prefix("/API/users/42"), Some((10, &["users"][..])));
    /// assert_eq!(routes.longest_prefix("/api/items"), Some((4, &["api"][..])));
    /// assert_eq!(routes.longest_prefix("/home"), None);
    /// ```
    pub fn longest_prefix<K>(&self, query: &K) -> Option<(usize, &[V])>
    where
        K: AsRef<[C]> + ?Sized,
    {
        let mut len = 0;
        let mut best = None;
        for (node, segment) in self.path(query) {
            len += segment.len();
            if node.has_value() {
                best = Some((len, node.values()));
            }
        }
        best
    }

    fn node_at(&self, key: &[C]) -> Option<&Node<V, C>> {
        if key.is_empty() {
            Some(self.raw.root())
        } else {
            self.raw.locate(key).map(|handle| self.raw.node(handle))
        }
    }

    /// Checks that no two children of any node share a first character, that
    /// every non-root key is non-empty and that the root key is empty.
    ///
    /// # Panics
    ///
    /// Panics if the tree is malformed, which indicates a bug in this crate or
    /// an inconsistent [`CharCompare`] implementation.
    pub fn validate(&self) {
        self.raw.validate();
    }
}

impl<'a, V, C: Copy, S> IntoIterator for &'a RadixTree<V, C, S> {
    type Item = (&'a Node<V, C>, usize);
    type IntoIter = Iter<'a, V, C>;

    fn into_iter(self) -> Iter<'a, V, C> {
        self.iter()
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clone, S: Clone> Clone for RadixTree<V, C, S> {
    fn clone(&self) -> Self {
        RadixTree { raw: self.raw.clone() }
    }
}

impl<V: fmt::Debug, C: Copy + fmt::Debug, S> fmt::Debug for RadixTree<V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(node, depth)| (depth, node.key(), node.values())))
            .finish()
    }
}

impl<K, V, C, S> FromIterator<(K, V)> for RadixTree<V, C, S>
where
    K: AsRef<[C]>,
    C: Copy,
    S: CharCompare<C> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RadixTree::with_comparator(S::default());
        tree.extend(iter);
        tree
    }
}

impl<K, V, C, S> Extend<(K, V)> for RadixTree<V, C, S>
where
    K: AsRef<[C]>,
    C: Copy,
    S: CharCompare<C>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(&key, value);
        }
    }
}
