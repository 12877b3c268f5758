use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::compare::{self, CharCompare};
use crate::tracing_helpers::{debug_log, trace_log};

/// The core radix tree backing `RadixTree`.
#[derive(Clone)]
pub(crate) struct RawRadixTree<V, C, S> {
    /// The root node. Owned directly, never stored in `nodes`.
    root: Node<V, C>,
    /// Arena storing every non-root node.
    nodes: Arena<Node<V, C>>,
    /// Character comparison strategy used for every match.
    compare: S,
}

/// How a key relates to the child that shares its first character.
enum Overlap {
    /// The key and the child's key are equal.
    Exact,
    /// The child's key is a strict prefix of the key.
    Descend(usize),
    /// The key is a strict prefix of the child's key.
    Shorter(usize),
    /// The keys share a strict prefix of both.
    Diverge(usize),
}

impl<V, C: Copy, S> RawRadixTree<V, C, S> {
    /// Creates a new, empty tree.
    pub(crate) fn new(compare: S) -> Self {
        Self {
            root: Node::new(&[]),
            nodes: Arena::new(),
            compare,
        }
    }

    /// Creates a new tree with room for `capacity` non-root nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: S) -> Self {
        Self {
            root: Node::new(&[]),
            nodes: Arena::with_capacity(capacity),
            compare,
        }
    }

    /// Returns the number of non-root nodes the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn root(&self) -> &Node<V, C> {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node<V, C> {
        &mut self.root
    }

    pub(crate) fn comparator(&self) -> &S {
        &self.compare
    }

    /// Returns a reference to a non-root node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<V, C> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a non-root node by handle.
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<V, C> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn nodes(&self) -> &Arena<Node<V, C>> {
        &self.nodes
    }

    /// Number of nodes including the root.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len() + 1
    }

    /// Releases every node and value. The root survives, emptied.
    pub(crate) fn clear(&mut self) {
        debug_log!(nodes = self.nodes.len(), "clearing radix tree");
        self.root.clear();
        self.nodes.clear();
    }

    fn parent(&self, parent: Option<Handle>) -> &Node<V, C> {
        match parent {
            Some(handle) => self.nodes.get(handle),
            None => &self.root,
        }
    }

    fn parent_mut(&mut self, parent: Option<Handle>) -> &mut Node<V, C> {
        match parent {
            Some(handle) => self.nodes.get_mut(handle),
            None => &mut self.root,
        }
    }
}

impl<V, C: Copy, S: CharCompare<C>> RawRadixTree<V, C, S> {
    /// Appends `value` at `key`, creating or splitting nodes as needed.
    pub(crate) fn insert(&mut self, key: &[C], value: V) {
        if key.is_empty() {
            self.root.append_value(value);
        } else {
            let handle = self.append_child(key);
            self.nodes.get_mut(handle).append_value(value);
        }
    }

    /// Returns the node whose accumulated key equals `key`, creating it if necessary.
    ///
    /// Walks down from the root. At each level the child sharing `key`'s first
    /// character (there is at most one) is either matched exactly, descended
    /// into, or split so that the matched part becomes its own node.
    pub(crate) fn append_child(&mut self, key: &[C]) -> Handle {
        debug_assert!(!key.is_empty(), "`RawRadixTree::append_child()` - `key` is empty!");

        let mut parent: Option<Handle> = None;
        let mut key = key;
        loop {
            let first = key[0];
            let index = match self.parent(parent).search_child(first, &self.compare) {
                Ok(index) => index,
                Err(slot) => {
                    let leaf = self.nodes.alloc(Node::new(key));
                    self.parent_mut(parent).insert_child(slot, first, leaf);
                    return leaf;
                }
            };

            let candidate = self.parent(parent).child(index);
            match self.overlap(key, candidate) {
                Overlap::Exact => return candidate,
                Overlap::Descend(common) => {
                    parent = Some(candidate);
                    key = &key[common..];
                }
                Overlap::Shorter(common) => {
                    return self.split_child(parent, index, common, key);
                }
                Overlap::Diverge(common) => {
                    let branch = self.split_child(parent, index, common, &key[..common]);
                    let rest = &key[common..];
                    let leaf = self.nodes.alloc(Node::new(rest));
                    let branch_node = self.nodes.get_mut(branch);
                    match branch_node.search_child(rest[0], &self.compare) {
                        Err(slot) => branch_node.insert_child(slot, rest[0], leaf),
                        Ok(_) => unreachable!("`RawRadixTree::append_child()` - diverging keys share a character!"),
                    }
                    return leaf;
                }
            }
        }
    }

    fn overlap(&self, key: &[C], candidate: Handle) -> Overlap {
        let candidate_key = self.nodes.get(candidate).key();
        let common = compare::common_prefix_len(key, candidate_key, &self.compare);
        debug_assert!(common >= 1, "`RawRadixTree::overlap()` - candidate does not share the first character!");

        match (common == key.len(), common == candidate_key.len()) {
            (true, true) => Overlap::Exact,
            (false, true) => Overlap::Descend(common),
            (true, false) => Overlap::Shorter(common),
            (false, false) => Overlap::Diverge(common),
        }
    }

    /// Puts a new node keyed `branch_key` between `parent` and its child at `index`.
    ///
    /// The child keeps its values and children; only the first `common`
    /// characters of its key move to the new node.
    fn split_child(&mut self, parent: Option<Handle>, index: usize, common: usize, branch_key: &[C]) -> Handle {
        let child = self.parent(parent).child(index);
        let moved = self.nodes.get_mut(child);
        moved.truncate_key_front(common);
        let moved_first = moved.key()[0];
        trace_log!(common, remaining = moved.key().len(), "splitting radix node");

        let mut branch = Node::new(branch_key);
        branch.insert_child(0, moved_first, child);
        let branch = self.nodes.alloc(branch);
        self.parent_mut(parent).replace_child(index, branch_key[0], branch);
        branch
    }

    /// Finds the root's child whose key is a prefix of `key`.
    pub(crate) fn find_prefix_child(&self, key: &[C]) -> Option<Handle> {
        self.root.find_prefix_child(&self.nodes, key, &self.compare)
    }

    /// Finds the child of `handle` whose key is a prefix of `key`.
    pub(crate) fn find_prefix_child_of(&self, handle: Option<Handle>, key: &[C]) -> Option<Handle> {
        self.parent(handle).find_prefix_child(&self.nodes, key, &self.compare)
    }

    /// Finds the node whose accumulated key equals `key`. Returns `None` for an
    /// empty key, which names the root.
    pub(crate) fn locate(&self, key: &[C]) -> Option<Handle> {
        let mut current = None;
        let mut rest = key;
        while !rest.is_empty() {
            let handle = self.find_prefix_child_of(current, rest)?;
            rest = &rest[self.nodes.get(handle).key().len()..];
            current = Some(handle);
        }
        current
    }

    /// Walks the tree checking every node's child set, the root's empty key,
    /// and that every node in the arena is reachable exactly once.
    ///
    /// # Panics
    ///
    /// Panics if the tree is malformed.
    pub(crate) fn validate(&self) {
        assert!(self.root.key().is_empty(), "`RawRadixTree::validate()` - root key is not empty!");

        let mut reached = 0;
        let mut stack = alloc::vec![&self.root];
        while let Some(node) = stack.pop() {
            node.validate(&self.nodes, &self.compare);
            reached += 1;
            assert!(reached <= self.node_count(), "`RawRadixTree::validate()` - a node is linked twice!");
            stack.extend(node.children().map(|handle| self.nodes.get(handle)));
        }
        assert_eq!(
            reached,
            self.node_count(),
            "`RawRadixTree::validate()` - arena holds unreachable nodes!"
        );
    }
}
