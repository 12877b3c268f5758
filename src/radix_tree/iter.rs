use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::compare::CharCompare;
use crate::raw::{Arena, Handle, Node, RawRadixTree};

/// A lazy pre-order iterator over the nodes of a [`RadixTree`](super::RadixTree),
/// yielding each node with its depth.
///
/// This `struct` is created by [`RadixTree::iter`](super::RadixTree::iter) and
/// [`RadixTree::subtree`](super::RadixTree::subtree).
pub struct Iter<'a, V, C> {
    nodes: &'a Arena<Node<V, C>>,
    stack: SmallVec<[(&'a Node<V, C>, usize); 16]>,
}

impl<'a, V, C: Copy> Iter<'a, V, C> {
    pub(super) fn new(root: &'a Node<V, C>, nodes: &'a Arena<Node<V, C>>) -> Self {
        let mut stack = SmallVec::new();
        stack.push((root, 0));
        Iter { nodes, stack }
    }
}

impl<'a, V, C: Copy> Iterator for Iter<'a, V, C> {
    type Item = (&'a Node<V, C>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reversed so the smallest child is popped first.
        for handle in node.children().rev() {
            self.stack.push((self.nodes.get(handle), depth + 1));
        }
        Some((node, depth))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<V, C: Copy> FusedIterator for Iter<'_, V, C> {}

impl<V, C> Clone for Iter<'_, V, C> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            stack: self.stack.clone(),
        }
    }
}

/// A lazy iterator over the nodes along a query's path, yielding each node
/// with the segment of the query it matched.
///
/// This `struct` is created by [`RadixTree::path`](super::RadixTree::path).
pub struct Path<'a, 'q, V, C, S> {
    raw: &'a RawRadixTree<V, C, S>,
    rest: &'q [C],
    cursor: Option<Handle>,
    root_pending: bool,
    done: bool,
}

impl<'a, 'q, V, C: Copy, S> Path<'a, 'q, V, C, S> {
    pub(super) fn new(raw: &'a RawRadixTree<V, C, S>, query: &'q [C]) -> Self {
        Path {
            raw,
            rest: query,
            cursor: None,
            root_pending: true,
            done: false,
        }
    }
}

impl<'a, 'q, V, C: Copy, S: CharCompare<C>> Iterator for Path<'a, 'q, V, C, S> {
    type Item = (&'a Node<V, C>, &'q [C]);

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.raw;
        if self.root_pending {
            self.root_pending = false;
            let root = raw.root();
            if root.has_value() {
                return Some((root, &self.rest[..0]));
            }
        }
        if self.done {
            return None;
        }

        let Some(handle) = raw.find_prefix_child_of(self.cursor, self.rest) else {
            self.done = true;
            return None;
        };
        let node = raw.node(handle);
        let (matched, rest) = self.rest.split_at(node.key().len());
        self.rest = rest;
        self.cursor = Some(handle);
        Some((node, matched))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            // Every node after the root consumes at least one character.
            (0, Some(self.rest.len() + usize::from(self.root_pending)))
        }
    }
}

impl<V, C: Copy, S: CharCompare<C>> FusedIterator for Path<'_, '_, V, C, S> {}
