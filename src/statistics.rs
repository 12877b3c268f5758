//! Shape statistics for a [`RadixTree`].
//!
//! The report only reads the tree through its public traversal interface.

use alloc::collections::BTreeMap;
use core::fmt;

use crate::RadixTree;

/// Counts and histograms describing the shape of a [`RadixTree`].
///
/// Histograms map a bucket (child count, depth or value count) to the number
/// of nodes in it. The root is counted like any other node: as a leaf when the
/// tree is empty, as a branch at depth 0 otherwise.
///
/// # Examples
///
/// ```
/// use radix_index::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("cat", 1);
/// tree.insert("car", 2);
///
/// let stats = tree.statistics();
/// assert_eq!(stats.leaves, 2);
/// assert_eq!(stats.branches, 2);
/// assert_eq!(stats.branches_by_children.get(&2), Some(&1));
/// println!("{stats}");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Nodes without children.
    pub leaves: usize,
    /// Nodes with at least one child.
    pub branches: usize,
    /// All nodes, the root included.
    pub nodes: usize,
    /// Values summed over all nodes.
    pub values: usize,
    /// Branch count keyed by number of children.
    pub branches_by_children: BTreeMap<usize, usize>,
    /// Branch count keyed by depth.
    pub branches_by_depth: BTreeMap<usize, usize>,
    /// Leaf count keyed by depth.
    pub leaves_by_depth: BTreeMap<usize, usize>,
    /// Node count keyed by number of values held.
    pub nodes_by_values: BTreeMap<usize, usize>,
}

impl Statistics {
    /// Walks `tree` once and folds every node into a report.
    #[must_use]
    pub fn from_tree<V, C: Copy, S>(tree: &RadixTree<V, C, S>) -> Self {
        let mut stats = Statistics {
            nodes: tree.node_count(),
            values: tree.value_count(),
            ..Statistics::default()
        };

        tree.traverse_all(|node, depth| {
            if node.has_child() {
                stats.branches += 1;
                *stats.branches_by_children.entry(node.child_count()).or_default() += 1;
                *stats.branches_by_depth.entry(depth).or_default() += 1;
            } else {
                stats.leaves += 1;
                *stats.leaves_by_depth.entry(depth).or_default() += 1;
            }
            *stats.nodes_by_values.entry(node.values().len()).or_default() += 1;
        });

        stats
    }
}

fn write_histogram(f: &mut fmt::Formatter<'_>, label: &str, histogram: &BTreeMap<usize, usize>) -> fmt::Result {
    writeln!(f, "{label}:")?;
    for (bucket, count) in histogram {
        writeln!(f, "  {bucket}: {count}")?;
    }
    Ok(())
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of leaf: {}", self.leaves)?;
        writeln!(f, "Number of branch: {}", self.branches)?;
        writeln!(f, "Number of nodes: {}", self.nodes)?;
        writeln!(f, "Number of values: {}", self.values)?;
        write_histogram(f, "Branches by children", &self.branches_by_children)?;
        write_histogram(f, "Branches by level", &self.branches_by_depth)?;
        write_histogram(f, "Leaves by level", &self.leaves_by_depth)?;
        write_histogram(f, "Nodes by values", &self.nodes_by_values)
    }
}
