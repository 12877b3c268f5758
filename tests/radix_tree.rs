use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use radix_index::{CaseInsensitive, Exact, FnCompare, RadixTree};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Short keys over a tiny alphabet so that splits and duplicates are frequent.
fn key_strategy() -> impl Strategy<Value = String> {
    "[abcAB]{0,5}"
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn fold(key: &str) -> Vec<u8> {
    key.bytes().map(|b| b.to_ascii_uppercase()).collect()
}

/// Pre-order dump of `(depth, key, values)` for structural assertions.
fn shape(tree: &RadixTree<i64>) -> Vec<(usize, String, Vec<i64>)> {
    tree.iter()
        .map(|(node, depth)| (depth, String::from_utf8(node.key().to_vec()).unwrap(), node.values().to_vec()))
        .collect()
}

fn node(depth: usize, key: &str, values: &[i64]) -> (usize, String, Vec<i64>) {
    (depth, key.to_string(), values.to_vec())
}

/// Longest key in `model` that prefixes `query` case-insensitively.
fn model_longest_prefix<'a>(model: &'a BTreeMap<Vec<u8>, Vec<i64>>, query: &str) -> Option<(usize, &'a [i64])> {
    let folded = fold(query);
    (0..=folded.len()).rev().find_map(|len| model.get(&folded[..len]).map(|values| (len, values.as_slice())))
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(String, i64),
    Get(String),
    LongestPrefix(String),
    Clear,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        10 => (key_strategy(), value_strategy()).prop_map(|(k, v)| TreeOp::Insert(k, v)),
        3 => key_strategy().prop_map(TreeOp::Get),
        3 => "[abcAB]{0,8}".prop_map(TreeOp::LongestPrefix),
        1 => Just(TreeOp::Clear),
    ]
}

// ─── Randomized model checks ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both the tree and a case-folded `BTreeMap`
    /// and asserts identical results at every step.
    #[test]
    fn tree_ops_match_model(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: RadixTree<i64> = RadixTree::new();
        let mut model: BTreeMap<Vec<u8>, Vec<i64>> = BTreeMap::new();

        for op in &ops {
            match op {
                TreeOp::Insert(k, v) => {
                    tree.insert(k, *v);
                    model.entry(fold(k)).or_default().push(*v);
                }
                TreeOp::Get(k) => {
                    let expected = model.get(&fold(k)).map(Vec::as_slice);
                    prop_assert_eq!(tree.get(k), expected, "get({:?})", k);
                    prop_assert_eq!(tree.contains_key(k), expected.is_some(), "contains_key({:?})", k);
                }
                TreeOp::LongestPrefix(q) => {
                    prop_assert_eq!(tree.longest_prefix(q), model_longest_prefix(&model, q), "longest_prefix({:?})", q);
                }
                TreeOp::Clear => {
                    tree.clear();
                    model.clear();
                    prop_assert_eq!(tree.node_count(), 1);
                }
            }
            tree.validate();
            prop_assert_eq!(tree.value_count(), model.values().map(Vec::len).sum::<usize>(), "value_count after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.is_empty(), "is_empty after {:?}", op);
        }
    }

    /// Every inserted value is reachable by walking its own key.
    #[test]
    fn inserted_values_are_reachable(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..200)) {
        let tree: RadixTree<i64> = entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();

        for (key, value) in &entries {
            let mut depth = 0;
            let mut last = None;
            for (node, segment) in tree.path(key) {
                depth += segment.len();
                last = Some(node);
            }
            prop_assert_eq!(depth, key.len(), "path for {:?} stops early", key);
            let last = last.expect("path must visit at least one node");
            prop_assert!(last.values().contains(value), "{:?} missing at {:?}", value, key);
        }
    }

    /// A subtree holds exactly the values whose keys extend the subtree's key.
    #[test]
    fn subtree_matches_model_range(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..200),
        prefix in "[abcAB]{0,3}",
    ) {
        let tree: RadixTree<i64> = entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let mut model: BTreeMap<Vec<u8>, Vec<i64>> = BTreeMap::new();
        for (k, v) in &entries {
            model.entry(fold(k)).or_default().push(*v);
        }

        let folded = fold(&prefix);
        let Some(subtree) = tree.subtree(&prefix) else {
            prop_assert!(!model.contains_key(&folded), "stored key {:?} has no subtree", prefix);
            return Ok(());
        };

        let mut found: Vec<i64> = Vec::new();
        for (index, (node, depth)) in subtree.enumerate() {
            prop_assert_eq!(index == 0, depth == 0);
            found.extend_from_slice(node.values());
        }
        let mut expected: Vec<i64> = model
            .range(folded.clone()..)
            .take_while(|(key, _)| key.starts_with(&folded))
            .flat_map(|(_, values)| values.iter().copied())
            .collect();
        found.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(found, expected);
    }

    /// Counts reported by the tree agree with an independent traversal.
    #[test]
    fn counts_match_traversal(keys in proptest::collection::vec(key_strategy(), 0..300)) {
        let mut tree = RadixTree::new();
        for (value, key) in keys.iter().enumerate() {
            tree.insert(key, value);
        }

        let mut nodes = 0;
        let mut values = 0;
        tree.traverse_all(|node, _| {
            nodes += 1;
            values += node.values().len();
        });
        prop_assert_eq!(nodes, tree.node_count());
        prop_assert_eq!(values, tree.value_count());
        prop_assert_eq!(values, keys.len());

        // Each distinct key adds at most a leaf and a branch.
        let distinct: std::collections::BTreeSet<Vec<u8>> = keys.iter().map(|k| fold(k)).collect();
        prop_assert!(tree.node_count() <= 1 + 2 * distinct.len());

        let stats = tree.statistics();
        prop_assert_eq!(stats.nodes, nodes);
        prop_assert_eq!(stats.leaves + stats.branches, nodes);
        prop_assert_eq!(stats.nodes_by_values.values().sum::<usize>(), nodes);
    }

    /// With exact comparison, keys differing only in case stay apart.
    #[test]
    fn exact_tree_matches_model(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..300)) {
        let mut tree: RadixTree<i64, u8, Exact> = RadixTree::with_comparator(Exact);
        let mut model: BTreeMap<Vec<u8>, Vec<i64>> = BTreeMap::new();

        for (k, v) in &entries {
            tree.insert(k, *v);
            model.entry(k.as_bytes().to_vec()).or_default().push(*v);
        }
        tree.validate();

        for (k, values) in &model {
            prop_assert_eq!(tree.get(k), Some(values.as_slice()));
        }
    }

    /// Unicode `char` keys fold case through the simple upper-case mapping.
    #[test]
    fn char_keys_fold_case(words in proptest::collection::vec("[aäöσΣÄ]{1,4}", 1..100)) {
        let mut tree: RadixTree<usize, char, CaseInsensitive> = RadixTree::with_comparator(CaseInsensitive);
        for (value, word) in words.iter().enumerate() {
            let key: Vec<char> = word.chars().collect();
            tree.insert(&key, value);
        }
        tree.validate();

        for word in &words {
            let upper: Vec<char> = word.chars().flat_map(char::to_uppercase).collect();
            prop_assert!(tree.contains_key(&upper), "{:?} not found as {:?}", word, upper);
        }
    }
}

// ─── Structural scenarios ────────────────────────────────────────────────────

#[test]
fn divergent_keys_share_a_branch() {
    let mut tree = RadixTree::new();
    tree.insert("cat", 1);
    tree.insert("car", 2);

    assert_eq!(
        shape(&tree),
        vec![node(0, "", &[]), node(1, "ca", &[]), node(2, "r", &[2]), node(2, "t", &[1])]
    );
    tree.validate();
}

#[test]
fn divergent_split_after_two_characters() {
    let mut tree = RadixTree::new();
    tree.insert("abc", 1);
    tree.insert("abd", 2);

    assert_eq!(
        shape(&tree),
        vec![node(0, "", &[]), node(1, "ab", &[]), node(2, "c", &[1]), node(2, "d", &[2])]
    );
}

#[test]
fn shorter_key_splits_existing_node() {
    let mut tree = RadixTree::new();
    tree.insert("abc", 1);
    tree.insert("ab", 2);

    assert_eq!(shape(&tree), vec![node(0, "", &[]), node(1, "ab", &[2]), node(2, "c", &[1])]);
}

#[test]
fn split_carries_subtree_and_values() {
    let mut tree = RadixTree::new();
    tree.insert("interest", 1);
    tree.insert("interesting", 2);
    tree.insert("interesting", 3);
    tree.insert("internet", 4);
    tree.insert("in", 5);

    assert_eq!(
        shape(&tree),
        vec![
            node(0, "", &[]),
            node(1, "in", &[5]),
            node(2, "ter", &[]),
            node(3, "est", &[1]),
            node(4, "ing", &[2, 3]),
            node(3, "net", &[4]),
        ]
    );
    tree.validate();
}

#[test]
fn subtree_lists_completions() {
    let mut tree = RadixTree::new();
    tree.insert("car", 1);
    tree.insert("cart", 2);
    tree.insert("cat", 3);
    tree.insert("dog", 4);

    let completions: Vec<(usize, String, Vec<i64>)> = tree
        .subtree("ca")
        .expect("branch at \"ca\"")
        .map(|(node, depth)| (depth, String::from_utf8(node.key().to_vec()).unwrap(), node.values().to_vec()))
        .collect();
    assert_eq!(
        completions,
        vec![node(0, "ca", &[]), node(1, "r", &[1]), node(2, "t", &[2]), node(1, "t", &[3])]
    );
}

#[test]
fn empty_key_stores_on_root() {
    let mut tree = RadixTree::new();
    tree.insert("", 99);

    assert_eq!(tree.root().values(), [99]);
    assert_eq!(tree.value_count(), 1);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.get(""), Some(&[99][..]));
}

#[test]
fn find_prefix_child_ignores_case() {
    let mut tree = RadixTree::new();
    tree.insert("Apple", 1);

    let found = tree.find_prefix_child("apple").expect("case-insensitive match");
    assert_eq!(found.key(), b"Apple");
    assert_eq!(found.values(), [1]);

    // Shares only "A" with "Apple", so the branch keeps the newer spelling.
    tree.insert("ABC", 2);
    let branch = tree.find_prefix_child("abc").expect("case-insensitive match");
    assert_eq!(branch.key(), b"A");
    assert_eq!(branch.child_count(), 2);
    assert!(tree.find_prefix_child("apple").is_some());
}

#[test]
fn duplicate_key_appends_without_new_nodes() {
    let mut tree = RadixTree::new();
    tree.insert("test", 1);
    let nodes = tree.node_count();
    tree.insert("TEST", 2);

    assert_eq!(tree.value_count(), 2);
    assert_eq!(tree.node_count(), nodes);
    assert_eq!(tree.get("test"), Some(&[1, 2][..]));
}

#[test]
fn clear_leaves_only_the_root() {
    let mut tree: RadixTree<i64> = ["alpha", "alphabet", "beta", ""].iter().map(|k| (*k, 1)).collect();
    assert_eq!(tree.value_count(), 4);

    tree.clear();
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.value_count(), 0);
    assert!(tree.is_empty());
    assert_eq!(shape(&tree), vec![node(0, "", &[])]);

    tree.insert("gamma", 7);
    assert_eq!(shape(&tree), vec![node(0, "", &[]), node(1, "gamma", &[7])]);
    tree.validate();
}

#[test]
fn traverse_visits_longest_prefix_path() {
    let mut tree = RadixTree::new();
    tree.insert("", 0);
    tree.insert("a", 1);
    tree.insert("abc", 3);
    tree.insert("abd", 4);

    let mut visited = Vec::new();
    tree.traverse("ABCDE", |node, segment| {
        visited.push((String::from_utf8(segment.to_vec()).unwrap(), node.values().to_vec()));
        false
    });
    assert_eq!(
        visited,
        vec![
            (String::new(), vec![0]),
            ("A".to_string(), vec![1]),
            ("B".to_string(), vec![]),
            ("C".to_string(), vec![3]),
        ]
    );
}

#[test]
fn traverse_stops_on_root_request() {
    let mut tree = RadixTree::new();
    tree.insert("", 0);
    tree.insert("a", 1);

    let mut calls = 0;
    tree.traverse("a", |_, _| {
        calls += 1;
        true
    });
    assert_eq!(calls, 1);
}

#[test]
fn custom_comparator_pairs() {
    // Treats '-' and '_' as the same character.
    let normalize = |c: u8| if c == b'_' { b'-' } else { c };
    let compare = FnCompare::new(move |a, b| normalize(a) == normalize(b), move |a, b| normalize(a) < normalize(b));
    let mut tree: RadixTree<i32, u8, _> = RadixTree::with_comparator(compare);
    tree.insert("snake_case", 1);
    tree.insert("snake-case", 2);

    assert_eq!(tree.get("snake_case"), Some(&[1, 2][..]));
    assert_eq!(tree.node_count(), 2);
    tree.validate();
}

#[test]
fn statistics_report() {
    let tree: RadixTree<i64> = [("cat", 1), ("car", 2), ("dog", 3)].into_iter().collect();
    let report = tree.statistics().to_string();

    assert_eq!(
        report,
        "Number of leaf: 3\n\
         Number of branch: 2\n\
         Number of nodes: 5\n\
         Number of values: 3\n\
         Branches by children:\n  2: 2\n\
         Branches by level:\n  0: 1\n  1: 1\n\
         Leaves by level:\n  1: 1\n  2: 2\n\
         Nodes by values:\n  0: 2\n  1: 3\n"
    );
}
