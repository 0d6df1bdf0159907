use multitree::*;
use proptest::prelude::*;
use rand::{self, Rng};
use std::collections::BTreeMap;

/// A straightforward model of a [`MultiTree`]: every key maps to its values in
/// insertion order. The tree lists the values of a key newest first.
#[derive(Clone, Default, Debug)]
pub struct Model {
    entries: BTreeMap<i32, Vec<u32>>,
    len: usize,
}

impl Model {
    pub fn insert(&mut self, key: i32, value: u32) {
        self.entries.entry(key).or_default().push(value);
        self.len += 1;
    }

    pub fn erase(&mut self, key: i32) -> usize {
        let removed = self.entries.remove(&key).map_or(0, |values| values.len());
        self.len -= removed;
        removed
    }

    pub fn remove_newest(&mut self, key: i32) -> Option<(i32, u32)> {
        let values = self.entries.get_mut(&key)?;
        let value = values.pop()?;
        if values.is_empty() {
            self.entries.remove(&key);
        }
        self.len -= 1;
        Some((key, value))
    }

    /// The values of a key in the order the tree iterates over them.
    pub fn run(&self, key: i32) -> Vec<u32> {
        self.entries
            .get(&key)
            .map(|values| values.iter().rev().copied().collect())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> Vec<(i32, u32)> {
        self.entries
            .iter()
            .flat_map(|(&key, values)| values.iter().rev().map(move |&value| (key, value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32, value: u32 },
    Erase { key: i32 },
    RemoveNewest { key: i32 },
    Find { key: i32 },
    Min { key: i32 },
    Max { key: i32 },
    Count { key: i32 },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Empty,
    Removed(usize),
    Entry(Option<(i32, u32)>),
    Counted(usize),
}

fn first_extreme(values: &[u32], is_better: impl Fn(u32, u32) -> bool) -> Option<u32> {
    let mut iter = values.iter().copied();
    let mut best = iter.next()?;
    for value in iter {
        if is_better(value, best) {
            best = value;
        }
    }
    Some(best)
}

fn cursor_entry(cursor: Cursor<'_, i32, u32>) -> RoundResult {
    RoundResult::Entry(cursor.get().map(|(k, v)| (*k, *v)))
}

pub fn run_round_tree(round_action: &RoundAction, tree: &mut MultiTree<i32, u32>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;

    match *round_action {
        Insert { key, value } => {
            tree.insert(key, value);
            Empty
        }
        Erase { key } => Removed(tree.erase(&key)),
        RemoveNewest { key } => Entry(tree.remove_entry(&key)),
        Find { key } => cursor_entry(tree.find(&key)),
        Min { key } => cursor_entry(tree.min(&key)),
        Max { key } => cursor_entry(tree.max(&key)),
        Count { key } => Counted(tree.count(&key)),
    }
}

pub fn run_round_model(round_action: &RoundAction, model: &mut Model) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;

    match *round_action {
        Insert { key, value } => {
            model.insert(key, value);
            Empty
        }
        Erase { key } => Removed(model.erase(key)),
        RemoveNewest { key } => Entry(model.remove_newest(key)),
        Find { key } => Entry(model.run(key).first().map(|&value| (key, value))),
        Min { key } => Entry(first_extreme(&model.run(key), |a, b| a < b).map(|v| (key, v))),
        Max { key } => Entry(first_extreme(&model.run(key), |a, b| a > b).map(|v| (key, v))),
        Count { key } => Counted(model.run(key).len()),
    }
}

pub fn tree_entries(tree: &MultiTree<i32, u32>) -> Vec<(i32, u32)> {
    tree.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, max_key: i32) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(0..=max_key);
    match rng.gen_range(0..10) {
        // inserting is the most common, so that the tree grows
        0..=3 => Insert {
            key,
            value: rng.gen_range(0..100),
        },
        4 => Erase { key },
        5 => RemoveNewest { key },
        6 => Find { key },
        7 => Min { key },
        8 => Max { key },
        _ => Count { key },
    }
}

/// Runs random rounds on a tree and on the model, and compares them after every round.
pub fn check_consistency(num_rounds: u32, max_key: i32) {
    let mut rng = rand::thread_rng();
    let mut tree = MultiTree::new();
    let mut model = Model::default();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng, max_key);
        let res1 = run_round_tree(&round_action, &mut tree);
        let res2 = run_round_model(&round_action, &mut model);
        assert_eq!(res1, res2, "{:?}", round_action);
        assert_eq!(tree.len(), model.len());
        // This check takes `O(n)` time. However, the trees in this test stay small.
        tree.assert_correctness();
    }
    assert_eq!(tree_entries(&tree), model.entries());
}

pub fn round_action_strategy(max_key: i32) -> impl Strategy<Value = RoundAction> {
    use RoundAction::*;
    prop_oneof![
        4 => (0..=max_key, 0..100u32).prop_map(|(key, value)| Insert { key, value }),
        1 => (0..=max_key).prop_map(|key| Erase { key }),
        1 => (0..=max_key).prop_map(|key| RemoveNewest { key }),
        1 => (0..=max_key).prop_map(|key| Find { key }),
        1 => (0..=max_key).prop_map(|key| Min { key }),
        1 => (0..=max_key).prop_map(|key| Max { key }),
        1 => (0..=max_key).prop_map(|key| Count { key }),
    ]
}

pub fn check_consistency_proptest(actions: &[RoundAction]) -> Result<(), TestCaseError> {
    let mut tree = MultiTree::new();
    let mut model = Model::default();
    for round_action in actions {
        let res1 = run_round_tree(round_action, &mut tree);
        let res2 = run_round_model(round_action, &mut model);
        prop_assert_eq!(res1, res2);
        prop_assert_eq!(tree.len(), model.len());
    }
    tree.assert_correctness();
    prop_assert_eq!(tree_entries(&tree), model.entries());
    Ok(())
}
