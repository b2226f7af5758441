//! PUCT selection
//!
//! At every internal node the child maximising
//!
//! ```text
//! UCB(a) = Q(a) + c_puct · P(a) · sqrt(Σ_b N(b)) / (1 + N(a))
//! ```
//!
//! is followed until a leaf is reached. `P` is the node's stored prior mixed
//! with fresh Dirichlet noise on every visit, at every depth.

use crate::mcts::action_map::ActionMap;
use crate::mcts::distribution::mix_dirichlet_noise;
use crate::mcts::node::Node;
use crate::{MctsError, Result};
use rand::Rng;

/// Computes `Q(a) + U(a)` for each action.
///
/// When every count is zero the square root vanishes and the score is exactly
/// `Q(a)`: priors play no part in the very first choice at a node.
///
/// # Arguments
/// * `action_values` - Q per action; the result follows this map's order
/// * `prior_probs` - P per action
/// * `action_counts` - N per action
/// * `c_puct` - Exploration constant
///
/// # Errors
/// [`MctsError::MismatchedActions`] if an action of `action_values` is missing
/// from the other maps.
pub fn compute_ucb<A: Clone + PartialEq>(
    action_values: &ActionMap<A, f64>,
    prior_probs: &ActionMap<A, f64>,
    action_counts: &ActionMap<A, u32>,
    c_puct: f64,
) -> Result<ActionMap<A, f64>> {
    let total_visits = action_counts.values().map(|&n| n as f64).sum::<f64>().sqrt();

    action_values
        .iter()
        .map(|(action, &q)| {
            let prior = *prior_probs.get(action).ok_or(MctsError::MismatchedActions)?;
            let count = *action_counts.get(action).ok_or(MctsError::MismatchedActions)?;
            let ucb = q + prior / (1.0 + count as f64) * c_puct * total_visits;
            Ok((action.clone(), ucb))
        })
        .collect()
}

/// Index of the highest score; the first one wins ties.
fn first_argmax<A>(scores: &ActionMap<A, f64>) -> usize {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_index = 0;

    for (i, &score) in scores.values().enumerate() {
        if score > best_score {
            best_score = score;
            best_index = i;
        }
    }

    best_index
}

/// Route from a start node down to a leaf.
///
/// Nodes cannot be borrowed along the whole path at once, so the path is
/// stored as the child index taken at each step (plus the action, for
/// callers) and resolved against the tree on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPath<A> {
    indices: Vec<usize>,
    actions: Vec<A>,
}

impl<A> Default for SearchPath<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> SearchPath<A> {
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, index: usize, action: A) {
        self.indices.push(index);
        self.actions.push(action);
    }

    /// Actions taken, one fewer than the number of nodes.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Child index taken at each step.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of nodes on the path, start node and leaf included.
    pub fn len(&self) -> usize {
        self.indices.len() + 1
    }

    /// Every node on the path, from `root` to the leaf.
    pub fn nodes<'a, S>(&self, root: &'a Node<S, A>) -> Result<Vec<&'a Node<S, A>>> {
        let mut nodes = Vec::with_capacity(self.len());
        let mut node = root;
        nodes.push(node);
        for &index in &self.indices {
            node = node.child_at(index).ok_or(MctsError::InvalidPath)?;
            nodes.push(node);
        }
        Ok(nodes)
    }

    pub fn leaf<'a, S>(&self, root: &'a Node<S, A>) -> Result<&'a Node<S, A>> {
        let mut node = root;
        for &index in &self.indices {
            node = node.child_at(index).ok_or(MctsError::InvalidPath)?;
        }
        Ok(node)
    }

    pub fn leaf_mut<'a, S>(&self, root: &'a mut Node<S, A>) -> Result<&'a mut Node<S, A>> {
        let mut node = root;
        for &index in &self.indices {
            node = node.child_at_mut(index).ok_or(MctsError::InvalidPath)?;
        }
        Ok(node)
    }
}

/// Walks from `start` to a leaf, following the highest PUCT score.
///
/// Dirichlet noise with the given `dirichlet_epsilon`/`dirichlet_alpha` is
/// mixed into the priors of every node on the way, not only the start node.
///
/// # Returns
/// The path taken; empty of actions when `start` is itself a leaf.
pub fn select<S, A, R>(
    start: &Node<S, A>,
    c_puct: f64,
    dirichlet_epsilon: f64,
    dirichlet_alpha: f64,
    rng: &mut R,
) -> Result<SearchPath<A>>
where
    A: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let mut path = SearchPath::new();
    let mut node = start;

    while !node.is_leaf() {
        let action_values = node.children().map_values(|child| child.mean_value);
        let action_counts = node.child_visit_counts();
        let prior_probs =
            mix_dirichlet_noise(node.prior_probs(), dirichlet_epsilon, dirichlet_alpha, rng)?;

        let scores = compute_ucb(&action_values, &prior_probs, &action_counts, c_puct)?;
        let index = first_argmax(&scores);

        let (action, child) = node
            .children()
            .get_index(index)
            .ok_or(MctsError::InvalidPath)?;
        path.push(index, action.clone());
        node = child;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::Player;
    use crate::mcts::distribution::sample_dirichlet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn actions<V: Copy>(entries: &[(char, V)]) -> ActionMap<char, V> {
        entries.iter().copied().collect()
    }

    /// root -> {a, b}, a -> {c, d}
    fn two_level_tree() -> Node<u8, char> {
        let mut root = Node::new(0, Player::One, false);
        root.expand(
            actions(&[('a', 0.5), ('b', 0.5)]),
            actions(&[('a', 1), ('b', 2)]),
            actions(&[('a', Player::Two), ('b', Player::Two)]),
            actions(&[('a', false), ('b', false)]),
        )
        .unwrap();
        root.child_at_mut(0)
            .unwrap()
            .expand(
                actions(&[('c', 0.9), ('d', 0.1)]),
                actions(&[('c', 3), ('d', 4)]),
                actions(&[('c', Player::One), ('d', Player::One)]),
                actions(&[('c', true), ('d', false)]),
            )
            .unwrap();
        root
    }

    #[test]
    fn test_ucb_without_visits_is_q() {
        let q = actions(&[('a', 0.3), ('b', -0.2), ('c', 0.0)]);
        let p = actions(&[('a', 0.1), ('b', 0.8), ('c', 0.1)]);
        let n = actions(&[('a', 0u32), ('b', 0), ('c', 0)]);

        let ucb = compute_ucb(&q, &p, &n, 5.0).unwrap();
        for (action, value) in q.iter() {
            assert_eq!(ucb.get(action), Some(value));
        }
    }

    #[test]
    fn test_ucb_formula() {
        let q = actions(&[('a', 0.5), ('b', 0.0)]);
        let p = actions(&[('a', 0.25), ('b', 0.75)]);
        let n = actions(&[('a', 3u32), ('b', 1)]);

        let ucb = compute_ucb(&q, &p, &n, 2.0).unwrap();
        // sqrt(4) = 2
        assert!((ucb.get(&'a').unwrap() - (0.5 + 2.0 * 0.25 * 2.0 / 4.0)).abs() < 1e-12);
        assert!((ucb.get(&'b').unwrap() - (0.0 + 2.0 * 0.75 * 2.0 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_missing_prior_is_an_error() {
        let q = actions(&[('a', 0.5), ('b', 0.0)]);
        let p = actions(&[('a', 1.0)]);
        let n = actions(&[('a', 1u32), ('b', 1)]);
        assert!(matches!(
            compute_ucb(&q, &p, &n, 1.0),
            Err(MctsError::MismatchedActions)
        ));
    }

    #[test]
    fn test_first_argmax_breaks_ties_by_order() {
        assert_eq!(first_argmax(&actions(&[('x', 1.0), ('y', 1.0), ('z', 0.5)])), 0);
        assert_eq!(first_argmax(&actions(&[('x', 0.0), ('y', 2.0), ('z', 2.0)])), 1);
    }

    #[test]
    fn test_select_from_leaf_is_trivial() {
        let leaf: Node<u8, char> = Node::new(0, Player::One, false);
        let mut rng = StdRng::seed_from_u64(1);

        let path = select(&leaf, 1.0, 0.25, 0.03, &mut rng).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path.actions().is_empty());
        assert_eq!(path.leaf(&leaf).unwrap().state, 0);
    }

    #[test]
    fn test_select_descends_to_a_leaf() {
        let tree = two_level_tree();
        let mut rng = StdRng::seed_from_u64(1);

        // Untouched statistics: every score equals Q = 0, so the first child wins at each level.
        let path = select(&tree, 1.0, 0.0, 0.03, &mut rng).unwrap();
        assert_eq!(path.actions(), &['a', 'c']);
        assert_eq!(path.len(), 3);

        let nodes = path.nodes(&tree).unwrap();
        let states: Vec<u8> = nodes.iter().map(|n| n.state).collect();
        assert_eq!(states, vec![0, 1, 3]);
        assert!(path.leaf(&tree).unwrap().is_leaf());
    }

    #[test]
    fn test_select_follows_best_score() {
        let mut tree = two_level_tree();
        {
            let b = tree.child_at_mut(1).unwrap();
            b.record_value(1.0);
        }
        {
            let a = tree.child_at_mut(0).unwrap();
            a.record_value(-1.0);
        }
        let mut rng = StdRng::seed_from_u64(7);

        let path = select(&tree, 0.1, 0.0, 0.03, &mut rng).unwrap();
        assert_eq!(path.actions(), &['b']);
    }

    #[test]
    fn test_noise_is_drawn_at_every_node_on_the_path() {
        let tree = two_level_tree();
        let mut rng = StdRng::seed_from_u64(21);
        let mut reference_rng = StdRng::seed_from_u64(21);

        let path = select(&tree, 1.0, 0.25, 0.3, &mut rng).unwrap();
        assert_eq!(path.actions(), &['a', 'c']);

        // One draw at the root, one at `a`, none at the leaf.
        sample_dirichlet(0.3, 2, &mut reference_rng).unwrap();
        sample_dirichlet(0.3, 2, &mut reference_rng).unwrap();

        let after_select = sample_dirichlet(0.3, 2, &mut rng).unwrap();
        let after_reference = sample_dirichlet(0.3, 2, &mut reference_rng).unwrap();
        assert_eq!(after_select, after_reference);
    }

    #[test]
    fn test_invalid_path_is_reported() {
        let tree = two_level_tree();
        let mut path = SearchPath::new();
        path.push(5, 'q');

        assert!(matches!(path.leaf(&tree), Err(MctsError::InvalidPath)));
    }
}
