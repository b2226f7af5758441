//! MCTS search tree nodes
//!
//! Each node owns its children outright, keyed by the action that leads to
//! them. There are no parent pointers: the selector records the path it takes
//! and backup walks that path down from the root again. Dropping the root
//! releases the whole tree.
//!
//! Statistics follow the AlphaGo Zero naming: `N` visit count, `W` cumulative
//! value and `Q` mean value of the edge leading *into* the node.

use crate::game::player::Player;
use crate::game::rules::Game;
use crate::mcts::action_map::ActionMap;
use crate::{MctsError, Result};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A node in the search tree
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    /// Game position this node stands for
    pub state: S,

    /// Player to act at `state`
    pub player: Player,

    /// Whether `state` ends the game
    pub is_terminal: bool,

    /// Number of times selection reached this node (N)
    pub visit_count: u32,

    /// Sum of values backed up through the incoming edge (W)
    pub cumulative_value: f64,

    /// `cumulative_value / visit_count`, zero before the first valued visit (Q)
    pub mean_value: f64,

    children: ActionMap<A, Node<S, A>>,
    prior_probs: ActionMap<A, f64>,
}

impl<S, A> Node<S, A> {
    /// Creates an unexpanded node with zeroed statistics.
    pub fn new(state: S, player: Player, is_terminal: bool) -> Self {
        Node {
            state,
            player,
            is_terminal,
            visit_count: 0,
            cumulative_value: 0.0,
            mean_value: 0.0,
            children: ActionMap::new(),
            prior_probs: ActionMap::new(),
        }
    }

    /// Creates a search root, asking the game for the player and terminal flag.
    pub fn root<G>(game: &G, state: S) -> Self
    where
        G: Game<State = S, Action = A>,
    {
        let player = game.current_player(&state);
        let is_terminal = game.is_terminal(&state);
        Node::new(state, player, is_terminal)
    }

    /// A node is a leaf until it has been expanded.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &ActionMap<A, Node<S, A>> {
        &self.children
    }

    /// Prior probabilities stored at expansion, keyed like `children`.
    pub fn prior_probs(&self) -> &ActionMap<A, f64> {
        &self.prior_probs
    }

    pub(crate) fn child_at(&self, index: usize) -> Option<&Node<S, A>> {
        self.children.get_index(index).map(|(_, child)| child)
    }

    pub(crate) fn child_at_mut(&mut self, index: usize) -> Option<&mut Node<S, A>> {
        self.children.get_index_mut(index).map(|(_, child)| child)
    }

    /// Counts one more visit and folds `value` into W and Q.
    pub(crate) fn record_value(&mut self, value: f64) {
        self.visit_count += 1;
        self.cumulative_value += value;
        self.mean_value = self.cumulative_value / self.visit_count as f64;
    }

    /// Counts one more visit without touching W or Q (used for the root).
    pub(crate) fn record_visit(&mut self) {
        self.visit_count += 1;
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub fn tree_size(&self) -> usize {
        1 + self.children.values().map(Node::tree_size).sum::<usize>()
    }
}

impl<S, A: Clone + PartialEq> Node<S, A> {
    /// Expands a leaf with one fresh child per legal action.
    ///
    /// # Arguments
    /// * `prior_probs` - Prior probability per action
    /// * `child_states` - Resulting state per action; children are created in this order
    /// * `child_players` - Player to act in each child
    /// * `child_terminals` - Terminal flag of each child
    ///
    /// # Errors
    /// * [`MctsError::AlreadyExpanded`] if the node has children
    /// * [`MctsError::NoLegalActions`] if `child_states` is empty
    /// * [`MctsError::MismatchedActions`] if the four maps have different key sets
    pub fn expand(
        &mut self,
        prior_probs: ActionMap<A, f64>,
        child_states: ActionMap<A, S>,
        child_players: ActionMap<A, Player>,
        child_terminals: ActionMap<A, bool>,
    ) -> Result<()> {
        if !self.is_leaf() {
            return Err(MctsError::AlreadyExpanded);
        }
        if child_states.is_empty() {
            return Err(MctsError::NoLegalActions);
        }
        if !child_states.same_keys(&prior_probs)
            || !child_states.same_keys(&child_players)
            || !child_states.same_keys(&child_terminals)
        {
            return Err(MctsError::MismatchedActions);
        }

        let mut children = ActionMap::with_capacity(child_states.len());
        for (action, state) in child_states {
            let player = *child_players.get(&action).ok_or(MctsError::MismatchedActions)?;
            let is_terminal = *child_terminals
                .get(&action)
                .ok_or(MctsError::MismatchedActions)?;
            children.insert(action, Node::new(state, player, is_terminal));
        }

        self.prior_probs = prior_probs;
        self.children = children;
        Ok(())
    }

    pub fn child(&self, action: &A) -> Option<&Node<S, A>> {
        self.children.get(action)
    }

    /// Consumes this node and keeps only the subtree reached by `action`.
    ///
    /// After playing a move, the chosen child can be searched again as the
    /// new root so that its statistics are not thrown away.
    pub fn into_child(mut self, action: &A) -> Option<Node<S, A>> {
        self.children.remove(action)
    }

    /// Visit count of each child, in child order.
    pub fn child_visit_counts(&self) -> ActionMap<A, u32> {
        self.children.map_values(|child| child.visit_count)
    }

    /// Gets statistics about this node for debugging
    pub fn stats(&self) -> HashMap<String, String> {
        let mut stats = HashMap::new();

        stats.insert("player".to_string(), self.player.to_string());
        stats.insert("terminal".to_string(), self.is_terminal.to_string());
        stats.insert("visits".to_string(), self.visit_count.to_string());
        stats.insert("mean_value".to_string(), format!("{:.3}", self.mean_value));
        stats.insert("children".to_string(), self.children.len().to_string());
        stats.insert("subtree_size".to_string(), self.tree_size().to_string());

        stats
    }
}

impl<S: fmt::Debug, A> fmt::Display for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node({:?}, {}, {}, Q={:.4}, W={:.4}, N={})",
            self.state,
            self.player,
            self.is_terminal,
            self.mean_value,
            self.cumulative_value,
            self.visit_count
        )
    }
}

/// Logs every node of the tree at debug level, parents before children,
/// level by level.
pub fn log_tree<S: fmt::Debug, A>(root: &Node<S, A>) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        log::debug!("{}", node);
        queue.extend(node.children.values());
    }
}
