use crate::mcts::action_map::ActionMap;
use serde::{Deserialize, Serialize};

/// Snapshot of a finished search at the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MCTSResult<A> {
    /// Temperature-shaped visit distribution over the root's actions
    pub policy: ActionMap<A, f64>,
    /// Raw visit count of each root child
    pub visit_counts: ActionMap<A, u32>,
    /// Most visited action (first one on ties)
    pub best_action: A,
    /// Visit-weighted mean value of the root's children, for the player to act at the root
    pub root_value: f64,
    /// Iterations run by this search
    pub iterations: usize,
}
