//! Backup of leaf outcomes along the selected path.

use crate::game::player::Outcome;
use crate::mcts::node::Node;
use crate::mcts::selection::SearchPath;
use crate::{MctsError, Result};

/// Propagates `outcome` along `path`, starting at `root`.
///
/// Every node on the path gains one visit. Every node except the root also
/// receives the outcome value of the player who moved into it (the player of
/// the preceding node), so each edge's Q is seen from the chooser's side.
///
/// # Errors
/// [`MctsError::InvalidPath`] if `path` does not fit the tree; nodes visited
/// before the mismatch keep their update.
pub fn backup<S, A>(root: &mut Node<S, A>, path: &SearchPath<A>, outcome: &Outcome) -> Result<()> {
    root.record_visit();

    let mut parent_player = root.player;
    let mut node = root;
    for &index in path.indices() {
        let child = node.child_at_mut(index).ok_or(MctsError::InvalidPath)?;
        child.record_value(outcome.value_for(parent_player));
        parent_player = child.player;
        node = child;
    }

    Ok(())
}
