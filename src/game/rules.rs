//! Game contract consumed by the search.
//!
//! The engine never inspects states or actions itself: everything it needs to
//! know about a position comes through this trait.

use crate::game::player::{Outcome, Player};
use crate::mcts::action_map::ActionMap;
use crate::Result;
use std::fmt::Debug;

/// Rules of a two-player, zero-sum, perfect-information game.
pub trait Game {
    /// Opaque position handle stored in search nodes.
    type State;

    /// Move identifier; used as the key of every per-action map.
    type Action: Clone + PartialEq + Debug;

    /// Legal actions from `state`, each paired with the resulting state.
    ///
    /// The returned order is the order children are created and scored in,
    /// so it also decides how ties between equal scores are broken.
    fn legal_actions(&self, state: &Self::State) -> ActionMap<Self::Action, Self::State>;

    /// Player to act at `state`.
    fn current_player(&self, state: &Self::State) -> Player;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Final values for both players.
    ///
    /// # Errors
    /// Implementations return [`MctsError::NonTerminalUtility`](crate::MctsError::NonTerminalUtility)
    /// when `state` is not terminal.
    fn utility(&self, state: &Self::State) -> Result<Outcome>;
}
