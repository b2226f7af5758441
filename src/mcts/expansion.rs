//! Leaf evaluation and expansion.

use crate::game::evaluator::{Evaluation, Evaluator};
use crate::game::player::Outcome;
use crate::game::rules::Game;
use crate::mcts::action_map::ActionMap;
use crate::mcts::distribution::normalise;
use crate::mcts::node::Node;
use crate::{MctsError, Result};

/// Values the leaf reached by selection and expands it when the game goes on.
///
/// * Non-terminal leaf: the evaluator supplies priors and a value for the
///   player to act; the value becomes a zero-sum [`Outcome`], and the leaf
///   gets one child per legal action.
/// * Terminal leaf: the game's utility is the outcome and nothing is expanded.
///
/// # Returns
/// The outcome to back up along the path.
pub fn evaluate_leaf<G, E>(
    leaf: &mut Node<G::State, G::Action>,
    game: &G,
    evaluator: &E,
) -> Result<Outcome>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
{
    if leaf.is_terminal {
        return game.utility(&leaf.state);
    }

    let Evaluation { priors, value } = evaluator.evaluate(game, &leaf.state);
    let player = game.current_player(&leaf.state);
    let outcome = Outcome::zero_sum(player, value);

    let child_states = game.legal_actions(&leaf.state);
    let prior_probs = legal_priors(&priors, &child_states)?;

    let child_players = child_states.map_values(|state| game.current_player(state));
    let child_terminals = child_states.map_values(|state| game.is_terminal(state));

    leaf.expand(prior_probs, child_states, child_players, child_terminals)?;
    Ok(outcome)
}

/// Restricts evaluator priors to the legal actions and normalises them.
///
/// Keys the evaluator returned for illegal actions are dropped, legal actions
/// it did not mention get zero weight.
///
/// # Errors
/// * [`MctsError::NegativeWeight`] for a negative legal prior
/// * [`MctsError::EmptyDistribution`] if no legal action carries any weight
fn legal_priors<A, S>(
    priors: &ActionMap<A, f64>,
    child_states: &ActionMap<A, S>,
) -> Result<ActionMap<A, f64>>
where
    A: Clone + PartialEq,
{
    if child_states.is_empty() {
        return Err(MctsError::NoLegalActions);
    }

    let restricted: ActionMap<A, f64> = child_states
        .keys()
        .map(|action| (action.clone(), priors.get(action).copied().unwrap_or(0.0)))
        .collect();

    if let Some(&negative) = restricted.values().find(|&&w| w < 0.0) {
        return Err(MctsError::NegativeWeight(negative));
    }

    let dropped = priors.keys().filter(|&a| !child_states.contains_key(a)).count();
    if dropped > 0 {
        log::debug!("Dropped {} prior(s) for illegal actions", dropped);
    }

    normalise(&restricted).inspect_err(|_| {
        log::warn!(
            "Evaluator gave no weight to any of {} legal actions",
            restricted.len()
        );
    })
}
