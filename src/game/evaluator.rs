//! Evaluation abstraction for MCTS.
//!
//! An evaluator maps a state to unnormalised prior weights over actions and a
//! value estimate. In self-play this is a neural network; the engine only
//! sees this trait.

use crate::game::rules::Game;
use crate::mcts::action_map::ActionMap;

/// Evaluation result: prior weights + value estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<A> {
    /// Non-negative weight per action. Need not sum to one.
    pub priors: ActionMap<A, f64>,

    /// Value estimate from the perspective of the player to act.
    pub value: f64,
}

impl<A> Evaluation<A> {
    pub fn new(priors: ActionMap<A, f64>, value: f64) -> Self {
        Self { priors, value }
    }
}

/// Trait for evaluating game positions.
pub trait Evaluator<G: Game> {
    fn evaluate(&self, game: &G, state: &G::State) -> Evaluation<G::Action>;
}

/// Any `Fn(&State) -> Evaluation<Action>` closure is an evaluator.
impl<G, F> Evaluator<G> for F
where
    G: Game,
    F: Fn(&G::State) -> Evaluation<G::Action>,
{
    fn evaluate(&self, _game: &G, state: &G::State) -> Evaluation<G::Action> {
        self(state)
    }
}

/// Evaluator with no knowledge: uniform priors over the legal actions and a
/// value of zero.
///
/// Handy as a baseline and for testing the search without a trained model.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl<G: Game> Evaluator<G> for UniformEvaluator {
    fn evaluate(&self, game: &G, state: &G::State) -> Evaluation<G::Action> {
        let next_states = game.legal_actions(state);
        let weight = 1.0 / next_states.len().max(1) as f64;
        let priors = next_states
            .into_iter()
            .map(|(action, _)| (action, weight))
            .collect();

        Evaluation::new(priors, 0.0)
    }
}
