//! Core Monte Carlo Tree Search loop.
//!
//! Each iteration selects a path with the PUCT rule, evaluates (and expands)
//! the leaf it reaches, and backs the outcome up along the path. After the
//! budget is spent the root visit counts, shaped by the temperature, are the
//! move distribution. [`MctsEngine`] bundles the game, the evaluator, the
//! hyperparameters and the random source so callers do not thread them by hand.

use crate::game::evaluator::Evaluator;
use crate::game::rules::Game;
use crate::mcts::action_map::ActionMap;
use crate::mcts::backup::backup;
use crate::mcts::distribution::extremise;
use crate::mcts::expansion::evaluate_leaf;
use crate::mcts::hyperparameters::MCTSHyperparameters;
use crate::mcts::mcts_result::MCTSResult;
use crate::mcts::node::Node;
use crate::mcts::selection::select;
use crate::{MctsError, Result};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Runs `params.iterations` search iterations from `root`.
///
/// The tree below `root` is grown in place and kept, so a later search from
/// the same root (or from one of its children) continues where this one
/// stopped.
///
/// # Returns
/// `extremise(N(root, ·), tau)` over the root's actions, in child order.
///
/// # Errors
/// * Parameter errors from [`MCTSHyperparameters::validate`]
/// * [`MctsError::TerminalRoot`] if there is nothing to search
/// * [`MctsError::EmptyDistribution`] if no root child was ever visited,
///   which happens when a fresh root gets a single iteration
/// * Whatever the game or the evaluator's priors raise during expansion
pub fn search<G, E, R>(
    root: &mut Node<G::State, G::Action>,
    game: &G,
    evaluator: &E,
    params: &MCTSHyperparameters,
    rng: &mut R,
) -> Result<ActionMap<G::Action, f64>>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    R: Rng + ?Sized,
{
    params.validate()?;
    if root.is_terminal {
        return Err(MctsError::TerminalRoot);
    }

    log::debug!(
        "MCTS search from a node with N={}: {}",
        root.visit_count,
        params.to_config_string()
    );

    for iteration in 0..params.iterations {
        let path = select(
            root,
            params.c_puct,
            params.dirichlet_epsilon,
            params.dirichlet_alpha,
            rng,
        )?;
        let leaf = path.leaf_mut(root)?;
        let leaf_terminal = leaf.is_terminal;
        let outcome = evaluate_leaf(leaf, game, evaluator)?;
        backup(root, &path, &outcome)?;

        log::trace!(
            "iteration {}: depth {}, path {:?}, terminal leaf {}, outcome ({:.3}, {:.3})",
            iteration,
            path.len() - 1,
            path.actions(),
            leaf_terminal,
            outcome.player_one,
            outcome.player_two
        );
    }

    let counts = root.child_visit_counts().map_values(|&n| n as f64);
    let policy = extremise(&counts, params.tau)?;

    log::debug!(
        "MCTS search done: root N={}, tree size {}, policy {:?}",
        root.visit_count,
        root.tree_size(),
        policy
    );

    Ok(policy)
}

/// Search context: game rules, evaluator, hyperparameters and random source.
#[derive(Debug)]
pub struct MctsEngine<G, E, R = StdRng> {
    game: G,
    evaluator: E,
    params: MCTSHyperparameters,
    rng: R,
}

impl<G, E, R> MctsEngine<G, E, R>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
{
    /// Creates an engine drawing its noise from `rng`.
    ///
    /// # Errors
    /// Invalid hyperparameters are rejected here rather than on the first search.
    pub fn new(game: G, evaluator: E, params: MCTSHyperparameters, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            game,
            evaluator,
            params,
            rng,
        })
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn params(&self) -> &MCTSHyperparameters {
        &self.params
    }

    /// Fresh, unexpanded root for `state`.
    pub fn root(&self, state: G::State) -> Node<G::State, G::Action> {
        Node::root(&self.game, state)
    }

    /// See [`search`].
    pub fn search(
        &mut self,
        root: &mut Node<G::State, G::Action>,
    ) -> Result<ActionMap<G::Action, f64>> {
        search(root, &self.game, &self.evaluator, &self.params, &mut self.rng)
    }

    /// Searches from `root` and summarises the root statistics.
    pub fn run(&mut self, root: &mut Node<G::State, G::Action>) -> Result<MCTSResult<G::Action>> {
        let policy = self.search(root)?;
        let visit_counts = root.child_visit_counts();

        let mut best: Option<(&G::Action, u32)> = None;
        for (action, &count) in visit_counts.iter() {
            if best.map_or(true, |(_, most)| count > most) {
                best = Some((action, count));
            }
        }
        let best_action = best
            .map(|(action, _)| action.clone())
            .ok_or(MctsError::EmptyDistribution)?;

        let total: u32 = visit_counts.values().sum();
        let root_value = if total == 0 {
            0.0
        } else {
            root.children()
                .values()
                .map(|child| child.visit_count as f64 * child.mean_value)
                .sum::<f64>()
                / total as f64
        };

        log::debug!(
            "best action {:?} ({} of {} child visits), root value {:.3}",
            best_action,
            visit_counts.get(&best_action).copied().unwrap_or(0),
            total,
            root_value
        );

        Ok(MCTSResult {
            policy,
            visit_counts,
            best_action,
            root_value,
            iterations: self.params.iterations,
        })
    }
}

impl<G, E> MctsEngine<G, E, StdRng>
where
    G: Game,
    E: Evaluator<G>,
{
    /// Engine with a reproducible random source.
    pub fn seeded(game: G, evaluator: E, params: MCTSHyperparameters, seed: u64) -> Result<Self> {
        Self::new(game, evaluator, params, StdRng::seed_from_u64(seed))
    }

    /// Engine seeded from `params.seed`, or from a random seed when it is unset.
    pub fn from_params(game: G, evaluator: E, params: MCTSHyperparameters) -> Result<Self> {
        let seed = params.seed.unwrap_or_else(rand::random::<u64>);
        log::debug!("MCTS engine seed: {}", seed);
        Self::seeded(game, evaluator, params, seed)
    }
}

impl<G, E> MctsEngine<G, E, ThreadRng>
where
    G: Game,
    E: Evaluator<G>,
{
    /// Engine sharing the thread-local process generator.
    pub fn with_thread_rng(game: G, evaluator: E, params: MCTSHyperparameters) -> Result<Self> {
        Self::new(game, evaluator, params, rand::rng())
    }
}
