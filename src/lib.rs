//! # PUCT Monte Carlo Tree Search
//!
//! A generic AlphaZero-style search engine. Given a root position, a game
//! description and a state evaluator, it runs a fixed number of
//! select → expand → backup iterations and turns the root's visit counts into
//! an action distribution.
//!
//! ## Features
//!
//! - **Search tree**: exclusively owned [`Node`]s keyed by action, reusable
//!   across moves via [`Node::into_child`]
//! - **PUCT selection** with Dirichlet exploration noise
//! - **Distribution shaping**: normalisation and temperature extremisation
//! - **Explicit randomness**: every random draw comes from a caller-supplied RNG
//!
//! ## Usage
//!
//! ```rust,ignore
//! use puct_mcts::{MCTSHyperparameters, MctsEngine, Node, UniformEvaluator};
//!
//! let mut engine = MctsEngine::seeded(game, UniformEvaluator, MCTSHyperparameters::default(), 7);
//! let mut root = Node::root(engine.game(), initial_state);
//! let policy = engine.search(&mut root)?;
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Game and evaluator contracts consumed by the search
pub mod game;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Logger bootstrap
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{Evaluation, Evaluator, Game, Outcome, Player, UniformEvaluator};

pub use mcts::{
    algorithm::{search, MctsEngine},
    action_map::ActionMap,
    hyperparameters::MCTSHyperparameters,
    mcts_result::MCTSResult,
    node::Node,
};

pub use logging::{setup_logging, LoggingConfig};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the search engine
#[derive(Debug, thiserror::Error)]
pub enum MctsError {
    #[error("cannot expand a node that already has children")]
    AlreadyExpanded,

    #[error("action sets disagree between priors, child states, players and terminal flags")]
    MismatchedActions,

    #[error("non-terminal state has no legal actions")]
    NoLegalActions,

    #[error("distribution has no positive mass")]
    EmptyDistribution,

    #[error("temperature must be positive, got {0}")]
    InvalidTemperature(f64),

    #[error("distribution contains a negative weight: {0}")]
    NegativeWeight(f64),

    #[error("utility undefined for non-terminal state")]
    NonTerminalUtility,

    #[error("search requires at least one iteration")]
    ZeroIterations,

    #[error("cannot search from a terminal root")]
    TerminalRoot,

    #[error("search path does not address a node of this tree")]
    InvalidPath,

    #[error("invalid hyperparameter: {0}")]
    InvalidParameter(String),

    #[error("Dirichlet noise error: {0}")]
    Dirichlet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MctsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
