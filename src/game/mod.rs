pub mod evaluator;
pub mod player;
pub mod rules;

pub use evaluator::{Evaluation, Evaluator, UniformEvaluator};
pub use player::{Outcome, Player};
pub use rules::Game;
