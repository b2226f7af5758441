pub mod action_map;
pub mod algorithm;
pub mod backup;
pub mod distribution;
pub mod expansion;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod selection;
