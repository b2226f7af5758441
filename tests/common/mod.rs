//! Small games shared by the integration tests.
#![allow(dead_code)]

use puct_mcts::{ActionMap, Game, MctsError, Outcome, Player, Result};

/// One decision for player one: `X` wins, `Y` loses.
pub struct TwoArmedGame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arm {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmState {
    Start,
    Pulled(Arm),
}

impl Game for TwoArmedGame {
    type State = ArmState;
    type Action = Arm;

    fn legal_actions(&self, state: &ArmState) -> ActionMap<Arm, ArmState> {
        match state {
            ArmState::Start => [Arm::X, Arm::Y]
                .into_iter()
                .map(|arm| (arm, ArmState::Pulled(arm)))
                .collect(),
            ArmState::Pulled(_) => ActionMap::new(),
        }
    }

    fn current_player(&self, state: &ArmState) -> Player {
        match state {
            ArmState::Start => Player::One,
            ArmState::Pulled(_) => Player::Two,
        }
    }

    fn is_terminal(&self, state: &ArmState) -> bool {
        matches!(state, ArmState::Pulled(_))
    }

    fn utility(&self, state: &ArmState) -> Result<Outcome> {
        match state {
            ArmState::Pulled(Arm::X) => Ok(Outcome::win(Player::One)),
            ArmState::Pulled(Arm::Y) => Ok(Outcome::win(Player::Two)),
            ArmState::Start => Err(MctsError::NonTerminalUtility),
        }
    }
}

/// Same choice as [`TwoArmedGame`], but the pull only ends the game once
/// player two settles it, so the pulled positions are evaluated, not scored.
pub struct DelayedTwoArmedGame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayedArmState {
    Start,
    Pulled(Arm),
    Settled(Arm),
}

impl Game for DelayedTwoArmedGame {
    type State = DelayedArmState;
    type Action = Arm;

    fn legal_actions(&self, state: &DelayedArmState) -> ActionMap<Arm, DelayedArmState> {
        match state {
            DelayedArmState::Start => [Arm::X, Arm::Y]
                .into_iter()
                .map(|arm| (arm, DelayedArmState::Pulled(arm)))
                .collect(),
            DelayedArmState::Pulled(arm) => {
                [(*arm, DelayedArmState::Settled(*arm))].into_iter().collect()
            }
            DelayedArmState::Settled(_) => ActionMap::new(),
        }
    }

    fn current_player(&self, state: &DelayedArmState) -> Player {
        match state {
            DelayedArmState::Pulled(_) => Player::Two,
            _ => Player::One,
        }
    }

    fn is_terminal(&self, state: &DelayedArmState) -> bool {
        matches!(state, DelayedArmState::Settled(_))
    }

    fn utility(&self, state: &DelayedArmState) -> Result<Outcome> {
        match state {
            DelayedArmState::Settled(Arm::X) => Ok(Outcome::win(Player::One)),
            DelayedArmState::Settled(Arm::Y) => Ok(Outcome::win(Player::Two)),
            _ => Err(MctsError::NonTerminalUtility),
        }
    }
}

/// Noughts and crosses; player one plays `X` and moves first.
pub struct NoughtsAndCrosses;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub cells: [Option<Player>; 9],
    pub to_move: Player,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [None; 9],
            to_move: Player::One,
        }
    }

    /// Parses rows such as `"XX.OO...."`; the player to move follows from the counts.
    pub fn parse(layout: &str) -> Self {
        let mut cells = [None; 9];
        for (cell, c) in cells.iter_mut().zip(layout.chars()) {
            *cell = match c {
                'X' => Some(Player::One),
                'O' => Some(Player::Two),
                _ => None,
            };
        }
        let crosses = cells.iter().filter(|c| **c == Some(Player::One)).count();
        let noughts = cells.iter().filter(|c| **c == Some(Player::Two)).count();
        let to_move = if crosses > noughts {
            Player::Two
        } else {
            Player::One
        };
        Board { cells, to_move }
    }

    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl Game for NoughtsAndCrosses {
    type State = Board;
    type Action = usize;

    fn legal_actions(&self, board: &Board) -> ActionMap<usize, Board> {
        if self.is_terminal(board) {
            return ActionMap::new();
        }
        (0..9)
            .filter(|&i| board.cells[i].is_none())
            .map(|i| {
                let mut next = board.clone();
                next.cells[i] = Some(board.to_move);
                next.to_move = board.to_move.opponent();
                (i, next)
            })
            .collect()
    }

    fn current_player(&self, board: &Board) -> Player {
        board.to_move
    }

    fn is_terminal(&self, board: &Board) -> bool {
        board.winner().is_some() || board.is_full()
    }

    fn utility(&self, board: &Board) -> Result<Outcome> {
        match board.winner() {
            Some(winner) => Ok(Outcome::win(winner)),
            None if board.is_full() => Ok(Outcome::draw()),
            None => Err(MctsError::NonTerminalUtility),
        }
    }
}
