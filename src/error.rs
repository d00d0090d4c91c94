/// Error conditions surfaced by the core.
///
/// Collisions, quit requests, and menu navigation are normal control
/// flow, not errors. The two conditions here indicate either a logic
/// defect (InvalidState) or a board with no free cell left (BoardFull).

use std::fmt;

use crate::sim::state::Action;
use crate::sim::world::Phase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// An action arrived in a phase that has no transition for it.
    /// Never expected under normal menu/loop logic; fatal.
    InvalidState { phase: Phase, action: Action },
    /// Apple placement found no free cell on the board.
    BoardFull,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidState { phase, action } => {
                write!(f, "invalid transition: {action:?} in phase {phase:?}")
            }
            GameError::BoardFull => write!(f, "no free cell left for the apple"),
        }
    }
}

impl std::error::Error for GameError {}
