/// Events emitted during a simulation step.
/// The presentation layer consumes these for animation/sound.

use crate::domain::grid::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    AppleEaten { cell: Cell },
    AppleDropped { cell: Cell },
    SnakeGrew { cell: Cell },
    SnakeDied,
}
