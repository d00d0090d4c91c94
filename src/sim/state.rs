/// The game-state machine.
///
/// UI layers (keyboard, gamepad, menu widgets) all reduce to the same
/// `Action` vocabulary; `apply` is the single place transitions happen.
///
/// Transition table:
///   Menu    --Start-->          Playing   (round reset first)
///   Menu    --SetDifficulty-->  Menu
///   Playing --Pause-->          Paused
///   Paused  --Resume-->         Playing
///   Paused  --ToMenu-->         Menu
///   Dead    --Retry-->          Playing   (round reset first)
///   Dead    --ToMenu-->         Menu
///   any     --Exit-->           Exit      (terminal)
///
/// `Playing --> Dead` is not an action: it happens inside `step` when
/// the snake bites itself. Any pair outside the table is a logic
/// defect and fails with InvalidState.

use super::world::{Phase, WorldState};
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    SetDifficulty(u32),
    Pause,
    Resume,
    ToMenu,
    Retry,
    Exit,
}

pub fn apply(world: &mut WorldState, action: Action) -> Result<(), GameError> {
    match (world.phase, action) {
        (_, Action::Exit) => {
            world.phase = Phase::Exit;
        }
        (Phase::Menu, Action::Start) => {
            world.reset_round()?;
            world.phase = Phase::Playing;
            world.set_message("Steer with the arrow keys", 50);
        }
        (Phase::Menu, Action::SetDifficulty(fps)) => {
            world.fps = fps;
        }
        (Phase::Playing, Action::Pause) => {
            world.phase = Phase::Paused;
        }
        (Phase::Paused, Action::Resume) => {
            world.phase = Phase::Playing;
        }
        (Phase::Paused, Action::ToMenu) => {
            world.phase = Phase::Menu;
        }
        (Phase::Dead, Action::Retry) => {
            world.reset_round()?;
            world.phase = Phase::Playing;
        }
        (Phase::Dead, Action::ToMenu) => {
            world.phase = Phase::Menu;
        }
        (phase, action) => {
            return Err(GameError::InvalidState { phase, action });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfig, GameConfig, GamepadConfig, RulesConfig};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn world() -> WorldState {
        let config = GameConfig {
            board: BoardConfig { width: 320, height: 240, cell_size: 20 },
            rules: RulesConfig { fps: 20, start_length: 6 },
            gamepad: GamepadConfig {
                confirm: vec![],
                cancel: vec![],
                pause: vec![],
            },
        };
        WorldState::new(&config, SmallRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn menu_to_playing_resets_the_round() {
        let mut w = world();
        w.snake.add_segment(w.snake.head());
        apply(&mut w, Action::Start).unwrap();
        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.snake.len(), 1);
        assert_eq!(w.snake.head(), w.grid.center());
    }

    #[test]
    fn difficulty_changes_fps_in_menu() {
        let mut w = world();
        apply(&mut w, Action::SetDifficulty(45)).unwrap();
        assert_eq!(w.fps, 45);
        assert_eq!(w.phase, Phase::Menu);
    }

    #[test]
    fn pause_and_resume() {
        let mut w = world();
        apply(&mut w, Action::Start).unwrap();
        apply(&mut w, Action::Pause).unwrap();
        assert_eq!(w.phase, Phase::Paused);
        apply(&mut w, Action::Resume).unwrap();
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn paused_back_to_menu() {
        let mut w = world();
        apply(&mut w, Action::Start).unwrap();
        apply(&mut w, Action::Pause).unwrap();
        apply(&mut w, Action::ToMenu).unwrap();
        assert_eq!(w.phase, Phase::Menu);
    }

    #[test]
    fn dead_retry_resets_snake() {
        let mut w = world();
        apply(&mut w, Action::Start).unwrap();
        w.snake.add_segment(w.snake.head());
        w.phase = Phase::Dead;
        apply(&mut w, Action::Retry).unwrap();
        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.snake.len(), 1);
    }

    #[test]
    fn dead_to_menu() {
        let mut w = world();
        w.phase = Phase::Dead;
        apply(&mut w, Action::ToMenu).unwrap();
        assert_eq!(w.phase, Phase::Menu);
    }

    #[test]
    fn exit_is_reachable_from_every_phase() {
        for phase in [Phase::Menu, Phase::Playing, Phase::Paused, Phase::Dead] {
            let mut w = world();
            w.phase = phase;
            apply(&mut w, Action::Exit).unwrap();
            assert_eq!(w.phase, Phase::Exit);
        }
    }

    #[test]
    fn illegal_pair_is_a_fatal_error() {
        let mut w = world();
        apply(&mut w, Action::Start).unwrap();
        let err = apply(&mut w, Action::Retry).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidState { phase: Phase::Playing, action: Action::Retry }
        );
        // World untouched by the failed transition
        assert_eq!(w.phase, Phase::Playing);
    }
}
