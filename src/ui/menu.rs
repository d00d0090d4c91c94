/// Meta input: turns key and pad presses into state-machine actions.
///
/// The menu screens own a cursor (stored on the world so the renderer
/// can draw it) but no game state; everything they do is expressed as
/// `Action` values fed to `sim::state::apply`.

use crossterm::event::KeyCode;

use super::gamepad::GamepadState;
use super::input::InputState;
use crate::sim::state::Action;
use crate::sim::world::{Phase, WorldState, DIFFICULTIES};

/// Main menu entries, top to bottom.
pub const MENU_PLAY: usize = 0;
pub const MENU_DIFFICULTY: usize = 1;
pub const MENU_EXIT: usize = 2;
const MENU_LEN: usize = 3;

pub const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
pub const KEYS_PAUSE: &[KeyCode] = &[
    KeyCode::Char('p'),
    KeyCode::Char('P'),
    KeyCode::F(1),
];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

/// Collect the actions this frame's presses imply for the current
/// phase. Cursor movement mutates the world directly; everything that
/// transitions the state machine is returned.
pub fn handle(world: &mut WorldState, kb: &InputState, gp: &GamepadState) -> Vec<Action> {
    let confirm = kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed();
    let cancel = kb.any_pressed(&[KeyCode::Esc]) || gp.cancel_pressed();
    let pause = kb.any_pressed(KEYS_PAUSE) || gp.pause_pressed();

    let mut actions = Vec::new();

    match world.phase {
        Phase::Menu => {
            if kb.any_pressed(KEYS_QUIT) || cancel {
                actions.push(Action::Exit);
                return actions;
            }

            if kb.was_pressed(KeyCode::Up) || gp.up_pressed() {
                world.menu_cursor = world.menu_cursor.checked_sub(1).unwrap_or(MENU_LEN - 1);
            } else if kb.was_pressed(KeyCode::Down) || gp.down_pressed() {
                world.menu_cursor = (world.menu_cursor + 1) % MENU_LEN;
            }

            if world.menu_cursor == MENU_DIFFICULTY {
                let right = kb.was_pressed(KeyCode::Right) || gp.right_pressed();
                let left = kb.was_pressed(KeyCode::Left) || gp.left_pressed();
                if right || (confirm && !left) {
                    world.difficulty_idx = (world.difficulty_idx + 1) % DIFFICULTIES.len();
                    actions.push(Action::SetDifficulty(DIFFICULTIES[world.difficulty_idx].1));
                    return actions;
                }
                if left {
                    world.difficulty_idx = world
                        .difficulty_idx
                        .checked_sub(1)
                        .unwrap_or(DIFFICULTIES.len() - 1);
                    actions.push(Action::SetDifficulty(DIFFICULTIES[world.difficulty_idx].1));
                    return actions;
                }
            }

            if confirm {
                match world.menu_cursor {
                    MENU_PLAY => actions.push(Action::Start),
                    MENU_EXIT => actions.push(Action::Exit),
                    _ => {}
                }
            }
        }

        Phase::Playing => {
            // No path back to the menu mid-run: Esc pauses first.
            if pause || cancel {
                actions.push(Action::Pause);
            }
        }

        Phase::Paused => {
            if pause || confirm {
                actions.push(Action::Resume);
            } else if cancel {
                actions.push(Action::ToMenu);
            }
        }

        Phase::Dead => {
            if confirm {
                actions.push(Action::Retry);
            } else if cancel {
                actions.push(Action::ToMenu);
            }
        }

        Phase::Exit => {}
    }

    actions
}
