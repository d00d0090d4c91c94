/// The step function: advances the world by one simulation tick.
///
/// Processing order:
///   1. Apply the pending turn (reversals rejected by the snake)
///   2. Advance the snake (head wraps at board edges)
///   3. Self-collision check → Dead, round over
///   4. Apple consumption → grow at the tail, re-drop the apple
///   5. Grow-into-start-length rule (one segment per tick)
///
/// Apple placement can fail only on a board with no free cell, which
/// propagates as BoardFull rather than looping forever.

use crate::domain::apple::Apple;
use crate::domain::rules;
use crate::domain::snake::FrameInput;
use crate::error::GameError;

use super::event::GameEvent;
use super::world::{Phase, WorldState};

pub fn step(world: &mut WorldState, input: FrameInput) -> Result<Vec<GameEvent>, GameError> {
    if world.phase != Phase::Playing {
        return Ok(vec![]);
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 {
            world.message.clear();
        }
    }

    if let Some(turn) = input.turn {
        world.snake.set_heading(turn);
    }

    world.snake.advance(&world.grid);

    if rules::self_collision(&world.snake) {
        world.phase = Phase::Dead;
        events.push(GameEvent::SnakeDied);
        return Ok(events);
    }

    if rules::apple_collision(&world.snake, &world.apple) {
        let eaten = world.apple.cell;
        world.snake.add_segment(world.snake.tail_cell());
        events.push(GameEvent::AppleEaten { cell: eaten });
        world.apple = Apple::drop(&world.grid, &world.snake, &mut world.rng)?;
        events.push(GameEvent::AppleDropped { cell: world.apple.cell });
    }

    // Opening moves: keep appending tail segments until the snake has
    // grown into its starting length.
    if world.snake.heading().is_some() && world.snake.len() < world.rules.start_length {
        let cell = world.snake.tail_cell();
        world.snake.add_segment(cell);
        events.push(GameEvent::SnakeGrew { cell });
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfig, GameConfig, GamepadConfig, RulesConfig};
    use crate::domain::grid::Cell;
    use crate::domain::snake::Heading;
    use crate::sim::state::{self, Action};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn world_px(width: u32, height: u32, start_length: usize) -> WorldState {
        let config = GameConfig {
            board: BoardConfig { width, height, cell_size: 20 },
            rules: RulesConfig { fps: 20, start_length },
            gamepad: GamepadConfig {
                confirm: vec![],
                cancel: vec![],
                pause: vec![],
            },
        };
        WorldState::new(&config, SmallRng::seed_from_u64(99)).unwrap()
    }

    fn turn(h: Heading) -> FrameInput {
        FrameInput { turn: Some(h) }
    }

    #[test]
    fn grows_into_starting_length_on_a_1280x720_board() {
        let mut w = world_px(1280, 720, 6);
        state::apply(&mut w, Action::Start).unwrap();
        assert_eq!(w.grid.width, 64);
        assert_eq!(w.grid.height, 36);

        // Keep the apple off the snake's path for this scenario
        w.apple.cell = Cell::new(0, 0);

        step(&mut w, turn(Heading::Right)).unwrap();
        for _ in 0..5 {
            step(&mut w, FrameInput::default()).unwrap();
        }
        assert_eq!(w.snake.len(), 6);
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn motionless_snake_does_not_grow() {
        let mut w = world_px(1280, 720, 6);
        state::apply(&mut w, Action::Start).unwrap();
        for _ in 0..10 {
            step(&mut w, FrameInput::default()).unwrap();
        }
        assert_eq!(w.snake.len(), 1);
        assert_eq!(w.snake.head(), w.grid.center());
    }

    #[test]
    fn eating_grows_and_redrops_the_apple() {
        let mut w = world_px(320, 240, 1); // start_length 1: no opening growth
        state::apply(&mut w, Action::Start).unwrap();
        let head = w.snake.head();
        w.apple.cell = Cell::new(head.x + 1, head.y);

        let events = step(&mut w, turn(Heading::Right)).unwrap();

        assert_eq!(w.snake.len(), 2);
        assert!(events.contains(&GameEvent::AppleEaten { cell: Cell::new(head.x + 1, head.y) }));
        assert!(!w.snake.is_occupied(w.apple.cell));
        assert_ne!(w.apple.cell, Cell::new(head.x + 1, head.y));
    }

    #[test]
    fn head_wraps_past_the_right_edge() {
        let mut w = world_px(320, 240, 1);
        state::apply(&mut w, Action::Start).unwrap();
        w.apple.cell = Cell::new(0, 0);

        step(&mut w, turn(Heading::Right)).unwrap();
        let ticks_to_edge = w.grid.width - w.snake.head().x;
        for _ in 0..ticks_to_edge {
            step(&mut w, FrameInput::default()).unwrap();
        }
        assert_eq!(w.snake.head().x, 0);
        assert_eq!(w.snake.head().y, w.grid.center().y);
    }

    #[test]
    fn biting_the_body_dies_on_that_exact_tick_and_retry_resets() {
        let mut w = world_px(320, 240, 6); // 16×12 grid, center (8,6)
        state::apply(&mut w, Action::Start).unwrap();
        w.apple.cell = Cell::new(0, 0);

        // Grow into full length heading right...
        step(&mut w, turn(Heading::Right)).unwrap();
        for _ in 0..4 {
            step(&mut w, FrameInput::default()).unwrap();
        }
        assert_eq!(w.snake.len(), 6);

        // ...then hook back into the body: down, left, up.
        step(&mut w, turn(Heading::Down)).unwrap();
        let events = step(&mut w, turn(Heading::Left)).unwrap();
        assert_eq!(w.phase, Phase::Playing);
        assert!(!events.contains(&GameEvent::SnakeDied));

        let events = step(&mut w, turn(Heading::Up)).unwrap();
        assert_eq!(w.phase, Phase::Dead);
        assert!(events.contains(&GameEvent::SnakeDied));

        state::apply(&mut w, Action::Retry).unwrap();
        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.snake.len(), 1);
        assert_eq!(w.snake.head(), w.grid.center());
    }

    #[test]
    fn ticks_outside_playing_are_inert() {
        let mut w = world_px(320, 240, 6);
        let events = step(&mut w, turn(Heading::Right)).unwrap();
        assert!(events.is_empty());
        assert_eq!(w.tick, 0);
        assert_eq!(w.snake.len(), 1);
    }

    #[test]
    fn reversal_input_is_ignored_mid_run() {
        let mut w = world_px(320, 240, 6);
        state::apply(&mut w, Action::Start).unwrap();
        w.apple.cell = Cell::new(0, 0);

        step(&mut w, turn(Heading::Right)).unwrap();
        step(&mut w, FrameInput::default()).unwrap();
        let x_before = w.snake.head().x;
        step(&mut w, turn(Heading::Left)).unwrap();
        // Still heading right
        assert_eq!(w.snake.head().x, x_before + 1);
        assert_eq!(w.phase, Phase::Playing);
    }
}
