/// WorldState: the complete snapshot of a running game.
///
/// One snake, one apple, one grid. The state machine's phase lives
/// here too, but transitions go through `sim::state::apply` only.
///
/// The RNG is owned by the world and threaded into apple placement,
/// so a fixed seed makes a whole round deterministic.

use rand::rngs::SmallRng;

use crate::config::{GameConfig, RulesConfig};
use crate::domain::apple::Apple;
use crate::domain::grid::Grid;
use crate::domain::snake::Snake;
use crate::error::GameError;

/// Difficulty selector entries: label + simulation ticks per second.
pub const DIFFICULTIES: [(&str, u32); 4] = [
    ("Easy", 15),
    ("Normal", 20),
    ("Hard", 30),
    ("Insane", 45),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    Dead,
    Exit,
}

pub struct WorldState {
    // ── Board & entities ──
    pub grid: Grid,
    pub snake: Snake,
    pub apple: Apple,
    pub rng: SmallRng,

    // ── Rules ──
    pub rules: RulesConfig,
    /// Active ticks-per-second; starts at the config value, overridden
    /// by the menu difficulty selector.
    pub fps: u32,

    // ── Meta ──
    pub phase: Phase,
    pub tick: u64,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
    pub menu_cursor: usize,
    pub difficulty_idx: usize,
}

impl WorldState {
    pub fn new(config: &GameConfig, mut rng: SmallRng) -> Result<Self, GameError> {
        let grid = Grid::from_pixels(
            config.board.width,
            config.board.height,
            config.board.cell_size,
        );
        let snake = Snake::new(grid.center());
        let apple = Apple::drop(&grid, &snake, &mut rng)?;

        let difficulty_idx = DIFFICULTIES
            .iter()
            .position(|&(_, fps)| fps == config.rules.fps)
            .unwrap_or(1);

        Ok(WorldState {
            grid,
            snake,
            apple,
            rng,
            rules: config.rules,
            fps: config.rules.fps,
            phase: Phase::Menu,
            tick: 0,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
            menu_cursor: 0,
            difficulty_idx,
        })
    }

    /// Fresh round: lone motionless head at the board center, apple
    /// re-dropped off the snake. Entities are reset, never recreated.
    pub fn reset_round(&mut self) -> Result<(), GameError> {
        self.snake.reset(self.grid.center());
        self.apple = Apple::drop(&self.grid, &self.snake, &mut self.rng)?;
        self.tick = 0;
        self.anim_tick = 0;
        self.message.clear();
        self.message_timer = 0;
        Ok(())
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}
