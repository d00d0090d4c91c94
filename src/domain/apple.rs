/// The apple: a single food cell, never placed on the snake.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::error::GameError;

/// Random placement attempts before falling back to a scan. Sampling
/// almost always wins in normal play; the cap only matters when the
/// snake covers most of the board.
const SAMPLE_ATTEMPTS: u32 = 64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Apple {
    pub cell: Cell,
}

impl Apple {
    /// Place an apple on a uniformly random free cell.
    ///
    /// After `SAMPLE_ATTEMPTS` rejected samples the board is scanned
    /// row-major for the first free cell, so placement terminates even
    /// on a nearly full board. A board with no free cell is `BoardFull`.
    pub fn drop(grid: &Grid, snake: &Snake, rng: &mut impl Rng) -> Result<Apple, GameError> {
        for _ in 0..SAMPLE_ATTEMPTS {
            let cell = Cell::new(
                rng.gen_range(0..grid.width),
                rng.gen_range(0..grid.height),
            );
            if !snake.is_occupied(cell) {
                return Ok(Apple { cell });
            }
        }

        for y in 0..grid.height {
            for x in 0..grid.width {
                let cell = Cell::new(x, y);
                if !snake.is_occupied(cell) {
                    return Ok(Apple { cell });
                }
            }
        }

        Err(GameError::BoardFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snake::Heading;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn never_lands_on_the_snake() {
        let grid = Grid::new(8, 8);
        let mut snake = Snake::new(Cell::new(4, 4));
        snake.set_heading(Heading::Right);
        for i in 1..20 {
            snake.add_segment(grid.wrap(Cell::new(4 - i, 4 + i / 8)));
        }

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let apple = Apple::drop(&grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(apple.cell));
            assert!(!snake.is_occupied(apple.cell));
        }
    }

    #[test]
    fn scan_fallback_finds_the_last_free_cell() {
        let grid = Grid::new(3, 3);
        let mut snake = Snake::new(Cell::new(0, 0));
        for y in 0..3 {
            for x in 0..3 {
                let cell = Cell::new(x, y);
                // Leave exactly one hole
                if cell != Cell::new(2, 1) && cell != Cell::new(0, 0) {
                    snake.add_segment(cell);
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(1);
        let apple = Apple::drop(&grid, &snake, &mut rng).unwrap();
        assert_eq!(apple.cell, Cell::new(2, 1));
    }

    #[test]
    fn full_board_is_an_error() {
        let grid = Grid::new(2, 2);
        let mut snake = Snake::new(Cell::new(0, 0));
        snake.add_segment(Cell::new(1, 0));
        snake.add_segment(Cell::new(0, 1));
        snake.add_segment(Cell::new(1, 1));

        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            Apple::drop(&grid, &snake, &mut rng),
            Err(GameError::BoardFull)
        );
    }
}
