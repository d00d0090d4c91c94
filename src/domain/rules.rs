/// Collision rules: pure functions, no side effects.
///
/// Board edges are not collisions: the head wraps toroidally inside
/// `Snake::advance`, so the only lethal contact is head-vs-body.

use super::apple::Apple;
use super::snake::Snake;

/// Head occupies a body cell. Checked after every advance; true ends
/// the round.
pub fn self_collision(snake: &Snake) -> bool {
    snake.body().contains(&snake.head())
}

/// Head occupies the apple's cell.
pub fn apple_collision(snake: &Snake, apple: &Apple) -> bool {
    snake.head() == apple.cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Cell;

    #[test]
    fn head_on_body_collides() {
        let mut s = Snake::new(Cell::new(3, 3));
        s.add_segment(Cell::new(2, 3));
        s.add_segment(Cell::new(3, 3)); // overlaps the head
        assert!(self_collision(&s));
    }

    #[test]
    fn disjoint_body_does_not_collide() {
        let mut s = Snake::new(Cell::new(3, 3));
        s.add_segment(Cell::new(2, 3));
        s.add_segment(Cell::new(1, 3));
        assert!(!self_collision(&s));
    }

    #[test]
    fn lone_head_never_self_collides() {
        let s = Snake::new(Cell::new(0, 0));
        assert!(!self_collision(&s));
    }

    #[test]
    fn apple_contact_is_head_only() {
        let mut s = Snake::new(Cell::new(3, 3));
        s.add_segment(Cell::new(2, 3));
        assert!(apple_collision(&s, &Apple { cell: Cell::new(3, 3) }));
        assert!(!apple_collision(&s, &Apple { cell: Cell::new(2, 3) }));
        assert!(!apple_collision(&s, &Apple { cell: Cell::new(4, 3) }));
    }
}
