pub mod apple;
pub mod grid;
pub mod rules;
pub mod snake;
