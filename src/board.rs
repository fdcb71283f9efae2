use crate::snake::{Position, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Snake,
    Food,
}

impl Cell {
    pub fn at(pos: Position, snake: &Snake, food: Position) -> Cell {
        // Food can spawn under the snake; the snake is drawn on top
        if snake.contains(pos) {
            Cell::Snake
        } else if pos == food {
            Cell::Food
        } else {
            Cell::Empty
        }
    }
}

/// Row-major classification of every cell on the board.
pub fn cells(board_size: u16, snake: &Snake, food: Position) -> Vec<Vec<Cell>> {
    let n = i32::from(board_size);
    (0..n)
        .map(|row| (0..n).map(|col| Cell::at(Position::new(row, col), snake, food)).collect())
        .collect()
}
