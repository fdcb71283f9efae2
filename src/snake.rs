use std::collections::VecDeque;

use Direction::*;

/// A cell on the board. Signed so that a head stepping off the edge is representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn moved(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Position { row: self.row + dr, col: self.col + dc }
    }

    pub fn in_bounds(self, board_size: u16) -> bool {
        let n = i32::from(board_size);
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// (row, col) offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Snake body, tail at the front and head at the back. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { body: VecDeque::from([head]) }
    }

    /// Builds a snake from tail-to-head segments; `None` if there are none.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Position {
        // The constructors never produce an empty body
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True if `pos` overlaps any segment other than the head.
    pub fn hits_body(&self, pos: Position) -> bool {
        self.body.range(..self.body.len() - 1).any(|&seg| seg == pos)
    }

    pub(crate) fn push_head(&mut self, head: Position) {
        self.body.push_back(head);
    }

    pub(crate) fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_front()
        } else {
            None
        }
    }
}
