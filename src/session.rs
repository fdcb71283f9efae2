//! Game session state: which screen is showing and the live game on it.
//!
//! All mutation funnels through [`Session::tick`], [`Session::start`] and
//! [`Session::request_direction`], so the terminal front end only reads state
//! back out for drawing.

use std::time::Duration;

use rand::{rngs::ThreadRng, Rng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::engine::{self, CollisionType, StepOutcome};
use crate::food;
use crate::snake::{Direction, Position, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Moved {
        previous_head: Position,
        vacated: Option<Position>,
        ate_food: bool,
    },
    /// The game ended and the session is already back on the home screen.
    GameOver {
        cause: CollisionType,
        final_score: u32,
        /// Body as it was when it crashed
        snake: Snake,
    },
    /// Nothing to advance outside of play.
    Idle,
}

pub struct Session<R: Rng = ThreadRng> {
    config: GameConfig,
    screen: Screen,
    snake: Snake,
    /// Direction the snake last moved in
    direction: Direction,
    /// Direction the next tick will use
    pending: Direction,
    food: Position,
    score: u32,
    rng: R,
}

impl Session<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Session::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let food = food::generate(config.board_size, &mut rng);
        let center = Self::center(&config);

        Session {
            config,
            screen: Screen::Home,
            snake: Snake::new(center),
            direction: Direction::Right,
            pending: Direction::Right,
            food,
            score: 0,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn tick_period(&self) -> Duration {
        self.config.tick_period(self.score)
    }

    /// Home -> Playing. Returns false if a game is already running.
    pub fn start(&mut self) -> bool {
        if self.screen == Screen::Playing {
            return false;
        }

        self.screen = Screen::Playing;
        info!(board_size = self.config.board_size, food = ?self.food, "game started");
        true
    }

    /// Queues a turn for the next tick. Reversing onto the neck is refused.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }

        if direction.is_opposite(self.direction) {
            debug!(?direction, current = ?self.direction, "direction change rejected");
            return false;
        }

        self.pending = direction;
        true
    }

    pub fn tick(&mut self) -> TickEvent {
        if self.screen != Screen::Playing {
            return TickEvent::Idle;
        }

        let previous_head = self.snake.head();
        let direction = self.pending;
        let outcome = engine::step(
            self.config.board_size,
            self.snake.clone(),
            direction,
            self.food,
            self.score,
            &mut self.rng,
        );

        match outcome {
            StepOutcome::Moved { snake, food, score, ate_food, vacated } => {
                if ate_food {
                    debug!(score, next_food = ?food, "food eaten");
                }

                self.snake = snake;
                self.food = food;
                self.score = score;
                self.direction = direction;
                TickEvent::Moved { previous_head, vacated, ate_food }
            }
            StepOutcome::Terminated { cause, final_score } => {
                info!(?cause, final_score, length = self.snake.len(), "game over");
                let snake = self.snake.clone();
                self.end_game();
                TickEvent::GameOver { cause, final_score, snake }
            }
        }
    }

    /// Abandons the running game, if any, and returns to the home screen.
    pub fn leave(&mut self) {
        if self.screen == Screen::Playing {
            info!(score = self.score, "game abandoned");
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.snake = Snake::new(Self::center(&self.config));
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.food = food::generate(self.config.board_size, &mut self.rng);
        self.screen = Screen::Home;
    }

    fn center(config: &GameConfig) -> Position {
        let mid = i32::from(config.board_size / 2);
        Position::new(mid, mid)
    }
}
