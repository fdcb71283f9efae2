use std::time::Duration;

use anyhow::{ensure, Result};

pub const DEFAULT_BOARD_SIZE: u16 = 20;
pub const MIN_BOARD_SIZE: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: u16,
    /// Tick period at score 0, in milliseconds
    pub base_tick_ms: u64,
    /// How much each point shortens the tick period
    pub tick_step_ms: u64,
    /// Fastest the game will ever run
    pub min_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            base_tick_ms: 200,
            tick_step_ms: 5,
            min_tick_ms: 50,
        }
    }
}

impl GameConfig {
    pub fn with_board_size(board_size: u16) -> Result<Self> {
        ensure!(
            board_size >= MIN_BOARD_SIZE,
            "board size must be at least {}, got {}",
            MIN_BOARD_SIZE,
            board_size
        );
        Ok(GameConfig { board_size, ..Default::default() })
    }

    /// Time between ticks at the given score: `max(min, base - step * score)`.
    pub fn tick_period(&self, score: u32) -> Duration {
        let speedup = self.tick_step_ms.saturating_mul(u64::from(score));
        let ms = self.base_tick_ms.saturating_sub(speedup).max(self.min_tick_ms);
        Duration::from_millis(ms)
    }
}
