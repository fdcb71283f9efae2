use std::time::{Duration, Instant};

use crate::{Coords, TermInt};
use crate::board::Cell;
use crate::config::GameConfig;
use crate::input::{is_ctrl_c, map_key, KeyAction};
use crate::session::{Session, TickEvent};
use crate::snake::{Position, Snake};
use crate::term::TermManager;

use anyhow::{bail, Result};
use tracing::info;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_GLYPH: [char; 2] = ['(', ')'];
const DEAD_SNAKE_CHAR: char = 'X';

// How long to block on input while paused
const PAUSED_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Repeating tick timer for one game. It lives only as long as the play loop.
#[derive(Debug)]
struct Ticker {
    next_due: Instant,
}

impl Ticker {
    fn start(period: Duration, now: Instant) -> Self {
        Ticker { next_due: now + period }
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    fn reschedule(&mut self, period: Duration, now: Instant) {
        self.next_due = now + period;
    }
}

pub struct SnakeGame {
    term: TermManager,
    session: Session,
    origin: Coords,
    paused: bool,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new()?;
        let origin = board_origin(term.get_terminal_size(), config.board_size)?;

        Ok(SnakeGame { term, session: Session::new(config), origin, paused: false })
    }

    /// Alternates between the home screen and games until the player quits.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;

        while self.show_home()? == Flow::Continue {
            if self.play()? == Flow::Quit {
                break;
            }
        }

        self.term.restore()
    }

    fn show_home(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.show_message(&[
            "S N A K E",
            "",
            "Press Enter to play",
            "",
            "Arrow keys or WASD to move",
            "Esc to pause",
            "q or CTRL+C to quit",
        ])?;

        loop {
            match map_key(&self.term.read_key_blocking()?) {
                KeyAction::Start => {
                    self.session.start();
                    return Ok(Flow::Continue);
                }
                KeyAction::Quit => return Ok(Flow::Quit),
                _ => {}
            }
        }
    }

    fn play(&mut self) -> Result<Flow> {
        self.paused = false;
        self.draw_game()?;

        let mut ticker = Ticker::start(self.session.tick_period(), Instant::now());

        loop {
            let wait = if self.paused { PAUSED_POLL } else { ticker.remaining(Instant::now()) };

            for key_ev in self.term.read_key_events(wait)? {
                match map_key(&key_ev) {
                    KeyAction::Quit => {
                        self.session.leave();
                        return Ok(Flow::Quit);
                    }
                    KeyAction::TogglePause => {
                        self.toggle_pause()?;
                        ticker.reschedule(self.session.tick_period(), Instant::now());
                    }
                    KeyAction::Steer(dir) if !self.paused => {
                        self.session.request_direction(dir);
                    }
                    _ => {}
                }
            }

            if self.paused || !ticker.is_due(Instant::now()) {
                continue;
            }

            match self.session.tick() {
                TickEvent::Moved { previous_head, vacated, ate_food } => {
                    self.draw_step(previous_head, vacated, ate_food)?;
                    ticker.reschedule(self.session.tick_period(), Instant::now());
                }
                TickEvent::GameOver { final_score, snake, .. } => {
                    return self.game_over(&snake, final_score);
                }
                TickEvent::Idle => return Ok(Flow::Continue),
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, snake: &Snake, score: u32) -> Result<Flow> {
        for pos in snake.segments() {
            self.draw_glyph(pos, [DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR]);
        }

        self.term.show_message(&[
            "Game over!",
            &format!("Score: {}", score),
            "",
            "Press any key to go back,",
            "or CTRL+C to quit.",
        ])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        Ok(Flow::Continue)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        Ok(())
    }

    fn draw_game(&mut self) -> Result<()> {
        self.term.clear()?;

        let size = self.session.config().board_size;
        self.term.draw_box(self.origin, size * 2, size);

        let n = i32::from(size);
        for row in 0..n {
            for col in 0..n {
                self.draw_cell(Position::new(row, col));
            }
        }

        self.draw_score();
        self.term.flush()
    }

    fn draw_step(&mut self, previous_head: Position, vacated: Option<Position>, ate_food: bool) -> Result<()> {
        if let Some(tail) = vacated {
            self.draw_cell(tail);
        }
        self.draw_cell(previous_head);
        self.draw_cell(self.session.snake().head());

        if ate_food {
            self.draw_cell(self.session.food());
            self.draw_score();
        }

        self.term.flush()
    }

    fn draw_score(&mut self) {
        let pos = (self.origin.0 - 1, self.origin.1 - 2);
        let line = format!("Score: {:<8}", self.session.score());
        self.term.print_str_at(pos, &line);
    }

    fn draw_cell(&mut self, pos: Position) {
        let snake = self.session.snake();
        let glyph = match Cell::at(pos, snake, self.session.food()) {
            Cell::Snake if pos == snake.head() => {
                let ch = self.session.direction().head_char();
                [ch, ch]
            }
            Cell::Snake => [SNAKE_BODY_CHAR, SNAKE_BODY_CHAR],
            Cell::Food => APPLE_GLYPH,
            Cell::Empty => [' ', ' '],
        };
        self.draw_glyph(pos, glyph);
    }

    fn draw_glyph(&mut self, pos: Position, glyph: [char; 2]) {
        if let Some((x, y)) = cell_to_screen(self.origin, self.session.config().board_size, pos) {
            self.term.print_at((x, y), glyph[0]);
            self.term.print_at((x + 1, y), glyph[1]);
        }
    }
}

/// Top-left inner screen cell of the board, centred in the terminal.
/// Each board cell takes two columns; a score line sits above the frame.
fn board_origin(terminal: Coords, board_size: u16) -> Result<Coords> {
    let (term_w, term_h) = terminal;
    let need_w = u32::from(board_size) * 2 + 2;
    let need_h = u32::from(board_size) + 3;

    if u32::from(term_w) < need_w || u32::from(term_h) < need_h {
        bail!(
            "terminal is {}x{}, but a {}x{} board needs at least {}x{}",
            term_w, term_h, board_size, board_size, need_w, need_h
        );
    }

    let x = (term_w - board_size * 2) / 2;
    let y = (term_h - board_size) / 2 + 1;
    Ok((x.max(1), y.max(2)))
}

fn cell_to_screen(origin: Coords, board_size: u16, pos: Position) -> Option<Coords> {
    if !pos.in_bounds(board_size) {
        return None;
    }

    Some((origin.0 + pos.col as TermInt * 2, origin.1 + pos.row as TermInt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_fires_after_its_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(Duration::from_millis(200), t0);

        assert!(!ticker.is_due(t0));
        assert_eq!(ticker.remaining(t0), Duration::from_millis(200));
        assert!(ticker.is_due(t0 + Duration::from_millis(200)));
        assert_eq!(ticker.remaining(t0 + Duration::from_millis(300)), Duration::ZERO);

        ticker.reschedule(Duration::from_millis(50), t0 + Duration::from_millis(200));
        assert!(!ticker.is_due(t0 + Duration::from_millis(220)));
        assert!(ticker.is_due(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn board_is_centred() {
        // 20 cells at two columns each, in an 80x24 terminal
        assert_eq!(board_origin((80, 24), 20).unwrap(), (20, 3));
    }

    #[test]
    fn board_fits_exactly() {
        let (x, y) = board_origin((42, 23), 20).unwrap();
        assert_eq!((x, y), (1, 2));
        // Right frame column and bottom frame row are still on screen
        assert!(x + 40 <= 41);
        assert!(y + 20 <= 22);
    }

    #[test]
    fn small_terminal_is_rejected() {
        assert!(board_origin((41, 40), 20).is_err());
        assert!(board_origin((80, 22), 20).is_err());
    }

    #[test]
    fn cells_map_to_two_columns() {
        assert_eq!(cell_to_screen((5, 3), 20, Position::new(0, 0)), Some((5, 3)));
        assert_eq!(cell_to_screen((5, 3), 20, Position::new(2, 4)), Some((13, 5)));
        assert_eq!(cell_to_screen((5, 3), 20, Position::new(-1, 0)), None);
    }
}
