use rand::Rng;

use crate::food;
use crate::snake::{Direction, Position, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollisionType {
    Wall,
    SelfCollision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved {
        snake: Snake,
        food: Position,
        score: u32,
        ate_food: bool,
        /// Cell the tail left this tick, `None` when the snake grew.
        vacated: Option<Position>,
    },
    Terminated {
        cause: CollisionType,
        /// Score held before the fatal tick.
        final_score: u32,
    },
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Terminated { .. })
    }
}

/// Advances the game by one tick.
///
/// The head moves one cell in `direction`. Landing on `food` grows the snake,
/// bumps the score and draws a new food cell; otherwise the tail is vacated.
/// The tick is fatal when the new head leaves the board or lands on any
/// segment of the resulting body other than itself, so a tail vacated in the
/// same tick is not an obstacle.
pub fn step<R: Rng + ?Sized>(
    board_size: u16,
    mut snake: Snake,
    direction: Direction,
    food: Position,
    score: u32,
    rng: &mut R,
) -> StepOutcome {
    let new_head = snake.head().moved(direction);
    snake.push_head(new_head);

    let ate_food = new_head == food;
    let (next_food, next_score, vacated) = if ate_food {
        (food::generate(board_size, rng), score + 1, None)
    } else {
        (food, score, snake.drop_tail())
    };

    let cause = if !new_head.in_bounds(board_size) {
        Some(CollisionType::Wall)
    } else if snake.hits_body(new_head) {
        Some(CollisionType::SelfCollision)
    } else {
        None
    };

    match cause {
        Some(cause) => StepOutcome::Terminated { cause, final_score: score },
        None => StepOutcome::Moved { snake, food: next_food, score: next_score, ate_food, vacated },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(r, c)| Position::new(r, c))).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn moves_without_growing() {
        let out = step(20, snake(&[(10, 10)]), Right, Position::new(5, 5), 3, &mut rng());

        assert_eq!(out, StepOutcome::Moved {
            snake: snake(&[(10, 11)]),
            food: Position::new(5, 5),
            score: 3,
            ate_food: false,
            vacated: Some(Position::new(10, 10)),
        });
    }

    #[test]
    fn eating_grows_and_scores() {
        let out = step(20, snake(&[(10, 9), (10, 10)]), Right, Position::new(10, 11), 4, &mut rng());

        match out {
            StepOutcome::Moved { snake: body, food, score, ate_food, vacated } => {
                assert_eq!(body, snake(&[(10, 9), (10, 10), (10, 11)]));
                assert_eq!(score, 5);
                assert!(ate_food);
                assert_eq!(vacated, None);
                assert!(food.in_bounds(20));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn leaving_the_board_is_fatal() {
        for (start, dir) in [((0, 0), Up), ((0, 0), Left), ((19, 19), Down), ((19, 19), Right)] {
            let out = step(20, snake(&[start]), dir, Position::new(5, 5), 2, &mut rng());
            assert_eq!(out, StepOutcome::Terminated { cause: CollisionType::Wall, final_score: 2 });
        }
    }

    #[test]
    fn running_into_the_body_is_fatal() {
        // Head at (6,5) turning up into (5,5), which stays occupied this tick
        let body = snake(&[(5, 3), (5, 4), (5, 5), (5, 6), (6, 6), (6, 5)]);
        let out = step(20, body, Up, Position::new(0, 0), 0, &mut rng());
        assert_eq!(out, StepOutcome::Terminated { cause: CollisionType::SelfCollision, final_score: 0 });
    }

    #[test]
    fn chasing_the_vacated_tail_is_allowed() {
        // A 2x2 loop: the head moves into the cell the tail leaves
        let body = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        let out = step(20, body, Up, Position::new(0, 0), 0, &mut rng());
        assert!(!out.is_terminal());
    }

    #[test]
    fn tail_is_an_obstacle_when_growing() {
        // Same loop, but food sits on the tail so it is not vacated
        let body = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        let out = step(20, body, Up, Position::new(5, 5), 7, &mut rng());
        assert_eq!(out, StepOutcome::Terminated { cause: CollisionType::SelfCollision, final_score: 7 });
    }

    #[test]
    fn eating_at_the_edge_still_checks_bounds() {
        let out = step(20, snake(&[(0, 3)]), Up, Position::new(-1, 3), 1, &mut rng());
        assert!(out.is_terminal());
    }

    #[test]
    fn length_is_conserved_or_grows_by_one() {
        let mut rng = rng();
        let mut body = snake(&[(10, 10)]);
        let mut food = Position::new(10, 14);
        let mut score = 0;
        let mut turns = [Right, Down, Left, Up].iter().cycle();

        for tick in 0..40 {
            let dir = if tick % 4 == 0 { *turns.next().unwrap() } else { Right };
            let before = body.len();
            match step(20, body.clone(), dir, food, score, &mut rng) {
                StepOutcome::Moved { snake: next, food: f, score: s, ate_food, .. } => {
                    let expected = if ate_food { before + 1 } else { before };
                    assert_eq!(next.len(), expected);
                    assert_eq!(s, score + u32::from(ate_food));
                    body = next;
                    food = f;
                    score = s;
                }
                StepOutcome::Terminated { final_score, .. } => {
                    assert_eq!(final_score, score);
                    break;
                }
            }
        }
    }
}
