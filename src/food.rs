use rand::Rng;

use crate::snake::Position;

/// Picks a uniformly random cell. Cells under the snake are not excluded.
pub fn generate<R: Rng + ?Sized>(board_size: u16, rng: &mut R) -> Position {
    let n = i32::from(board_size);
    Position::new(rng.gen_range(0..n), rng.gen_range(0..n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn food_is_always_on_the_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [1u16, 2, 5, 20] {
            for _ in 0..500 {
                assert!(generate(size, &mut rng).in_bounds(size));
            }
        }
    }

    #[test]
    fn food_reaches_every_corner() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: Vec<_> = (0..2000).map(|_| generate(3, &mut rng)).collect();
        for corner in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert!(seen.contains(&Position::new(corner.0, corner.1)));
        }
    }
}
