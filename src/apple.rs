use rand::Rng;

use crate::grid::Position;

/// Columns and rows (inclusive) an apple can be relocated to.
pub const SPAWN_COLUMNS: (i32, i32) = (5, 25);
pub const SPAWN_ROWS: (i32, i32) = (5, 15);

pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn new(position: Position) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves to a random cell of the spawn region. The snake's body is not
    /// taken into account.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, cell: i32) {
        let col = rng.gen_range(SPAWN_COLUMNS.0..=SPAWN_COLUMNS.1);
        let row = rng.gen_range(SPAWN_ROWS.0..=SPAWN_ROWS.1);
        self.position = Position::at_cell(col, row, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const SIZE: i32 = 40;

    #[test]
    fn relocation_stays_in_spawn_region() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut apple = Apple::new(Position::at_cell(3, 3, SIZE));
        let mut seen = HashSet::new();

        for _ in 0..5000 {
            apple.relocate(&mut rng, SIZE);
            let pos = apple.position();
            assert_eq!(pos.x % SIZE, 0);
            assert_eq!(pos.y % SIZE, 0);
            assert!((5 * SIZE..=25 * SIZE).contains(&pos.x), "x out of range: {:?}", pos);
            assert!((5 * SIZE..=15 * SIZE).contains(&pos.y), "y out of range: {:?}", pos);
            seen.insert(pos);
        }

        // Both ends of the inclusive ranges are reachable.
        assert!(seen.iter().any(|p| p.x == 5 * SIZE));
        assert!(seen.iter().any(|p| p.x == 25 * SIZE));
        assert!(seen.iter().any(|p| p.y == 5 * SIZE));
        assert!(seen.iter().any(|p| p.y == 15 * SIZE));
    }
}
