use blocky_engine::{Colour, UnitGrid};

use crate::{BoxedGoal, Goal, GoalKind};

/// Rewards the largest connected group of unit cells in the target colour.
///
/// Cells are connected through their four edges only, never diagonally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobGoal {
    colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Matching,
    NotMatching,
}

impl BlobGoal {
    #[must_use]
    pub const fn new(colour: Colour) -> Self {
        Self { colour }
    }

    /// Size of the blob containing `start` that has not been counted yet.
    ///
    /// Returns 0 if `start` is outside the grid, already visited, or not in the target colour.
    /// Every cell reached is marked in `visits`, so repeated calls over the whole grid look at
    /// each cell once.
    fn undiscovered_blob_size(
        &self,
        start: (usize, usize),
        grid: &UnitGrid,
        visits: &mut [Visit],
    ) -> usize {
        let side = grid.side();
        let mut size = 0;
        let mut stack = vec![start];
        while let Some((x, y)) = stack.pop() {
            // x or y may have wrapped below zero; `get` treats that as out of bounds
            let Some(colour) = grid.get(x, y) else {
                continue;
            };
            let visit = &mut visits[y * side + x];
            if *visit != Visit::Unvisited {
                continue;
            }
            if colour != self.colour {
                *visit = Visit::NotMatching;
                continue;
            }
            *visit = Visit::Matching;
            size += 1;
            stack.extend([
                (x + 1, y),
                (x.wrapping_sub(1), y),
                (x, y + 1),
                (x, y.wrapping_sub(1)),
            ]);
        }
        size
    }
}

impl Goal for BlobGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Blob
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    fn description(&self) -> &'static str {
        "Blob: build the largest connected group of unit cells in your colour"
    }

    fn clone_boxed(&self) -> BoxedGoal {
        Box::new(*self)
    }

    fn score_grid(&self, grid: &UnitGrid) -> usize {
        let side = grid.side();
        let mut visits = vec![Visit::Unvisited; side * side];
        let mut largest = 0;
        for y in 0..side {
            for x in 0..side {
                largest = largest.max(self.undiscovered_blob_size((x, y), grid, &mut visits));
            }
        }
        largest
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::Block;

    use super::*;

    #[test]
    fn test_largest_of_two_blobs() {
        let board = Block::from_ascii(
            16,
            "
            RRGG
            RGGG
            GGRR
            GRRR
            ",
        );
        assert_eq!(BlobGoal::new(Colour::REAL_RED).score(&board), 5);
    }

    #[test]
    fn test_no_target_cells_scores_zero() {
        let board = Block::from_ascii(
            16,
            "
            GGBB
            GGBB
            YYBB
            YYYB
            ",
        );
        assert_eq!(BlobGoal::new(Colour::REAL_RED).score(&board), 0);
    }

    #[test]
    fn test_diagonal_cells_are_not_connected() {
        let board = Block::from_ascii(
            16,
            "
            RBRB
            BRBR
            RBRB
            BRBR
            ",
        );
        assert_eq!(BlobGoal::new(Colour::REAL_RED).score(&board), 1);
    }

    #[test]
    fn test_uniform_board_is_one_blob() {
        let board = Block::new_root(32, 3, Colour::DAFFODIL_DELIGHT).unwrap();
        assert_eq!(
            BlobGoal::new(Colour::DAFFODIL_DELIGHT).score(&board),
            8 * 8
        );
    }

    #[test]
    fn test_blob_wrapping_around_obstacle() {
        let board = Block::from_ascii(
            32,
            "
            BBBBBBBB
            BRRRRRRB
            BRBBBBRB
            BRBGGBRB
            BRBGGBRB
            BRBBBBRB
            BRRRRRRG
            BBBBBBGG
            ",
        );
        let goal = BlobGoal::new(Colour::PACIFIC_POINT);
        // outer ring minus the three olive cells in the corner
        assert_eq!(goal.score(&board), 28 - 3);
        assert_eq!(BlobGoal::new(Colour::REAL_RED).score(&board), 20);
    }

    #[test]
    fn test_start_outside_grid_is_zero() {
        let grid = Block::new_root(4, 1, Colour::REAL_RED).unwrap().flatten();
        let mut visits = vec![Visit::Unvisited; 4];
        let goal = BlobGoal::new(Colour::REAL_RED);
        assert_eq!(goal.undiscovered_blob_size((2, 0), &grid, &mut visits), 0);
        assert_eq!(goal.undiscovered_blob_size((0, 0), &grid, &mut visits), 4);
        // already counted
        assert_eq!(goal.undiscovered_blob_size((1, 1), &grid, &mut visits), 0);
    }
}
