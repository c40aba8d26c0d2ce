use blocky_engine::{Colour, UnitGrid};

use crate::{BoxedGoal, Goal, GoalKind};

/// Rewards unit cells of the target colour on the outer edge of the board.
///
/// Each edge (top, bottom, left, right) is checked independently, so a corner cell counts once
/// for each of its two edges. A board entirely in the target colour scores `4 * side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerimeterGoal {
    colour: Colour,
}

impl PerimeterGoal {
    #[must_use]
    pub const fn new(colour: Colour) -> Self {
        Self { colour }
    }
}

impl Goal for PerimeterGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Perimeter
    }

    fn colour(&self) -> Colour {
        self.colour
    }

    fn description(&self) -> &'static str {
        "Perimeter: put as many unit cells of your colour on the outer edge as you can; \
         corners count twice"
    }

    fn clone_boxed(&self) -> BoxedGoal {
        Box::new(*self)
    }

    fn score_grid(&self, grid: &UnitGrid) -> usize {
        let side = grid.side();
        let last = side.saturating_sub(1);
        (0..side)
            .map(|i| {
                [
                    grid.get(i, 0),
                    grid.get(i, last),
                    grid.get(0, i),
                    grid.get(last, i),
                ]
                .into_iter()
                .filter(|&cell| cell == Some(self.colour))
                .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use blocky_engine::Block;

    use super::*;

    #[test]
    fn test_uniform_board_scores_four_sides() {
        let goal = PerimeterGoal::new(Colour::OLD_OLIVE);
        let board = Block::new_root(8, 2, Colour::OLD_OLIVE).unwrap();
        assert_eq!(board.flatten().side(), 4);
        assert_eq!(goal.score(&board), 16);

        let deep = Block::new_root(64, 5, Colour::OLD_OLIVE).unwrap();
        assert_eq!(goal.score(&deep), 4 * 32);
    }

    #[test]
    fn test_single_cell_board() {
        let board = Block::new_root(10, 0, Colour::REAL_RED).unwrap();
        assert_eq!(PerimeterGoal::new(Colour::REAL_RED).score(&board), 4);
        assert_eq!(PerimeterGoal::new(Colour::OLD_OLIVE).score(&board), 0);
    }

    #[test]
    fn test_corners_count_twice() {
        let board = Block::from_ascii(
            16,
            "
            RBBR
            BBBB
            BBBB
            RBBB
            ",
        );
        assert_eq!(PerimeterGoal::new(Colour::REAL_RED).score(&board), 6);
    }

    #[test]
    fn test_interior_cells_do_not_count() {
        let board = Block::from_ascii(
            16,
            "
            BBBB
            BRRB
            BRRB
            BBBB
            ",
        );
        assert_eq!(PerimeterGoal::new(Colour::REAL_RED).score(&board), 0);
        assert_eq!(PerimeterGoal::new(Colour::PACIFIC_POINT).score(&board), 16);
    }
}
