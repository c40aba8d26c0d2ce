use super::{block::Block, colour::Colour, path::Quadrant};

/// Square grid of unit-cell colours produced by flattening a [`Block`].
///
/// `UnitGrid` is the board representation used for scoring and rendering: while
/// [`Block`] is optimized for structural moves, this grid answers "what colour is the
/// unit cell at (x, y)" directly.
///
/// # Layout
///
/// - Side length is `2^(max_depth - level)` of the flattened block
/// - Cells are stored row-major; `(0, 0)` is the top-left unit cell
/// - `x` increases rightward, `y` increases downward
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour};
///
/// let board = Block::new_root(64, 2, Colour::OLD_OLIVE).unwrap();
/// let grid = board.flatten();
/// assert_eq!(grid.side(), 4);
/// assert_eq!(grid.get(3, 3), Some(Colour::OLD_OLIVE));
/// assert_eq!(grid.get(4, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitGrid {
    side: usize,
    cells: Vec<Colour>,
}

impl UnitGrid {
    /// Creates a grid with every cell set to `colour`.
    #[must_use]
    pub fn filled(side: usize, colour: Colour) -> Self {
        Self {
            side,
            cells: vec![colour; side * side],
        }
    }

    /// Flattens `block` into unit cells.
    ///
    /// A leaf becomes a uniformly coloured grid; a subdivided block merges the grids of
    /// its children. The result is computed from scratch on every call.
    #[must_use]
    pub fn from_block(block: &Block) -> Self {
        let side = 1_usize << block.max_depth().saturating_sub(block.level());
        if let Some(colour) = block.colour() {
            return Self::filled(side, colour);
        }
        let [a, b, c, d] = block.children() else {
            unreachable!("subdivided block must have four children");
        };
        Self::merge([a, b, c, d].map(Self::from_block))
    }

    /// Merges four `n×n` grids, given in [`Quadrant`] order, into one `2n×2n` grid.
    ///
    /// # Panics
    ///
    /// Panics if the grids do not all have the same side length.
    #[must_use]
    pub fn merge(quadrants: [UnitGrid; 4]) -> Self {
        let n = quadrants[0].side;
        assert!(
            quadrants.iter().all(|q| q.side == n),
            "merged grids must share one side length"
        );
        let side = n * 2;
        let mut cells = vec![Colour::BLACK; side * side];
        for (quadrant, grid) in Quadrant::ALL.into_iter().zip(&quadrants) {
            let (dx, dy) = quadrant.offset();
            let (x0, y0) = (dx as usize * n, dy as usize * n);
            for (y, row) in grid.rows().enumerate() {
                let start = (y0 + y) * side + x0;
                cells[start..start + n].copy_from_slice(row);
            }
        }
        Self { side, cells }
    }

    /// Number of unit cells along each edge.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Colour of the cell at column `x`, row `y`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.side || y >= self.side {
            return None;
        }
        Some(self.cells[y * self.side + x])
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Colour]> {
        // `max(1)` keeps `chunks_exact` valid for the empty grid.
        self.cells.chunks_exact(self.side.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::tests::sample_board;

    use Colour as C;

    #[test]
    fn test_leaf_is_uniform() {
        let leaf = Block::new_root(32, 3, C::REAL_RED).unwrap();
        let grid = UnitGrid::from_block(&leaf);
        assert_eq!(grid.side(), 8);
        assert!(grid.rows().flatten().all(|&c| c == C::REAL_RED));
        assert_eq!(grid.rows().flatten().count(), 64);
    }

    #[test]
    fn test_unit_leaf_is_single_cell() {
        let leaf = Block::new_root(1, 0, C::WHITE).unwrap();
        let grid = leaf.flatten();
        assert_eq!(grid.side(), 1);
        assert_eq!(grid.get(0, 0), Some(C::WHITE));
    }

    #[test]
    fn test_merge_places_quadrants() {
        let grid = UnitGrid::merge([
            UnitGrid::filled(1, C::REAL_RED),
            UnitGrid::filled(1, C::OLD_OLIVE),
            UnitGrid::filled(1, C::PACIFIC_POINT),
            UnitGrid::filled(1, C::DAFFODIL_DELIGHT),
        ]);
        let rows: Vec<_> = grid.rows().map(<[Colour]>::to_vec).collect();
        assert_eq!(
            rows,
            [
                vec![C::OLD_OLIVE, C::REAL_RED],
                vec![C::PACIFIC_POINT, C::DAFFODIL_DELIGHT],
            ]
        );
    }

    #[test]
    fn test_flatten_nested_board() {
        let grid = sample_board().flatten();
        assert_eq!(grid.side(), 8);

        // top-left child is subdivided into 2x2-unit blocks
        assert_eq!(grid.get(0, 0), Some(C::PACIFIC_POINT));
        assert_eq!(grid.get(1, 1), Some(C::PACIFIC_POINT));
        assert_eq!(grid.get(2, 0), Some(C::DAFFODIL_DELIGHT));
        assert_eq!(grid.get(0, 2), Some(C::OLD_OLIVE));
        assert_eq!(grid.get(3, 3), Some(C::REAL_RED));

        // remaining children are 4x4-unit leaves
        assert_eq!(grid.get(4, 0), Some(C::REAL_RED));
        assert_eq!(grid.get(7, 3), Some(C::REAL_RED));
        assert_eq!(grid.get(0, 4), Some(C::PACIFIC_POINT));
        assert_eq!(grid.get(7, 7), Some(C::DAFFODIL_DELIGHT));

        assert_eq!(grid.get(8, 0), None);
        assert_eq!(grid.get(0, 8), None);
    }

    #[test]
    fn test_flatten_subtree_uses_its_level() {
        let board = sample_board();
        let top_left = &board.children()[Quadrant::TopLeft.index()];
        let grid = top_left.flatten();
        assert_eq!(grid.side(), 4);
        assert_eq!(grid.get(3, 0), Some(C::DAFFODIL_DELIGHT));
    }
}
