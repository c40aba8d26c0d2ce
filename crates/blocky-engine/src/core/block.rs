use std::array;

use rand::Rng;

use crate::BoardSizeError;

use super::{
    action::{Rotation, SwapAxis},
    colour::Colour,
    path::{BlockPath, Quadrant},
    unit_grid::UnitGrid,
};

/// A square region of the board: either a single-coloured leaf or four children.
///
/// Blocks form a quadtree. Every node knows its own geometry (`position`, `size`),
/// its depth (`level`, 0 for the root) and the board-wide `max_depth`, which never changes
/// after the root is built.
///
/// # Structural operations
///
/// [`rotate`](Self::rotate), [`swap`](Self::swap), [`smash`](Self::smash),
/// [`combine`](Self::combine) and [`paint`](Self::paint) mutate the block in place and
/// return `false` without touching anything when the block is not a valid target.
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour, Rotation};
///
/// let mut board = Block::new_root(16, 2, Colour::REAL_RED).unwrap();
/// assert!(!board.rotate(Rotation::Clockwise)); // leaves cannot rotate
///
/// board.subdivide([
///     Colour::REAL_RED,
///     Colour::OLD_OLIVE,
///     Colour::PACIFIC_POINT,
///     Colour::DAFFODIL_DELIGHT,
/// ]);
/// assert!(board.rotate(Rotation::Clockwise));
/// assert_eq!(board.children()[0].colour(), Some(Colour::OLD_OLIVE));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    position: (u32, u32),
    size: u32,
    level: u32,
    max_depth: u32,
    content: BlockContent,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
enum BlockContent {
    Leaf(Colour),
    Split(Box<[Block; 4]>),
}

impl Block {
    /// Deepest `max_depth` a board may have.
    ///
    /// Scoring flattens the board into `4^max_depth` unit cells, so this bounds the work and
    /// memory of every score.
    pub const MAX_DEPTH: u32 = 10;

    /// Checks that a board of side `size` can be subdivided evenly down to `max_depth`.
    ///
    /// `size` must be a non-zero multiple of `2^max_depth`, and `max_depth` at most
    /// [`MAX_DEPTH`](Self::MAX_DEPTH).
    ///
    /// # Example
    ///
    /// ```
    /// use blocky_engine::{Block, BoardSizeError};
    ///
    /// assert!(Block::check_shape(768, 4).is_ok());
    /// assert_eq!(
    ///     Block::check_shape(6, 2),
    ///     Err(BoardSizeError::Indivisible { size: 6, max_depth: 2 })
    /// );
    /// assert_eq!(
    ///     Block::check_shape(1 << 31, 31),
    ///     Err(BoardSizeError::TooDeep { max_depth: 31 })
    /// );
    /// ```
    pub fn check_shape(size: u32, max_depth: u32) -> Result<(), BoardSizeError> {
        if max_depth > Self::MAX_DEPTH {
            return Err(BoardSizeError::TooDeep { max_depth });
        }
        let unit = 1_u32 << max_depth;
        if size == 0 || size % unit != 0 {
            return Err(BoardSizeError::Indivisible { size, max_depth });
        }
        Ok(())
    }

    /// Creates a single-coloured root block at the origin.
    ///
    /// Fails unless [`check_shape`](Self::check_shape) accepts `size` and `max_depth`.
    pub fn new_root(size: u32, max_depth: u32, colour: Colour) -> Result<Self, BoardSizeError> {
        Self::check_shape(size, max_depth)?;
        Ok(Self::new_leaf((0, 0), size, 0, max_depth, colour))
    }

    /// Builds a board from an ASCII picture of its unit cells.
    ///
    /// Each non-empty line is one row of unit cells, top to bottom, written with the
    /// letters of [`Colour::from_char`]. The picture must be square with a power-of-two
    /// side `2^d`, and the board gets `max_depth = d`. Any quadrant of a single colour
    /// becomes one leaf.
    ///
    /// # Panics
    ///
    /// Panics if the picture is not square, its side is not a power of two, it uses an
    /// unknown letter, or [`check_shape`](Self::check_shape) rejects `size` for its depth.
    ///
    /// # Example
    ///
    /// ```
    /// use blocky_engine::{Block, Colour};
    ///
    /// let board = Block::from_ascii(
    ///     8,
    ///     "
    ///     RRBB
    ///     RRBB
    ///     GGGY
    ///     GGYY
    ///     ",
    /// );
    /// assert_eq!(board.max_depth(), 2);
    /// assert_eq!(board.children()[0].colour(), Some(Colour::PACIFIC_POINT));
    /// assert_eq!(board.children()[3].children().len(), 4);
    /// ```
    #[must_use]
    pub fn from_ascii(size: u32, art: &str) -> Self {
        let rows: Vec<Vec<Colour>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| {
                        Colour::from_char(c)
                            .unwrap_or_else(|| panic!("unknown colour letter {c:?}"))
                    })
                    .collect()
            })
            .collect();
        let side = rows.len();
        assert!(
            side.is_power_of_two(),
            "picture side must be a power of two, got {side}"
        );
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), side, "row {y} must have {side} cells");
        }
        let mut root = match Self::new_root(size, side.trailing_zeros(), rows[0][0]) {
            Ok(root) => root,
            Err(err) => panic!("{err}"),
        };
        root.fill_from_cells(&rows, (0, 0), side);
        root
    }

    fn fill_from_cells(&mut self, rows: &[Vec<Colour>], (x0, y0): (usize, usize), side: usize) {
        let first = rows[y0][x0];
        let uniform = rows[y0..y0 + side]
            .iter()
            .all(|row| row[x0..x0 + side].iter().all(|&c| c == first));
        if uniform {
            self.content = BlockContent::Leaf(first);
            return;
        }
        let half = side / 2;
        self.split_into([first; 4]);
        if let Some(children) = self.children_mut() {
            for (quadrant, child) in Quadrant::ALL.into_iter().zip(children) {
                let (dx, dy) = quadrant.offset();
                let origin = (x0 + dx as usize * half, y0 + dy as usize * half);
                child.fill_from_cells(rows, origin, half);
            }
        }
    }

    fn new_leaf(
        position: (u32, u32),
        size: u32,
        level: u32,
        max_depth: u32,
        colour: Colour,
    ) -> Self {
        Self {
            position,
            size,
            level,
            max_depth,
            content: BlockContent::Leaf(colour),
        }
    }

    /// Top-left corner of the block.
    #[must_use]
    pub fn position(&self) -> (u32, u32) {
        self.position
    }

    /// Side length of the block.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Colour of a leaf; `None` for a subdivided block.
    #[must_use]
    pub fn colour(&self) -> Option<Colour> {
        match self.content {
            BlockContent::Leaf(colour) => Some(colour),
            BlockContent::Split(_) => None,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.content.is_leaf()
    }

    /// The four children in [`Quadrant`] order, or an empty slice for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Block] {
        match &self.content {
            BlockContent::Leaf(_) => &[],
            BlockContent::Split(children) => &children[..],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut [Block; 4]> {
        match &mut self.content {
            BlockContent::Leaf(_) => None,
            BlockContent::Split(children) => Some(children),
        }
    }

    fn quadrant_children(&self) -> impl Iterator<Item = (Quadrant, &Block)> {
        Quadrant::ALL.into_iter().zip(self.children())
    }

    /// Height of the subtree below this block (0 for a leaf).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.children()
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns `true` if `location` lies in the half-open square `[position, position + size)`.
    #[must_use]
    pub fn contains(&self, (x, y): (u32, u32)) -> bool {
        let (x0, y0) = self.position;
        (x0..x0 + self.size).contains(&x) && (y0..y0 + self.size).contains(&y)
    }

    /// Returns a fully independent deep copy of this block and its subtree.
    ///
    /// Mutating the copy never affects `self`.
    #[must_use]
    pub fn create_copy(&self) -> Self {
        self.clone()
    }

    /// Follows `path` from this block.
    ///
    /// Returns `None` if the path runs through a leaf.
    #[must_use]
    pub fn get(&self, path: &BlockPath) -> Option<&Block> {
        path.quadrants()
            .try_fold(self, |block, q| block.children().get(q.index()))
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, path: &BlockPath) -> Option<&mut Block> {
        path.quadrants().try_fold(self, |block, q| {
            block.children_mut().map(|children| &mut children[q.index()])
        })
    }

    /// Finds the block at `level` that contains `location`.
    ///
    /// If the deepest block containing `location` is shallower than `level`, that deepest
    /// block is returned instead. Returns `None` if `location` is outside this block.
    #[must_use]
    pub fn locate(&self, location: (u32, u32), level: u32) -> Option<BlockPath> {
        if !self.contains(location) {
            return None;
        }
        let mut path = BlockPath::default();
        let mut block = self;
        while block.level < level {
            let Some((quadrant, child)) = block
                .quadrant_children()
                .find(|(_, child)| child.contains(location))
            else {
                break;
            };
            path.push(quadrant);
            block = child;
        }
        Some(path)
    }

    /// Like [`locate`](Self::locate), but returns the block itself.
    #[must_use]
    pub fn block_at(&self, location: (u32, u32), level: u32) -> Option<&Block> {
        let path = self.locate(location, level)?;
        self.get(&path)
    }

    /// Splits a leaf into four leaves with the given colours, in [`Quadrant`] order.
    ///
    /// Fails on a subdivided block and on a leaf already at `max_depth`.
    /// Unlike [`smash`](Self::smash), this can reach unit cells at `max_depth`; it is the
    /// primitive used to build boards.
    pub fn subdivide(&mut self, colours: [Colour; 4]) -> bool {
        if !self.is_leaf() || self.level >= self.max_depth {
            return false;
        }
        self.split_into(colours);
        true
    }

    fn split_into(&mut self, colours: [Colour; 4]) {
        let half = self.size / 2;
        let (x, y) = self.position;
        let children = array::from_fn(|i| {
            let (dx, dy) = Quadrant::ALL[i].offset();
            Self::new_leaf(
                (x + dx * half, y + dy * half),
                half,
                self.level + 1,
                self.max_depth,
                colours[i],
            )
        });
        self.content = BlockContent::Split(Box::new(children));
    }

    /// Moves this block to `position` and re-derives the positions of its whole subtree.
    fn update_position(&mut self, position: (u32, u32)) {
        self.position = position;
        let half = self.size / 2;
        let (x, y) = position;
        if let Some(children) = self.children_mut() {
            for (quadrant, child) in Quadrant::ALL.into_iter().zip(children) {
                let (dx, dy) = quadrant.offset();
                child.update_position((x + dx * half, y + dy * half));
            }
        }
    }

    /// Moves the children one quadrant in the given direction.
    ///
    /// Each child's subtree is carried along unchanged; only positions are re-derived.
    /// Fails on a leaf.
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        let Some(children) = self.children_mut() else {
            return false;
        };
        match rotation {
            // top-left -> top-right -> bottom-right -> bottom-left -> top-left
            Rotation::Clockwise => children.rotate_left(1),
            Rotation::CounterClockwise => children.rotate_right(1),
        }
        self.update_position(self.position);
        true
    }

    /// Mirrors the children across the given axis.
    ///
    /// Horizontal swaps exchange left and right halves, vertical swaps exchange top and
    /// bottom halves. Fails on a leaf.
    pub fn swap(&mut self, axis: SwapAxis) -> bool {
        let Some(children) = self.children_mut() else {
            return false;
        };
        let pairs = match axis {
            SwapAxis::Horizontal => [
                (Quadrant::TopLeft, Quadrant::TopRight),
                (Quadrant::BottomLeft, Quadrant::BottomRight),
            ],
            SwapAxis::Vertical => [
                (Quadrant::TopLeft, Quadrant::BottomLeft),
                (Quadrant::TopRight, Quadrant::BottomRight),
            ],
        };
        for (a, b) in pairs {
            children.swap(a.index(), b.index());
        }
        self.update_position(self.position);
        true
    }

    /// Returns `true` if [`smash`](Self::smash) would succeed.
    ///
    /// A block can be smashed while its children would stay above the deepest level,
    /// i.e. `level < max_depth - 1`.
    #[must_use]
    pub fn smashable(&self) -> bool {
        self.level + 1 < self.max_depth
    }

    /// Replaces this block's contents with four leaves of random palette colours.
    ///
    /// Whatever subtree existed before is discarded. Fails if the block is not
    /// [`smashable`](Self::smashable).
    pub fn smash<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if !self.smashable() {
            return false;
        }
        let colours = array::from_fn(|_| rng.random());
        self.split_into(colours);
        true
    }

    /// Collapses four leaf children into a single leaf of their most frequent colour.
    ///
    /// Ties go to the colour seen first in [`Quadrant`] order. Fails on a leaf and on a
    /// block with any subdivided child.
    pub fn combine(&mut self) -> bool {
        let Some(colours) = self
            .children()
            .iter()
            .map(Block::colour)
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        let Some(&first) = colours.first() else {
            return false;
        };

        let mut majority = first;
        let mut majority_count = 0;
        for &colour in &colours {
            let count = colours.iter().filter(|&&c| c == colour).count();
            if count > majority_count {
                majority = colour;
                majority_count = count;
            }
        }
        self.content = BlockContent::Leaf(majority);
        true
    }

    /// Recolours a leaf.
    ///
    /// Fails on a subdivided block and when the leaf already has `colour`.
    pub fn paint(&mut self, colour: Colour) -> bool {
        match &mut self.content {
            BlockContent::Leaf(current) if *current != colour => {
                *current = colour;
                true
            }
            _ => false,
        }
    }

    /// Flattens this block into a grid of unit cells.
    ///
    /// See [`UnitGrid::from_block`].
    #[must_use]
    pub fn flatten(&self) -> UnitGrid {
        UnitGrid::from_block(self)
    }
}
