use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four children of a subdivided block.
///
/// The discriminant is the child's index in [`Block::children`](super::Block::children):
///
/// ```text
/// +---+---+
/// | 1 | 0 |
/// +---+---+
/// | 2 | 3 |
/// +---+---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Quadrant {
    TopRight = 0,
    TopLeft = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child-index order.
    pub const ALL: [Self; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset of this quadrant's origin from its parent's origin, in units of the child size.
    #[must_use]
    pub const fn offset(self) -> (u32, u32) {
        match self {
            Self::TopRight => (1, 0),
            Self::TopLeft => (0, 0),
            Self::BottomLeft => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }
}

/// Address of a block inside a board, as the quadrants taken from the root.
///
/// The empty path addresses the root itself. Paths stay meaningful across
/// [`Block::create_copy`](super::Block::create_copy), so a node found on a scratch copy
/// can be named on the authoritative board.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockPath(Vec<Quadrant>);

impl BlockPath {
    pub const ROOT: Self = Self(Vec::new());

    /// Depth of the addressed block below the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn quadrants(&self) -> impl Iterator<Item = Quadrant> + '_ {
        self.0.iter().copied()
    }

    pub fn push(&mut self, quadrant: Quadrant) {
        self.0.push(quadrant);
    }

    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Self {
        let mut path = self.clone();
        path.push(quadrant);
        path
    }
}

impl FromIterator<Quadrant> for BlockPath {
    fn from_iter<T: IntoIterator<Item = Quadrant>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", q.index())?;
        }
        Ok(())
    }
}
