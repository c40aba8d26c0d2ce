use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// An RGB colour of a leaf block.
///
/// Serializes as a `[r, g, b]` array.
///
/// # Example
///
/// ```
/// use blocky_engine::Colour;
///
/// assert_eq!(Colour::REAL_RED.name(), Some("Real Red"));
/// assert_eq!(Colour::new(1, 2, 3).name(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const PACIFIC_POINT: Self = Self::new(1, 128, 181);
    pub const REAL_RED: Self = Self::new(199, 44, 58);
    pub const OLD_OLIVE: Self = Self::new(138, 151, 71);
    pub const DAFFODIL_DELIGHT: Self = Self::new(255, 211, 92);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Colours a block can take during play, in palette order.
    pub const PALETTE: [Self; 4] = [
        Self::PACIFIC_POINT,
        Self::REAL_RED,
        Self::OLD_OLIVE,
        Self::DAFFODIL_DELIGHT,
    ];

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the display name of a named colour.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::PACIFIC_POINT => "Pacific Point",
            Self::REAL_RED => "Real Red",
            Self::OLD_OLIVE => "Old Olive",
            Self::DAFFODIL_DELIGHT => "Daffodil Delight",
            Self::BLACK => "Black",
            Self::WHITE => "White",
            _ => return None,
        };
        Some(name)
    }

    /// Returns the single-letter code of a named colour.
    ///
    /// # Examples
    ///
    /// ```
    /// use blocky_engine::Colour;
    ///
    /// assert_eq!(Colour::PACIFIC_POINT.as_char(), Some('B'));
    /// assert_eq!(Colour::OLD_OLIVE.as_char(), Some('G'));
    /// ```
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        let c = match self {
            Self::PACIFIC_POINT => 'B',
            Self::REAL_RED => 'R',
            Self::OLD_OLIVE => 'G',
            Self::DAFFODIL_DELIGHT => 'Y',
            Self::BLACK => 'K',
            Self::WHITE => 'W',
            _ => return None,
        };
        Some(c)
    }

    /// Parses a single-letter colour code.
    ///
    /// # Examples
    ///
    /// ```
    /// use blocky_engine::Colour;
    ///
    /// assert_eq!(Colour::from_char('R'), Some(Colour::REAL_RED));
    /// assert_eq!(Colour::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::PACIFIC_POINT),
            'R' => Some(Self::REAL_RED),
            'G' => Some(Self::OLD_OLIVE),
            'Y' => Some(Self::DAFFODIL_DELIGHT),
            'K' => Some(Self::BLACK),
            'W' => Some(Self::WHITE),
            _ => None,
        }
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Colour> for [u8; 3] {
    fn from(colour: Colour) -> Self {
        [colour.r, colour.g, colour.b]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }
}

/// Samples uniformly from [`Colour::PALETTE`].
impl Distribution<Colour> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Colour {
        Colour::PALETTE[rng.random_range(0..Colour::PALETTE.len())]
    }
}
