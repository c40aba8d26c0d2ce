use std::fmt;

use blocky_engine::{Block, Colour, UnitGrid};
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use serde::{Deserialize, Serialize};

use crate::{BlobGoal, PerimeterGoal};

/// A player's objective: a target colour and a way of scoring a board for it.
///
/// Scores are non-negative and higher is better. Implementations are immutable after
/// construction.
pub trait Goal: fmt::Debug + Send + Sync {
    fn kind(&self) -> GoalKind;

    fn colour(&self) -> Colour;

    /// Fixed human-readable explanation of this kind of goal.
    fn description(&self) -> &'static str;

    fn clone_boxed(&self) -> BoxedGoal;

    /// Scores an already flattened board.
    #[must_use]
    fn score_grid(&self, grid: &UnitGrid) -> usize;

    /// Scores `board` under this goal.
    ///
    /// The board is flattened afresh on every call.
    #[must_use]
    fn score(&self, board: &Block) -> usize {
        self.score_grid(&board.flatten())
    }
}

impl fmt::Display for dyn Goal + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.colour())
    }
}

pub type BoxedGoal = Box<dyn Goal>;

impl Clone for BoxedGoal {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl Goal for BoxedGoal {
    fn kind(&self) -> GoalKind {
        self.as_ref().kind()
    }

    fn colour(&self) -> Colour {
        self.as_ref().colour()
    }

    fn description(&self) -> &'static str {
        self.as_ref().description()
    }

    fn clone_boxed(&self) -> BoxedGoal {
        self.as_ref().clone_boxed()
    }

    fn score_grid(&self, grid: &UnitGrid) -> usize {
        self.as_ref().score_grid(grid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Perimeter,
    Blob,
}

impl GoalKind {
    pub const ALL: [Self; 2] = [Self::Perimeter, Self::Blob];

    /// Creates a goal of this kind for `colour`.
    #[must_use]
    pub fn create(self, colour: Colour) -> BoxedGoal {
        match self {
            Self::Perimeter => Box::new(PerimeterGoal::new(colour)),
            Self::Blob => Box::new(BlobGoal::new(colour)),
        }
    }
}

impl Distribution<GoalKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GoalKind {
        GoalKind::ALL[rng.random_range(0..GoalKind::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GoalGenerationError {
    #[display("cannot create {requested} goals from {available} distinct colours")]
    TooManyGoals { requested: usize, available: usize },
}

/// Creates `num_goals` goals of one randomly chosen kind, each with a distinct palette colour.
///
/// # Example
///
/// ```
/// use blocky_evaluator::{Goal as _, generate_goals};
///
/// let goals = generate_goals(3, &mut rand::rng()).unwrap();
/// assert_eq!(goals.len(), 3);
/// assert!(goals.iter().all(|goal| goal.kind() == goals[0].kind()));
///
/// assert!(generate_goals(5, &mut rand::rng()).is_err());
/// ```
pub fn generate_goals<R>(
    num_goals: usize,
    rng: &mut R,
) -> Result<Vec<BoxedGoal>, GoalGenerationError>
where
    R: Rng + ?Sized,
{
    let mut colours = Colour::PALETTE;
    if num_goals > colours.len() {
        return Err(GoalGenerationError::TooManyGoals {
            requested: num_goals,
            available: colours.len(),
        });
    }
    let kind: GoalKind = rng.random();
    colours.shuffle(rng);
    Ok(colours[..num_goals]
        .iter()
        .map(|&colour| kind.create(colour))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_generated_goals_have_distinct_colours_and_one_kind() {
        let mut rng = Pcg32::seed_from_u64(42);
        for num_goals in 0..=Colour::PALETTE.len() {
            let goals = generate_goals(num_goals, &mut rng).unwrap();
            assert_eq!(goals.len(), num_goals);
            let colours: HashSet<_> = goals.iter().map(|goal| goal.colour()).collect();
            assert_eq!(colours.len(), num_goals);
            assert!(colours.iter().all(|c| Colour::PALETTE.contains(c)));
            let kinds: HashSet<_> = goals.iter().map(|goal| goal.kind()).collect();
            assert!(kinds.len() <= 1);
        }
    }

    #[test]
    fn test_both_kinds_get_generated() {
        let mut rng = Pcg32::seed_from_u64(0);
        let kinds: HashSet<_> = (0..50)
            .map(|_| generate_goals(1, &mut rng).unwrap()[0].kind())
            .collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_too_many_goals() {
        let mut rng = Pcg32::seed_from_u64(0);
        let err = generate_goals(5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GoalGenerationError::TooManyGoals {
                requested: 5,
                available: 4
            }
        );
        assert_eq!(err.to_string(), "cannot create 5 goals from 4 distinct colours");
    }

    #[test]
    fn test_boxed_goal_clone_and_display() {
        let goal = GoalKind::Blob.create(Colour::REAL_RED);
        let cloned = goal.clone();
        assert_eq!(cloned.kind(), GoalKind::Blob);
        assert_eq!(cloned.colour(), Colour::REAL_RED);
        assert_eq!(goal.to_string(), format!("{} (Real Red)", goal.description()));
    }

    #[test]
    fn test_goal_kind_serialization() {
        let serialized = serde_json::to_string(&GoalKind::Perimeter).unwrap();
        assert_eq!(serialized, "\"perimeter\"");
        let deserialized: GoalKind = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(deserialized, GoalKind::Blob);
    }
}
