use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the grid, addressed as `(row, col)` with the origin in the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Apply a `(d_row, d_col)` displacement, returning `None` when it would leave a `size`×`size` grid.
    pub fn offset(&self, delta: (isize, isize), size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(delta.0)?;
        let col = self.col.checked_add_signed(delta.1)?;
        let next = Position { row, col };
        next.in_bounds(size).then_some(next)
    }

    /// Whether this position lies inside a `size`×`size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        (position.row, position.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Linear index of a grid cell, as exposed to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(usize);

impl Observation {
    /// Return the underlying observation index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for Observation {
    fn from(value: usize) -> Self {
        Observation(value)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw action index as supplied by a policy or sampler.
/// Nothing guarantees it names a real action; the model validates it on every lookup.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(usize);

impl ActionId {
    /// Get the raw action index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}

impl From<Action> for ActionId {
    fn from(action: Action) -> Self {
        ActionId(action.index())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical moves of the grid world, in index order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
    Stay,
}

impl Action {
    /// Every action, ordered by index.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Right,
        Action::Down,
        Action::Left,
        Action::Stay,
    ];

    /// Number of actions available in every observation.
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Stay => 4,
        }
    }

    /// Resolve a raw index back to an action, if it names one.
    pub fn from_id(action_id: ActionId) -> Option<Action> {
        Self::ALL.get(action_id.index()).copied()
    }

    /// `(d_row, d_col)` displacement applied by this action.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Stay => (0, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
            Action::Stay => "stay",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
