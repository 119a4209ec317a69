use crate::grid::ids::{Observation, Position};

/// Row-major bijection between grid positions and observation indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObservationCodec {
    size: usize,
}

impl ObservationCodec {
    pub fn new(size: usize) -> Self {
        ObservationCodec { size }
    }

    /// Edge length of the grid this codec addresses.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct observations, `size²`.
    pub fn observation_count(&self) -> usize {
        self.size * self.size
    }

    /// `row * size + col`. The position is expected to be in bounds.
    pub fn encode(&self, position: Position) -> Observation {
        debug_assert!(position.in_bounds(self.size));
        Observation::from(position.row * self.size + position.col)
    }

    /// `(observation / size, observation % size)`. The observation is expected to be in range.
    pub fn decode(&self, observation: Observation) -> Position {
        debug_assert!(self.contains(observation));
        Position::new(observation.index() / self.size, observation.index() % self.size)
    }

    /// Encode only when the position lies on the grid.
    pub fn try_encode(&self, position: Position) -> Option<Observation> {
        position
            .in_bounds(self.size)
            .then(|| self.encode(position))
    }

    /// Decode only when the observation lies in `[0, size²)`.
    pub fn try_decode(&self, observation: Observation) -> Option<Position> {
        self.contains(observation).then(|| self.decode(observation))
    }

    pub fn contains(&self, observation: Observation) -> bool {
        observation.index() < self.observation_count()
    }

    /// All observations in index order.
    pub fn observations(&self) -> impl Iterator<Item = Observation> {
        (0..self.observation_count()).map(Observation::from)
    }
}
