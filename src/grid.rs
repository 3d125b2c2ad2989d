use rand::Rng;
use serde::{Deserialize, Serialize};

/// The pitch location grid is a fixed 5x5 coordinate space. The strike zone
/// is the centered 3x3 sub-square, computed from the grid size so the zone
/// stays centered if the grid ever changes.
pub const GRID_SIZE: usize = 5;

const ZONE_START: usize = (GRID_SIZE - 3) / 2;
const ZONE_END: usize = ZONE_START + 2;

/// A single cell on the location grid, zero-indexed from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLocation {
    pub row: usize,
    pub col: usize,
}

impl GridLocation {
    /// Draw a location uniformly at random; row and column are independent
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            row: rng.gen_range(0..GRID_SIZE),
            col: rng.gen_range(0..GRID_SIZE),
        }
    }

    /// True iff both row and column fall inside the centered strike zone
    pub fn is_in_strike_zone(&self) -> bool {
        (ZONE_START..=ZONE_END).contains(&self.row) && (ZONE_START..=ZONE_END).contains(&self.col)
    }
}

impl std::fmt::Display for GridLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}
