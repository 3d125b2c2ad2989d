/// Ball/strike count state machine
///
/// Balls run 0..=3 and strikes 0..=2. Incrementing past the saturation
/// point does not produce a fourth ball or third strike; it resets the
/// whole count, which is how the at-bat ends.
use serde::{Deserialize, Serialize};

const MAX_BALLS: u8 = 3;
const MAX_STRIKES: u8 = 2;

/// What an increment did to the at-bat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtBatOutcome {
    /// The count advanced and the at-bat continues
    InProgress,

    /// Ball four: count reset on the walk
    Walk,

    /// Strike three: count reset on the strikeout
    Strikeout,
}

/// The current count, process-wide single instance owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ball. At three balls the next increment resets the count
    /// instead of reaching four.
    pub fn add_ball(&mut self) -> AtBatOutcome {
        if self.balls < MAX_BALLS {
            self.balls += 1;
            AtBatOutcome::InProgress
        } else {
            self.reset();
            AtBatOutcome::Walk
        }
    }

    /// Add a strike. At two strikes the next increment resets the count
    /// instead of reaching three.
    pub fn add_strike(&mut self) -> AtBatOutcome {
        if self.strikes < MAX_STRIKES {
            self.strikes += 1;
            AtBatOutcome::InProgress
        } else {
            self.reset();
            AtBatOutcome::Strikeout
        }
    }

    /// Set both counters to zero unconditionally
    pub fn reset(&mut self) {
        self.balls = 0;
        self.strikes = 0;
    }

    /// True when the count is full (3-2)
    pub fn is_full(&self) -> bool {
        self.balls == MAX_BALLS && self.strikes == MAX_STRIKES
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balls_saturate_then_reset() {
        let mut count = Count::new();

        assert_eq!(count.add_ball(), AtBatOutcome::InProgress);
        assert_eq!(count.add_ball(), AtBatOutcome::InProgress);
        assert_eq!(count.add_ball(), AtBatOutcome::InProgress);
        assert_eq!(count, Count { balls: 3, strikes: 0 });

        // Fourth increment is the walk, not a count of four
        assert_eq!(count.add_ball(), AtBatOutcome::Walk);
        assert_eq!(count, Count { balls: 0, strikes: 0 });
    }

    #[test]
    fn test_strikes_saturate_then_reset() {
        let mut count = Count::new();

        assert_eq!(count.add_strike(), AtBatOutcome::InProgress);
        assert_eq!(count.add_strike(), AtBatOutcome::InProgress);
        assert_eq!(count, Count { balls: 0, strikes: 2 });

        assert_eq!(count.add_strike(), AtBatOutcome::Strikeout);
        assert_eq!(count, Count { balls: 0, strikes: 0 });
    }

    #[test]
    fn test_walk_clears_strikes_too() {
        let mut count = Count::new();
        count.add_strike();
        count.add_ball();
        count.add_ball();
        count.add_ball();
        assert_eq!(count, Count { balls: 3, strikes: 1 });

        assert_eq!(count.add_ball(), AtBatOutcome::Walk);
        assert_eq!(count, Count { balls: 0, strikes: 0 });
    }

    #[test]
    fn test_full_count() {
        let mut count = Count::new();
        for _ in 0..3 {
            count.add_ball();
        }
        for _ in 0..2 {
            count.add_strike();
        }
        assert!(count.is_full());
        assert_eq!(count.to_string(), "3-2");
    }

    #[test]
    fn test_reset() {
        let mut count = Count::new();
        count.add_ball();
        count.add_strike();
        count.reset();
        assert_eq!(count, Count::default());
    }
}
