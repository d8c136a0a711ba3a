use serde::{Deserialize, Serialize};
use std::fmt;

/// Final scoreline of a played fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Score { home, away }
    }

    pub fn outcome(&self) -> MatchOutcome {
        if self.home > self.away {
            MatchOutcome::HomeWin
        } else if self.away > self.home {
            MatchOutcome::AwayWin
        } else {
            MatchOutcome::Draw
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    /// Result letter H/D/A as shown in fixture lists.
    pub fn letter(&self) -> char {
        match self {
            MatchOutcome::HomeWin => 'H',
            MatchOutcome::Draw => 'D',
            MatchOutcome::AwayWin => 'A',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(Score::new(2, 1).outcome(), MatchOutcome::HomeWin);
        assert_eq!(Score::new(0, 0).outcome(), MatchOutcome::Draw);
        assert_eq!(Score::new(1, 3).outcome(), MatchOutcome::AwayWin);
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::new(3, 1).to_string(), "3-1");
    }
}
