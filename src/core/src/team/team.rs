use crate::error::EngineError;
use serde::{Deserialize, Serialize};

pub const RATING_MIN: f32 = 0.0;
pub const RATING_MAX: f32 = 100.0;

/// A club in the league. Ratings are immutable inputs to the engine;
/// the cumulative counters are maintained by the store when results are
/// persisted and are never read back by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub attack_rating: f32,
    pub defense_rating: f32,
    pub overall_rating: f32,
    #[serde(default)]
    pub goals_scored: u16,
    #[serde(default)]
    pub goals_conceded: u16,
    #[serde(default)]
    pub games_played: u8,
}

impl Team {
    pub fn new(name: &str, attack: f32, defense: f32, overall: f32) -> Self {
        Team {
            name: String::from(name),
            attack_rating: attack,
            defense_rating: defense,
            overall_rating: overall,
            goals_scored: 0,
            goals_conceded: 0,
            games_played: 0,
        }
    }

    /// Out-of-range ratings are a caller error, not something to clamp:
    /// clamping here would mask corrupted upstream data.
    pub fn validate_ratings(&self) -> Result<(), EngineError> {
        for rating in [self.attack_rating, self.defense_rating, self.overall_rating] {
            if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(EngineError::InvalidRating {
                    team: self.name.clone(),
                    value: rating,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ratings_accepted() {
        let team = Team::new("Arsenal", 85.0, 80.0, 83.0);
        assert!(team.validate_ratings().is_ok());

        let edge = Team::new("Edge", 0.0, 100.0, 50.0);
        assert!(edge.validate_ratings().is_ok());
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let too_high = Team::new("Overrated", 120.0, 80.0, 90.0);
        assert_eq!(
            too_high.validate_ratings(),
            Err(EngineError::InvalidRating {
                team: String::from("Overrated"),
                value: 120.0
            })
        );

        let negative = Team::new("Underrated", 60.0, -5.0, 40.0);
        assert!(matches!(
            negative.validate_ratings(),
            Err(EngineError::InvalidRating { .. })
        ));
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        let broken = Team::new("Broken", f32::NAN, 50.0, 50.0);
        assert!(broken.validate_ratings().is_err());
    }
}
