use crate::error::EngineError;
use crate::r#match::rating::baseline_strength;
use crate::team::Team;
use serde::Serialize;

/// Pre-match win/draw/loss odds for a fixture, derived from the
/// home-advantage-adjusted overall rating gap. A fixed lookup, not a model:
/// good enough for display next to an unplayed fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchProbability {
    pub home_win: f32,
    pub draw: f32,
    pub away_win: f32,
}

/// Rating-gap thresholds and their probability triples, strongest home edge
/// first.
const PROBABILITY_BANDS: [(f32, MatchProbability); 5] = [
    (20.0, MatchProbability { home_win: 0.70, draw: 0.20, away_win: 0.10 }),
    (10.0, MatchProbability { home_win: 0.55, draw: 0.25, away_win: 0.20 }),
    (0.0, MatchProbability { home_win: 0.45, draw: 0.30, away_win: 0.25 }),
    (-10.0, MatchProbability { home_win: 0.35, draw: 0.30, away_win: 0.35 }),
    (-20.0, MatchProbability { home_win: 0.25, draw: 0.25, away_win: 0.50 }),
];

const AWAY_DOMINANT: MatchProbability = MatchProbability {
    home_win: 0.15,
    draw: 0.20,
    away_win: 0.65,
};

/// Win/draw/loss probabilities for `home` hosting `away`.
pub fn result_probability(home: &Team, away: &Team) -> Result<MatchProbability, EngineError> {
    home.validate_ratings()?;
    away.validate_ratings()?;

    let gap = baseline_strength(home.overall_rating, true) - away.overall_rating;

    let band = PROBABILITY_BANDS
        .iter()
        .find(|(threshold, _)| gap > *threshold)
        .map(|(_, probability)| *probability)
        .unwrap_or(AWAY_DOMINANT);

    Ok(band)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_to_one() {
        let home = Team::new("Liverpool", 88.0, 82.0, 85.0);
        let away = Team::new("Everton", 55.0, 65.0, 60.0);

        let p = result_probability(&home, &away).unwrap();
        assert!((p.home_win + p.draw + p.away_win - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_strong_home_side_is_favored() {
        let home = Team::new("Manchester City", 95.0, 85.0, 90.0);
        let away = Team::new("Luton Town", 50.0, 55.0, 53.0);

        let p = result_probability(&home, &away).unwrap();
        assert_eq!(p.home_win, 0.70);
        assert_eq!(p.away_win, 0.10);
    }

    #[test]
    fn test_strong_away_side_is_favored() {
        let home = Team::new("Luton Town", 50.0, 55.0, 53.0);
        let away = Team::new("Manchester City", 95.0, 85.0, 90.0);

        // Gap is 53 + 5 - 90 = -32: beyond every band.
        let p = result_probability(&home, &away).unwrap();
        assert_eq!(p.away_win, 0.65);
    }

    #[test]
    fn test_even_match_leans_home() {
        let home = Team::new("Fulham", 70.0, 65.0, 68.0);
        let away = Team::new("Brentford", 72.0, 62.0, 67.0);

        // Gap is 68 + 5 - 67 = +6: the narrow home band.
        let p = result_probability(&home, &away).unwrap();
        assert_eq!(p.home_win, 0.45);
        assert_eq!(p.draw, 0.30);
    }

    #[test]
    fn test_invalid_rating_rejected() {
        let corrupt = Team::new("Corrupt", 80.0, 80.0, 101.0);
        let away = Team::new("Everton", 55.0, 65.0, 60.0);

        assert!(result_probability(&corrupt, &away).is_err());
    }
}
