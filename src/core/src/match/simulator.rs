use crate::error::EngineError;
use crate::r#match::rating::{adjusted_strength, baseline_strength, MatchContext};
use crate::r#match::result::Score;
use crate::team::Team;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Uniform perturbation applied to each side's strength at the basic level.
pub const RANDOMNESS_SPREAD: f32 = 15.0;
/// Strength gap beyond which the basic level calls a match decisive.
pub const DECISIVE_MARGIN: f32 = 20.0;

/// Chance-quality offsets for the rating level. The 10-point asymmetry is
/// the home advantage at this level.
pub const HOME_CHANCE_OFFSET: f32 = 50.0;
pub const AWAY_CHANCE_OFFSET: f32 = 40.0;
/// Symmetric offset for the stats level, where the home advantage already
/// arrives through the adjusted strengths.
pub const NEUTRAL_CHANCE_OFFSET: f32 = 45.0;
pub const CHANCE_SCALE: f32 = 100.0;
pub const CHANCE_PERTURB_MIN: f32 = 0.7;
pub const CHANCE_PERTURB_MAX: f32 = 1.4;
/// Goal-scoring chances converted per side at the chance-model levels.
pub const CHANCES_PER_SIDE: u32 = 10;

/// League-average goals per team per match.
pub const BASE_EXPECTED_GOALS: f32 = 1.3;
/// Rating points of strength edge worth one expected goal.
pub const EXPECTED_GOALS_SCALE: f32 = 25.0;
/// Floor keeping the Poisson mean away from the degenerate zero case.
pub const MIN_EXPECTED_GOALS: f32 = 0.05;

/// Cap on goals per team in any simulated match.
pub const MAX_GOALS: u8 = 7;

/// Fixed scoreline pools for the basic level's three outcome tiers.
pub const DECISIVE_HOME_SCORELINES: [(u8, u8); 5] = [(3, 0), (2, 0), (3, 1), (4, 1), (2, 1)];
pub const DECISIVE_AWAY_SCORELINES: [(u8, u8); 5] = [(0, 3), (0, 2), (1, 3), (1, 4), (1, 2)];
pub const CLOSE_SCORELINES: [(u8, u8); 7] =
    [(1, 1), (0, 0), (2, 2), (1, 0), (0, 1), (2, 1), (1, 2)];

/// Which outcome-modeling algorithm resolves a fixture. Levels are strictly
/// increasing in the information they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityLevel {
    /// Overall rating plus noise, bucketed into tiered scoreline pools.
    Basic,
    /// Independent per-side chance model from attack/defense differentials.
    Rating,
    /// Chance model over form/fatigue/motivation-adjusted strengths.
    Stats,
    /// Poisson-distributed goals from adjusted expected-goal means.
    Realistic,
}

impl FromStr for FidelityLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "basic" => Ok(FidelityLevel::Basic),
            "rating" => Ok(FidelityLevel::Rating),
            "stats" => Ok(FidelityLevel::Stats),
            "realistic" => Ok(FidelityLevel::Realistic),
            other => Err(format!("unknown fidelity level: {}", other)),
        }
    }
}

impl fmt::Display for FidelityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FidelityLevel::Basic => "basic",
            FidelityLevel::Rating => "rating",
            FidelityLevel::Stats => "stats",
            FidelityLevel::Realistic => "realistic",
        };
        write!(f, "{}", name)
    }
}

/// The match outcome engine. Pure given its inputs: a fixed seed and fixed
/// teams always reproduce the same scoreline.
pub struct MatchSimulator;

impl MatchSimulator {
    /// Resolve a fixture with an explicitly threaded generator.
    pub fn simulate(
        home: &Team,
        away: &Team,
        level: FidelityLevel,
        ctx: &MatchContext,
        rng: &mut impl Rng,
    ) -> Result<Score, EngineError> {
        home.validate_ratings()?;
        away.validate_ratings()?;

        let score = match level {
            FidelityLevel::Basic => Self::simulate_basic(home, away, rng),
            FidelityLevel::Rating => Self::simulate_rating(home, away, rng),
            FidelityLevel::Stats => Self::simulate_stats(home, away, ctx, rng),
            FidelityLevel::Realistic => Self::simulate_realistic(home, away, ctx, rng),
        };

        Ok(score)
    }

    /// Resolve a fixture from a bare seed, for callers that do not hold a
    /// generator of their own.
    pub fn simulate_seeded(
        home: &Team,
        away: &Team,
        level: FidelityLevel,
        ctx: &MatchContext,
        seed: u64,
    ) -> Result<Score, EngineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::simulate(home, away, level, ctx, &mut rng)
    }

    fn simulate_basic(home: &Team, away: &Team, rng: &mut impl Rng) -> Score {
        let home_strength = baseline_strength(home.overall_rating, true)
            + rng.random_range(-RANDOMNESS_SPREAD..=RANDOMNESS_SPREAD);
        let away_strength = baseline_strength(away.overall_rating, false)
            + rng.random_range(-RANDOMNESS_SPREAD..=RANDOMNESS_SPREAD);

        let gap = home_strength - away_strength;

        let pool: &[(u8, u8)] = if gap > DECISIVE_MARGIN {
            &DECISIVE_HOME_SCORELINES
        } else if gap < -DECISIVE_MARGIN {
            &DECISIVE_AWAY_SCORELINES
        } else {
            &CLOSE_SCORELINES
        };

        let (home_goals, away_goals) = pool[rng.random_range(0..pool.len())];

        Score::new(home_goals, away_goals)
    }

    fn simulate_rating(home: &Team, away: &Team, rng: &mut impl Rng) -> Score {
        let home_quality =
            Self::chance_quality(home.attack_rating, away.defense_rating, HOME_CHANCE_OFFSET, rng);
        let away_quality =
            Self::chance_quality(away.attack_rating, home.defense_rating, AWAY_CHANCE_OFFSET, rng);

        Self::convert_chances(home_quality, away_quality, rng)
    }

    fn simulate_stats(
        home: &Team,
        away: &Team,
        ctx: &MatchContext,
        rng: &mut impl Rng,
    ) -> Score {
        let home_attack = adjusted_strength(home.attack_rating, true, &ctx.home);
        let home_defense = adjusted_strength(home.defense_rating, true, &ctx.home);
        let away_attack = adjusted_strength(away.attack_rating, false, &ctx.away);
        let away_defense = adjusted_strength(away.defense_rating, false, &ctx.away);

        let home_quality =
            Self::chance_quality(home_attack, away_defense, NEUTRAL_CHANCE_OFFSET, rng);
        let away_quality =
            Self::chance_quality(away_attack, home_defense, NEUTRAL_CHANCE_OFFSET, rng);

        Self::convert_chances(home_quality, away_quality, rng)
    }

    fn simulate_realistic(
        home: &Team,
        away: &Team,
        ctx: &MatchContext,
        rng: &mut impl Rng,
    ) -> Score {
        let home_attack = adjusted_strength(home.attack_rating, true, &ctx.home);
        let home_defense = adjusted_strength(home.defense_rating, true, &ctx.home);
        let away_attack = adjusted_strength(away.attack_rating, false, &ctx.away);
        let away_defense = adjusted_strength(away.defense_rating, false, &ctx.away);

        let home_goals = Self::poisson_goals(Self::expected_goals(home_attack, away_defense), rng);
        let away_goals = Self::poisson_goals(Self::expected_goals(away_attack, home_defense), rng);

        Score::new(home_goals, away_goals)
    }

    /// Probability that a single chance becomes a goal:
    /// `(attack - defense + offset) / 100`, independently perturbed.
    fn chance_quality(attack: f32, defense: f32, offset: f32, rng: &mut impl Rng) -> f32 {
        let quality = ((attack - defense + offset) / CHANCE_SCALE).max(0.0);

        quality * rng.random_range(CHANCE_PERTURB_MIN..=CHANCE_PERTURB_MAX)
    }

    fn convert_chances(home_quality: f32, away_quality: f32, rng: &mut impl Rng) -> Score {
        let mut home_goals: u8 = 0;
        let mut away_goals: u8 = 0;

        for _ in 0..CHANCES_PER_SIDE {
            if rng.random_bool(home_quality.clamp(0.0, 1.0) as f64) {
                home_goals += 1;
            }
            if rng.random_bool(away_quality.clamp(0.0, 1.0) as f64) {
                away_goals += 1;
            }
        }

        Score::new(home_goals.min(MAX_GOALS), away_goals.min(MAX_GOALS))
    }

    fn expected_goals(attack: f32, defense: f32) -> f32 {
        (BASE_EXPECTED_GOALS + (attack - defense) / EXPECTED_GOALS_SCALE).max(MIN_EXPECTED_GOALS)
    }

    fn poisson_goals(mean: f32, rng: &mut impl Rng) -> u8 {
        let distribution = Poisson::new(mean).expect("expected-goal mean is floored positive");
        let goals = distribution.sample(rng) as u32;

        goals.min(MAX_GOALS as u32) as u8
    }
}

/// Derive the per-fixture seed from the season seed, so a season replay is
/// reproducible no matter how calls interleave. SplitMix64 finalizer.
pub fn fixture_seed(season_seed: u64, fixture_id: u32) -> u64 {
    let mut mixed = season_seed ^ (fixture_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);

    mixed ^ (mixed >> 31)
}
