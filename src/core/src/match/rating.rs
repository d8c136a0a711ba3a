//! Effective strength of a team in a given fixture.
//!
//! The baseline ratings never change here; everything situational is a
//! bounded additive term on top, so one hot or cold streak can shift a
//! matchup but never outweigh baseline quality.

/// Fixed rating bonus for playing at home, applied to the home side only.
pub const HOME_ADVANTAGE: f32 = 5.0;

/// Rating points per point-per-game above/below the neutral 1.5 ppg.
pub const FORM_WEIGHT: f32 = 2.0;
/// Hard bound on the form term in either direction.
pub const FORM_TERM_LIMIT: f32 = 3.0;

/// Trailing gameweeks counted when measuring fixture congestion.
pub const FATIGUE_WINDOW_GAMEWEEKS: u32 = 6;
/// Games inside the fatigue window a squad absorbs without penalty.
pub const FATIGUE_FREE_GAMES: u8 = 4;
/// Rating penalty per game beyond the free allowance.
pub const FATIGUE_PER_GAME: f32 = 1.25;
/// Hard bound on the fatigue penalty.
pub const FATIGUE_LIMIT: f32 = 5.0;

/// Rating points at maximum motivation (+1.0) or demotivation (-1.0).
pub const MOTIVATION_WEIGHT: f32 = 8.0;

/// Situational inputs for one side of a fixture, assembled by the season
/// machine from already-played fixtures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamMatchContext {
    /// Points per game over the recent-form window, if any games were played.
    pub form_points_per_game: Option<f32>,
    /// Games played inside the trailing fatigue window.
    pub recent_games: u8,
    /// Stakes scalar in -1.0..=1.0 (derby, relegation battle, dead rubber).
    pub motivation: f32,
}

impl TeamMatchContext {
    pub fn neutral() -> Self {
        TeamMatchContext {
            form_points_per_game: None,
            recent_games: 0,
            motivation: 0.0,
        }
    }
}

/// Context for both sides of a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchContext {
    pub home: TeamMatchContext,
    pub away: TeamMatchContext,
}

impl MatchContext {
    pub fn neutral() -> Self {
        MatchContext {
            home: TeamMatchContext::neutral(),
            away: TeamMatchContext::neutral(),
        }
    }
}

/// Strength used by the low-fidelity levels: baseline rating plus the home
/// bonus, nothing else.
pub fn baseline_strength(rating: f32, is_home: bool) -> f32 {
    if is_home {
        rating + HOME_ADVANTAGE
    } else {
        rating
    }
}

/// Strength used by the high-fidelity levels: baseline plus bounded
/// form/fatigue/motivation terms.
pub fn adjusted_strength(rating: f32, is_home: bool, ctx: &TeamMatchContext) -> f32 {
    baseline_strength(rating, is_home) + form_term(ctx) - fatigue_penalty(ctx)
        + motivation_term(ctx)
}

fn form_term(ctx: &TeamMatchContext) -> f32 {
    match ctx.form_points_per_game {
        Some(ppg) => ((ppg - 1.5) * FORM_WEIGHT).clamp(-FORM_TERM_LIMIT, FORM_TERM_LIMIT),
        None => 0.0,
    }
}

fn fatigue_penalty(ctx: &TeamMatchContext) -> f32 {
    let excess = ctx.recent_games.saturating_sub(FATIGUE_FREE_GAMES);
    (excess as f32 * FATIGUE_PER_GAME).min(FATIGUE_LIMIT)
}

fn motivation_term(ctx: &TeamMatchContext) -> f32 {
    ctx.motivation.clamp(-1.0, 1.0) * MOTIVATION_WEIGHT
}
