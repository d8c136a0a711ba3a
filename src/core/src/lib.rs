pub mod error;
pub mod league;
pub mod r#match;
pub mod storage;
pub mod team;

pub use error::EngineError;

// Re-export league items
pub use league::{
    AdvanceOutcome, Fixture, Form, FormResult, Gameweek, League, LeagueSettings, LeagueTable,
    LeagueTableRow, Schedule, SeasonStage, FORM_WINDOW,
};

// Re-export match items
pub use r#match::{
    fixture_seed, result_probability, FidelityLevel, MatchContext, MatchOutcome, MatchProbability,
    MatchSimulator, Score, TeamMatchContext,
};

pub use storage::{FixtureStore, TeamStore};
pub use team::{Team, RATING_MAX, RATING_MIN};
