//! Contracts for the persistence collaborator. The engine holds only
//! transient views during a simulation pass; durable ownership of teams and
//! fixtures stays behind these traits.

use crate::error::EngineError;
use crate::league::{Fixture, LeagueTableRow};
use crate::team::Team;

pub trait TeamStore {
    fn load_teams(&self) -> Result<Vec<Team>, EngineError>;
}

pub trait FixtureStore {
    /// Fixtures of one gameweek; an empty vec means the gameweek does not
    /// exist.
    fn load_fixtures(&self, gameweek: u32) -> Result<Vec<Fixture>, EngineError>;

    /// Record a final score. Called exactly once per fixture.
    fn persist_result(
        &mut self,
        fixture_id: u32,
        home_goals: u8,
        away_goals: u8,
    ) -> Result<(), EngineError>;

    /// Optional cache of the derived table; always re-derivable from
    /// fixtures.
    fn persist_table(&mut self, rows: &[LeagueTableRow]) -> Result<(), EngineError>;
}
