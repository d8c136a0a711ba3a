use core::{EngineError, Fixture, FixtureStore, LeagueTableRow, Score, Team, TeamStore};
use log::debug;

/// In-memory implementation of the engine's store contracts. Owns the
/// durable view of teams and fixtures; the cumulative team counters are
/// maintained here, on persist, never by the engine.
pub struct InMemoryStore {
    teams: Vec<Team>,
    fixtures: Vec<Fixture>,
    cached_table: Vec<LeagueTableRow>,
}

impl InMemoryStore {
    pub fn new(teams: Vec<Team>, fixtures: Vec<Fixture>) -> Self {
        InMemoryStore {
            teams,
            fixtures,
            cached_table: Vec::new(),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn cached_table(&self) -> &[LeagueTableRow] {
        &self.cached_table
    }

    /// Wind the season back to gameweek 1: every result cleared, every
    /// cumulative counter zeroed, the table cache dropped.
    pub fn reset_season(&mut self) {
        for fixture in &mut self.fixtures {
            fixture.result = None;
        }
        for team in &mut self.teams {
            team.goals_scored = 0;
            team.goals_conceded = 0;
            team.games_played = 0;
        }
        self.cached_table.clear();

        debug!("season reset: all fixtures back to unplayed");
    }

    fn credit_team(&mut self, name: &str, goals_for: u8, goals_against: u8) {
        if let Some(team) = self.teams.iter_mut().find(|team| team.name == name) {
            team.goals_scored += goals_for as u16;
            team.goals_conceded += goals_against as u16;
            team.games_played += 1;
        }
    }
}

impl TeamStore for InMemoryStore {
    fn load_teams(&self) -> Result<Vec<Team>, EngineError> {
        Ok(self.teams.clone())
    }
}

impl FixtureStore for InMemoryStore {
    /// Fixtures of a gameweek, the user's fixture first, the rest by home
    /// team name.
    fn load_fixtures(&self, gameweek: u32) -> Result<Vec<Fixture>, EngineError> {
        let mut fixtures: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|fixture| fixture.gameweek == gameweek)
            .cloned()
            .collect();

        fixtures.sort_by(|a, b| {
            b.user_fixture
                .cmp(&a.user_fixture)
                .then_with(|| a.home_team.cmp(&b.home_team))
        });

        Ok(fixtures)
    }

    fn persist_result(
        &mut self,
        fixture_id: u32,
        home_goals: u8,
        away_goals: u8,
    ) -> Result<(), EngineError> {
        let fixture = self
            .fixtures
            .iter_mut()
            .find(|fixture| fixture.id == fixture_id)
            .ok_or(EngineError::FixtureNotFound(fixture_id))?;

        if fixture.result.is_some() {
            return Err(EngineError::FixtureAlreadyPlayed(fixture_id));
        }

        fixture.result = Some(Score::new(home_goals, away_goals));
        let home_team = fixture.home_team.clone();
        let away_team = fixture.away_team.clone();

        debug!(
            "persisted result: {} {}-{} {}",
            home_team, home_goals, away_goals, away_team
        );

        self.credit_team(&home_team, home_goals, away_goals);
        self.credit_team(&away_team, away_goals, home_goals);

        Ok(())
    }

    fn persist_table(&mut self, rows: &[LeagueTableRow]) -> Result<(), EngineError> {
        self.cached_table = rows.to_vec();

        Ok(())
    }
}
