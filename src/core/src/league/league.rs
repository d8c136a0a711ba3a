use crate::error::EngineError;
use crate::league::{
    AdvanceOutcome, Fixture, LeagueTable, Schedule, SeasonStage, FORM_WINDOW,
};
use crate::r#match::{
    fixture_seed, FidelityLevel, MatchContext, MatchSimulator, Score, TeamMatchContext,
    FATIGUE_WINDOW_GAMEWEEKS,
};
use crate::storage::{FixtureStore, TeamStore};
use crate::team::Team;

/// Manual goal entries above this are treated as data-entry mistakes.
const GOAL_INPUT_MAX: i32 = 99;

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSettings {
    /// Season label, e.g. "2024-25".
    pub season: String,
    /// The team whose results are entered manually.
    pub user_team: String,
    pub fidelity: FidelityLevel,
    /// Season seed; per-fixture seeds are derived from it.
    pub seed: u64,
}

/// A league season: the teams, the gameweek-indexed schedule and the
/// progression state machine over it. All durable writes go through the
/// store traits; the league keeps the in-memory view consistent with what
/// it has persisted.
#[derive(Debug)]
pub struct League {
    pub name: String,
    pub settings: LeagueSettings,
    teams: Vec<Team>,
    pub schedule: Schedule,
    stage: SeasonStage,
}

impl League {
    /// Load teams and the full season schedule from the store. The pointer
    /// starts at gameweek 1; already-complete opening gameweeks move the
    /// stage to `ReadyToAdvance` so a caller can advance through them.
    pub fn load(
        name: &str,
        settings: LeagueSettings,
        store: &(impl TeamStore + FixtureStore),
    ) -> Result<Self, EngineError> {
        let teams = store.load_teams()?;

        if !teams.iter().any(|team| team.name == settings.user_team) {
            return Err(EngineError::TeamNotFound(settings.user_team.clone()));
        }

        let mut fixtures = Vec::new();
        let mut gameweek = 1;
        loop {
            let mut batch = store.load_fixtures(gameweek)?;
            if batch.is_empty() {
                break;
            }
            fixtures.append(&mut batch);
            gameweek += 1;
        }

        let schedule = Schedule::from_fixtures(fixtures);
        let stage = if schedule.is_empty() {
            SeasonStage::SeasonComplete
        } else {
            SeasonStage::AwaitingResults(1)
        };

        let mut league = League {
            name: String::from(name),
            settings,
            teams,
            schedule,
            stage,
        };
        league.refresh_stage();

        Ok(league)
    }

    pub fn stage(&self) -> SeasonStage {
        self.stage
    }

    pub fn current_gameweek(&self) -> Option<u32> {
        self.stage.gameweek()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Result<&Team, EngineError> {
        self.teams
            .iter()
            .find(|team| team.name == name)
            .ok_or_else(|| EngineError::TeamNotFound(String::from(name)))
    }

    /// Enter a manually recorded result for a fixture of the current
    /// gameweek.
    pub fn record_user_result(
        &mut self,
        store: &mut impl FixtureStore,
        fixture_id: u32,
        home_goals: i32,
        away_goals: i32,
    ) -> Result<(), EngineError> {
        let gameweek = self.awaiting_gameweek("record a result")?;
        let score = Self::validate_goals(home_goals, away_goals)?;

        let fixture = self
            .schedule
            .fixture(fixture_id)
            .ok_or(EngineError::FixtureNotFound(fixture_id))?;

        if fixture.gameweek != gameweek {
            return Err(EngineError::GameweekNotReady {
                gameweek,
                reason: format!(
                    "fixture {} belongs to gameweek {}",
                    fixture_id, fixture.gameweek
                ),
            });
        }
        if fixture.is_played() {
            return Err(EngineError::FixtureAlreadyPlayed(fixture_id));
        }

        store.persist_result(fixture_id, score.home, score.away)?;
        self.schedule
            .fixture_mut(fixture_id)
            .expect("fixture looked up above")
            .result = Some(score);
        self.refresh_stage();

        Ok(())
    }

    /// Resolve every unplayed non-user fixture of `gameweek` with the
    /// outcome engine. Only the current gameweek is eligible.
    /// All-or-nothing: every result is computed before the first one is
    /// committed, so a mid-gameweek failure leaves no partial writes.
    pub fn simulate_remaining(
        &mut self,
        store: &mut impl FixtureStore,
        gameweek: u32,
    ) -> Result<usize, EngineError> {
        let current = self.awaiting_gameweek("simulate fixtures")?;
        if gameweek != current {
            return Err(EngineError::GameweekNotReady {
                gameweek: current,
                reason: format!("gameweek {} is not the current gameweek", gameweek),
            });
        }

        let pending: Vec<u32> = self
            .schedule
            .gameweek(gameweek)
            .expect("current gameweek exists in schedule")
            .fixtures
            .iter()
            .filter(|fixture| !fixture.is_played() && !fixture.user_fixture)
            .map(|fixture| fixture.id)
            .collect();

        let mut results: Vec<(u32, Score)> = Vec::with_capacity(pending.len());

        for fixture_id in pending {
            let fixture = self
                .schedule
                .fixture(fixture_id)
                .ok_or(EngineError::FixtureNotFound(fixture_id))?;

            let home = self.team(&fixture.home_team)?;
            let away = self.team(&fixture.away_team)?;
            let ctx = self.match_context(fixture);
            let seed = fixture_seed(self.settings.seed, fixture_id);

            let score =
                MatchSimulator::simulate_seeded(home, away, self.settings.fidelity, &ctx, seed)?;
            results.push((fixture_id, score));
        }

        for (fixture_id, score) in &results {
            store.persist_result(*fixture_id, score.home, score.away)?;
            self.schedule
                .fixture_mut(*fixture_id)
                .expect("simulated fixture exists")
                .result = Some(*score);
        }
        self.refresh_stage();

        Ok(results.len())
    }

    /// Move the pointer to the next gameweek, or finish the season when no
    /// scheduled gameweek remains.
    pub fn advance_gameweek(&mut self) -> Result<AdvanceOutcome, EngineError> {
        match self.stage {
            SeasonStage::ReadyToAdvance(gameweek) => {
                let next = gameweek + 1;
                if self.schedule.has_gameweek(next) {
                    self.stage = SeasonStage::AwaitingResults(next);
                    Ok(AdvanceOutcome::NextGameweek(next))
                } else {
                    self.stage = SeasonStage::SeasonComplete;
                    Ok(AdvanceOutcome::SeasonComplete)
                }
            }
            SeasonStage::AwaitingResults(gameweek) => {
                let remaining = self
                    .schedule
                    .gameweek(gameweek)
                    .map(|gw| gw.unplayed_count())
                    .unwrap_or(0);

                Err(EngineError::GameweekNotReady {
                    gameweek,
                    reason: format!("{} fixtures are still unplayed", remaining),
                })
            }
            SeasonStage::SeasonComplete => Err(EngineError::GameweekNotReady {
                gameweek: self.schedule.last_gameweek().unwrap_or(0),
                reason: String::from("the season is complete"),
            }),
        }
    }

    /// The current standings, recomputed from played fixtures.
    pub fn table(&self) -> LeagueTable {
        LeagueTable::compute(&self.teams, &self.schedule)
    }

    /// Recompute the standings and hand them to the store's table cache.
    pub fn persist_table(
        &self,
        store: &mut impl FixtureStore,
    ) -> Result<LeagueTable, EngineError> {
        let table = self.table();
        store.persist_table(&table.rows)?;

        Ok(table)
    }

    fn awaiting_gameweek(&self, action: &str) -> Result<u32, EngineError> {
        match self.stage {
            SeasonStage::AwaitingResults(gameweek) => Ok(gameweek),
            SeasonStage::ReadyToAdvance(gameweek) => Err(EngineError::GameweekNotReady {
                gameweek,
                reason: format!(
                    "every fixture is already played; advance before trying to {}",
                    action
                ),
            }),
            SeasonStage::SeasonComplete => Err(EngineError::GameweekNotReady {
                gameweek: self.schedule.last_gameweek().unwrap_or(0),
                reason: String::from("the season is complete"),
            }),
        }
    }

    fn refresh_stage(&mut self) {
        if let SeasonStage::AwaitingResults(gameweek) = self.stage {
            if let Some(gw) = self.schedule.gameweek(gameweek) {
                if gw.is_complete() {
                    self.stage = SeasonStage::ReadyToAdvance(gameweek);
                }
            }
        }
    }

    fn validate_goals(home_goals: i32, away_goals: i32) -> Result<Score, EngineError> {
        for goals in [home_goals, away_goals] {
            if !(0..=GOAL_INPUT_MAX).contains(&goals) {
                return Err(EngineError::InvalidGoalCount(goals));
            }
        }

        Ok(Score::new(home_goals as u8, away_goals as u8))
    }

    /// Situational context for both sides of a fixture, read off the played
    /// part of the schedule.
    fn match_context(&self, fixture: &Fixture) -> MatchContext {
        MatchContext {
            home: self.team_context(&fixture.home_team, fixture.gameweek),
            away: self.team_context(&fixture.away_team, fixture.gameweek),
        }
    }

    fn team_context(&self, team: &str, gameweek: u32) -> TeamMatchContext {
        let results = self.schedule.team_results(team);

        let recent: Vec<_> = results.iter().rev().take(FORM_WINDOW).collect();
        let form_points_per_game = if recent.is_empty() {
            None
        } else {
            let points: u32 = recent
                .iter()
                .filter_map(|fixture| fixture.goals_for(team))
                .map(|(goals_for, goals_against)| match goals_for.cmp(&goals_against) {
                    std::cmp::Ordering::Greater => 3,
                    std::cmp::Ordering::Equal => 1,
                    std::cmp::Ordering::Less => 0,
                })
                .sum();

            Some(points as f32 / recent.len() as f32)
        };

        let window_start = gameweek.saturating_sub(FATIGUE_WINDOW_GAMEWEEKS);
        let recent_games = results
            .iter()
            .filter(|fixture| fixture.gameweek >= window_start && fixture.gameweek < gameweek)
            .count() as u8;

        TeamMatchContext {
            form_points_per_game,
            recent_games,
            motivation: 0.0,
        }
    }
}
