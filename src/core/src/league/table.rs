use crate::league::Schedule;
use crate::team::Team;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Fixed length of the recent-form window.
pub const FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    pub fn letter(&self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }

    pub fn points(&self) -> u16 {
        match self {
            FormResult::Win => 3,
            FormResult::Draw => 1,
            FormResult::Loss => 0,
        }
    }
}

/// Outcomes of a team's last few fixtures, oldest first, capped at
/// [`FORM_WINDOW`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Form(Vec<FormResult>);

impl Form {
    pub fn push(&mut self, result: FormResult) {
        self.0.push(result);
        if self.0.len() > FORM_WINDOW {
            self.0.remove(0);
        }
    }

    pub fn results(&self) -> &[FormResult] {
        &self.0
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for result in &self.0 {
            write!(f, "{}", result.letter())?;
        }
        Ok(())
    }
}

/// One team's aggregated season record. Wholly derived from played
/// fixtures; `goal_difference` and `points` are maintained alongside the
/// counters they derive from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTableRow {
    pub team: String,
    pub played: u8,
    pub won: u8,
    pub drawn: u8,
    pub lost: u8,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_difference: i16,
    pub points: u16,
    pub form: Form,
}

impl LeagueTableRow {
    fn new(team: &str) -> Self {
        LeagueTableRow {
            team: String::from(team),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            form: Form::default(),
        }
    }

    fn apply(&mut self, goals_for: u8, goals_against: u8) {
        let result = if goals_for > goals_against {
            self.won += 1;
            FormResult::Win
        } else if goals_for == goals_against {
            self.drawn += 1;
            FormResult::Draw
        } else {
            self.lost += 1;
            FormResult::Loss
        };

        self.played += 1;
        self.goals_for += goals_for as u16;
        self.goals_against += goals_against as u16;
        self.goal_difference = self.goals_for as i16 - self.goals_against as i16;
        self.points += result.points();
        self.form.push(result);
    }
}

/// The ranked standings. A pure fold over played fixtures: recomputed, never
/// stored as an independent source of truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTable {
    pub rows: Vec<LeagueTableRow>,
}

impl LeagueTable {
    /// Fold every played fixture into per-team rows and rank them. Unplayed
    /// fixtures contribute nothing; every known team gets a row.
    pub fn compute(teams: &[Team], schedule: &Schedule) -> Self {
        let mut rows: BTreeMap<&str, LeagueTableRow> = teams
            .iter()
            .map(|team| (team.name.as_str(), LeagueTableRow::new(&team.name)))
            .collect();

        for fixture in schedule.played_fixtures() {
            let score = fixture.result.expect("played fixture has a result");

            if let Some(row) = rows.get_mut(fixture.home_team.as_str()) {
                row.apply(score.home, score.away);
            }
            if let Some(row) = rows.get_mut(fixture.away_team.as_str()) {
                row.apply(score.away, score.home);
            }
        }

        let mut rows: Vec<LeagueTableRow> = rows.into_values().collect();

        // Points, then goal difference, then goals for, then name: never
        // insertion or iteration order.
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference.cmp(&a.goal_difference))
                .then(b.goals_for.cmp(&a.goals_for))
                .then(a.team.cmp(&b.team))
        });

        LeagueTable { rows }
    }

    /// 1-based table position of a team.
    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.team == team)
            .map(|index| index + 1)
    }

    pub fn leader(&self) -> Option<&LeagueTableRow> {
        self.rows.first()
    }
}
