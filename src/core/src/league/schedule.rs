use crate::r#match::Score;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One scheduled match. A fixture is played exactly when it has a result;
/// there is no separate flag to drift out of sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u32,
    pub gameweek: u32,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub result: Option<Score>,
    /// True when the user-controlled team is involved: these results are
    /// entered manually, never auto-simulated.
    pub user_fixture: bool,
}

impl Fixture {
    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Goals for and against from `team`'s perspective, if played.
    pub fn goals_for(&self, team: &str) -> Option<(u8, u8)> {
        let score = self.result?;

        if self.home_team == team {
            Some((score.home, score.away))
        } else if self.away_team == team {
            Some((score.away, score.home))
        } else {
            None
        }
    }
}

/// One round of fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gameweek {
    pub number: u32,
    pub fixtures: Vec<Fixture>,
}

impl Gameweek {
    pub fn is_complete(&self) -> bool {
        self.fixtures.iter().all(Fixture::is_played)
    }

    pub fn unplayed_count(&self) -> usize {
        self.fixtures.iter().filter(|f| !f.is_played()).count()
    }
}

/// The season's fixtures, indexed by gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub gameweeks: Vec<Gameweek>,
}

impl Schedule {
    pub fn from_fixtures(fixtures: Vec<Fixture>) -> Self {
        let gameweeks = fixtures
            .into_iter()
            .map(|fixture| (fixture.gameweek, fixture))
            .into_group_map()
            .into_iter()
            .sorted_by_key(|(number, _)| *number)
            .map(|(number, fixtures)| Gameweek { number, fixtures })
            .collect();

        Schedule { gameweeks }
    }

    pub fn is_empty(&self) -> bool {
        self.gameweeks.is_empty()
    }

    pub fn gameweek(&self, number: u32) -> Option<&Gameweek> {
        self.gameweeks.iter().find(|gw| gw.number == number)
    }

    pub fn has_gameweek(&self, number: u32) -> bool {
        self.gameweek(number).is_some()
    }

    pub fn last_gameweek(&self) -> Option<u32> {
        self.gameweeks.iter().map(|gw| gw.number).max()
    }

    pub fn fixture(&self, id: u32) -> Option<&Fixture> {
        self.gameweeks
            .iter()
            .flat_map(|gw| &gw.fixtures)
            .find(|fixture| fixture.id == id)
    }

    pub fn fixture_mut(&mut self, id: u32) -> Option<&mut Fixture> {
        self.gameweeks
            .iter_mut()
            .flat_map(|gw| &mut gw.fixtures)
            .find(|fixture| fixture.id == id)
    }

    /// Played fixtures in gameweek order.
    pub fn played_fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.gameweeks
            .iter()
            .flat_map(|gw| &gw.fixtures)
            .filter(|fixture| fixture.is_played())
    }

    /// A team's played fixtures in gameweek order.
    pub fn team_results(&self, team: &str) -> Vec<&Fixture> {
        self.played_fixtures()
            .filter(|fixture| fixture.involves(team))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(id: u32, gameweek: u32, home: &str, away: &str, result: Option<Score>) -> Fixture {
        Fixture {
            id,
            gameweek,
            date: NaiveDate::from_ymd_opt(2024, 8, 16).unwrap(),
            home_team: String::from(home),
            away_team: String::from(away),
            result,
            user_fixture: false,
        }
    }

    #[test]
    fn test_schedule_groups_and_orders_gameweeks() {
        let schedule = Schedule::from_fixtures(vec![
            fixture(3, 2, "C", "D", None),
            fixture(1, 1, "A", "B", None),
            fixture(4, 2, "A", "C", None),
            fixture(2, 1, "C", "D", None),
        ]);

        let numbers: Vec<u32> = schedule.gameweeks.iter().map(|gw| gw.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(schedule.gameweek(2).unwrap().fixtures.len(), 2);
        assert_eq!(schedule.last_gameweek(), Some(2));
    }

    #[test]
    fn test_played_flag_is_derived_from_result() {
        let unplayed = fixture(1, 1, "A", "B", None);
        let played = fixture(2, 1, "C", "D", Some(Score::new(2, 1)));

        assert!(!unplayed.is_played());
        assert!(played.is_played());
    }

    #[test]
    fn test_goals_for_perspective() {
        let played = fixture(1, 1, "A", "B", Some(Score::new(2, 1)));

        assert_eq!(played.goals_for("A"), Some((2, 1)));
        assert_eq!(played.goals_for("B"), Some((1, 2)));
        assert_eq!(played.goals_for("C"), None);
    }

    #[test]
    fn test_gameweek_completion() {
        let mut schedule = Schedule::from_fixtures(vec![
            fixture(1, 1, "A", "B", Some(Score::new(1, 1))),
            fixture(2, 1, "C", "D", None),
        ]);

        assert!(!schedule.gameweek(1).unwrap().is_complete());
        assert_eq!(schedule.gameweek(1).unwrap().unplayed_count(), 1);

        schedule.fixture_mut(2).unwrap().result = Some(Score::new(0, 2));
        assert!(schedule.gameweek(1).unwrap().is_complete());
    }

    #[test]
    fn test_team_results_in_gameweek_order() {
        let schedule = Schedule::from_fixtures(vec![
            fixture(3, 2, "B", "A", Some(Score::new(3, 0))),
            fixture(1, 1, "A", "B", Some(Score::new(2, 1))),
            fixture(5, 3, "A", "C", None),
        ]);

        let results = schedule.team_results("A");
        let ids: Vec<u32> = results.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
