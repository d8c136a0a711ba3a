use chrono::{Duration, NaiveDate};
use core::Fixture;
use rand::seq::SliceRandom;
use rand::Rng;

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Build a full double round-robin season with the circle method: every
    /// pairing exactly twice with venues swapped, every team at most once
    /// per gameweek, one matchday per week. The initial team order is
    /// shuffled with the caller's generator so seasons differ by seed only.
    pub fn generate(
        team_names: &[String],
        user_team: &str,
        season_start: NaiveDate,
        rng: &mut impl Rng,
    ) -> Vec<Fixture> {
        let mut order: Vec<&str> = team_names.iter().map(String::as_str).collect();
        order.shuffle(rng);

        let mut slots: Vec<Option<&str>> = order.into_iter().map(Some).collect();
        if slots.len() % 2 == 1 {
            // Odd league: one team sits out each round.
            slots.push(None);
        }

        let slot_count = slots.len();
        if slot_count < 2 {
            return Vec::new();
        }
        let rounds = slot_count - 1;

        // First-half pairings per round. The first slot stays fixed while
        // the rest rotate; venue of the fixed slot alternates by round.
        let mut first_half: Vec<Vec<(&str, &str)>> = Vec::with_capacity(rounds);
        let mut rotating: Vec<Option<&str>> = slots[1..].to_vec();

        for round in 0..rounds {
            let line: Vec<Option<&str>> = std::iter::once(slots[0])
                .chain(rotating.iter().copied())
                .collect();

            let mut pairings = Vec::with_capacity(slot_count / 2);
            for i in 0..slot_count / 2 {
                if let (Some(first), Some(second)) = (line[i], line[slot_count - 1 - i]) {
                    if round % 2 == 0 {
                        pairings.push((first, second));
                    } else {
                        pairings.push((second, first));
                    }
                }
            }

            first_half.push(pairings);
            rotating.rotate_right(1);
        }

        let mut fixtures = Vec::with_capacity(rounds * slot_count);
        let mut next_id: u32 = 1;

        for (round, pairings) in first_half.iter().enumerate() {
            for (home, away) in pairings {
                fixtures.push(Self::fixture(
                    &mut next_id,
                    round as u32 + 1,
                    season_start,
                    home,
                    away,
                    user_team,
                ));
            }
        }

        // Second half: same rounds, venues swapped.
        for (round, pairings) in first_half.iter().enumerate() {
            for (home, away) in pairings {
                fixtures.push(Self::fixture(
                    &mut next_id,
                    (rounds + round) as u32 + 1,
                    season_start,
                    away,
                    home,
                    user_team,
                ));
            }
        }

        fixtures
    }

    fn fixture(
        next_id: &mut u32,
        gameweek: u32,
        season_start: NaiveDate,
        home: &str,
        away: &str,
        user_team: &str,
    ) -> Fixture {
        let id = *next_id;
        *next_id += 1;

        Fixture {
            id,
            gameweek,
            date: season_start + Duration::weeks(gameweek as i64 - 1),
            home_team: String::from(home),
            away_team: String::from(away),
            result: None,
            user_fixture: home == user_team || away == user_team,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Team {:02}", i)).collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 16).unwrap()
    }

    fn generate(count: usize, seed: u64) -> Vec<Fixture> {
        let team_names = names(count);
        let mut rng = StdRng::seed_from_u64(seed);
        ScheduleGenerator::generate(&team_names, "Team 00", start(), &mut rng)
    }

    #[test]
    fn test_twenty_teams_make_thirty_eight_gameweeks() {
        let fixtures = generate(20, 1);

        assert_eq!(fixtures.len(), 380);
        assert_eq!(fixtures.iter().map(|f| f.gameweek).max(), Some(38));

        let mut per_gameweek: HashMap<u32, usize> = HashMap::new();
        for fixture in &fixtures {
            *per_gameweek.entry(fixture.gameweek).or_insert(0) += 1;
        }
        assert!(per_gameweek.values().all(|&count| count == 10));
    }

    #[test]
    fn test_each_team_plays_once_per_gameweek() {
        let fixtures = generate(20, 2);

        let mut seen: HashMap<u32, HashSet<&str>> = HashMap::new();
        for fixture in &fixtures {
            let teams = seen.entry(fixture.gameweek).or_default();
            assert!(teams.insert(fixture.home_team.as_str()), "{} twice in gw {}", fixture.home_team, fixture.gameweek);
            assert!(teams.insert(fixture.away_team.as_str()), "{} twice in gw {}", fixture.away_team, fixture.gameweek);
        }
    }

    #[test]
    fn test_every_pairing_appears_home_and_away() {
        let fixtures = generate(20, 3);

        let mut pairings: HashSet<(String, String)> = HashSet::new();
        for fixture in &fixtures {
            assert!(
                pairings.insert((fixture.home_team.clone(), fixture.away_team.clone())),
                "{} vs {} scheduled twice at the same venue",
                fixture.home_team,
                fixture.away_team
            );
        }

        // 20 teams: every ordered pair exactly once.
        assert_eq!(pairings.len(), 20 * 19);
    }

    #[test]
    fn test_user_fixture_flag_marks_exactly_one_per_gameweek() {
        let fixtures = generate(20, 4);

        let mut per_gameweek: HashMap<u32, usize> = HashMap::new();
        for fixture in fixtures.iter().filter(|f| f.user_fixture) {
            assert!(fixture.home_team == "Team 00" || fixture.away_team == "Team 00");
            *per_gameweek.entry(fixture.gameweek).or_insert(0) += 1;
        }

        assert_eq!(per_gameweek.len(), 38);
        assert!(per_gameweek.values().all(|&count| count == 1));
    }

    #[test]
    fn test_matchdays_are_spaced_weekly() {
        let fixtures = generate(20, 5);

        for fixture in &fixtures {
            let expected = start() + Duration::weeks(fixture.gameweek as i64 - 1);
            assert_eq!(fixture.date, expected);
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        assert_eq!(generate(20, 6), generate(20, 6));
        assert_ne!(generate(20, 6), generate(20, 7));
    }

    #[test]
    fn test_odd_league_uses_byes() {
        let fixtures = generate(5, 8);

        // C(5,2) pairings, twice each.
        assert_eq!(fixtures.len(), 20);
        assert_eq!(fixtures.iter().map(|f| f.gameweek).max(), Some(10));

        // Two fixtures per round: one team rests.
        let mut per_gameweek: HashMap<u32, usize> = HashMap::new();
        for fixture in &fixtures {
            *per_gameweek.entry(fixture.gameweek).or_insert(0) += 1;
        }
        assert!(per_gameweek.values().all(|&count| count == 2));
    }
}
