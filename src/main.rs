use core::{
    fixture_seed, AdvanceOutcome, FidelityLevel, League, LeagueSettings, MatchContext,
    MatchSimulator,
};
use database::DatabaseLoader;
use env_logger::Env;
use log::{debug, info};
use std::env;
use std::str::FromStr;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let user_team = env::var("USER_TEAM").unwrap_or_else(|_| String::from("Sheffield United"));
    let fidelity = env::var("FIDELITY")
        .ok()
        .and_then(|value| FidelityLevel::from_str(&value).ok())
        .unwrap_or(FidelityLevel::Realistic);
    let seed: u64 = env::var("SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(2425);

    info!(
        "starting season: user team {}, fidelity {}, seed {}",
        user_team, fidelity, seed
    );

    let mut store = DatabaseLoader::load(&user_team, seed);

    let settings = LeagueSettings {
        season: String::from("2024-25"),
        user_team: user_team.clone(),
        fidelity,
        seed,
    };
    let mut league = League::load("Premier League", settings, &store)?;

    while let Some(gameweek) = league.current_gameweek() {
        // Headless run: the user slot is resolved by the engine too, but it
        // still goes through the manual-entry path the UI would use.
        let user_fixture = league
            .schedule
            .gameweek(gameweek)
            .and_then(|gw| gw.fixtures.iter().find(|f| f.user_fixture && !f.is_played()))
            .cloned();

        if let Some(fixture) = user_fixture {
            let home = league.team(&fixture.home_team)?.clone();
            let away = league.team(&fixture.away_team)?.clone();
            let score = MatchSimulator::simulate_seeded(
                &home,
                &away,
                fidelity,
                &MatchContext::neutral(),
                fixture_seed(seed, fixture.id),
            )?;

            league.record_user_result(&mut store, fixture.id, score.home as i32, score.away as i32)?;
            info!(
                "gameweek {}: {} {} {}",
                gameweek, fixture.home_team, score, fixture.away_team
            );
        }

        let simulated = league.simulate_remaining(&mut store, gameweek)?;
        let table = league.persist_table(&mut store)?;

        debug!("gameweek {}: {} fixtures simulated", gameweek, simulated);
        if let Some(position) = table.position_of(&user_team) {
            info!(
                "gameweek {}: {} sit {} of {}",
                gameweek,
                user_team,
                position,
                table.rows.len()
            );
        }

        match league.advance_gameweek()? {
            AdvanceOutcome::NextGameweek(next) => debug!("advanced to gameweek {}", next),
            AdvanceOutcome::SeasonComplete => break,
        }
    }

    let table = league.table();
    info!("final table ({}):", league.name);
    for (index, row) in table.rows.iter().enumerate() {
        info!(
            "{:>2}. {:<20} P{:>2} W{:>2} D{:>2} L{:>2} GF{:>3} GA{:>3} GD{:>4} {:>3} pts  {}",
            index + 1,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points,
            row.form
        );
    }

    if let Some(champion) = table.leader() {
        info!(
            "champions: {} with {} points",
            champion.team, champion.points
        );
    }

    Ok(())
}
