use core::Team;
use serde::Deserialize;

const STATIC_TEAMS_JSON: &str = include_str!("../data/teams.json");

#[derive(Deserialize)]
pub struct TeamEntity {
    pub name: String,
    pub attack_rating: f32,
    pub defense_rating: f32,
    pub overall_rating: f32,
}

pub struct TeamsLoader;

impl TeamsLoader {
    pub fn load() -> Vec<Team> {
        let entities: Vec<TeamEntity> =
            serde_json::from_str(STATIC_TEAMS_JSON).expect("embedded team data is valid JSON");

        entities
            .into_iter()
            .map(|entity| {
                Team::new(
                    &entity.name,
                    entity.attack_rating,
                    entity.defense_rating,
                    entity.overall_rating,
                )
            })
            .collect()
    }
}
