use serde::Deserialize;

use crate::model::team::GameTeam;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_pk: u64,
    pub status: GameStatus,
    pub teams: Teams,
    pub venue: Venue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub abstract_game_state: String,
    pub detailed_state: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Teams {
    pub away: GameTeam,
    pub home: GameTeam,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Venue {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractState {
    Preview,
    Live,
    Final,
    Other,
}

impl AbstractState {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("preview") {
            AbstractState::Preview
        } else if s.eq_ignore_ascii_case("live") {
            AbstractState::Live
        } else if s.eq_ignore_ascii_case("final") {
            AbstractState::Final
        } else {
            AbstractState::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Away,
    Home,
}

/// Where a game stands, derived from its status and the optional score/winner fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Scheduled,
    InProgress { away: u32, home: u32 },
    Final { away: u32, home: u32, winner: Option<Side> },
}

impl GameStatus {
    pub fn abstract_state(&self) -> AbstractState {
        AbstractState::parse(&self.abstract_game_state)
    }
}

impl Game {
    pub fn outcome(&self) -> Outcome {
        let (away, home) = (&self.teams.away, &self.teams.home);
        let has_score = away.score.is_some() || home.score.is_some();
        let (a, h) = (away.score.unwrap_or(0), home.score.unwrap_or(0));

        match self.status.abstract_state() {
            AbstractState::Final => {
                // Prefer the feed's explicit flag; fall back to the scoreline
                let winner = match (away.is_winner, home.is_winner) {
                    (Some(true), _) => Some(Side::Away),
                    (_, Some(true)) => Some(Side::Home),
                    _ if a > h => Some(Side::Away),
                    _ if h > a => Some(Side::Home),
                    _ => None,
                };
                Outcome::Final { away: a, home: h, winner }
            }
            AbstractState::Live => Outcome::InProgress { away: a, home: h },
            _ if has_score => Outcome::InProgress { away: a, home: h },
            _ => Outcome::Scheduled,
        }
    }
}
