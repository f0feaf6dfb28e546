use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeagueRecord {
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
}

/// One side of a game: the team, its standing and (once play has started) its score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    pub league_record: LeagueRecord,
    #[serde(default)]
    pub score: Option<u32>,
    pub team: Team,
    #[serde(default)]
    pub is_winner: Option<bool>,
}
