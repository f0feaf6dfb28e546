use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::game::Game;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub dates: Vec<ScheduleDate>,
}

/// A single day of the schedule feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleDate {
    // The feed carries this as "YYYY-MM-DD"; older fixtures omit it
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub games: Vec<Game>,
}
