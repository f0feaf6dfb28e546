use chrono::NaiveDate;

use crate::model::game::Game;

/// State transitions produced by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchSucceeded {
        date: Option<NaiveDate>,
        games: Vec<Game>,
    },
    FetchFailed(String),
}

/// Everything the renderer needs. Replaced wholesale on every action.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub games: Vec<Game>,
    pub date: Option<NaiveDate>,
    /// Diagnostic from the last failed fetch, if any
    pub error: Option<String>,
}

impl ViewState {
    pub fn initial() -> Self {
        Self { loading: true, games: Vec::new(), date: None, error: None }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::FetchStarted => ViewState::initial(),
        Action::FetchSucceeded { date, games } => ViewState { loading: false, games, date, error: None },
        Action::FetchFailed(message) => ViewState {
            loading: false,
            games: Vec::new(),
            date: state.date,
            error: Some(message),
        },
    }
}
