use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::FetchError;
use crate::model::schedule::ApiResponse;
use crate::schedule::{first_day, ScheduleSource};
use crate::state::Action;

/// Handle to a one-shot schedule fetch.
///
/// Dropping the handle aborts delivery; a fetch that finishes afterwards is discarded.
#[derive(Debug)]
pub struct LoaderHandle {
    task: JoinHandle<()>,
    rx: Option<oneshot::Receiver<Action>>,
}

impl LoaderHandle {
    /// Wait for the single action the fetch produces.
    /// Returns None if the handle was cancelled or the result was already taken.
    pub async fn result(&mut self) -> Option<Action> {
        let rx = self.rx.take()?;
        rx.await.ok()
    }

    pub fn cancel(&mut self) {
        if self.rx.take().is_some() {
            debug!("Cancelling schedule fetch");
        }
        self.task.abort();
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }
}

impl Drop for LoaderHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the fetch on the blocking pool. Must be called from within a tokio runtime.
pub fn spawn(source: Arc<dyn ScheduleSource>) -> LoaderHandle {
    let (tx, rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        let joined = tokio::task::spawn_blocking(move || source.fetch()).await;
        let result = joined.unwrap_or_else(|e| Err(FetchError::Interrupted(e.to_string())));
        let action = into_action(result);
        if tx.send(action).is_err() {
            debug!("View went away before the schedule arrived; discarding result");
        }
    });

    LoaderHandle { task, rx: Some(rx) }
}

pub fn into_action(result: Result<ApiResponse, FetchError>) -> Action {
    match result {
        Ok(response) => {
            let day = first_day(response);
            info!(games = day.games.len(), "Schedule loaded");
            Action::FetchSucceeded { date: day.date, games: day.games }
        }
        Err(e) => {
            error!(error = %e, "Error fetching games");
            Action::FetchFailed(e.to_string())
        }
    }
}
