use std::sync::Arc;

use tracing::debug;

use crate::loader::{self, LoaderHandle};
use crate::render::{self, Grid, Layout};
use crate::schedule::ScheduleSource;
use crate::state::{reduce, Action, ViewState};

/// The scoreboard view: holds the state value and owns the single fetch issued on mount.
#[derive(Debug)]
pub struct ScheduleView {
    state: ViewState,
    layout: Layout,
    loader: Option<LoaderHandle>,
}

impl ScheduleView {
    /// Mount the view and fire its fetch. Must be called from within a tokio runtime.
    pub fn mount(source: Arc<dyn ScheduleSource>, layout: Layout) -> Self {
        let state = reduce(ViewState::initial(), Action::FetchStarted);
        let loader = loader::spawn(source);
        debug!(columns = layout.columns(), "Mounted schedule view");
        Self { state, layout, loader: Some(loader) }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }

    /// Wait for the mount fetch to resolve and apply its result. Later calls return immediately.
    pub async fn settle(&mut self) -> &ViewState {
        if let Some(mut loader) = self.loader.take() {
            if let Some(action) = loader.result().await {
                self.dispatch(action);
            }
        }
        &self.state
    }

    pub fn render(&self) -> Grid {
        render::render(&self.state, self.layout)
    }

    pub fn unmount(mut self) {
        if let Some(mut loader) = self.loader.take() {
            loader.cancel();
        }
    }
}
