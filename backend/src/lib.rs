pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod schedule;
pub mod store;
pub mod submission;

use std::sync::Arc;

use schedule::ScheduleSettings;
use store::Store;
use submission::ScheduleSubmitter;

/// Shared application state available to all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub submitter: Arc<dyn ScheduleSubmitter>,
    pub settings: ScheduleSettings,
}

impl axum::extract::FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl axum::extract::FromRef<AppState> for ScheduleSettings {
    fn from_ref(state: &AppState) -> Self {
        state.settings
    }
}
