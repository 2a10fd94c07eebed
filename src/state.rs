use std::sync::Arc;

use crate::config::Config;
use crate::services::advisor::AdvisorClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisor: AdvisorClient,
}
