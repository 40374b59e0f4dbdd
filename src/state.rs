use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::green::GreenBoard;
use crate::reports::{source_for, ReportSource};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub reports: Arc<dyn ReportSource>,
    pub green: GreenBoard,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api.base_url.clone());
        let reports = source_for(config.reports.source, &api);
        Self {
            config,
            api,
            reports,
            green: GreenBoard::new(),
        }
    }
}
