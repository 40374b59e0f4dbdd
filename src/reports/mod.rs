pub mod edit;
pub mod filter;
pub mod fixtures;
pub mod form;
pub mod pagination;

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::models::Report;
use crate::api::{ApiClient, ApiError};
use crate::config::ReportSourceKind;
use filter::ReportFilter;

/// Where the dashboard's report listing comes from.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn list(&self, token: &str, filter: &ReportFilter) -> Result<Vec<Report>, ApiError>;
}

/// Backend listing; filtering happens server-side.
pub struct ApiReports {
    api: ApiClient,
}

impl ApiReports {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReportSource for ApiReports {
    async fn list(&self, token: &str, filter: &ReportFilter) -> Result<Vec<Report>, ApiError> {
        self.api.list_reports(token, filter).await
    }
}

/// In-memory demo listing filtered with the same predicate the backend uses.
pub struct FixtureReports;

#[async_trait]
impl ReportSource for FixtureReports {
    async fn list(&self, _token: &str, filter: &ReportFilter) -> Result<Vec<Report>, ApiError> {
        Ok(filter.apply(fixtures::sample_reports()))
    }
}

pub fn source_for(kind: ReportSourceKind, api: &ApiClient) -> Arc<dyn ReportSource> {
    match kind {
        ReportSourceKind::Api => Arc::new(ApiReports::new(api.clone())),
        ReportSourceKind::Fixtures => Arc::new(FixtureReports),
    }
}

/// Replace the report with the same id by `updated`. Returns false when the
/// list holds no such report.
pub fn merge_report(reports: &mut [Report], updated: Report) -> bool {
    match reports.iter_mut().find(|r| r.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}
