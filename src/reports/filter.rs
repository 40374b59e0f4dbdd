use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::models::Report;

/// Categories offered by the dashboard's category select.
pub const CATEGORIES: &[&str] = &[
    "Waste Management",
    "Air Pollution",
    "Flooding",
    "Poaching",
    "Water Pollution",
    "Deforestation",
];

/// Filter criteria as they arrive from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub location: String,
    pub category: String,
    pub date_from: String,
    pub date_to: String,
}

/// Active report filter. `None` means the criterion is off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub location: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl From<&FilterQuery> for ReportFilter {
    fn from(q: &FilterQuery) -> Self {
        Self {
            location: non_empty(&q.location),
            category: non_empty(&q.category),
            date_from: date(&q.date_from),
            date_to: date(&q.date_to),
        }
    }
}

impl ReportFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the report satisfies every active criterion.
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(location) = &self.location {
            if !report
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if report.ai_category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(created) = report.created_date() else {
                return false;
            };
            if self.date_from.is_some_and(|from| created < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| created > to) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, reports: Vec<Report>) -> Vec<Report> {
        reports.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Query parameters for `GET /reports`; inactive criteria are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(location) = &self.location {
            query.push(("location", location.clone()));
        }
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        if let Some(from) = self.date_from {
            query.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            query.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        query
    }
}
