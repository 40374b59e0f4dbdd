use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Parse the backend's timestamps, which come either as RFC 3339 or as a
/// naive ISO datetime without offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `M/D/YYYY`, or the raw string when it cannot be parsed.
pub fn display_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ai_category: Option<String>,
    #[serde(default)]
    pub ai_advice: Option<String>,
    #[serde(default, alias = "author")]
    pub user: Option<Author>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl Report {
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_date(&self.created_at)
    }

    pub fn reporter(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn category_label(&self) -> &str {
        self.ai_category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Uncategorized")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default, alias = "author")]
    pub user: Option<Author>,
    #[serde(default)]
    pub report_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, alias = "edited")]
    pub is_edited: bool,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Impact {
    pub reports_submitted: u32,
    pub comments_made: u32,
    pub public_reports: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecentActivity {
    pub reports: Vec<ActivityEntry>,
    pub comments: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub created_at: Option<String>,
    pub impact: Impact,
    pub top_category: Option<String>,
    pub recent_activity: RecentActivity,
}

/// One line of the profile's activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub kind: &'static str,
    pub text: String,
    pub time: String,
}

const RECENT_ACTIVITY_LIMIT: usize = 5;

impl Profile {
    pub fn impact_score(&self) -> u32 {
        self.impact.reports_submitted + self.impact.comments_made
    }

    pub fn recent_activities(&self) -> Vec<ActivityLine> {
        let reports = self.recent_activity.reports.iter().map(|r| ActivityLine {
            kind: "report",
            text: format!("Submitted report: {}", r.title),
            time: display_date(&r.created_at),
        });
        let comments = self.recent_activity.comments.iter().map(|c| ActivityLine {
            kind: "comment",
            text: format!("Commented: {}", c.content),
            time: display_date(&c.created_at),
        });
        reports.chain(comments).take(RECENT_ACTIVITY_LIMIT).collect()
    }

    pub fn member_since(&self) -> String {
        self.created_at
            .as_deref()
            .map(display_date)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenAction {
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenTask {
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub description: String,
    pub impact: String,
    pub time_estimate: String,
    pub materials_needed: Vec<String>,
}

impl GreenTask {
    pub fn materials(&self) -> String {
        self.materials_needed.join(", ")
    }

    pub fn difficulty_class(&self) -> String {
        self.difficulty.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiAnalysis {
    #[serde(alias = "ai_category")]
    pub category: String,
    #[serde(alias = "ai_advice")]
    pub advice: String,
}

// -- Request bodies --

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A file picked in the report form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: bytes::Bytes,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub location: String,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub report_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRequest {
    pub category: String,
    pub difficulty: Option<String>,
    pub location: Option<String>,
}

impl TaskRequest {
    /// The "all" tab asks for a general task.
    pub fn for_tab(tab: &str) -> Self {
        let category = if tab == "all" { "general" } else { tab };
        Self {
            category: category.to_string(),
            difficulty: None,
            location: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub report_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
}
