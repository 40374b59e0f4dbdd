//! View models shared by the dashboard and My Reports pages.

use crate::api::models::{display_date, Comment, Report};
use crate::reports::edit::EditReportForm;
use crate::reports::filter::{FilterQuery, CATEGORIES};
use crate::routes::assets::PLACEHOLDER_IMAGE;

/// A report as the card and detail modal show it.
#[derive(Debug, Clone)]
pub struct ReportCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub category: String,
    pub reporter: String,
    pub image_src: String,
    pub placeholder: &'static str,
    pub ai_advice: Option<String>,
    pub is_public: bool,
}

impl From<&Report> for ReportCard {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            date: display_date(&report.created_at),
            category: report.category_label().to_string(),
            reporter: report.reporter().to_string(),
            image_src: report
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            placeholder: PLACEHOLDER_IMAGE,
            ai_advice: report.ai_advice.clone().filter(|a| !a.trim().is_empty()),
            is_public: report.is_public,
        }
    }
}

pub fn cards(reports: &[Report]) -> Vec<ReportCard> {
    reports.iter().map(ReportCard::from).collect()
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub author: String,
    pub content: String,
    pub date: String,
    pub edited: bool,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            author: comment.author_name().to_string(),
            content: comment.content.clone(),
            date: display_date(&comment.created_at),
            edited: comment.is_edited,
        }
    }
}

/// Details modal: the report plus its comment thread.
#[derive(Debug, Clone)]
pub struct ReportDetail {
    pub card: ReportCard,
    pub comments: Vec<CommentView>,
    pub comments_error: Option<String>,
    pub comment_action: String,
    pub close_href: String,
}

/// Edit modal state: where it posts, where cancel goes, what to pre-fill.
#[derive(Debug, Clone)]
pub struct EditModal {
    pub id: i64,
    pub form: EditReportForm,
    pub public_checked: bool,
    pub error: Option<String>,
    pub action: String,
    pub cancel_href: String,
}

impl EditModal {
    pub fn new(id: i64, form: EditReportForm, action: String, cancel_href: String) -> Self {
        Self {
            id,
            public_checked: form.public_checked(),
            form,
            error: None,
            action,
            cancel_href,
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub name: &'static str,
    pub selected: bool,
}

pub fn category_options(selected: &str) -> Vec<CategoryOption> {
    CATEGORIES
        .iter()
        .map(|&name| CategoryOption {
            name,
            selected: name == selected,
        })
        .collect()
}

/// Re-encode the active filter so links and form actions keep it.
pub fn filter_query_string(query: &FilterQuery) -> String {
    let mut out = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in [
        ("location", &query.location),
        ("category", &query.category),
        ("date_from", &query.date_from),
        ("date_to", &query.date_to),
    ] {
        if !value.trim().is_empty() {
            out.append_pair(key, value);
        }
    }
    out.finish()
}

/// `base` with `query` appended, skipping the `?` when there is nothing to add.
pub fn with_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        base.to_string()
    } else if base.contains('?') {
        format!("{}&{}", base, query)
    } else {
        format!("{}?{}", base, query)
    }
}
