use askama::Template;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::api::models::{AiAnalysis, AnalyzeRequest};
use crate::api::{ApiError, NETWORK_ERROR_MESSAGE};
use crate::error::{ApiResultExt, AppResult};
use crate::extractors::CurrentSession;
use crate::nav::NavBar;
use crate::reports::form::ReportForm;
use crate::routes::home::Html;
use crate::state::AppState;

const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit report. Please try again.";
const THANK_YOU_MESSAGE: &str = "Thank you! Your report has been submitted.";

/// Uploads may carry a short video.
const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Template)]
#[template(path = "pages/report.html")]
struct ReportTemplate {
    nav: NavBar,
    title: String,
    description: String,
    location: String,
    file_name: String,
    error: Option<String>,
    notice: Option<String>,
    analysis: Option<AiAnalysis>,
}

impl ReportTemplate {
    fn blank(nav: NavBar) -> Self {
        Self {
            nav,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            file_name: String::new(),
            error: None,
            notice: None,
            analysis: None,
        }
    }

    /// Re-show what the user typed, with a message.
    fn refill(nav: NavBar, form: &ReportForm, error: &str) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
            location: form.location.clone(),
            file_name: form.file_name().to_string(),
            error: Some(error.to_string()),
            ..Self::blank(nav)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report", get(report_page).post(submit_report))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
}

async fn report_page(session: CurrentSession) -> impl IntoResponse {
    Html(ReportTemplate::blank(session.nav()))
}

async fn submit_report(
    State(state): State<AppState>,
    session: CurrentSession,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = ReportForm::from_multipart(multipart).await?;

    let new_report = match form.validate() {
        Ok(report) => report,
        Err(message) => {
            return Ok(Html(ReportTemplate::refill(session.nav(), &form, message)).into_response());
        }
    };

    let created = match state
        .api
        .create_report(&session.token, new_report)
        .await
        .recoverable()?
    {
        Ok(report) => report,
        Err(e) => {
            let message = match e {
                ApiError::Network(_) => NETWORK_ERROR_MESSAGE,
                _ => SUBMIT_FAILED_MESSAGE,
            };
            return Ok(Html(ReportTemplate::refill(session.nav(), &form, message)).into_response());
        }
    };
    tracing::info!("Report {} submitted", created.id);

    let mut analysis = None;
    if state.config.reports.analyze_after_submit {
        let request = AnalyzeRequest {
            report_id: created.id,
            title: created.title.clone(),
            description: created.description.clone(),
            location: created.location.clone(),
        };
        match state
            .api
            .analyze(&session.token, &request)
            .await
            .recoverable()?
        {
            Ok(result) => analysis = Some(result),
            Err(e) => tracing::warn!("AI analysis of report {} failed: {}", created.id, e),
        }
    }

    Ok(Html(ReportTemplate {
        notice: Some(THANK_YOU_MESSAGE.to_string()),
        analysis,
        ..ReportTemplate::blank(session.nav())
    })
    .into_response())
}
