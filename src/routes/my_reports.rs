use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::models::Report;
use crate::api::ApiError;
use crate::error::{ApiResultExt, AppResult};
use crate::extractors::CurrentSession;
use crate::nav::NavBar;
use crate::reports::edit::EditReportForm;
use crate::reports::merge_report;
use crate::reports::pagination::paginate;
use crate::routes::cards::{cards, EditModal, ReportCard};
use crate::routes::home::Html;
use crate::state::AppState;

/// Confirmation prompt shown before a report is deleted.
struct DeleteConfirm {
    title: String,
    action: String,
    cancel_href: String,
}

#[derive(Template)]
#[template(path = "pages/my_reports.html")]
struct MyReportsTemplate {
    nav: NavBar,
    error: Option<String>,
    notice: Option<String>,
    cards: Vec<ReportCard>,
    page: usize,
    total_pages: usize,
    has_prev: bool,
    has_next: bool,
    prev_href: String,
    next_href: String,
    page_href: String,
    edit: Option<EditModal>,
    confirm: Option<DeleteConfirm>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MyReportsQuery {
    page: String,
    edit: String,
    delete: String,
    deleted: String,
}

impl MyReportsQuery {
    fn page(&self) -> usize {
        self.page.trim().parse().unwrap_or(1)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn page_href(page: usize) -> String {
    format!("/my-reports?page={}", page)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-reports", get(my_reports))
        .route("/my-reports/{id}/edit", post(edit_report))
        .route("/my-reports/{id}/delete", post(delete_report))
}

#[derive(Default)]
struct Extras {
    edit: Option<i64>,
    edit_form: Option<(EditReportForm, String)>,
    delete: Option<i64>,
    notice: Option<String>,
    action_error: Option<String>,
}

fn render(
    state: &AppState,
    session: &CurrentSession,
    requested_page: usize,
    listing: Result<Vec<Report>, ApiError>,
    extras: Extras,
) -> AppResult<Response> {
    let (reports, load_error) = match listing {
        Ok(reports) => (reports, None),
        Err(e) => (
            Vec::new(),
            Some(format!(
                "Error loading reports: {}",
                e.user_message("Failed to load your reports")
            )),
        ),
    };

    let page = paginate(reports.clone(), requested_page, state.config.reports.page_size);
    let here = page_href(page.page);

    let edit = match extras.edit_form {
        Some((form, error)) => extras.edit.map(|id| {
            EditModal::new(
                id,
                form,
                format!("/my-reports/{}/edit?page={}", id, page.page),
                here.clone(),
            )
            .with_error(error)
        }),
        None => extras
            .edit
            .and_then(|id| reports.iter().find(|r| r.id == id))
            .map(|report| {
                EditModal::new(
                    report.id,
                    EditReportForm::from_report(report),
                    format!("/my-reports/{}/edit?page={}", report.id, page.page),
                    here.clone(),
                )
            }),
    };

    let confirm = extras
        .delete
        .and_then(|id| reports.iter().find(|r| r.id == id))
        .map(|report| DeleteConfirm {
            title: report.title.clone(),
            action: format!("/my-reports/{}/delete?page={}", report.id, page.page),
            cancel_href: here.clone(),
        });

    Ok(Html(MyReportsTemplate {
        nav: session.nav(),
        error: extras.action_error.or(load_error),
        notice: extras.notice,
        cards: cards(&page.items),
        page: page.page,
        total_pages: page.total_pages,
        has_prev: page.has_prev(),
        has_next: page.has_next(),
        prev_href: page_href(page.prev_page()),
        next_href: page_href(page.next_page()),
        page_href: here,
        edit,
        confirm,
    })
    .into_response())
}

async fn my_reports(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<MyReportsQuery>,
) -> AppResult<Response> {
    let listing = state.api.my_reports(&session.token).await.recoverable()?;
    let extras = Extras {
        edit: parse_id(&query.edit),
        delete: parse_id(&query.delete),
        notice: (!query.deleted.is_empty()).then(|| "Report deleted.".to_string()),
        ..Default::default()
    };
    render(&state, &session, query.page(), listing, extras)
}

async fn edit_report(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<MyReportsQuery>,
    Form(form): Form<EditReportForm>,
) -> AppResult<Response> {
    let outcome = match form.to_update() {
        Ok(update) => state
            .api
            .update_report(&session.token, id, &update)
            .await
            .recoverable()?
            .map_err(|e| e.user_message("Failed to update report")),
        Err(message) => Err(message),
    };

    let listing = state.api.my_reports(&session.token).await.recoverable()?;
    let extras = match outcome {
        Ok(updated) => {
            tracing::info!("Report {} updated", id);
            let listing = listing.map(|mut reports| {
                merge_report(&mut reports, updated);
                reports
            });
            let extras = Extras {
                notice: Some("Report updated.".to_string()),
                ..Default::default()
            };
            return render(&state, &session, query.page(), listing, extras);
        }
        Err(message) => Extras {
            edit: Some(id),
            edit_form: Some((form, message)),
            ..Default::default()
        },
    };
    render(&state, &session, query.page(), listing, extras)
}

/// The only place a report is actually deleted; reached from the
/// confirmation prompt's form.
async fn delete_report(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<MyReportsQuery>,
) -> AppResult<Response> {
    match state
        .api
        .delete_report(&session.token, id)
        .await
        .recoverable()?
    {
        Ok(()) => {
            tracing::info!("Report {} deleted", id);
            Ok(Redirect::to(&format!("/my-reports?page={}&deleted=1", query.page())).into_response())
        }
        Err(e) => {
            let listing = state.api.my_reports(&session.token).await.recoverable()?;
            let extras = Extras {
                action_error: Some(e.user_message("Failed to delete report")),
                ..Default::default()
            };
            render(&state, &session, query.page(), listing, extras)
        }
    }
}
