use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::models::{NewComment, Report};
use crate::api::ApiError;
use crate::error::{ApiResultExt, AppResult};
use crate::extractors::CurrentSession;
use crate::nav::NavBar;
use crate::reports::edit::EditReportForm;
use crate::reports::filter::{FilterQuery, ReportFilter};
use crate::reports::merge_report;
use crate::routes::cards::{
    cards, category_options, filter_query_string, with_query, CategoryOption, CommentView,
    EditModal, ReportCard, ReportDetail,
};
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    nav: NavBar,
    filter: FilterQuery,
    categories: Vec<CategoryOption>,
    filters_active: bool,
    filter_qs: String,
    error: Option<String>,
    cards: Vec<ReportCard>,
    notice: Option<String>,
    detail: Option<ReportDetail>,
    edit: Option<EditModal>,
}

/// Which modal, if any, the dashboard opens.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Selection {
    view: String,
    edit: String,
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CommentForm {
    content: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/reports/{id}/comments", post(add_comment))
        .route("/dashboard/reports/{id}/edit", post(edit_report))
}

/// Everything the page needs beyond the listing itself.
#[derive(Default)]
struct Extras {
    view: Option<i64>,
    comment_error: Option<String>,
    edit: Option<i64>,
    edit_form: Option<(EditReportForm, String)>,
    notice: Option<String>,
}

async fn render(
    state: &AppState,
    session: &CurrentSession,
    query: FilterQuery,
    listing: Result<Vec<Report>, ApiError>,
    extras: Extras,
) -> AppResult<Response> {
    let filter_qs = filter_query_string(&query);
    let dashboard_href = with_query("/dashboard", &filter_qs);

    let (reports, error) = match listing {
        Ok(reports) => (reports, None),
        Err(e) => (
            Vec::new(),
            Some(format!(
                "Error loading reports: {}",
                e.user_message("Failed to load reports")
            )),
        ),
    };

    let mut detail = None;
    if let Some(report) = extras
        .view
        .and_then(|id| reports.iter().find(|r| r.id == id))
    {
        let (comments, comments_error) = match state
            .api
            .report_comments(&session.token, report.id)
            .await
            .recoverable()?
        {
            Ok(comments) => (comments.iter().map(CommentView::from).collect(), None),
            Err(e) => (Vec::new(), Some(e.user_message("Failed to load comments"))),
        };
        detail = Some(ReportDetail {
            card: ReportCard::from(report),
            comments,
            comments_error: extras.comment_error.or(comments_error),
            comment_action: with_query(
                &format!("/dashboard/reports/{}/comments", report.id),
                &filter_qs,
            ),
            close_href: dashboard_href.clone(),
        });
    }

    let edit = match extras.edit_form {
        Some((form, error)) => extras.edit.map(|id| {
            EditModal::new(id, form, edit_action(id, &filter_qs), dashboard_href.clone())
                .with_error(error)
        }),
        None => extras
            .edit
            .and_then(|id| reports.iter().find(|r| r.id == id))
            .map(|report| {
                EditModal::new(
                    report.id,
                    EditReportForm::from_report(report),
                    edit_action(report.id, &filter_qs),
                    dashboard_href.clone(),
                )
            }),
    };

    let filters_active = !ReportFilter::from(&query).is_empty();
    Ok(Html(DashboardTemplate {
        nav: session.nav(),
        categories: category_options(query.category.trim()),
        filter: query,
        filters_active,
        filter_qs,
        error,
        cards: cards(&reports),
        notice: extras.notice,
        detail,
        edit,
    })
    .into_response())
}

fn edit_action(id: i64, filter_qs: &str) -> String {
    with_query(&format!("/dashboard/reports/{}/edit", id), filter_qs)
}

async fn dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<FilterQuery>,
    Query(selection): Query<Selection>,
) -> AppResult<Response> {
    let filter = ReportFilter::from(&query);
    let listing = state
        .reports
        .list(&session.token, &filter)
        .await
        .recoverable()?;

    let extras = Extras {
        view: parse_id(&selection.view),
        edit: parse_id(&selection.edit),
        ..Default::default()
    };
    render(&state, &session, query, listing, extras).await
}

async fn add_comment(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<FilterQuery>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let back = with_query(
        &with_query("/dashboard", &filter_query_string(&query)),
        &format!("view={}", id),
    );

    let content = form.content.trim();
    if content.is_empty() {
        return Ok(Redirect::to(&back).into_response());
    }

    let comment = NewComment {
        report_id: id,
        content: content.to_string(),
    };
    match state
        .api
        .add_comment(&session.token, &comment)
        .await
        .recoverable()?
    {
        Ok(_) => Ok(Redirect::to(&back).into_response()),
        Err(e) => {
            let filter = ReportFilter::from(&query);
            let listing = state
                .reports
                .list(&session.token, &filter)
                .await
                .recoverable()?;
            let extras = Extras {
                view: Some(id),
                comment_error: Some(e.user_message("Failed to add comment")),
                ..Default::default()
            };
            render(&state, &session, query, listing, extras).await
        }
    }
}

async fn edit_report(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<FilterQuery>,
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

    let filter = ReportFilter::from(&query);
    let listing = state
        .reports
        .list(&session.token, &filter)
        .await
        .recoverable()?;

    match outcome {
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
            render(&state, &session, query, listing, extras).await
        }
        Err(message) => {
            let extras = Extras {
                edit: Some(id),
                edit_form: Some((form, message)),
                ..Default::default()
            };
            render(&state, &session, query, listing, extras).await
        }
    }
}
