use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::models::{GreenAction, GreenTask};
use crate::error::{ApiResultExt, AppResult};
use crate::extractors::CurrentSession;
use crate::green::catalogue::{fallback_actions, filter_by_tab, normalize_tab, TABS};
use crate::green::{refresh_task, schedule_next_task};
use crate::nav::NavBar;
use crate::routes::home::Html;
use crate::state::AppState;

struct TabView {
    id: &'static str,
    label: &'static str,
    active: bool,
}

struct ActionView {
    title: String,
    category: String,
    difficulty: String,
    difficulty_class: String,
    description: String,
    impact: String,
    done: bool,
}

impl ActionView {
    fn new(action: GreenAction, done: bool) -> Self {
        Self {
            difficulty_class: action.difficulty.to_lowercase(),
            title: action.title,
            category: action.category,
            difficulty: action.difficulty,
            description: action.description,
            impact: action.impact,
            done,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/green_actions.html")]
struct GreenActionsTemplate {
    nav: NavBar,
    tab: &'static str,
    tabs: Vec<TabView>,
    actions: Vec<ActionView>,
    done_count: usize,
    task: Option<GreenTask>,
    task_completed: bool,
    completed_tasks: Vec<GreenTask>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TabQuery {
    category: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ToggleForm {
    title: String,
    category: String,
}

fn back_to(tab: &str) -> Redirect {
    Redirect::to(&format!("/green-actions?category={}", normalize_tab(tab)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/green-actions", get(green_actions))
        .route("/green-actions/toggle", post(toggle_action))
        .route("/green-actions/task/complete", post(complete_task))
        .route("/green-actions/task/new", post(new_task))
}

async fn green_actions(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<TabQuery>,
) -> AppResult<Response> {
    let tab = normalize_tab(&query.category);

    // A rejected token leaves through the 401 path before any board exists.
    let catalogue = match state.api.green_advice(&session.token).await.recoverable()? {
        Ok(actions) if !actions.is_empty() => actions,
        Ok(_) => fallback_actions(),
        Err(e) => {
            tracing::warn!("Green advice unavailable, using built-in catalogue: {}", e);
            fallback_actions()
        }
    };

    state.green.open(&session.token).await;

    // First visit: generate the daily task.
    if state.green.snapshot(&session.token).await.current_task.is_none() {
        let _ = refresh_task(&state.green, &state.api, &session.token, tab)
            .await
            .recoverable()?;
    }
    let board = state.green.snapshot(&session.token).await;

    let actions: Vec<ActionView> = filter_by_tab(catalogue, tab)
        .into_iter()
        .map(|action| {
            let done = board.is_done(&action.title);
            ActionView::new(action, done)
        })
        .collect();

    Ok(Html(GreenActionsTemplate {
        nav: session.nav(),
        tab,
        tabs: TABS
            .iter()
            .map(|&(id, label)| TabView {
                id,
                label,
                active: id == tab,
            })
            .collect(),
        done_count: board.completed_actions.len(),
        actions,
        task: board.current_task,
        task_completed: board.task_completed,
        completed_tasks: board.completed_tasks,
    })
    .into_response())
}

async fn toggle_action(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<ToggleForm>,
) -> Response {
    let title = form.title.trim();
    if !title.is_empty() {
        match state
            .green
            .update(&session.token, |s| s.toggle_action(title))
            .await
        {
            Some(done) => tracing::debug!("Green action {:?} done={}", title, done),
            None => tracing::debug!("No green board for this session; toggle ignored"),
        }
    }
    back_to(&form.category).into_response()
}

async fn complete_task(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<TabQuery>,
) -> Response {
    let tab = normalize_tab(&form.category);
    let completed = state
        .green
        .update(&session.token, |s| s.complete_task())
        .await
        .unwrap_or(false);

    if completed {
        schedule_next_task(
            state.green.clone(),
            state.api.clone(),
            session.token.clone(),
            tab.to_string(),
            state.config.green_actions.next_task_delay(),
        );
    }
    back_to(tab).into_response()
}

async fn new_task(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<TabQuery>,
) -> AppResult<Response> {
    let tab = normalize_tab(&form.category);
    let _ = refresh_task(&state.green, &state.api, &session.token, tab)
        .await
        .recoverable()?;
    Ok(back_to(tab).into_response())
}
