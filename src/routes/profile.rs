use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::models::{AccountUpdate, ActivityLine, Profile};
use crate::auth::validation::{sanitize_username, validate_password};
use crate::error::{ApiResultExt, AppResult};
use crate::extractors::CurrentSession;
use crate::nav::NavBar;
use crate::routes::home::Html;
use crate::state::AppState;

const TABS: &[&str] = &["overview", "edit", "security"];

#[derive(Template)]
#[template(path = "pages/profile.html")]
struct ProfileTemplate {
    nav: NavBar,
    tab: &'static str,
    initials: String,
    username: String,
    email: String,
    member_since: String,
    impact_score: u32,
    reports_submitted: u32,
    comments_made: u32,
    top_category: String,
    activities: Vec<ActivityLine>,
    load_error: Option<String>,
    error: Option<String>,
    notice: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ProfileQuery {
    tab: String,
    updated: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AccountForm {
    username: String,
    email: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PasswordForm {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

fn tab_named(raw: &str) -> &'static str {
    TABS.iter().copied().find(|t| *t == raw.trim()).unwrap_or("overview")
}

/// Avatar text: the first two letters of the username.
fn initials(username: &str) -> String {
    username
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile_page).post(update_profile))
        .route("/profile/password", post(update_password))
}

async fn render(
    state: &AppState,
    session: &CurrentSession,
    tab: &'static str,
    error: Option<String>,
    notice: Option<String>,
) -> AppResult<Response> {
    let (profile, load_error) = match state.api.profile(&session.token).await.recoverable()? {
        Ok(profile) => (profile, None),
        Err(e) => (
            Profile::default(),
            Some(e.user_message("Failed to load profile")),
        ),
    };

    Ok(Html(ProfileTemplate {
        nav: session.nav(),
        tab,
        member_since: profile.member_since(),
        impact_score: profile.impact_score(),
        reports_submitted: profile.impact.reports_submitted,
        comments_made: profile.impact.comments_made,
        top_category: profile
            .top_category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "None yet".to_string()),
        activities: profile.recent_activities(),
        initials: initials(&profile.username),
        username: profile.username,
        email: profile.email,
        load_error,
        error,
        notice,
    })
    .into_response())
}

async fn profile_page(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Response> {
    let notice = match query.updated.as_str() {
        "profile" => Some("Profile updated successfully!".to_string()),
        "password" => Some("Password updated successfully!".to_string()),
        _ => None,
    };
    render(&state, &session, tab_named(&query.tab), None, notice).await
}

async fn update_profile(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<AccountForm>,
) -> AppResult<Response> {
    let username = sanitize_username(&form.username);
    let email = form.email.trim().to_string();
    if username.is_empty() || email.is_empty() {
        let error = Some("Username and email are required.".to_string());
        return render(&state, &session, "edit", error, None).await;
    }

    let update = AccountUpdate {
        username: Some(username),
        email: Some(email),
        ..Default::default()
    };
    match state
        .api
        .update_account(&session.token, &update)
        .await
        .recoverable()?
    {
        Ok(user) => {
            tracing::info!("Account details updated for {}", user.username);
            Ok(Redirect::to("/profile?updated=profile").into_response())
        }
        Err(e) => {
            let error = Some(e.user_message("Failed to update profile"));
            render(&state, &session, "edit", error, None).await
        }
    }
}

async fn update_password(
    State(state): State<AppState>,
    session: CurrentSession,
    Form(form): Form<PasswordForm>,
) -> AppResult<Response> {
    let problem = if form.current_password.is_empty() {
        Some("Please enter your current password.")
    } else if form.new_password != form.confirm_password {
        Some("New passwords do not match.")
    } else {
        validate_password(&form.new_password).err()
    };
    if let Some(message) = problem {
        return render(&state, &session, "security", Some(message.to_string()), None).await;
    }

    let update = AccountUpdate {
        current_password: Some(form.current_password),
        new_password: Some(form.new_password),
        ..Default::default()
    };
    match state
        .api
        .update_account(&session.token, &update)
        .await
        .recoverable()?
    {
        Ok(_) => Ok(Redirect::to("/profile?updated=password").into_response()),
        Err(e) => {
            let error = Some(e.user_message("Failed to update password"));
            render(&state, &session, "security", error, None).await
        }
    }
}
