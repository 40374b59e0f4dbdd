use askama::Template;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::api::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::session::{clear_token_cookie, token_cookie};
use crate::auth::validation::{sanitize_username, validate_login, validate_signup};
use crate::error::AppResult;
use crate::extractors::MaybeSession;
use crate::nav::NavBar;
use crate::routes::home::Html;
use crate::state::AppState;

// -- Templates --

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav: NavBar,
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/signup.html")]
pub struct SignupTemplate {
    pub nav: NavBar,
    pub username: String,
    pub email: String,
    pub error: Option<String>,
}

// -- Request types --

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginQuery {
    pub registered: String,
}

fn signed_in(state: &AppState, token: &str) -> Response {
    (
        [(
            header::SET_COOKIE,
            token_cookie(token, state.config.auth.token_hours),
        )],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// GET /login
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    Html(LoginTemplate {
        nav: NavBar::for_route("/login", false),
        email: String::new(),
        error: None,
        notice: (!query.registered.is_empty())
            .then(|| "Account created. Please log in.".to_string()),
    })
}

/// POST /login
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> AppResult<Response> {
    let page = |error: String| LoginTemplate {
        nav: NavBar::for_route("/login", false),
        email: form.email.clone(),
        error: Some(error),
        notice: None,
    };

    if let Err(message) = validate_login(&form.email, &form.password) {
        return Ok(Html(page(message.to_string())).into_response());
    }

    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    match state.api.login(&request).await {
        Ok(AuthResponse {
            token: Some(token), ..
        }) if !token.is_empty() => {
            tracing::info!("Login succeeded for {}", request.email);
            Ok(signed_in(&state, &token))
        }
        Ok(_) => {
            tracing::warn!("Login answer for {} carried no token", request.email);
            Ok(Html(page("Login failed. Please try again.".to_string())).into_response())
        }
        Err(e) => Ok(Html(page(e.user_message("Login failed. Please try again."))).into_response()),
    }
}

/// GET /signup
pub async fn signup_page() -> impl IntoResponse {
    Html(SignupTemplate {
        nav: NavBar::for_route("/signup", false),
        username: String::new(),
        email: String::new(),
        error: None,
    })
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    // The browser strips these as the user types; a scriptless post still gets them stripped here.
    let username = sanitize_username(&form.username);
    let page = |error: String| SignupTemplate {
        nav: NavBar::for_route("/signup", false),
        username: username.clone(),
        email: form.email.clone(),
        error: Some(error),
    };

    if let Err(message) = validate_signup(&username, &form.email, &form.password) {
        return Ok(Html(page(message.to_string())).into_response());
    }

    let request = RegisterRequest {
        username: username.clone(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    match state.api.register(&request).await {
        Ok(AuthResponse {
            token: Some(token), ..
        }) if !token.is_empty() => {
            tracing::info!("Registered {}", username);
            Ok(signed_in(&state, &token))
        }
        Ok(_) => Ok(Redirect::to("/login?registered=1").into_response()),
        Err(e) => Ok(Html(page(e.user_message("Registration failed. Please try again."))).into_response()),
    }
}

/// POST /signout
pub async fn signout(State(state): State<AppState>, session: MaybeSession) -> Response {
    if let Some(session) = session.0 {
        state.green.forget(&session.token).await;
    }
    (
        [(header::SET_COOKIE, clear_token_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
