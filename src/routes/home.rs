use askama::Template;
use axum::extract::OriginalUri;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::extractors::MaybeSession;
use crate::nav::NavBar;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/landing.html")]
pub struct LandingTemplate {
    pub nav: NavBar,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub nav: NavBar,
}

#[derive(Template)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub nav: NavBar,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/about", get(about))
        .route("/contact", get(contact))
}

async fn landing(session: MaybeSession, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    Html(LandingTemplate {
        nav: session.nav(uri.path()),
    })
}

async fn about(session: MaybeSession, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    Html(AboutTemplate {
        nav: session.nav(uri.path()),
    })
}

async fn contact(session: MaybeSession, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    Html(ContactTemplate {
        nav: session.nav(uri.path()),
    })
}
