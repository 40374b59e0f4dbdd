use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::session::extract_token;
use crate::error::AppError;
use crate::nav::NavBar;
use crate::state::AppState;

/// A browser that holds a bearer token.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    /// Request path, used to pick the navigation link set.
    pub path: String,
}

impl CurrentSession {
    pub fn nav(&self) -> NavBar {
        NavBar::for_route(&self.path, true)
    }
}

/// Extractor that requires a stored token.
/// Without one the browser is sent to `/login`.
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or(AppError::Unauthorized)?;
        Ok(CurrentSession {
            token: token.to_string(),
            path: parts.uri.path().to_string(),
        })
    }
}

/// Optional session extractor: never rejects.
pub struct MaybeSession(pub Option<CurrentSession>);

impl MaybeSession {
    pub fn nav(&self, path: &str) -> NavBar {
        NavBar::for_route(path, self.0.is_some())
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentSession::from_request_parts(parts, state).await {
            Ok(session) => Ok(MaybeSession(Some(session))),
            Err(_) => Ok(MaybeSession(None)),
        }
    }
}
