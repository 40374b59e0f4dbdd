use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use crate::api::ApiError;
use crate::auth::session::clear_token_cookie;

/// Response extension set when the user is signed out because the backend
/// refused their token.
#[derive(Debug, Clone, Copy)]
pub struct SessionRejected;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    /// Missing token, or the backend rejected it.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Backend error: {0}")]
    Api(ApiError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => AppError::Unauthorized,
            other => AppError::Api(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Unauthorized => {
                // Drop the stale token and send the browser to the login page.
                let mut response = (
                    [(header::SET_COOKIE, clear_token_cookie())],
                    Redirect::to("/login"),
                )
                    .into_response();
                response.extensions_mut().insert(SessionRejected);
                return response;
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Api(e) => {
                tracing::warn!("Backend error: {}", e);
                (StatusCode::BAD_GATEWAY, e.user_message("Backend error"))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template render error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Split a backend result into "sign the user out" (the outer error) and
/// failures the page renders itself (the inner error).
pub trait ApiResultExt<T> {
    fn recoverable(self) -> AppResult<Result<T, ApiError>>;
}

impl<T> ApiResultExt<T> for Result<T, ApiError> {
    fn recoverable(self) -> AppResult<Result<T, ApiError>> {
        match self {
            Err(ApiError::Unauthorized) => Err(AppError::Unauthorized),
            other => Ok(other),
        }
    }
}
