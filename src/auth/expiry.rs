use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::session::extract_token;
use crate::error::SessionRejected;
use crate::state::AppState;

/// Middleware that drops the in-memory state of a token once a handler
/// signs the user out because the backend refused it.
pub async fn forget_rejected_sessions(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();
    let token = extract_token(&parts).map(str::to_string);
    let response = next.run(Request::from_parts(parts, body)).await;

    if let Some(token) = token {
        if response.extensions().get::<SessionRejected>().is_some() {
            tracing::info!("Backend rejected a session token; dropping its green board");
            state.green.forget(&token).await;
        }
    }
    response
}
