pub mod assets;
pub mod auth;
pub mod cards;
pub mod dashboard;
pub mod green;
pub mod home;
pub mod my_reports;
pub mod profile;
pub mod report;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::expiry::forget_rejected_sessions;
use crate::state::AppState;

/// The complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(home::router())
        .route("/assets/{*path}", get(assets::serve))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(report::router())
        .merge(my_reports::router())
        .merge(green::router())
        .merge(profile::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            forget_rejected_sessions,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
