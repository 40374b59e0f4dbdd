//! A rejected or missing token always ends in one cookie-clearing redirect
//! to the login page.

mod common;

use axum::http::{Response, StatusCode};
use axum::body::Body;
use common::*;

const STALE_TOKEN: &str = "expired-token";

fn assert_signed_out(resp: &Response<Body>) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(resp), "/login");
    let cookies = set_cookies(resp);
    assert_eq!(cookies.len(), 1, "exactly one Set-Cookie: {:?}", cookies);
    assert!(cookies[0].starts_with("earthlens_token=;"));
    assert!(cookies[0].contains("Max-Age=0"));
}

#[tokio::test]
async fn protected_pages_without_token_redirect_to_login() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    for path in ["/dashboard", "/report", "/my-reports", "/green-actions", "/profile"] {
        let resp = send(&app, get(path, None)).await;
        assert_signed_out(&resp);
    }
    assert!(backend.recorder.calls().is_empty());
}

#[tokio::test]
async fn backend_401_on_listing_signs_out_once() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    let resp = send(&app, get("/dashboard", Some(STALE_TOKEN))).await;

    assert_signed_out(&resp);
    assert_eq!(backend.recorder.count("GET /api/reports"), 1);
}

#[tokio::test]
async fn backend_401_on_mutation_signs_out() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    let resp = send(&app, post_form("/my-reports/3/delete", Some(STALE_TOKEN), "")).await;
    assert_signed_out(&resp);
    assert_eq!(backend.recorder.count("DELETE /api/reports/3"), 1);

    let resp = send(
        &app,
        post_form(
            "/dashboard/reports/1/edit",
            Some(STALE_TOKEN),
            "title=T&description=D&location=L",
        ),
    )
    .await;
    assert_signed_out(&resp);
}

#[tokio::test]
async fn backend_401_on_side_requests_signs_out() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    assert_signed_out(&send(&app, get("/green-actions", Some(STALE_TOKEN))).await);
    assert_signed_out(&send(&app, get("/profile", Some(STALE_TOKEN))).await);
}
