//! Green actions board: catalogue fallback, toggles and the daily task.

mod common;

use axum::http::StatusCode;
use common::*;

async fn page(app: &axum::Router, uri: &str) -> String {
    body_text(send(app, get(uri, Some(GOOD_TOKEN))).await).await
}

#[tokio::test]
async fn empty_backend_catalogue_falls_back_to_built_in_list() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    let body = page(&app, "/green-actions").await;
    assert!(body.contains("Switch to LED Bulbs"));
    assert!(body.contains("Bike to Work"));
    assert!(body.contains("Task 1"));
    assert_eq!(backend.recorder.count("POST /api/ai/generate-task"), 1);

    // The task is generated once per session, not on every view.
    page(&app, "/green-actions").await;
    assert_eq!(backend.recorder.count("POST /api/ai/generate-task"), 1);
}

#[tokio::test]
async fn category_tab_filters_catalogue() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    let body = page(&app, "/green-actions?category=water").await;
    assert!(body.contains("Collect Rainwater"));
    assert!(body.contains("Fix Water Leaks"));
    assert!(!body.contains("Bike to Work"));
}

#[tokio::test]
async fn marking_done_twice_restores_not_done() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    page(&app, "/green-actions").await;
    let toggle = "title=Bike+to+Work&category=transport";
    let resp = send(&app, post_form("/green-actions/toggle", Some(GOOD_TOKEN), toggle)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/green-actions?category=transport");
    assert!(page(&app, "/green-actions").await.contains("1 action(s) marked done"));

    send(&app, post_form("/green-actions/toggle", Some(GOOD_TOKEN), toggle)).await;
    assert!(page(&app, "/green-actions").await.contains("0 action(s) marked done"));
}

#[tokio::test]
async fn completing_task_schedules_a_replacement() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    assert!(page(&app, "/green-actions").await.contains("Task 1"));

    let resp = send(
        &app,
        post_form("/green-actions/task/complete", Some(GOOD_TOKEN), "category=all"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = page(&app, "/green-actions").await;
    assert!(body.contains("Completed Tasks (1)"));

    let recorder = backend.recorder.clone();
    assert!(eventually(|| recorder.count("POST /api/ai/generate-task") == 2).await);
    assert!(eventually_page_contains(&app, "Task 2").await);
}

async fn eventually_page_contains(app: &axum::Router, needle: &str) -> bool {
    for _ in 0..50 {
        if page(app, "/green-actions").await.contains(needle) {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn generate_new_task_replaces_current_one() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    page(&app, "/green-actions").await;
    let resp = send(
        &app,
        post_form("/green-actions/task/new", Some(GOOD_TOKEN), "category=energy"),
    )
    .await;
    assert_eq!(location(&resp), "/green-actions?category=energy");

    let body = page(&app, "/green-actions?category=energy").await;
    assert!(body.contains("Task 2"));
    assert!(backend
        .recorder
        .calls()
        .iter()
        .any(|c| c == "POST /api/ai/generate-task"));
}

#[tokio::test]
async fn sign_out_drops_the_board() {
    let backend = spawn_backend().await;
    let app = app(&backend.api_url);

    page(&app, "/green-actions").await;
    send(
        &app,
        post_form("/green-actions/toggle", Some(GOOD_TOKEN), "title=Start+Composting"),
    )
    .await;
    assert!(page(&app, "/green-actions").await.contains("1 action(s) marked done"));

    send(&app, post_form("/signout", Some(GOOD_TOKEN), "")).await;
    assert!(page(&app, "/green-actions").await.contains("0 action(s) marked done"));
}

#[tokio::test]
async fn pending_task_does_not_reopen_a_signed_out_board() {
    let backend = spawn_backend().await;
    let (app, state) = app_and_state(&backend.api_url);

    page(&app, "/green-actions").await;
    send(
        &app,
        post_form("/green-actions/task/complete", Some(GOOD_TOKEN), "category=all"),
    )
    .await;
    send(&app, post_form("/signout", Some(GOOD_TOKEN), "")).await;

    // Let the replacement task come due.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(!state.green.contains(GOOD_TOKEN).await);

    let before = backend.recorder.count("POST /api/ai/generate-task");
    let body = page(&app, "/green-actions").await;
    assert_eq!(backend.recorder.count("POST /api/ai/generate-task"), before + 1);
    assert!(body.contains(&format!("Task {}", before + 1)));
    assert!(!body.contains("Completed Tasks (1)"));
}

#[tokio::test]
async fn unknown_tokens_never_open_a_board() {
    let backend = spawn_backend().await;
    let (app, state) = app_and_state(&backend.api_url);

    for token in ["stale", "forged"] {
        let resp = send(
            &app,
            post_form("/green-actions/toggle", Some(token), "title=Bike+to+Work"),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        send(
            &app,
            post_form("/green-actions/task/complete", Some(token), "category=all"),
        )
        .await;
    }

    assert_eq!(state.green.open_count().await, 0);
    assert!(backend.recorder.calls().is_empty());
}

#[tokio::test]
async fn rejected_token_drops_its_board() {
    let backend = spawn_backend().await;
    let (app, state) = app_and_state(&backend.api_url);
    state.green.open("expired").await;

    let resp = send(&app, get("/dashboard", Some("expired"))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert!(!state.green.contains("expired").await);

    let resp = send(&app, get("/green-actions", Some("expired"))).await;
    assert_eq!(location(&resp), "/login");
    assert_eq!(state.green.open_count().await, 0);
}
