//! Green actions board: per-session "done" marks and the daily task.
//!
//! Everything here lives in memory only. It is keyed by the session's bearer
//! token. A board is opened only once the backend has accepted the token,
//! and is dropped on sign-out or when the backend later rejects the token.

pub mod catalogue;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::models::{GreenTask, TaskRequest};
use crate::api::{ApiClient, ApiError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreenSession {
    pub completed_actions: BTreeSet<String>,
    pub current_task: Option<GreenTask>,
    pub task_completed: bool,
    pub completed_tasks: Vec<GreenTask>,
}

impl GreenSession {
    /// Flip an action between done and not done. Returns the new state.
    pub fn toggle_action(&mut self, title: &str) -> bool {
        if self.completed_actions.remove(title) {
            false
        } else {
            self.completed_actions.insert(title.to_string());
            true
        }
    }

    pub fn is_done(&self, title: &str) -> bool {
        self.completed_actions.contains(title)
    }

    /// Mark the current task complete and file it under completed tasks.
    /// Returns false when there is nothing left to complete.
    pub fn complete_task(&mut self) -> bool {
        if self.task_completed {
            return false;
        }
        match &self.current_task {
            Some(task) => {
                self.completed_tasks.push(task.clone());
                self.task_completed = true;
                true
            }
            None => false,
        }
    }

    pub fn replace_task(&mut self, task: GreenTask) {
        self.current_task = Some(task);
        self.task_completed = false;
    }
}

#[derive(Clone, Default)]
pub struct GreenBoard {
    sessions: Arc<Mutex<HashMap<String, GreenSession>>>,
}

impl GreenBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self, token: &str) -> GreenSession {
        let sessions = self.sessions.lock().await;
        sessions.get(token).cloned().unwrap_or_default()
    }

    /// Start a board for a token the backend has accepted.
    pub async fn open(&self, token: &str) {
        self.sessions
            .lock()
            .await
            .entry(token.to_string())
            .or_default();
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.sessions.lock().await.contains_key(token)
    }

    /// Apply `f` to an open board. `None` when the token has none.
    pub async fn update<R>(
        &self,
        token: &str,
        f: impl FnOnce(&mut GreenSession) -> R,
    ) -> Option<R> {
        self.sessions.lock().await.get_mut(token).map(f)
    }

    pub async fn open_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn forget(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }
}

/// Ask the backend for a fresh daily task and install it. On failure the
/// current task stays as it was. A board closed while the request was in
/// flight stays closed.
pub async fn refresh_task(
    board: &GreenBoard,
    api: &ApiClient,
    token: &str,
    tab: &str,
) -> Result<(), ApiError> {
    let task = api
        .generate_task(token, &TaskRequest::for_tab(tab))
        .await
        .inspect_err(|e| tracing::warn!("Failed to generate green task: {}", e))?;
    board.update(token, |s| s.replace_task(task)).await;
    Ok(())
}

/// Request a replacement task once `delay` has passed, without holding up
/// the caller.
pub fn schedule_next_task(
    board: GreenBoard,
    api: ApiClient,
    token: String,
    tab: String,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if !board.contains(&token).await {
            tracing::debug!("Board closed before the next task was due");
            return;
        }
        // A rejected token surfaces on the next page load.
        let _ = refresh_task(&board, &api, &token, &tab).await;
    })
}
