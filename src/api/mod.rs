//! Typed client for the EarthLens backend REST API.
//!
//! Every call the front end makes to the backend goes through [`ApiClient`].
//! A `401` on a call that carried a bearer token surfaces as
//! [`ApiError::Unauthorized`]; the route layer turns that into a sign-out and
//! a redirect to `/login`.

pub mod error;
pub mod models;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use error::{ApiError, ErrorBody, NETWORK_ERROR_MESSAGE};
use models::{
    AccountUpdate, AiAnalysis, AnalyzeRequest, AuthResponse, Comment, GreenAction, GreenTask,
    LoginRequest, NewComment, NewReport, Profile, RegisterRequest, Report, ReportUpdate,
    TaskRequest, UserSummary,
};

use crate::reports::filter::ReportFilter;

#[derive(Deserialize)]
struct ReportsEnvelope {
    #[serde(default)]
    reports: Vec<Report>,
}

#[derive(Deserialize)]
struct ReportEnvelope {
    report: Report,
}

#[derive(Deserialize)]
struct CommentsEnvelope {
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct CommentEnvelope {
    comment: Comment,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    profile: Profile,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserSummary,
}

#[derive(Deserialize)]
struct ActionsEnvelope {
    #[serde(default)]
    actions: Vec<GreenAction>,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: GreenTask,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalysisEnvelope {
    Nested { analysis: AiAnalysis },
    Flat(AiAnalysis),
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        customize: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = customize(req).send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            tracing::info!("{} {} rejected the session token", method, path);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.json::<ErrorBody>().await.unwrap_or_default();
            tracing::warn!("{} {} answered {}: {:?}", method, path, status, body);
            return Err(ApiError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        customize: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = self.execute(method, path, token, customize).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // -- Auth --

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(Method::POST, "/auth/register", None, |r| r.json(req))
            .await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(Method::POST, "/auth/login", None, |r| r.json(req))
            .await
    }

    pub async fn update_account(
        &self,
        token: &str,
        update: &AccountUpdate,
    ) -> Result<UserSummary, ApiError> {
        let env: UserEnvelope = self
            .fetch(Method::PUT, "/auth/me", Some(token), |r| r.json(update))
            .await?;
        Ok(env.user)
    }

    pub async fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        let env: ProfileEnvelope = self
            .fetch(Method::GET, "/profile", Some(token), std::convert::identity)
            .await?;
        Ok(env.profile)
    }

    // -- Reports --

    pub async fn list_reports(
        &self,
        token: &str,
        filter: &ReportFilter,
    ) -> Result<Vec<Report>, ApiError> {
        let query = filter.to_query();
        let env: ReportsEnvelope = self
            .fetch(Method::GET, "/reports", Some(token), |r| r.query(&query))
            .await?;
        Ok(env.reports)
    }

    pub async fn my_reports(&self, token: &str) -> Result<Vec<Report>, ApiError> {
        let env: ReportsEnvelope = self
            .fetch(
                Method::GET,
                "/reports/my-reports",
                Some(token),
                std::convert::identity,
            )
            .await?;
        Ok(env.reports)
    }

    pub async fn create_report(&self, token: &str, report: NewReport) -> Result<Report, ApiError> {
        let mut form = Form::new()
            .text("title", report.title)
            .text("description", report.description)
            .text("location", report.location);

        if let Some(upload) = report.image {
            let part = Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name);
            let part = if upload
                .content_type
                .parse::<mime_guess::mime::Mime>()
                .is_ok()
            {
                part.mime_str(&upload.content_type)
                    .map_err(|e| ApiError::Request(e.to_string()))?
            } else {
                part
            };
            form = form.part("image", part);
        }

        let env: ReportEnvelope = self
            .fetch(Method::POST, "/reports", Some(token), |r| r.multipart(form))
            .await?;
        Ok(env.report)
    }

    pub async fn update_report(
        &self,
        token: &str,
        id: i64,
        update: &ReportUpdate,
    ) -> Result<Report, ApiError> {
        let env: ReportEnvelope = self
            .fetch(Method::PUT, &format!("/reports/{}", id), Some(token), |r| {
                r.json(update)
            })
            .await?;
        Ok(env.report)
    }

    pub async fn delete_report(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.execute(
            Method::DELETE,
            &format!("/reports/{}", id),
            Some(token),
            std::convert::identity,
        )
        .await?;
        Ok(())
    }

    // -- Comments --

    pub async fn report_comments(&self, token: &str, report_id: i64) -> Result<Vec<Comment>, ApiError> {
        let env: CommentsEnvelope = self
            .fetch(
                Method::GET,
                &format!("/comments/report/{}", report_id),
                Some(token),
                std::convert::identity,
            )
            .await?;
        Ok(env.comments)
    }

    pub async fn add_comment(&self, token: &str, comment: &NewComment) -> Result<Comment, ApiError> {
        let env: CommentEnvelope = self
            .fetch(Method::POST, "/comments", Some(token), |r| r.json(comment))
            .await?;
        Ok(env.comment)
    }

    // -- AI --

    pub async fn green_advice(&self, token: &str) -> Result<Vec<GreenAction>, ApiError> {
        let env: ActionsEnvelope = self
            .fetch(
                Method::GET,
                "/ai/green-advice",
                Some(token),
                std::convert::identity,
            )
            .await?;
        Ok(env.actions)
    }

    pub async fn generate_task(&self, token: &str, req: &TaskRequest) -> Result<GreenTask, ApiError> {
        let env: TaskEnvelope = self
            .fetch(Method::POST, "/ai/generate-task", Some(token), |r| r.json(req))
            .await?;
        Ok(env.task)
    }

    pub async fn analyze(&self, token: &str, req: &AnalyzeRequest) -> Result<AiAnalysis, ApiError> {
        let env: AnalysisEnvelope = self
            .fetch(Method::POST, "/ai/analyze", Some(token), |r| r.json(req))
            .await?;
        Ok(match env {
            AnalysisEnvelope::Nested { analysis } => analysis,
            AnalysisEnvelope::Flat(analysis) => analysis,
        })
    }
}
