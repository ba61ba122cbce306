//! GitHub REST v2022-11-28 request builders.

use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, HttpConfig, Visibility};
use crate::services::http_client::{ApiResponse, Auth, HttpClient, endpoint};

const GITHUB_HEADERS: [(&str, &str); 2] =
    [("accept", "application/vnd.github+json"), ("x-github-api-version", "2022-11-28")];

#[derive(Debug, Clone)]
pub struct GithubApi {
    http: HttpClient,
    base: Url,
    auth: Auth,
}

impl GithubApi {
    pub fn new(base: Url, token: &str, config: &HttpConfig) -> Result<Self, AppError> {
        Ok(Self {
            http: HttpClient::new(config, &GITHUB_HEADERS)?,
            base,
            auth: Auth::Bearer(token.to_string()),
        })
    }

    pub fn get_repository(&self, org: &str, repo: &str) -> Result<ApiResponse, AppError> {
        let url = endpoint(&self.base, &["repos", org, repo])?;
        self.http.get("github get repository", url, &self.auth)
    }

    pub fn create_repository(
        &self,
        org: &str,
        repo: &str,
        visibility: Visibility,
    ) -> Result<ApiResponse, AppError> {
        tracing::info!(org, repo, "Github create repository...");
        let url = endpoint(&self.base, &["orgs", org, "repos"])?;
        let body = json!({
            "name": repo,
            "description": "StackSpot Workflows",
            "homepage": "https://stackspot.com",
            "private": visibility.is_private(),
            "visibility": visibility.as_str(),
        });
        self.http.post("github create repository", url, &self.auth, &body)
    }

    pub fn list_hooks(&self, org: &str, repo: &str) -> Result<Value, AppError> {
        let url = endpoint(&self.base, &["repos", org, repo, "hooks"])?;
        self.http
            .get("github get repository hooks", url, &self.auth)?
            .expect_success("github get repository hooks")
    }

    pub fn create_hook(&self, org: &str, repo: &str, callback: &Url) -> Result<Value, AppError> {
        tracing::info!(org, repo, "Github create repository hook...");
        let url = endpoint(&self.base, &["repos", org, repo, "hooks"])?;
        let body = json!({
            "name": "web",
            "active": true,
            "events": ["workflow_job", "workflow_run"],
            "config": {
                "url": callback.as_str(),
                "content_type": "json",
                "insecure_ssl": "0",
            },
        });
        self.http
            .post("github create repository hook", url, &self.auth, &body)?
            .expect_success("github create repository hook")
    }

    pub fn create_pull_request(
        &self,
        org: &str,
        repo: &str,
        title: &str,
        head: &str,
        base: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(org, repo, head, base, "Github create pull request...");
        let url = endpoint(&self.base, &["repos", org, repo, "pulls"])?;
        let body = json!({"title": title, "head": head, "base": base});
        self.http
            .post("github create pull request", url, &self.auth, &body)?
            .expect_success("github create pull request")
    }
}
