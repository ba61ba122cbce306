//! Bitbucket Cloud REST 2.0 request builders.

use std::cell::OnceCell;
use std::fmt;

use reqwest::Method;
use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, HttpConfig, Visibility};
use crate::services::http_client::{
    ApiResponse, Auth, Body, HttpClient, endpoint, endpoint_with_query, field_str,
};

/// Repository pipeline variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineVariable {
    pub key: String,
    pub value: String,
    pub secured: bool,
}

impl PipelineVariable {
    pub fn plain(key: &str, value: &str) -> Self {
        Self { key: key.to_string(), value: value.to_string(), secured: false }
    }
}

enum Credentials {
    Client { key: String, secret: String },
    Token(String),
}

/// Client whose bearer token is either supplied or fetched once through the
/// OAuth2 client-credentials grant and reused for every later call.
pub struct BitbucketApi {
    http: HttpClient,
    base: Url,
    auth_url: Url,
    credentials: Credentials,
    access_token: OnceCell<String>,
}

impl fmt::Debug for BitbucketApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitbucketApi")
            .field("base", &self.base)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl BitbucketApi {
    pub fn with_client_credentials(
        base: Url,
        auth_url: Url,
        key: &str,
        secret: &str,
        config: &HttpConfig,
    ) -> Result<Self, AppError> {
        Self::build(
            base,
            auth_url,
            Credentials::Client { key: key.to_string(), secret: secret.to_string() },
            config,
        )
    }

    pub fn with_token(base: Url, auth_url: Url, token: &str, config: &HttpConfig) -> Result<Self, AppError> {
        Self::build(base, auth_url, Credentials::Token(token.to_string()), config)
    }

    fn build(
        base: Url,
        auth_url: Url,
        credentials: Credentials,
        config: &HttpConfig,
    ) -> Result<Self, AppError> {
        Ok(Self {
            http: HttpClient::new(config, &[])?,
            base,
            auth_url,
            credentials,
            access_token: OnceCell::new(),
        })
    }

    /// Bearer token for this run. The OAuth exchange happens at most once.
    pub fn access_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.access_token.get() {
            return Ok(token.clone());
        }

        let token = match &self.credentials {
            Credentials::Token(token) => token.clone(),
            Credentials::Client { key, secret } => {
                tracing::info!("Bitbucket authentication...");
                let auth = Auth::Basic { user: key.clone(), password: secret.clone() };
                let form = [("grant_type", "client_credentials")];
                let body = self
                    .http
                    .send(
                        "bitbucket authentication",
                        Method::POST,
                        self.auth_url.clone(),
                        &auth,
                        Body::Form(&form),
                    )?
                    .expect_success("bitbucket authentication")?;
                field_str(&body, "access_token", "bitbucket authentication")?
            }
        };

        Ok(self.access_token.get_or_init(|| token).clone())
    }

    fn auth(&self) -> Result<Auth, AppError> {
        self.access_token().map(Auth::Bearer)
    }

    pub fn get_repository(&self, workspace: &str, repo: &str) -> Result<ApiResponse, AppError> {
        let url = endpoint(&self.base, &["repositories", workspace, repo])?;
        self.http.get("bitbucket get repository", url, &self.auth()?)
    }

    pub fn list_projects(&self, workspace: &str) -> Result<Value, AppError> {
        let url =
            endpoint_with_query(&self.base, &["workspaces", workspace, "projects"], &[("pagelen", "100")])?;
        self.http
            .get("bitbucket list projects", url, &self.auth()?)?
            .expect_success("bitbucket list projects")
    }

    pub fn get_project(&self, workspace: &str, key: &str) -> Result<ApiResponse, AppError> {
        let url = endpoint(&self.base, &["workspaces", workspace, "projects", key])?;
        self.http.get("bitbucket get project", url, &self.auth()?)
    }

    pub fn create_project(&self, workspace: &str, name: &str, key: &str) -> Result<Value, AppError> {
        tracing::info!(workspace, project = name, key, "Bitbucket create project...");
        let url = endpoint(&self.base, &["workspaces", workspace, "projects"])?;
        let body = json!({"name": name, "key": key});
        self.http
            .post("bitbucket create project", url, &self.auth()?, &body)?
            .expect_success("bitbucket create project")
    }

    pub fn create_repository(
        &self,
        workspace: &str,
        repo: &str,
        project_key: &str,
        visibility: Visibility,
    ) -> Result<Value, AppError> {
        tracing::info!(workspace, repo, project_key, "Bitbucket create repository...");
        let url = endpoint(&self.base, &["repositories", workspace, repo])?;
        let body = json!({
            "scm": "git",
            "is_private": visibility.is_private(),
            "project": {"key": project_key},
        });
        self.http
            .post("bitbucket create repository", url, &self.auth()?, &body)?
            .expect_success("bitbucket create repository")
    }

    pub fn create_pull_request(
        &self,
        workspace: &str,
        repo: &str,
        title: &str,
        source: &str,
        destination: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(workspace, repo, source, destination, "Bitbucket create pull request...");
        let url = endpoint(&self.base, &["repositories", workspace, repo, "pullrequests"])?;
        let body = json!({
            "title": title,
            "source": {"branch": {"name": source}},
            "destination": {"branch": {"name": destination}},
        });
        self.http
            .post("bitbucket create pull request", url, &self.auth()?, &body)?
            .expect_success("bitbucket create pull request")
    }

    pub fn enable_pipelines(&self, workspace: &str, repo: &str) -> Result<Value, AppError> {
        tracing::info!(workspace, repo, "Bitbucket enable repository pipelines...");
        let url = endpoint(&self.base, &["repositories", workspace, repo, "pipelines_config"])?;
        self.http
            .put("bitbucket update repository pipeline", url, &self.auth()?, &json!({"enabled": true}))?
            .expect_success("bitbucket update repository pipeline")
    }

    pub fn list_variables(&self, workspace: &str, repo: &str) -> Result<Value, AppError> {
        let url = endpoint_with_query(
            &self.base,
            &["repositories", workspace, repo, "pipelines_config", "variables"],
            &[("pagelen", "100")],
        )?;
        self.http
            .get("bitbucket list repository variables", url, &self.auth()?)?
            .expect_success("bitbucket list repository variables")
    }

    pub fn create_variable(
        &self,
        workspace: &str,
        repo: &str,
        variable: &PipelineVariable,
    ) -> Result<Value, AppError> {
        tracing::info!(key = %variable.key, "Creating Repository Variable");
        let url = endpoint(&self.base, &["repositories", workspace, repo, "pipelines_config", "variables"])?;
        let body = json!({
            "type": "pipeline_variable",
            "key": variable.key,
            "value": variable.value,
            "secured": variable.secured,
        });
        self.http
            .post("bitbucket create repository variable", url, &self.auth()?, &body)?
            .expect_success("bitbucket create repository variable")
    }

    pub fn update_variable(
        &self,
        workspace: &str,
        repo: &str,
        uuid: &str,
        variable: &PipelineVariable,
    ) -> Result<Value, AppError> {
        tracing::info!(key = %variable.key, "Updating Repository Variable");
        let url = endpoint(
            &self.base,
            &["repositories", workspace, repo, "pipelines_config", "variables", uuid],
        )?;
        let body = json!({"value": variable.value, "secured": variable.secured});
        self.http
            .put("bitbucket update repository variable", url, &self.auth()?, &body)?
            .expect_success("bitbucket update repository variable")
    }
}
