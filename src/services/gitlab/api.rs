//! GitLab REST v4 request builders.

use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, HttpConfig, MAIN_BRANCH, Visibility};
use crate::services::http_client::{ApiResponse, Auth, HttpClient, endpoint, endpoint_with_query};

pub const TRIGGER_DESCRIPTION: &str = "Stackspot workflow trigger token";

#[derive(Debug, Clone)]
pub struct GitlabApi {
    http: HttpClient,
    base: Url,
    auth: Auth,
}

impl GitlabApi {
    pub fn new(base: Url, token: &str, config: &HttpConfig) -> Result<Self, AppError> {
        Ok(Self { http: HttpClient::new(config, &[])?, base, auth: Auth::Bearer(token.to_string()) })
    }

    pub fn search_groups(&self, name: &str) -> Result<Value, AppError> {
        let url = endpoint_with_query(&self.base, &["groups"], &[("search", name)])?;
        self.http.get("gitlab get group", url, &self.auth)?.expect_success("gitlab get group")
    }

    pub fn search_subgroups(&self, group_id: u64, name: &str) -> Result<Value, AppError> {
        let group_id = group_id.to_string();
        let url = endpoint_with_query(
            &self.base,
            &["groups", group_id.as_str(), "subgroups"],
            &[("search", name)],
        )?;
        self.http
            .get("gitlab get subgroup", url, &self.auth)?
            .expect_success("gitlab get subgroup")
    }

    /// Look a project up by id or by its URL-encoded full path.
    pub fn get_project(&self, id_or_path: &str) -> Result<ApiResponse, AppError> {
        let url = endpoint(&self.base, &["projects", id_or_path])?;
        self.http.get("gitlab get project", url, &self.auth)
    }

    pub fn create_project(
        &self,
        name: &str,
        namespace_id: u64,
        visibility: Visibility,
    ) -> Result<ApiResponse, AppError> {
        tracing::info!(project = name, namespace_id, "Gitlab create project...");
        let url = endpoint(&self.base, &["projects"])?;
        let body = json!({
            "name": name,
            "path": name,
            "namespace_id": namespace_id,
            "visibility": visibility.as_str(),
            "description": "This repository contains stackspot workflow runner",
            "default_branch": MAIN_BRANCH,
        });
        self.http.post("gitlab create project", url, &self.auth, &body)
    }

    pub fn list_triggers(&self, project_id: &str) -> Result<Value, AppError> {
        let url = endpoint(&self.base, &["projects", project_id, "triggers"])?;
        self.http
            .get("gitlab list triggers", url, &self.auth)?
            .expect_success("gitlab list triggers")
    }

    pub fn create_trigger(&self, project_id: &str) -> Result<Value, AppError> {
        tracing::info!(project_id, "Gitlab create trigger...");
        let url = endpoint(&self.base, &["projects", project_id, "triggers"])?;
        let body = json!({"description": TRIGGER_DESCRIPTION});
        self.http
            .post("gitlab create trigger", url, &self.auth, &body)?
            .expect_success("gitlab create trigger")
    }

    pub fn create_merge_request(
        &self,
        project_id: &str,
        title: &str,
        source: &str,
        target: &str,
    ) -> Result<Value, AppError> {
        tracing::info!(project_id, source, target, "Gitlab create merge request...");
        let url = endpoint(&self.base, &["projects", project_id, "merge_requests"])?;
        let body = json!({
            "title": title,
            "description": title,
            "source_branch": source,
            "target_branch": target,
        });
        self.http
            .post("gitlab create merge request", url, &self.auth, &body)?
            .expect_success("gitlab create merge request")
    }
}
