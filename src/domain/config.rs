//! Tool configuration models loaded from an optional TOML file.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

pub const OUTPUT_FILE_NAME: &str = "stk-local-context.json";

/// Top-level configuration. Every section falls back to vendor defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub azure: AzurePolling,
    #[serde(default)]
    pub setup: SetupConfig,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.http.validate()?;
        self.azure.validate()?;
        self.setup.validate()?;
        Ok(())
    }
}

/// Base URLs for every vendor. Overridable so clients can target test servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    #[serde(default = "default_github_api")]
    pub github_api: Url,
    #[serde(default = "default_github_web")]
    pub github_web: Url,
    #[serde(default = "default_gitlab_api")]
    pub gitlab_api: Url,
    #[serde(default = "default_gitlab_web")]
    pub gitlab_web: Url,
    #[serde(default = "default_bitbucket_api")]
    pub bitbucket_api: Url,
    #[serde(default = "default_bitbucket_web")]
    pub bitbucket_web: Url,
    #[serde(default = "default_bitbucket_auth")]
    pub bitbucket_auth: Url,
    #[serde(default = "default_azure_api")]
    pub azure_api: Url,
    #[serde(default = "default_azure_web")]
    pub azure_web: Url,
    /// Callback registered as the GitHub repository webhook.
    #[serde(default = "default_workflow_callback")]
    pub workflow_callback: Url,
    /// Workflow API exported to Bitbucket pipelines.
    #[serde(default = "default_workflow_api")]
    pub workflow_api: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            github_api: default_github_api(),
            github_web: default_github_web(),
            gitlab_api: default_gitlab_api(),
            gitlab_web: default_gitlab_web(),
            bitbucket_api: default_bitbucket_api(),
            bitbucket_web: default_bitbucket_web(),
            bitbucket_auth: default_bitbucket_auth(),
            azure_api: default_azure_api(),
            azure_web: default_azure_web(),
            workflow_callback: default_workflow_callback(),
            workflow_api: default_workflow_api(),
        }
    }
}

impl Endpoints {
    /// Point every vendor API at one base URL (test servers).
    pub fn single_host(base: &Url) -> Self {
        Self {
            github_api: base.clone(),
            github_web: base.clone(),
            gitlab_api: base.clone(),
            gitlab_web: base.clone(),
            bitbucket_api: base.clone(),
            bitbucket_web: base.clone(),
            bitbucket_auth: base.clone(),
            azure_api: base.clone(),
            azure_web: base.clone(),
            workflow_callback: default_workflow_callback(),
            workflow_api: default_workflow_api(),
        }
    }
}

fn parse_default(raw: &str) -> Url {
    Url::parse(raw).expect("Default endpoint URL must be valid")
}

fn default_github_api() -> Url {
    parse_default("https://api.github.com")
}

fn default_github_web() -> Url {
    parse_default("https://github.com")
}

fn default_gitlab_api() -> Url {
    parse_default("https://gitlab.com/api/v4")
}

fn default_gitlab_web() -> Url {
    parse_default("https://gitlab.com")
}

fn default_bitbucket_api() -> Url {
    parse_default("https://api.bitbucket.org/2.0")
}

fn default_bitbucket_web() -> Url {
    parse_default("https://bitbucket.org")
}

fn default_bitbucket_auth() -> Url {
    parse_default("https://bitbucket.org/site/oauth2/access_token")
}

fn default_azure_api() -> Url {
    parse_default("https://dev.azure.com")
}

fn default_azure_web() -> Url {
    parse_default("https://dev.azure.com")
}

fn default_workflow_callback() -> Url {
    parse_default("https://workflow-api.v1.stackspot.com/workflows/github/callback")
}

fn default_workflow_api() -> Url {
    parse_default("https://workflow-api.v1.stackspot.com")
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout() }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout() -> u64 {
    30
}

/// Azure project provisioning poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AzurePolling {
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for AzurePolling {
    fn default() -> Self {
        Self { poll_attempts: default_poll_attempts(), poll_interval_ms: default_poll_interval_ms() }
    }
}

impl AzurePolling {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_attempts == 0 {
            return Err(AppError::InvalidConfig("poll_attempts must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_attempts() -> u32 {
    15
}

fn default_poll_interval_ms() -> u64 {
    5000
}

/// Orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupConfig {
    /// Pause after repository creation so the vendor can propagate it.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Workflow-template CLI binary.
    #[serde(default = "default_stk_binary")]
    pub stk_binary: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            stk_binary: default_stk_binary(),
            output_file: default_output_file(),
        }
    }
}

impl SetupConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.stk_binary.trim().is_empty() {
            return Err(AppError::InvalidConfig("stk_binary must not be empty".to_string()));
        }
        if self.output_file.trim().is_empty() {
            return Err(AppError::InvalidConfig("output_file must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_settle_delay_ms() -> u64 {
    5000
}

fn default_stk_binary() -> String {
    "stk".to_string()
}

fn default_output_file() -> String {
    OUTPUT_FILE_NAME.to_string()
}

/// Parse and validate tool configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ToolConfig, AppError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
