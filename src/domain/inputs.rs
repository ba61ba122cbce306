//! Immutable per-run inputs and the parameter bag they are parsed from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::domain::AppError;

pub const MAIN_BRANCH: &str = "main";
pub const PR_TITLE: &str = "Stackspot Update workflow configuration.";
pub const REF_BRANCH_PREFIX: &str = "setup-scm-";

/// Which vendor a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Github,
    Gitlab,
    Bitbucket,
    Azure,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] =
        [ProviderKind::Github, ProviderKind::Gitlab, ProviderKind::Bitbucket, ProviderKind::Azure];

    /// Name passed to `stk --provider`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Github => "Github",
            ProviderKind::Gitlab => "Gitlab",
            ProviderKind::Bitbucket => "Bitbucket",
            ProviderKind::Azure => "Azure",
        }
    }

    /// Directory name under `workflow-templates/`.
    pub fn template_dir(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AppError::UnknownProvider(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(AppError::invalid_inputs(format!(
                "The visibility type informed is invalid: '{other}'. It must be 'public' or 'private'."
            ))),
        }
    }
}

/// Run configuration record. Built once, never mutated.
#[derive(Clone)]
pub struct Inputs {
    pub provider: ProviderKind,
    /// Organization (GitHub, Azure), workspace (Bitbucket) or group (GitLab).
    pub org_name: String,
    pub token: String,
    pub repo_name: String,
    pub project_name: Option<String>,
    pub subgroup: Option<String>,
    pub visibility: Visibility,
    pub create_repo: bool,
    pub client_key: Option<String>,
    pub client_secret: Option<String>,
    /// GitHub token used by the Azure GitHub service connection.
    pub github_pat: Option<String>,
    pub use_self_hosted_pool: Option<bool>,
    pub self_hosted_pool_name: Option<String>,
    pub component_path: PathBuf,
    pub target_path: PathBuf,
    pub ref_branch: String,
}

impl fmt::Debug for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("provider", &self.provider)
            .field("org_name", &self.org_name)
            .field("token", &"[REDACTED]")
            .field("repo_name", &self.repo_name)
            .field("project_name", &self.project_name)
            .field("subgroup", &self.subgroup)
            .field("visibility", &self.visibility)
            .field("create_repo", &self.create_repo)
            .field("component_path", &self.component_path)
            .field("target_path", &self.target_path)
            .field("ref_branch", &self.ref_branch)
            .finish_non_exhaustive()
    }
}

impl Inputs {
    pub fn pr_title(&self) -> &'static str {
        PR_TITLE
    }

    /// Project name, or an error naming the provider that needs it.
    pub fn require_project(&self) -> Result<&str, AppError> {
        self.project_name.as_deref().ok_or_else(|| {
            AppError::invalid_inputs(format!("'project_name' is required for {}", self.provider))
        })
    }

    pub fn has_client_credentials(&self) -> bool {
        self.client_key.is_some() && self.client_secret.is_some()
    }
}

/// Generate the feature branch name used for update pull requests.
pub fn generate_ref_branch() -> String {
    format!("{}{}", REF_BRANCH_PREFIX, chrono::Utc::now().timestamp_millis())
}

/// Parameter bag handed over by the automation runner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub component_path: Option<PathBuf>,
    #[serde(default)]
    pub target_path: Option<PathBuf>,
    #[serde(default)]
    pub inputs: RawInputs,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInputs {
    pub provider: Option<String>,
    #[serde(alias = "org", alias = "workspace", alias = "group", alias = "group_name")]
    pub org_name: Option<String>,
    #[serde(alias = "pat")]
    pub token: Option<String>,
    #[serde(alias = "name")]
    pub repo_name: Option<String>,
    pub project_name: Option<String>,
    pub subgroup: Option<String>,
    pub visibility: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_repo: Option<bool>,
    pub client_key: Option<String>,
    pub client_secret: Option<String>,
    pub github_pat: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub use_self_hosted_pool: Option<bool>,
    pub self_hosted_pool_name: Option<String>,
}

impl RawInputs {
    /// Validate the bag and freeze it into `Inputs`.
    pub fn into_inputs(
        self,
        component_path: PathBuf,
        target_path: PathBuf,
        ref_branch: String,
    ) -> Result<Inputs, AppError> {
        let provider: ProviderKind =
            required(self.provider, "The provider ('provider') must not be blank.")?
                .parse()?;
        let org_name = required(
            self.org_name,
            "The organization/workspace/group name ('org') must not be blank.",
        )?;

        let client_key = non_blank(self.client_key);
        let client_secret = non_blank(self.client_secret);
        let token = match non_blank(self.token) {
            Some(token) => token,
            None if provider == ProviderKind::Bitbucket
                && client_key.is_some()
                && client_secret.is_some() =>
            {
                String::new()
            }
            None => {
                return Err(AppError::invalid_inputs(
                    "The access token ('token') must not be blank.",
                ));
            }
        };

        let project_name = non_blank(self.project_name);
        let repo_name = match (non_blank(self.repo_name), provider) {
            (Some(name), _) => name,
            (None, ProviderKind::Azure | ProviderKind::Gitlab) => {
                project_name.clone().ok_or_else(|| {
                    AppError::invalid_inputs(
                        "The repository name ('repo_name' or 'project_name') must not be blank.",
                    )
                })?
            }
            (None, _) => {
                return Err(AppError::invalid_inputs(
                    "The repository name ('repo_name') must not be blank.",
                ));
            }
        };

        if matches!(provider, ProviderKind::Azure | ProviderKind::Bitbucket)
            && project_name.is_none()
        {
            return Err(AppError::invalid_inputs(format!(
                "The project name ('project_name') must not be blank for {provider}."
            )));
        }

        let visibility = match non_blank(self.visibility) {
            Some(raw) => raw.parse()?,
            None => Visibility::default(),
        };

        Ok(Inputs {
            provider,
            org_name,
            token,
            repo_name,
            project_name,
            subgroup: non_blank(self.subgroup),
            visibility,
            create_repo: self.create_repo.unwrap_or(false),
            client_key,
            client_secret,
            github_pat: non_blank(self.github_pat),
            use_self_hosted_pool: self.use_self_hosted_pool,
            self_hosted_pool_name: non_blank(self.self_hosted_pool_name),
            component_path,
            target_path,
            ref_branch,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    non_blank(value).ok_or_else(|| AppError::invalid_inputs(message))
}

/// Accept `true`, `"true"`, `"True"`, `"yes"` and friends; runners pass booleans as strings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(value)) => Ok(Some(value)),
        Some(BoolOrString::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" | "" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean value '{other}'"))),
        },
    }
}
