use std::io;

use thiserror::Error;

/// Library-wide error type for scm-setup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Vendor answered 404 for a lookup.
    #[error("{what} not found")]
    NotFound { what: String },

    /// Vendor rejected the credentials (401/403).
    #[error("Unauthorized while calling {what} (HTTP {status})")]
    Unauthorized { what: String, status: u16 },

    /// Any other non-2xx vendor response.
    #[error("{what} failed with HTTP {status}: {message}")]
    Http { what: String, status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("Request to {what} failed: {details}")]
    Transport { what: String, details: String },

    #[error("Repository already exists")]
    RepoAlreadyExists,

    #[error("Repository does not exist and creation was not requested")]
    RepoDoesNotExist,

    #[error("Git clone failure: {details}")]
    CloningRepo { details: String },

    /// Global git identity (user.name / user.email) is missing.
    #[error("Git user.name and user.email must be configured globally")]
    GitUserSetup,

    #[error("The stk workspace must be exited before running the setup")]
    WorkspaceShouldNotInUse,

    #[error("Applying the workflow plugin failed (exit code {code:?})")]
    ApplyPluginSetupRepository { code: Option<i32> },

    #[error("The name {0} is too short. It must contain at least 3 characters.")]
    ProjectNameTooShort(String),

    #[error("The '{0}' group was not found.")]
    GroupNotFound(String),

    #[error(
        "Could not derive a free project key from '{0}', please select a different project name."
    )]
    CouldNotSetProjectKey(String),

    #[error("Failed to create '{project}' project. Status: {status}")]
    ProjectProvisioningFailed { project: String, status: String },

    #[error("Failed to create '{project}' project. Time out after {attempts} status checks.")]
    ProjectProvisioningTimeout { project: String, attempts: u32 },

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    GitError { command: String, details: String },

    /// A non-git external tool failed.
    #[error("{tool} failed: {error}")]
    ExternalTool { tool: String, error: String },

    /// Metadata inputs are missing or malformed.
    #[error("Invalid inputs: {0}")]
    InvalidInputs(String),

    #[error("Unknown provider '{0}': expected one of Github, Gitlab, Bitbucket, Azure")]
    UnknownProvider(String),

    /// Tool configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// YAML/JSON metadata parsing error.
    #[error("Metadata parse error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),
}

impl AppError {
    pub fn invalid_inputs<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInputs(message.into())
    }

    pub fn parse_error<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Message logged by the top-level run handler for each failure kind.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized { .. } => "Unauthorized!".to_string(),
            AppError::RepoAlreadyExists => "Repository already exists!".to_string(),
            AppError::RepoDoesNotExist => {
                "Repository provided doesn't exist and creation was not requested!".to_string()
            }
            AppError::Http { .. } | AppError::Transport { .. } => {
                format!("A failure with an important request happened: {self}")
            }
            AppError::GitUserSetup => {
                "Configure git user.name and user.email before running the setup.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::NotFound { .. }
            | AppError::RepoDoesNotExist
            | AppError::GroupNotFound(_) => io::ErrorKind::NotFound,
            AppError::Unauthorized { .. } => io::ErrorKind::PermissionDenied,
            AppError::RepoAlreadyExists => io::ErrorKind::AlreadyExists,
            AppError::ProjectProvisioningTimeout { .. } => io::ErrorKind::TimedOut,
            AppError::InvalidInputs(_)
            | AppError::UnknownProvider(_)
            | AppError::InvalidConfig(_)
            | AppError::ProjectNameTooShort(_)
            | AppError::CouldNotSetProjectKey(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_)
            | AppError::YamlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::Http { .. }
            | AppError::Transport { .. }
            | AppError::CloningRepo { .. }
            | AppError::GitUserSetup
            | AppError::WorkspaceShouldNotInUse
            | AppError::ApplyPluginSetupRepository { .. }
            | AppError::ProjectProvisioningFailed { .. }
            | AppError::GitError { .. }
            | AppError::ExternalTool { .. } => io::ErrorKind::Other,
        }
    }
}
