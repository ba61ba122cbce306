pub mod config;
pub mod conflict;
pub mod error;
pub mod inputs;
pub mod output;
pub mod project_key;
pub mod remote_url;
pub mod setup_stage;

pub use config::{AzurePolling, Endpoints, HttpConfig, OUTPUT_FILE_NAME, SetupConfig, ToolConfig};
pub use error::AppError;
pub use inputs::{
    Inputs, MAIN_BRANCH, Metadata, PR_TITLE, ProviderKind, RawInputs, Visibility,
    generate_ref_branch,
};
pub use output::RunOutput;
pub use setup_stage::{CommitOutcome, SetupOutcome, SetupStage};
