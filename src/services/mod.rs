pub mod azure;
pub mod bitbucket;
mod confirm_dialoguer;
mod git_command;
pub mod github;
pub mod gitlab;
pub mod http_client;
mod output_file;
mod provider_factory;
mod stk_command;

pub use azure::AzureProvider;
pub use bitbucket::BitbucketProvider;
pub use confirm_dialoguer::DialoguerConfirm;
pub use git_command::GitCommandAdapter;
pub use github::GithubProvider;
pub use gitlab::GitlabProvider;
pub use output_file::write_run_output;
pub use provider_factory::build_provider;
pub use stk_command::StkCommandAdapter;
