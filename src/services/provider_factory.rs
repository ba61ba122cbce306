use crate::domain::{AppError, Inputs, ProviderKind, ToolConfig};
use crate::ports::Provider;
use crate::services::{AzureProvider, BitbucketProvider, GithubProvider, GitlabProvider};

/// Bind the selected vendor to its provider implementation.
pub fn build_provider(inputs: Inputs, config: &ToolConfig) -> Result<Box<dyn Provider>, AppError> {
    tracing::debug!(provider = %inputs.provider, "Building provider");
    let provider: Box<dyn Provider> = match inputs.provider {
        ProviderKind::Github => Box::new(GithubProvider::new(inputs, config)?),
        ProviderKind::Gitlab => Box::new(GitlabProvider::new(inputs, config)?),
        ProviderKind::Bitbucket => Box::new(BitbucketProvider::new(inputs, config)?),
        ProviderKind::Azure => Box::new(AzureProvider::new(inputs, config)?),
    };
    Ok(provider)
}
