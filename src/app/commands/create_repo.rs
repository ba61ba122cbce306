use crate::domain::AppError;
use crate::ports::Provider;

/// Ensure the vendor container and repository exist, creating only what is missing.
///
/// Returns the repository URL for the persisted output.
pub fn execute<P: Provider + ?Sized>(provider: &P) -> Result<String, AppError> {
    let inputs = provider.inputs();
    if provider.repo_exists()? {
        tracing::info!(provider = %inputs.provider, repo = %inputs.repo_name, "Repository already exists");
    } else {
        provider.execute_repo_creation()?;
        tracing::info!(provider = %inputs.provider, repo = %inputs.repo_name, "Repository created");
    }
    provider.repository_url()
}
