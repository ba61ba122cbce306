use crate::domain::AppError;

/// Yes/no decision point that would otherwise block on a TTY prompt.
pub trait Confirm {
    fn confirm(&self, message: &str) -> Result<bool, AppError>;
}

/// Non-interactive default: every question is answered "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        tracing::warn!(question = message, "Non-interactive run, answering no");
        Ok(false)
    }
}

/// Explicit opt-in (`--yes`): every question is answered "yes".
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        tracing::info!(question = message, "Answering yes");
        Ok(true)
    }
}
