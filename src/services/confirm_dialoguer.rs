use std::io::ErrorKind;

use dialoguer::{Confirm as ConfirmPrompt, Error as DialoguerError};

use crate::domain::AppError;
use crate::ports::Confirm;

/// Ask on the terminal (`--interactive`). An interrupted prompt counts as "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirm;

impl Confirm for DialoguerConfirm {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        match ConfirmPrompt::new().with_prompt(message).default(false).interact() {
            Ok(answer) => Ok(answer),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
            Err(err) => Err(AppError::ExternalTool {
                tool: "prompt".to_string(),
                error: format!("Failed to read confirmation: {err}"),
            }),
        }
    }
}
