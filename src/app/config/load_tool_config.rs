//! Optional TOML tool configuration.

use std::fs;
use std::path::Path;

use crate::domain::config::parse_config_content;
use crate::domain::{AppError, ToolConfig};

/// Load the tool configuration; built-in defaults apply when no file is given.
pub fn load_tool_config(path: Option<&Path>) -> Result<ToolConfig, AppError> {
    let Some(path) = path else {
        return Ok(ToolConfig::default());
    };
    if !path.is_file() {
        return Err(AppError::InvalidConfig(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}
