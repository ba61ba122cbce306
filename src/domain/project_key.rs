//! Bitbucket project key derivation.

use crate::domain::AppError;

pub const KEY_LENGTH: usize = 3;

/// Uppercase the project name and keep only ASCII alphanumerics.
pub fn clean_project_name(project_name: &str) -> String {
    project_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Pick the first free 3-character key by sliding a window over the cleaned name.
///
/// `key_exists` probes the vendor for a collision; its errors propagate.
pub fn derive_project_key<F>(project_name: &str, mut key_exists: F) -> Result<String, AppError>
where
    F: FnMut(&str) -> Result<bool, AppError>,
{
    let cleaned = clean_project_name(project_name);
    if cleaned.len() < KEY_LENGTH {
        return Err(AppError::ProjectNameTooShort(project_name.to_string()));
    }

    for start in 0..=cleaned.len() - KEY_LENGTH {
        let candidate = &cleaned[start..start + KEY_LENGTH];
        if !key_exists(candidate)? {
            return Ok(candidate.to_string());
        }
    }

    Err(AppError::CouldNotSetProjectKey(project_name.to_string()))
}
