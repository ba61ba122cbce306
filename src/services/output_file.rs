use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, RunOutput};

/// Write the run output as pretty JSON to `dir/file_name`, creating `dir` if needed.
pub fn write_run_output(
    dir: &Path,
    file_name: &str,
    output: &RunOutput,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let content = serde_json::to_string_pretty(output)
        .map_err(|e| AppError::parse_error("run output", e))?;
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "Run output written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OUTPUT_FILE_NAME;

    #[test]
    fn writes_created_repository() {
        let dir = tempfile::tempdir().unwrap();
        let output = RunOutput::created_repository("https://github.com/acme/svc.git");

        let path = write_run_output(&dir.path().join("out"), OUTPUT_FILE_NAME, &output).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["outputs"]["created_repository"], "https://github.com/acme/svc.git");
    }
}
