//! Metadata (JSON or YAML) handed over by the automation runner.

use std::fs;
use std::path::{self, Path, PathBuf};

use crate::domain::{AppError, Inputs, Metadata, generate_ref_branch};

/// CLI values that take precedence over the metadata paths.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub component_path: Option<PathBuf>,
    pub target_path: Option<PathBuf>,
}

/// Read and parse the metadata file. JSON is accepted as a YAML subset.
pub fn load_metadata(path: &Path) -> Result<Metadata, AppError> {
    if !path.is_file() {
        return Err(AppError::invalid_inputs(format!(
            "Metadata file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let metadata: Metadata = serde_yaml::from_str(&content)?;
    Ok(metadata)
}

/// Load, validate and freeze the run inputs.
///
/// Paths are made absolute against the process working directory. A fresh
/// `ref_branch` is generated for every call.
pub fn load_inputs(path: &Path, overrides: PathOverrides) -> Result<Inputs, AppError> {
    let metadata = load_metadata(path)?;
    let component_path = overrides
        .component_path
        .or(metadata.component_path)
        .unwrap_or_else(|| PathBuf::from("."));
    let target_path =
        overrides.target_path.or(metadata.target_path).unwrap_or_else(|| PathBuf::from("."));
    metadata.inputs.into_inputs(
        path::absolute(component_path)?,
        path::absolute(target_path)?,
        generate_ref_branch(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProviderKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_json_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "metadata.json",
            r#"{"component_path": "/tmp/component", "target_path": "/tmp/target",
                "inputs": {"provider": "github", "org": "acme", "token": "tok", "repo_name": "svc", "create_repo": "true"}}"#,
        );

        let inputs = load_inputs(&path, PathOverrides::default()).unwrap();

        assert_eq!(inputs.provider, ProviderKind::Github);
        assert_eq!(inputs.org_name, "acme");
        assert!(inputs.create_repo);
        assert_eq!(inputs.component_path, PathBuf::from("/tmp/component"));
        assert!(inputs.ref_branch.starts_with("setup-scm-"));
    }

    #[test]
    fn reads_yaml_metadata_with_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "metadata.yaml",
            "component_path: /tmp/component\ninputs:\n  provider: Gitlab\n  group: platform\n  pat: tok\n  project_name: svc\n",
        );
        let overrides = PathOverrides {
            component_path: Some(PathBuf::from("/opt/component")),
            target_path: None,
        };

        let inputs = load_inputs(&path, overrides).unwrap();

        assert_eq!(inputs.repo_name, "svc");
        assert_eq!(inputs.component_path, PathBuf::from("/opt/component"));
        assert_eq!(inputs.target_path, std::env::current_dir().unwrap());
    }

    #[test]
    fn relative_component_path_becomes_absolute() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "metadata.yaml",
            "component_path: components/java\ninputs:\n  provider: Github\n  org: acme\n  token: tok\n  repo_name: svc\n",
        );

        let inputs = load_inputs(&path, PathOverrides::default()).unwrap();

        assert!(inputs.component_path.is_absolute());
        assert_eq!(inputs.component_path, std::env::current_dir().unwrap().join("components/java"));
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let err = load_metadata(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInputs(_)));
    }

    #[test]
    fn malformed_metadata_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "metadata.yaml", "inputs: [unterminated");
        let err = load_metadata(&path).unwrap_err();
        assert!(matches!(err, AppError::YamlParseError(_)));
    }
}
