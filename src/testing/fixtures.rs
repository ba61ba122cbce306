use std::path::PathBuf;

use url::Url;

use crate::domain::{
    AzurePolling, Endpoints, Inputs, ProviderKind, SetupConfig, ToolConfig, Visibility,
};

/// Inputs with every field a provider may need filled in.
pub fn inputs_for(provider: ProviderKind) -> Inputs {
    let (org_name, repo_name, project_name) = match provider {
        ProviderKind::Github => ("acme", "svc", None),
        ProviderKind::Gitlab => ("platform", "svc", None),
        ProviderKind::Bitbucket => ("team", "svc", Some("My Java App")),
        ProviderKind::Azure => ("contoso", "svc", Some("platform")),
    };

    Inputs {
        provider,
        org_name: org_name.to_string(),
        token: "tok".to_string(),
        repo_name: repo_name.to_string(),
        project_name: project_name.map(str::to_string),
        subgroup: None,
        visibility: Visibility::Private,
        create_repo: true,
        client_key: None,
        client_secret: None,
        github_pat: None,
        use_self_hosted_pool: None,
        self_hosted_pool_name: None,
        component_path: PathBuf::from("component"),
        target_path: PathBuf::from("target"),
        ref_branch: "setup-scm-1".to_string(),
    }
}

/// Every vendor pointed at one mock server, no sleeps.
pub fn test_config(server_url: &str) -> ToolConfig {
    let base = Url::parse(server_url).expect("mock server URL");
    ToolConfig {
        endpoints: Endpoints::single_host(&base),
        azure: AzurePolling { poll_attempts: 15, poll_interval_ms: 0 },
        setup: SetupConfig { settle_delay_ms: 0, ..SetupConfig::default() },
        ..ToolConfig::default()
    }
}
