//! "Already exists" response shapes, one literal policy per vendor endpoint.
//!
//! Vendors signal conflicts with different status codes and bodies. Each
//! policy matches the exact payload the vendor was observed to return; wording
//! changes on the vendor side will make the match fail and the error propagate.

use serde_json::{Value, json};

/// GitHub repository creation: 422 with exactly the "name already exists" error.
pub fn github_repository_exists(status: u16, body: &Value) -> bool {
    status == 422
        && body.get("errors")
            == Some(&json!([{
                "resource": "Repository",
                "code": "custom",
                "field": "name",
                "message": "name already exists on this account",
            }]))
}

const GITLAB_TAKEN: &str = "has already been taken";
const GITLAB_CONFLICT_FIELDS: [&str; 3] = ["name", "path", "project_namespace.name"];

/// GitLab project creation: 400 whose `message` only reports taken name/path fields.
pub fn gitlab_project_exists(status: u16, body: &Value) -> bool {
    if status != 400 {
        return false;
    }
    let Some(fields) = body.get("message").and_then(Value::as_object) else {
        return false;
    };
    if !(fields.contains_key("name") || fields.contains_key("path")) {
        return false;
    }
    fields.iter().all(|(field, errors)| {
        GITLAB_CONFLICT_FIELDS.contains(&field.as_str()) && errors == &json!([GITLAB_TAKEN])
    })
}

/// Azure pipeline creation reports a duplicate name with 409.
pub fn azure_pipeline_exists(status: u16) -> bool {
    status == 409
}

/// Azure service connection creation reports a duplicate as a 500 with a typed body.
pub fn azure_service_connection_exists(status: u16, body: &Value) -> bool {
    status == 500
        && body
            .get("typeName")
            .and_then(Value::as_str)
            .is_some_and(|name| name.contains("DuplicateServiceConnectionException"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_conflict_requires_exact_payload() {
        let body = json!({
            "message": "Repository creation failed.",
            "errors": [{
                "resource": "Repository",
                "code": "custom",
                "field": "name",
                "message": "name already exists on this account"
            }]
        });
        assert!(github_repository_exists(422, &body));
        assert!(!github_repository_exists(400, &body));

        let other_validation = json!({
            "errors": [{"resource": "Repository", "code": "invalid", "field": "visibility"}]
        });
        assert!(!github_repository_exists(422, &other_validation));
    }

    #[test]
    fn gitlab_conflict_accepts_name_only_body() {
        let body = json!({"message": {"name": ["has already been taken"]}});
        assert!(gitlab_project_exists(400, &body));
    }

    #[test]
    fn gitlab_conflict_accepts_full_taken_body() {
        let body = json!({"message": {
            "project_namespace.name": ["has already been taken"],
            "name": ["has already been taken"],
            "path": ["has already been taken"]
        }});
        assert!(gitlab_project_exists(400, &body));
    }

    #[test]
    fn gitlab_conflict_rejects_other_validation_errors() {
        let body = json!({"message": {"name": ["is too long"]}});
        assert!(!gitlab_project_exists(400, &body));

        let mixed = json!({"message": {
            "name": ["has already been taken"],
            "visibility_level": ["is not allowed"]
        }});
        assert!(!gitlab_project_exists(400, &mixed));
        assert!(!gitlab_project_exists(400, &json!({"message": "400 Bad request"})));
        assert!(!gitlab_project_exists(
            409,
            &json!({"message": {"name": ["has already been taken"]}})
        ));
    }

    #[test]
    fn azure_service_connection_duplicate() {
        let body = json!({
            "typeName": "Microsoft.VisualStudio.Services.ServiceEndpoints.WebApi.DuplicateServiceConnectionException, Microsoft.VisualStudio.Services.ServiceEndpoints.WebApi"
        });
        assert!(azure_service_connection_exists(500, &body));
        assert!(!azure_service_connection_exists(500, &json!({"typeName": "OtherException"})));
        assert!(azure_pipeline_exists(409));
        assert!(!azure_pipeline_exists(400));
    }
}
