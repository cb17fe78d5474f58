/**
 * Body Validation
 *
 * Checks that a JSON body is an object carrying the listed string fields.
 * Every failing field is reported, not just the first. Paths are rooted at
 * `data`, so a missing `code` is reported as `data.code` and a body that is
 * not an object at all as `data`.
 */
use serde_json::Value;

use crate::shared::error::{FieldError, SharedError};

/// Extract the required string `fields` from `body`, in order
pub fn require_strings(body: &Value, fields: &[&str]) -> Result<Vec<String>, SharedError> {
    let object = match body {
        Value::Object(object) => object,
        Value::Null => return Err(SharedError::validation(vec![FieldError::required("data")])),
        _ => return Err(SharedError::validation(vec![FieldError::wrong_type("data")])),
    };

    let mut values = Vec::with_capacity(fields.len());
    let mut errors = Vec::new();

    for field in fields {
        let path = format!("data.{}", field);
        match object.get(*field) {
            Some(Value::String(value)) => values.push(value.clone()),
            None | Some(Value::Null) => errors.push(FieldError::required(path)),
            Some(_) => errors.push(FieldError::wrong_type(path)),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(SharedError::validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field_errors(result: Result<Vec<String>, SharedError>) -> Vec<FieldError> {
        match result {
            Err(SharedError::ValidationError { errors }) => errors,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_all_fields_present() {
        let body = json!({ "code": "c", "state": "s", "extra": 1 });
        assert_eq!(
            require_strings(&body, &["code", "state"]).unwrap(),
            vec!["c".to_string(), "s".to_string()]
        );
    }

    #[test]
    fn test_reports_every_failing_field() {
        let body = json!({ "code": 42, "redirectUrl": null });
        assert_eq!(
            field_errors(require_strings(&body, &["code", "state", "redirectUrl"])),
            vec![
                FieldError::wrong_type("data.code"),
                FieldError::required("data.state"),
                FieldError::required("data.redirectUrl"),
            ]
        );
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            field_errors(require_strings(&Value::Null, &["name"])),
            vec![FieldError::required("data")]
        );
        assert_eq!(
            field_errors(require_strings(&json!(["name"]), &["name"])),
            vec![FieldError::wrong_type("data")]
        );
    }
}
