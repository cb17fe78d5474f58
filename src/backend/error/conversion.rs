/**
 * Error Conversion
 *
 * Turns request errors into the two things a handler emits for them: one
 * response envelope and one log entry.
 *
 * # Response Format
 *
 * - Validation: `400` with the field error list as the body
 * - Everything else: `500 {"message": <error>}`, or the generic
 *   `500 {"message": "internal server error"}` when detail must stay hidden
 *
 * # Log Format
 *
 * An error carrying a provider response is logged as `[status, body]`;
 * anything else is logged as the error itself.
 */
use serde_json::{json, Value};

use crate::backend::dispatch::{LogEntry, ResponseEnvelope};
use crate::backend::effects::EffectError;
use crate::backend::error::types::RequestError;
use crate::backend::folders::StorageError;
use crate::shared::error::SharedError;

impl RequestError {
    /// Envelope that exposes the error message to the caller
    pub fn to_envelope(&self) -> ResponseEnvelope {
        match self {
            Self::Validation(errors) => ResponseEnvelope::new(
                self.status_code(),
                serde_json::to_value(errors).unwrap_or(Value::Array(Vec::new())),
            ),
            _ => ResponseEnvelope::message(self.status_code(), self.to_string()),
        }
    }

    /// Envelope that reveals nothing about the cause beyond the status
    pub fn to_opaque_envelope(&self) -> ResponseEnvelope {
        match self {
            Self::Validation(_) => self.to_envelope(),
            _ => ResponseEnvelope::internal_error(),
        }
    }

    /// The log entry for this error
    pub fn log_entry(&self) -> LogEntry {
        match self.response() {
            Some(response) => LogEntry::error([json!(response.status), response.body.clone()]),
            None => LogEntry::error([self.to_string()]),
        }
    }
}

impl From<&RequestError> for ResponseEnvelope {
    fn from(error: &RequestError) -> Self {
        error.to_envelope()
    }
}

impl From<SharedError> for RequestError {
    fn from(error: SharedError) -> Self {
        let SharedError::ValidationError { errors } = error;
        Self::Validation(errors)
    }
}

impl From<StorageError> for EffectError {
    fn from(error: StorageError) -> Self {
        EffectError::Storage(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::http::{HttpCallError, HttpResponse};
    use crate::shared::error::FieldError;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_envelope_lists_fields() {
        let error = RequestError::Validation(vec![
            FieldError::required("data.code"),
            FieldError::wrong_type("data.state"),
        ]);
        let envelope = error.to_opaque_envelope();

        assert_eq!(envelope.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            envelope.body,
            json!([
                { "field": "data.code", "message": "is required" },
                { "field": "data.state", "message": "is the wrong type" }
            ])
        );
    }

    #[test]
    fn test_from_shared_validation_error() {
        let error = RequestError::from(SharedError::validation(vec![FieldError::required("data")]));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_effect_envelope_exposes_message() {
        let error = RequestError::from(EffectError::Storage("connection reset".into()));
        let envelope = ResponseEnvelope::from(&error);

        assert_eq!(envelope.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.body, json!({ "message": "storage error: connection reset" }));
    }

    #[test]
    fn test_opaque_envelope_hides_detail() {
        let error = RequestError::upstream("GET_USER", HttpResponse::new(500, json!("boom")));
        assert_eq!(error.to_opaque_envelope(), ResponseEnvelope::internal_error());
    }

    #[test]
    fn test_log_entry_uses_status_and_body() {
        let error = RequestError::upstream(
            "GET_USER",
            HttpResponse::new(401, json!({ "message": "Bad credentials" })),
        );
        assert_eq!(
            error.log_entry(),
            LogEntry::error([json!(401), json!({ "message": "Bad credentials" })])
        );

        let error = RequestError::from(HttpCallError::new("GET_USER", "timed out"));
        assert_eq!(error.log_entry().render(), "GET_USER call failed: timed out");
    }
}
