//! Explicit validation of the `{status, data|message}` envelopes returned by
//! the API, producing a tagged outcome instead of a generic error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

pub const SUCCESS: &str = "success";

/// Outcome of validating one response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// `status == "success"` and the payload field has the expected shape.
    Success(T),
    /// Any other status; the collaborator's message is kept verbatim.
    Rejected { status: String, message: String },
    /// Not an object, or a success whose payload does not match.
    Malformed(String),
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Validates raw response bytes, reading the payload from `field`.
    pub fn parse(bytes: &[u8], field: &str) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(value, field),
            Err(e) => Envelope::Malformed(format!("invalid JSON: {e}")),
        }
    }

    pub fn from_value(value: Value, field: &str) -> Self {
        let Value::Object(mut object) = value else {
            return Envelope::Malformed("expected a JSON object".to_string());
        };

        let status = object
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if status != SUCCESS {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("statut '{status}'"));
            return Envelope::Rejected { status, message };
        }

        match object.remove(field) {
            None | Some(Value::Null) => Envelope::Malformed(format!("missing '{field}'")),
            Some(payload) => match serde_json::from_value::<T>(payload) {
                Ok(data) => Envelope::Success(data),
                Err(e) => Envelope::Malformed(format!("'{field}' has an unexpected shape: {e}")),
            },
        }
    }
}

impl<T> Envelope<T> {
    /// Collapses the outcome, tagging malformed payloads with `context`.
    pub fn into_result(self, context: &str) -> Result<T, AppError> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Rejected { message, .. } => Err(AppError::Rejected { message }),
            Envelope::Malformed(reason) => Err(AppError::malformed(context, reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Thematique;
    use serde_json::json;

    #[test]
    fn test_success_with_list() {
        let env: Envelope<Vec<Thematique>> = Envelope::from_value(
            json!({"status": "success", "data": [{"id": "x", "titre": "T"}]}),
            "data",
        );
        match env {
            Envelope::Success(items) => assert_eq!(items[0].title.as_deref(), Some("T")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_data_not_a_list_is_malformed() {
        let env: Envelope<Vec<Thematique>> =
            Envelope::from_value(json!({"status": "success", "data": {"id": "x"}}), "data");
        assert!(matches!(env, Envelope::Malformed(_)));
    }

    #[test]
    fn test_other_status_is_rejected_with_message() {
        let env: Envelope<String> =
            Envelope::from_value(json!({"status": "error", "message": "Message vide"}), "message");
        assert_eq!(
            env,
            Envelope::Rejected { status: "error".into(), message: "Message vide".into() }
        );
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let env: Envelope<String> = Envelope::from_value(json!({"message": "hm"}), "message");
        assert!(matches!(env, Envelope::Rejected { .. }));
    }

    #[test]
    fn test_bare_array_and_garbage_are_malformed() {
        let env: Envelope<Vec<Thematique>> = Envelope::parse(b"[]", "data");
        assert!(matches!(env, Envelope::Malformed(_)));
        let env: Envelope<Vec<Thematique>> = Envelope::parse(b"<html>", "data");
        assert!(env.into_result("catalog").unwrap_err().is_malformed());
    }
}
