//! GraphQL response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Top-level JSON returned by a GraphQL endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of the envelope's `errors` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

impl std::fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = self.path.as_ref().filter(|p| !p.is_empty()) {
            let segments: Vec<String> = path
                .iter()
                .map(|s| match s {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            write!(f, " (at {})", segments.join("."))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("{}", .messages.join("; "))]
    Upstream { messages: Vec<String> },

    #[error("Response carried neither data nor errors")]
    MissingData,
}

impl GraphQlResponse {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Extract `data[operation]`.
    ///
    /// Any error entry aborts extraction, even when `data` is partially
    /// populated. A missing operation field yields `Value::Null`.
    pub fn into_operation_result(self, operation: &str) -> Result<Value, EnvelopeError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(EnvelopeError::Upstream {
                messages: errors.iter().map(ToString::to_string).collect(),
            });
        }

        match self.data {
            Some(Value::Object(mut data)) => Ok(data.remove(operation).unwrap_or(Value::Null)),
            Some(Value::Null) | None => Err(EnvelopeError::MissingData),
            Some(_) => Err(EnvelopeError::MissingData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_operation_field() {
        let response: GraphQlResponse =
            serde_json::from_value(json!({"data": {"getOrder": {"order_num": "1"}}})).unwrap();

        assert!(!response.has_errors());
        assert_eq!(
            response.into_operation_result("getOrder").unwrap(),
            json!({"order_num": "1"})
        );
    }

    #[test]
    fn test_errors_abort_even_with_partial_data() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": {"getOrderList": {"data": [{"id": 1}]}},
            "errors": [
                {"message": "Field 'x' not found", "path": ["getOrderList", 0, "x"]},
                {"message": "Second"}
            ]
        }))
        .unwrap();

        let err = response.into_operation_result("getOrderList").unwrap_err();
        assert_eq!(err.to_string(), "Field 'x' not found (at getOrderList.0.x); Second");
    }

    #[test]
    fn test_empty_errors_is_success() {
        let response: GraphQlResponse =
            serde_json::from_value(json!({"data": {"listCurrencies": []}, "errors": []})).unwrap();
        assert_eq!(response.into_operation_result("listCurrencies").unwrap(), json!([]));
    }

    #[test]
    fn test_missing_data() {
        let response: GraphQlResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(
            response.into_operation_result("getOrder").unwrap_err(),
            EnvelopeError::MissingData
        );
    }

    #[test]
    fn test_absent_operation_is_null() {
        let response: GraphQlResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        assert_eq!(response.into_operation_result("getOrder").unwrap(), Value::Null);
    }
}
