//! Terminal run outcome returned to the invoking scheduler.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Status code and serialized body of a finished run.
///
/// Mirrors the API-Gateway-style invocation response: `body` is itself a JSON
/// document, `{"message": …}` on success and `{"error": …}` on failure. Never
/// retried in-process; the scheduler retries whole runs on future ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOutcome {
    /// 200 on full success, 500 on any failure
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// JSON-encoded message or error body
    pub body: String,
}

impl RunOutcome {
    /// Successful run.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: json!({ "message": message.into() }).to_string(),
        }
    }

    /// Failed run with a best-effort error string.
    pub fn failure(error: impl ToString) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": error.to_string() }).to_string(),
        }
    }

    /// Render as the invocation response value.
    pub fn into_response(self) -> Value {
        json!({ "statusCode": self.status_code, "body": self.body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let outcome = RunOutcome::success("Scraping and upload completed");
        assert_eq!(outcome.status_code, 200);

        let body: Value = serde_json::from_str(&outcome.body).unwrap();
        assert_eq!(body["message"], "Scraping and upload completed");
    }

    #[test]
    fn test_failure_shape() {
        let outcome = RunOutcome::failure("Validation error: row length mismatch");
        assert_eq!(outcome.status_code, 500);

        let body: Value = serde_json::from_str(&outcome.body).unwrap();
        assert_eq!(body["error"], "Validation error: row length mismatch");
    }

    #[test]
    fn test_into_response() {
        let response = RunOutcome::success("done").into_response();
        assert_eq!(response["statusCode"], 200);
        assert!(response["body"].is_string());
    }
}
