//! Normalized outcome of one orchestrated call.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::FetchError;

/// Either the decoded response or the caught error plus fallback data.
///
/// `Success` only means the round trip completed and the body decoded. The
/// HTTP status is passed through untouched, so a 404 with a JSON body is a
/// `Success { status: 404, .. }`.
#[derive(Debug)]
pub enum FetchResult<D> {
    Success { status: u16, data: D },
    Failure { data: Option<D>, error: FetchError },
}

impl<D> FetchResult<D> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Transport status code, always 0 for failures.
    pub fn status(&self) -> u16 {
        match self {
            FetchResult::Success { status, .. } => *status,
            FetchResult::Failure { .. } => 0,
        }
    }

    pub fn data(&self) -> Option<&D> {
        match self {
            FetchResult::Success { data, .. } => Some(data),
            FetchResult::Failure { data, .. } => data.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn into_data(self) -> Option<D> {
        match self {
            FetchResult::Success { data, .. } => Some(data),
            FetchResult::Failure { data, .. } => data,
        }
    }
}

/// Serializes as `{"success", "status", "data", "error"}` with the error
/// rendered as its message.
impl<D: Serialize> Serialize for FetchResult<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchResult", 4)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("error", &self.error().map(|e| e.to_string()))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn success_serializes_with_null_error() {
        let result: FetchResult<Value> = FetchResult::Success {
            status: 201,
            data: json!({"id": "1"}),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "status": 201, "data": {"id": "1"}, "error": null})
        );
    }

    #[test]
    fn failure_reports_status_zero_and_fallback() {
        let result: FetchResult<Value> = FetchResult::Failure {
            data: Some(json!({"items": []})),
            error: FetchError::transport("connection refused"),
        };
        assert!(!result.is_success());
        assert_eq!(result.status(), 0);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": false,
                "status": 0,
                "data": {"items": []},
                "error": "transport error: connection refused"
            })
        );
    }

    #[test]
    fn failure_without_fallback_has_null_data() {
        let result: FetchResult<Value> = FetchResult::Failure {
            data: None,
            error: FetchError::Parse(serde_json::from_str::<Value>("").unwrap_err()),
        };
        assert_eq!(serde_json::to_value(&result).unwrap()["data"], Value::Null);
        assert_eq!(result.into_data(), None);
    }
}
