//! Response envelope shared by every operation outcome.
//!
//! An envelope carries either a payload or an error message, never both,
//! together with the time it was produced in epoch milliseconds.

use serde::{Deserialize, Serialize};

/// Open-ended key-value mapping used for metadata and parameter bags.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Uniform `{success, data | error, timestamp}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    timestamp: i64,
}

impl<T> Envelope<T> {
    /// Create a successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: now_millis(),
        }
    }

    /// Create a failed envelope with a human-readable message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: now_millis(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Epoch milliseconds at which the envelope was created.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Convert into a `Result`, yielding the payload or the error message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            (_, _, None) => Err("Envelope carries no payload".to_string()),
        }
    }
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_has_data_only() {
        let envelope = Envelope::ok(json!({"x": 1}));
        assert!(envelope.is_success());
        assert_eq!(envelope.data(), Some(&json!({"x": 1})));
        assert!(envelope.error().is_none());
        assert!(envelope.timestamp() > 0);
    }

    #[test]
    fn test_err_envelope_has_error_only() {
        let envelope: Envelope<String> = Envelope::err("boom");
        assert!(!envelope.is_success());
        assert!(envelope.data().is_none());
        assert_eq!(envelope.error(), Some("boom"));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let value = serde_json::to_value(Envelope::ok("hi")).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!("hi"));
        assert!(value.get("error").is_none());

        let value = serde_json::to_value(Envelope::<String>::err("nope")).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value.get("data").is_none());
        assert_eq!(value["error"], json!("nope"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Envelope::ok(3).into_result(), Ok(3));
        assert_eq!(
            Envelope::<i32>::err("bad").into_result(),
            Err("bad".to_string())
        );
    }
}
