use crate::error::{Error, Result};

/// A decoded response that carries an embedded status code.
///
/// The HTTP status of a response only tells whether the request reached the
/// other side. Whether the command was accepted is reported in the body:
/// `error_code` for device commands, `ReturnCode` for cloud lookups.
pub trait ResponseStatus {
    /// The raw status code. Zero means success.
    fn status_code(&self) -> i64;

    /// Human readable message, if the response carries one.
    fn status_message(&self) -> Option<&str> {
        None
    }

    fn is_ok(&self) -> bool {
        self.status_code() == 0
    }

    /// Converts a non-zero status into [`Error::Protocol`] naming `operation`.
    fn check(self, operation: &str) -> Result<Self>
    where
        Self: Sized,
    {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(Error::Protocol {
                operation: operation.to_string(),
                code: self.status_code(),
                message: self.status_message().map(str::to_string),
            })
        }
    }
}

/// Code reported for a status field that is present but not a whole number.
pub const UNPARSEABLE_STATUS: i64 = -1;

impl ResponseStatus for serde_json::Value {
    fn status_code(&self) -> i64 {
        match status_field(self) {
            None | Some(serde_json::Value::Null) => 0,
            Some(serde_json::Value::Number(number)) => number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .unwrap_or(UNPARSEABLE_STATUS),
            Some(serde_json::Value::String(text)) => {
                text.trim().parse().unwrap_or(UNPARSEABLE_STATUS)
            }
            Some(_) => UNPARSEABLE_STATUS,
        }
    }

    fn status_message(&self) -> Option<&str> {
        self.get("ReturnMessage")
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                // Firmware rejects malformed requests with a text error_code.
                status_field(self)
                    .and_then(serde_json::Value::as_str)
                    .filter(|text| text.trim().parse::<i64>().is_err())
            })
    }
}

fn status_field(value: &serde_json::Value) -> Option<&serde_json::Value> {
    value.get("error_code").or_else(|| value.get("ReturnCode"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_code_counts_as_ok() {
        assert!(json!({ "SelectIndex": 2 }).is_ok());
        assert!(json!({ "error_code": null }).is_ok());
        assert!(json!({ "error_code": 0 }).is_ok());
        assert!(json!({ "error_code": 0.0 }).is_ok());
        assert!(json!({ "error_code": "0" }).is_ok());
    }

    #[test]
    fn test_check_carries_code_and_message() {
        let err = json!({ "ReturnCode": 3, "ReturnMessage": "busy" })
            .check("find devices")
            .unwrap_err();
        assert_eq!(err.code(), Some(3));
        assert!(err.to_string().contains("busy"));

        let err = json!({ "error_code": 5 })
            .check("Draw/SendHttpGif")
            .unwrap_err();
        assert_eq!(err.code(), Some(5));
    }

    #[test]
    fn test_text_error_code_is_a_failure() {
        let err = json!({ "error_code": "Request data illegal json" })
            .check("Channel/SetBrightness")
            .unwrap_err();
        assert_eq!(err.code(), Some(UNPARSEABLE_STATUS));
        assert!(err.to_string().contains("Request data illegal json"));

        let err = json!({ "error_code": "7" }).check("Channel/SetBrightness").unwrap_err();
        assert_eq!(err.code(), Some(7));
    }

    #[test]
    fn test_float_error_code_is_a_failure() {
        let err = json!({ "error_code": 5.0 }).check("Channel/SetBrightness").unwrap_err();
        assert_eq!(err.code(), Some(5));

        let err = json!({ "error_code": 0.5 }).check("Channel/SetBrightness").unwrap_err();
        assert_eq!(err.code(), Some(UNPARSEABLE_STATUS));

        let err = json!({ "error_code": [1] }).check("Channel/SetBrightness").unwrap_err();
        assert_eq!(err.code(), Some(UNPARSEABLE_STATUS));
    }
}
