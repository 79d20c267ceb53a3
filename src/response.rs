//! Uniform API response envelope.
//!
//! Every JSON-returning endpoint wraps its payload in [`ApiResponse`]. The
//! envelope carries a success flag, a business status code and a human
//! message alongside the optional payload, so clients can always parse the
//! same shape regardless of outcome. Envelopes are built fresh per response
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::codes::ResultCode;

/// Generic success/failure wrapper serialized as
/// `{"success": bool, "code": int, "message": string, "result": T|null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            code: ResultCode::Success.code(),
            message: String::new(),
            result: Some(data),
        }
    }

    /// Success envelope with a message and no payload.
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ResultCode::Success.code(),
            message: message.into(),
            result: None,
        }
    }

    /// Failure envelope. The business status travels here; the transport
    /// status stays 200.
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_wraps_payload() {
        let envelope = ApiResponse::ok(vec![1, 2, 3]);
        assert!(envelope.success);
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.result, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_ok_message_has_no_payload() {
        let envelope = ApiResponse::<()>::ok_message("done");
        assert!(envelope.success);
        assert_eq!(envelope.message, "done");
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_error_envelope() {
        let envelope = ApiResponse::<()>::error(502, "business exception");
        assert!(!envelope.success);
        assert_eq!(envelope.code, 502);
        assert_eq!(envelope.message, "business exception");
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_wire_shape() {
        let envelope = ApiResponse::<()>::error(500, "error");
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "code": 500,
                "message": "error",
                "result": null,
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        let envelope = ApiResponse::ok("payload".to_string());
        let json = serde_json::to_string(&envelope).expect("serialize");
        let restored: ApiResponse<String> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(envelope, restored);
    }
}
