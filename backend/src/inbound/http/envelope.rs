//! Success envelope shared by every JSON endpoint.
//!
//! Serialises as `{"success": true, "data": ..., "message": ...}` with absent
//! members omitted. Failures use
//! [`ErrorEnvelope`](crate::inbound::http::error::ErrorEnvelope).

use serde::Serialize;

/// Successful response body.
///
/// # Examples
/// ```
/// use pressroom::inbound::http::envelope::ApiResponse;
/// use serde_json::json;
///
/// let body = ApiResponse::data(json!({"id": 1})).with_message("Post created successfully");
/// assert_eq!(
///     serde_json::to_value(&body).expect("serialises"),
///     json!({"success": true, "data": {"id": 1}, "message": "Post created successfully"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Attach a human-readable confirmation.
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl ApiResponse<()> {
    /// A payload-free confirmation.
    pub fn message(message: &'static str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message),
        }
    }
}
