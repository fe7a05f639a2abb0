//! Response Envelope
//!
//! Every JSON response shares one shape:
//! `{ "message": <translated>, "data": <payload or null>, "error": <detail or null> }`.

use serde::Serialize;

use crate::error::kind::ErrorKind;
use crate::i18n::Message;

/// Wire shape shared by success and error responses
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

/// Machine-readable error detail
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub status: u16,
    /// Untranslated message key, stable across locales
    pub key: String,
}

/// Successful API response
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::ok("success.USER.LOGIN", serde_json::json!({ "id": 1 }));
/// assert_eq!(res.status_code(), 200);
/// ```
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: u16,
    message: Message,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 with a payload
    pub fn ok(message: impl Into<Message>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 201 with a payload
    pub fn created(message: impl Into<Message>, data: T) -> Self {
        Self {
            status: 201,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl ApiResponse<()> {
    /// 200 with `data: null`
    pub fn message_only(message: impl Into<Message>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn into_envelope(self) -> Envelope<T> {
        Envelope {
            message: self.message.translate(),
            data: self.data,
            error: None,
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.status).unwrap_or(http::StatusCode::OK);
        (status, axum::Json(self.into_envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let res = ApiResponse::created("success.USER.CREATED", serde_json::json!({ "id": "u1" }));
        assert_eq!(res.status_code(), 201);

        let json = serde_json::to_value(res.into_envelope()).unwrap();
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["data"]["id"], "u1");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_message_only_has_null_data() {
        let res = ApiResponse::message_only("success.USER.LOGOUT");
        assert!(res.data().is_none());

        let json = serde_json::to_value(res.into_envelope()).unwrap();
        assert_eq!(json["message"], "Logout successful");
        assert!(json["data"].is_null());
    }
}
