use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body shared by every endpoint; `message` is an i18n code.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn json(name: &str, message: &str) -> Json<Self> {
        Json(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
