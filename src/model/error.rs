use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct AuthenticationErrorResponse {
    pub error: AuthenticationErrorKind,
    #[serde(default)]
    pub error_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ApiError {
    #[allow(dead_code)]
    pub status: u16,
    pub message: ApiErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationErrorKind {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnauthorizedClient,
    UnsupportedGrantType,
    InvalidScope,

    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub(crate) enum ApiErrorMessage {
    TokenExpired,
    InvalidToken,

    Other(String),
}

impl AuthenticationErrorResponse {
    pub fn into_unhandled_error(self) -> Error {
        Error::UnhandledAuthenticationError(self.error, self.error_description)
    }
}

impl From<String> for ApiErrorMessage {
    fn from(message: String) -> Self {
        match message.as_str() {
            "The access token expired" | "Token expired" => ApiErrorMessage::TokenExpired,
            "Invalid access token" => ApiErrorMessage::InvalidToken,

            _ => ApiErrorMessage::Other(message),
        }
    }
}
