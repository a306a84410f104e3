//! HTTP-flavoured reply types. Status codes are a signalling convention only;
//! nothing here touches a network.

use std::fmt;

use serde::{Deserialize, Serialize};

use gudoai_core::ProjectId;

/// The subset of HTTP status codes the registry answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    Created,
    BadRequest,
    NotFound,
    Conflict,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::Conflict => 409,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::Conflict => "Conflict",
        }
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

/// A successful reply: status plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: T,
}

/// A rejected call. Serializes as the `{"error": "..."}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{status}: {error}")]
pub struct RegistryError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl RegistryError {
    pub(crate) fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

/// Outcome of one registry call. Rejections are values, never panics or fatal errors.
pub type ApiResponse<T> = Result<Reply<T>, RegistryError>;

/// Body of a `201 Created` registration reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAck {
    pub message: String,
    pub registry_id: ProjectId,
}

/// Body of a `200 OK` sync reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAck {
    pub message: String,
    pub last_synced_commit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_has_code_and_reason() {
        assert_eq!(StatusCode::Conflict.to_string(), "409 Conflict");
        assert_eq!(StatusCode::Created.as_u16(), 201);
    }

    #[test]
    fn only_2xx_is_success() {
        assert!(StatusCode::Ok.is_success());
        assert!(StatusCode::Created.is_success());
        assert!(!StatusCode::BadRequest.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }

    #[test]
    fn rejection_serializes_as_error_payload() {
        let err = RegistryError::new(StatusCode::NotFound, "Project not found");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json, serde_json::json!({ "error": "Project not found" }));
        assert_eq!(err.to_string(), "404 Not Found: Project not found");
    }
}
