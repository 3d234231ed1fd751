//! Error handling for the flock crate
//!
//! One top-level [`FlockError`] wraps the per-concern error enums so callers
//! can `?` across form, search, config and API boundaries.

use flock_types::{HierarchyField, MemberKind, ParseRoleError, SearchQueryError};
use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum FlockError {
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Search error: {0}")]
    Search(#[from] SearchQueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Role error: {0}")]
    Role(#[from] ParseRoleError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Member update form misuse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form is locked after a promotion; reset it to edit again")]
    Locked,

    #[error("no member record loaded yet")]
    NotLoaded,

    #[error("{kind} update form has no promote action")]
    NoPromotion { kind: MemberKind },

    #[error("{kind} update form cannot load a {found} record")]
    KindMismatch { kind: MemberKind, found: MemberKind },

    #[error("{kind} update form has no '{}' field", .field.as_str())]
    UnknownField {
        kind: MemberKind,
        field: HierarchyField,
    },
}

/// Missing or malformed environment configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} environment variable not set")]
    Missing { key: &'static str },

    #[error("{key}='{value}' is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failed REST call. `message` is the user-facing text from the status table.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message} (HTTP {status})")]
    Status {
        status: u16,
        message: &'static str,
        requires_logout: bool,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP 401 ends the session
    pub fn requires_logout(&self) -> bool {
        matches!(
            self,
            ApiError::Status {
                requires_logout: true,
                ..
            }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Url(_) => None,
        }
    }
}

/// Result type aliases for convenience
pub type Result<T> = std::result::Result<T, FlockError>;
pub type FormResult<T> = std::result::Result<T, FormError>;
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_messages_name_the_tier() {
        let err = FormError::UnknownField {
            kind: MemberKind::Pastor,
            field: HierarchyField::TheirZone,
        };
        assert_eq!(err.to_string(), "pastor update form has no 'theirZone' field");

        let err: FlockError = FormError::NoPromotion {
            kind: MemberKind::Preacher,
        }
        .into();
        assert!(err.to_string().starts_with("Form error: preacher"));
    }

    #[test]
    fn test_only_unauthorized_status_requires_logout() {
        let unauthorized = ApiError::Status {
            status: 401,
            message: "session expired",
            requires_logout: true,
            body: String::new(),
        };
        assert!(unauthorized.requires_logout());
        assert_eq!(unauthorized.status(), Some(401));

        let not_found = ApiError::Status {
            status: 404,
            message: "not found",
            requires_logout: false,
            body: String::new(),
        };
        assert!(!not_found.requires_logout());
    }
}
