//! HTTP status to user-facing message table
//!
//! Every failed REST call surfaces one of these messages as a toast. A 401
//! additionally ends the session.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: &'static str,
    pub requires_logout: bool,
}

const fn entry(status: u16, message: &'static str) -> StatusMessage {
    StatusMessage {
        status,
        message,
        requires_logout: status == 401,
    }
}

pub const STATUS_MESSAGES: &[StatusMessage] = &[
    entry(400, "The request contains invalid data, check the form and try again"),
    entry(401, "Your session has expired, please sign in again"),
    entry(403, "You do not have permission to perform this action"),
    entry(404, "The requested record was not found"),
    entry(409, "The record conflicts with an existing one"),
    entry(422, "The record could not be processed"),
    entry(429, "Too many requests, wait a moment and try again"),
    entry(500, "Internal server error, contact the administrator"),
    entry(502, "The server is unreachable right now"),
    entry(503, "The service is temporarily unavailable"),
    entry(504, "The server took too long to respond"),
];

const FALLBACK_CLIENT: &str = "The request could not be completed";
const FALLBACK_SERVER: &str = "Unexpected server error, try again later";

/// Message for `status`, falling back by status class for unlisted codes
pub fn status_message(status: u16) -> StatusMessage {
    STATUS_MESSAGES
        .iter()
        .copied()
        .find(|m| m.status == status)
        .unwrap_or(StatusMessage {
            status,
            message: if status >= 500 {
                FALLBACK_SERVER
            } else {
                FALLBACK_CLIENT
            },
            requires_logout: false,
        })
}
