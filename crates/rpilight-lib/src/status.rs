//! Call outcome of a service method, as seen by the caller.
//!
//! [`Status::ServiceSpecific`] carries application-defined failures; the other
//! variants are transport-level and never produced by the LED handler itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error side of a service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Application-defined error code plus a human-readable cause.
    ServiceSpecific { code: i32, message: String },
    /// The request named a method or interface this service does not implement.
    UnknownTransaction(String),
    /// The request payload could not be decoded.
    BadRequest(String),
    /// The service could not be reached or hung up mid-call.
    DeadObject(String),
}

impl Status {
    pub fn service_specific(code: i32, message: impl Into<String>) -> Self {
        Status::ServiceSpecific {
            code,
            message: message.into(),
        }
    }

    /// The application error code, if this is a service-specific error.
    pub fn service_specific_code(&self) -> Option<i32> {
        match self {
            Status::ServiceSpecific { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::ServiceSpecific { code, message } => {
                write!(f, "Service-specific error {code}: {message}")
            }
            Status::UnknownTransaction(e) => write!(f, "Unknown transaction: {e}"),
            Status::BadRequest(e) => write!(f, "Bad request: {e}"),
            Status::DeadObject(e) => write!(f, "Service unreachable: {e}"),
        }
    }
}

impl std::error::Error for Status {}

/// Result of a service method.
pub type StatusResult<T> = std::result::Result<T, Status>;
