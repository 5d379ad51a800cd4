use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CourseId, CourseOfferingId, CourseTypeId};

/// A delete the store refused because dependent rows still reference the
/// target. The store state is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Cannot delete this course type because it is used in course offerings.")]
    CourseTypeInUse { id: CourseTypeId, offerings: usize },
    #[error("Cannot delete this course because it is used in course offerings.")]
    CourseInUse { id: CourseId, offerings: usize },
    #[error("Cannot delete this course offering because it has student registrations.")]
    OfferingHasRegistrations {
        id: CourseOfferingId,
        registrations: usize,
    },
}

impl Rejection {
    /// Number of dependent rows blocking the delete.
    pub fn dependents(&self) -> usize {
        match self {
            Rejection::CourseTypeInUse { offerings, .. } => *offerings,
            Rejection::CourseInUse { offerings, .. } => *offerings,
            Rejection::OfferingHasRegistrations { registrations, .. } => *registrations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Form input was rejected before any command was dispatched.
    Validation,
    NotFound,
    /// The store refused a delete that would orphan dependent rows.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn is_blocked(&self) -> bool {
        self.code == ErrorCode::Blocked
    }
}

impl From<Rejection> for ApiError {
    fn from(value: Rejection) -> Self {
        Self::new(ErrorCode::Blocked, value.to_string())
    }
}
