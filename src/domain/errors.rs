use thiserror::Error;
use uuid::Uuid;

use crate::domain::access_policy::{Operation, Resource};

/// Failures the stores and views report to callers.
///
/// Use cases return `anyhow::Result`; these values sit at the root of the
/// chain so a caller can `downcast_ref::<SalesError>()` to tell them apart
/// from storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SalesError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: Uuid },

    #[error("{operation} on {resource} is not permitted")]
    Unauthorized {
        resource: Resource,
        operation: Operation,
    },
}

impl SalesError {
    pub fn validation(message: impl Into<String>) -> Self {
        SalesError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SalesError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SalesError::NotFound { .. })
    }
}
