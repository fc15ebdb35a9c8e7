//! Error types for task store operations.

use thiserror::Error;

use crate::model::draft::Field;
use crate::model::task::TaskId;

/// A submission was attempted with required fields left empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all fields")]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

impl ValidationError {
    pub fn new(missing: Vec<Field>) -> Self {
        Self { missing }
    }
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Task {0} not found")]
    NotFound(TaskId),

    #[error("No task is being edited")]
    NotEditing,

    #[error("Repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

impl TaskError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
