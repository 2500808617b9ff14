use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error type for CategoryName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryNameError {
    #[error("Category name is empty")]
    Empty,
}

/// Top-level error type for all category-related operations
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    #[error("Invalid category name: {0}")]
    InvalidCategoryName(#[from] CategoryNameError),

    #[error("Admin user not found: {0}")]
    AdminNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CategoryError {
    fn from(err: sqlx::Error) -> Self {
        CategoryError::DatabaseError(err.to_string())
    }
}
