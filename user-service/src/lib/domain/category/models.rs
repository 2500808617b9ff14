use std::fmt;

use crate::domain::category::errors::CategoryNameError;
use crate::domain::user::models::UserId;

/// Category entity. `admin`, when set, references an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub admin: Option<UserId>,
}

/// Category unique identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub i32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Category name value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a validated category name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty
    pub fn new(name: String) -> Result<Self, CategoryNameError> {
        if name.is_empty() {
            return Err(CategoryNameError::Empty);
        }
        Ok(Self(name))
    }

    /// Wrap a value read back from the store.
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a category, optionally with an admin.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: CategoryName,
    pub admin: Option<UserId>,
}

impl CreateCategoryCommand {
    pub fn new(name: CategoryName, admin: Option<UserId>) -> Self {
        Self { name, admin }
    }
}
