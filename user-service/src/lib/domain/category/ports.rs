use async_trait::async_trait;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::user::models::UserId;

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Persist a new category.
    ///
    /// # Arguments
    /// * `command` - Name and optional admin
    ///
    /// # Returns
    /// Created category with its store-assigned id
    ///
    /// # Errors
    /// * `AdminNotFound` - The admin user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: CreateCategoryCommand) -> Result<Category, CategoryError>;

    /// Retrieve category by identifier.
    ///
    /// # Returns
    /// Optional category (None if not found)
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError>;

    /// All categories administered by `admin`, ordered by id.
    async fn find_by_admin(&self, admin: UserId) -> Result<Vec<Category>, CategoryError>;

    /// Number of categories administered by `admin`.
    async fn count_by_admin(&self, admin: UserId) -> Result<i64, CategoryError>;
}
