use async_trait::async_trait;

use crate::domain::category::models::CategoryId;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new user and make it admin of the referenced categories.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, alias and category ids
    ///
    /// # Returns
    /// Created user entity, `administered` holding the linked category ids
    ///
    /// # Errors
    /// * `CategoryNotFound` - A referenced category does not exist (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    /// * `view` - Whether to load the administered category ids
    ///
    /// # Returns
    /// User entity; `administered` is empty unless `view` is `WithEdgeIds`
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: UserId, view: UserView) -> Result<User, UserError>;

    /// Replace a user's fields and administered categories.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `CategoryNotFound` - A referenced category does not exist (nothing is written)
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user. Categories it administered are kept without admin.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Every write is a single store transaction: either all of it is visible
/// afterwards or none of it is.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user row and set it as admin of `command.administered`.
    ///
    /// # Errors
    /// * `CategoryNotFound` - A referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier, without relation data.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Ids of the categories whose admin is `id`, ascending.
    async fn find_administered_ids(&self, id: UserId) -> Result<Vec<CategoryId>, UserError>;

    /// Overwrite user fields and replace its administered set.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `CategoryNotFound` - A referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: UserId, command: UpdateUserCommand) -> Result<User, UserError>;

    /// Remove user from storage, clearing the admin of its categories.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: UserId) -> Result<(), UserError>;
}
