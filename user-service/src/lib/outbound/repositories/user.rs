use async_trait::async_trait;
use sqlx::Sqlite;
use sqlx::SqlitePool;
use sqlx::Transaction;

use crate::domain::category::models::CategoryId;
use crate::domain::user::models::Alias;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_categories_exist(
        tx: &mut Transaction<'_, Sqlite>,
        ids: &[CategoryId],
    ) -> Result<(), UserError> {
        for id in ids {
            let found = sqlx::query_scalar::<_, i32>("SELECT id FROM categories WHERE id = ?")
                .bind(id.0)
                .fetch_optional(&mut **tx)
                .await?;

            if found.is_none() {
                return Err(UserError::CategoryNotFound(*id));
            }
        }

        Ok(())
    }

    async fn assign_admin(
        tx: &mut Transaction<'_, Sqlite>,
        admin: UserId,
        ids: &[CategoryId],
    ) -> Result<(), UserError> {
        for id in ids {
            sqlx::query("UPDATE categories SET admin_id = ? WHERE id = ?")
                .bind(admin.0)
                .bind(id.0)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    async fn clear_admin(tx: &mut Transaction<'_, Sqlite>, admin: UserId) -> Result<(), UserError> {
        sqlx::query("UPDATE categories SET admin_id = NULL WHERE admin_id = ?")
            .bind(admin.0)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email_address: String,
    alias: Option<String>,
}

// Rows are not re-validated; other clients may have written them.
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            name: Name::from_stored(row.name),
            email: EmailAddress::from_stored(row.email_address),
            alias: row.alias.map(Alias::new),
            administered: Vec::new(),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await?;

        Self::ensure_categories_exist(&mut tx, &command.administered).await?;

        let row_id = sqlx::query(
            r#"
            INSERT INTO users (name, email_address, alias)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(command.name.as_str())
        .bind(command.email.as_str())
        .bind(command.alias.as_ref().map(Alias::as_str))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let id = i32::try_from(row_id)
            .map(UserId)
            .map_err(|_| UserError::DatabaseError(format!("User id out of range: {}", row_id)))?;

        Self::assign_admin(&mut tx, id, &command.administered).await?;

        tx.commit().await?;

        Ok(User {
            id,
            name: command.name,
            email: command.email,
            alias: command.alias,
            administered: command.administered,
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email_address, alias
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_administered_ids(&self, id: UserId) -> Result<Vec<CategoryId>, UserError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM categories
            WHERE admin_id = ?
            ORDER BY id
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(CategoryId).collect())
    }

    async fn update(&self, id: UserId, command: UpdateUserCommand) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email_address = ?, alias = ?
            WHERE id = ?
            "#,
        )
        .bind(command.name.as_str())
        .bind(command.email.as_str())
        .bind(command.alias.as_ref().map(Alias::as_str))
        .bind(id.0)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        Self::ensure_categories_exist(&mut tx, &command.administered).await?;
        Self::clear_admin(&mut tx, id).await?;
        Self::assign_admin(&mut tx, id, &command.administered).await?;

        tx.commit().await?;

        Ok(User {
            id,
            name: command.name,
            email: command.email,
            alias: command.alias,
            administered: command.administered,
        })
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let mut tx = self.pool.begin().await?;

        Self::clear_admin(&mut tx, id).await?;

        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        tx.commit().await?;

        Ok(())
    }
}
