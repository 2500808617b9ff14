use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::user::models::UserId;

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    admin_id: Option<i32>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId(row.id),
            name: CategoryName::from_stored(row.name),
            admin: row.admin_id.map(UserId),
        }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, command: CreateCategoryCommand) -> Result<Category, CategoryError> {
        let row_id = sqlx::query(
            r#"
            INSERT INTO categories (name, admin_id)
            VALUES (?, ?)
            "#,
        )
        .bind(command.name.as_str())
        .bind(command.admin.map(|admin| admin.0))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let (Some(db_err), Some(admin)) = (e.as_database_error(), command.admin) {
                if db_err.is_foreign_key_violation() {
                    return CategoryError::AdminNotFound(admin);
                }
            }
            CategoryError::DatabaseError(e.to_string())
        })?
        .last_insert_rowid();

        let id = i32::try_from(row_id).map(CategoryId).map_err(|_| {
            CategoryError::DatabaseError(format!("Category id out of range: {}", row_id))
        })?;

        Ok(Category {
            id,
            name: command.name,
            admin: command.admin,
        })
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, admin_id
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    async fn find_by_admin(&self, admin: UserId) -> Result<Vec<Category>, CategoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, admin_id
            FROM categories
            WHERE admin_id = ?
            ORDER BY id
            "#,
        )
        .bind(admin.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn count_by_admin(&self, admin: UserId) -> Result<i64, CategoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE admin_id = ?
            "#,
        )
        .bind(admin.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
