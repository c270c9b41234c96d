use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";

/// Persistence for user records. Creation is the only mutation; deletion is
/// a storage-engine cascade concern and has no exposed operation.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user with a freshly generated id.
    ///
    /// The unique index on `email` backs the one-user-per-email invariant;
    /// a violation (e.g. two concurrent registrations racing past the
    /// existence check) surfaces as the duplicate-email error.
    pub async fn create(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email, name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::BadRequest("A user with this email already exists".into())
            }
            _ => AppError::from(e),
        })
    }
}
