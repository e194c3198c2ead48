use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use medimatch_common::User;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "user_id, username, email, password_hash, reset_token_hash, \
     reset_token_expires_at, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.user_id,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"INSERT INTO "user" (user_id, username, email, password_hash)
               VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"#
        ))
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .context("Failed to create user")?;
        Ok(row)
    }

    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE user_id = $1"#
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(row)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by email")?;
        Ok(row)
    }

    /// Duplicate pre-check for registration: matches either unique field.
    pub async fn get_by_email_or_username(
        pool: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1 OR username = $2"#
        ))
        .bind(email)
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to look up user by email or username")?;
        Ok(row)
    }

    /// True when another user already holds this username.
    pub async fn username_taken_by_other(
        pool: &PgPool,
        username: &str,
        user_id: Uuid,
    ) -> Result<bool> {
        let (taken,): (bool,) = sqlx::query_as(
            r#"SELECT EXISTS(SELECT 1 FROM "user" WHERE username = $1 AND user_id <> $2)"#,
        )
        .bind(username)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .context("Failed to check username availability")?;
        Ok(taken)
    }

    pub async fn update_username(
        pool: &PgPool,
        user_id: Uuid,
        username: &str,
    ) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"UPDATE "user" SET username = $2, updated_at = NOW()
               WHERE user_id = $1 RETURNING {USER_COLUMNS}"#
        ))
        .bind(user_id)
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to update username")?;
        Ok(row)
    }

    /// Set a new password hash. Always clears any pending reset token so a
    /// consumed or superseded token cannot be replayed.
    pub async fn update_password(pool: &PgPool, user_id: Uuid, password_hash: &str) -> Result<()> {
        sqlx::query(
            r#"UPDATE "user"
               SET password_hash = $2, reset_token_hash = NULL,
                   reset_token_expires_at = NULL, updated_at = NOW()
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(pool)
        .await
        .context("Failed to update password")?;
        Ok(())
    }

    pub async fn set_reset_token(
        pool: &PgPool,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"UPDATE "user" SET reset_token_hash = $2, reset_token_expires_at = $3
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await
        .context("Failed to set reset token")?;
        Ok(())
    }

    pub async fn clear_reset_token(pool: &PgPool, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"UPDATE "user" SET reset_token_hash = NULL, reset_token_expires_at = NULL
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to clear reset token")?;
        Ok(())
    }

    /// Look up the user holding an unexpired reset token with this hash.
    pub async fn get_by_valid_reset_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user"
               WHERE reset_token_hash = $1 AND reset_token_expires_at > NOW()"#
        ))
        .bind(token_hash)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by reset token")?;
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" ORDER BY created_at DESC"#
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list users")?;
        Ok(rows)
    }
}
