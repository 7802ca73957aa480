//! User credential store.
//!
//! The auth service speaks to the account table through the narrow
//! [`CredentialStore`] contract: lookup by email, existence probe, insert.
//! No other query shape exists in this core; wider account management
//! belongs to the domain layer.

use crate::{error::AppError, models::user::{NewUser, User}};
use async_trait::async_trait;
use sqlx::PgPool;

/// The adapter contract the auth core needs from the account store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Insert a new account and return the stored row. Callers are expected
    /// to have probed for duplicates first; a race that slips through still
    /// hits the unique constraint and surfaces as a store error.
    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError>;
}

/// PostgreSQL-backed credential store
pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.is_some())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, phone, college, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.phone)
        .bind(&new_user.college)
        .bind(&new_user.role)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }
}
