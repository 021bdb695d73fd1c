//! User Repository

use super::RepoResult;
use shared::models::{User, UserRole};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

/// Stored account including the password hash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, role, password_hash, created_at FROM users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, role, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Insert an account; `password_hash` must already be hashed
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    role: UserRole,
    password_hash: &str,
) -> RepoResult<User> {
    let user = User {
        id: new_id(),
        username: username.to_string(),
        email: email.to_string(),
        role,
        created_at: now_millis(),
    };

    sqlx::query(
        "INSERT INTO users (id, username, email, role, password_hash, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.role)
    .bind(password_hash)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    Ok(user)
}
