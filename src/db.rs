//! User repository backed by SQLite.
//!
//! Lookup is an exact, case-sensitive match on `name`; no pagination at
//! this scale. A lookup that matches nothing is an empty list, not an
//! error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl User {
    /// Exactly one `@` separating a non-empty local part from a non-empty
    /// domain part.
    pub fn is_valid_email(&self) -> bool {
        match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        }
    }
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the connection pool and create tables.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context(format!("Failed to open database at {}", database_url))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .context("Failed to create users table")?;

        Ok(Self { pool })
    }

    /// Insert a user, returning the generated id.
    pub async fn insert_user(&self, name: &str, email: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?1, ?2)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await
            .context("Failed to insert user")?;

        Ok(result.last_insert_rowid())
    }

    /// All users whose name matches exactly, ordered by id.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email FROM users WHERE name = ?1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query users by name")?;

        Ok(users)
    }
}
