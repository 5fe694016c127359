use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::credentials::{hash_password, verify_password};
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Book, BookInput, User, UserInput};
use crate::database::repository::{non_empty, Affected, BookStore, UserStore, DELETED};

const BOOK_COLUMNS: &str = "id, title, author, published_at, created_at, updated_at";
const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

/// Books backed by the `books` table; deletes are soft
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(database: &Database) -> Self {
        Self { pool: database.pool().clone() }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_all(&self) -> Result<Affected<Vec<Book>>, DatabaseError> {
        let sql = format!("SELECT {} FROM books WHERE deleted_at IS NULL ORDER BY id", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(Affected::from_rows(books))
    }

    async fn find(&self, id: i64) -> Result<Affected<Option<Book>>, DatabaseError> {
        let sql = format!("SELECT {} FROM books WHERE id = $1 AND deleted_at IS NULL", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(Affected::from_option(book))
    }

    async fn create(&self, input: BookInput) -> Result<Book, DatabaseError> {
        let sql = format!(
            "INSERT INTO books (title, author, published_at) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(input.title)
            .bind(input.author)
            .bind(input.published_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    async fn update(&self, id: i64, patch: BookInput) -> Result<Affected<Option<Book>>, DatabaseError> {
        let sql = format!(
            r#"UPDATE books SET
                 title = COALESCE($2, title),
                 author = COALESCE($3, author),
                 published_at = COALESCE($4, published_at),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {}"#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(non_empty(patch.title))
            .bind(non_empty(patch.author))
            .bind(non_empty(patch.published_at))
            .fetch_optional(&self.pool)
            .await?;
        Ok(Affected::from_option(book))
    }

    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError> {
        let result = sqlx::query("UPDATE books SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Affected::new(DELETED, result.rows_affected()))
    }
}

/// Users backed by the `users` table; deletes are soft
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(database: &Database) -> Self {
        Self { pool: database.pool().clone() }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Affected<Vec<User>>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE deleted_at IS NULL ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(Affected::from_rows(users))
    }

    async fn find(&self, id: i64) -> Result<Affected<Option<User>>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(Affected::from_option(user))
    }

    async fn create(&self, input: UserInput) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(input.name)
            .bind(input.email)
            .bind(hash_password(&input.password)?)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserInput) -> Result<Affected<Option<User>>, DatabaseError> {
        let sql = format!(
            r#"UPDATE users SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 password = COALESCE($4, password),
                 updated_at = now()
               WHERE id = $1 AND deleted_at IS NULL
               RETURNING {}"#,
            USER_COLUMNS
        );
        let password = non_empty(patch.password)
            .map(|p| hash_password(&p))
            .transpose()?;
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(non_empty(patch.name))
            .bind(non_empty(patch.email))
            .bind(password)
            .fetch_optional(&self.pool)
            .await?;
        Ok(Affected::from_option(user))
    }

    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError> {
        let result = sqlx::query("UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Affected::new(DELETED, result.rows_affected()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL ORDER BY id",
            USER_COLUMNS
        );
        let candidates = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        candidates
            .into_iter()
            .find(|user| verify_password(&user.password, password))
            .ok_or_else(|| DatabaseError::NotFound("no user matches these credentials".to_string()))
    }
}
