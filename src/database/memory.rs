use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::database::credentials::{hash_password, verify_password};
use crate::database::manager::DatabaseError;
use crate::database::models::{Book, BookInput, User, UserInput};
use crate::database::repository::{non_empty, Affected, BookStore, UserStore, DELETED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Books,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Books => "books",
        }
    }
}

struct Stored<T> {
    record: T,
    deleted: bool,
}

struct TableState<T> {
    table: Table,
    rows: BTreeMap<i64, Stored<T>>,
    next_id: i64,
    dropped: bool,
}

impl<T: Clone> TableState<T> {
    fn new(table: Table) -> Self {
        Self {
            table,
            rows: BTreeMap::new(),
            next_id: 1,
            dropped: false,
        }
    }

    fn ensure_exists(&self) -> Result<(), DatabaseError> {
        if self.dropped {
            return Err(DatabaseError::QueryError(format!(
                "relation \"{}\" does not exist",
                self.table.name()
            )));
        }
        Ok(())
    }

    fn live(&self) -> impl Iterator<Item = &T> {
        self.rows.values().filter(|s| !s.deleted).map(|s| &s.record)
    }

    fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows
            .get_mut(&id)
            .filter(|s| !s.deleted)
            .map(|s| &mut s.record)
    }

    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.rows.insert(id, Stored { record: record.clone(), deleted: false });
        record
    }

    fn soft_delete(&mut self, id: i64) -> u64 {
        match self.rows.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                1
            }
            _ => 0,
        }
    }
}

/// Process-local storage with the same observable behavior as the PostgreSQL stores.
/// Used when no connection string is configured and by the integration tests.
pub struct MemoryStore {
    users: RwLock<TableState<User>>,
    books: RwLock<TableState<Book>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(TableState::new(Table::Users)),
            books: RwLock::new(TableState::new(Table::Books)),
        }
    }

    /// Drop a table; every later operation on it fails like a missing relation would
    pub async fn drop_table(&self, table: Table) {
        debug!("Dropping in-memory table {}", table.name());
        match table {
            Table::Users => self.users.write().await.dropped = true,
            Table::Books => self.books.write().await.dropped = true,
        }
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find_all(&self) -> Result<Affected<Vec<Book>>, DatabaseError> {
        let books = self.books.read().await;
        books.ensure_exists()?;
        Ok(Affected::from_rows(books.live().cloned().collect()))
    }

    async fn find(&self, id: i64) -> Result<Affected<Option<Book>>, DatabaseError> {
        let books = self.books.read().await;
        books.ensure_exists()?;
        let found = books.live().find(|b| b.id == id).cloned();
        Ok(Affected::from_option(found))
    }

    async fn create(&self, input: BookInput) -> Result<Book, DatabaseError> {
        let mut books = self.books.write().await;
        books.ensure_exists()?;
        let now = Utc::now();
        Ok(books.insert(|id| Book {
            id,
            title: input.title,
            author: input.author,
            published_at: input.published_at,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update(&self, id: i64, patch: BookInput) -> Result<Affected<Option<Book>>, DatabaseError> {
        let mut books = self.books.write().await;
        books.ensure_exists()?;
        let updated = books.get_mut(id).map(|book| {
            if let Some(title) = non_empty(patch.title) {
                book.title = title;
            }
            if let Some(author) = non_empty(patch.author) {
                book.author = author;
            }
            if let Some(published_at) = non_empty(patch.published_at) {
                book.published_at = published_at;
            }
            book.updated_at = Utc::now();
            book.clone()
        });
        Ok(Affected::from_option(updated))
    }

    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError> {
        let mut books = self.books.write().await;
        books.ensure_exists()?;
        Ok(Affected::new(DELETED, books.soft_delete(id)))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Affected<Vec<User>>, DatabaseError> {
        let users = self.users.read().await;
        users.ensure_exists()?;
        Ok(Affected::from_rows(users.live().cloned().collect()))
    }

    async fn find(&self, id: i64) -> Result<Affected<Option<User>>, DatabaseError> {
        let users = self.users.read().await;
        users.ensure_exists()?;
        let found = users.live().find(|u| u.id == id).cloned();
        Ok(Affected::from_option(found))
    }

    async fn create(&self, input: UserInput) -> Result<User, DatabaseError> {
        let password = hash_password(&input.password)?;
        let mut users = self.users.write().await;
        users.ensure_exists()?;
        let now = Utc::now();
        Ok(users.insert(|id| User {
            id,
            name: input.name,
            email: input.email,
            password,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update(&self, id: i64, patch: UserInput) -> Result<Affected<Option<User>>, DatabaseError> {
        let password = non_empty(patch.password)
            .map(|password| hash_password(&password))
            .transpose()?;
        let mut users = self.users.write().await;
        users.ensure_exists()?;
        let updated = users.get_mut(id).map(|user| {
            if let Some(name) = non_empty(patch.name) {
                user.name = name;
            }
            if let Some(email) = non_empty(patch.email) {
                user.email = email;
            }
            if let Some(password) = password {
                user.password = password;
            }
            user.updated_at = Utc::now();
            user.clone()
        });
        Ok(Affected::from_option(updated))
    }

    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError> {
        let mut users = self.users.write().await;
        users.ensure_exists()?;
        Ok(Affected::new(DELETED, users.soft_delete(id)))
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, DatabaseError> {
        let users = self.users.read().await;
        users.ensure_exists()?;
        let found = users
            .live()
            .find(|u| u.email == email && verify_password(&u.password, password))
            .cloned();
        found.ok_or_else(|| DatabaseError::NotFound("no user matches these credentials".to_string()))
    }
}
