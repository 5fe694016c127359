use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Book, BookInput, User, UserInput};

/// Message returned by a successful delete
pub const DELETED: &str = "deleted";

/// A storage result paired with the number of rows the statement touched.
/// Zero rows with no error is how the stores report "not found".
#[derive(Debug, Clone, PartialEq)]
pub struct Affected<T> {
    pub value: T,
    pub rows: u64,
}

impl<T> Affected<T> {
    pub fn new(value: T, rows: u64) -> Self {
        Self { value, rows }
    }

    /// One row when `value` is present, zero otherwise
    pub fn from_option(value: Option<T>) -> Affected<Option<T>> {
        let rows = u64::from(value.is_some());
        Affected { value, rows }
    }
}

impl<T> Affected<Vec<T>> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        let count = rows.len() as u64;
        Self::new(rows, count)
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> Result<Affected<Vec<Book>>, DatabaseError>;
    async fn find(&self, id: i64) -> Result<Affected<Option<Book>>, DatabaseError>;
    async fn create(&self, input: BookInput) -> Result<Book, DatabaseError>;
    /// Empty fields in `patch` leave the stored value untouched
    async fn update(&self, id: i64, patch: BookInput) -> Result<Affected<Option<Book>>, DatabaseError>;
    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Affected<Vec<User>>, DatabaseError>;
    async fn find(&self, id: i64) -> Result<Affected<Option<User>>, DatabaseError>;
    async fn create(&self, input: UserInput) -> Result<User, DatabaseError>;
    /// Empty fields in `patch` leave the stored value untouched
    async fn update(&self, id: i64, patch: UserInput) -> Result<Affected<Option<User>>, DatabaseError>;
    async fn delete(&self, id: i64) -> Result<Affected<&'static str>, DatabaseError>;
    /// Credential match; no match is an error, not an empty result
    async fn login(&self, email: &str, password: &str) -> Result<User, DatabaseError>;
}

/// `None` for empty strings so patches can skip unset fields
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
