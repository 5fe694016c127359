pub mod credentials;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{Database, DatabaseError};
pub use memory::{MemoryStore, Table};
pub use postgres::{PgBookStore, PgUserStore};
pub use repository::{Affected, BookStore, UserStore};
