pub mod books;
pub mod health;
pub mod login;
pub mod users;
pub mod utils;
