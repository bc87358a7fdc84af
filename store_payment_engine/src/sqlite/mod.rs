//! SQLite storage for payment records.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
