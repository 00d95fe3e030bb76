//! Database connection and schema

pub mod init;

pub use init::{create_sessions_table, create_users_table, init_database, init_schema};
