//! Módulo de base de datos
//!
//! Maneja la conexión y migraciones de PostgreSQL

pub mod connection;

pub use connection::{run_migrations, DatabaseConnection};
