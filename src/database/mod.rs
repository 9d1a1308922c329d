//! Acceso a la base de datos
//!
//! Este módulo expone la creación del pool de conexiones PostgreSQL.

pub mod connection;

pub use connection::create_pool;
