//! User Repository Module
//!
//! Holds the pool manager used by user queries. No queries are defined yet.

use crate::postgres::Database;
use crate::repository::Repository;
use std::sync::Arc;

/// PostgreSQL-backed user repository
#[derive(Debug, Clone)]
pub struct UserRepository {
    database: Arc<Database>,
}

impl UserRepository {
    /// Creates a new user repository on top of the shared pool manager
    pub fn new(database: Arc<Database>) -> Self {
        Self {
            database,
        }
    }

    /// Pool manager backing this repository
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl Repository for UserRepository {}
