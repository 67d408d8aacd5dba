//! User module
//!
//! Persistence for user accounts.

pub mod repository;

pub use repository::UserRepository;
