//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and post repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: database failures become port errors; a unique email
//!   violation is reported as a duplicate email.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use pressroom::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pressroom")).await?;
//! let users = DieselUserRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_helpers;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
