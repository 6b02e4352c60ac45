//! Database connectivity for the task service.
//!
//! Provides the PostgreSQL connector (SeaORM), its configuration, and the
//! migration runner. All persistence goes through a repository built on top of
//! the [`sea_orm::DatabaseConnection`] handed out here.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config(&config).await?;
//! postgres::run_migrations::<Migrator>(&db, "tasks_api").await?;
//! ```

pub mod postgres;

pub use postgres::{PostgresConfig, connect, connect_from_config, run_migrations};
