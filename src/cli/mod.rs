//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Idempotent seeding of the admin account and catalog

pub mod args;

pub use args::{Cli, Commands};
