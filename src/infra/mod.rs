//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Outbound email
//! - Discord webhook notifications
//! - Unit of Work for transaction management

pub mod db;
pub mod discord;
pub mod mailer;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use discord::{DiscordNotifier, OrderLine, WeaponAction};
pub use mailer::Mailer;
pub use unit_of_work::{Persistence, TransactionContext};
