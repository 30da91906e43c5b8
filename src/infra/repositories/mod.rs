//! Repository layer - data access abstraction.
//!
//! Each repository borrows a connection and is generic over
//! [`sea_orm::ConnectionTrait`], so the same implementation runs against
//! the pooled connection or inside a transaction.

mod base_weapons;
pub(crate) mod entities;
mod feedback;
mod orders;
mod users;
mod weapons;

pub use base_weapons::{BaseWeaponChanges, BaseWeaponRepository, CatalogRepository, NewCatalogEntry};
pub use feedback::{FeedbackRepository, NewFeedback};
pub use orders::{NewOrderItem, OrderRepository};
pub use users::{NewUser, UserChanges, UserRepository};
pub use weapons::{NewWeapon, WeaponChanges, WeaponRepository};
