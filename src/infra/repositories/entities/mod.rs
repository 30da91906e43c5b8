//! SeaORM entity definitions.
//!
//! Database-specific models, separate from the domain types in
//! [`crate::domain`]. Each entity file also carries the `Model ->`
//! domain conversion.

pub mod base_weapon;
pub mod feedback;
pub mod order;
pub mod order_item;
pub mod user;
pub mod weapon;
pub mod weapon_catalog;
