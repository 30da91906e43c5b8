//! Core business entities and logic.

mod catalog;
mod feedback;
mod order;
mod password;
mod role;
mod user;
mod weapon;

pub use catalog::{BaseWeapon, BaseWeaponResponse, CatalogEntry, CatalogEntryResponse};
pub use feedback::{Feedback, FeedbackResponse, FeedbackStatus};
pub use order::{Order, OrderItem, OrderItemResponse, OrderResponse, OrderStatus, OrderUserInfo};
pub(crate) use order::total_price;
pub use password::Password;
pub use role::{has_permission, Permission, Role};
pub use user::{User, UserResponse};
pub use weapon::{resolve_pricing, Weapon, WeaponResponse};
