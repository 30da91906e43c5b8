//! HTTP request handlers.

pub mod auth_handler;
pub mod base_weapon_handler;
pub mod employee_handler;
pub mod feedback_handler;
pub mod order_handler;
pub mod weapon_handler;

#[cfg(test)]
mod tests;

pub use auth_handler::auth_routes;
pub use base_weapon_handler::base_weapon_routes;
pub use employee_handler::employee_routes;
pub use feedback_handler::feedback_routes;
pub use order_handler::order_routes;
pub use weapon_handler::weapon_routes;
