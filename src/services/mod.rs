//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Handlers depend on the traits, not the
//! implementations.

mod auth;
mod base_weapons;
pub mod container;
mod feedback;
mod orders;
mod tokens;
mod users;
mod weapons;

pub use container::{ServiceContainer, Services};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

pub use auth::{AuthService, Authenticator, Claims, TokenResponse};
pub use base_weapons::{
    BaseWeaponManager, BaseWeaponService, CreateBaseWeapon, UpdateBaseWeapon,
};
pub use feedback::{CreateFeedback, FeedbackManager, FeedbackService};
pub use orders::{CreateOrderItem, OrderManager, OrderService, OrderViewer};
pub use tokens::{LinkClaims, TokenKind, TokenService};
pub use users::{CreateEmployee, UpdateEmployee, UserManager, UserService};
pub use weapons::{CreateWeapon, UpdateWeapon, WeaponManager, WeaponService};
