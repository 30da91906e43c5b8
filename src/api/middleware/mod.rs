//! API middleware.

mod auth;

pub use auth::{
    auth_middleware, require_admin, require_developer, require_permission, CurrentUser,
};
