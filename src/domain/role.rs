//! Role tiers and the static permission table.
//!
//! The permission model is a fixed mapping from role to capability flags
//! plus a commission rate. There are no per-user overrides. DEVELOPER is
//! the system admin: it short-circuits every permission check to true.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role tiers, stored as uppercase strings in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    CoPatron,
    Patron,
    Developer,
}

/// Capabilities a role can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageUsers,
    ManageWeapons,
    ViewStatistics,
    ManageFeedback,
    AccessAdminPanel,
    ManageBaseWeapons,
    SystemAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Employee, Role::CoPatron, Role::Patron, Role::Developer];

    /// Check whether this role holds a capability.
    ///
    /// `SystemAdmin` roles pass every check.
    pub fn has_permission(&self, permission: Permission) -> bool {
        if self.is_system_admin() {
            return true;
        }

        match (self, permission) {
            (Role::Patron, Permission::ManageUsers)
            | (Role::Patron, Permission::ManageWeapons)
            | (Role::Patron, Permission::ViewStatistics)
            | (Role::Patron, Permission::AccessAdminPanel)
            | (Role::Patron, Permission::ManageBaseWeapons) => true,

            (Role::CoPatron, Permission::ManageWeapons)
            | (Role::CoPatron, Permission::ViewStatistics) => true,

            _ => false,
        }
    }

    /// DEVELOPER is the only system admin.
    pub fn is_system_admin(&self) -> bool {
        matches!(self, Role::Developer)
    }

    /// Admin tiers allowed through admin-gated routes.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Patron | Role::CoPatron | Role::Developer)
    }

    /// Fixed sale commission rate per role.
    pub fn commission_rate(&self) -> f64 {
        match self {
            Role::Employee => 0.20,
            Role::CoPatron => 0.30,
            Role::Patron => 0.50,
            Role::Developer => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::CoPatron => "CO_PATRON",
            Role::Patron => "PATRON",
            Role::Developer => "DEVELOPER",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    /// Fail-closed: anything outside the four known tiers is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMPLOYEE" => Ok(Role::Employee),
            "CO_PATRON" => Ok(Role::CoPatron),
            "PATRON" => Ok(Role::Patron),
            "DEVELOPER" => Ok(Role::Developer),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission check on a raw role string.
///
/// Unknown role strings fail every check.
pub fn has_permission(role: &str, permission: Permission) -> bool {
    role.parse::<Role>()
        .map(|r| r.has_permission(permission))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PERMISSIONS: [Permission; 7] = [
        Permission::ManageUsers,
        Permission::ManageWeapons,
        Permission::ViewStatistics,
        Permission::ManageFeedback,
        Permission::AccessAdminPanel,
        Permission::ManageBaseWeapons,
        Permission::SystemAdmin,
    ];

    #[test]
    fn developer_passes_every_check() {
        for permission in ALL_PERMISSIONS {
            assert!(Role::Developer.has_permission(permission));
        }
    }

    #[test]
    fn unknown_role_fails_every_check() {
        for permission in ALL_PERMISSIONS {
            assert!(!has_permission("INTERN", permission));
            assert!(!has_permission("", permission));
            // Case matters: the table uses uppercase names.
            assert!(!has_permission("patron", permission));
        }
    }

    #[test]
    fn patron_table() {
        assert!(Role::Patron.has_permission(Permission::ManageUsers));
        assert!(Role::Patron.has_permission(Permission::ManageWeapons));
        assert!(Role::Patron.has_permission(Permission::ViewStatistics));
        assert!(Role::Patron.has_permission(Permission::AccessAdminPanel));
        assert!(Role::Patron.has_permission(Permission::ManageBaseWeapons));
        assert!(!Role::Patron.has_permission(Permission::ManageFeedback));
        assert!(!Role::Patron.has_permission(Permission::SystemAdmin));
    }

    #[test]
    fn co_patron_table() {
        assert!(Role::CoPatron.has_permission(Permission::ManageWeapons));
        assert!(Role::CoPatron.has_permission(Permission::ViewStatistics));
        assert!(!Role::CoPatron.has_permission(Permission::ManageUsers));
        assert!(!Role::CoPatron.has_permission(Permission::AccessAdminPanel));
        assert!(!Role::CoPatron.has_permission(Permission::ManageBaseWeapons));
    }

    #[test]
    fn employee_has_nothing() {
        for permission in ALL_PERMISSIONS {
            assert!(!Role::Employee.has_permission(permission));
        }
    }

    #[test]
    fn commission_rates_match_table() {
        assert_eq!(Role::Employee.commission_rate(), 0.20);
        assert_eq!(Role::CoPatron.commission_rate(), 0.30);
        assert_eq!(Role::Patron.commission_rate(), 0.50);
        assert_eq!(Role::Developer.commission_rate(), 0.0);
    }

    #[test]
    fn role_string_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn admin_tiers() {
        assert!(Role::Patron.is_admin());
        assert!(Role::CoPatron.is_admin());
        assert!(Role::Developer.is_admin());
        assert!(!Role::Employee.is_admin());
    }
}
