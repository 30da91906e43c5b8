//! Employee account management.
//!
//! Creation provisions an account with a random temporary password and
//! emails a setup link; the employee picks their real password through
//! that link. Deletion is always a soft delete. Two guards protect the
//! org chart: the last PATRON can be neither demoted nor deleted, and a
//! user still holding weapons cannot be deleted.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, Role, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{NewUser, UserChanges};
use crate::infra::{Mailer, Persistence};
use crate::services::tokens::{TokenKind, TokenService};
use crate::types::{Paginated, PaginationParams};

/// Input for creating an employee account.
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    pub color: Option<String>,
    pub commission: Option<i32>,
    pub contract_url: Option<String>,
}

/// Partial update of an employee profile.
#[derive(Default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub color: Option<String>,
    pub role: Option<Role>,
    pub commission: Option<i32>,
    pub contract_url: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Paginated list of employees. Soft-deleted accounts are excluded
    /// unless `include_deleted` is set.
    async fn list_users(
        &self,
        params: PaginationParams,
        include_deleted: bool,
    ) -> AppResult<Paginated<User>>;

    /// Get an active employee by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Create an employee and send the setup link by email
    async fn create_user(&self, input: CreateEmployee) -> AppResult<User>;

    /// Update an employee profile (last-PATRON demotion is rejected)
    async fn update_user(&self, id: i32, changes: UpdateEmployee) -> AppResult<User>;

    /// Soft-delete an employee (last PATRON and weapon holders are protected)
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Move every weapon owned by one employee to another, so a weapon
    /// holder can be off-boarded. Returns the number of weapons moved.
    async fn reassign_weapons(&self, from_user_id: i32, to_user_id: i32) -> AppResult<u64>;

    /// Re-issue the account setup link for an existing employee. When
    /// `link_only` is set the link is returned without sending an email.
    async fn send_setup_link(&self, id: i32, link_only: bool) -> AppResult<String>;

    /// Start the password-reset flow. Succeeds whether or not the email
    /// matches an account, so addresses cannot be enumerated.
    async fn request_password_reset(&self, email: String) -> AppResult<()>;

    /// Finish the reset flow: verify the reset token and store the new password
    async fn complete_password_reset(&self, token: String, new_password: String) -> AppResult<()>;

    /// Finish the setup flow: verify the setup token, store the chosen
    /// password, and optionally record the in-game username
    async fn complete_setup(
        &self,
        token: String,
        password: String,
        username: Option<String>,
    ) -> AppResult<()>;
}

/// Whether an update would demote the organization's only PATRON.
fn demotes_last_patron(current_role: Role, new_role: Option<Role>, active_patrons: u64) -> bool {
    match new_role {
        Some(new_role) => {
            current_role == Role::Patron && new_role != Role::Patron && active_patrons <= 1
        }
        None => false,
    }
}

/// Default commission percentage for a role, when none is given.
fn default_commission(role: Role) -> i32 {
    (role.commission_rate() * 100.0).round() as i32
}

/// Concrete implementation of UserService.
pub struct UserManager {
    persistence: Arc<Persistence>,
    tokens: Arc<TokenService>,
    mailer: Mailer,
}

impl UserManager {
    pub fn new(persistence: Arc<Persistence>, tokens: Arc<TokenService>, mailer: Mailer) -> Self {
        Self {
            persistence,
            tokens,
            mailer,
        }
    }

    /// Email the setup link; failures are logged, never propagated.
    async fn email_setup_link(&self, user: &User) -> AppResult<String> {
        let link = self.tokens.generate_setup_link(user)?;
        if let Err(e) = self.mailer.send_setup_link(&user.email, &user.name, &link).await {
            tracing::error!(user_id = user.id, "Failed to send setup email: {}", e);
        }
        Ok(link)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(
        &self,
        params: PaginationParams,
        include_deleted: bool,
    ) -> AppResult<Paginated<User>> {
        let (users, total) = self
            .persistence
            .users()
            .list(&params, include_deleted)
            .await?;
        Ok(Paginated::new(users, params.page, params.limit(), total))
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.persistence
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_user(&self, input: CreateEmployee) -> AppResult<User> {
        // Soft-deleted accounts still reserve their email address.
        if self
            .persistence
            .users()
            .find_by_email_any(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        // The account starts with a throwaway password; the employee
        // sets a real one through the emailed setup link.
        let temp_password = Password::new(&Password::generate_temporary())?;
        let commission = input
            .commission
            .unwrap_or_else(|| default_commission(input.role));

        let user = self
            .persistence
            .users()
            .insert(NewUser {
                name: input.name,
                email: input.email,
                username: input.username,
                password_hash: temp_password.into_string(),
                role: input.role,
                color: input.color,
                commission,
                contract_url: input.contract_url,
            })
            .await?;

        self.email_setup_link(&user).await?;

        tracing::info!(user_id = user.id, role = %user.role.as_str(), "Employee created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, changes: UpdateEmployee) -> AppResult<User> {
        let current = self.get_user(id).await?;

        if changes.role.is_some() && changes.role != Some(current.role) {
            let patrons = self.persistence.users().count_active_patrons().await?;
            if demotes_last_patron(current.role, changes.role, patrons) {
                return Err(AppError::bad_request(
                    "Cannot demote the last PATRON of the organization",
                ));
            }
        }

        self.persistence
            .users()
            .update(
                id,
                UserChanges {
                    name: changes.name,
                    color: changes.color,
                    role: changes.role,
                    commission: changes.commission,
                    contract_url: changes.contract_url,
                },
            )
            .await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let user = self.get_user(id).await?;

        if user.role == Role::Patron {
            let patrons = self.persistence.users().count_active_patrons().await?;
            if patrons <= 1 {
                return Err(AppError::bad_request(
                    "Cannot delete the last PATRON of the organization",
                ));
            }
        }

        let weapon_count = self.persistence.weapons().count_by_user(id).await?;
        if weapon_count > 0 {
            return Err(AppError::bad_request(
                "Cannot delete a user who still holds weapons",
            ));
        }

        self.persistence.users().soft_delete(id).await?;
        tracing::info!(user_id = id, "Employee soft-deleted");
        Ok(())
    }

    async fn reassign_weapons(&self, from_user_id: i32, to_user_id: i32) -> AppResult<u64> {
        // Existence checks and the bulk move share one transaction so a
        // concurrent delete cannot strand weapons on a missing account.
        let moved = self
            .persistence
            .transaction(move |ctx| {
                Box::pin(async move {
                    ctx.users()
                        .find_by_id(from_user_id)
                        .await?
                        .ok_or_not_found()?;
                    ctx.users()
                        .find_by_id(to_user_id)
                        .await?
                        .ok_or_not_found()?;

                    ctx.weapons().reassign_owner(from_user_id, to_user_id).await
                })
            })
            .await?;

        tracing::info!(from_user_id, to_user_id, moved, "Weapons reassigned");
        Ok(moved)
    }

    async fn send_setup_link(&self, id: i32, link_only: bool) -> AppResult<String> {
        let user = self.get_user(id).await?;
        if link_only {
            self.tokens.generate_setup_link(&user)
        } else {
            self.email_setup_link(&user).await
        }
    }

    async fn request_password_reset(&self, email: String) -> AppResult<()> {
        match self.persistence.users().find_by_email(&email).await? {
            Some(user) => {
                let link = self.tokens.generate_reset_link(&user)?;
                if let Err(e) = self
                    .mailer
                    .send_reset_link(&user.email, &user.name, &link)
                    .await
                {
                    tracing::error!(user_id = user.id, "Failed to send reset email: {}", e);
                }
            }
            None => {
                tracing::debug!("Password reset requested for unknown email");
            }
        }
        // Same response either way.
        Ok(())
    }

    async fn complete_password_reset(&self, token: String, new_password: String) -> AppResult<()> {
        let claims = self.tokens.verify(&token, TokenKind::Reset)?;
        let hash = Password::new(&new_password)?.into_string();
        self.persistence
            .users()
            .set_password(claims.sub, hash, false)
            .await?;

        tracing::info!(user_id = claims.sub, "Password reset completed");
        Ok(())
    }

    async fn complete_setup(
        &self,
        token: String,
        password: String,
        username: Option<String>,
    ) -> AppResult<()> {
        let claims = self.tokens.verify(&token, TokenKind::Setup)?;
        let hash = Password::new(&password)?.into_string();
        self.persistence
            .users()
            .set_password(claims.sub, hash, true)
            .await?;

        if let Some(username) = username {
            self.persistence
                .users()
                .set_username(claims.sub, username)
                .await?;
        }

        tracing::info!(user_id = claims.sub, "Account setup completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_patron_cannot_be_demoted() {
        assert!(demotes_last_patron(
            Role::Patron,
            Some(Role::Employee),
            1
        ));
        assert!(demotes_last_patron(Role::Patron, Some(Role::CoPatron), 1));
    }

    #[test]
    fn patron_demotion_allowed_when_another_remains() {
        assert!(!demotes_last_patron(Role::Patron, Some(Role::Employee), 2));
    }

    #[test]
    fn non_patron_role_changes_are_unaffected() {
        assert!(!demotes_last_patron(Role::Employee, Some(Role::Patron), 1));
        assert!(!demotes_last_patron(Role::CoPatron, Some(Role::Employee), 1));
    }

    #[test]
    fn keeping_patron_role_is_not_a_demotion() {
        assert!(!demotes_last_patron(Role::Patron, Some(Role::Patron), 1));
        assert!(!demotes_last_patron(Role::Patron, None, 1));
    }

    #[test]
    fn commission_defaults_follow_roles() {
        assert_eq!(default_commission(Role::Employee), 20);
        assert_eq!(default_commission(Role::CoPatron), 30);
        assert_eq!(default_commission(Role::Patron), 50);
        assert_eq!(default_commission(Role::Developer), 0);
    }
}
