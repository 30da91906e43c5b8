//! User repository with soft-delete support.
//!
//! Query methods exclude soft-deleted rows unless stated otherwise.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Role, User};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

/// Fields required to insert a user row.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub color: Option<String>,
    pub commission: i32,
    pub contract_url: Option<String>,
}

/// Optional profile changes; `None` leaves the column untouched.
#[derive(Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub color: Option<String>,
    pub role: Option<Role>,
    pub commission: Option<i32>,
    pub contract_url: Option<String>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Find an active user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?;

        Ok(result.map(User::from))
    }

    /// Find a user by ID including soft-deleted rows.
    pub async fn find_by_id_any(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.conn).await?;
        Ok(result.map(User::from))
    }

    /// Find an active user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?;

        Ok(result.map(User::from))
    }

    /// Find a user by email including soft-deleted rows.
    ///
    /// Used on creation so a deleted account still blocks email reuse.
    pub async fn find_by_email_any(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn)
            .await?;

        Ok(result.map(User::from))
    }

    /// Paginated user list plus total count.
    pub async fn list(
        &self,
        params: &PaginationParams,
        include_deleted: bool,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut condition = Condition::all();
        if !include_deleted {
            condition = condition.add(user::Column::Deleted.eq(false));
        }

        let paginator = UserEntity::find()
            .filter(condition)
            .order_by_asc(user::Column::Id)
            .paginate(self.conn, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    /// Number of active users holding the PATRON role.
    pub async fn count_active_patrons(&self) -> AppResult<u64> {
        let count = UserEntity::find()
            .filter(user::Column::Role.eq(Role::Patron.as_str()))
            .filter(user::Column::Deleted.eq(false))
            .count(self.conn)
            .await?;

        Ok(count)
    }

    /// Whether any active admin-tier account exists (seed guard).
    pub async fn admin_exists(&self) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(
                user::Column::Role.is_in([Role::Patron.as_str(), Role::Developer.as_str()]),
            )
            .filter(user::Column::Deleted.eq(false))
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.as_str().to_string()),
            color: Set(new_user.color),
            commission: Set(new_user.commission),
            contract_url: Set(new_user.contract_url),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted: Set(false),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active.insert(self.conn).await?;
        Ok(User::from(model))
    }

    /// Apply profile changes to an active user.
    pub async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(color) = changes.color {
            active.color = Set(Some(color));
        }
        if let Some(role) = changes.role {
            active.role = Set(role.as_str().to_string());
        }
        if let Some(commission) = changes.commission {
            active.commission = Set(commission);
        }
        if let Some(contract_url) = changes.contract_url {
            active.contract_url = Set(Some(contract_url));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.conn).await?;
        Ok(User::from(model))
    }

    /// Replace the password hash; optionally stamps `last_login` so the
    /// setup/reset flows record the account as claimed.
    pub async fn set_password(
        &self,
        id: i32,
        password_hash: String,
        touch_last_login: bool,
    ) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        let now = Utc::now();
        active.password_hash = Set(password_hash);
        if touch_last_login {
            active.last_login = Set(Some(now));
        }
        active.updated_at = Set(now);
        active.update(self.conn).await?;

        Ok(())
    }

    /// Record the in-game username chosen during account setup.
    pub async fn set_username(&self, id: i32, username: String) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        active.username = Set(Some(username));
        active.updated_at = Set(Utc::now());
        active.update(self.conn).await?;

        Ok(())
    }

    pub async fn touch_last_login(&self, id: i32) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        active.last_login = Set(Some(Utc::now()));
        active.update(self.conn).await?;

        Ok(())
    }

    /// Mark an active user as deleted. Rows are never removed.
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.conn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        let now = Utc::now();
        active.deleted = Set(true);
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(self.conn).await?;

        Ok(())
    }
}
