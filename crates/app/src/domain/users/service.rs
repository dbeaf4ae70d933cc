//! Users service.

use async_trait::async_trait;
use brewline::roles::Role;
use jiff::Timestamp;
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{Caller, NewUser, User, UserUuid},
        repository::SqliteUsersRepository,
    },
};

/// Prefix of every issued bearer token.
pub const TOKEN_PREFIX: &str = "bw_";

const TOKEN_RANDOM_LEN: usize = 40;

/// Hash a bearer token for storage and lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn generate_token() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect();

    format!("{TOKEN_PREFIX}{random}")
}

#[derive(Debug, Clone)]
pub struct SqliteUsersService {
    db: Db,
    repository: SqliteUsersRepository,
}

impl SqliteUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for SqliteUsersService {
    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid, role = %user.role),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_write().await?;

        let created = self
            .repository
            .create_user(&mut tx, user, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_staff(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let staff = self.repository.list_staff(&mut tx).await?;

        tx.commit().await?;

        Ok(staff)
    }

    #[tracing::instrument(
        name = "users.service.set_role",
        skip(self),
        fields(user_uuid = %user, role = %role),
        err
    )]
    async fn set_role(&self, user: UserUuid, role: Role) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_write().await?;

        let updated = self
            .repository
            .set_role(&mut tx, user, role, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("user role changed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "users.service.issue_token",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn issue_token(&self, user: UserUuid) -> Result<String, UsersServiceError> {
        let token = generate_token();

        let mut tx = self.db.begin_write().await?;

        self.repository
            .create_session(&mut tx, user, &hash_token(&token), Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("issued bearer token");

        Ok(token)
    }

    #[tracing::instrument(
        name = "users.service.authenticate",
        skip(self, token),
        fields(user_uuid = tracing::field::Empty),
        err
    )]
    async fn authenticate(&self, token: &str) -> Result<Caller, UsersServiceError> {
        if !token.starts_with(TOKEN_PREFIX) {
            return Err(UsersServiceError::InvalidToken);
        }

        let mut tx = self.db.begin().await?;

        let caller = self
            .repository
            .find_caller(&mut tx, &hash_token(token))
            .await?
            .ok_or(UsersServiceError::InvalidToken)?;

        tx.commit().await?;

        Span::current().record("user_uuid", tracing::field::display(caller.user));

        Ok(caller)
    }

    #[tracing::instrument(name = "users.service.revoke_token", skip(self, token), err)]
    async fn revoke_token(&self, token: &str) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self
            .repository
            .revoke_session(&mut tx, &hash_token(token), Timestamp::now())
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::InvalidToken);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve an account.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Every non-customer account, by name.
    async fn list_staff(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Change an account's role.
    async fn set_role(&self, user: UserUuid, role: Role) -> Result<User, UsersServiceError>;

    /// Issue a new bearer token for a user. Only its hash is stored.
    async fn issue_token(&self, user: UserUuid) -> Result<String, UsersServiceError>;

    /// Resolve a bearer token to the caller it belongs to.
    async fn authenticate(&self, token: &str) -> Result<Caller, UsersServiceError>;

    /// Revoke a bearer token.
    async fn revoke_token(&self, token: &str) -> Result<(), UsersServiceError>;
}
