//! Users Repository

use brewline::roles::Role;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    columns::{timestamp_value, try_get_parsed, try_get_timestamp},
    domain::users::models::{Caller, NewUser, User, UserUuid},
    uuids::TypedUuid,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LIST_STAFF_SQL: &str = include_str!("sql/list_staff.sql");
const SET_ROLE_SQL: &str = include_str!("sql/set_role.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_CALLER_SQL: &str = include_str!("sql/find_caller.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

/// Session UUID
pub(crate) type SessionUuid = TypedUuid<Session>;

/// Session marker
pub(crate) struct Session;

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteUsersRepository;

impl SqliteUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: NewUser,
        now: Timestamp,
    ) -> Result<User, sqlx::Error> {
        query_as::<Sqlite, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.role.as_str())
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Sqlite, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_staff(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Sqlite, User>(LIST_STAFF_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_role(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        role: Role,
        now: Timestamp,
    ) -> Result<User, sqlx::Error> {
        query_as::<Sqlite, User>(SET_ROLE_SQL)
            .bind(role.as_str())
            .bind(timestamp_value(now))
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        token_hash: &str,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(SessionUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(token_hash)
            .bind(timestamp_value(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_caller(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        token_hash: &str,
    ) -> Result<Option<Caller>, sqlx::Error> {
        let row = query(FIND_CALLER_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(Caller {
                user: UserUuid::from_uuid(row.try_get("uuid")?),
                role: try_get_parsed(&row, "role")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        token_hash: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(timestamp_value(now))
            .bind(token_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            role: try_get_parsed(row, "role")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
