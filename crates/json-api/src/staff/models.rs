//! Staff account wire models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::users::models::User;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StaffMemberResponse {
    pub uuid: Uuid,
    pub name: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for StaffMemberResponse {
    fn from(user: User) -> Self {
        StaffMemberResponse {
            uuid: user.uuid.into(),
            name: user.name,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StaffResponse {
    /// By name
    pub staff: Vec<StaffMemberResponse>,
}

impl From<Vec<User>> for StaffResponse {
    fn from(users: Vec<User>) -> Self {
        StaffResponse {
            staff: users.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use brewline::roles::Role;
    use brewline_app::domain::users::models::UserUuid;
    use jiff::Timestamp;

    use super::*;

    pub(crate) fn user(uuid: UserUuid, name: &str, role: Role) -> User {
        User {
            uuid,
            name: name.to_string(),
            role,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
