//! Permission checks for authenticated callers.

use brewline::roles::Permission;
use brewline_app::domain::users::models::Caller;
use salvo::prelude::StatusError;

pub(crate) trait CallerExt {
    /// Answer 403 unless the caller's role grants `permission`.
    fn require(&self, permission: Permission) -> Result<(), StatusError>;
}

impl CallerExt for Caller {
    fn require(&self, permission: Permission) -> Result<(), StatusError> {
        if self.can(permission) {
            return Ok(());
        }

        Err(StatusError::forbidden().brief(format!("Missing permission {permission}")))
    }
}
