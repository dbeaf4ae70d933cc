//! Roles & Permissions
//!
//! The single place where staff and customer capabilities are defined.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Capability checked before an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Place orders and manage one's own cart.
    OrdersCreate,

    /// See one's own orders.
    OrdersViewOwn,

    /// See every order.
    OrdersView,

    /// Move orders through their lifecycle.
    OrdersUpdateStatus,

    /// Change menu items and their availability.
    MenuManage,

    /// See staff accounts.
    StaffView,

    /// Change staff roles.
    StaffManage,

    /// Grant bonus loyalty points.
    LoyaltyManage,

    /// Read every review and answer them.
    ReviewsRespond,
}

impl Permission {
    /// Stable label, `resource:action`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrdersCreate => "orders:create",
            Self::OrdersViewOwn => "orders:view_own",
            Self::OrdersView => "orders:view",
            Self::OrdersUpdateStatus => "orders:update_status",
            Self::MenuManage => "menu:manage",
            Self::StaffView => "staff:view",
            Self::StaffManage => "staff:manage",
            Self::LoyaltyManage => "loyalty:manage",
            Self::ReviewsRespond => "reviews:respond",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CUSTOMER: &[Permission] = &[Permission::OrdersCreate, Permission::OrdersViewOwn];

const BARISTA: &[Permission] = &[Permission::OrdersView, Permission::OrdersUpdateStatus];

const MANAGER: &[Permission] = &[
    Permission::OrdersView,
    Permission::OrdersUpdateStatus,
    Permission::MenuManage,
    Permission::StaffView,
    Permission::LoyaltyManage,
    Permission::ReviewsRespond,
];

const ADMIN: &[Permission] = &[
    Permission::OrdersCreate,
    Permission::OrdersViewOwn,
    Permission::OrdersView,
    Permission::OrdersUpdateStatus,
    Permission::MenuManage,
    Permission::StaffView,
    Permission::StaffManage,
    Permission::LoyaltyManage,
    Permission::ReviewsRespond,
];

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Orders for themselves.
    #[default]
    Customer,

    /// Fulfils orders.
    Barista,

    /// Runs the store.
    Manager,

    /// Everything.
    Admin,
}

impl Role {
    /// Stable storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Barista => "barista",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Permissions granted to this role.
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Customer => CUSTOMER,
            Self::Barista => BARISTA,
            Self::Manager => MANAGER,
            Self::Admin => ADMIN,
        }
    }

    /// Whether the role grants `permission`.
    pub fn can(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Whether the role is a staff role.
    pub const fn is_staff(self) -> bool {
        !matches!(self, Self::Customer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role \"{0}\"")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "barista" => Ok(Self::Barista),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn customers_order_but_do_not_fulfil() {
        assert!(Role::Customer.can(Permission::OrdersCreate));
        assert!(!Role::Customer.can(Permission::OrdersUpdateStatus));
        assert!(!Role::Customer.can(Permission::OrdersView));
    }

    #[test]
    fn baristas_update_status_but_not_menu() {
        assert!(Role::Barista.can(Permission::OrdersUpdateStatus));
        assert!(!Role::Barista.can(Permission::MenuManage));
    }

    #[test]
    fn managers_see_staff_but_cannot_change_roles() {
        assert!(Role::Manager.can(Permission::MenuManage));
        assert!(Role::Manager.can(Permission::StaffView));
        assert!(Role::Manager.can(Permission::ReviewsRespond));
        assert!(!Role::Manager.can(Permission::StaffManage));
        assert!(Role::Admin.can(Permission::StaffManage));
    }

    #[test]
    fn admins_hold_every_other_roles_permissions() {
        for role in [Role::Customer, Role::Barista, Role::Manager] {
            for permission in role.permissions() {
                assert!(Role::Admin.can(*permission), "admin lacks {permission}");
            }
        }
    }

    #[test]
    fn only_customers_are_not_staff() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Barista.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn role_labels_parse() -> TestResult {
        for role in [Role::Customer, Role::Barista, Role::Manager, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>()?, role);
        }

        assert!("guest".parse::<Role>().is_err());

        Ok(())
    }
}
