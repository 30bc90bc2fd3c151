//! # Permissions
//!
//! Core permission type for the RBAC system.
//! A permission combines a portal service with an action, written
//! `"service.action"` (e.g. `"applications.edit"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};

/// Service name that grants universal access when checked.
pub const ANY_SERVICE: &str = "any";

/// A permission is a combination of a service name and an action.
///
/// The string form is split on the **first** `.`, so `"x.edit.extra"` is
/// service `x` with action `edit.extra`.
///
/// # Example
///
/// ```
/// use palms_rbac::permissions::Permission;
/// use palms_rbac::actions::Action;
///
/// let perm = Permission::parse("licenses.manage");
/// assert_eq!(perm.service, "licenses");
/// assert_eq!(perm.action, Action::Manage);
/// assert_eq!(perm.to_string(), "licenses.manage");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    /// The service this permission applies to.
    pub service: String,
    /// The action allowed on the service.
    pub action: Action,
}

impl Permission {
    /// Create a new permission.
    pub fn new(service: impl Into<String>, action: Action) -> Self {
        Self {
            service: service.into(),
            action,
        }
    }

    /// Parse from string, leniently.
    ///
    /// Never fails: a string with no `.` becomes a permission whose service is
    /// the whole string and whose action is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use palms_rbac::permissions::Permission;
    /// use palms_rbac::actions::Action;
    ///
    /// let perm = Permission::parse("permits");
    /// assert_eq!(perm.service, "permits");
    /// assert_eq!(perm.action, Action::Other(String::new()));
    /// ```
    pub fn parse(s: &str) -> Self {
        let (service, action) = split_permission(s);
        Self::new(service, Action::parse(action))
    }

    /// Parse from string, rejecting anything that is not `service.action`
    /// with both segments non-empty.
    ///
    /// # Example
    ///
    /// ```
    /// use palms_rbac::permissions::Permission;
    ///
    /// assert!(Permission::parse_strict("applications.view").is_ok());
    /// assert!(Permission::parse_strict("applications").is_err());
    /// assert!(Permission::parse_strict(".view").is_err());
    /// ```
    pub fn parse_strict(s: &str) -> RbacResult<Self> {
        match s.split_once('.') {
            Some((service, action)) if !service.is_empty() && !action.is_empty() => {
                Ok(Self::new(service, Action::parse(action)))
            }
            _ => Err(RbacError::InvalidPermission(s.to_string())),
        }
    }

    /// Check if this permission names the universal-access service.
    pub fn is_any_service(&self) -> bool {
        self.service == ANY_SERVICE
    }
}

/// Split a permission string on its first `.` into `(service, action)`.
///
/// A string without `.` yields the whole string as the service and an empty
/// action.
pub fn split_permission(s: &str) -> (&str, &str) {
    s.split_once('.').unwrap_or((s, ""))
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.action.as_str().is_empty() {
            f.write_str(&self.service)
        } else {
            write!(f, "{}.{}", self.service, self.action)
        }
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl TryFrom<String> for Permission {
    type Error = RbacError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_strict(&s)
    }
}

impl From<Permission> for String {
    fn from(perm: Permission) -> Self {
        perm.to_string()
    }
}
