//! # Actions
//!
//! Defines the action segment of a permission string.
//! Actions represent the operations a role may perform on a portal service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions that can be granted on a service.
///
/// The portal conventionally uses five actions:
/// - **View**: Read-only access to a service's screens
/// - **Edit**: Modify existing records
/// - **Create**: Submit new records (applications, licenses, ...)
/// - **Manage**: Administer the service; satisfies `View` checks
/// - **FullAccess**: Every action on the service
///
/// Any other action segment is carried verbatim in [`Action::Other`], so the
/// vocabulary is never closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// View/read access.
    View,

    /// Edit existing records.
    Edit,

    /// Create new records.
    Create,

    /// Administer the service.
    ///
    /// Satisfies checks for `View` on the same service.
    Manage,

    /// Synthetic action granting every action on the service.
    FullAccess,

    /// Any action outside the conventional vocabulary, including the empty
    /// action of a malformed permission string.
    Other(String),
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Create => "create",
            Action::Manage => "manage",
            Action::FullAccess => "fullaccess",
            Action::Other(s) => s,
        }
    }

    /// Parse an action segment.
    ///
    /// Parsing is exact and case-sensitive: the resolver compares permission
    /// strings verbatim, so `"View"` is not the same action as `"view"`.
    ///
    /// # Example
    ///
    /// ```
    /// use palms_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("view"), Action::View);
    /// assert_eq!(Action::parse("fullaccess"), Action::FullAccess);
    /// assert_eq!(Action::parse("approve"), Action::Other("approve".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "view" => Action::View,
            "edit" => Action::Edit,
            "create" => Action::Create,
            "manage" => Action::Manage,
            "fullaccess" => Action::FullAccess,
            other => Action::Other(other.to_string()),
        }
    }

    /// The conventional actions, in privilege order.
    pub fn conventional() -> [Action; 5] {
        [
            Action::View,
            Action::Edit,
            Action::Create,
            Action::Manage,
            Action::FullAccess,
        ]
    }

    /// Check if this is one of the conventional actions.
    pub fn is_conventional(&self) -> bool {
        !matches!(self, Action::Other(_))
    }

    /// Check if this is a read-only action.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::View)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Action::parse(&s)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("view"), Action::View);
        assert_eq!(Action::parse("edit"), Action::Edit);
        assert_eq!(Action::parse("create"), Action::Create);
        assert_eq!(Action::parse("manage"), Action::Manage);
        assert_eq!(Action::parse("fullaccess"), Action::FullAccess);

        assert_eq!(Action::parse("View"), Action::Other("View".to_string()));
        assert_eq!(Action::parse(""), Action::Other(String::new()));
    }

    #[test]
    fn test_action_as_str() {
        for action in Action::conventional() {
            assert_eq!(Action::parse(action.as_str()), action);
        }
        assert_eq!(Action::Other("approve".into()).as_str(), "approve");
    }

    #[test]
    fn test_is_conventional() {
        assert!(Action::View.is_conventional());
        assert!(!Action::Other("print".into()).is_conventional());
        assert!(Action::View.is_read_only());
        assert!(!Action::Edit.is_read_only());
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&Action::FullAccess).unwrap();
        assert_eq!(json, "\"fullaccess\"");

        let parsed: Action = serde_json::from_str("\"renew\"").unwrap();
        assert_eq!(parsed, Action::Other("renew".to_string()));
    }
}
