//! # Permission Resolution
//!
//! Decides whether a flat list of granted permission strings satisfies a
//! permission check, honoring the portal's shortcut rules:
//!
//! ```text
//! any.*                 -> always granted (even with exact = true)
//! exact = true          -> verbatim membership only
//! <service>.fullaccess  -> grants every action on <service>
//! <service>.manage      -> grants <service>.view
//! otherwise             -> verbatim membership
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};
use crate::permissions::{split_permission, Permission, ANY_SERVICE};

/// Loose service scoping: does `granted` start with `service`?
///
/// Not segment-aware, so `"applicationsx.view"` is scoped to service
/// `"applications"`. Intentionally permissive; see [`ServiceMatch::Segment`]
/// for the strict alternative.
pub fn has_service_prefix(granted: &str, service: &str) -> bool {
    granted.starts_with(service)
}

/// Segment-aware service scoping: is the service segment of `granted` equal
/// to `service`?
pub fn has_service_segment(granted: &str, service: &str) -> bool {
    split_permission(granted).0 == service
}

/// Policy used to scope granted permissions to the checked service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMatch {
    /// String-prefix match ([`has_service_prefix`]).
    #[default]
    Prefix,
    /// Exact service-segment match ([`has_service_segment`]).
    Segment,
}

impl ServiceMatch {
    /// Apply the policy.
    pub fn matches(&self, granted: &str, service: &str) -> bool {
        match self {
            ServiceMatch::Prefix => has_service_prefix(granted, service),
            ServiceMatch::Segment => has_service_segment(granted, service),
        }
    }

    /// Get the string representation of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMatch::Prefix => "prefix",
            ServiceMatch::Segment => "segment",
        }
    }
}

impl FromStr for ServiceMatch {
    type Err = RbacError;

    fn from_str(s: &str) -> RbacResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "prefix" | "loose" => Ok(ServiceMatch::Prefix),
            "segment" | "strict" => Ok(ServiceMatch::Segment),
            other => Err(RbacError::Config {
                key: "service_match".to_string(),
                message: format!("unknown service match policy {other:?}"),
            }),
        }
    }
}

impl fmt::Display for ServiceMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that produced a permission outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The checked service is `any`.
    AnyService,
    /// `exact` was requested and the permission is held verbatim.
    ExactMatch,
    /// `<service>.fullaccess` is held.
    FullAccess,
    /// A `view` check satisfied by `<service>.manage`.
    ManageImpliesView,
    /// The permission is held verbatim.
    Direct,
    /// No rule granted access.
    Denied,
}

impl Decision {
    /// Whether this decision grants access.
    pub fn is_granted(&self) -> bool {
        !matches!(self, Decision::Denied)
    }

    /// Get the string representation of the decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AnyService => "any_service",
            Decision::ExactMatch => "exact_match",
            Decision::FullAccess => "full_access",
            Decision::ManageImpliesView => "manage_implies_view",
            Decision::Direct => "direct",
            Decision::Denied => "denied",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves permission checks against granted permission lists.
///
/// Stateless apart from its service-match policy; cheap to copy and safe to
/// share between threads.
///
/// # Example
///
/// ```
/// use palms_rbac::resolver::{PermissionResolver, ServiceMatch};
///
/// let granted = ["applications.manage", "licenses.fullaccess"];
/// let resolver = PermissionResolver::new();
///
/// assert!(resolver.resolve(&granted, "applications.view", false));
/// assert!(!resolver.resolve(&granted, "applications.edit", false));
/// assert!(resolver.resolve(&granted, "licenses.renew", false));
///
/// let strict = PermissionResolver::new().with_service_match(ServiceMatch::Segment);
/// assert!(strict.resolve(&granted, "licenses.view", false));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionResolver {
    service_match: ServiceMatch,
}

impl PermissionResolver {
    /// Create a resolver using the default (prefix) service-match policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the service-match policy.
    pub fn with_service_match(mut self, service_match: ServiceMatch) -> Self {
        self.service_match = service_match;
        self
    }

    /// The active service-match policy.
    pub fn service_match(&self) -> ServiceMatch {
        self.service_match
    }

    /// Decide whether `granted` satisfies `permission_to_check`.
    pub fn resolve<S: AsRef<str>>(
        &self,
        granted: &[S],
        permission_to_check: &str,
        exact: bool,
    ) -> bool {
        self.explain(granted, permission_to_check, exact).is_granted()
    }

    /// Decide and report which rule produced the outcome.
    pub fn explain<S: AsRef<str>>(
        &self,
        granted: &[S],
        permission_to_check: &str,
        exact: bool,
    ) -> Decision {
        let decision = self.decide(granted, permission_to_check, exact);
        debug!(
            permission = permission_to_check,
            exact,
            policy = %self.service_match,
            decision = %decision,
            "Resolved permission check"
        );
        decision
    }

    fn decide<S: AsRef<str>>(
        &self,
        granted: &[S],
        permission_to_check: &str,
        exact: bool,
    ) -> Decision {
        let held = |perm: &str| granted.iter().any(|g| g.as_ref() == perm);
        let (service, action) = split_permission(permission_to_check);

        if service == ANY_SERVICE {
            return Decision::AnyService;
        }

        if exact {
            return if held(permission_to_check) {
                Decision::ExactMatch
            } else {
                Decision::Denied
            };
        }

        let scoped: Vec<Permission> = granted
            .iter()
            .map(|g| g.as_ref())
            .filter(|g| self.service_match.matches(g, service))
            .map(Permission::parse)
            .filter(|p| p.service == service)
            .collect();

        if scoped.iter().any(|p| p.action == Action::FullAccess) {
            return Decision::FullAccess;
        }

        if Action::parse(action) == Action::View
            && scoped.iter().any(|p| p.action == Action::Manage)
        {
            return Decision::ManageImpliesView;
        }

        if held(permission_to_check) {
            Decision::Direct
        } else {
            Decision::Denied
        }
    }

    /// True if any of `checks` resolves; false for an empty list.
    pub fn resolve_any<S: AsRef<str>, C: AsRef<str>>(
        &self,
        granted: &[S],
        checks: &[C],
        exact: bool,
    ) -> bool {
        checks
            .iter()
            .any(|check| self.resolve(granted, check.as_ref(), exact))
    }

    /// True if every one of `checks` resolves; true for an empty list.
    pub fn resolve_all<S: AsRef<str>, C: AsRef<str>>(
        &self,
        granted: &[S],
        checks: &[C],
        exact: bool,
    ) -> bool {
        checks
            .iter()
            .all(|check| self.resolve(granted, check.as_ref(), exact))
    }
}

/// Resolve a permission check with the default resolver.
///
/// # Example
///
/// ```
/// use palms_rbac::resolve;
///
/// assert!(resolve(&["x.manage"], "x.view", false));
/// assert!(!resolve(&["x.manage"], "x.edit", false));
/// assert!(resolve::<&str>(&[], "any.whatever", true));
/// ```
pub fn resolve<S: AsRef<str>>(granted: &[S], permission_to_check: &str, exact: bool) -> bool {
    PermissionResolver::new().resolve(granted, permission_to_check, exact)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_any_service_always_granted() {
        assert!(resolve(&NONE, "any.whatever", false));
        assert!(resolve(&NONE, "any.whatever", true));
        assert!(resolve(&["x.view"], "any.view", true));
        assert!(resolve(&NONE, "any", false));
        assert_eq!(
            PermissionResolver::new().explain(&NONE, "any.edit", true),
            Decision::AnyService
        );
    }

    #[test]
    fn test_full_access() {
        assert!(resolve(&["x.fullaccess"], "x.view", false));
        assert!(resolve(&["x.fullaccess"], "x.anything", false));
        assert!(!resolve(&["y.fullaccess"], "x.view", false));
        assert_eq!(
            PermissionResolver::new().explain(&["x.fullaccess"], "x.edit", false),
            Decision::FullAccess
        );
    }

    #[test]
    fn test_full_access_ignored_when_exact() {
        assert!(!resolve(&["x.fullaccess"], "x.view", true));
    }

    #[test]
    fn test_manage_implies_view_only() {
        assert!(resolve(&["x.manage"], "x.view", false));
        assert!(!resolve(&["x.manage"], "x.edit", false));
        assert!(!resolve(&["x.manage"], "x.create", false));
        assert!(resolve(&["x.manage"], "x.manage", false));
        assert_eq!(
            PermissionResolver::new().explain(&["x.manage"], "x.view", false),
            Decision::ManageImpliesView
        );
    }

    #[test]
    fn test_exact() {
        assert!(resolve(&["x.edit"], "x.edit", true));
        assert!(!resolve(&["x.edit"], "x.edit.extra", true));
        assert!(!resolve(&["x.manage"], "x.view", true));
    }

    #[test]
    fn test_direct_membership() {
        assert!(!resolve(&NONE, "x.view", false));
        assert!(resolve(&["x.view"], "x.view", false));
        assert!(!resolve(&["x.view"], "x.edit", false));
        assert_eq!(
            PermissionResolver::new().explain(&["x.view"], "x.view", false),
            Decision::Direct
        );
    }

    #[test]
    fn test_malformed_check_is_total() {
        assert!(!resolve(&["x.view"], "x", false));
        assert!(resolve(&["x"], "x", false));
        assert!(!resolve(&["x.view"], "", false));
        assert!(resolve(&[""], "", true));
        assert!(!resolve(&["x.view"], ".view", false));
    }

    #[test]
    fn test_duplicates_and_order_irrelevant() {
        let a = ["x.view", "y.manage", "x.view"];
        let b = ["y.manage", "x.view"];
        for check in ["x.view", "y.view", "y.edit", "z.view"] {
            assert_eq!(resolve(&a, check, false), resolve(&b, check, false));
        }
    }

    #[test]
    fn test_service_prefix_policy() {
        assert!(has_service_prefix("applicationsx.view", "applications"));
        assert!(!has_service_segment("applicationsx.view", "applications"));
        assert!(has_service_segment("applications.view", "applications"));
    }

    #[test]
    fn test_segment_policy_agrees_on_shortcuts() {
        let strict = PermissionResolver::new().with_service_match(ServiceMatch::Segment);
        assert_eq!(strict.service_match(), ServiceMatch::Segment);
        assert!(strict.resolve(&["x.fullaccess"], "x.view", false));
        assert!(strict.resolve(&["x.manage"], "x.view", false));
        assert!(!strict.resolve(&["xx.fullaccess"], "x.view", false));
    }

    #[test]
    fn test_service_match_parsing() {
        assert_eq!("prefix".parse::<ServiceMatch>().unwrap(), ServiceMatch::Prefix);
        assert_eq!(" Segment ".parse::<ServiceMatch>().unwrap(), ServiceMatch::Segment);
        assert!("fuzzy".parse::<ServiceMatch>().is_err());
        assert_eq!(ServiceMatch::default(), ServiceMatch::Prefix);
    }

    #[test]
    fn test_resolve_any_and_all() {
        let resolver = PermissionResolver::new();
        let granted = ["permits.view", "licenses.manage"];

        assert!(resolver.resolve_any(&granted, &["permits.edit", "licenses.view"], false));
        assert!(!resolver.resolve_any(&granted, &["permits.edit", "licenses.edit"], false));
        assert!(!resolver.resolve_any(&granted, &NONE, false));

        assert!(resolver.resolve_all(&granted, &["permits.view", "licenses.view"], false));
        assert!(!resolver.resolve_all(&granted, &["permits.view", "licenses.edit"], false));
        assert!(resolver.resolve_all(&granted, &NONE, false));
    }

    #[test]
    fn test_owned_strings() {
        let granted = vec!["x.view".to_string()];
        assert!(resolve(&granted, "x.view", false));
    }
}
