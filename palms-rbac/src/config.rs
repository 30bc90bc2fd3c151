//! RBAC configuration.
//!
//! Selects the role table and the service-match policy. Configuration is
//! loaded from environment variables with defaults suitable for local
//! development (built-in table, prefix matching).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::warn;

use crate::error::{RbacError, RbacResult};
use crate::resolver::{PermissionResolver, ServiceMatch};
use crate::roles::RolePermissionTable;

/// Environment variable naming a JSON role table file.
pub const ROLE_TABLE_ENV: &str = "PALMS_ROLE_TABLE";

/// Environment variable selecting the service-match policy.
pub const SERVICE_MATCH_ENV: &str = "PALMS_SERVICE_MATCH";

/// RBAC configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Path to a JSON role table. `None` uses the built-in table.
    pub role_table_path: Option<PathBuf>,

    /// How granted permissions are scoped to the checked service.
    pub service_match: ServiceMatch,
}

impl RbacConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PALMS_ROLE_TABLE`: Path to a JSON role table (default: built-in table)
    /// - `PALMS_SERVICE_MATCH`: `prefix` or `segment` (default: prefix)
    ///
    /// An unrecognised policy falls back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RbacConfig::from_env`], but rejects unrecognised values.
    pub fn try_from_env() -> RbacResult<Self> {
        Self::try_from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        Self {
            role_table_path: role_table_path(&lookup),
            service_match: lookup(SERVICE_MATCH_ENV)
                .and_then(|s| match s.parse::<ServiceMatch>() {
                    Ok(policy) => Some(policy),
                    Err(e) => {
                        warn!(key = SERVICE_MATCH_ENV, value = %s, error = %e, "Ignoring invalid setting");
                        None
                    }
                })
                .unwrap_or(default.service_match),
        }
    }

    pub(crate) fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RbacResult<Self> {
        let service_match = match lookup(SERVICE_MATCH_ENV) {
            Some(s) => s.parse::<ServiceMatch>().map_err(|_| RbacError::Config {
                key: SERVICE_MATCH_ENV.to_string(),
                message: format!("expected \"prefix\" or \"segment\", got {s:?}"),
            })?,
            None => ServiceMatch::default(),
        };

        Ok(Self {
            role_table_path: role_table_path(&lookup),
            service_match,
        })
    }

    /// Build the resolver this configuration describes.
    pub fn resolver(&self) -> PermissionResolver {
        PermissionResolver::new().with_service_match(self.service_match)
    }

    /// Load the configured role table.
    ///
    /// Borrows the built-in table when no path is configured.
    pub fn load_table(&self) -> RbacResult<Cow<'static, RolePermissionTable>> {
        match &self.role_table_path {
            Some(path) => RolePermissionTable::from_path(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(RolePermissionTable::builtin())),
        }
    }
}

fn role_table_path(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    lookup(ROLE_TABLE_ENV)
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RbacConfig::default();
        assert!(config.role_table_path.is_none());
        assert_eq!(config.service_match, ServiceMatch::Prefix);
        assert_eq!(config.resolver(), PermissionResolver::new());
    }

    #[test]
    fn test_from_lookup() {
        let config = RbacConfig::from_lookup(lookup(&[
            (ROLE_TABLE_ENV, "/etc/palms/roles.json"),
            (SERVICE_MATCH_ENV, "segment"),
        ]));
        assert_eq!(config.role_table_path, Some(PathBuf::from("/etc/palms/roles.json")));
        assert_eq!(config.resolver().service_match(), ServiceMatch::Segment);
    }

    #[test]
    fn test_invalid_policy_falls_back() {
        let config = RbacConfig::from_lookup(lookup(&[(SERVICE_MATCH_ENV, "fuzzy")]));
        assert_eq!(config.service_match, ServiceMatch::Prefix);

        let err = RbacConfig::try_from_lookup(lookup(&[(SERVICE_MATCH_ENV, "fuzzy")])).unwrap_err();
        assert!(matches!(err, RbacError::Config { ref key, .. } if key == SERVICE_MATCH_ENV));
    }

    #[test]
    fn test_blank_table_path_ignored() {
        let config = RbacConfig::from_lookup(lookup(&[(ROLE_TABLE_ENV, "  ")]));
        assert!(config.role_table_path.is_none());
    }

    #[test]
    fn test_load_builtin_table() {
        let table = RbacConfig::default().load_table().unwrap();
        assert!(matches!(table, Cow::Borrowed(_)));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_load_missing_table() {
        let config = RbacConfig {
            role_table_path: Some(PathBuf::from("/nonexistent/palms/roles.json")),
            ..Default::default()
        };
        assert!(matches!(config.load_table(), Err(RbacError::Io { .. })));
    }
}
