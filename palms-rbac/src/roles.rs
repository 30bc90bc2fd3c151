//! Role permission tables
//!
//! Maps a permission-group key and a role id to the permissions that role
//! holds. Tables are immutable once built: load one at startup (from JSON or
//! the built-in table) and share it by reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error};

use crate::error::{RbacError, RbacResult};
use crate::permissions::Permission;
use crate::resolver::PermissionResolver;

/// Built-in role table shipped with the crate.
const BUILTIN_ROLES_JSON: &str = include_str!("../data/roles.json");

static BUILTIN_TABLE: OnceLock<RolePermissionTable> = OnceLock::new();

/// Immutable `group -> role -> permissions` lookup.
///
/// # Examples
///
/// ```
/// use palms_rbac::RolePermissionTable;
///
/// let table = RolePermissionTable::from_json(r#"{
///     "citizen": { "applicant": ["applications.view", "applications.create"] }
/// }"#).unwrap();
///
/// assert_eq!(table.permissions_for("citizen", "applicant").len(), 2);
/// assert!(table.permissions_for("citizen", "unknown").is_empty());
/// assert!(table.permissions_for("unknown", "applicant").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissionTable {
    groups: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl RolePermissionTable {
    /// Build a table from nested maps, validating every permission string.
    pub fn new(groups: BTreeMap<String, BTreeMap<String, Vec<String>>>) -> RbacResult<Self> {
        let table = Self { groups };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from JSON text.
    ///
    /// Every entry must be a well-formed `service.action` permission.
    pub fn from_json(json: &str) -> RbacResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Read and parse a JSON table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> RbacResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RbacError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            groups = table.groups.len(),
            "Loaded role permission table"
        );
        Ok(table)
    }

    /// The process-wide built-in table.
    ///
    /// Initialised on first use and never modified afterwards.
    pub fn builtin() -> &'static RolePermissionTable {
        BUILTIN_TABLE.get_or_init(|| {
            Self::from_json(BUILTIN_ROLES_JSON).unwrap_or_else(|e| {
                error!(error = %e, "Built-in role table is invalid; using an empty table");
                Self::default()
            })
        })
    }

    fn validate(&self) -> RbacResult<()> {
        for roles in self.groups.values() {
            for perms in roles.values() {
                for perm in perms {
                    let parsed = Permission::parse_strict(perm)?;
                    if !parsed.action.is_conventional() {
                        debug!(permission = %perm, "Role table grants a custom action");
                    }
                }
            }
        }
        Ok(())
    }

    /// Permissions held by `role` in `group`.
    ///
    /// Returns an empty slice when either key is absent.
    pub fn permissions_for(&self, group: &str, role: &str) -> &[String] {
        self.groups
            .get(group)
            .and_then(|roles| roles.get(role))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Group keys, in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Role ids in `group`, in sorted order. Empty for an unknown group.
    pub fn roles(&self, group: &str) -> impl Iterator<Item = &str> {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|roles| roles.keys().map(String::as_str))
    }

    /// Check if the table has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up `role` in `group` and resolve `permission_to_check` against it.
    pub fn resolve_for_role(
        &self,
        resolver: &PermissionResolver,
        group: &str,
        role: &str,
        permission_to_check: &str,
        exact: bool,
    ) -> bool {
        resolver.resolve(self.permissions_for(group, role), permission_to_check, exact)
    }
}
