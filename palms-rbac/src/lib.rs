//! # PALMS RBAC (Role-Based Access Control)
//!
//! This crate decides whether a user's granted permissions allow an action
//! in the PALMS fireworks permits & licensing portal. Results gate UI
//! affordances such as edit controls and access-denied redirects.
//!
//! ## Overview
//!
//! The palms-rbac crate handles:
//! - **Permissions**: `service.action` strings (e.g. `applications.edit`)
//! - **Actions**: `view`, `edit`, `create`, `manage`, `fullaccess`, or any other
//! - **Resolution**: shortcut rules over a flat granted-permission list
//! - **Role tables**: static `group -> role -> permissions` lookups
//!
//! ## Resolution Rules
//!
//! ```text
//! any.<anything>        always granted
//! exact = true          verbatim membership only
//! <service>.fullaccess  grants every action on <service>
//! <service>.manage      grants <service>.view
//! otherwise             verbatim membership
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use palms_rbac::{resolve, RbacConfig, RolePermissionTable};
//!
//! let granted = ["applications.manage", "licenses.view"];
//! assert!(resolve(&granted, "applications.view", false));
//! assert!(!resolve(&granted, "applications.edit", false));
//!
//! let config = RbacConfig::default();
//! let resolver = config.resolver();
//! let table = RolePermissionTable::builtin();
//! let perms = table.permissions_for("citizen", "applicant");
//! assert!(resolver.resolve(perms, "applications.create", false));
//! ```
//!
//! ## Configuration
//!
//! - `PALMS_ROLE_TABLE`: JSON role table path (built-in table when unset)
//! - `PALMS_SERVICE_MATCH`: `prefix` (default) or `segment`

pub mod actions;
pub mod config;
pub mod error;
pub mod permissions;
pub mod resolver;
pub mod roles;

// Re-export main types for convenience
pub use actions::Action;
pub use config::RbacConfig;
pub use error::{RbacError, RbacResult};
pub use permissions::Permission;
pub use resolver::{has_service_prefix, resolve, Decision, PermissionResolver, ServiceMatch};
pub use roles::RolePermissionTable;
