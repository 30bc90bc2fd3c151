//! # PALMS Filter Expressions
//!
//! This crate turns list-screen search and filter state into the filter
//! string accepted by the PALMS backend search API.
//!
//! ## Overview
//!
//! - **Options**: `{label, value}` pairs selected in filter controls
//! - **Criteria**: insertion-ordered field key -> option(s) mapping
//! - **Builder**: joins a wildcard search token and `key:value` tokens
//!
//! ## Expression Format
//!
//! ```text
//! ApplicationNumber:*FW-2024*,status:submitted,class:1.3g,class:1.4g
//! └─ search (optional) ─────┘ └─ one token per selected option ────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use palms_filter::{FilterConfig, FilterCriteria};
//!
//! let filters = FilterCriteria::from_json(r#"{
//!     "class": [{"label": "1.3G", "value": "1.3g"}, {"label": "1.4G", "value": "1.4g"}]
//! }"#).unwrap();
//!
//! let builder = FilterConfig::default().builder();
//! assert_eq!(
//!     builder.build("LicenseNumber", Some("LIC"), Some(&filters)),
//!     "LicenseNumber:*LIC*,class:1.3g,class:1.4g"
//! );
//! ```
//!
//! ## Escaping
//!
//! Values are embedded verbatim by default. Set `PALMS_FILTER_ESCAPE=backslash`
//! (or use [`EscapeMode::Backslash`]) to escape `\ * : ,`.

pub mod builder;
pub mod config;
pub mod criteria;
pub mod error;
pub mod option;

// Re-export main types for convenience
pub use builder::{build_filter_expression, escape_special, EscapeMode, FilterExpressionBuilder};
pub use config::FilterConfig;
pub use criteria::FilterCriteria;
pub use error::{FilterError, FilterResult};
pub use option::{FilterOption, FilterValue};
