//! # Filter Expression Builder
//!
//! Produces the comma-separated filter string the backend list/search API
//! accepts:
//!
//! ```text
//! <identifier>:*<search>*,<key>:<value>,<key>:<value>,...
//! ```
//!
//! The wildcard token comes first and only when a non-empty search value is
//! given. Field tokens follow in criteria key order; a multi-select field
//! contributes one token per selected option.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::error::{FilterError, FilterResult};

/// Characters with meaning in the backend filter grammar.
pub const SPECIAL_CHARS: [char; 4] = ['\\', '*', ':', ','];

/// How search and option values are embedded in the expression.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Embed values verbatim.
    #[default]
    Raw,
    /// Prefix each of `\ * : ,` with a backslash.
    Backslash,
}

impl EscapeMode {
    /// Apply this mode to a value.
    ///
    /// # Example
    ///
    /// ```
    /// use palms_filter::EscapeMode;
    ///
    /// assert_eq!(EscapeMode::Raw.apply("a,b"), "a,b");
    /// assert_eq!(EscapeMode::Backslash.apply("a,b*"), "a\\,b\\*");
    /// ```
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            EscapeMode::Raw => Cow::Borrowed(value),
            EscapeMode::Backslash => escape_special(value),
        }
    }

    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            EscapeMode::Raw => "raw",
            EscapeMode::Backslash => "backslash",
        }
    }
}

impl FromStr for EscapeMode {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "none" => Ok(EscapeMode::Raw),
            "backslash" | "escape" => Ok(EscapeMode::Backslash),
            other => Err(FilterError::Config {
                key: "escape".to_string(),
                message: format!("unknown escape mode {other:?}"),
            }),
        }
    }
}

impl fmt::Display for EscapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backslash-escape every character in [`SPECIAL_CHARS`].
pub fn escape_special(value: &str) -> Cow<'_, str> {
    if !value.contains(SPECIAL_CHARS) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Builds filter expressions.
///
/// # Example
///
/// ```
/// use palms_filter::{FilterCriteria, FilterExpressionBuilder, FilterOption};
///
/// let mut filters = FilterCriteria::new();
/// filters.insert("status", FilterOption::new("Submitted", "submitted"));
///
/// let builder = FilterExpressionBuilder::new();
/// assert_eq!(
///     builder.build("ApplicationNumber", Some("FW-2024"), Some(&filters)),
///     "ApplicationNumber:*FW-2024*,status:submitted"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterExpressionBuilder {
    escape: EscapeMode,
}

impl FilterExpressionBuilder {
    /// Create a builder that embeds values verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the escape mode.
    pub fn with_escape(mut self, escape: EscapeMode) -> Self {
        self.escape = escape;
        self
    }

    /// The active escape mode.
    pub fn escape(&self) -> EscapeMode {
        self.escape
    }

    /// Build the expression.
    ///
    /// Returns `""` when there is neither a non-empty search value nor any
    /// selected option.
    pub fn build(
        &self,
        resource_name_identifier: &str,
        search_value: Option<&str>,
        filters: Option<&FilterCriteria>,
    ) -> String {
        let mut tokens = Vec::new();

        if let Some(search) = search_value.filter(|s| !s.is_empty()) {
            tokens.push(format!(
                "{}:*{}*",
                resource_name_identifier,
                self.escape.apply(search)
            ));
        }

        for (key, value) in filters.into_iter().flat_map(|f| f.iter()) {
            for option in value.options() {
                tokens.push(format!("{}:{}", key, self.escape.apply(&option.value)));
            }
        }

        let expression = tokens.join(",");
        debug!(
            identifier = resource_name_identifier,
            tokens = tokens.len(),
            escape = %self.escape,
            "Built filter expression"
        );
        expression
    }
}

/// Build a filter expression with values embedded verbatim.
///
/// # Example
///
/// ```
/// use palms_filter::build_filter_expression;
///
/// assert_eq!(build_filter_expression("DatasetName", Some("test"), None), "DatasetName:*test*");
/// assert_eq!(build_filter_expression("DatasetName", Some(""), None), "");
/// ```
pub fn build_filter_expression(
    resource_name_identifier: &str,
    search_value: Option<&str>,
    filters: Option<&FilterCriteria>,
) -> String {
    FilterExpressionBuilder::new().build(resource_name_identifier, search_value, filters)
}
