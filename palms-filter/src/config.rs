//! Filter configuration.
//!
//! Loaded from environment variables; the default embeds values verbatim,
//! which is what the search API currently expects.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::builder::{EscapeMode, FilterExpressionBuilder};
use crate::error::{FilterError, FilterResult};

/// Environment variable selecting the escape mode.
pub const ESCAPE_ENV: &str = "PALMS_FILTER_ESCAPE";

/// Filter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// How search and option values are embedded.
    pub escape: EscapeMode,
}

impl FilterConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PALMS_FILTER_ESCAPE`: `raw` or `backslash` (default: raw)
    ///
    /// An unrecognised mode falls back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ESCAPE_ENV).ok())
    }

    /// Like [`FilterConfig::from_env`], but rejects unrecognised values.
    pub fn try_from_env() -> FilterResult<Self> {
        Self::try_from_value(std::env::var(ESCAPE_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        let escape = value
            .and_then(|s| match s.parse::<EscapeMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!(key = ESCAPE_ENV, value = %s, error = %e, "Ignoring invalid setting");
                    None
                }
            })
            .unwrap_or_default();
        Self { escape }
    }

    fn try_from_value(value: Option<String>) -> FilterResult<Self> {
        let escape = match value {
            Some(s) => s.parse::<EscapeMode>().map_err(|_| FilterError::Config {
                key: ESCAPE_ENV.to_string(),
                message: format!("expected \"raw\" or \"backslash\", got {s:?}"),
            })?,
            None => EscapeMode::default(),
        };
        Ok(Self { escape })
    }

    /// Build the expression builder this configuration describes.
    pub fn builder(&self) -> FilterExpressionBuilder {
        FilterExpressionBuilder::new().with_escape(self.escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.escape, EscapeMode::Raw);
        assert_eq!(config.builder(), FilterExpressionBuilder::new());
    }

    #[test]
    fn test_from_value() {
        assert_eq!(FilterConfig::from_value(None).escape, EscapeMode::Raw);
        assert_eq!(
            FilterConfig::from_value(Some("backslash".into())).builder().escape(),
            EscapeMode::Backslash
        );
        assert_eq!(FilterConfig::from_value(Some("url".into())).escape, EscapeMode::Raw);
    }

    #[test]
    fn test_try_from_value() {
        assert!(FilterConfig::try_from_value(Some("raw".into())).is_ok());
        let err = FilterConfig::try_from_value(Some("url".into())).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration value for PALMS_FILTER_ESCAPE"));
    }
}
