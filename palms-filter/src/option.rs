//! # Filter Options
//!
//! A filter option is one selectable value in a list-screen filter control.
//! Controls are either single-select (one option) or multi-select (a list).

use serde::{Deserialize, Serialize};

/// One selectable filter value.
///
/// `label` is what the control displays; `value` is what goes into the
/// filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    /// Display label.
    pub label: String,
    /// Value used in the filter expression.
    pub value: String,
}

impl FilterOption {
    /// Create a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create an option whose label equals its value.
    pub fn simple(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// The current selection of one filter control.
///
/// Serialized untagged, matching the UI's filter state: a bare
/// `{"label", "value"}` object or an array of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Multi-select; may be empty.
    Many(Vec<FilterOption>),
    /// Single-select.
    One(FilterOption),
}

impl FilterValue {
    /// Selected options, in order.
    pub fn options(&self) -> &[FilterOption] {
        match self {
            FilterValue::Many(options) => options,
            FilterValue::One(option) => std::slice::from_ref(option),
        }
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.options().is_empty()
    }
}

impl From<FilterOption> for FilterValue {
    fn from(option: FilterOption) -> Self {
        FilterValue::One(option)
    }
}

impl From<Vec<FilterOption>> for FilterValue {
    fn from(options: Vec<FilterOption>) -> Self {
        FilterValue::Many(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_constructors() {
        let opt = FilterOption::new("CSV file", "csv");
        assert_eq!(opt.label, "CSV file");
        assert_eq!(opt.value, "csv");
        assert_eq!(FilterOption::simple("csv"), FilterOption::new("csv", "csv"));
    }

    #[test]
    fn test_value_options() {
        let one: FilterValue = FilterOption::simple("a").into();
        assert_eq!(one.options().len(), 1);
        assert!(!one.is_empty());

        let many: FilterValue = vec![FilterOption::simple("a"), FilterOption::simple("b")].into();
        assert_eq!(many.options()[1].value, "b");

        assert!(FilterValue::Many(vec![]).is_empty());
    }

    #[test]
    fn test_value_deserialize_untagged() {
        let one: FilterValue = serde_json::from_str(r#"{"label": "csv", "value": "csv"}"#).unwrap();
        assert_eq!(one, FilterValue::One(FilterOption::simple("csv")));

        let many: FilterValue =
            serde_json::from_str(r#"[{"label": "a", "value": "a"}, {"label": "b", "value": "b"}]"#)
                .unwrap();
        assert_eq!(many.options().len(), 2);

        let empty: FilterValue = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        assert!(serde_json::from_str::<FilterValue>(r#""csv""#).is_err());
    }
}
