//! # Filter Criteria
//!
//! Insertion-ordered `field key -> selection` mapping. Key order decides
//! token order in the built expression, so it must survive JSON round trips;
//! the (de)serializers below walk the map in document order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::FilterResult;
use crate::option::FilterValue;

/// Filter selections keyed by field, in insertion order.
///
/// # Example
///
/// ```
/// use palms_filter::{FilterCriteria, FilterOption};
///
/// let mut criteria = FilterCriteria::new();
/// criteria.insert("type", FilterOption::simple("csv"));
/// criteria.insert("tag", vec![FilterOption::simple("a"), FilterOption::simple("b")]);
///
/// let keys: Vec<_> = criteria.keys().collect();
/// assert_eq!(keys, ["type", "tag"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    entries: Vec<(String, FilterValue)>,
}

impl FilterCriteria {
    /// Create empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the UI's filter state from JSON, keeping key order.
    ///
    /// A later duplicate key replaces the earlier value in place.
    pub fn from_json(json: &str) -> FilterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the selection for `key`.
    ///
    /// An existing key keeps its position; returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Option<FilterValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Selection for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove every selection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Field keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, selection)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut criteria = FilterCriteria::new();
        for (key, value) in iter {
            criteria.insert(key, value);
        }
        criteria
    }
}

impl Serialize for FilterCriteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilterCriteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CriteriaVisitor;

        impl<'de> Visitor<'de> for CriteriaVisitor {
            type Value = FilterCriteria;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to filter options")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut criteria = FilterCriteria::new();
                while let Some((key, value)) = access.next_entry::<String, FilterValue>()? {
                    criteria.insert(key, value);
                }
                Ok(criteria)
            }
        }

        deserializer.deserialize_map(CriteriaVisitor)
    }
}
