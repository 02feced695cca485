//! Dimensions and configurations of the discrete search space.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single tunable axis: a name plus the ordered list of allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Human-readable dimension name (e.g. "Win %").
    pub name: String,
    /// Allowed discrete values, in ascending order of adjacency.
    pub values: Vec<i64>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Position of `value` within the ordered allowed list.
    pub fn position_of(&self, value: i64) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }
}

/// One point in the search space: exactly one value per dimension.
///
/// Backed by a sorted map so equality and hashing are independent of the
/// order dimensions were assigned in — this is the canonical form used as
/// the annealer's visited-set key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    values: BTreeMap<String, i64>,
}

impl Configuration {
    pub fn new(values: BTreeMap<String, i64>) -> Self {
        Self { values }
    }

    pub fn value(&self, dimension: &str) -> Option<i64> {
        self.values.get(dimension).copied()
    }

    /// Returns a fresh configuration with one dimension reassigned.
    /// The receiver is never mutated; every step produces a new value.
    pub fn with_value(&self, dimension: &str, value: i64) -> Self {
        let mut values = self.values.clone();
        values.insert(dimension.to_string(), value);
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of dimensions on which `self` and `other` disagree.
    pub fn distance(&self, other: &Configuration) -> usize {
        self.values
            .iter()
            .filter(|(k, v)| other.value(k) != Some(**v))
            .count()
    }
}

impl FromIterator<(String, i64)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, i64)]) -> Configuration {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn equality_is_order_independent() {
        let a = config(&[("seed", 3), ("pace", 7)]);
        let b = config(&[("pace", 7), ("seed", 3)]);
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut visited = HashSet::new();
        visited.insert(a);
        assert!(visited.contains(&b));
    }

    #[test]
    fn with_value_leaves_original_untouched() {
        let a = config(&[("seed", 3), ("pace", 7)]);
        let b = a.with_value("pace", 8);
        assert_eq!(a.value("pace"), Some(7));
        assert_eq!(b.value("pace"), Some(8));
        assert_eq!(a.distance(&b), 1);
    }

    #[test]
    fn dimension_position_lookup() {
        let dim = Dimension::new("seed", vec![0, 2, 4, 6]);
        assert_eq!(dim.position_of(4), Some(2));
        assert_eq!(dim.position_of(5), None);
    }
}
