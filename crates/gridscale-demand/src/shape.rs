//! Resource shapes — the value type demand is counted in.
//!
//! A shape is an immutable resource-name → quantity mapping
//! (`{CPU: 4, GPU: 0.5}`). Two shapes are equal iff their mappings are
//! equal regardless of insertion order, and equal shapes hash equally,
//! so a shape can serve as a multiset element or `HashMap` key when
//! tallying demand per shape.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// An immutable set of resource requirements for one request.
///
/// Stored as name-sorted `(name, quantity)` pairs, deduplicated at
/// construction (later entries win). Quantities are `f64` — fractional
/// requests such as `{CPU: 0.5}` are valid. On the wire a shape is a
/// plain JSON map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ResourceShape {
    resources: Vec<(String, f64)>,
}

impl ResourceShape {
    /// Build a shape from `(name, quantity)` pairs.
    pub fn new<I, S>(resources: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let map: BTreeMap<String, f64> = resources
            .into_iter()
            .map(|(name, quantity)| (name.into(), quantity))
            .collect();
        Self {
            resources: map.into_iter().collect(),
        }
    }

    /// Quantity of the named resource, if the shape requests it.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.resources
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|i| self.resources[i].1)
    }

    /// Iterate entries in canonical (name-sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.resources.iter().map(|(name, q)| (name.as_str(), *q))
    }

    /// Number of distinct resource names in the shape.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True if the shape requests nothing.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Canonical bit pattern for quantity comparison and hashing.
///
/// Folds `-0.0` into `0.0` and all NaN payloads into one pattern so
/// that equality and hashing stay consistent on untrusted input.
fn canonical_bits(quantity: f64) -> u64 {
    if quantity.is_nan() {
        f64::NAN.to_bits()
    } else if quantity == 0.0 {
        0
    } else {
        quantity.to_bits()
    }
}

impl PartialEq for ResourceShape {
    fn eq(&self, other: &Self) -> bool {
        self.resources.len() == other.resources.len()
            && self
                .resources
                .iter()
                .zip(&other.resources)
                .all(|((an, aq), (bn, bq))| an == bn && canonical_bits(*aq) == canonical_bits(*bq))
    }
}

impl Eq for ResourceShape {}

impl Hash for ResourceShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resources.len().hash(state);
        for (name, quantity) in &self.resources {
            name.hash(state);
            canonical_bits(*quantity).hash(state);
        }
    }
}

impl From<BTreeMap<String, f64>> for ResourceShape {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self {
            resources: map.into_iter().collect(),
        }
    }
}

impl From<ResourceShape> for BTreeMap<String, f64> {
    fn from(shape: ResourceShape) -> Self {
        shape.resources.into_iter().collect()
    }
}

impl fmt::Display for ResourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, quantity)) in self.resources.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {quantity}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn equality_ignores_insertion_order() {
        let a = ResourceShape::new([("CPU", 4.0), ("GPU", 1.0)]);
        let b = ResourceShape::new([("GPU", 1.0), ("CPU", 4.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn different_quantities_are_not_equal() {
        let a = ResourceShape::new([("CPU", 4.0)]);
        let b = ResourceShape::new([("CPU", 2.0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn different_names_are_not_equal() {
        let a = ResourceShape::new([("CPU", 1.0)]);
        let b = ResourceShape::new([("GPU", 1.0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn negative_zero_equals_zero() {
        let a = ResourceShape::new([("CPU", 0.0)]);
        let b = ResourceShape::new([("CPU", -0.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_names_keep_last_entry() {
        let shape = ResourceShape::new([("CPU", 1.0), ("CPU", 2.0)]);
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.get("CPU"), Some(2.0));
    }

    #[test]
    fn usable_as_hash_map_key() {
        let mut counts: HashMap<ResourceShape, u64> = HashMap::new();
        *counts
            .entry(ResourceShape::new([("CPU", 1.0), ("GPU", 2.0)]))
            .or_insert(0) += 1;
        *counts
            .entry(ResourceShape::new([("GPU", 2.0), ("CPU", 1.0)]))
            .or_insert(0) += 1;

        assert_eq!(counts.len(), 1);
        assert_eq!(
            counts[&ResourceShape::new([("CPU", 1.0), ("GPU", 2.0)])],
            2
        );
    }

    #[test]
    fn get_on_missing_name() {
        let shape = ResourceShape::new([("CPU", 1.0)]);
        assert_eq!(shape.get("GPU"), None);
    }

    #[test]
    fn serde_round_trips_as_map() {
        let shape = ResourceShape::new([("GPU", 0.5), ("CPU", 8.0)]);
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r#"{"CPU":8.0,"GPU":0.5}"#);

        let back: ResourceShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn display_is_readable() {
        let shape = ResourceShape::new([("GPU", 0.5), ("CPU", 2.0)]);
        assert_eq!(shape.to_string(), "{CPU: 2, GPU: 0.5}");
    }
}
