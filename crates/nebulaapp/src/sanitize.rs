//! # Sanitize and Schema Migration
//!
//! Ownership payloads arrive from two untrusted places: local storage and
//! imported files. Both may have been written by an older version (V1 stored
//! `true` for "owned", V2 stores copy counts) or edited by hand.
//!
//! Raw JSON is first read into [`RawOwnership`], a permissive tagged form, and then
//! converted by [`sanitize`] into an [`OwnershipMap`]. The raw form never leaves
//! this module's callers; the ledger only ever sees sanitized counts.
//!
//! ## Rules
//!
//! | Raw value          | Result                                    |
//! |--------------------|-------------------------------------------|
//! | finite number      | floored, clamped to `>= 0`, kept          |
//! | `true`             | `1` (V1 marker)                           |
//! | anything else      | dropped                                   |
//!
//! Keys are upper-cased. When two keys collide after upper-casing, the larger
//! count wins so the result does not depend on JSON key order.

use serde_json::Value;
use std::collections::BTreeMap;

pub type OwnershipMap = BTreeMap<String, u32>;

#[derive(Debug, Clone, PartialEq)]
pub enum RawCount {
    Count(f64),
    Flag(bool),
    Unsupported,
}

impl From<&Value> for RawCount {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(RawCount::Count).unwrap_or(RawCount::Unsupported),
            Value::Bool(b) => RawCount::Flag(*b),
            _ => RawCount::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOwnership {
    entries: Vec<(String, RawCount)>,
}

impl RawOwnership {
    pub fn push(&mut self, key: impl Into<String>, value: RawCount) {
        self.entries.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&OwnershipMap> for RawOwnership {
    fn from(map: &OwnershipMap) -> Self {
        RawOwnership {
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), RawCount::Count(f64::from(*v))))
                .collect(),
        }
    }
}

/// Reads an `owned` payload permissively. Anything that is not a JSON object
/// yields an empty mapping.
pub fn parse_raw(value: &Value) -> RawOwnership {
    match value {
        Value::Object(map) => RawOwnership {
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), RawCount::from(v)))
                .collect(),
        },
        _ => RawOwnership::default(),
    }
}

pub fn sanitize(raw: &RawOwnership) -> OwnershipMap {
    let mut out = OwnershipMap::new();
    for (key, value) in &raw.entries {
        let Some(count) = normalize_count(value) else {
            continue;
        };
        let slot = out.entry(key.to_uppercase()).or_insert(count);
        *slot = (*slot).max(count);
    }
    out
}

fn normalize_count(value: &RawCount) -> Option<u32> {
    match value {
        RawCount::Count(n) if n.is_finite() => {
            let floored = n.floor();
            if floored <= 0.0 {
                Some(0)
            } else if floored >= f64::from(u32::MAX) {
                Some(u32::MAX)
            } else {
                Some(floored as u32)
            }
        }
        RawCount::Flag(true) => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: Value) -> OwnershipMap {
        sanitize(&parse_raw(&value))
    }

    #[test]
    fn migrates_v1_booleans() {
        let out = run(json!({"BP01-001": true}));
        assert_eq!(out, OwnershipMap::from([("BP01-001".to_string(), 1)]));
    }

    #[test]
    fn drops_false_and_garbage() {
        let out = run(json!({
            "A": false,
            "B": "3",
            "C": null,
            "D": [1],
            "E": {"n": 1},
            "F": 2
        }));
        assert_eq!(out, OwnershipMap::from([("F".to_string(), 2)]));
    }

    #[test]
    fn floors_and_clamps_numbers() {
        let out = run(json!({"a": 2.9, "b": -3, "c": 0, "d": 1e12}));
        assert_eq!(out.get("A"), Some(&2));
        assert_eq!(out.get("B"), Some(&0));
        assert_eq!(out.get("C"), Some(&0));
        assert_eq!(out.get("D"), Some(&u32::MAX));
    }

    #[test]
    fn uppercases_keys_and_keeps_larger_on_collision() {
        let out = run(json!({"pr-107": 2, "PR-107": 5, "Pr-107": true}));
        assert_eq!(out, OwnershipMap::from([("PR-107".to_string(), 5)]));
    }

    #[test]
    fn non_object_payload_is_empty() {
        assert!(run(json!([1, 2, 3])).is_empty());
        assert!(run(json!(12)).is_empty());
    }

    #[test]
    fn non_finite_counts_are_dropped() {
        let mut raw = RawOwnership::default();
        raw.push("X", RawCount::Count(f64::NAN));
        raw.push("Y", RawCount::Count(f64::INFINITY));
        assert!(sanitize(&raw).is_empty());
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            json!({"bp01-001": true, "bp01-002": 3.7, "x": -1, "y": "no"}),
            json!({"PR-036": 75, "pr-036": 12}),
            json!({}),
        ];
        for input in inputs {
            let once = run(input);
            let twice = sanitize(&RawOwnership::from(&once));
            assert_eq!(once, twice);
        }
    }
}
