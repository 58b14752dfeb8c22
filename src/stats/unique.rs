//! One class per distinct value.

use std::collections::HashSet;

use crate::feature::AttributeValue;

/// Distinct values in first-seen order, sorted ascending unless `sort` is
/// explicitly `Some(false)`.
#[must_use]
pub fn unique_interval(values: &[AttributeValue], sort: Option<bool>) -> Vec<AttributeValue> {
    let mut seen = HashSet::with_capacity(values.len());
    let mut distinct: Vec<AttributeValue> = Vec::new();

    for value in values {
        if seen.insert(HashKey::from(value)) {
            distinct.push(value.clone());
        }
    }

    if sort != Some(false) {
        distinct.sort();
    }
    distinct
}

/// Number of distinct values.
#[must_use]
pub fn distinct_count(values: &[f64]) -> usize {
    values.iter().map(|v| (v + 0.0).to_bits()).collect::<HashSet<_>>().len()
}

#[derive(PartialEq, Eq, Hash)]
enum HashKey<'a> {
    Bool(bool),
    Number(u64),
    Text(&'a str),
}

impl<'a> From<&'a AttributeValue> for HashKey<'a> {
    fn from(value: &'a AttributeValue) -> Self {
        match value {
            AttributeValue::Bool(b) => Self::Bool(*b),
            // -0.0 and 0.0 are one value
            AttributeValue::Number(n) => Self::Number((n + 0.0).to_bits()),
            AttributeValue::Text(s) => Self::Text(s),
        }
    }
}
