//! Feature collections and attribute value extraction.
//!
//! Provides the GeoJSON-like input model and the extraction step that turns
//! a feature list plus an attribute name into the value sequence consumed
//! by the statistical methods.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Discriminator of a feature collection envelope.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Property mapping of a feature.
pub type Properties = Map<String, Value>;

/// A scalar attribute value.
#[derive(Debug, Clone)]
pub enum AttributeValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl AttributeValue {
    /// Scalar view of a JSON value; null, arrays and objects have none.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Numeric reading: numbers, and text holding a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(_) => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Equality that lets a number match numeric text (`5` and `"5"`).
    ///
    /// User-authored classes often store values as typed in a text field.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(_), Self::Text(_)) | (Self::Text(_), Self::Number(_)) => {
                matches!((self.as_f64(), other.as_f64()), (Some(a), Some(b)) if a == b)
            }
            _ => self == other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AttributeValue {}

impl PartialOrd for AttributeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Booleans sort before numbers, numbers before text.
impl Ord for AttributeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) if a == b => Ordering::Equal,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            // Integral values keep their integer JSON form.
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| D::Error::custom("expected a boolean, number or string"))
    }
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// A feature with optional properties; geometry is carried, never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// GeoJSON type tag.
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    /// Attribute mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Geometry, opaque to classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

impl Feature {
    /// Create a geometry-less feature from its properties.
    #[must_use]
    pub fn from_properties(properties: Properties) -> Self {
        Self { kind: feature_kind(), properties: Some(properties), geometry: None }
    }

    /// Scalar value of `attribute`, if present and not null.
    #[must_use]
    pub fn attribute(&self, attribute: &str) -> Option<AttributeValue> {
        self.properties.as_ref()?.get(attribute).and_then(AttributeValue::from_json)
    }
}

/// An ordered feature sequence wrapped in a typed envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Envelope discriminator; anything but `"FeatureCollection"` hides the features.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// The wrapped features.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create a collection with the correct discriminator.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { kind: FEATURE_COLLECTION.to_string(), features }
    }

    /// Wrap tabular rows (chart data) as geometry-less features.
    #[must_use]
    pub fn from_rows<I: IntoIterator<Item = Properties>>(rows: I) -> Self {
        Self::new(rows.into_iter().map(Feature::from_properties).collect())
    }

    /// The effective feature list: empty unless the discriminator matches.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        if self.kind == FEATURE_COLLECTION {
            &self.features
        } else {
            &[]
        }
    }
}

/// Attribute values of every feature, nulls and missing keys removed, in input order.
#[must_use]
pub fn extract_values(features: &[Feature], attribute: &str) -> Vec<AttributeValue> {
    features.iter().filter_map(|f| f.attribute(attribute)).collect()
}

/// Numeric attribute values sorted ascending.
///
/// Values without a numeric reading are filtered out.
#[must_use]
pub fn extract_numeric(features: &[Feature], attribute: &str) -> Vec<f64> {
    let values = extract_values(features, attribute);
    let total = values.len();

    let mut numeric: Vec<f64> = values.iter().filter_map(AttributeValue::as_f64).collect();
    if numeric.len() < total {
        tracing::debug!(
            attribute,
            dropped = total - numeric.len(),
            "filtered non-numeric attribute values"
        );
    }

    numeric.sort_by(f64::total_cmp);
    numeric
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: Value) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_features_wrong_discriminator_is_empty() {
        let fc = collection(json!({
            "type": "Feature",
            "features": [{ "type": "Feature", "properties": { "v": 1 } }]
        }));
        assert!(fc.features().is_empty());
        assert!(extract_values(fc.features(), "v").is_empty());
    }

    #[test]
    fn test_features_missing_discriminator_is_empty() {
        let fc = collection(json!({ "features": [{ "properties": { "v": 1 } }] }));
        assert!(fc.features().is_empty());
    }

    #[test]
    fn test_extract_drops_null_and_missing() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "v": 3 } },
                { "type": "Feature", "properties": { "v": null } },
                { "type": "Feature", "properties": {} },
                { "type": "Feature" },
                { "type": "Feature", "properties": { "v": "a" } }
            ]
        }));
        let values = extract_values(fc.features(), "v");
        assert_eq!(values, vec![AttributeValue::Number(3.0), AttributeValue::from("a")]);
    }

    #[test]
    fn test_extract_numeric_sorts_and_filters() {
        let fc = FeatureCollection::from_rows(
            [json!({ "v": 10 }), json!({ "v": "2.5" }), json!({ "v": "x" }), json!({ "v": -1 }), json!({ "v": true })]
                .into_iter()
                .filter_map(|v| v.as_object().cloned()),
        );
        assert_eq!(extract_numeric(fc.features(), "v"), vec![-1.0, 2.5, 10.0]);
    }

    #[test]
    fn test_geometry_is_carried() {
        let fc = collection(json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "properties": { "v": 1 }, "geometry": { "type": "Point", "coordinates": [0, 0] } }]
        }));
        assert!(fc.features()[0].geometry.is_some());
        assert_eq!(extract_numeric(fc.features(), "v"), vec![1.0]);
    }

    #[test]
    fn test_attribute_value_ordering() {
        let mut values = vec![
            AttributeValue::from("b"),
            AttributeValue::from(2.0),
            AttributeValue::from(true),
            AttributeValue::from("a"),
            AttributeValue::from(-1.0),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                AttributeValue::from(true),
                AttributeValue::from(-1.0),
                AttributeValue::from(2.0),
                AttributeValue::from("a"),
                AttributeValue::from("b"),
            ]
        );
    }

    #[test]
    fn test_loose_eq() {
        assert!(AttributeValue::from(5.0).loose_eq(&AttributeValue::from("5")));
        assert!(AttributeValue::from("5.0").loose_eq(&AttributeValue::from(5.0)));
        assert!(!AttributeValue::from("5").loose_eq(&AttributeValue::from("5.0")));
        assert!(!AttributeValue::from(true).loose_eq(&AttributeValue::from(1.0)));
    }

    #[test]
    fn test_attribute_value_serializes_integral_as_integer() {
        assert_eq!(serde_json::to_value(AttributeValue::from(3.0)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(AttributeValue::from(2.5)).unwrap(), json!(2.5));
        assert_eq!(serde_json::to_value(AttributeValue::from("x")).unwrap(), json!("x"));
    }

    #[test]
    fn test_attribute_value_rejects_null() {
        assert!(serde_json::from_value::<AttributeValue>(Value::Null).is_err());
        let v: AttributeValue = serde_json::from_value(json!("cat")).unwrap();
        assert_eq!(v.as_str(), Some("cat"));
    }
}
