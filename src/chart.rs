//! Chart classification adapter.
//!
//! Buckets raw chart rows into classes: either user-authored classes from
//! the widget configuration, or classes computed by a [`Classifier`]. Every
//! row receives a color, a label and the index of its class; rows matching
//! no class fall back to the configured default color and label.

use std::cmp::Ordering;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::classify::{Class, Classifier};
use crate::error::Result;
use crate::feature::{AttributeValue, FeatureCollection, Properties};
use crate::params::{ClassificationParams, Method, DEFAULT_INTERVALS, DEFAULT_RAMP};

/// Placeholder replaced by a row's group-by value.
pub const GROUP_BY_VALUE: &str = "${groupByValue}";
/// Placeholder replaced by a range class minimum.
pub const MIN_VALUE: &str = "${minValue}";
/// Placeholder replaced by a range class maximum.
pub const MAX_VALUE: &str = "${maxValue}";

/// Chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Pie chart.
    Pie,
    /// Bar chart.
    #[default]
    Bar,
    /// Line chart.
    Line,
}

impl ChartType {
    /// Pies sort by slice size, everything else by category.
    #[must_use]
    pub const fn default_sort_by(self) -> SortBy {
        match self {
            ChartType::Pie => SortBy::Aggregation,
            ChartType::Bar | ChartType::Line => SortBy::GroupBy,
        }
    }
}

/// Row ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Ascending by group-by value.
    GroupBy,
    /// Descending by aggregated value.
    Aggregation,
}

/// Data options of a chart widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    /// Category attribute.
    pub group_by_attributes: String,
    /// Aggregated attribute.
    pub aggregation_attribute: Option<String>,
    /// Aggregate function name, e.g. `"Sum"`.
    pub aggregate_function: Option<String>,
    /// Attribute to classify on; defaults to the group-by attribute.
    pub classification_attribute: Option<String>,
}

impl ChartOptions {
    /// Column holding the aggregated value, e.g. `Sum(population)`.
    #[must_use]
    pub fn aggregation_data_key(&self) -> Option<String> {
        let attribute = self.aggregation_attribute.as_deref()?;
        match self.aggregate_function.as_deref() {
            None | Some("None") => Some(attribute.to_string()),
            Some(function) => Some(format!("{function}({attribute})")),
        }
    }

    /// Column the classes are matched against.
    #[must_use]
    pub fn classification_key(&self) -> &str {
        self.classification_attribute.as_deref().unwrap_or(&self.group_by_attributes)
    }
}

/// A user-authored class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomClass {
    /// Hex color.
    pub color: String,
    /// Label template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Value matched by a unique class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<AttributeValue>,
    /// Lower bound of a range class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound of a range class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Classification settings stored on a chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsClassification {
    /// Method used when no custom classes are given.
    #[serde(default = "default_method")]
    pub method: Method,

    /// Requested class count for range methods.
    #[serde(default = "default_intervals")]
    pub intervals: usize,

    /// Color ramp name.
    #[serde(default = "default_ramp")]
    pub ramp: String,

    /// Reverse ramp colors.
    #[serde(default)]
    pub reverse: bool,

    /// Color of rows matching no class.
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Label template of rows matching no class.
    #[serde(default)]
    pub default_label: String,

    /// User-authored classes overriding computed ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<CustomClass>>,
}

fn default_method() -> Method {
    Method::UniqueInterval
}

fn default_intervals() -> usize {
    DEFAULT_INTERVALS
}

fn default_ramp() -> String {
    DEFAULT_RAMP.to_string()
}

fn default_color() -> String {
    "#ffff00".to_string()
}

impl Default for MsClassification {
    fn default() -> Self {
        Self {
            method: default_method(),
            intervals: default_intervals(),
            ramp: default_ramp(),
            reverse: false,
            default_color: default_color(),
            default_label: String::new(),
            classes: None,
        }
    }
}

/// What a class entry matches.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassBounds {
    /// `min <= v < max`; the last range also takes `v == max`.
    Range {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Loose equality with the value.
    Unique(AttributeValue),
    /// The trailing bucket of unmatched rows.
    Others,
}

/// A class with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Hex color.
    pub color: String,
    /// Rendered label.
    pub label: String,
    /// Match rule.
    pub bounds: ClassBounds,
    title: Option<String>,
}

impl ClassEntry {
    fn from_class(class: Class) -> Self {
        match class {
            Class::Range(r) => Self::new(r.color, None, ClassBounds::Range { min: r.min, max: r.max }),
            Class::Unique(u) => Self::new(u.color, None, ClassBounds::Unique(u.unique)),
        }
    }

    fn from_custom(class: &CustomClass) -> Option<Self> {
        let bounds = match (&class.unique, class.min, class.max) {
            (Some(unique), _, _) => ClassBounds::Unique(unique.clone()),
            (None, Some(min), Some(max)) => ClassBounds::Range { min, max },
            _ => return None,
        };
        Some(Self::new(class.color.clone(), class.title.clone(), bounds))
    }

    fn new(color: String, title: Option<String>, bounds: ClassBounds) -> Self {
        let group_by = match &bounds {
            ClassBounds::Unique(value) => value.to_string(),
            ClassBounds::Range { .. } | ClassBounds::Others => String::new(),
        };
        let mut entry = Self { color, label: String::new(), bounds, title };
        entry.label = entry.render_label(&group_by);
        entry
    }

    fn render_label(&self, group_by: &str) -> String {
        match (&self.title, &self.bounds) {
            (Some(title), bounds) => fill_template(title, group_by, bounds),
            (None, ClassBounds::Unique(value)) => value.to_string(),
            (None, ClassBounds::Range { min, max }) => format!("{min} - {max}"),
            (None, ClassBounds::Others) => String::new(),
        }
    }

    fn matches(&self, value: &AttributeValue, last_range: bool) -> bool {
        match &self.bounds {
            ClassBounds::Unique(unique) => unique.loose_eq(value),
            ClassBounds::Range { min, max } => value
                .as_f64()
                .is_some_and(|v| *min <= v && (v < *max || (last_range && v == *max))),
            ClassBounds::Others => false,
        }
    }
}

impl Serialize for ClassEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("color", &self.color)?;
        map.serialize_entry("label", &self.label)?;
        match &self.bounds {
            ClassBounds::Range { min, max } => {
                map.serialize_entry("min", min)?;
                map.serialize_entry("max", max)?;
            }
            ClassBounds::Unique(unique) => map.serialize_entry("unique", unique)?,
            ClassBounds::Others => map.serialize_entry("others", &true)?,
        }
        map.end()
    }
}

fn fill_template(template: &str, group_by: &str, bounds: &ClassBounds) -> String {
    let (min, max) = match bounds {
        ClassBounds::Range { min, max } => (min.to_string(), max.to_string()),
        ClassBounds::Unique(_) | ClassBounds::Others => (String::new(), String::new()),
    };
    template.replace(GROUP_BY_VALUE, group_by).replace(MIN_VALUE, &min).replace(MAX_VALUE, &max)
}

/// A chart row with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRow {
    /// Position of the matched class, or the class count when unmatched.
    pub index: usize,
    /// Whether the row matched a class.
    pub inside_class: bool,
    /// Row color.
    pub color: String,
    /// Row label.
    pub label: String,
    /// The input row.
    pub properties: Properties,
}

/// Result of [`generate_classified_data`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedData {
    /// Column the rows were ordered by.
    pub sort_by_key: String,
    /// Classes, with a trailing "others" entry when some row matched none.
    pub classes: Vec<ClassEntry>,
    /// Rows in sorted order.
    pub classified_data: Vec<ClassifiedRow>,
}

/// Input of [`generate_classified_data`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifiedDataRequest {
    /// Chart type.
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Row ordering; defaults per chart type.
    pub sort_by: Option<SortBy>,
    /// Raw chart rows.
    pub data: Vec<Properties>,
    /// Data options.
    pub options: ChartOptions,
    /// Classification settings.
    pub ms_classification: MsClassification,
    /// Omit the trailing "others" class.
    pub exclude_others: bool,
}

/// Classify chart rows.
///
/// # Errors
///
/// Propagates classifier errors; custom classes never fail.
pub fn generate_classified_data(request: &ClassifiedDataRequest, classifier: &Classifier<'_>) -> Result<ClassifiedData> {
    let options = &request.options;
    let ms = &request.ms_classification;
    let group_by_key = options.group_by_attributes.as_str();

    let sort_by = request.sort_by.unwrap_or_else(|| request.chart_type.default_sort_by());
    let sort_by_key = match sort_by {
        SortBy::Aggregation => options.aggregation_data_key().unwrap_or_else(|| group_by_key.to_string()),
        SortBy::GroupBy => group_by_key.to_string(),
    };

    let mut rows = request.data.clone();
    sort_rows(&mut rows, &sort_by_key, sort_by);

    let class_key = options.classification_key();
    let mut classes = match ms.classes.as_deref() {
        Some(custom) if !custom.is_empty() => custom.iter().filter_map(ClassEntry::from_custom).collect(),
        _ => {
            let params = ClassificationParams {
                method: ms.method,
                attribute: class_key.to_string(),
                intervals: ms.intervals,
                ramp: ms.ramp.clone(),
                reverse: ms.reverse,
                sort: Some(false),
            };
            let collection = FeatureCollection::from_rows(rows.iter().cloned());
            classifier.classify(&collection, &params)?.into_iter().map(ClassEntry::from_class).collect::<Vec<_>>()
        }
    };

    let last_range = classes.iter().rposition(|c| matches!(c.bounds, ClassBounds::Range { .. }));
    let others = ClassEntry::new(ms.default_color.clone(), Some(ms.default_label.clone()), ClassBounds::Others);

    let classified_data: Vec<ClassifiedRow> = rows
        .into_iter()
        .map(|properties| {
            let value = properties.get(class_key).and_then(AttributeValue::from_json);
            let group_by = properties
                .get(group_by_key)
                .and_then(AttributeValue::from_json)
                .map(|v| v.to_string())
                .unwrap_or_default();

            let matched = value
                .as_ref()
                .and_then(|value| (0..classes.len()).find(|&i| classes[i].matches(value, Some(i) == last_range)));
            tracing::trace!(value = ?value, class = ?matched, "chart row");

            let (index, entry) = match matched {
                Some(i) => (i, &classes[i]),
                None => (classes.len(), &others),
            };
            ClassifiedRow {
                index,
                inside_class: matched.is_some(),
                color: entry.color.clone(),
                label: entry.render_label(&group_by),
                properties,
            }
        })
        .collect();

    if !request.exclude_others && classified_data.iter().any(|row| !row.inside_class) {
        classes.push(others);
    }

    Ok(ClassifiedData { sort_by_key, classes, classified_data })
}

fn sort_rows(rows: &mut [Properties], key: &str, sort_by: SortBy) {
    let value = |row: &Properties| row.get(key).and_then(AttributeValue::from_json);
    rows.sort_by(|a, b| match (value(a), value(b)) {
        (Some(a), Some(b)) => match sort_by {
            SortBy::GroupBy => compare_values(&a, &b),
            SortBy::Aggregation => compare_values(&b, &a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn compare_values(a: &AttributeValue, b: &AttributeValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}
