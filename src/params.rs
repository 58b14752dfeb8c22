//! Classification parameters and the method registry.
//!
//! Parameters load from JSON or YAML with the same camelCase keys the
//! callers store, e.g.:
//!
//! ```yaml
//! method: jenks
//! attribute: population
//! intervals: 7
//! ramp: YlOrRd
//! reverse: true
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// Supported method names, in picker order.
pub const AVAILABLE_METHODS: [&str; 4] = ["equalInterval", "quantile", "jenks", "uniqueInterval"];

/// Classification method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Equal-count classes.
    Quantile,
    /// Natural breaks.
    Jenks,
    /// Equal-width classes.
    EqualInterval,
    /// One class per distinct value.
    UniqueInterval,
}

impl Method {
    /// All methods, in picker order.
    pub const ALL: [Method; 4] = [Method::EqualInterval, Method::Quantile, Method::Jenks, Method::UniqueInterval];

    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Quantile => "quantile",
            Method::Jenks => "jenks",
            Method::EqualInterval => "equalInterval",
            Method::UniqueInterval => "uniqueInterval",
        }
    }

    /// Whether the method produces `min`/`max` ranges.
    #[must_use]
    pub const fn is_range(self) -> bool {
        !matches!(self, Method::UniqueInterval)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "quantile" => Ok(Method::Quantile),
            "jenks" => Ok(Method::Jenks),
            "equalInterval" => Ok(Method::EqualInterval),
            "uniqueInterval" => Ok(Method::UniqueInterval),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

/// Parameters of a single classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationParams {
    /// Statistical method.
    pub method: Method,

    /// Property key read from every feature.
    #[serde(default)]
    pub attribute: String,

    /// Requested class count; ignored by the unique method.
    #[serde(default = "default_intervals")]
    pub intervals: usize,

    /// Color ramp name.
    #[serde(default = "default_ramp")]
    pub ramp: String,

    /// Reverse the sampled colors before pairing them with classes.
    #[serde(default)]
    pub reverse: bool,

    /// Unique method only: `Some(false)` keeps first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
}

/// Default class count.
pub const DEFAULT_INTERVALS: usize = 5;

/// Default color ramp.
pub const DEFAULT_RAMP: &str = "viridis";

/// Largest class count a range method accepts.
pub const MAX_INTERVALS: usize = 256;

fn default_intervals() -> usize {
    DEFAULT_INTERVALS
}

fn default_ramp() -> String {
    DEFAULT_RAMP.to_string()
}

impl ClassificationParams {
    /// Parameters for `method` on `attribute`, everything else defaulted.
    #[must_use]
    pub fn new(method: Method, attribute: impl Into<String>) -> Self {
        Self {
            method,
            attribute: attribute.into(),
            intervals: DEFAULT_INTERVALS,
            ramp: default_ramp(),
            reverse: false,
            sort: None,
        }
    }

    /// Set the class count.
    #[must_use]
    pub fn intervals(mut self, intervals: usize) -> Self {
        self.intervals = intervals;
        self
    }

    /// Set the ramp.
    #[must_use]
    pub fn ramp(mut self, ramp: impl Into<String>) -> Self {
        self.ramp = ramp.into();
        self
    }

    /// Set color reversal.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Set unique-value sorting.
    #[must_use]
    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Check the parameters can be honored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] for an empty attribute or a range
    /// method asked for zero intervals or more than [`MAX_INTERVALS`].
    pub fn validate(&self) -> Result<()> {
        if self.attribute.is_empty() {
            return Err(Error::InvalidParams("attribute must not be empty".to_string()));
        }
        if self.method.is_range() && self.intervals == 0 {
            return Err(Error::InvalidParams(format!("{} needs at least one interval", self.method)));
        }
        if self.method.is_range() && self.intervals > MAX_INTERVALS {
            return Err(Error::InvalidParams(format!(
                "{} intervals requested, at most {MAX_INTERVALS} allowed",
                self.intervals
            )));
        }
        Ok(())
    }

    /// Parses parameters from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse_yaml(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Parses parameters from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ConfigParse { line: e.line(), message: e.to_string() })
    }

    /// Loads parameters from a file; `.json` is read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }
}
