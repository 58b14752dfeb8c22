//! Classification orchestrator.
//!
//! The statistics library is loaded lazily and at most once per process.
//! [`make_classifier`] turns a loaded [`Library`] into a synchronous
//! [`Classifier`]; [`classify`] is the async entry point that loads on
//! demand and wraps the result in the response envelope.
//!
//! # Example
//!
//! ```ignore
//! use geo_classify::prelude::*;
//!
//! let library = load_library().await?;
//! let params = ClassificationParams::new(Method::Jenks, "population").intervals(7);
//! let classes = make_classifier(library).classify(&collection, &params)?;
//! ```

use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{Error, Result};
use crate::feature::{extract_numeric, extract_values, AttributeValue, FeatureCollection};
use crate::palettes::{BREWER, BUILTIN_RAMPS};
use crate::params::{ClassificationParams, Method};
use crate::ramp;
use crate::scale::ColorScale;
use crate::stats;

/// A class of a range method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeClass {
    /// Hex color.
    pub color: String,
    /// Lower boundary.
    pub min: f64,
    /// Upper boundary.
    pub max: f64,
}

/// A class of the unique method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueClass {
    /// Hex color.
    pub color: String,
    /// The class value.
    pub unique: AttributeValue,
}

/// One classification class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Class {
    /// `{ color, min, max }`.
    Range(RangeClass),
    /// `{ color, unique }`.
    Unique(UniqueClass),
}

impl Class {
    /// Hex color of the class.
    #[must_use]
    pub fn color(&self) -> &str {
        match self {
            Class::Range(c) => &c.color,
            Class::Unique(c) => &c.color,
        }
    }
}

/// Pair consecutive boundaries with colors by index.
///
/// Pairs whose upper boundary does not exist are dropped.
#[must_use]
pub fn boundaries_to_ranges(boundaries: &[f64], colors: Vec<String>) -> Vec<RangeClass> {
    colors
        .into_iter()
        .enumerate()
        .filter_map(|(i, color)| {
            let min = *boundaries.get(i)?;
            let max = *boundaries.get(i + 1)?;
            Some(RangeClass { color, min, max })
        })
        .collect()
}

/// The loaded statistics library: every known ramp pre-parsed into a scale.
#[derive(Debug, Clone)]
pub struct Library {
    builtin: HashMap<&'static str, ColorScale>,
    catalog: HashMap<String, ColorScale>,
}

impl Library {
    /// Build the library from the static palette tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryLoad`] if a palette table entry does not parse.
    pub fn load() -> Result<Self> {
        let parse = |name: &str, colors: &[&str]| {
            ColorScale::from_hex(colors).map_err(|e| Error::LibraryLoad(format!("palette {name}: {e}")))
        };

        let mut builtin = HashMap::with_capacity(BUILTIN_RAMPS.len());
        for &(name, colors) in BUILTIN_RAMPS {
            builtin.insert(name, parse(name, colors)?);
        }

        let mut catalog = HashMap::with_capacity(BREWER.len());
        for palette in BREWER {
            catalog.insert(palette.name.to_ascii_lowercase(), parse(palette.name, palette.colors)?);
        }

        Ok(Self { builtin, catalog })
    }

    /// Number of pre-parsed ramps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builtin.len() + self.catalog.len()
    }

    /// Whether no ramp is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample `intervals` colors from `ramp`; same resolution rules as
    /// [`ramp::get_color_classes`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRamp`] if the ramp cannot be resolved.
    pub fn color_classes(&self, ramp_name: &str, intervals: usize, reverse: bool) -> Result<Vec<String>> {
        let cached = self
            .builtin
            .get(ramp_name)
            .or_else(|| self.catalog.get(&ramp_name.to_ascii_lowercase()));

        match cached {
            Some(scale) => Ok(ramp::sample(scale, intervals, reverse)),
            None => ramp::get_color_classes(ramp_name, intervals, reverse),
        }
    }
}

/// Memoized library handle.
///
/// Concurrent callers of [`LibraryCell::ensure_loaded`] share one in-flight
/// load. A failed load leaves the cell empty so the next call retries.
#[derive(Debug)]
pub struct LibraryCell {
    cell: OnceCell<Library>,
}

impl LibraryCell {
    /// An empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { cell: OnceCell::const_new() }
    }

    /// Load with `loader` unless already loaded.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error.
    pub async fn ensure_loaded<F, Fut>(&self, loader: F) -> Result<&Library>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Library>>,
    {
        self.cell
            .get_or_try_init(|| async move {
                tracing::debug!("loading statistics library");
                match loader().await {
                    Ok(library) => {
                        tracing::debug!(ramps = library.len(), "statistics library loaded");
                        Ok(library)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "statistics library failed to load");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// The loaded library.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryNotLoaded`] before a successful load.
    pub fn get(&self) -> Result<&Library> {
        self.cell.get().ok_or(Error::LibraryNotLoaded)
    }

    /// Whether a load has completed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl Default for LibraryCell {
    fn default() -> Self {
        Self::new()
    }
}

static LIBRARY: LibraryCell = LibraryCell::new();

/// Load the process-wide library, once.
///
/// # Errors
///
/// Returns [`Error::LibraryLoad`] if loading fails; a later call retries.
pub async fn load_library() -> Result<&'static Library> {
    LIBRARY.ensure_loaded(|| async { Library::load() }).await
}

/// The process-wide library, if [`load_library`] already completed.
///
/// # Errors
///
/// Returns [`Error::LibraryNotLoaded`] before the first successful load.
pub fn loaded_library() -> Result<&'static Library> {
    LIBRARY.get()
}

/// Synchronous classifier over a loaded library.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    library: &'a Library,
}

/// Build a classifier from a loaded library.
#[must_use]
pub fn make_classifier(library: &Library) -> Classifier<'_> {
    Classifier { library }
}

impl Classifier<'_> {
    /// Classify `params.attribute` over the collection's features.
    ///
    /// Empty input yields an empty class list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] for parameters that fail validation
    /// and [`Error::UnknownRamp`] for an unresolvable ramp.
    pub fn classify(&self, collection: &FeatureCollection, params: &ClassificationParams) -> Result<Vec<Class>> {
        params.validate()?;
        let features = collection.features();

        if params.method == Method::UniqueInterval {
            let values = stats::unique_interval(&extract_values(features, &params.attribute), params.sort);
            tracing::debug!(method = %params.method, values = values.len(), "classifying");

            let colors = self.library.color_classes(&params.ramp, values.len(), params.reverse)?;
            return Ok(values
                .into_iter()
                .zip(colors)
                .map(|(unique, color)| Class::Unique(UniqueClass { color, unique }))
                .collect());
        }

        let sorted = extract_numeric(features, &params.attribute);
        let intervals = stats::effective_intervals(params.method, &sorted, params.intervals);
        tracing::debug!(method = %params.method, values = sorted.len(), intervals, "classifying");

        let boundaries = stats::range_boundaries(params.method, &sorted, intervals).unwrap_or_default();
        let colors = self.library.color_classes(&params.ramp, intervals, params.reverse)?;
        Ok(boundaries_to_ranges(&boundaries, colors).into_iter().map(Class::Range).collect())
    }
}

/// Response envelope of [`classify`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Payload.
    pub data: ClassificationData,
}

/// Payload of [`ClassificationResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationData {
    /// The computed classes.
    pub classification: Vec<Class>,
}

/// Load the library if needed, then classify.
///
/// # Errors
///
/// Propagates library load, parameter and ramp errors.
pub async fn classify(collection: &FeatureCollection, params: &ClassificationParams) -> Result<ClassificationResponse> {
    let library = load_library().await?;
    let classification = make_classifier(library).classify(collection, params)?;
    Ok(ClassificationResponse { data: ClassificationData { classification } })
}

/// [`classify`] over a raw JSON feature collection.
///
/// # Errors
///
/// Returns [`Error::Json`] if `value` is not shaped like a feature collection.
pub async fn classify_json(value: &Value, params: &ClassificationParams) -> Result<ClassificationResponse> {
    let collection = FeatureCollection::deserialize(value)?;
    classify(&collection, params).await
}
