//! # geo-classify
//!
//! Thematic classification of feature attributes for choropleth maps and
//! classified charts.
//!
//! A feature collection and a set of [`params::ClassificationParams`] go in;
//! a list of color-coded classes comes out. Range methods produce contiguous
//! `{ color, min, max }` classes, the unique method one `{ color, unique }`
//! class per distinct value.
//!
//! ## Methods
//!
//! - **quantile**: equal-count classes
//! - **jenks**: natural breaks (Jenks–Fisher)
//! - **equalInterval**: equal-width classes
//! - **uniqueInterval**: one class per distinct value
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geo_classify::prelude::*;
//!
//! let collection: FeatureCollection = serde_json::from_str(geojson)?;
//! let params = ClassificationParams::new(Method::Quantile, "population").ramp("YlOrRd");
//!
//! let response = classify(&collection, &params).await?;
//! for class in &response.data.classification {
//!     println!("{}", class.color());
//! }
//! ```
//!
//! ## References
//!
//! - Jenks, G. F. (1967). "The Data Model Concept in Statistical Mapping."
//! - Fisher, W. D. (1958). "On Grouping for Maximum Homogeneity." JASA 53.
//! - Brewer, C. A. (2003). ColorBrewer palettes.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Color Modules
// ============================================================================

/// Color type, hex parsing and interpolation.
pub mod color;

/// Multi-stop color scales.
pub mod scale;

/// Static ramp and palette tables.
pub mod palettes;

/// Ramp name resolution and color sampling.
pub mod ramp;

// ============================================================================
// Classification Modules
// ============================================================================

/// Statistical classification methods.
pub mod stats;

/// Feature collections and attribute extraction.
pub mod feature;

/// Classification parameters and method registry.
pub mod params;

/// Library loading and the classifier.
pub mod classify;

/// Chart row classification.
pub mod chart;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for geo-classify operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use geo_classify::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{generate_classified_data, ClassifiedData, ClassifiedDataRequest, MsClassification};
    pub use crate::classify::{
        classify, classify_json, load_library, loaded_library, make_classifier, Class, Classifier, Library,
        LibraryCell, RangeClass, UniqueClass,
    };
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::feature::{AttributeValue, Feature, FeatureCollection};
    pub use crate::params::{ClassificationParams, Method, AVAILABLE_METHODS};
    pub use crate::ramp::get_color_classes;
    pub use crate::scale::{ColorScale, Scale};
}
