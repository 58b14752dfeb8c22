//! Color ramp resolution.
//!
//! A ramp name resolves either to one of the short built-in literal lists or
//! is handed to the palette catalog, which looks it up case-insensitively.
//! Names the catalog cannot resolve are errors; there is no fallback color.

use crate::error::{Error, Result};
use crate::palettes::{self, PaletteKind};
use crate::scale::ColorScale;

/// Number of classes sampled when previewing a ramp in a picker.
pub const RAMP_PREVIEW_CLASSES: usize = 5;

/// What a ramp name resolves to before interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// A built-in literal color list.
    Colors(&'static [&'static str]),
    /// A name to expand through the palette catalog.
    Named(String),
}

/// Resolve a ramp name.
///
/// Only the built-in ramps resolve here; every other name is left for the
/// palette catalog. Past the catalog, [`scale_for`] accepts a hex literal and
/// nothing else, so CSS color names such as `"Red"` are unknown ramps.
#[must_use]
pub fn resolve_ramp(name: &str) -> ColorSpec {
    match palettes::builtin(name) {
        Some(colors) => ColorSpec::Colors(colors),
        None => ColorSpec::Named(name.to_string()),
    }
}

/// Build the interpolating scale for a resolved ramp.
///
/// A catalog miss is retried as a single color literal (`"#ff0000"` gives a
/// constant ramp) before failing.
///
/// # Errors
///
/// Returns [`Error::UnknownRamp`] when the name resolves to nothing.
pub fn scale_for(spec: &ColorSpec) -> Result<ColorScale> {
    match spec {
        ColorSpec::Colors(colors) => ColorScale::from_hex(*colors),
        ColorSpec::Named(name) => match palettes::brewer(name) {
            Some(palette) => ColorScale::from_hex(palette.colors),
            None => ColorScale::from_hex(&[name.as_str()]).map_err(|_| Error::UnknownRamp(name.clone())),
        },
    }
}

/// Sample exactly `intervals` hex colors from `ramp`, reversed if asked.
///
/// # Errors
///
/// Returns [`Error::UnknownRamp`] if the ramp cannot be resolved.
pub fn get_color_classes(ramp: &str, intervals: usize, reverse: bool) -> Result<Vec<String>> {
    let scale = scale_for(&resolve_ramp(ramp))?;
    Ok(sample(&scale, intervals, reverse))
}

pub(crate) fn sample(scale: &ColorScale, intervals: usize, reverse: bool) -> Vec<String> {
    let mut colors = scale.hex_colors(intervals);
    if reverse {
        colors.reverse();
    }
    colors
}

/// Entry of the human-facing ramp catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardScale {
    /// Name to store in classification params.
    pub name: &'static str,
    /// Palette kind, `None` for the built-in ramps.
    pub kind: Option<PaletteKind>,
    /// Control colors.
    pub colors: &'static [&'static str],
}

/// Every ramp a picker can offer: built-ins first, then the catalog.
#[must_use]
pub fn standard_classification_scales() -> Vec<StandardScale> {
    let builtins = palettes::BUILTIN_RAMPS
        .iter()
        .map(|&(name, colors)| StandardScale { name, kind: None, colors });
    let catalog = palettes::BREWER
        .iter()
        .map(|p| StandardScale { name: p.name, kind: Some(p.kind), colors: p.colors });
    builtins.chain(catalog).collect()
}

/// Sample a ramp for a picker preview.
///
/// # Errors
///
/// Returns [`Error::UnknownRamp`] if the ramp cannot be resolved.
pub fn ramp_preview(ramp: &str, samples: usize) -> Result<Vec<String>> {
    get_color_classes(ramp, samples, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin() {
        assert_eq!(resolve_ramp("red"), ColorSpec::Colors(&["#000", "#f00"]));
        assert_eq!(resolve_ramp("viridis"), ColorSpec::Named("viridis".to_string()));
    }

    #[test]
    fn test_viridis_five_classes() {
        let colors = get_color_classes("viridis", 5, false).unwrap();
        assert_eq!(colors, vec!["#440154", "#3f4a8a", "#26838f", "#6cce5a", "#fee825"]);
    }

    #[test]
    fn test_reverse_flips_order() {
        let forward = get_color_classes("jet", 4, false).unwrap();
        let mut backward = get_color_classes("jet", 4, true).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_exact_count() {
        for n in 1..=12 {
            assert_eq!(get_color_classes("Spectral", n, false).unwrap().len(), n);
        }
        assert!(get_color_classes("Spectral", 0, false).unwrap().is_empty());
    }

    #[test]
    fn test_builtin_red() {
        let colors = get_color_classes("red", 3, false).unwrap();
        assert_eq!(colors, vec!["#000000", "#800000", "#ff0000"]);
    }

    #[test]
    fn test_css_color_names_are_not_ramps() {
        assert!(matches!(get_color_classes("Red", 2, false), Err(Error::UnknownRamp(_))));
        assert_eq!(get_color_classes("#ff0000", 2, false).unwrap(), vec!["#ff0000", "#ff0000"]);
    }

    #[test]
    fn test_unknown_ramp_propagates() {
        let err = get_color_classes("not-a-ramp", 3, false).unwrap_err();
        assert!(matches!(err, Error::UnknownRamp(name) if name == "not-a-ramp"));
    }

    #[test]
    fn test_single_color_literal_ramp() {
        let colors = get_color_classes("#00ff00", 2, false).unwrap();
        assert_eq!(colors, vec!["#00ff00", "#00ff00"]);
    }

    #[test]
    fn test_standard_scales_catalog() {
        let scales = standard_classification_scales();
        assert_eq!(scales.len(), palettes::BUILTIN_RAMPS.len() + palettes::BREWER.len());
        assert_eq!(scales[0].name, "red");
        assert!(scales.iter().any(|s| s.name == "Viridis"));
    }

    #[test]
    fn test_ramp_preview() {
        let preview = ramp_preview("Blues", RAMP_PREVIEW_CLASSES).unwrap();
        assert_eq!(preview.len(), RAMP_PREVIEW_CLASSES);
        assert_eq!(preview[0], "#f7fbff");
        assert_eq!(preview[4], "#08306b");
    }
}
