//! Scale functions for value-to-color mappings.
//!
//! A [`ColorScale`] spreads its control colors evenly over the domain and
//! interpolates RGB channels between the two enclosing stops.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f64,
    domain_max: f64,
}

impl ColorScale {
    /// Create a new color scale over `domain`.
    ///
    /// A single color is repeated, so the scale is constant.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidColor("color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::InvalidParams("domain min and max cannot be equal".to_string()));
        }

        let colors = if colors.len() == 1 { vec![colors[0], colors[0]] } else { colors };

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Create a scale on the unit domain from hex color literals.
    ///
    /// # Errors
    ///
    /// Returns an error if any literal is not a valid hex color.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let parsed = colors.iter().map(|c| Rgba::from_hex(c.as_ref())).collect::<Result<Vec<_>>>()?;
        Self::new(parsed, (0.0, 1.0))
    }

    /// Control colors, in order.
    #[must_use]
    pub fn stops(&self) -> &[Rgba] {
        &self.colors
    }

    /// Sample `count` colors spread over the whole domain.
    ///
    /// One color samples the middle of the domain; zero colors is empty.
    #[must_use]
    pub fn colors(&self, count: usize) -> Vec<Rgba> {
        let span = self.domain_max - self.domain_min;
        match count {
            0 => Vec::new(),
            1 => vec![self.scale(self.domain_min + span / 2.0)],
            _ => (0..count)
                .map(|i| self.scale(self.domain_min + (i as f64 / (count - 1) as f64) * span))
                .collect(),
        }
    }

    /// Like [`ColorScale::colors`], formatted as lowercase hex strings.
    #[must_use]
    pub fn hex_colors(&self, count: usize) -> Vec<String> {
        self.colors(count).into_iter().map(Rgba::to_hex).collect()
    }
}

impl Scale<f64, Rgba> for ColorScale {
    fn scale(&self, value: f64) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        let segment_count = self.colors.len() - 1;
        let scaled = t * segment_count as f64;
        let segment = (scaled.floor() as usize).min(segment_count - 1);

        let local_t = scaled - segment as f64;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIRIDIS: [&str; 9] = [
        "#440154", "#482777", "#3f4a8a", "#31678e", "#26838f", "#1f9d8a", "#6cce5a", "#b6de2b",
        "#fee825",
    ];

    #[test]
    fn test_color_scale_midpoint() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");

        let mid = scale.scale(0.5);
        assert_eq!(mid.r, 128);
    }

    #[test]
    fn test_viridis_five_samples_hit_stops() {
        let scale = ColorScale::from_hex(&VIRIDIS).unwrap();
        assert_eq!(
            scale.hex_colors(5),
            vec!["#440154", "#3f4a8a", "#26838f", "#6cce5a", "#fee825"]
        );
    }

    #[test]
    fn test_colors_single_samples_middle() {
        let scale = ColorScale::from_hex(&["#000", "#f00"]).unwrap();
        assert_eq!(scale.hex_colors(1), vec!["#800000"]);
    }

    #[test]
    fn test_colors_zero_is_empty() {
        let scale = ColorScale::from_hex(&["#000", "#f00"]).unwrap();
        assert!(scale.colors(0).is_empty());
    }

    #[test]
    fn test_colors_endpoints() {
        let scale = ColorScale::from_hex(&["#00f", "#ff0", "#f00"]).unwrap();
        let colors = scale.hex_colors(3);
        assert_eq!(colors, vec!["#0000ff", "#ffff00", "#ff0000"]);
    }

    #[test]
    fn test_single_color_is_constant() {
        let scale = ColorScale::new(vec![Rgba::rgb(10, 20, 30)], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(0.0), scale.scale(1.0));
        assert_eq!(scale.stops().len(), 2);
    }

    #[test]
    fn test_color_scale_domain_range() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 10.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.domain(), (0.0, 10.0));
        let (range_start, range_end) = scale.range();
        assert_eq!(range_start, Rgba::BLACK);
        assert_eq!(range_end, Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_invalid_empty() {
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_color_scale_invalid_equal_domain() {
        assert!(ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (5.0, 5.0)).is_err());
    }

    #[test]
    fn test_from_hex_rejects_bad_literal() {
        assert!(ColorScale::from_hex(&["#000", "nope"]).is_err());
    }
}
