//! Static palette tables.
//!
//! The brewer catalog follows ColorBrewer (Cynthia Brewer, Penn State): the
//! widest class count of every sequential (9), diverging (11) and
//! qualitative scheme, plus Viridis.

/// Kind of a catalog palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// Ordered data from low to high.
    Sequential,
    /// Emphasis on a neutral midpoint and both extremes.
    Diverging,
    /// Nominal data, no implied magnitude.
    Qualitative,
}

/// A named palette of hex control colors.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Canonical name (mixed case, as in ColorBrewer).
    pub name: &'static str,
    /// Palette kind.
    pub kind: PaletteKind,
    /// Control colors from first to last.
    pub colors: &'static [&'static str],
}

/// Short built-in ramps resolved locally, without the catalog.
pub const BUILTIN_RAMPS: &[(&str, &[&str])] = &[
    ("red", &["#000", "#f00"]),
    ("green", &["#000", "#0f0"]),
    ("blue", &["#000", "#00f"]),
    ("gray", &["#333", "#eee"]),
    ("jet", &["#00f", "#ff0", "#f00"]),
    ("random", &["#e41a1c", "#4daf4a", "#984ea3", "#ff7f00", "#377eb8", "#a65628"]),
];

use PaletteKind::{Diverging, Qualitative, Sequential};

/// The brewer-style palette catalog.
pub const BREWER: &[Palette] = &[
    Palette {
        name: "OrRd",
        kind: Sequential,
        colors: &["#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#b30000", "#7f0000"],
    },
    Palette {
        name: "PuBu",
        kind: Sequential,
        colors: &["#fff7fb", "#ece7f2", "#d0d1e6", "#a6bddb", "#74a9cf", "#3690c0", "#0570b0", "#045a8d", "#023858"],
    },
    Palette {
        name: "BuPu",
        kind: Sequential,
        colors: &["#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#810f7c", "#4d004b"],
    },
    Palette {
        name: "Oranges",
        kind: Sequential,
        colors: &["#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603", "#7f2704"],
    },
    Palette {
        name: "BuGn",
        kind: Sequential,
        colors: &["#f7fcfd", "#e5f5f9", "#ccece6", "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#006d2c", "#00441b"],
    },
    Palette {
        name: "YlOrBr",
        kind: Sequential,
        colors: &["#ffffe5", "#fff7bc", "#fee391", "#fec44f", "#fe9929", "#ec7014", "#cc4c02", "#993404", "#662506"],
    },
    Palette {
        name: "YlGn",
        kind: Sequential,
        colors: &["#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#006837", "#004529"],
    },
    Palette {
        name: "Reds",
        kind: Sequential,
        colors: &["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15", "#67000d"],
    },
    Palette {
        name: "RdPu",
        kind: Sequential,
        colors: &["#fff7f3", "#fde0dd", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177", "#49006a"],
    },
    Palette {
        name: "Greens",
        kind: Sequential,
        colors: &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c", "#00441b"],
    },
    Palette {
        name: "YlGnBu",
        kind: Sequential,
        colors: &["#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494", "#081d58"],
    },
    Palette {
        name: "Purples",
        kind: Sequential,
        colors: &["#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f", "#3f007d"],
    },
    Palette {
        name: "GnBu",
        kind: Sequential,
        colors: &["#f7fcf0", "#e0f3db", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#0868ac", "#084081"],
    },
    Palette {
        name: "Greys",
        kind: Sequential,
        colors: &["#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525", "#000000"],
    },
    Palette {
        name: "YlOrRd",
        kind: Sequential,
        colors: &["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026", "#800026"],
    },
    Palette {
        name: "PuRd",
        kind: Sequential,
        colors: &["#f7f4f9", "#e7e1ef", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#980043", "#67001f"],
    },
    Palette {
        name: "Blues",
        kind: Sequential,
        colors: &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b"],
    },
    Palette {
        name: "PuBuGn",
        kind: Sequential,
        colors: &["#fff7fb", "#ece2f0", "#d0d1e6", "#a6bddb", "#67a9cf", "#3690c0", "#02818a", "#016c59", "#014636"],
    },
    Palette {
        name: "Viridis",
        kind: Sequential,
        colors: &["#440154", "#482777", "#3f4a8a", "#31678e", "#26838f", "#1f9d8a", "#6cce5a", "#b6de2b", "#fee825"],
    },
    Palette {
        name: "Spectral",
        kind: Diverging,
        colors: &[
            "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5",
            "#3288bd", "#5e4fa2",
        ],
    },
    Palette {
        name: "RdYlGn",
        kind: Diverging,
        colors: &[
            "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63",
            "#1a9850", "#006837",
        ],
    },
    Palette {
        name: "RdBu",
        kind: Diverging,
        colors: &[
            "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de", "#4393c3",
            "#2166ac", "#053061",
        ],
    },
    Palette {
        name: "PiYG",
        kind: Diverging,
        colors: &[
            "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186", "#7fbc41",
            "#4d9221", "#276419",
        ],
    },
    Palette {
        name: "PRGn",
        kind: Diverging,
        colors: &[
            "#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0", "#5aae61",
            "#1b7837", "#00441b",
        ],
    },
    Palette {
        name: "RdYlBu",
        kind: Diverging,
        colors: &[
            "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9", "#74add1",
            "#4575b4", "#313695",
        ],
    },
    Palette {
        name: "BrBG",
        kind: Diverging,
        colors: &[
            "#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5", "#80cdc1", "#35978f",
            "#01665e", "#003c30",
        ],
    },
    Palette {
        name: "RdGy",
        kind: Diverging,
        colors: &[
            "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#ffffff", "#e0e0e0", "#bababa", "#878787",
            "#4d4d4d", "#1a1a1a",
        ],
    },
    Palette {
        name: "PuOr",
        kind: Diverging,
        colors: &[
            "#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb", "#b2abd2", "#8073ac",
            "#542788", "#2d004b",
        ],
    },
    Palette {
        name: "Set2",
        kind: Qualitative,
        colors: &["#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3"],
    },
    Palette {
        name: "Accent",
        kind: Qualitative,
        colors: &["#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666"],
    },
    Palette {
        name: "Set1",
        kind: Qualitative,
        colors: &["#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf", "#999999"],
    },
    Palette {
        name: "Set3",
        kind: Qualitative,
        colors: &[
            "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#d9d9d9",
            "#bc80bd", "#ccebc5", "#ffed6f",
        ],
    },
    Palette {
        name: "Dark2",
        kind: Qualitative,
        colors: &["#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666"],
    },
    Palette {
        name: "Paired",
        kind: Qualitative,
        colors: &[
            "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00", "#cab2d6",
            "#6a3d9a", "#ffff99", "#b15928",
        ],
    },
    Palette {
        name: "Pastel2",
        kind: Qualitative,
        colors: &["#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc"],
    },
    Palette {
        name: "Pastel1",
        kind: Qualitative,
        colors: &["#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec", "#f2f2f2"],
    },
];

/// Case-insensitive catalog lookup.
#[must_use]
pub fn brewer(name: &str) -> Option<&'static Palette> {
    BREWER.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Built-in short ramp by exact name.
#[must_use]
pub fn builtin(name: &str) -> Option<&'static [&'static str]> {
    BUILTIN_RAMPS.iter().find(|(n, _)| *n == name).map(|(_, colors)| *colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use std::collections::HashSet;

    #[test]
    fn test_brewer_case_insensitive() {
        assert_eq!(brewer("viridis").map(|p| p.name), Some("Viridis"));
        assert_eq!(brewer("VIRIDIS").map(|p| p.name), Some("Viridis"));
        assert_eq!(brewer("ylgnbu").map(|p| p.name), Some("YlGnBu"));
        assert!(brewer("no-such-palette").is_none());
    }

    #[test]
    fn test_catalog_names_unique() {
        let names: HashSet<String> = BREWER.iter().map(|p| p.name.to_ascii_lowercase()).collect();
        assert_eq!(names.len(), BREWER.len());
    }

    #[test]
    fn test_catalog_stop_counts() {
        for palette in BREWER {
            match palette.kind {
                PaletteKind::Sequential => assert_eq!(palette.colors.len(), 9, "{}", palette.name),
                PaletteKind::Diverging => assert_eq!(palette.colors.len(), 11, "{}", palette.name),
                PaletteKind::Qualitative => assert!(palette.colors.len() >= 8, "{}", palette.name),
            }
        }
    }

    #[test]
    fn test_all_literals_parse() {
        for palette in BREWER {
            for c in palette.colors {
                assert!(Rgba::from_hex(c).is_ok(), "{} in {}", c, palette.name);
            }
        }
        for (name, colors) in BUILTIN_RAMPS {
            for c in *colors {
                assert!(Rgba::from_hex(c).is_ok(), "{c} in {name}");
            }
        }
    }

    #[test]
    fn test_builtin_exact_name() {
        assert_eq!(builtin("jet"), Some(&["#00f", "#ff0", "#f00"][..]));
        assert!(builtin("Jet").is_none());
    }
}
