//! Value → color mapping for contour fills, meshes and colorbars.

use crate::backend::ColorLookup;
use crate::types::Rgb;

/// Name used when a record does not ask for a specific map
pub const DEFAULT_COLORMAP: &str = "viridis";

/// Maps a scalar within `[vmin, vmax]` to a color
pub trait Colormap {
    /// Color for `value`. Values outside the range clamp to the ends; a
    /// degenerate or non-finite range maps everything to the middle color.
    fn value_to_rgb(&self, value: f64, vmin: f64, vmax: f64, name: &str) -> Rgb;
}

/// Position of `value` in `[vmin, vmax]`, clamped to `[0, 1]`
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    let span = vmax - vmin;
    if !(span > 0.0) || !span.is_finite() || !value.is_finite() {
        return 0.5;
    }
    ((value - vmin) / span).clamp(0.0, 1.0)
}

/// Color stops sampled from the matplotlib viridis map
#[rustfmt::skip]
const VIRIDIS: [(f64, f64, f64); 9] = [
    (0.267, 0.005, 0.329),
    (0.279, 0.175, 0.483),
    (0.230, 0.322, 0.546),
    (0.173, 0.449, 0.558),
    (0.128, 0.567, 0.551),
    (0.153, 0.683, 0.498),
    (0.362, 0.786, 0.388),
    (0.663, 0.862, 0.196),
    (0.993, 0.906, 0.144),
];

#[rustfmt::skip]
const COOLWARM: [(f64, f64, f64); 3] = [
    (0.230, 0.299, 0.754),
    (0.865, 0.865, 0.865),
    (0.706, 0.016, 0.150),
];

/// Piecewise-linear interpolation over evenly spaced stops
fn stops(table: &[(f64, f64, f64)], t: f64) -> Rgb {
    let scaled = t * (table.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(table.len() - 2);
    let frac = scaled - lo as f64;
    let (r0, g0, b0) = table[lo];
    let (r1, g1, b1) = table[lo + 1];
    Rgb::new(r0, g0, b0).lerp(Rgb::new(r1, g1, b1), frac)
}

fn jet(t: f64) -> Rgb {
    Rgb::new(
        1.5 - 4.0 * (t - 0.75).abs(),
        1.5 - 4.0 * (t - 0.5).abs(),
        1.5 - 4.0 * (t - 0.25).abs(),
    )
}

fn hot(t: f64) -> Rgb {
    if t < 1.0 / 3.0 {
        Rgb::new(3.0 * t, 0.0, 0.0)
    } else if t < 2.0 / 3.0 {
        Rgb::new(1.0, 3.0 * t - 1.0, 0.0)
    } else {
        Rgb::new(1.0, 1.0, 3.0 * t - 2.0)
    }
}

/// The maps shipped with the crate: `viridis`, `jet`, `gray`, `hot`, `coolwarm`
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinColormaps;

impl Colormap for BuiltinColormaps {
    fn value_to_rgb(&self, value: f64, vmin: f64, vmax: f64, name: &str) -> Rgb {
        let t = normalize(value, vmin, vmax);
        match name.to_ascii_lowercase().as_str() {
            "viridis" => stops(&VIRIDIS, t),
            "jet" => jet(t),
            "gray" | "grey" => Rgb::new(t, t, t),
            "hot" => hot(t),
            "coolwarm" => stops(&COOLWARM, t),
            other => {
                crate::log::debug!(name = other, "unknown colormap, using viridis");
                stops(&VIRIDIS, t)
            }
        }
    }
}

/// A colormap bound to a name and value range
pub struct MappedColors<'a> {
    pub colormap: &'a dyn Colormap,
    pub name: &'a str,
    pub vmin: f64,
    pub vmax: f64,
}

impl ColorLookup for MappedColors<'_> {
    fn lookup(&self, value: f64) -> Rgb {
        self.colormap.value_to_rgb(value, self.vmin, self.vmax, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_and_handles_degenerate_ranges() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(30.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(1.0, 2.0, 2.0), 0.5);
        assert_eq!(normalize(f64::NAN, 0.0, 1.0), 0.5);
    }

    #[test]
    fn viridis_endpoints() {
        let maps = BuiltinColormaps;
        assert_eq!(maps.value_to_rgb(0.0, 0.0, 1.0, "viridis"), Rgb::new(0.267, 0.005, 0.329));
        let top = maps.value_to_rgb(1.0, 0.0, 1.0, "viridis");
        assert!((top.r - 0.993).abs() < 1e-12);
        assert!((top.g - 0.906).abs() < 1e-12);
        assert!((top.b - 0.144).abs() < 1e-12);
    }

    #[test]
    fn gray_is_linear() {
        let c = BuiltinColormaps.value_to_rgb(2.5, 0.0, 10.0, "gray");
        assert_eq!(c, Rgb::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn unknown_name_falls_back_to_viridis() {
        let maps = BuiltinColormaps;
        assert_eq!(
            maps.value_to_rgb(0.3, 0.0, 1.0, "nope"),
            maps.value_to_rgb(0.3, 0.0, 1.0, "viridis")
        );
    }

    #[test]
    fn hot_runs_black_to_white() {
        let maps = BuiltinColormaps;
        assert_eq!(maps.value_to_rgb(0.0, 0.0, 1.0, "hot"), Rgb::BLACK);
        assert_eq!(maps.value_to_rgb(1.0, 0.0, 1.0, "hot"), Rgb::WHITE);
    }

    #[test]
    fn mapped_colors_bind_range() {
        let lookup = MappedColors {
            colormap: &BuiltinColormaps,
            name: "gray",
            vmin: 10.0,
            vmax: 20.0,
        };
        assert_eq!(lookup.lookup(15.0), Rgb::new(0.5, 0.5, 0.5));
    }
}
