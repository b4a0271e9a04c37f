//! Axis scales: data value → rendering coordinate.
//!
//! `transform` and `inverse` are pure functions; the render pass calls them for
//! every vertex. `AxisState` holds what the user configured for one axis and
//! resolves it, once per render, into a `ScaleState` carrying both the
//! data-space limits (for ticks) and the transformed limits (for drawing).

use std::fmt;
use std::str::FromStr;

use crate::errors::PlotError;
use crate::types::{Axis, Range};

/// Default linear half-width of a symlog axis
pub const DEFAULT_SYMLOG_THRESHOLD: f64 = 1.0;

/// A constant extent widens by this fraction of its magnitude (at least ±0.5)
pub const ZERO_SPAN_FRACTION: f64 = 0.05;

/// How an axis maps data values to rendering coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Symlog,
}

impl ScaleKind {
    /// Map a data value into rendering space.
    ///
    /// `Log` yields NaN for `value <= 0`; callers filter with [`ScaleKind::accepts`]
    /// before computing ranges. `threshold` only matters for `Symlog`.
    #[inline]
    pub fn transform(self, value: f64, threshold: f64) -> f64 {
        match self {
            ScaleKind::Linear => value,
            ScaleKind::Log => {
                if value > 0.0 {
                    value.log10()
                } else {
                    f64::NAN
                }
            }
            ScaleKind::Symlog => {
                let magnitude = value.abs();
                if magnitude <= threshold {
                    value
                } else {
                    value.signum() * ((magnitude / threshold).log10() + threshold)
                }
            }
        }
    }

    /// Inverse of [`ScaleKind::transform`] on the scale's valid domain
    #[inline]
    pub fn inverse(self, coord: f64, threshold: f64) -> f64 {
        match self {
            ScaleKind::Linear => coord,
            ScaleKind::Log => 10f64.powf(coord),
            ScaleKind::Symlog => {
                let magnitude = coord.abs();
                if magnitude <= threshold {
                    coord
                } else {
                    coord.signum() * threshold * 10f64.powf(magnitude - threshold)
                }
            }
        }
    }

    /// Whether `value` can take part in range computation on this scale
    #[inline]
    pub fn accepts(self, value: f64) -> bool {
        value.is_finite() && (self != ScaleKind::Log || value > 0.0)
    }

    /// Data range used when an axis has nothing to show
    fn fallback_range(self) -> Range {
        match self {
            ScaleKind::Log => Range::new(1.0, 10.0),
            ScaleKind::Linear | ScaleKind::Symlog => Range::new(0.0, 1.0),
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleKind::Linear => write!(f, "linear"),
            ScaleKind::Log => write!(f, "log"),
            ScaleKind::Symlog => write!(f, "symlog"),
        }
    }
}

impl FromStr for ScaleKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(ScaleKind::Linear),
            "log" => Ok(ScaleKind::Log),
            "symlog" => Ok(ScaleKind::Symlog),
            _ => Err(PlotError::UnknownScale {
                name: s.to_string(),
            }),
        }
    }
}

/// Free-function form of [`ScaleKind::transform`]
#[inline]
pub fn transform(value: f64, kind: ScaleKind, threshold: f64) -> f64 {
    kind.transform(value, threshold)
}

/// Free-function form of [`ScaleKind::inverse`]
#[inline]
pub fn inverse(coord: f64, kind: ScaleKind, threshold: f64) -> f64 {
    kind.inverse(coord, threshold)
}

/// Resolved limits of one axis for one render pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    pub kind: ScaleKind,
    pub threshold: f64,
    /// Limits in data units (tick generation)
    pub data: Range,
    /// Limits in rendering units (drawing)
    pub transformed: Range,
}

impl ScaleState {
    /// Transform a data value with this axis' scale
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        self.kind.transform(value, self.threshold)
    }

    /// Position of a data value in `[0, 1]` across the transformed limits
    #[inline]
    pub fn fraction(&self, value: f64) -> f64 {
        self.transformed.normalize(self.apply(value))
    }
}

/// User-facing configuration of one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisState {
    axis: Axis,
    kind: ScaleKind,
    threshold: f64,
    /// Explicit limits pin the axis; `None` means auto
    limits: Option<Range>,
}

impl AxisState {
    pub fn new(axis: Axis) -> Self {
        AxisState {
            axis,
            kind: ScaleKind::Linear,
            threshold: DEFAULT_SYMLOG_THRESHOLD,
            limits: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn limits(&self) -> Option<Range> {
        self.limits
    }

    pub fn is_pinned(&self) -> bool {
        self.limits.is_some()
    }

    /// Switch scale kind.
    ///
    /// Explicit limits that the new scale cannot represent revert to auto.
    pub fn set_kind(&mut self, kind: ScaleKind) {
        self.kind = kind;
        if let Some(limits) = self.limits {
            if !kind.accepts(limits.min) || !kind.accepts(limits.max) {
                crate::log::warn!(
                    axis = %self.axis,
                    scale = %kind,
                    "explicit limits invalid for new scale, reverting to auto"
                );
                self.limits = None;
            }
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), PlotError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(PlotError::InvalidThreshold {
                axis: self.axis,
                value: threshold,
            });
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Pin the axis to `[min, max]`
    pub fn set_limits(&mut self, min: f64, max: f64) -> Result<(), PlotError> {
        let valid = min.is_finite() && max.is_finite() && min < max;
        if !valid || !self.kind.accepts(min) || !self.kind.accepts(max) {
            return Err(PlotError::InvalidLimits {
                axis: self.axis,
                min,
                max,
            });
        }
        self.limits = Some(Range::new(min, max));
        Ok(())
    }

    /// Return to automatic limits
    pub fn clear_limits(&mut self) {
        self.limits = None;
    }

    /// Produce data-space and transformed limits together.
    ///
    /// `extent` is the data extent over values this scale accepts. Auto limits
    /// are padded by `padding` of the transformed span on both sides. A zero
    /// span first widens by [`ZERO_SPAN_FRACTION`] of its magnitude, at least
    /// ±0.5 in transformed units.
    pub fn resolve(&self, extent: Option<Range>, padding: f64) -> ScaleState {
        let t = |v: f64| self.kind.transform(v, self.threshold);
        let inv = |v: f64| self.kind.inverse(v, self.threshold);

        if let Some(limits) = self.limits {
            return ScaleState {
                kind: self.kind,
                threshold: self.threshold,
                data: limits,
                transformed: Range::new(t(limits.min), t(limits.max)),
            };
        }

        let data = extent.unwrap_or_else(|| self.kind.fallback_range());
        let mut transformed = Range::new(t(data.min), t(data.max));
        if transformed.span() <= f64::EPSILON * transformed.max.abs().max(1.0) {
            let mid = (transformed.min + transformed.max) / 2.0;
            let half = (mid.abs() * ZERO_SPAN_FRACTION).max(0.5);
            transformed = Range::new(mid - half, mid + half);
        }
        let mut transformed = transformed.padded(padding);
        if !(transformed.span() > 0.0 && transformed.span().is_finite()) {
            crate::log::debug!(axis = %self.axis, "degenerate axis range, using the default");
            let fallback = self.kind.fallback_range();
            transformed = Range::new(t(fallback.min), t(fallback.max)).padded(padding);
        }

        ScaleState {
            kind: self.kind,
            threshold: self.threshold,
            data: Range::new(inv(transformed.min), inv(transformed.max)),
            transformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [ScaleKind; 3] = [ScaleKind::Linear, ScaleKind::Log, ScaleKind::Symlog];

    #[test]
    fn linear_is_identity() {
        for v in [-1e9, -3.5, 0.0, 2.25, 1e12] {
            assert_eq!(transform(v, ScaleKind::Linear, 1.0), v);
        }
    }

    #[test]
    fn log_is_log10() {
        assert!((ScaleKind::Log.transform(1000.0, 1.0) - 3.0).abs() < 1e-12);
        assert!(ScaleKind::Log.transform(0.0, 1.0).is_nan());
        assert!(ScaleKind::Log.transform(-5.0, 1.0).is_nan());
    }

    #[test]
    fn transforms_are_monotonic() {
        for kind in KINDS {
            let samples: Vec<f64> = (-400..=400)
                .map(|i| i as f64 * 0.37)
                .filter(|v| kind.accepts(*v))
                .collect();
            for pair in samples.windows(2) {
                let a = kind.transform(pair[0], 2.0);
                let b = kind.transform(pair[1], 2.0);
                assert!(b > a, "{kind}: f({}) = {a} !< f({}) = {b}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn symlog_is_continuous_at_threshold() {
        for threshold in [0.5, 1.0, 10.0] {
            for sign in [1.0, -1.0] {
                let edge = sign * threshold;
                let eps = 1e-9;
                let inside = ScaleKind::Symlog.transform(edge - sign * eps, threshold);
                let outside = ScaleKind::Symlog.transform(edge + sign * eps, threshold);
                assert!((inside - outside).abs() < 1e-6, "jump at {edge}");
            }
        }
    }

    #[test]
    fn symlog_is_linear_inside_threshold() {
        assert_eq!(ScaleKind::Symlog.transform(0.3, 1.0), 0.3);
        assert_eq!(ScaleKind::Symlog.transform(-0.9, 1.0), -0.9);
        // one decade past the threshold adds one unit
        assert!((ScaleKind::Symlog.transform(10.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((ScaleKind::Symlog.transform(-10.0, 1.0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_round_trips() {
        for kind in KINDS {
            for v in [-250.0, -1.5, -0.25, 0.5, 3.0, 4096.0] {
                if !kind.accepts(v) {
                    continue;
                }
                let back = inverse(transform(v, kind, 1.5), kind, 1.5);
                assert!((back - v).abs() < 1e-9 * v.abs().max(1.0), "{kind} {v} -> {back}");
            }
        }
    }

    #[test]
    fn parse_scale_names() {
        assert_eq!("LOG".parse::<ScaleKind>(), Ok(ScaleKind::Log));
        assert_eq!(" symlog ".parse::<ScaleKind>(), Ok(ScaleKind::Symlog));
        assert!(matches!(
            "cubic".parse::<ScaleKind>(),
            Err(PlotError::UnknownScale { .. })
        ));
    }

    #[test]
    fn resolve_pads_auto_limits() {
        let axis = AxisState::new(Axis::X);
        let state = axis.resolve(Some(Range::new(0.0, 2.0)), 0.05);
        assert!((state.data.min + 0.1).abs() < 1e-12);
        assert!((state.data.max - 2.1).abs() < 1e-12);
        assert_eq!(state.data, state.transformed);
    }

    #[test]
    fn resolve_keeps_explicit_limits() {
        let mut axis = AxisState::new(Axis::Y);
        axis.set_limits(-1.0, 1.0).unwrap();
        let state = axis.resolve(Some(Range::new(-50.0, 50.0)), 0.05);
        assert_eq!(state.data, Range::new(-1.0, 1.0));
        assert_eq!(state.transformed, Range::new(-1.0, 1.0));
    }

    #[test]
    fn resolve_log_pads_in_decades() {
        let mut axis = AxisState::new(Axis::X);
        axis.set_kind(ScaleKind::Log);
        let state = axis.resolve(Some(Range::new(1.0, 100.0)), 0.05);
        assert!((state.transformed.min + 0.1).abs() < 1e-12);
        assert!((state.transformed.max - 2.1).abs() < 1e-12);
        assert!(state.data.min > 0.0);
        assert!((state.data.min - 10f64.powf(-0.1)).abs() < 1e-12);
    }

    #[test]
    fn resolve_widens_zero_span() {
        let axis = AxisState::new(Axis::X);
        let state = axis.resolve(Some(Range::new(4.0, 4.0)), 0.0);
        assert_eq!(state.transformed, Range::new(3.5, 4.5));
    }

    #[test]
    fn resolve_widens_large_constant_extent() {
        let axis = AxisState::new(Axis::Y);
        let state = axis.resolve(Some(Range::new(1e17, 1e17)), 0.05);
        assert!(state.transformed.span() > 0.0);
        assert!(state.transformed.contains(1e17));
        let f = state.fraction(1e17);
        assert!((f - 0.5).abs() < 1e-9, "{f}");
    }

    #[test]
    fn resolve_never_returns_an_empty_span() {
        let axis = AxisState::new(Axis::X);
        let state = axis.resolve(Some(Range::new(f64::MAX, f64::MAX)), 0.05);
        assert!(state.transformed.span() > 0.0 && state.transformed.span().is_finite());
    }

    #[test]
    fn resolve_without_data_uses_fallback() {
        let mut axis = AxisState::new(Axis::Y);
        axis.set_kind(ScaleKind::Log);
        let state = axis.resolve(None, 0.0);
        assert_eq!(state.transformed, Range::new(0.0, 1.0));
    }

    #[test]
    fn set_limits_rejects_bad_input() {
        let mut axis = AxisState::new(Axis::X);
        assert!(axis.set_limits(1.0, 1.0).is_err());
        assert!(axis.set_limits(2.0, 1.0).is_err());
        assert!(axis.set_limits(f64::NAN, 1.0).is_err());
        axis.set_kind(ScaleKind::Log);
        assert!(axis.set_limits(0.0, 10.0).is_err());
        assert!(axis.set_limits(0.1, 10.0).is_ok());
    }

    #[test]
    fn switching_to_log_drops_nonpositive_limits() {
        let mut axis = AxisState::new(Axis::X);
        axis.set_limits(-1.0, 1.0).unwrap();
        axis.set_kind(ScaleKind::Log);
        assert!(!axis.is_pinned());
    }

    #[test]
    fn threshold_must_be_positive() {
        let mut axis = AxisState::new(Axis::X);
        assert!(axis.set_threshold(0.0).is_err());
        assert!(axis.set_threshold(f64::INFINITY).is_err());
        assert!(axis.set_threshold(0.25).is_ok());
        assert_eq!(axis.threshold(), 0.25);
    }
}
