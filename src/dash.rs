//! Line styles and the dash-pattern walker.
//!
//! A `DashWalker` walks a polyline segment by segment and emits only the "on"
//! pieces of a repeating pattern. The pattern phase survives from one segment
//! to the next, so a dash cut short at a vertex resumes on the following
//! segment instead of restarting. A NaN vertex breaks the line and resets the
//! phase: every NaN-delimited run starts its own pattern.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::errors::PlotError;
use crate::types::finite_point;

/// Segments shorter than this are skipped without consuming pattern state
pub const SEGMENT_EPSILON: f64 = 1e-9;

/// Shortest on or off length a custom pattern may use, in pixels
pub const MIN_DASH_LENGTH: f64 = 1e-3;

/// Named pattern lengths as fractions of the rendered extent
const DASH: f64 = 0.03;
const DASH_GAP: f64 = 0.015;
const DOT: f64 = 0.005;
const DOT_GAP: f64 = 0.01;

/// How a line is stroked
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Alternating on/off lengths in pixels, starting with "on"
    Custom(Vec<f64>),
    /// No line at all (markers only)
    None,
}

impl LineStyle {
    /// A custom on/off pattern.
    ///
    /// Lengths must be finite and at least [`MIN_DASH_LENGTH`]. An odd-length pattern is repeated
    /// once so that on and off alternate consistently.
    pub fn custom(lengths: &[f64]) -> Result<LineStyle, PlotError> {
        validate_lengths(lengths).map(LineStyle::Custom)
    }

    /// Whether anything is stroked
    pub fn is_visible(&self) -> bool {
        !matches!(self, LineStyle::None)
    }

    /// Concrete pattern for a polyline whose rendered extent is `extent`.
    ///
    /// `None` means solid. Named styles scale with the extent; a zero or
    /// non-finite extent falls back to 1.
    pub fn pattern(&self, extent: f64) -> Option<DashPattern> {
        let e = if extent.is_finite() && extent > 0.0 { extent } else { 1.0 };
        let lengths = match self {
            LineStyle::Solid | LineStyle::None => return None,
            LineStyle::Dashed => vec![DASH * e, DASH_GAP * e],
            LineStyle::Dotted => vec![DOT * e, DOT_GAP * e],
            LineStyle::DashDot => vec![DASH * e, DASH_GAP * e, DOT * e, DASH_GAP * e],
            LineStyle::Custom(lengths) => lengths.clone(),
        };
        Some(DashPattern { lengths })
    }

    /// The token this style parses from
    pub fn token(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::Dotted => ":",
            LineStyle::DashDot => "-.",
            LineStyle::Custom(_) => "custom",
            LineStyle::None => "none",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LineStyle {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dash-dot" | "dashdot" => Ok(LineStyle::DashDot),
            "" | "none" => Ok(LineStyle::None),
            other => Err(PlotError::UnknownLineStyle {
                token: other.to_string(),
            }),
        }
    }
}

fn validate_lengths(lengths: &[f64]) -> Result<Vec<f64>, PlotError> {
    if lengths.is_empty() {
        return Err(PlotError::InvalidDashPattern {
            reason: "pattern is empty",
        });
    }
    if lengths.iter().any(|l| !l.is_finite() || *l <= 0.0) {
        return Err(PlotError::InvalidDashPattern {
            reason: "lengths must be finite and positive",
        });
    }
    if lengths.iter().any(|l| *l < MIN_DASH_LENGTH) {
        return Err(PlotError::InvalidDashPattern {
            reason: "lengths must be at least 0.001 px",
        });
    }
    let mut lengths = lengths.to_vec();
    if lengths.len() % 2 == 1 {
        lengths.extend_from_within(..);
    }
    Ok(lengths)
}

/// A validated on/off length sequence
#[derive(Clone, Debug, PartialEq)]
pub struct DashPattern {
    lengths: Vec<f64>,
}

impl DashPattern {
    /// Build a pattern directly (lengths as in [`LineStyle::custom`])
    pub fn new(lengths: &[f64]) -> Result<DashPattern, PlotError> {
        validate_lengths(lengths).map(|lengths| DashPattern { lengths })
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Length of one full on/off cycle
    pub fn period(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Fraction of a period that is drawn
    pub fn duty_cycle(&self) -> f64 {
        let on: f64 = self.lengths.iter().step_by(2).sum();
        on / self.period()
    }
}

/// Position inside a pattern, carried from segment to segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashState {
    /// Distance already consumed within the current element
    pub consumed: f64,
    /// Index of the current element
    pub index: usize,
    /// Whether the current element is drawn
    pub drawing: bool,
}

impl Default for DashState {
    fn default() -> Self {
        DashState {
            consumed: 0.0,
            index: 0,
            drawing: true,
        }
    }
}

/// Walks segments under an optional pattern (`None` = solid)
#[derive(Clone, Debug)]
pub struct DashWalker {
    pattern: Option<DashPattern>,
    state: DashState,
}

impl DashWalker {
    pub fn new(pattern: Option<DashPattern>) -> Self {
        DashWalker {
            pattern,
            state: DashState::default(),
        }
    }

    pub fn solid() -> Self {
        Self::new(None)
    }

    pub fn state(&self) -> DashState {
        self.state
    }

    /// Back to the initial phase: first element, nothing consumed, drawing
    pub fn reset(&mut self) {
        self.state = DashState::default();
    }

    /// Walk one straight segment, emitting its drawn pieces.
    ///
    /// Elements shorter than [`MIN_DASH_LENGTH`] are walked as that length.
    pub fn segment(&mut self, a: DVec2, b: DVec2, emit: &mut impl FnMut(DVec2, DVec2)) {
        let delta = b - a;
        let length = delta.length();
        if !(length >= SEGMENT_EPSILON) {
            return;
        }

        let Some(pattern) = &self.pattern else {
            emit(a, b);
            return;
        };

        let dir = delta / length;
        let lengths = &pattern.lengths;
        let mut pos = 0.0;
        while length - pos > SEGMENT_EPSILON {
            let element = lengths[self.state.index].max(MIN_DASH_LENGTH);
            let remaining = element - self.state.consumed;
            let step = remaining.min(length - pos);
            let next = pos + step;
            // stop once `pos` is too large for the step to move it
            if !(next > pos) {
                break;
            }
            if self.state.drawing {
                emit(a + dir * pos, a + dir * next);
            }
            pos = next;
            self.state.consumed += step;
            if self.state.consumed >= element - SEGMENT_EPSILON {
                self.state.consumed = 0.0;
                self.state.index = (self.state.index + 1) % lengths.len();
                self.state.drawing = !self.state.drawing;
            }
        }
    }

    /// Walk a whole polyline; pairs touching a NaN vertex reset the phase.
    pub fn polyline(&mut self, points: &[DVec2], emit: &mut impl FnMut(DVec2, DVec2)) {
        for pair in points.windows(2) {
            if !finite_point(pair[0]) || !finite_point(pair[1]) {
                self.reset();
                continue;
            }
            self.segment(pair[0], pair[1], emit);
        }
    }
}

/// Larger side of the bounding box of the finite points
pub fn extent(points: &[DVec2]) -> f64 {
    let mut min = DVec2::splat(f64::INFINITY);
    let mut max = DVec2::splat(f64::NEG_INFINITY);
    for p in points.iter().copied().filter(|p| finite_point(*p)) {
        min = min.min(p);
        max = max.max(p);
    }
    let size = max - min;
    if size.x.is_finite() && size.y.is_finite() {
        size.x.max(size.y)
    } else {
        0.0
    }
}

/// Split a polyline at NaN vertices into runs of finite points
pub fn split_runs(points: &[DVec2]) -> Vec<&[DVec2]> {
    points
        .split(|p| !finite_point(*p))
        .filter(|run| !run.is_empty())
        .collect()
}
