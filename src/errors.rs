//! Error types with diagnostics using miette
//!
//! Most of these never abort anything: the figure stores them as its sticky
//! error (or as a warning) and the offending call becomes a no-op. Only the
//! final hand-off to a backend returns them through `Result`.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::Axis;

/// Everything that can go wrong while building or rendering a figure
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PlotError {
    // ========================================================================
    // Caller contract violations
    // ========================================================================
    #[error("{what}: expected {expected}, got {got}")]
    #[diagnostic(
        code(inkplot::shape_mismatch),
        help("vertex grids need one more row and column than the cell grid")
    )]
    ShapeMismatch {
        what: &'static str,
        expected: String,
        got: String,
    },

    #[error("subplot ({row}, {col}) is outside the {rows}x{cols} grid")]
    #[diagnostic(code(inkplot::invalid_subplot))]
    InvalidSubplot {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("subplot grid must have at least one row and one column, got {rows}x{cols}")]
    #[diagnostic(code(inkplot::invalid_grid))]
    InvalidGrid { rows: usize, cols: usize },

    #[error("unknown line style: {token:?}")]
    #[diagnostic(
        code(inkplot::unknown_line_style),
        help("use one of `-`, `--`, `:`, `-.`, `none`")
    )]
    UnknownLineStyle { token: String },

    #[error("unknown marker: {token:?}")]
    #[diagnostic(
        code(inkplot::unknown_marker),
        help("use one of `o`, `x`, `+`, `*`, `s`, `d`, `^`, `v`, `.`")
    )]
    UnknownMarker { token: String },

    #[error("unknown color: {token:?}")]
    #[diagnostic(
        code(inkplot::unknown_color),
        help("use one of `r`, `g`, `b`, `c`, `m`, `y`, `k`, `w`")
    )]
    UnknownColor { token: String },

    #[error("unknown axis scale: {name:?}")]
    #[diagnostic(code(inkplot::unknown_scale), help("use `linear`, `log` or `symlog`"))]
    UnknownScale { name: String },

    #[error("invalid {axis} limits [{min}, {max}]")]
    #[diagnostic(
        code(inkplot::invalid_limits),
        help("limits must be finite with min < max, and positive on a log axis")
    )]
    InvalidLimits { axis: Axis, min: f64, max: f64 },

    #[error("invalid symlog threshold {value} on the {axis} axis")]
    #[diagnostic(code(inkplot::invalid_threshold), help("the threshold must be finite and > 0"))]
    InvalidThreshold { axis: Axis, value: f64 },

    #[error("invalid dash pattern: {reason}")]
    #[diagnostic(code(inkplot::invalid_dash_pattern))]
    InvalidDashPattern { reason: &'static str },

    // ========================================================================
    // Capacity
    // ========================================================================
    #[error("record capacity of {capacity} reached, record dropped")]
    #[diagnostic(code(inkplot::capacity_exceeded), severity(Warning))]
    CapacityExceeded { capacity: usize },

    // ========================================================================
    // Backend hand-off
    // ========================================================================
    #[error("no backend attached to the figure")]
    #[diagnostic(code(inkplot::no_backend), help("call `Figure::set_backend` before saving"))]
    NoBackend,

    #[error("backend failed to finalize {target:?}: {message}")]
    #[diagnostic(code(inkplot::backend))]
    Backend { target: String, message: String },
}

impl PlotError {
    /// Shorthand for a grid/vector shape violation
    pub(crate) fn shape(
        what: &'static str,
        expected: impl std::fmt::Display,
        got: impl std::fmt::Display,
    ) -> Self {
        PlotError::ShapeMismatch {
            what,
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// True for problems that degrade a render but never block it
    pub fn is_warning(&self) -> bool {
        matches!(self, PlotError::CapacityExceeded { .. })
    }
}
