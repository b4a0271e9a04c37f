//! Display-list backend: every call becomes a [`DrawCommand`].
//!
//! Hosts replay the list onto their own surface; tests read it back through a
//! [`CommandLog`] handle kept before the backend is moved into a figure.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use glam::DVec2;

use super::{Backend, ColorLookup, HeatmapFill, Viewport};
use crate::errors::PlotError;
use crate::style::Marker;
use crate::types::{Grid, Range, Rect, Rgb, TextAnchor};

/// One recorded backend call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Begin {
        width: f64,
        height: f64,
    },
    Viewport {
        area: Rect,
        /// Transformed x bounds
        x: Range,
        /// Transformed y bounds
        y: Range,
    },
    Color(Rgb),
    LineWidth(f64),
    Line {
        a: DVec2,
        b: DVec2,
    },
    Marker {
        at: DVec2,
        marker: Marker,
        size: f64,
    },
    FillQuad([DVec2; 4]),
    QuadOutline {
        quad: [DVec2; 4],
        width: f64,
    },
    Text {
        at: DVec2,
        text: String,
        anchor: TextAnchor,
    },
    Heatmap {
        x_centers: Vec<f64>,
        y_centers: Vec<f64>,
        /// Row-major colors, one per cell
        colors: Vec<Rgb>,
        vmin: f64,
        vmax: f64,
    },
    Finalize {
        target: String,
    },
}

impl DrawCommand {
    /// Short lowercase name of the command kind
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Begin { .. } => "begin",
            DrawCommand::Viewport { .. } => "viewport",
            DrawCommand::Color(_) => "color",
            DrawCommand::LineWidth(_) => "line_width",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Marker { .. } => "marker",
            DrawCommand::FillQuad(_) => "fill_quad",
            DrawCommand::QuadOutline { .. } => "quad_outline",
            DrawCommand::Text { .. } => "text",
            DrawCommand::Heatmap { .. } => "heatmap",
            DrawCommand::Finalize { .. } => "finalize",
        }
    }
}

struct Pt(DVec2);

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.0.x, self.0.y)
    }
}

fn quad(f: &mut fmt::Formatter<'_>, q: &[DVec2; 4]) -> fmt::Result {
    write!(f, "{} {} {} {}", Pt(q[0]), Pt(q[1]), Pt(q[2]), Pt(q[3]))
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Begin { width, height } => write!(f, "begin {width}x{height}"),
            DrawCommand::Viewport { area, x, y } => write!(
                f,
                "viewport {:.1},{:.1} {:.1}x{:.1} x=[{:.3}, {:.3}] y=[{:.3}, {:.3}]",
                area.x, area.y, area.width, area.height, x.min, x.max, y.min, y.max
            ),
            DrawCommand::Color(c) => write!(f, "color {c}"),
            DrawCommand::LineWidth(w) => write!(f, "line_width {w:.2}"),
            DrawCommand::Line { a, b } => write!(f, "line {} {}", Pt(*a), Pt(*b)),
            DrawCommand::Marker { at, marker, size } => {
                write!(f, "marker {marker} {} {size:.1}", Pt(*at))
            }
            DrawCommand::FillQuad(q) => {
                write!(f, "fill_quad ")?;
                quad(f, q)
            }
            DrawCommand::QuadOutline { quad: q, width } => {
                write!(f, "quad_outline {width:.2} ")?;
                quad(f, q)
            }
            DrawCommand::Text { at, text, anchor } => {
                write!(f, "text {:?} {} {:?}", text, Pt(*at), anchor)
            }
            DrawCommand::Heatmap {
                x_centers,
                y_centers,
                vmin,
                vmax,
                ..
            } => write!(
                f,
                "heatmap {}x{} [{vmin}, {vmax}]",
                y_centers.len(),
                x_centers.len()
            ),
            DrawCommand::Finalize { target } => write!(f, "finalize {target:?}"),
        }
    }
}

/// Shared handle to a recording backend's command list
#[derive(Clone, Debug, Default)]
pub struct CommandLog(Rc<RefCell<Vec<DrawCommand>>>);

impl CommandLog {
    fn push(&self, command: DrawCommand) {
        self.0.borrow_mut().push(command);
    }

    /// Borrow the recorded commands
    pub fn commands(&self) -> Ref<'_, Vec<DrawCommand>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Number of commands of the given [`DrawCommand::kind`]
    pub fn count(&self, kind: &str) -> usize {
        self.0.borrow().iter().filter(|c| c.kind() == kind).count()
    }

    /// Commands between the first viewport whose area is `area` and the next
    /// viewport, i.e. what was drawn into one panel
    pub fn panel(&self, area: Rect) -> Vec<DrawCommand> {
        let commands = self.0.borrow();
        commands
            .iter()
            .skip_while(|c| !matches!(c, DrawCommand::Viewport { area: a, .. } if *a == area))
            .skip(1)
            .take_while(|c| !matches!(c, DrawCommand::Viewport { .. } | DrawCommand::Finalize { .. }))
            .cloned()
            .collect()
    }

    /// One line per command
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for c in self.0.borrow().iter() {
            out.push_str(&c.to_string());
            out.push('\n');
        }
        out
    }
}

/// Backend that records every call
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: CommandLog,
    heatmap: bool,
    fail_with: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept bulk heatmap fills
    pub fn with_heatmap(mut self) -> Self {
        self.heatmap = true;
        self
    }

    /// Make `finalize` fail with `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Handle that stays readable after the backend is moved
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl Backend for RecordingBackend {
    fn begin(&mut self, width: f64, height: f64) {
        self.log.push(DrawCommand::Begin { width, height });
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.log.push(DrawCommand::Viewport {
            area: viewport.area,
            x: viewport.x.transformed,
            y: viewport.y.transformed,
        });
    }

    fn set_color(&mut self, color: Rgb) {
        self.log.push(DrawCommand::Color(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.log.push(DrawCommand::LineWidth(width));
    }

    fn draw_line(&mut self, a: DVec2, b: DVec2) {
        self.log.push(DrawCommand::Line { a, b });
    }

    fn draw_marker(&mut self, at: DVec2, marker: Marker, size: f64) {
        self.log.push(DrawCommand::Marker { at, marker, size });
    }

    fn fill_quad(&mut self, quad: &[DVec2; 4]) {
        self.log.push(DrawCommand::FillQuad(*quad));
    }

    fn draw_quad_outline(&mut self, quad: &[DVec2; 4], width: f64) {
        self.log.push(DrawCommand::QuadOutline { quad: *quad, width });
    }

    fn draw_text(&mut self, at: DVec2, text: &str, anchor: TextAnchor) {
        self.log.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            anchor,
        });
    }

    fn heatmap(&mut self) -> Option<&mut dyn HeatmapFill> {
        if self.heatmap {
            Some(self as &mut dyn HeatmapFill)
        } else {
            None
        }
    }

    fn default_target(&self) -> String {
        "recording".to_string()
    }

    fn finalize(&mut self, target: &str) -> Result<(), PlotError> {
        if let Some(message) = &self.fail_with {
            return Err(PlotError::Backend {
                target: target.to_string(),
                message: message.clone(),
            });
        }
        self.log.push(DrawCommand::Finalize {
            target: target.to_string(),
        });
        Ok(())
    }
}

impl HeatmapFill for RecordingBackend {
    fn fill_heatmap(
        &mut self,
        x_centers: &[f64],
        y_centers: &[f64],
        values: &Grid,
        vmin: f64,
        vmax: f64,
        colors: &dyn ColorLookup,
    ) {
        self.log.push(DrawCommand::Heatmap {
            x_centers: x_centers.to_vec(),
            y_centers: y_centers.to_vec(),
            colors: values.values().iter().map(|v| colors.lookup(*v)).collect(),
            vmin,
            vmax,
        });
    }
}
