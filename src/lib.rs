//! A deferred-rendering 2D plotting core.
//!
//! A [`Figure`] collects typed plot records (lines, contours, quad meshes) on
//! one panel or on a grid of subplots, then renders them in a single pass into
//! any [`Backend`]. Axes can be linear, logarithmic or symmetric-log; contours
//! come from marching squares; dashed strokes keep their phase across segment
//! boundaries.
//!
//! ```
//! use inkplot::{Axis, Figure, RecordingBackend, ScaleKind};
//!
//! let backend = RecordingBackend::new();
//! let log = backend.log();
//!
//! let mut fig = Figure::new(640.0, 480.0);
//! fig.set_backend(backend);
//! fig.plot_fmt(&[1.0, 10.0, 100.0], &[0.0, 1.0, 4.0], "r--o");
//! fig.set_scale(Axis::X, ScaleKind::Log);
//! fig.show().unwrap();
//!
//! assert_eq!(log.count("marker"), 3);
//! ```

pub mod backend;
pub mod colormap;
pub mod config;
pub mod contour;
pub mod dash;
pub mod errors;
pub mod figure;
pub mod layout;
pub mod legend;
pub mod log;
pub mod record;
pub mod render;
pub mod scale;
pub mod style;
pub mod types;

pub use backend::{Backend, ColorLookup, CommandLog, DrawCommand, HeatmapFill, RecordingBackend, Viewport};
pub use colormap::{BuiltinColormaps, Colormap};
pub use config::FigureConfig;
pub use dash::{DashPattern, DashWalker, LineStyle};
pub use errors::PlotError;
pub use figure::{Figure, FigureState, Panel};
pub use layout::{Gaps, Margins, SubplotLayout};
pub use legend::{BoxLegend, LegendEntry, LegendRenderer};
pub use record::{ContourPlot, LinePlot, MeshPlot, Plot, PlotRecord, RecordId};
pub use scale::{ScaleKind, ScaleState};
pub use style::{FormatSpec, Marker};
pub use types::{Axis, Grid, Range, Rect, Rgb, TextAnchor};
