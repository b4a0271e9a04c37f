//! Legend drawing.

use glam::{DVec2, dvec2};

use crate::backend::Backend;
use crate::dash::{DashWalker, LineStyle};
use crate::style::Marker;
use crate::types::{Rgb, TextAnchor};

/// What the legend shows for one labeled record
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub style: LineStyle,
    pub marker: Option<Marker>,
    pub line_width: f64,
}

/// Draws the legend of one panel
pub trait LegendRenderer {
    /// `anchor` is the top-right corner of the plot area in pixels
    fn draw_legend(&self, backend: &mut dyn Backend, entries: &[LegendEntry], anchor: DVec2);
}

/// Framed box with a style sample and label per row
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxLegend {
    pub font_size: f64,
    pub marker_size: f64,
    /// Inset from the anchor and inner padding
    pub padding: f64,
    pub sample_length: f64,
    /// Extent named dash styles are scaled by, so a short sample shows
    /// dashes at the size a panel-wide line would
    pub pattern_extent: f64,
}

impl Default for BoxLegend {
    fn default() -> Self {
        BoxLegend {
            font_size: 12.0,
            marker_size: 6.0,
            padding: 8.0,
            sample_length: 24.0,
            pattern_extent: 400.0,
        }
    }
}

impl BoxLegend {
    /// Rough label width; glyph metrics belong to the backend
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * 0.6
    }

    fn row_height(&self) -> f64 {
        self.font_size * 1.5
    }

    /// Size of the framed box for `entries`
    pub fn size(&self, entries: &[LegendEntry]) -> DVec2 {
        let label = entries
            .iter()
            .map(|e| self.text_width(&e.label))
            .fold(0.0, f64::max);
        dvec2(
            self.padding * 3.0 + self.sample_length + label,
            self.padding * 2.0 + self.row_height() * entries.len() as f64,
        )
    }
}

impl LegendRenderer for BoxLegend {
    fn draw_legend(&self, backend: &mut dyn Backend, entries: &[LegendEntry], anchor: DVec2) {
        if entries.is_empty() {
            return;
        }
        let size = self.size(entries);
        let top_left = anchor + dvec2(-self.padding - size.x, self.padding);
        let frame = [
            top_left,
            top_left + dvec2(size.x, 0.0),
            top_left + size,
            top_left + dvec2(0.0, size.y),
        ];
        backend.set_color(Rgb::WHITE);
        backend.fill_quad(&frame);
        backend.set_color(Rgb::BLACK);
        backend.draw_quad_outline(&frame, 1.0);

        for (row, entry) in entries.iter().enumerate() {
            let mid_y = top_left.y + self.padding + self.row_height() * (row as f64 + 0.5);
            let start = dvec2(top_left.x + self.padding, mid_y);
            let end = start + dvec2(self.sample_length, 0.0);

            backend.set_color(entry.color);
            if entry.style.is_visible() {
                backend.set_line_width(entry.line_width);
                let mut walker = DashWalker::new(entry.style.pattern(self.pattern_extent));
                walker.segment(start, end, &mut |a, b| backend.draw_line(a, b));
            }
            if let Some(marker) = entry.marker {
                backend.draw_marker((start + end) * 0.5, marker, self.marker_size);
            }

            backend.set_color(Rgb::BLACK);
            backend.draw_text(
                dvec2(end.x + self.padding, mid_y),
                &entry.label,
                TextAnchor::Start,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCommand, RecordingBackend};

    fn entry(label: &str, style: LineStyle, marker: Option<Marker>) -> LegendEntry {
        LegendEntry {
            label: label.into(),
            color: Rgb::RED,
            style,
            marker,
            line_width: 1.5,
        }
    }

    #[test]
    fn nothing_drawn_without_entries() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        BoxLegend::default().draw_legend(&mut backend, &[], dvec2(500.0, 50.0));
        assert!(log.is_empty());
    }

    #[test]
    fn one_row_per_entry_in_order() {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        let entries = [
            entry("alpha", LineStyle::Solid, None),
            entry("beta", LineStyle::None, Some(Marker::Circle)),
        ];
        BoxLegend::default().draw_legend(&mut backend, &entries, dvec2(500.0, 50.0));

        let labels: Vec<String> = log
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["alpha", "beta"]);
        assert_eq!(log.count("fill_quad"), 1);
        assert_eq!(log.count("quad_outline"), 1);
        // solid sample is one line, the markers-only entry draws no line
        assert_eq!(log.count("line"), 1);
        assert_eq!(log.count("marker"), 1);
    }

    fn sample_pieces(style: LineStyle) -> Vec<f64> {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        BoxLegend::default().draw_legend(&mut backend, &[entry("d", style, None)], dvec2(500.0, 50.0));
        log.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { a, b } => Some(a.distance(*b)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn dashed_sample_shows_full_size_dashes() {
        // 400 px reference: 12 on, 6 off, then the first 6 of the next dash
        let pieces = sample_pieces(LineStyle::Dashed);
        assert_eq!(pieces.len(), 2);
        assert!((pieces[0] - 12.0).abs() < 1e-9);
        assert!((pieces[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn dotted_sample_shows_visible_dots() {
        // 2 on, 4 off
        let pieces = sample_pieces(LineStyle::Dotted);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| (p - 2.0).abs() < 1e-9));
    }

    #[test]
    fn box_sits_inside_anchor() {
        let legend = BoxLegend::default();
        let entries = [entry("abc", LineStyle::Solid, None)];
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        legend.draw_legend(&mut backend, &entries, dvec2(400.0, 40.0));
        let frame = log
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillQuad(q) => Some(*q),
                _ => None,
            })
            .unwrap();
        let expected = dvec2(400.0 - legend.padding, 40.0 + legend.padding);
        assert!(frame[1].distance(expected) < 1e-9);
    }
}
