//! Tick positions and labels per scale kind.

use crate::scale::{ScaleKind, ScaleState};
use crate::types::Range;

/// One axis tick
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Data value
    pub value: f64,
    /// Transformed value, inside the axis' transformed limits
    pub position: f64,
    pub label: String,
}

/// Ticks for a resolved axis, aiming at roughly `target` of them
pub fn ticks(state: &ScaleState, target: usize) -> Vec<Tick> {
    let values = match state.kind {
        ScaleKind::Linear => nice_values(state.data, target),
        ScaleKind::Log => decade_values(state.transformed).unwrap_or_else(|| nice_values(state.data, target)),
        ScaleKind::Symlog => {
            symlog_values(state.data, state.threshold).unwrap_or_else(|| nice_values(state.data, target))
        }
    };
    let step = nice_step(state.data.span(), target);
    values
        .into_iter()
        .filter_map(|value| {
            let position = state.apply(value);
            let inside = position >= state.transformed.min - 1e-9 * state.transformed.span().abs()
                && position <= state.transformed.max + 1e-9 * state.transformed.span().abs();
            inside.then(|| Tick {
                value,
                position,
                label: match state.kind {
                    ScaleKind::Linear => format_linear(value, step),
                    _ => format_general(value),
                },
            })
        })
        .collect()
}

/// 1, 2 or 5 times a power of ten, close to `span / target`
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of the nice step inside `range`
pub fn nice_values(range: Range, target: usize) -> Vec<f64> {
    let step = nice_step(range.span(), target);
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step).floor() as i64;
    if last < first || last - first > 1000 {
        return Vec::new();
    }
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Powers of ten whose exponent lies in the transformed range
fn decade_values(transformed: Range) -> Option<Vec<f64>> {
    let first = transformed.min.ceil() as i32;
    let last = transformed.max.floor() as i32;
    if last < first || last - first > 300 {
        return None;
    }
    Some((first..=last).map(|k| 10f64.powi(k)).collect())
}

/// Zero and ±threshold·10^k inside the data range; `None` if fewer than two
fn symlog_values(data: Range, threshold: f64) -> Option<Vec<f64>> {
    let mut values = Vec::new();
    let reach = data.min.abs().max(data.max.abs());
    let mut magnitudes = Vec::new();
    let mut m = threshold;
    while m <= reach && magnitudes.len() < 300 {
        magnitudes.push(m);
        m *= 10.0;
    }
    for &m in magnitudes.iter().rev() {
        values.push(-m);
    }
    values.push(0.0);
    values.extend(magnitudes);
    values.retain(|v| data.contains(*v));
    (values.len() >= 2).then_some(values)
}

/// Fixed decimals derived from the step size
pub(crate) fn format_linear(value: f64, step: f64) -> String {
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

fn format_general(value: f64) -> String {
    let abs = value.abs();
    if value == 0.0 {
        "0".to_string()
    } else if (1e-3..1e4).contains(&abs) {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{:e}", value)
    }
}
