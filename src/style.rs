//! Markers and `"r--o"`-style format strings.

use std::fmt;
use std::str::FromStr;

use crate::dash::LineStyle;
use crate::errors::PlotError;
use crate::types::Rgb;

/// Point marker drawn at each finite vertex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Circle,
    Cross,
    Plus,
    Star,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    Point,
}

impl Marker {
    pub const ALL: [Marker; 9] = [
        Marker::Circle,
        Marker::Cross,
        Marker::Plus,
        Marker::Star,
        Marker::Square,
        Marker::Diamond,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::Point,
    ];

    pub fn from_char(c: char) -> Option<Marker> {
        Some(match c {
            'o' => Marker::Circle,
            'x' => Marker::Cross,
            '+' => Marker::Plus,
            '*' => Marker::Star,
            's' => Marker::Square,
            'd' => Marker::Diamond,
            '^' => Marker::TriangleUp,
            'v' => Marker::TriangleDown,
            '.' => Marker::Point,
            _ => return None,
        })
    }

    pub fn token(self) -> char {
        match self {
            Marker::Circle => 'o',
            Marker::Cross => 'x',
            Marker::Plus => '+',
            Marker::Star => '*',
            Marker::Square => 's',
            Marker::Diamond => 'd',
            Marker::TriangleUp => '^',
            Marker::TriangleDown => 'v',
            Marker::Point => '.',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Marker {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Marker::from_char(c),
            _ => None,
        }
        .ok_or_else(|| PlotError::UnknownMarker {
            token: s.to_string(),
        })
    }
}

/// Parsed format string: optional color letter, line style and marker
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatSpec {
    pub color: Option<Rgb>,
    pub style: Option<LineStyle>,
    pub marker: Option<Marker>,
}

impl FormatSpec {
    /// Line style to draw with.
    ///
    /// A marker without a style token means markers only.
    pub fn line_style(&self) -> LineStyle {
        match (&self.style, self.marker) {
            (Some(style), _) => style.clone(),
            (None, Some(_)) => LineStyle::None,
            (None, None) => LineStyle::Solid,
        }
    }
}

impl FromStr for FormatSpec {
    type Err = PlotError;

    /// Parse strings like `"r--o"`, `"k:"`, `"b-."`, `"x"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = FormatSpec::default();
        let mut rest = s.trim();

        while let Some(c) = rest.chars().next() {
            // longest line-style token first so "-." is not read as "-" then "."
            let style_token = ["--", "-.", "-", ":"]
                .into_iter()
                .find(|t| rest.starts_with(t));
            if let Some(token) = style_token {
                spec.style = Some(token.parse()?);
                rest = &rest[token.len()..];
                continue;
            }

            if let Some(marker) = Marker::from_char(c) {
                spec.marker = Some(marker);
            } else if c.is_ascii_alphabetic() {
                spec.color = Some(Rgb::from_code(c)?);
            } else {
                return Err(PlotError::UnknownMarker {
                    token: c.to_string(),
                });
            }
            rest = &rest[c.len_utf8()..];
        }
        Ok(spec)
    }
}
