//! Static quadrant configuration for the directional spiral layout.
//!
//! A [`Quadrant`] claims a contiguous, inclusive range of ordinals and a
//! region of the canvas. A [`QuadrantTable`] is a validated list of
//! quadrants whose ranges tile `[1, N]` exactly: no gaps, no overlaps.
//! Validation happens once, when the table is built, and is the only place
//! where the engine raises a hard error.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Compass direction a quadrant's spiral points toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Center,
}

impl Direction {
    /// Rotation applied to the whole spiral of a quadrant, in degrees.
    pub fn offset_degrees(self) -> f32 {
        match self {
            Direction::North => -90.0,
            Direction::East => 0.0,
            Direction::South => 90.0,
            Direction::West => 180.0,
            Direction::Center => 0.0,
        }
    }

    /// Rotation applied to the whole spiral of a quadrant, in radians.
    pub fn offset_radians(self) -> f32 {
        self.offset_degrees().to_radians()
    }

    /// Canvas-relative center used when a quadrant does not specify one.
    pub fn default_center_fraction(self) -> Point {
        match self {
            Direction::North => Point::new(0.5, 0.2),
            Direction::East => Point::new(0.8, 0.5),
            Direction::South => Point::new(0.5, 0.8),
            Direction::West => Point::new(0.2, 0.5),
            Direction::Center => Point::new(0.5, 0.5),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Center => "center",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating a quadrant table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadrantError {
    #[error("quadrant table is empty")]
    Empty,

    #[error("quadrant `{name}` has an inverted range [{lo}, {hi}]")]
    InvertedRange { name: String, lo: u32, hi: u32 },

    #[error("quadrant table must start at ordinal 1, but `{name}` starts at {lo}")]
    DoesNotStartAtOne { name: String, lo: u32 },

    #[error("ordinals {missing_from}..={missing_to} are not covered between `{before}` and `{after}`")]
    Gap {
        before: String,
        after: String,
        missing_from: u32,
        missing_to: u32,
    },

    #[error("quadrants `{first}` and `{second}` both claim ordinal {ordinal}")]
    Overlap {
        first: String,
        second: String,
        ordinal: u32,
    },

    #[error("quadrant `{name}` reaches ordinal {hi}, above the limit of {max}")]
    TooManyOrdinals { name: String, hi: u32, max: u32 },

    #[error("quadrant `{name}` has invalid {field} {value}")]
    InvalidFraction {
        name: String,
        field: &'static str,
        value: f32,
    },
}

/// One named partition of the ordinal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrant {
    name: String,
    #[serde(default)]
    symbolic_label: String,
    direction: Direction,
    index_range: (u32, u32),
    #[serde(default)]
    color: Color,
    #[serde(default)]
    center_fraction: Option<Point>,
    #[serde(default = "default_size_fraction")]
    size_fraction: Size,
    #[serde(default)]
    theme: String,
}

fn default_size_fraction() -> Size {
    Size::new(0.3, 0.3)
}

impl Quadrant {
    /// Creates a quadrant covering the inclusive range `lo..=hi`.
    ///
    /// The center falls back to [`Direction::default_center_fraction`] and the
    /// size to 30% of the canvas in each dimension.
    pub fn new(name: impl Into<String>, direction: Direction, lo: u32, hi: u32) -> Self {
        Self {
            name: name.into(),
            symbolic_label: String::new(),
            direction,
            index_range: (lo, hi),
            color: Color::default(),
            center_fraction: None,
            size_fraction: default_size_fraction(),
            theme: String::new(),
        }
    }

    pub fn with_symbolic_label(mut self, label: impl Into<String>) -> Self {
        self.symbolic_label = label.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_center_fraction(mut self, center: Point) -> Self {
        self.center_fraction = Some(center);
        self
    }

    pub fn with_size_fraction(mut self, size: Size) -> Self {
        self.size_fraction = size;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbolic_label(&self) -> &str {
        &self.symbolic_label
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Inclusive `(lo, hi)` ordinal range.
    pub fn index_range(&self) -> (u32, u32) {
        self.index_range
    }

    /// Number of ordinals this quadrant claims.
    pub fn len(&self) -> usize {
        let (lo, hi) = self.index_range;
        if hi < lo { 0 } else { (hi - lo) as usize + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, ordinal: u32) -> bool {
        let (lo, hi) = self.index_range;
        (lo..=hi).contains(&ordinal)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Canvas-relative center of this quadrant's region.
    pub fn center_fraction(&self) -> Point {
        self.center_fraction
            .unwrap_or_else(|| self.direction.default_center_fraction())
    }

    /// Canvas-relative size of this quadrant's region.
    pub fn size_fraction(&self) -> Size {
        self.size_fraction
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    fn validate_fractions(&self) -> Result<(), QuadrantError> {
        let center = self.center_fraction();
        let checks = [
            ("center x", center.x(), (0.0..=1.0).contains(&center.x())),
            ("center y", center.y(), (0.0..=1.0).contains(&center.y())),
            (
                "size width",
                self.size_fraction.width(),
                self.size_fraction.width() > 0.0 && self.size_fraction.width() <= 1.0,
            ),
            (
                "size height",
                self.size_fraction.height(),
                self.size_fraction.height() > 0.0 && self.size_fraction.height() <= 1.0,
            ),
        ];

        match checks.into_iter().find(|(_, _, ok)| !ok) {
            Some((field, value, _)) => Err(QuadrantError::InvalidFraction {
                name: self.name.clone(),
                field,
                value,
            }),
            None => Ok(()),
        }
    }
}

/// Largest ordinal a quadrant table may cover.
pub const MAX_ORDINALS: u32 = 100_000;

/// A validated set of quadrants tiling the ordinal range `[1, N]`.
///
/// Quadrants are kept sorted by the start of their range, so the index of a
/// quadrant in [`QuadrantTable::quadrants`] is stable for a given table.
///
/// # Examples
///
/// ```
/// use mandala_core::quadrant::{Direction, Quadrant, QuadrantTable};
///
/// let table = QuadrantTable::new(vec![
///     Quadrant::new("outer", Direction::North, 1, 4),
///     Quadrant::new("inner", Direction::Center, 5, 6),
/// ])
/// .unwrap();
/// assert_eq!(table.ordinal_count(), 6);
/// assert_eq!(table.quadrant_for(5).map(|(i, _)| i), Some(1));
///
/// let broken = QuadrantTable::new(vec![Quadrant::new("late", Direction::East, 2, 4)]);
/// assert!(broken.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantTable {
    quadrants: Vec<Quadrant>,
}

impl QuadrantTable {
    /// Validates and builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`QuadrantError`] if the table is empty, a range is inverted or
    /// ends above [`MAX_ORDINALS`], the ranges do not start at 1, leave a gap,
    /// overlap, or a quadrant has an out-of-range fraction.
    pub fn new(mut quadrants: Vec<Quadrant>) -> Result<Self, QuadrantError> {
        if quadrants.is_empty() {
            return Err(QuadrantError::Empty);
        }

        for quadrant in &quadrants {
            let (lo, hi) = quadrant.index_range;
            if lo > hi {
                return Err(QuadrantError::InvertedRange {
                    name: quadrant.name.clone(),
                    lo,
                    hi,
                });
            }
            if hi > MAX_ORDINALS {
                return Err(QuadrantError::TooManyOrdinals {
                    name: quadrant.name.clone(),
                    hi,
                    max: MAX_ORDINALS,
                });
            }
            quadrant.validate_fractions()?;
        }

        quadrants.sort_by_key(|quadrant| quadrant.index_range.0);

        let first = &quadrants[0];
        if first.index_range.0 != 1 {
            return Err(QuadrantError::DoesNotStartAtOne {
                name: first.name.clone(),
                lo: first.index_range.0,
            });
        }

        for pair in quadrants.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            // hi <= MAX_ORDINALS here.
            let expected = previous.index_range.1 + 1;
            let found = next.index_range.0;
            if found > expected {
                return Err(QuadrantError::Gap {
                    before: previous.name.clone(),
                    after: next.name.clone(),
                    missing_from: expected,
                    missing_to: found - 1,
                });
            }
            if found < expected {
                return Err(QuadrantError::Overlap {
                    first: previous.name.clone(),
                    second: next.name.clone(),
                    ordinal: found,
                });
            }
        }

        debug!(
            quadrants = quadrants.len(),
            ordinals = quadrants[quadrants.len() - 1].index_range.1;
            "Quadrant table validated"
        );

        Ok(Self { quadrants })
    }

    /// The table used by the reference domain: five quadrants over 27 ordinals.
    pub fn reference() -> Self {
        Self::new(reference_quadrants()).expect("reference quadrant table tiles 1..=27")
    }

    pub fn quadrants(&self) -> &[Quadrant] {
        &self.quadrants
    }

    pub fn len(&self) -> usize {
        self.quadrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    /// Total number of ordinals `N` covered by the table.
    pub fn ordinal_count(&self) -> u32 {
        self.quadrants
            .last()
            .map(|quadrant| quadrant.index_range.1)
            .unwrap_or(0)
    }

    /// Finds the quadrant owning `ordinal`, with its index in the table.
    pub fn quadrant_for(&self, ordinal: u32) -> Option<(usize, &Quadrant)> {
        let index = self
            .quadrants
            .partition_point(|quadrant| quadrant.index_range.1 < ordinal);
        self.quadrants
            .get(index)
            .filter(|quadrant| quadrant.contains(ordinal))
            .map(|quadrant| (index, quadrant))
    }
}

impl TryFrom<Vec<Quadrant>> for QuadrantTable {
    type Error = QuadrantError;

    fn try_from(quadrants: Vec<Quadrant>) -> Result<Self, Self::Error> {
        Self::new(quadrants)
    }
}

/// Quadrant definitions of the reference domain.
pub fn reference_quadrants() -> Vec<Quadrant> {
    let entries = [
        ("North", "N", Direction::North, (1, 5), "#4a6fa5", "wisdom"),
        ("East", "E", Direction::East, (6, 10), "#e07a5f", "renewal"),
        ("South", "S", Direction::South, (11, 15), "#81b29a", "growth"),
        ("West", "W", Direction::West, (16, 20), "#f2cc8f", "introspection"),
        ("Center", "C", Direction::Center, (21, 27), "#9c89b8", "unity"),
    ];

    entries
        .into_iter()
        .map(|(name, label, direction, (lo, hi), color, theme)| {
            let size = if direction == Direction::Center {
                Size::new(0.25, 0.25)
            } else {
                default_size_fraction()
            };
            Quadrant::new(name, direction, lo, hi)
                .with_symbolic_label(label)
                .with_color(Color::new(color).unwrap_or_default())
                .with_size_fraction(size)
                .with_theme(theme)
        })
        .collect()
}
