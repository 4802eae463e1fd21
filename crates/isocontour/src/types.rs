//! Core types shared by the contouring stages.

use serde::{Deserialize, Serialize};

/// A point in real (data) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Hashable identity of this point (exact coordinate equality).
    pub fn key(&self) -> PointKey {
        PointKey::from(*self)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Bitwise map key for a [`Point`].
///
/// `-0.0` is folded into `0.0` so that key equality agrees with `==` on the
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl From<Point> for PointKey {
    fn from(p: Point) -> Self {
        fn bits(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }
        }
        PointKey(bits(p.x), bits(p.y))
    }
}

/// A closed numeric interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub lower: f64,
    pub upper: f64,
}

impl Span {
    /// Create a span; the bounds are swapped if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Smallest span enclosing all finite values, or `None` if there are none.
    pub fn enclosing(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (lower, upper) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { lower, upper })
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

/// Isolines of a single level, in real coordinates.
///
/// Open paths start and end on the grid boundary; closed paths repeat their
/// first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isoline {
    pub level: f64,
    pub paths: Vec<Vec<Point>>,
}

/// The filled region between two consecutive levels.
///
/// Every polygon is closed and keeps the band on its left: outer rings run
/// counter-clockwise, holes clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isoband {
    /// Representative value of the band (level midpoint, or the data
    /// minimum/maximum for the two outer bands).
    pub fill_level: f64,
    /// Level bounding the band from below, `None` for the lowest band.
    pub lower: Option<f64>,
    /// Level bounding the band from above, `None` for the highest band.
    pub upper: Option<f64>,
    pub polygons: Vec<Vec<Point>>,
}
