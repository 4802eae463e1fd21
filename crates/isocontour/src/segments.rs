//! Level-crossing segment extraction over triangulated grid cells.
//!
//! Each cell is split into four counter-clockwise triangles that share a
//! synthetic center point. A triangle whose vertices straddle the level
//! yields one segment, oriented so that the higher-valued side lies to the
//! right of the direction of travel.

use crate::grid::ScalarField;
use crate::types::Point;
use std::hash::{Hash, Hasher};

/// A grid vertex: a cell corner, or the center of the cell whose lower-left
/// corner is `(col, row)`.
///
/// Equality and hashing use the grid position only, never `z`.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    pub col: usize,
    pub row: usize,
    pub center: bool,
    pub z: f64,
}

impl GridPoint {
    pub fn corner(col: usize, row: usize, z: f64) -> Self {
        Self {
            col,
            row,
            center: false,
            z,
        }
    }

    pub fn cell_center(col: usize, row: usize, z: f64) -> Self {
        Self {
            col,
            row,
            center: true,
            z,
        }
    }

    /// Grid-space x coordinate.
    pub fn x(&self) -> f64 {
        self.col as f64 + if self.center { 0.5 } else { 0.0 }
    }

    /// Grid-space y coordinate.
    pub fn y(&self) -> f64 {
        self.row as f64 + if self.center { 0.5 } else { 0.0 }
    }

    pub fn coord(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    fn id(&self) -> (usize, usize, bool) {
        (self.col, self.row, self.center)
    }

    fn is_high(&self, level: f64) -> bool {
        self.z >= level
    }
}

impl PartialEq for GridPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for GridPoint {}

impl Hash for GridPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// A triangle edge. `Edge(a, b) == Edge(b, a)`; the stored order only
/// matters for interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: GridPoint,
    pub b: GridPoint,
}

impl Edge {
    pub fn new(a: GridPoint, b: GridPoint) -> Self {
        Self { a, b }
    }

    /// Grid-space point where the field crosses `level` along this edge.
    pub fn intersect(&self, level: f64) -> Point {
        let z0 = self.a.z;
        let z1 = self.b.z;

        if level == z0 {
            return self.a.coord();
        }
        if level == z1 {
            return self.b.coord();
        }

        let ratio = (z1 - z0) / (level - z0);
        let (x0, y0) = (self.a.x(), self.a.y());
        let (x1, y1) = (self.b.x(), self.b.y());
        Point::new(x0 + (x1 - x0) / ratio, y0 + (y1 - y0) / ratio)
    }

    /// True if both ends lie on the same outer row or column of the grid.
    pub fn is_on_boundary(&self, col_count: usize, row_count: usize) -> bool {
        let (a, b) = (&self.a, &self.b);
        if a.center || b.center {
            return false;
        }
        (a.col == 0 && b.col == 0)
            || (a.row == 0 && b.row == 0)
            || (a.col == col_count - 1 && b.col == col_count - 1)
            || (a.row == row_count - 1 && b.row == row_count - 1)
    }

    fn ordered_ids(&self) -> ((usize, usize, bool), (usize, usize, bool)) {
        let (ia, ib) = (self.a.id(), self.b.id());
        if ia <= ib {
            (ia, ib)
        } else {
            (ib, ia)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.ordered_ids() == other.ordered_ids()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_ids().hash(state);
    }
}

/// A level crossing through one triangle, from `start` to `end` with the
/// higher side on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Edge,
    pub end: Edge,
}

/// Extract all level-crossing segments of `field` at `level`.
///
/// Flat cells are skipped, as are cells where `level <= min` or
/// `level > max`.
pub fn extract_segments(field: &ScalarField, level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();

    for row in 0..field.row_count() - 1 {
        for col in 0..field.col_count() - 1 {
            let v0 = field.value(col, row);
            let v1 = field.value(col + 1, row);
            let v2 = field.value(col + 1, row + 1);
            let v3 = field.value(col, row + 1);

            let min = v0.min(v1).min(v2).min(v3);
            let max = v0.max(v1).max(v2).max(v3);

            if min == max {
                continue;
            }

            // Mean of the two middle values; a plain average breaks saddle ties.
            let v4 = (v0 + v1 + v2 + v3 - min - max) / 2.0;

            if level > min && level <= max {
                let corners = [
                    GridPoint::corner(col, row, v0),
                    GridPoint::corner(col + 1, row, v1),
                    GridPoint::corner(col + 1, row + 1, v2),
                    GridPoint::corner(col, row + 1, v3),
                ];
                let center = GridPoint::cell_center(col, row, v4);
                cell_segments(&corners, center, level, &mut segments);
            }
        }
    }

    segments
}

fn cell_segments(corners: &[GridPoint; 4], center: GridPoint, level: f64, out: &mut Vec<Segment>) {
    for i in 0..4 {
        let triangle = [corners[i], corners[(i + 1) % 4], center];
        if let Some(segment) = triangle_segment(triangle, level) {
            out.push(segment);
        }
    }
}

/// Which vertices of a triangle lie at or above the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriangleCase {
    Uncrossed,
    P0,
    P1,
    P2,
    P0P1,
    P0P2,
    P1P2,
}

impl TriangleCase {
    fn classify(high: [bool; 3]) -> Self {
        match high {
            [true, false, false] => Self::P0,
            [false, true, false] => Self::P1,
            [false, false, true] => Self::P2,
            [true, true, false] => Self::P0P1,
            [true, false, true] => Self::P0P2,
            [false, true, true] => Self::P1P2,
            [true, true, true] | [false, false, false] => Self::Uncrossed,
        }
    }
}

/// Crossing segment of a counter-clockwise triangle, if any.
fn triangle_segment([p0, p1, p2]: [GridPoint; 3], level: f64) -> Option<Segment> {
    let case = TriangleCase::classify([p0.is_high(level), p1.is_high(level), p2.is_high(level)]);
    let (start, end) = match case {
        TriangleCase::P0 => (Edge::new(p2, p0), Edge::new(p0, p1)),
        TriangleCase::P1 => (Edge::new(p0, p1), Edge::new(p1, p2)),
        TriangleCase::P2 => (Edge::new(p1, p2), Edge::new(p2, p0)),
        TriangleCase::P0P1 => (Edge::new(p0, p2), Edge::new(p2, p1)),
        TriangleCase::P0P2 => (Edge::new(p2, p1), Edge::new(p1, p0)),
        TriangleCase::P1P2 => (Edge::new(p1, p0), Edge::new(p0, p2)),
        TriangleCase::Uncrossed => return None,
    };
    Some(Segment { start, end })
}
