//! Filled isobands: closing level paths into polygons along the grid
//! boundary.
//!
//! Level paths keep the higher side on their right, so a band built from the
//! paths of its upper level plus the reversed paths of its lower level always
//! has its region on the left. Open paths end on the rectangle boundary; the
//! boundary walk is counter-clockwise, which keeps the region on the left
//! while stitching one path's end to the next path's start.

use crate::error::{ContourError, Result};
use crate::join::join_paths;
use crate::levels::compute_fill_levels;
use crate::types::{Isoband, Isoline, Point, PointKey, Span};
use std::collections::{HashMap, HashSet};

/// Side of the rectangle a boundary point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Down,
    Right,
    Up,
    Left,
}

/// True if `test` lies on or to the right of the line `a -> b`.
pub fn below_or_on_line(a: Point, b: Point, test: Point) -> bool {
    let (vx, vy) = (test.x - a.x, test.y - a.y);
    let (sx, sy) = (b.x - a.x, b.y - a.y);
    sy * vx - vy * sx >= 0.0
}

/// The real-space bounding rectangle of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub low_left: Point,
    pub low_right: Point,
    pub up_right: Point,
    pub up_left: Point,
}

impl Rectangle {
    pub fn new(x_range: Span, y_range: Span) -> Self {
        Self {
            low_left: Point::new(x_range.lower, y_range.lower),
            low_right: Point::new(x_range.upper, y_range.lower),
            up_right: Point::new(x_range.upper, y_range.upper),
            up_left: Point::new(x_range.lower, y_range.upper),
        }
    }

    /// Classify a boundary point by the two diagonals.
    ///
    /// Corners fall on a diagonal: low-left and low-right are `Down`,
    /// up-right is `Right` and up-left is `Left`.
    pub fn border_kind(&self, p: Point) -> BorderKind {
        let below_rising = below_or_on_line(self.low_left, self.up_right, p);
        let below_falling = below_or_on_line(self.up_left, self.low_right, p);
        match (below_rising, below_falling) {
            (true, true) => BorderKind::Down,
            (true, false) => BorderKind::Right,
            (false, false) => BorderKind::Up,
            (false, true) => BorderKind::Left,
        }
    }

    /// The whole rectangle as a closed counter-clockwise ring.
    pub fn ring(&self) -> Vec<Point> {
        vec![
            self.low_left,
            self.low_right,
            self.up_right,
            self.up_left,
            self.low_left,
        ]
    }
}

/// Successor of every boundary node in a counter-clockwise walk around the
/// rectangle.
#[derive(Debug, Clone)]
pub struct OuterMap {
    next: HashMap<PointKey, Point>,
    corners: HashSet<PointKey>,
    touch_points: usize,
}

impl OuterMap {
    /// Build the walk from the end points of every open path. Corners that
    /// are not themselves path ends become pass-through nodes.
    pub fn build<'a>(rect: &Rectangle, paths: impl IntoIterator<Item = &'a Vec<Point>>) -> Self {
        let mut sides: [Vec<Point>; 4] = Default::default();
        let mut touch_points = 0;

        for path in paths {
            if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
                if first == last {
                    continue;
                }
                for p in [first, last] {
                    let side = match rect.border_kind(p) {
                        BorderKind::Down => 0,
                        BorderKind::Right => 1,
                        BorderKind::Up => 2,
                        BorderKind::Left => 3,
                    };
                    sides[side].push(p);
                    touch_points += 1;
                }
            }
        }

        sides[0].sort_by(|a, b| a.x.total_cmp(&b.x));
        sides[1].sort_by(|a, b| a.y.total_cmp(&b.y));
        sides[2].sort_by(|a, b| b.x.total_cmp(&a.x));
        sides[3].sort_by(|a, b| b.y.total_cmp(&a.y));
        let [down, right, up, left] = &sides;

        let mut corners = HashSet::new();
        let mut walk = Vec::with_capacity(touch_points + 5);
        let mut corner = |walk: &mut Vec<Point>, side: &[Point], c: Point| {
            if !side.contains(&c) {
                walk.push(c);
                corners.insert(c.key());
            }
        };

        corner(&mut walk, down, rect.low_left);
        walk.extend_from_slice(down);
        corner(&mut walk, down, rect.low_right);
        walk.extend_from_slice(right);
        corner(&mut walk, right, rect.up_right);
        walk.extend_from_slice(up);
        corner(&mut walk, left, rect.up_left);
        walk.extend_from_slice(left);

        let mut next = HashMap::with_capacity(walk.len());
        for (i, p) in walk.iter().enumerate() {
            next.insert(p.key(), walk[(i + 1) % walk.len()]);
        }

        Self {
            next,
            corners,
            touch_points,
        }
    }

    /// Number of path end points on the boundary.
    pub fn touch_points(&self) -> usize {
        self.touch_points
    }

    /// Walk from the end of `path` along the boundary, through any corners,
    /// up to the next path end point.
    pub fn extend(&self, path: &mut Vec<Point>) -> Result<()> {
        let Some(&start) = path.last() else {
            return Ok(());
        };

        let mut end = start;
        loop {
            let next = *self.next.get(&end.key()).ok_or_else(|| {
                ContourError::unclosed_polygon(format!(
                    "path end ({}, {}) is not on the boundary walk",
                    end.x, end.y
                ))
            })?;
            path.push(next);
            end = next;
            if !self.corners.contains(&next.key()) {
                return Ok(());
            }
        }
    }
}

/// Close the pieces of one band into polygons.
///
/// Cycles pass through. Open pieces are extended along the boundary and
/// spliced; anything left open afterwards is an error.
pub fn close_band(pieces: Vec<Vec<Point>>, outer: &OuterMap) -> Result<Vec<Vec<Point>>> {
    let mut polygons = Vec::new();
    let mut extended = Vec::new();

    for mut piece in pieces {
        if piece.len() < 2 {
            continue;
        }
        if piece.first() == piece.last() {
            polygons.push(piece);
            continue;
        }
        outer.extend(&mut piece)?;
        extended.push(piece);
    }

    let joined = join_paths(extended, Point::key);
    if !joined.open.is_empty() {
        return Err(ContourError::unclosed_polygon(format!(
            "{} band path(s) still open after boundary stitching",
            joined.open.len()
        )));
    }
    polygons.extend(joined.closed);

    if let Some(open) = polygons.iter().find(|p| p.first() != p.last()) {
        return Err(ContourError::unclosed_polygon(format!(
            "polygon of {} points does not end where it starts",
            open.len()
        )));
    }

    Ok(polygons)
}

/// Build the `isolines.len() + 1` bands of a field.
///
/// `isolines` must be in increasing level order. `corner_value` is the field
/// value at the low-left corner; it picks the band that owns the whole
/// boundary when no path reaches it.
pub fn build_isobands(
    isolines: &[Isoline],
    rect: &Rectangle,
    z_range: Span,
    corner_value: f64,
) -> Result<Vec<Isoband>> {
    let levels: Vec<f64> = isolines.iter().map(|l| l.level).collect();
    let fill_levels = compute_fill_levels(z_range, &levels);
    let outer = OuterMap::build(rect, isolines.iter().flat_map(|l| l.paths.iter()));

    let boundary_band = if outer.touch_points() == 0 {
        Some(levels.iter().filter(|&&level| corner_value >= level).count())
    } else {
        None
    };

    let n = levels.len();
    let mut bands = Vec::with_capacity(n + 1);

    for i in 0..=n {
        let mut pieces: Vec<Vec<Point>> = Vec::new();
        if i > 0 {
            pieces.extend(
                isolines[i - 1]
                    .paths
                    .iter()
                    .map(|p| p.iter().rev().copied().collect()),
            );
        }
        if i < n {
            pieces.extend(isolines[i].paths.iter().cloned());
        }

        let mut polygons = close_band(pieces, &outer)?;
        if boundary_band == Some(i) {
            polygons.insert(0, rect.ring());
        }

        bands.push(Isoband {
            fill_level: fill_levels[i],
            lower: i.checked_sub(1).map(|j| levels[j]),
            upper: levels.get(i).copied(),
            polygons,
        });
    }

    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn unit() -> Rectangle {
        Rectangle::new(Span::new(0.0, 1.0), Span::new(0.0, 1.0))
    }

    #[test]
    fn test_border_kind_corners() {
        let r = unit();
        assert_eq!(r.border_kind(r.low_left), BorderKind::Down);
        assert_eq!(r.border_kind(r.low_right), BorderKind::Down);
        assert_eq!(r.border_kind(r.up_right), BorderKind::Right);
        assert_eq!(r.border_kind(r.up_left), BorderKind::Left);
    }

    #[test]
    fn test_border_kind_sides() {
        let r = unit();
        assert_eq!(r.border_kind(p(0.3, 0.0)), BorderKind::Down);
        assert_eq!(r.border_kind(p(1.0, 0.5)), BorderKind::Right);
        assert_eq!(r.border_kind(p(0.7, 1.0)), BorderKind::Up);
        assert_eq!(r.border_kind(p(0.0, 0.5)), BorderKind::Left);
    }

    #[test]
    fn test_outer_map_walk_counter_clockwise() {
        let r = unit();
        let paths = vec![vec![p(1.0, 0.5), p(0.5, 0.5), p(0.0, 0.5)]];
        let outer = OuterMap::build(&r, &paths);
        assert_eq!(outer.touch_points(), 2);

        let mut path = paths[0].clone();
        outer.extend(&mut path).unwrap();
        // from the left side down through both lower corners
        assert_eq!(
            path[3..],
            [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.5)]
        );
    }

    #[test]
    fn test_close_band_straight_cut() {
        let r = unit();
        let line = vec![p(1.0, 0.5), p(0.5, 0.5), p(0.0, 0.5)];
        let outer = OuterMap::build(&r, std::iter::once(&line));

        let below = close_band(vec![line.clone()], &outer).unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].first(), below[0].last());

        let reversed: Vec<Point> = line.iter().rev().copied().collect();
        let above = close_band(vec![reversed], &outer).unwrap();
        assert_eq!(
            above[0],
            vec![p(0.0, 0.5), p(0.5, 0.5), p(1.0, 0.5), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.5)]
        );
    }

    #[test]
    fn test_close_band_keeps_cycles() {
        let outer = OuterMap::build(&unit(), std::iter::empty());
        let cycle = vec![p(0.4, 0.4), p(0.6, 0.4), p(0.5, 0.6), p(0.4, 0.4)];
        let polygons = close_band(vec![cycle.clone()], &outer).unwrap();
        assert_eq!(polygons, vec![cycle]);
    }

    #[test]
    fn test_unknown_end_point_is_an_error() {
        let outer = OuterMap::build(&unit(), std::iter::empty());
        let stray = vec![p(0.2, 0.2), p(0.3, 0.3)];
        assert!(matches!(
            close_band(vec![stray], &outer),
            Err(ContourError::UnclosedPolygon(_))
        ));
    }

    #[test]
    fn test_band_without_boundary_paths_gets_ring() {
        let r = unit();
        // clockwise loop: the higher side (inside) is on the right
        let hill = Isoline {
            level: 5.0,
            paths: vec![vec![p(0.4, 0.4), p(0.5, 0.6), p(0.6, 0.4), p(0.4, 0.4)]],
        };
        let bands = build_isobands(&[hill], &r, Span::new(0.0, 10.0), 0.0).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].fill_level, 0.0);
        assert_eq!(bands[0].upper, Some(5.0));
        assert_eq!(bands[0].lower, None);
        assert_eq!(bands[0].polygons[0], r.ring());
        assert_eq!(bands[0].polygons.len(), 2);
        assert_eq!(bands[1].fill_level, 10.0);
        assert_eq!(bands[1].lower, Some(5.0));
        assert_eq!(bands[1].polygons.len(), 1);
    }
}
