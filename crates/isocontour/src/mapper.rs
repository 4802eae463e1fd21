//! Grid-space to real-space conversion of level paths.

use crate::grid::ScalarField;
use crate::join::join_paths;
use crate::segments::Edge;
use crate::separator::separate_path;
use crate::types::Point;

/// Affine map from grid indices to real coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTransform {
    pub x_step: f64,
    pub y_step: f64,
    pub origin: Point,
}

impl GridTransform {
    pub fn for_field(field: &ScalarField) -> Self {
        Self {
            x_step: field.x_step(),
            y_step: field.y_step(),
            origin: field.origin(),
        }
    }

    pub fn to_real(&self, grid: Point) -> Point {
        Point::new(
            self.x_step * grid.x + self.origin.x,
            self.y_step * grid.y + self.origin.y,
        )
    }
}

/// Interpolate each edge of `path` at `level` and map it to real space.
///
/// Repeated consecutive points are dropped. A cycle whose mapped ends drift
/// apart by rounding is closed on its first point. Returns `None` when fewer
/// than two points remain.
pub fn map_path(path: &[Edge], level: f64, transform: &GridTransform) -> Option<Vec<Point>> {
    let mut points: Vec<Point> = Vec::with_capacity(path.len());

    for edge in path {
        let point = transform.to_real(edge.intersect(level));
        if points.last() == Some(&point) {
            continue;
        }
        points.push(point);
    }

    let is_cycle = path.len() > 1 && path.first() == path.last();
    if is_cycle {
        if let Some(&first) = points.first() {
            if let Some(last) = points.last_mut() {
                *last = first;
            }
        }
    }

    if points.len() > 1 {
        Some(points)
    } else {
        None
    }
}

/// Map every edge path of one level to real space.
pub fn map_paths(paths: &[Vec<Edge>], level: f64, transform: &GridTransform) -> Vec<Vec<Point>> {
    paths
        .iter()
        .filter_map(|path| map_path(path, level, transform))
        .collect()
}

/// Join real-space paths that meet at the same point, then split pinched
/// loops apart.
pub fn confirm_paths(paths: Vec<Vec<Point>>) -> Vec<Vec<Point>> {
    join_paths(paths, Point::key)
        .into_paths()
        .into_iter()
        .flat_map(separate_path)
        .collect()
}
