//! Splitting of pinched paths.

use crate::types::Point;

/// Split a path that returns to its current start point before its end.
///
/// Each time the point at the start of the current piece reappears (the last
/// point is never considered), the piece up to and including the repeat is
/// emitted and scanning restarts from there. A path without internal repeats
/// comes back unchanged.
pub fn separate_path(path: Vec<Point>) -> Vec<Vec<Point>> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for next in 1..path.len().saturating_sub(1) {
        if path[start] == path[next] {
            pieces.push(path[start..=next].to_vec());
            start = next;
        }
    }

    if start == 0 {
        return vec![path];
    }

    pieces.push(path[start..].to_vec());
    pieces
}
