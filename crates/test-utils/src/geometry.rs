//! Polygon measurements for checking isoband output.

/// Signed shoelace area of a closed ring; positive when counter-clockwise.
///
/// The ring may or may not repeat its first point at the end.
pub fn signed_area<P: Copy + Into<(f64, f64)>>(ring: &[P]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let (x0, y0) = ring[i].into();
        let (x1, y1) = ring[(i + 1) % n].into();
        twice += x0 * y1 - x1 * y0;
    }
    twice / 2.0
}

/// Area of a region given as rings: counter-clockwise outer rings add,
/// clockwise holes subtract.
pub fn region_area<P: Copy + Into<(f64, f64)>>(rings: &[Vec<P>]) -> f64 {
    rings.iter().map(|ring| signed_area(ring)).sum()
}
