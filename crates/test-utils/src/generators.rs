//! Synthetic scalar fields for contouring tests.
//!
//! All generators return values in row-major order (row 0 first), matching
//! the layout `ScalarField` expects. Row 0 is the bottom of the field.

/// Creates a field that increases linearly along x and y.
///
/// Each value is `col * dx + row * dy`.
///
/// # Example
///
/// ```
/// use test_utils::linear_ramp;
///
/// let grid = linear_ramp(3, 2, 1.0, 10.0);
/// assert_eq!(grid, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
/// ```
pub fn linear_ramp(width: usize, height: usize, dx: f64, dy: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(col as f64 * dx + row as f64 * dy);
        }
    }
    data
}

/// Creates a single smooth hill centered in the grid.
///
/// Values fall off as a Gaussian from `peak` at the center towards 0 at the
/// edges, so every contour of a level between the edge value and `peak` is
/// a closed loop.
pub fn radial_peak(width: usize, height: usize, peak: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    let cx = (width - 1) as f64 / 2.0;
    let cy = (height - 1) as f64 / 2.0;
    let sigma = (width.min(height) as f64 / 6.0).max(0.5);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let r2 = dx * dx + dy * dy;
            data.push(peak * (-r2 / (2.0 * sigma * sigma)).exp());
        }
    }
    data
}

/// Creates a saddle: `(col - cx) * (row - cy)`, positive in two opposite
/// quadrants and negative in the other two.
pub fn saddle(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    let cx = (width - 1) as f64 / 2.0;
    let cy = (height - 1) as f64 / 2.0;
    for row in 0..height {
        for col in 0..width {
            data.push((col as f64 - cx) * (row as f64 - cy));
        }
    }
    data
}

/// Creates a field of overlapping sine waves with several hills and valleys.
pub fn wave_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let fx = col as f64 / width as f64;
            let fy = row as f64 / height as f64;

            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data.push(50.0 + v1 + v2 + v3);
        }
    }
    data
}

/// Creates a grid with deterministic pseudo-random values in `[0, scale)`.
pub fn hashed_noise(width: usize, height: usize, seed: u32, scale: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f64 / 10_000.0 * scale);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates a grid filled with a constant value.
pub fn constant_field(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// X and Y coordinate series for a row-major grid over the given extent.
///
/// Useful for building a field from x/y/z columns.
pub fn grid_coordinates(
    width: usize,
    height: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> (Vec<f64>, Vec<f64>) {
    let x_step = (x_max - x_min) / (width - 1) as f64;
    let y_step = (y_max - y_min) / (height - 1) as f64;
    let mut xs = Vec::with_capacity(width * height);
    let mut ys = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            xs.push(x_min + col as f64 * x_step);
            ys.push(y_min + row as f64 * y_step);
        }
    }
    (xs, ys)
}
