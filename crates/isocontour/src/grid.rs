//! Regular scalar grids and grid shape inference.

use crate::error::{ContourError, Result};
use crate::types::{Point, Span};
use serde::{Deserialize, Serialize};

/// Infer `(col_count, row_count)` of a row-major regular grid from its
/// x-coordinate series.
///
/// The column count is the number of values seen before the first x repeats.
pub fn estimate_grid_shape(xs: &[f64]) -> Result<(usize, usize)> {
    let col_count = match xs.split_first() {
        Some((x0, rest)) => 1 + rest.iter().take_while(|&x| x != x0).count(),
        None => 0,
    };

    if col_count <= 1 {
        return Err(ContourError::invalid_grid_shape(format!(
            "data grid must be at least 2 columns wide (was {})",
            col_count
        )));
    }

    let row_count = xs.len() / col_count;
    if row_count <= 1 {
        return Err(ContourError::invalid_grid_shape(format!(
            "data grid must be at least 2 rows tall (was {})",
            row_count
        )));
    }

    Ok((col_count, row_count))
}

/// An immutable scalar field sampled on a regular rectangular grid.
///
/// Values are row-major: row 0 lies at `y_range.lower`, column 0 at
/// `x_range.lower`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    values: Vec<f64>,
    col_count: usize,
    row_count: usize,
    x_range: Span,
    y_range: Span,
}

impl ScalarField {
    /// Create a field, rejecting ragged grids, non-finite values and empty
    /// ranges.
    pub fn new(
        values: Vec<f64>,
        col_count: usize,
        row_count: usize,
        x_range: Span,
        y_range: Span,
    ) -> Result<Self> {
        if col_count < 2 || row_count < 2 {
            return Err(ContourError::invalid_grid_shape(format!(
                "grid must be at least 2x2 (was {}x{})",
                col_count, row_count
            )));
        }

        if values.len() != col_count * row_count {
            return Err(ContourError::invalid_field(format!(
                "expected {} values for a {}x{} grid, got {}",
                col_count * row_count,
                col_count,
                row_count,
                values.len()
            )));
        }

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ContourError::invalid_field(format!(
                "value at index {} is not finite ({})",
                i, values[i]
            )));
        }

        check_range("x", &x_range)?;
        check_range("y", &y_range)?;

        Ok(Self {
            values,
            col_count,
            row_count,
            x_range,
            y_range,
        })
    }

    /// Assemble a field from parallel x/y/z series laid out as a row-major
    /// grid. The shape is inferred from `xs`; the ranges from `xs` and `ys`.
    pub fn from_xyz(xs: &[f64], ys: &[f64], zs: Vec<f64>) -> Result<Self> {
        if xs.len() != zs.len() || ys.len() != zs.len() {
            return Err(ContourError::invalid_field(format!(
                "series lengths differ (x: {}, y: {}, z: {})",
                xs.len(),
                ys.len(),
                zs.len()
            )));
        }

        let (col_count, row_count) = estimate_grid_shape(xs)?;
        let x_range = Span::enclosing(xs)
            .ok_or_else(|| ContourError::invalid_field("x series has no finite values"))?;
        let y_range = Span::enclosing(ys)
            .ok_or_else(|| ContourError::invalid_field("y series has no finite values"))?;

        Self::new(zs, col_count, row_count, x_range, y_range)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn x_range(&self) -> Span {
        self.x_range
    }

    pub fn y_range(&self) -> Span {
        self.y_range
    }

    /// Value at grid position `(col, row)`.
    pub fn value(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.col_count + col]
    }

    /// Range of the field's values.
    pub fn z_range(&self) -> Span {
        // Non-empty and finite by construction.
        let first = self.values[0];
        let (lower, upper) = self
            .values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Span { lower, upper }
    }

    /// Real distance between adjacent columns.
    pub fn x_step(&self) -> f64 {
        self.x_range.length() / (self.col_count - 1) as f64
    }

    /// Real distance between adjacent rows.
    pub fn y_step(&self) -> f64 {
        self.y_range.length() / (self.row_count - 1) as f64
    }

    /// Real position of grid point `(0, 0)`.
    pub fn origin(&self) -> Point {
        Point::new(self.x_range.lower, self.y_range.lower)
    }
}

fn check_range(axis: &str, range: &Span) -> Result<()> {
    if !range.lower.is_finite() || !range.upper.is_finite() {
        return Err(ContourError::invalid_field(format!(
            "{} range is not finite",
            axis
        )));
    }
    if range.length() <= 0.0 {
        return Err(ContourError::invalid_field(format!(
            "{} range [{}, {}] is empty",
            axis, range.lower, range.upper
        )));
    }
    Ok(())
}
