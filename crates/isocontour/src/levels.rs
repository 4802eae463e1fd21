//! Level selection: evenly spaced thresholds over a data range.

use crate::types::Span;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of bins (and thus levels).
pub const MAX_BIN_COUNT: usize = 500;

/// Spans shorter than this are treated as empty.
const TINY: f64 = 1e-50;

/// Maximum number of decimal places a span may sit below its end points.
const MAX_DECIMAL_PLACES: f64 = 12.0;

/// How a range is split into bins: by count, or by width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinOptions {
    bin_count: usize,
    bin_width: Option<f64>,
}

impl BinOptions {
    /// The count is clamped to `[1, MAX_BIN_COUNT]`; a non-positive or
    /// non-finite width is ignored.
    pub fn new(bin_count: usize, bin_width: Option<f64>) -> Self {
        Self {
            bin_count: bin_count.clamp(1, MAX_BIN_COUNT),
            bin_width: bin_width.filter(|w| w.is_finite() && *w > 0.0),
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn bin_width(&self) -> Option<f64> {
        self.bin_width
    }

    pub fn has_bin_width(&self) -> bool {
        self.bin_width.is_some()
    }
}

/// Resolved number of bins and their width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountAndWidth {
    pub count: usize,
    pub width: f64,
}

/// Resolve the bin count and width for a range of length `span`.
///
/// An explicit width wins; the count is then `ceil(span / width)`, capped at
/// [`MAX_BIN_COUNT`].
pub fn bin_count_and_width(span: f64, options: &BinOptions) -> CountAndWidth {
    match options.bin_width {
        Some(width) => {
            let count = (MAX_BIN_COUNT as f64).min(span / width).ceil();
            CountAndWidth {
                count: (count as usize).max(1),
                width,
            }
        }
        None => CountAndWidth {
            count: options.bin_count,
            width: span / options.bin_count as f64,
        },
    }
}

/// True when the span is too short to be resolved against its end points.
pub fn is_beyond_precision(range: &Span) -> bool {
    let delta = range.length();
    delta < TINY
        || beyond_precision(range.lower, delta)
        || beyond_precision(range.upper, delta)
}

fn beyond_precision(base: f64, delta: f64) -> bool {
    base.log10() - delta.log10() > MAX_DECIMAL_PLACES
}

/// Compute contour levels for a data range.
///
/// Levels sit in the middle of each bin so the first one never coincides with
/// the minimum. Returns `None` when there is no range or it is degenerate.
pub fn compute_levels(range: Option<Span>, options: &BinOptions) -> Option<Vec<f64>> {
    let range = range?;
    if is_beyond_precision(&range) {
        return None;
    }

    let bins = bin_count_and_width(range.length(), options);
    let levels = (0..bins.count)
        .map(|i| {
            let level = i as f64 * bins.width + range.lower;
            level + bins.width / 2.0
        })
        .collect();

    Some(levels)
}

/// Representative values for the `levels.len() + 1` bands: the range minimum,
/// the midpoints between consecutive levels, and the range maximum.
pub fn compute_fill_levels(range: Span, levels: &[f64]) -> Vec<f64> {
    let mut fill_levels = Vec::with_capacity(levels.len() + 1);
    fill_levels.push(range.lower);
    fill_levels.extend(levels.windows(2).map(|w| (w[0] + w[1]) / 2.0));
    fill_levels.push(range.upper);
    fill_levels
}
