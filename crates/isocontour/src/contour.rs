//! Isoline and isoband computation over a scalar field.
//!
//! Per level: extract oriented segments from every triangulated cell, join
//! them into chains of grid edges, interpolate and map the chains to real
//! space, then re-join and split pinched loops. Isobands close those paths
//! along the field's bounding rectangle.

use crate::config::ContourConfig;
use crate::error::{ContourError, Result};
use crate::grid::ScalarField;
use crate::isoband::{build_isobands, Rectangle};
use crate::join::join_paths;
use crate::levels::compute_levels;
use crate::mapper::{confirm_paths, map_paths, GridTransform};
use crate::segments::{extract_segments, Edge};
use crate::types::{Isoband, Isoline, Point};
use rayon::prelude::*;

/// Compute the isolines of `field` at each of `levels`.
///
/// Levels must be finite, strictly increasing and within the field's value
/// range. The result has one entry per level, in order; a level that crosses
/// no cell has no paths.
pub fn compute_contours(field: &ScalarField, levels: &[f64]) -> Result<Vec<Isoline>> {
    validate_levels(levels)?;
    check_levels_in_range(field, levels)?;
    Ok(isolines_for_levels(field, levels, false))
}

/// Compute the filled bands of `field` delimited by `levels`.
///
/// Returns `levels.len() + 1` bands from lowest to highest.
pub fn compute_isobands(field: &ScalarField, levels: &[f64]) -> Result<Vec<Isoband>> {
    let isolines = compute_contours(field, levels)?;
    isobands_from_isolines(field, &isolines)
}

fn isolines_for_levels(field: &ScalarField, levels: &[f64], parallel: bool) -> Vec<Isoline> {
    let transform = GridTransform::for_field(field);

    let isolines: Vec<Isoline> = if parallel {
        levels
            .par_iter()
            .map(|&level| Isoline {
                level,
                paths: level_paths(field, level, &transform),
            })
            .collect()
    } else {
        levels
            .iter()
            .map(|&level| Isoline {
                level,
                paths: level_paths(field, level, &transform),
            })
            .collect()
    };

    tracing::debug!(
        cols = field.col_count(),
        rows = field.row_count(),
        num_levels = levels.len(),
        num_paths = isolines.iter().map(|l| l.paths.len()).sum::<usize>(),
        total_points = isolines
            .iter()
            .flat_map(|l| l.paths.iter())
            .map(|p| p.len())
            .sum::<usize>(),
        parallel,
        "Computed isolines"
    );

    isolines
}

fn isobands_from_isolines(field: &ScalarField, isolines: &[Isoline]) -> Result<Vec<Isoband>> {
    let rect = Rectangle::new(field.x_range(), field.y_range());
    let bands = build_isobands(isolines, &rect, field.z_range(), field.value(0, 0))?;

    tracing::debug!(
        num_bands = bands.len(),
        num_polygons = bands.iter().map(|b| b.polygons.len()).sum::<usize>(),
        "Computed isobands"
    );

    Ok(bands)
}

fn level_paths(field: &ScalarField, level: f64, transform: &GridTransform) -> Vec<Vec<Point>> {
    let segments = extract_segments(field, level);
    let num_segments = segments.len();

    let chains = join_paths(
        segments.into_iter().map(|s| vec![s.start, s.end]),
        |edge: &Edge| *edge,
    );

    debug_assert!(
        chains
            .open
            .iter()
            .all(|chain| ends_on_boundary(chain, field.col_count(), field.row_count())),
        "open chain at level {} ends inside the grid",
        level
    );

    let grid_paths = chains.into_paths();
    let paths = confirm_paths(map_paths(&grid_paths, level, transform));

    tracing::trace!(level, num_segments, num_paths = paths.len(), "Level contoured");

    paths
}

fn ends_on_boundary(chain: &[Edge], col_count: usize, row_count: usize) -> bool {
    match (chain.first(), chain.last()) {
        (Some(first), Some(last)) => {
            first.is_on_boundary(col_count, row_count) && last.is_on_boundary(col_count, row_count)
        }
        _ => true,
    }
}

fn validate_levels(levels: &[f64]) -> Result<()> {
    if let Some(level) = levels.iter().find(|l| !l.is_finite()) {
        return Err(ContourError::invalid_levels(format!(
            "level {} is not finite",
            level
        )));
    }
    if let Some(w) = levels.windows(2).find(|w| w[0] >= w[1]) {
        return Err(ContourError::invalid_levels(format!(
            "levels must be strictly increasing ({} then {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn check_levels_in_range(field: &ScalarField, levels: &[f64]) -> Result<()> {
    let range = field.z_range();
    match levels.iter().find(|&&level| !range.contains(level)) {
        Some(&level) => Err(ContourError::LevelOutOfRange {
            level,
            min: range.lower,
            max: range.upper,
        }),
        None => Ok(()),
    }
}

/// Contours a field at levels derived from its own value range.
#[derive(Debug, Clone, Default)]
pub struct ContourGenerator {
    config: ContourConfig,
}

impl ContourGenerator {
    pub fn new(config: ContourConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    /// Levels for `field`, or `None` when its value range is degenerate.
    pub fn levels(&self, field: &ScalarField) -> Option<Vec<f64>> {
        compute_levels(Some(field.z_range()), &self.config.bin_options())
    }

    /// Isolines at the configured levels. A degenerate range yields none.
    pub fn isolines(&self, field: &ScalarField) -> Result<Vec<Isoline>> {
        let Some(levels) = self.levels(field) else {
            tracing::debug!(z_range = ?field.z_range(), "Degenerate value range, no contours");
            return Ok(Vec::new());
        };
        validate_levels(&levels)?;
        Ok(isolines_for_levels(field, &levels, self.config.parallel))
    }

    /// Isobands at the configured levels. A degenerate range yields none.
    pub fn isobands(&self, field: &ScalarField) -> Result<Vec<Isoband>> {
        let isolines = self.isolines(field)?;
        if isolines.is_empty() {
            return Ok(Vec::new());
        }
        isobands_from_isolines(field, &isolines)
    }
}
