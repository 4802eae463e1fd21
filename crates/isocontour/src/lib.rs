//! Isolines and filled isobands over regular scalar grids.
//!
//! Contours are traced with a marching-squares variant that splits every grid
//! cell into four triangles around a synthetic center value. Segments are
//! oriented with the higher side on the right, which lets the isoband stage
//! stitch level paths and the grid boundary into consistently wound polygons.
//!
//! # Pipeline
//!
//! ```text
//! compute_levels(z_range, bins)
//!      │
//!      ▼
//! extract_segments(field, level)   per level, 4 triangles per cell
//!      │
//!      ▼
//! join_paths(segments)             chains of grid edges
//!      │
//!      ▼
//! map_paths / confirm_paths        real coordinates, pinched loops split
//!      │
//!      ├─► Vec<Isoline>
//!      │
//!      ▼
//! build_isobands                   boundary stitching into polygons
//!      │
//!      ▼
//! Vec<Isoband>
//! ```
//!
//! # Example
//!
//! ```
//! use isocontour::{compute_isobands, compute_contours, ScalarField, Span};
//!
//! // 3x3 grid with a peak in the middle
//! let values = vec![
//!     0.0, 0.0, 0.0,
//!     0.0, 10.0, 0.0,
//!     0.0, 0.0, 0.0,
//! ];
//! let field = ScalarField::new(values, 3, 3, Span::new(0.0, 2.0), Span::new(0.0, 2.0)).unwrap();
//!
//! let isolines = compute_contours(&field, &[5.0]).unwrap();
//! assert_eq!(isolines[0].paths.len(), 1);
//!
//! let bands = compute_isobands(&field, &[5.0]).unwrap();
//! assert_eq!(bands.len(), 2);
//! ```

pub mod config;
pub mod contour;
pub mod error;
pub mod grid;
pub mod isoband;
pub mod join;
pub mod levels;
pub mod mapper;
pub mod segments;
pub mod separator;
pub mod types;

// Re-export commonly used types at crate root
pub use config::ContourConfig;
pub use contour::{compute_contours, compute_isobands, ContourGenerator};
pub use error::{ContourError, Result};
pub use grid::{estimate_grid_shape, ScalarField};
pub use levels::{
    bin_count_and_width, compute_fill_levels, compute_levels, BinOptions, CountAndWidth,
    MAX_BIN_COUNT,
};
pub use types::{Isoband, Isoline, Point, Span};
