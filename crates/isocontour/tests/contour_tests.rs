//! Tests for isoline generation over scalar fields.

use isocontour::{
    compute_contours, estimate_grid_shape, ContourConfig, ContourError, ContourGenerator, Point,
    ScalarField, Span,
};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, constant_field, grid_coordinates, linear_ramp,
    radial_peak, signed_area, wave_field,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Field whose grid indices are its real coordinates.
fn index_field(values: Vec<f64>, cols: usize, rows: usize) -> ScalarField {
    ScalarField::new(
        values,
        cols,
        rows,
        Span::new(0.0, (cols - 1) as f64),
        Span::new(0.0, (rows - 1) as f64),
    )
    .unwrap()
}

fn on_boundary(p: &Point, field: &ScalarField) -> bool {
    let eps = 1e-9;
    let (x, y) = (field.x_range(), field.y_range());
    (p.x - x.lower).abs() < eps
        || (p.x - x.upper).abs() < eps
        || (p.y - y.lower).abs() < eps
        || (p.y - y.upper).abs() < eps
}

// ============================================================================
// Field construction tests
// ============================================================================

#[test]
fn test_estimate_grid_shape_from_coordinates() {
    let (xs, _) = grid_coordinates(4, 3, -1.0, 1.0, 0.0, 5.0);
    assert_eq!(estimate_grid_shape(&xs).unwrap(), (4, 3));
}

#[test]
fn test_estimate_grid_shape_rejects_single_column() {
    let xs = vec![1.0, 1.0, 1.0];
    assert!(matches!(
        estimate_grid_shape(&xs),
        Err(ContourError::InvalidGridShape(_))
    ));
}

#[test]
fn test_estimate_grid_shape_rejects_single_row() {
    let xs = vec![0.0, 1.0, 2.0];
    assert!(matches!(
        estimate_grid_shape(&xs),
        Err(ContourError::InvalidGridShape(_))
    ));
}

#[test]
fn test_field_from_xyz() {
    let (xs, ys) = grid_coordinates(3, 2, 10.0, 30.0, -4.0, 4.0);
    let zs = linear_ramp(3, 2, 1.0, 3.0);
    let field = ScalarField::from_xyz(&xs, &ys, zs).unwrap();

    assert_eq!(field.col_count(), 3);
    assert_eq!(field.row_count(), 2);
    assert_eq!(field.x_range(), Span::new(10.0, 30.0));
    assert_eq!(field.y_range(), Span::new(-4.0, 4.0));
    assert_eq!(field.value(2, 1), 5.0);
    assert_eq!(field.z_range(), Span::new(0.0, 5.0));
}

#[test]
fn test_field_rejects_non_finite_values() {
    let mut values = constant_field(3, 3, 1.0);
    values[4] = f64::NAN;
    let result = ScalarField::new(values, 3, 3, Span::new(0.0, 1.0), Span::new(0.0, 1.0));
    assert!(matches!(result, Err(ContourError::InvalidField(_))));
}

#[test]
fn test_field_rejects_wrong_length() {
    let result = ScalarField::new(vec![0.0; 5], 3, 2, Span::new(0.0, 1.0), Span::new(0.0, 1.0));
    assert!(matches!(result, Err(ContourError::InvalidField(_))));
}

// ============================================================================
// compute_contours tests
// ============================================================================

#[test]
fn test_constant_field_has_no_paths() {
    let field = index_field(constant_field(4, 4, 3.0), 4, 4);
    let isolines = compute_contours(&field, &[3.0]).unwrap();
    assert_eq!(isolines.len(), 1);
    assert_eq!(isolines[0].level, 3.0);
    assert!(isolines[0].paths.is_empty());
}

#[test]
fn test_no_levels_no_isolines() {
    let field = index_field(linear_ramp(3, 3, 1.0, 1.0), 3, 3);
    assert!(compute_contours(&field, &[]).unwrap().is_empty());
}

#[test]
fn test_ramp_in_real_coordinates() {
    let xs = [10.0, 20.0, 10.0, 20.0];
    let ys = [5.0, 5.0, 7.0, 7.0];
    let field = ScalarField::from_xyz(&xs, &ys, vec![0.0, 0.0, 10.0, 10.0]).unwrap();

    let isolines = compute_contours(&field, &[5.0]).unwrap();
    let paths = &isolines[0].paths;
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(path.len() >= 2);
    assert_coords_approx_eq!((path[0].x, path[0].y), (20.0, 6.0), 1e-12);
    let last = path[path.len() - 1];
    assert_coords_approx_eq!((last.x, last.y), (10.0, 6.0), 1e-12);
}

#[test]
fn test_higher_side_is_on_the_right() {
    // z grows with x, so every isoline runs bottom to top
    let field = index_field(linear_ramp(5, 4, 1.0, 0.0), 5, 4);
    let isolines = compute_contours(&field, &[1.25, 2.75]).unwrap();

    for isoline in &isolines {
        assert_eq!(isoline.paths.len(), 1);
        let path = &isoline.paths[0];
        for p in path {
            assert_approx_eq!(p.x, isoline.level, 1e-9);
        }
        assert_approx_eq!(path[0].y, 0.0, 1e-12);
        assert_approx_eq!(path[path.len() - 1].y, 3.0, 1e-12);
    }
}

#[test]
fn test_peak_gives_clockwise_loop() {
    let field = index_field(radial_peak(11, 11, 10.0), 11, 11);
    let isolines = compute_contours(&field, &[5.0]).unwrap();
    let paths = &isolines[0].paths;

    assert_eq!(paths.len(), 1);
    let ring = &paths[0];
    assert_eq!(ring.first(), ring.last());
    assert!(signed_area(ring) < 0.0);
    assert!(ring.iter().all(|p| p.x > 2.0 && p.x < 8.0 && p.y > 2.0 && p.y < 8.0));
}

#[test]
fn test_open_paths_end_on_boundary() {
    init_tracing();
    let field = index_field(wave_field(30, 30), 30, 30);
    let isolines = ContourGenerator::default().isolines(&field).unwrap();
    assert_eq!(isolines.len(), 10);

    let mut open = 0;
    for isoline in &isolines {
        for path in &isoline.paths {
            assert!(path.len() >= 2);
            if path.first() != path.last() {
                open += 1;
                assert!(on_boundary(&path[0], &field));
                assert!(on_boundary(&path[path.len() - 1], &field));
            }
        }
    }
    assert!(open > 0);
}

#[test]
fn test_no_consecutive_duplicate_points() {
    let field = index_field(wave_field(25, 20), 25, 20);
    let isolines = ContourGenerator::default().isolines(&field).unwrap();
    for path in isolines.iter().flat_map(|l| l.paths.iter()) {
        assert!(path.windows(2).all(|w| w[0] != w[1]));
    }
}

#[test]
fn test_deterministic_output() {
    let field = index_field(wave_field(40, 32), 40, 32);
    let levels = [35.0, 50.0, 65.0];
    let first = compute_contours(&field, &levels).unwrap();
    let second = compute_contours(&field, &levels).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Level validation tests
// ============================================================================

#[test]
fn test_levels_must_increase() {
    let field = index_field(linear_ramp(3, 3, 1.0, 1.0), 3, 3);
    assert!(matches!(
        compute_contours(&field, &[2.0, 1.0]),
        Err(ContourError::InvalidLevels(_))
    ));
    assert!(matches!(
        compute_contours(&field, &[1.0, 1.0]),
        Err(ContourError::InvalidLevels(_))
    ));
    assert!(matches!(
        compute_contours(&field, &[f64::INFINITY]),
        Err(ContourError::InvalidLevels(_))
    ));
}

#[test]
fn test_level_outside_range() {
    let field = index_field(linear_ramp(3, 3, 1.0, 1.0), 3, 3);
    assert_eq!(
        compute_contours(&field, &[-0.5]),
        Err(ContourError::LevelOutOfRange {
            level: -0.5,
            min: 0.0,
            max: 4.0
        })
    );
}

// ============================================================================
// ContourGenerator tests
// ============================================================================

#[test]
fn test_generator_levels_are_bin_midpoints() {
    let field = index_field(linear_ramp(5, 5, 1.0, 1.5), 5, 5);
    let generator = ContourGenerator::new(ContourConfig {
        bin_count: 4,
        bin_width: None,
        parallel: false,
    })
    .unwrap();

    let levels = generator.levels(&field).unwrap();
    assert_eq!(levels, vec![1.25, 3.75, 6.25, 8.75]);

    let isolines = generator.isolines(&field).unwrap();
    let found: Vec<f64> = isolines.iter().map(|l| l.level).collect();
    assert_eq!(found, levels);
    assert!(isolines.iter().all(|l| !l.paths.is_empty()));
}

#[test]
fn test_parallel_matches_sequential() {
    let field = index_field(wave_field(48, 36), 48, 36);
    let config = ContourConfig {
        bin_count: 12,
        ..Default::default()
    };

    let parallel = ContourGenerator::new(ContourConfig {
        parallel: true,
        ..config.clone()
    })
    .unwrap();
    let sequential = ContourGenerator::new(ContourConfig {
        parallel: false,
        ..config
    })
    .unwrap();

    assert_eq!(
        parallel.isolines(&field).unwrap(),
        sequential.isolines(&field).unwrap()
    );
    assert_eq!(
        parallel.isobands(&field).unwrap(),
        sequential.isobands(&field).unwrap()
    );
}

#[test]
fn test_generator_bin_width() {
    let field = index_field(linear_ramp(3, 3, 5.0, 0.0), 3, 3);
    let generator = ContourGenerator::new(ContourConfig {
        bin_width: Some(2.4),
        ..Default::default()
    })
    .unwrap();

    // range [0, 10] in bins of 2.4: the fifth level lies past the maximum
    let levels = generator.levels(&field).unwrap();
    assert_eq!(levels.len(), 5);
    assert_approx_eq!(levels[0], 1.2, 1e-12);
    assert_approx_eq!(levels[4], 10.8, 1e-12);

    let isolines = generator.isolines(&field).unwrap();
    assert_eq!(isolines.len(), 5);
    assert!(!isolines[0].paths.is_empty());
    assert!(isolines[4].paths.is_empty());
}
