//! Spherical Web-Mercator projection.
//!
//! `x = R * lon` and `y = R * ln(tan(pi/4 + lat/2))`, angles in radians and
//! `R` the WGS-84 semi-major axis. The y formula does not depend on longitude,
//! so lon = 0 projects like any other meridian.

use std::f64::consts::FRAC_PI_4;

use log::debug;

use crate::config::{
    EARTH_RADIUS_METERS, GEOMETRY_COLUMN, PROJECTED_X_COLUMN, PROJECTED_Y_COLUMN, SRID,
};
use crate::error_handling::ProjectionError;
use crate::geometry::GeometryText;
use crate::models::{Table, Value};

/// A projected coordinate pair in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// Projects a longitude/latitude pair in degrees.
///
/// # Errors
///
/// Non-finite input, |lat| >= 90 (y diverges at the poles) or |lon| > 180.
pub fn project_lon_lat(lon: f64, lat: f64) -> Result<PlanarPoint, ProjectionError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(ProjectionError::NonFinite { lon, lat });
    }
    if lat.abs() >= 90.0 {
        return Err(ProjectionError::LatitudeOutOfRange(lat));
    }
    if lon.abs() > 180.0 {
        return Err(ProjectionError::LongitudeOutOfRange(lon));
    }

    let x = EARTH_RADIUS_METERS * lon.to_radians();
    let y = EARTH_RADIUS_METERS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    Ok(PlanarPoint { x, y })
}

/// Projects a stored geometry; its SRID must be the pipeline's.
pub fn project_geometry(geometry: &GeometryText) -> Result<PlanarPoint, ProjectionError> {
    if geometry.srid() != SRID {
        return Err(ProjectionError::UnexpectedSrid {
            expected: SRID,
            found: geometry.srid(),
        });
    }
    project_lon_lat(geometry.lon(), geometry.lat())
}

/// Projects the geometry text held in one cell.
fn project_cell(cell: Option<&Value>, column: &str) -> Result<PlanarPoint, ProjectionError> {
    let text = cell
        .and_then(Value::as_text)
        .ok_or_else(|| ProjectionError::NotGeometryText {
            column: column.to_string(),
        })?;
    let geometry: GeometryText = text.parse()?;
    project_geometry(&geometry)
}

/// Returns a copy of `table` with `x` and `y` columns appended.
///
/// Each row is projected independently from its `geom` column; row order is
/// preserved. The first failing row aborts the whole projection.
pub fn project_table(table: &Table) -> Result<Table, ProjectionError> {
    project_table_column(table, GEOMETRY_COLUMN)
}

/// Like [`project_table`] with an explicit geometry column.
pub fn project_table_column(table: &Table, column: &str) -> Result<Table, ProjectionError> {
    let geom_index = table
        .column_index(column)
        .ok_or_else(|| ProjectionError::MissingColumn(column.to_string()))?;

    let mut columns = table.columns().to_vec();
    columns.push(PROJECTED_X_COLUMN.to_string());
    columns.push(PROJECTED_Y_COLUMN.to_string());

    let projected_rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let point = project_cell(cells.get(geom_index), column).map_err(|e| {
                ProjectionError::AtRow {
                    row,
                    source: Box::new(e),
                }
            })?;
            let mut out = cells.clone();
            out.push(Value::Float(point.x));
            out.push(Value::Float(point.y));
            Ok(out)
        })
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    let mut projected = Table::new(columns);
    for row in projected_rows {
        projected.push_row(row);
    }
    debug!("Projected {} rows", projected.len());
    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn geometry_table(cells: &[Value]) -> Table {
        let mut table = Table::new(vec!["geom".to_string(), "name".to_string()]);
        for (i, cell) in cells.iter().enumerate() {
            table.push_row(vec![cell.clone(), Value::Text(format!("row{i}"))]);
        }
        table
    }

    #[test]
    fn test_x_is_linear_in_lon_and_ignores_lat() {
        let slope = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        for lon in [-179.5, -87.6298, -1.0, 0.5, 45.0, 180.0] {
            for lat in [-60.0, 0.0, 41.8781, 80.0] {
                let p = project_lon_lat(lon, lat).unwrap();
                assert!((p.x - slope * lon).abs() < TOLERANCE, "lon={lon} lat={lat}");
            }
        }
    }

    #[test]
    fn test_equator_maps_to_zero() {
        for lon in [-120.0, -0.1, 0.0, 33.3, 179.0] {
            let p = project_lon_lat(lon, 0.0).unwrap();
            assert!(p.y.abs() < TOLERANCE, "lon={lon} y={}", p.y);
        }
    }

    #[test]
    fn test_y_strictly_increasing_in_lat() {
        for lon in [-87.6298, 12.5] {
            let mut previous = f64::NEG_INFINITY;
            let mut lat = -89.0;
            while lat <= 89.0 {
                let y = project_lon_lat(lon, lat).unwrap().y;
                assert!(y > previous, "not increasing at lat={lat}");
                previous = y;
                lat += 0.5;
            }
        }
    }

    #[test]
    fn test_zero_longitude_uses_standard_mercator_y() {
        let lat: f64 = 51.4779;
        let p = project_lon_lat(0.0, lat).unwrap();
        let expected = EARTH_RADIUS_METERS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        assert_eq!(p.x, 0.0);
        assert!(p.y.is_finite());
        assert!((p.y - expected).abs() < TOLERANCE);
        // continuous with nearby meridians
        let near = project_lon_lat(1e-9, lat).unwrap();
        assert!((near.y - p.y).abs() < TOLERANCE);
    }

    #[test]
    fn test_known_value_chicago() {
        let p = project_lon_lat(-87.6298, 41.8781).unwrap();
        assert!((p.x - -9_754_904.71).abs() < 0.01, "x={}", p.x);
        assert!((p.y - 5_142_736.87).abs() < 0.01, "y={}", p.y);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            project_lon_lat(0.0, 90.0),
            Err(ProjectionError::LatitudeOutOfRange(90.0))
        );
        assert_eq!(
            project_lon_lat(0.0, -90.0),
            Err(ProjectionError::LatitudeOutOfRange(-90.0))
        );
        assert_eq!(
            project_lon_lat(181.0, 0.0),
            Err(ProjectionError::LongitudeOutOfRange(181.0))
        );
        assert!(matches!(
            project_lon_lat(f64::NAN, 0.0),
            Err(ProjectionError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_project_geometry_checks_srid() {
        let g = GeometryText::new(3857, geo_types::Point::new(1.0, 1.0));
        assert_eq!(
            project_geometry(&g),
            Err(ProjectionError::UnexpectedSrid {
                expected: 4326,
                found: 3857
            })
        );
    }

    #[test]
    fn test_project_table_appends_columns_in_order() {
        let table = geometry_table(&[
            Value::Text("SRID=4326;POINT(-87.6298 41.8781)".to_string()),
            Value::Text("SRID=4326;POINT(10 0)".to_string()),
        ]);
        let projected = project_table(&table).unwrap();

        assert_eq!(projected.columns(), ["geom", "name", "x", "y"]);
        assert_eq!(projected.len(), 2);
        assert_eq!(
            projected.get(0, "name"),
            Some(&Value::Text("row0".to_string()))
        );
        assert_eq!(
            projected.get(1, "name"),
            Some(&Value::Text("row1".to_string()))
        );
        let y1 = projected.get(1, "y").and_then(Value::as_f64).unwrap();
        assert!(y1.abs() < TOLERANCE);
        let x0 = projected.get(0, "x").and_then(Value::as_f64).unwrap();
        assert!(x0 < 0.0);
        // input untouched
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_project_table_reports_failing_row() {
        let table = geometry_table(&[
            Value::Text("SRID=4326;POINT(1 1)".to_string()),
            Value::Null,
        ]);
        let err = project_table(&table).unwrap_err();
        match err {
            ProjectionError::AtRow { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(*source, ProjectionError::NotGeometryText { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_project_table_short_row_is_an_error() {
        let mut table = Table::new(vec!["name".to_string(), "geom".to_string()]);
        table.push_row(vec![Value::Text("row0".to_string())]);
        let err = project_table(&table).unwrap_err();
        match err {
            ProjectionError::AtRow { row, source } => {
                assert_eq!(row, 0);
                assert!(matches!(*source, ProjectionError::NotGeometryText { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_project_table_missing_column() {
        let table = Table::new(vec!["name".to_string()]);
        assert_eq!(
            project_table(&table),
            Err(ProjectionError::MissingColumn("geom".to_string()))
        );
    }

    #[test]
    fn test_project_empty_table_keeps_schema() {
        let table = geometry_table(&[]);
        let projected = project_table(&table).unwrap();
        assert!(projected.is_empty());
        assert_eq!(projected.columns(), ["geom", "name", "x", "y"]);
    }
}
