//! Geometry text encoding.
//!
//! Points cross the store boundary as EWKT text, `SRID=<id>;POINT(<lon> <lat>)`,
//! in both directions: the loader binds it into `ST_GeomFromEWKT` and the
//! default catalog query selects `ST_AsEWKT(geom)`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use geo_types::Point;
use regex::Regex;

use crate::config::SRID;
use crate::error_handling::GeometryTextError;

static EWKT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*SRID\s*=\s*(-?\d+)\s*;\s*([A-Z]+)\s*(.*?)\s*$")
        .expect("EWKT pattern is valid")
});

static POINT_BODY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*(\S+)\s+(\S+)\s*\)$").expect("POINT body pattern is valid")
});

/// A point geometry together with its spatial reference identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryText {
    srid: i32,
    point: Point<f64>,
}

impl GeometryText {
    /// Creates a point in the pipeline's fixed spatial reference.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self::new(SRID, Point::new(lon, lat))
    }

    /// Creates a point in an explicit spatial reference.
    pub fn new(srid: i32, point: Point<f64>) -> Self {
        Self { srid, point }
    }

    /// Spatial reference identifier.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// The point, x = longitude and y = latitude for SRID 4326.
    pub fn point(&self) -> Point<f64> {
        self.point
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.point.y()
    }
}

impl fmt::Display for GeometryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SRID={};POINT({} {})",
            self.srid,
            self.point.x(),
            self.point.y()
        )
    }
}

impl FromStr for GeometryText {
    type Err = GeometryTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = EWKT_PATTERN.captures(s).ok_or_else(|| {
            GeometryTextError::Malformed(format!("expected SRID=<id>;<WKT>, got {s:?}"))
        })?;

        let srid: i32 = caps[1]
            .parse()
            .map_err(|_| GeometryTextError::Malformed(format!("invalid SRID {:?}", &caps[1])))?;

        let kind = caps[2].to_ascii_uppercase();
        if kind != "POINT" {
            return Err(GeometryTextError::UnsupportedGeometry(kind));
        }

        let body = &caps[3];
        let coords = POINT_BODY_PATTERN
            .captures(body)
            .ok_or_else(|| GeometryTextError::Malformed(format!("invalid POINT body {body:?}")))?;

        let parse_coord = |raw: &str| {
            raw.parse::<f64>()
                .map_err(|_| GeometryTextError::Malformed(format!("invalid coordinate {raw:?}")))
        };
        let x = parse_coord(&coords[1])?;
        let y = parse_coord(&coords[2])?;

        Ok(Self::new(srid, Point::new(x, y)))
    }
}
