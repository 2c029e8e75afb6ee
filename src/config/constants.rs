//! Configuration constants.
//!
//! This module defines the constants shared by every pipeline stage: the fixed
//! spatial reference, projection parameters, store schema defaults and network
//! timeouts.

use std::time::Duration;

/// Spatial reference identifier of every stored geometry (WGS-84 lon/lat).
///
/// Written into each geometry at load time and assumed at projection time.
pub const SRID: i32 = 4326;

/// WGS-84 semi-major axis in meters, the sphere radius of Web Mercator.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Default destination table for loaded features.
pub const DEFAULT_TABLE_NAME: &str = "places";

/// Default name of the source entry in the catalog descriptor.
pub const DEFAULT_SOURCE_NAME: &str = "places";

/// Driver identifier written into and required by catalog descriptors.
pub const CATALOG_DRIVER: &str = "postgres";

/// Default local path of the fetched feature collection.
pub const DEFAULT_DATA_PATH: &str = "./data/features.geojson";

/// Default path of the written catalog descriptor.
pub const DEFAULT_CATALOG_PATH: &str = "./catalog.yml";

/// HTTP request timeout for the dataset download.
///
/// Feature collections are a few MB at most; 60s leaves room for slow mirrors.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// User-Agent sent with the dataset download.
pub const DEFAULT_USER_AGENT: &str = concat!("geo_points/", env!("CARGO_PKG_VERSION"));

/// Environment variable naming the database used by store-backed tests.
pub const TEST_DATABASE_URL_ENV: &str = "GEO_POINTS_TEST_DATABASE_URL";

/// Projected easting column appended by the projector.
pub const PROJECTED_X_COLUMN: &str = "x";
/// Projected northing column appended by the projector.
pub const PROJECTED_Y_COLUMN: &str = "y";

/// Name of the geometry column in the stored table and default query.
pub const GEOMETRY_COLUMN: &str = "geom";

/// Name of the column holding each feature's position in the source file.
pub const FEATURE_INDEX_COLUMN: &str = "feature_index";
