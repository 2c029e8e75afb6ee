// Shared test helpers for store-backed tests and fixture data.
//
// Store-backed tests need a PostGIS database. They read its URL from
// GEO_POINTS_TEST_DATABASE_URL and return early when it is unset.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo_points::config::TEST_DATABASE_URL_ENV;

static TABLE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns the test database URL, or `None` (with a note on stderr) to skip.
#[allow(dead_code)] // Used by other test files
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("{TEST_DATABASE_URL_ENV} not set, skipping store-backed test");
            None
        }
    }
}

/// A table name no other test in this process uses.
#[allow(dead_code)]
pub fn unique_table(prefix: &str) -> String {
    let n = TABLE_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}_{}_{n}", std::process::id())
}

/// Three point features: a full one, one with a numeric ZIP and a null
/// DIRECTIONS, and one missing most properties.
#[allow(dead_code)]
pub const SAMPLE_COLLECTION: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": {"type": "Point", "coordinates": [-87.6298, 41.8781]},
      "properties": {
        "ZIP": "60602", "STATE": "IL", "NAME": "City Hall",
        "ADDRESS": "121 N LaSalle St", "COUNTY": "Cook", "CITY": "Chicago",
        "DIRECTIONS": "Enter on LaSalle"
      }
    },
    {
      "type": "Feature",
      "geometry": {"type": "Point", "coordinates": [-89.6501, 39.7817]},
      "properties": {
        "ZIP": 62701, "STATE": "IL", "NAME": "Capitol",
        "ADDRESS": "401 S 2nd St", "COUNTY": "Sangamon", "CITY": "Springfield",
        "DIRECTIONS": null
      }
    },
    {
      "type": "Feature",
      "geometry": {"type": "Point", "coordinates": [0.0, 51.4779]},
      "properties": {"NAME": "Observatory"}
    }
  ]
}"#;

/// Writes [`SAMPLE_COLLECTION`] to `path`.
#[allow(dead_code)]
pub fn write_sample_collection(path: &Path) {
    std::fs::write(path, SAMPLE_COLLECTION).expect("Failed to write sample collection");
}
