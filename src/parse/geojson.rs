//! GeoJSON feature collection parsing.
//!
//! Only point features are accepted. Property values are mapped onto the fixed
//! attribute set; anything else in `properties` is ignored.

use std::path::Path;

use geo_types::Point;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use strum::IntoEnumIterator;

use crate::error_handling::FeatureError;
use crate::models::{Attribute, Attributes, GeoRecord};

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    features: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<JsonValue>,
}

/// Reads and parses a feature collection file.
pub async fn read_feature_collection(path: &Path) -> Result<Vec<GeoRecord>, FeatureError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| FeatureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let records = parse_feature_collection(&bytes)?;
    log::info!(
        "Parsed {} feature{} from {}",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        path.display()
    );
    Ok(records)
}

/// Parses a feature collection document into records, in document order.
///
/// Fails on the first malformed feature.
pub fn parse_feature_collection(bytes: &[u8]) -> Result<Vec<GeoRecord>, FeatureError> {
    let raw: RawCollection = serde_json::from_slice(bytes)?;
    match raw.kind.as_deref() {
        Some("FeatureCollection") => {}
        Some(other) => return Err(FeatureError::NotFeatureCollection(other.to_string())),
        None => return Err(FeatureError::NotFeatureCollection("no type member".to_string())),
    }

    raw.features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| to_record(index, feature))
        .collect()
}

/// Features are decoded one at a time so shape errors carry the feature index.
fn to_record(index: usize, value: JsonValue) -> Result<GeoRecord, FeatureError> {
    let invalid = |reason: String| FeatureError::InvalidFeature { index, reason };

    let feature: RawFeature =
        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

    let geometry = feature
        .geometry
        .ok_or_else(|| invalid("missing geometry".to_string()))?;
    if geometry.kind != "Point" {
        return Err(invalid(format!("expected Point geometry, found {}", geometry.kind)));
    }
    if geometry.coordinates.len() < 2 {
        return Err(invalid(format!(
            "expected [lon, lat], found {} coordinate(s)",
            geometry.coordinates.len()
        )));
    }

    let lon = coordinate(&geometry.coordinates[0])
        .ok_or_else(|| invalid("longitude is not a finite number".to_string()))?;
    let lat = coordinate(&geometry.coordinates[1])
        .ok_or_else(|| invalid("latitude is not a finite number".to_string()))?;

    let properties = feature.properties.unwrap_or_default();
    let mut attributes = Attributes::default();
    for attribute in Attribute::iter() {
        attributes.set(attribute, property_text(properties.get(attribute.property_key())));
    }

    Ok(GeoRecord {
        index,
        location: Point::new(lon, lat),
        attributes,
    })
}

fn coordinate(value: &JsonValue) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// Strings pass through; other non-null values keep their JSON text.
fn property_text(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
