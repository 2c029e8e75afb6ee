//! Error type definitions.
//!
//! One enum per pipeline concern. Stages fail fast: the first error of any
//! kind ends the run, so none of these carry retry or severity information.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised while making the dataset available locally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source URL is not an absolute http(s) URL.
    #[error("Invalid download URL {url}: {reason}")]
    InvalidUrl {
        /// Rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Transport failure while downloading.
    #[error("Download error for {url}: {source}")]
    Download {
        /// Source URL
        url: String,
        /// Underlying transport error
        #[source]
        source: ReqwestError,
    },

    /// The server answered with a non-success status.
    #[error("Download error for {url}: HTTP status {status}")]
    DownloadStatus {
        /// Source URL
        url: String,
        /// Response status
        status: reqwest::StatusCode,
    },

    /// The local copy could not be written.
    #[error("Write error for {}: {source}", path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Returns true for network-side failures (transport or HTTP status).
    pub fn is_download_error(&self) -> bool {
        matches!(self, Self::Download { .. } | Self::DownloadStatus { .. })
    }

    /// Returns true for local filesystem failures.
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// Errors raised while reading a feature collection.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// The feature collection file could not be read.
    #[error("Failed to read feature collection {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Invalid GeoJSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not a `FeatureCollection`.
    #[error("Expected a FeatureCollection, found {0}")]
    NotFeatureCollection(String),

    /// A single feature is malformed.
    #[error("Invalid feature at index {index}: {reason}")]
    InvalidFeature {
        /// Position of the feature in the collection
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// Errors raised while parsing geometry text (`SRID=<id>;POINT(<lon> <lat>)`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryTextError {
    /// The text does not follow the EWKT point grammar.
    #[error("Malformed geometry text: {0}")]
    Malformed(String),

    /// The geometry is valid but not a point.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
}

/// Errors raised by the store (connection, DDL, insert, query, decode).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not open a connection.
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A table name is not a plain SQL identifier.
    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Transaction begin/commit failed.
    #[error("Transaction error: {0}")]
    Transaction(#[source] sqlx::Error),

    /// A DDL statement failed.
    #[error("DDL error ({statement}): {source}")]
    Ddl {
        /// Short description of the statement
        statement: String,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },

    /// Inserting one feature failed.
    #[error("Insert error for feature {index}: {source}")]
    Insert {
        /// Position of the feature in the batch
        index: usize,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },

    /// A read query failed.
    #[error("Query error: {0}")]
    Query(#[source] sqlx::Error),

    /// A result column has a type the reader cannot represent.
    #[error("Unsupported type {type_name} for column {column}")]
    UnsupportedColumnType {
        /// Column name
        column: String,
        /// PostgreSQL type name
        type_name: String,
    },

    /// A cell could not be decoded.
    #[error("Failed to decode column {column}: {source}")]
    Decode {
        /// Column name
        column: String,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },
}

/// Errors raised while projecting coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate ({lon}, {lat})")]
    NonFinite {
        /// Longitude in degrees
        lon: f64,
        /// Latitude in degrees
        lat: f64,
    },

    /// Latitude at or beyond a pole; Mercator y diverges there.
    #[error("Latitude {0} outside (-90, 90)")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180].
    #[error("Longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// The geometry carries a different spatial reference.
    #[error("Expected SRID {expected}, found {found}")]
    UnexpectedSrid {
        /// SRID the projector works in
        expected: i32,
        /// SRID found in the geometry text
        found: i32,
    },

    /// The geometry text could not be parsed.
    #[error(transparent)]
    Geometry(#[from] GeometryTextError),

    /// The geometry column is absent from the table.
    #[error("Column {0} not found")]
    MissingColumn(String),

    /// The geometry cell is null or not text.
    #[error("Column {column} does not hold geometry text")]
    NotGeometryText {
        /// Column name
        column: String,
    },

    /// Projection failed for a specific row.
    #[error("Row {row}: {source}")]
    AtRow {
        /// Row position
        row: usize,
        /// Underlying failure
        #[source]
        source: Box<ProjectionError>,
    },
}

/// Errors raised while building, reading or validating a catalog descriptor.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The descriptor file could not be read or written.
    #[error("Catalog I/O error for {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is not valid YAML for the catalog shape.
    #[error("Invalid catalog document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The requested source is not declared.
    #[error("Source {0:?} not found in catalog")]
    UnknownSource(String),

    /// The source names a driver other than `postgres`.
    #[error("Unsupported driver {0:?}")]
    UnsupportedDriver(String),

    /// The connection URI is unusable. The message never echoes the URI.
    #[error("Invalid connection URI: {0}")]
    InvalidUri(String),

    /// The SQL expression is empty or not a single read-only query.
    #[error("Invalid SQL expression: {0}")]
    InvalidQuery(String),
}

/// Errors raised while writing the projected table.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file or stream failure.
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}
