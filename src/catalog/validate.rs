//! Descriptor validation.
//!
//! The catalog is checked before any of it reaches the store: a supported
//! driver, a usable PostgreSQL URI and a single read-only statement.

use url::Url;

use crate::catalog::types::CatalogSource;
use crate::config::CATALOG_DRIVER;
use crate::error_handling::CatalogError;

impl CatalogSource {
    /// Validates driver, connection URI and query text.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.driver != CATALOG_DRIVER {
            return Err(CatalogError::UnsupportedDriver(self.driver.clone()));
        }
        validate_uri(&self.args.uri)?;
        validate_sql(&self.args.sql_expr)?;
        Ok(())
    }
}

fn validate_uri(uri: &str) -> Result<(), CatalogError> {
    // Parse errors are not forwarded verbatim: they can quote the URI back
    let parsed =
        Url::parse(uri).map_err(|_| CatalogError::InvalidUri("not a valid URI".to_string()))?;
    match parsed.scheme() {
        "postgres" | "postgresql" => {}
        other => {
            return Err(CatalogError::InvalidUri(format!(
                "unsupported scheme {other:?}"
            )))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CatalogError::InvalidUri("missing host".to_string()));
    }
    Ok(())
}

/// Keywords that make a `SELECT`/`WITH` statement write: data-modifying CTEs
/// and `SELECT ... INTO`.
const WRITE_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "MERGE", "INTO", "CREATE", "DROP", "ALTER", "TRUNCATE",
];

/// A single read-only `SELECT`/`WITH` statement. A trailing `;` is tolerated;
/// any other `;` is rejected, including one inside a string literal. Write
/// keywords are rejected anywhere in the text, even in literals; the reader
/// also runs the query in a read-only transaction.
fn validate_sql(sql: &str) -> Result<(), CatalogError> {
    let trimmed = sql.trim();
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    if body.is_empty() {
        return Err(CatalogError::InvalidQuery("empty".to_string()));
    }
    if body.contains(';') {
        return Err(CatalogError::InvalidQuery(
            "multiple statements".to_string(),
        ));
    }
    let keyword: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    if !matches!(keyword.as_str(), "SELECT" | "WITH") {
        return Err(CatalogError::InvalidQuery(format!(
            "expected SELECT or WITH, found {:?}",
            keyword
        )));
    }

    let writes = body
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(str::to_ascii_uppercase)
        .find(|word| WRITE_KEYWORDS.contains(&word.as_str()));
    match writes {
        Some(word) => Err(CatalogError::InvalidQuery(format!(
            "{word} is not allowed in a read-only query"
        ))),
        None => Ok(()),
    }
}
