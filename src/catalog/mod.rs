//! Catalog descriptors.
//!
//! A catalog names data sources, binding each to a driver, a connection URI
//! and a SQL expression. It is plain data: this module builds, serializes,
//! loads and validates it, and the reader receives only the validated URI
//! and query text.

mod types;
mod validate;

use std::path::Path;

use log::info;

use crate::config::CATALOG_DRIVER;
use crate::error_handling::CatalogError;
use crate::storage::{default_select_sql, validate_identifier};

pub use types::{Catalog, CatalogSource, SourceArgs};

impl Catalog {
    /// Builds a catalog with one source reading `table` back in feature order.
    pub fn for_table(
        source_name: &str,
        database_url: &str,
        table: &str,
    ) -> Result<Self, CatalogError> {
        validate_identifier(table).map_err(|e| CatalogError::InvalidQuery(e.to_string()))?;
        let source = CatalogSource {
            driver: CATALOG_DRIVER.to_string(),
            description: Some(format!("Point features loaded into {table}")),
            args: SourceArgs {
                uri: database_url.to_string(),
                sql_expr: default_select_sql(table),
            },
        };
        source.validate()?;

        let mut catalog = Catalog::default();
        catalog.sources.insert(source_name.to_string(), source);
        Ok(catalog)
    }

    /// Parses a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Renders the catalog as YAML.
    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reads and parses a catalog file.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml(&text)
    }

    /// Writes the catalog to a file, creating parent directories.
    pub async fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let io_error = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(path, yaml).await.map_err(io_error)?;
        info!("Wrote catalog to {}", path.display());
        Ok(())
    }

    /// Looks up a source by name.
    pub fn source(&self, name: &str) -> Result<&CatalogSource, CatalogError> {
        self.sources
            .get(name)
            .ok_or_else(|| CatalogError::UnknownSource(name.to_string()))
    }

    /// Looks up a source by name and validates it.
    pub fn validated_source(&self, name: &str) -> Result<&CatalogSource, CatalogError> {
        let source = self.source(name)?;
        source.validate()?;
        Ok(source)
    }
}
