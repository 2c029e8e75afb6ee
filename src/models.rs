//! Records and tables flowing between pipeline stages.

use geo_types::Point;
use serde::Serialize;
use strum_macros::EnumIter;

/// The fixed attribute set carried by every feature.
///
/// Declaration order is the column order of the stored table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Attribute {
    Zip,
    State,
    Name,
    Address,
    County,
    City,
    Directions,
}

impl Attribute {
    /// Key of the attribute in a feature's `properties` object.
    pub fn property_key(self) -> &'static str {
        match self {
            Attribute::Zip => "ZIP",
            Attribute::State => "STATE",
            Attribute::Name => "NAME",
            Attribute::Address => "ADDRESS",
            Attribute::County => "COUNTY",
            Attribute::City => "CITY",
            Attribute::Directions => "DIRECTIONS",
        }
    }

    /// Column name of the attribute in the stored table.
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::Zip => "zip",
            Attribute::State => "state",
            Attribute::Name => "name",
            Attribute::Address => "address",
            Attribute::County => "county",
            Attribute::City => "city",
            Attribute::Directions => "directions",
        }
    }
}

/// Attribute values of one feature. Absent or null properties are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub zip: Option<String>,
    pub state: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub directions: Option<String>,
}

impl Attributes {
    /// Value of one attribute.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.slot(attribute).as_deref()
    }

    /// Sets one attribute.
    pub fn set(&mut self, attribute: Attribute, value: Option<String>) {
        *self.slot_mut(attribute) = value;
    }

    fn slot(&self, attribute: Attribute) -> &Option<String> {
        match attribute {
            Attribute::Zip => &self.zip,
            Attribute::State => &self.state,
            Attribute::Name => &self.name,
            Attribute::Address => &self.address,
            Attribute::County => &self.county,
            Attribute::City => &self.city,
            Attribute::Directions => &self.directions,
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut Option<String> {
        match attribute {
            Attribute::Zip => &mut self.zip,
            Attribute::State => &mut self.state,
            Attribute::Name => &mut self.name,
            Attribute::Address => &mut self.address,
            Attribute::County => &mut self.county,
            Attribute::City => &mut self.city,
            Attribute::Directions => &mut self.directions,
        }
    }
}

/// One input feature: a lon/lat point plus its attributes.
///
/// `index` is the feature's position in the source collection and is stored
/// alongside the row so reads can restore source order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub index: usize,
    pub location: Point<f64>,
    pub attributes: Attributes,
}

/// A single cell of a [`Table`].
///
/// Serializes untagged, so JSON output holds plain scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is an int or float cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Rendering used by CSV export: empty for null.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Row-oriented in-memory table: named columns, ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Rows are expected to have one cell per column; cells
    /// missing from a short row read as absent through [`Table::get`].
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column name).
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
