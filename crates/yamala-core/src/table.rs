//! Dataset types handed to the workbook writer

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Empty/null cell
    Empty,
}

impl CellValue {
    /// Convert a decoded JSON value into a cell value.
    ///
    /// Arrays and objects have no cell representation and are kept as
    /// their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => CellValue::String(s.clone()),
            other => CellValue::String(other.to_string()),
        }
    }

    /// Convert a scalar YAML value into a cell value, `None` for collections
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Null => Some(CellValue::Empty),
            serde_yaml::Value::Bool(b) => Some(CellValue::Bool(*b)),
            serde_yaml::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_yaml::Value::String(s) => Some(CellValue::String(s.clone())),
            serde_yaml::Value::Tagged(tagged) => CellValue::from_yaml(&tagged.value),
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Convert to a display string
    pub fn to_string_value(&self) -> String {
        match self {
            CellValue::Bool(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Empty => write!(f, ""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Row labels and columns of a single sheet
///
/// Every column holds one value per row label; values line up with the
/// labels by position only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Row labels, written down the first column
    pub rows: Vec<CellValue>,
    /// Column headers mapped to their values, in insertion order
    pub columns: IndexMap<String, Vec<CellValue>>,
}

impl SheetSpec {
    /// Create a sheet with the given row labels and no columns
    pub fn new<I, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            columns: IndexMap::new(),
        }
    }

    /// Append a column, keeping insertion order
    pub fn with_column<I, V>(mut self, header: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.columns
            .insert(header.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Ordered mapping from sheet name to sheet contents
///
/// Insertion order decides the order of sheets in the output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabularDataset {
    sheets: IndexMap<String, SheetSpec>,
}

impl TabularDataset {
    /// Create a new empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet; re-inserting a name replaces it in place
    pub fn insert(&mut self, name: impl Into<String>, sheet: SheetSpec) {
        self.sheets.insert(name.into(), sheet);
    }

    /// Builder form of [`TabularDataset::insert`]
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: SheetSpec) -> Self {
        self.insert(name, sheet);
        self
    }

    /// Find a sheet by name
    pub fn get(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.get(name)
    }

    /// Iterate sheets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SheetSpec)> {
        self.sheets.iter()
    }

    /// Sheet names in insertion order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the dataset has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<(String, SheetSpec)> for TabularDataset {
    fn from_iter<T: IntoIterator<Item = (String, SheetSpec)>>(iter: T) -> Self {
        Self {
            sheets: iter.into_iter().collect(),
        }
    }
}
