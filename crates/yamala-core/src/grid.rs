//! In-memory workbook model with 1-based grid addressing
//!
//! The writer assembles sheets here and only hands them to the xlsx encoder
//! on save, so everything laid out or styled can be inspected beforehand.

use crate::table::CellValue;
use std::collections::BTreeMap;
use std::fmt;

/// 24-bit RGB color, e.g. `0xC0C0C0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
}

/// Static formatting of one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    /// Bold font
    pub bold: bool,
    /// Solid background fill
    pub fill: Option<Rgb>,
    /// Horizontal alignment
    pub align: Option<HorizontalAlign>,
}

impl CellStyle {
    /// Check if the style carries no formatting at all
    pub fn is_plain(&self) -> bool {
        *self == CellStyle::default()
    }
}

/// A populated cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    fn blank() -> Self {
        Self {
            value: CellValue::Empty,
            style: CellStyle::default(),
        }
    }
}

/// Display rule evaluated by the spreadsheet viewer: cells equal to
/// `equals` get the rule's font color and fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRule {
    pub equals: i32,
    pub font_color: Rgb,
    pub fill: Rgb,
    /// Skip the remaining rules once this one matched
    pub stop_if_true: bool,
}

/// Inclusive, 1-based rectangular range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    /// Build a range, `None` when it would be empty
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Option<Self> {
        if first_row == 0 || first_col == 0 || first_row > last_row || first_col > last_col {
            return None;
        }
        Some(Self {
            first_row,
            first_col,
            last_row,
            last_col,
        })
    }

    /// Render as an A1-style reference such as `B2:C3`
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_name(self.first_col),
            self.first_row,
            column_name(self.last_col),
            self.last_row
        )
    }
}

/// Conditional highlighting attached to a range, rules in priority order
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormat {
    pub range: CellRange,
    pub rules: Vec<HighlightRule>,
}

/// One named grid
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    conditional_formats: Vec<ConditionalFormat>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            conditional_formats: Vec::new(),
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a cell value, keeping any style already on the cell
    pub fn write(&mut self, row: u32, col: u16, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "grid is 1-based");
        self.cells.entry((row, col)).or_insert_with(Cell::blank).value = value;
    }

    /// Style a cell, creating an empty one if needed
    pub fn set_style(&mut self, row: u32, col: u16, style: CellStyle) {
        self.cells.entry((row, col)).or_insert_with(Cell::blank).style = style;
    }

    /// Get a cell by 1-based row and column
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a cell by A1-style reference, e.g. `"B2"`
    pub fn get(&self, reference: &str) -> Option<&Cell> {
        let (row, col) = parse_cell_ref(reference)?;
        self.cell(row, col)
    }

    /// Value of a cell, [`CellValue::Empty`] when unset
    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cell(row, col).map(|c| &c.value).unwrap_or(&EMPTY)
    }

    /// Style of a cell, the plain style when unset
    pub fn style(&self, row: u32, col: u16) -> CellStyle {
        self.cell(row, col).map(|c| c.style).unwrap_or_default()
    }

    /// Iterate populated cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Highest populated row, at least 1
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(1)
    }

    /// Highest populated column, at least 1
    pub fn max_column(&self) -> u16 {
        self.cells.keys().map(|(_, col)| *col).max().unwrap_or(1)
    }

    /// Attach a conditional format
    pub fn add_conditional_format(&mut self, format: ConditionalFormat) {
        self.conditional_formats.push(format);
    }

    /// Conditional formats in the order they were attached
    pub fn conditional_formats(&self) -> &[ConditionalFormat] {
        &self.conditional_formats
    }
}

/// Ordered collection of sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook without any sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new empty sheet at `index` and return it
    pub fn create_sheet(&mut self, name: impl Into<String>, index: usize) -> &mut Sheet {
        let index = index.min(self.sheets.len());
        self.sheets.insert(index, Sheet::new(name));
        &mut self.sheets[index]
    }

    /// Find a sheet by exact name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheets in document order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet names in document order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Get the number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Convert a 1-based column index to its letters (`1 -> A`, `27 -> AA`)
pub fn column_name(col: u16) -> String {
    let mut n = u32::from(col);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parse an A1-style reference into 1-based `(row, column)`
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u16)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        let digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row, u16::try_from(col).ok()?))
}
