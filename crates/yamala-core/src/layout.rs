//! Placement of row labels, column headers and values on a sheet

use crate::error::{Error, Result};
use crate::grid::Sheet;
use crate::table::{CellValue, SheetSpec};

/// First row holding data below the header row
pub const FIRST_DATA_ROW: u32 = 2;
/// First column holding data right of the label column
pub const FIRST_DATA_COL: u16 = 2;

/// Rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;
/// Columns in a worksheet
pub const MAX_COLUMNS: u16 = 16_384;

/// Bottom-right corner of a laid-out table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    pub max_row: u32,
    pub max_column: u16,
}

impl GridExtent {
    /// Extent of `spec` once laid out, header row and column included.
    ///
    /// `None` when the table, or any of its columns, would run past the
    /// last row or column of a worksheet.
    pub fn of(spec: &SheetSpec) -> Option<Self> {
        let tallest = spec
            .columns
            .values()
            .map(Vec::len)
            .fold(spec.rows.len(), usize::max);

        let max_row = u32::try_from(spec.rows.len() + 1).ok()?;
        let max_column = u16::try_from(spec.columns.len() + 1).ok()?;
        let last_used_row = u32::try_from(tallest + 1).ok()?;

        (last_used_row <= MAX_ROWS && max_column <= MAX_COLUMNS).then_some(Self {
            max_row,
            max_column,
        })
    }

    /// Like [`GridExtent::of`], reporting an oversized table as an error
    pub fn fit(sheet: &str, spec: &SheetSpec) -> Result<Self> {
        Self::of(spec).ok_or_else(|| Error::SheetTooLarge {
            sheet: sheet.to_string(),
            rows: spec.row_count(),
            columns: spec.column_count(),
        })
    }
}

/// Write `spec` onto an empty sheet.
///
/// Row labels go down column 1 from row 2, headers along row 1 from column
/// 2, and each column's values below its header. Values are matched to row
/// labels by index only. Cell (1, 1) stays empty. Tables larger than a
/// worksheet are rejected before anything is written.
pub fn lay_out(sheet: &mut Sheet, spec: &SheetSpec) -> Result<GridExtent> {
    let extent = GridExtent::fit(sheet.name(), spec)?;

    for (row, label) in (FIRST_DATA_ROW..=extent.max_row).zip(&spec.rows) {
        sheet.write(row, 1, label.clone());
    }

    for (col, (header, values)) in (FIRST_DATA_COL..=extent.max_column).zip(&spec.columns) {
        sheet.write(1, col, CellValue::String(header.clone()));
        for (row, value) in (FIRST_DATA_ROW..=MAX_ROWS).zip(values) {
            sheet.write(row, col, value.clone());
        }
    }

    Ok(extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_table() {
        let spec = SheetSpec::new(["squirtle"]).with_column("grass", [0]);
        let mut sheet = Sheet::new("types");

        let extent = lay_out(&mut sheet, &spec).unwrap();

        assert_eq!(sheet.get("A2").unwrap().value, CellValue::from("squirtle"));
        assert_eq!(sheet.get("B1").unwrap().value, CellValue::from("grass"));
        assert_eq!(sheet.get("B2").unwrap().value, CellValue::Integer(0));
        assert!(sheet.get("A1").is_none());
        assert_eq!(
            extent,
            GridExtent {
                max_row: 2,
                max_column: 2
            }
        );
    }

    #[test]
    fn test_values_follow_position_not_labels() {
        let spec = SheetSpec::new(["b", "a", "b"])
            .with_column("x", [1, 2, 3])
            .with_column("y", ["p", "q", "r"]);
        let mut sheet = Sheet::new("s");

        let extent = lay_out(&mut sheet, &spec).unwrap();

        assert_eq!(extent.max_row, 4);
        assert_eq!(extent.max_column, 3);
        assert_eq!(sheet.value(2, 1), &CellValue::from("b"));
        assert_eq!(sheet.value(4, 1), &CellValue::from("b"));
        assert_eq!(sheet.value(2, 2), &CellValue::Integer(1));
        assert_eq!(sheet.value(4, 2), &CellValue::Integer(3));
        assert_eq!(sheet.value(1, 3), &CellValue::from("y"));
        assert_eq!(sheet.value(3, 3), &CellValue::from("q"));
    }

    #[test]
    fn test_headers_keep_insertion_order() {
        let spec = SheetSpec::new(["r"])
            .with_column("zeta", [1])
            .with_column("alpha", [0]);
        let mut sheet = Sheet::new("s");

        lay_out(&mut sheet, &spec).unwrap();

        assert_eq!(sheet.value(1, 2), &CellValue::from("zeta"));
        assert_eq!(sheet.value(1, 3), &CellValue::from("alpha"));
    }

    #[test]
    fn test_empty_table_only_has_extent() {
        let mut sheet = Sheet::new("s");
        let extent = lay_out(&mut sheet, &SheetSpec::default()).unwrap();

        assert_eq!(sheet.cells().count(), 0);
        assert_eq!(
            extent,
            GridExtent {
                max_row: 1,
                max_column: 1
            }
        );
    }

    #[test]
    fn test_widest_table_fits() {
        let mut spec = SheetSpec::new(["r"]);
        for i in 0..usize::from(MAX_COLUMNS - 1) {
            spec = spec.with_column(format!("c{i}"), [1]);
        }
        let mut sheet = Sheet::new("wide");

        let extent = lay_out(&mut sheet, &spec).unwrap();

        assert_eq!(extent.max_column, MAX_COLUMNS);
        assert_eq!(sheet.value(1, MAX_COLUMNS), &CellValue::from("c16382"));
        assert_eq!(sheet.value(2, MAX_COLUMNS), &CellValue::Integer(1));
    }

    #[test]
    fn test_too_many_columns_is_an_error() {
        let mut spec = SheetSpec::new(["r"]);
        for i in 0..65_534 {
            spec = spec.with_column(format!("c{i}"), [0]);
        }
        let mut sheet = Sheet::new("wide");

        assert_eq!(GridExtent::of(&spec), None);
        let err = lay_out(&mut sheet, &spec).unwrap_err();

        assert!(matches!(
            err,
            Error::SheetTooLarge {
                columns: 65_534,
                ..
            }
        ));
        assert_eq!(sheet.cells().count(), 0);
    }

    #[test]
    fn test_overlong_column_is_an_error() {
        let rows = usize::try_from(MAX_ROWS).unwrap();
        let spec = SheetSpec::new(["r"]).with_column("tall", vec![0; rows]);

        assert_eq!(GridExtent::of(&spec), None);
    }
}
