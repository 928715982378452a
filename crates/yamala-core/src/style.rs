//! Header styling and 0/1 highlighting for laid-out tables

use crate::grid::{
    CellRange, CellStyle, ConditionalFormat, HighlightRule, HorizontalAlign, Rgb, Sheet,
};
use crate::layout::{GridExtent, FIRST_DATA_COL, FIRST_DATA_ROW};

/// Neutral gray used behind both header axes
pub const HEADER_GRAY: Rgb = Rgb(0xC0C0C0);
/// Green used for cells equal to 1
pub const FLAG_TRUE_GREEN: Rgb = Rgb(0x3C9536);
/// Red used for cells equal to 0
pub const FLAG_FALSE_RED: Rgb = Rgb(0xFF6666);

/// Look of a table: header styles plus value highlighting rules
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Style of row 1, from column 2 on
    pub column_header: CellStyle,
    /// Style of column 1, from row 2 on
    pub row_header: CellStyle,
    /// Rules attached to the data area, first match wins
    pub highlight_rules: Vec<HighlightRule>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            column_header: CellStyle {
                bold: true,
                fill: Some(HEADER_GRAY),
                align: Some(HorizontalAlign::Center),
            },
            row_header: CellStyle {
                bold: true,
                fill: Some(HEADER_GRAY),
                align: Some(HorizontalAlign::Left),
            },
            highlight_rules: vec![
                HighlightRule {
                    equals: 1,
                    font_color: FLAG_TRUE_GREEN,
                    fill: FLAG_TRUE_GREEN,
                    stop_if_true: true,
                },
                HighlightRule {
                    equals: 0,
                    font_color: FLAG_FALSE_RED,
                    fill: FLAG_FALSE_RED,
                    stop_if_true: true,
                },
            ],
        }
    }
}

impl TableStyle {
    /// Style both header axes and attach the highlight rules to the data area.
    ///
    /// Cell (1, 1) is left alone. Nothing is attached when the table has no
    /// data cells.
    pub fn apply(&self, sheet: &mut Sheet, extent: GridExtent) {
        for col in FIRST_DATA_COL..=extent.max_column {
            sheet.set_style(1, col, self.column_header);
        }
        for row in FIRST_DATA_ROW..=extent.max_row {
            sheet.set_style(row, 1, self.row_header);
        }

        if self.highlight_rules.is_empty() {
            return;
        }
        if let Some(range) = CellRange::new(
            FIRST_DATA_ROW,
            FIRST_DATA_COL,
            extent.max_row,
            extent.max_column,
        ) {
            sheet.add_conditional_format(ConditionalFormat {
                range,
                rules: self.highlight_rules.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::lay_out;
    use crate::table::SheetSpec;

    fn styled_sheet(spec: &SheetSpec) -> Sheet {
        let mut sheet = Sheet::new("s");
        let extent = lay_out(&mut sheet, spec).unwrap();
        TableStyle::default().apply(&mut sheet, extent);
        sheet
    }

    #[test]
    fn test_header_axes_are_styled() {
        let spec = SheetSpec::new(["a", "b", "c"])
            .with_column("x", [1, 0, 1])
            .with_column("y", [0, 0, 1]);
        let sheet = styled_sheet(&spec);

        for col in 2..=3 {
            let style = sheet.style(1, col);
            assert!(style.bold);
            assert_eq!(style.fill, Some(HEADER_GRAY));
            assert_eq!(style.align, Some(HorizontalAlign::Center));
        }
        for row in 2..=4 {
            let style = sheet.style(row, 1);
            assert!(style.bold);
            assert_eq!(style.fill, Some(HEADER_GRAY));
            assert_eq!(style.align, Some(HorizontalAlign::Left));
        }

        let corner = sheet.style(1, 1);
        assert!(!corner.bold);
        assert_eq!(corner.fill, None);
        assert!(sheet.cell(1, 1).is_none());
    }

    #[test]
    fn test_data_cells_stay_plain() {
        let spec = SheetSpec::new(["a"]).with_column("x", [1]);
        let sheet = styled_sheet(&spec);

        assert!(sheet.style(2, 2).is_plain());
    }

    #[test]
    fn test_highlight_rules_cover_data_area() {
        let spec = SheetSpec::new(["a", "b"])
            .with_column("x", [1, 0])
            .with_column("y", [0, 1])
            .with_column("z", [1, 1]);
        let sheet = styled_sheet(&spec);

        let formats = sheet.conditional_formats();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].range.to_a1(), "B2:D3");

        let rules = &formats[0].rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].equals, 1);
        assert_eq!(rules[0].fill, FLAG_TRUE_GREEN);
        assert_eq!(rules[1].equals, 0);
        assert_eq!(rules[1].fill, FLAG_FALSE_RED);
        assert!(rules.iter().all(|r| r.stop_if_true));
    }

    #[test]
    fn test_no_highlight_without_data_cells() {
        let no_columns = styled_sheet(&SheetSpec::new(["a", "b"]));
        assert!(no_columns.conditional_formats().is_empty());
        assert!(no_columns.style(3, 1).bold);

        let no_rows = styled_sheet(&SheetSpec::default().with_column("x", Vec::<i64>::new()));
        assert!(no_rows.conditional_formats().is_empty());
        assert!(no_rows.style(1, 2).bold);
    }
}
