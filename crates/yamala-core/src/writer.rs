//! Workbook assembly and xlsx output
//!
//! `process` validates a dataset and builds one styled sheet per entry in
//! the in-memory [`Workbook`]; `save` encodes that workbook with
//! `rust_xlsxwriter` and writes it under the writer's folder.

use crate::error::Result;
use crate::grid::{Cell, CellStyle, HorizontalAlign, Sheet, Workbook};
use crate::layout::{lay_out, GridExtent};
use crate::naming::{resolve_sheet_name, workbook_file_name};
use crate::style::TableStyle;
use crate::table::{CellValue, TabularDataset};
use crate::validator::validate;
use rust_xlsxwriter::{
    Color, ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatAlign, FormatPattern,
    Worksheet,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Something that turns datasets into a persisted document
pub trait Writer {
    /// Build the document from `dataset`
    fn process(&mut self, dataset: &TabularDataset) -> Result<()>;

    /// Persist the document as `filename` (extension forced) and return
    /// the written path
    fn save(&self, filename: &str) -> Result<PathBuf>;
}

/// Writer producing a single `.xlsx` file per dataset.
///
/// Meant for one dataset per instance: calling `process` again adds the new
/// sheets next to the old ones and keeps their names reserved.
#[derive(Debug)]
pub struct XlsxWriter {
    folder: PathBuf,
    workbook: Workbook,
    style: TableStyle,
    used_names: HashSet<String>,
}

impl XlsxWriter {
    /// Create a writer storing its output in `folder`
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            workbook: Workbook::new(),
            style: TableStyle::default(),
            used_names: HashSet::new(),
        }
    }

    /// Replace the table style used for new sheets
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Output folder
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The workbook assembled so far
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }
}

impl Writer for XlsxWriter {
    fn process(&mut self, dataset: &TabularDataset) -> Result<()> {
        validate(dataset)?;
        for (name, spec) in dataset.iter() {
            GridExtent::fit(name, spec)?;
        }

        for (index, (name, spec)) in dataset.iter().enumerate() {
            let sheet_name = resolve_sheet_name(name, &mut self.used_names);
            let sheet = self.workbook.create_sheet(sheet_name, index);
            let extent = lay_out(sheet, spec)?;
            self.style.apply(sheet, extent);

            log::debug!(
                "sheet {:?}: {} rows x {} columns",
                sheet.name(),
                spec.row_count(),
                spec.column_count()
            );
        }

        log::info!("processed {} sheet(s)", dataset.len());
        Ok(())
    }

    fn save(&self, filename: &str) -> Result<PathBuf> {
        let path = self.folder.join(workbook_file_name(filename));

        let mut workbook = encode(&self.workbook)?;
        workbook.save(&path)?;

        log::info!("wrote {}", path.display());
        Ok(path)
    }
}

/// Encode the in-memory workbook, sheets in document order
pub fn encode(workbook: &Workbook) -> Result<rust_xlsxwriter::Workbook> {
    let mut book = rust_xlsxwriter::Workbook::new();
    for sheet in workbook.sheets() {
        book.push_worksheet(encode_sheet(sheet)?);
    }
    Ok(book)
}

fn encode_sheet(sheet: &Sheet) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet.name())?;

    let mut formats: HashMap<CellStyle, Format> = HashMap::new();
    for ((row, col), cell) in sheet.cells() {
        let format = if cell.style.is_plain() {
            None
        } else {
            Some(
                &*formats
                    .entry(cell.style)
                    .or_insert_with(|| cell_format(&cell.style)),
            )
        };
        write_cell(&mut worksheet, row - 1, col - 1, cell, format)?;
    }

    for conditional in sheet.conditional_formats() {
        let range = conditional.range;
        for rule in &conditional.rules {
            let color_format = Format::new()
                .set_font_color(Color::RGB(rule.font_color.0))
                .set_foreground_color(Color::RGB(rule.fill.0))
                .set_background_color(Color::RGB(rule.fill.0))
                .set_pattern(FormatPattern::Solid);
            let highlight = ConditionalFormatCell::new()
                .set_rule(ConditionalFormatCellRule::EqualTo(rule.equals))
                .set_format(color_format)
                .set_stop_if_true(rule.stop_if_true);

            worksheet.add_conditional_format(
                range.first_row - 1,
                range.first_col - 1,
                range.last_row - 1,
                range.last_col - 1,
                &highlight,
            )?;
        }
    }

    worksheet.autofit();
    Ok(worksheet)
}

fn cell_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(fill) = style.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(fill.0));
    }
    match style.align {
        Some(HorizontalAlign::Left) => format = format.set_align(FormatAlign::Left),
        Some(HorizontalAlign::Center) => format = format.set_align(FormatAlign::Center),
        None => {}
    }
    format
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: Option<&Format>,
) -> Result<()> {
    match (&cell.value, format) {
        (CellValue::Empty, None) => {}
        (CellValue::Empty, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        (CellValue::Integer(i), None) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        (CellValue::Integer(i), Some(format)) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        (CellValue::Float(f), None) if f.is_finite() => {
            worksheet.write_number(row, col, *f)?;
        }
        (CellValue::Float(f), Some(format)) if f.is_finite() => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        // NaN and infinities have no numeric cell representation
        (CellValue::Float(f), None) => {
            worksheet.write_string(row, col, f.to_string())?;
        }
        (CellValue::Float(f), Some(format)) => {
            worksheet.write_string_with_format(row, col, f.to_string(), format)?;
        }
        (CellValue::String(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (CellValue::String(s), Some(format)) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, STRUCTURE_ERROR_MESSAGE};
    use crate::style::HEADER_GRAY;
    use crate::table::SheetSpec;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::TempDir;

    fn pokemon_dataset() -> TabularDataset {
        TabularDataset::new()
            .with_sheet(
                "types",
                SheetSpec::new(["squirtle", "bulbasaur"])
                    .with_column("water", [1, 0])
                    .with_column("grass", [0, 1])
                    .with_column("poison", [0, 1]),
            )
            .with_sheet(
                "Moves",
                SheetSpec::new(["squirtle", "bulbasaur"]).with_column("tackle", [1, 1]),
            )
    }

    #[test]
    fn test_process_creates_one_sheet_per_entry_in_order() {
        let mut writer = XlsxWriter::new("/unused");
        writer.process(&pokemon_dataset()).unwrap();

        assert_eq!(writer.workbook().sheet_names(), vec!["types", "moves"]);
    }

    #[test]
    fn test_process_lays_out_and_styles() {
        let dataset = TabularDataset::new().with_sheet(
            "types",
            SheetSpec::new(["squirtle"]).with_column("grass", [0]),
        );
        let mut writer = XlsxWriter::new("/unused");
        writer.process(&dataset).unwrap();

        let sheet = writer.workbook().sheet("types").unwrap();
        assert_eq!(sheet.get("A2").unwrap().value, CellValue::from("squirtle"));
        assert_eq!(sheet.get("B1").unwrap().value, CellValue::from("grass"));
        assert_eq!(sheet.get("B2").unwrap().value, CellValue::Integer(0));
        assert_eq!(sheet.style(1, 2).fill, Some(HEADER_GRAY));
        assert_eq!(sheet.style(2, 1).fill, Some(HEADER_GRAY));
        assert!(sheet.style(1, 1).is_plain());
        assert_eq!(sheet.conditional_formats()[0].range.to_a1(), "B2:B2");
    }

    #[test]
    fn test_process_resolves_colliding_names() {
        let dataset = TabularDataset::new()
            .with_sheet("ro\\les", SheetSpec::new(["a"]))
            .with_sheet("ro/les", SheetSpec::new(["a"]))
            .with_sheet("ro?les", SheetSpec::new(["a"]));
        let mut writer = XlsxWriter::new("/unused");
        writer.process(&dataset).unwrap();

        assert_eq!(
            writer.workbook().sheet_names(),
            vec!["ro_les", "ro_les_1", "ro_les_2"]
        );
    }

    #[test]
    fn test_rejected_dataset_leaves_workbook_untouched() {
        let dataset = TabularDataset::new()
            .with_sheet("ok", SheetSpec::new(["a"]).with_column("c", [1]))
            .with_sheet("bad", SheetSpec::new(["a"]).with_column("c", [1, 0]));
        let mut writer = XlsxWriter::new("/unused");

        let err = writer.process(&dataset).unwrap_err();

        assert!(matches!(err, Error::Structure));
        assert_eq!(err.to_string(), STRUCTURE_ERROR_MESSAGE);
        assert!(writer.workbook().is_empty());
    }

    #[test]
    fn test_second_process_keeps_previous_sheets() {
        let mut writer = XlsxWriter::new("/unused");
        writer
            .process(&TabularDataset::new().with_sheet("first", SheetSpec::new(["a"])))
            .unwrap();
        writer
            .process(&TabularDataset::new().with_sheet("first", SheetSpec::new(["b"])))
            .unwrap();

        assert_eq!(writer.workbook().sheet_names(), vec!["first_1", "first"]);
    }

    #[test]
    fn test_save_sanitizes_file_name() {
        let dir = TempDir::new().unwrap();
        let mut writer = XlsxWriter::new(dir.path());
        writer.process(&pokemon_dataset()).unwrap();

        let path = writer.save("file\n").unwrap();

        assert_eq!(path, dir.path().join("file_.xlsx"));
        assert!(path.is_file());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("out.xlsx"), b"stale").unwrap();

        let mut writer = XlsxWriter::new(dir.path());
        writer.process(&pokemon_dataset()).unwrap();
        let path = writer.save("out").unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 5);
    }

    #[test]
    fn test_saved_workbook_reads_back() {
        let dir = TempDir::new().unwrap();
        let mut writer = XlsxWriter::new(dir.path());
        writer.process(&pokemon_dataset()).unwrap();
        let path = writer.save("pokemon").unwrap();

        let mut book: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(book.sheet_names(), vec!["types", "moves"]);

        let range = book.worksheet_range("types").unwrap();
        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("squirtle".to_string()))
        );
        assert_eq!(
            range.get_value((0, 2)),
            Some(&Data::String("grass".to_string()))
        );
        assert_eq!(range.get_value((2, 2)), Some(&Data::Float(1.0)));
    }

    #[test]
    fn test_save_rejects_overlong_suffixed_name() {
        let long = "a".repeat(40);
        let dataset = TabularDataset::new()
            .with_sheet(long.clone(), SheetSpec::new(["x"]))
            .with_sheet(long.to_uppercase(), SheetSpec::new(["y"]));
        let dir = TempDir::new().unwrap();
        let mut writer = XlsxWriter::new(dir.path());
        writer.process(&dataset).unwrap();

        assert_eq!(writer.workbook().sheet_names()[1].chars().count(), 33);
        assert!(matches!(writer.save("long"), Err(Error::Xlsx(_))));
    }

    #[test]
    fn test_blank_and_quoted_names_still_save() {
        let dataset = TabularDataset::new()
            .with_sheet("", SheetSpec::new(["a"]).with_column("x", [1]))
            .with_sheet("'quoted'", SheetSpec::new(["a"]).with_column("x", [0]));
        let dir = TempDir::new().unwrap();
        let mut writer = XlsxWriter::new(dir.path());
        writer.process(&dataset).unwrap();

        let path = writer.save("names").unwrap();

        let book: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(book.sheet_names(), vec!["sheet", "_quoted_"]);
    }

    #[test]
    fn test_oversized_sheet_leaves_workbook_untouched() {
        let mut wide = SheetSpec::new(["a"]);
        for i in 0..65_534 {
            wide = wide.with_column(format!("c{i}"), [1]);
        }
        let dataset = TabularDataset::new()
            .with_sheet("ok", SheetSpec::new(["a"]))
            .with_sheet("wide", wide);
        let mut writer = XlsxWriter::new("/unused");

        let err = writer.process(&dataset).unwrap_err();

        assert!(matches!(err, Error::SheetTooLarge { ref sheet, .. } if sheet == "wide"));
        assert!(writer.workbook().is_empty());
    }
}
