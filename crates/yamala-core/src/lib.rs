//! yamala-core: Core library for storing YAML list attributes in Excel
//!
//! This library provides functionality to:
//! - Validate tabular datasets (sheets of row labels and columns)
//! - Lay out and style one sheet per dataset entry
//! - Write the resulting workbook as a `.xlsx` file
//! - Read YAML files and folders and reshape their list attributes into datasets

pub mod converter;
pub mod error;
pub mod grid;
pub mod layout;
pub mod naming;
pub mod reader;
pub mod scanner;
pub mod style;
pub mod table;
pub mod validator;
pub mod writer;

pub use converter::{build_dataset, Converter, InputSpec, SourceDocument};
pub use error::{Error, Result, STRUCTURE_ERROR_MESSAGE};
pub use grid::{Cell, CellRange, CellStyle, ConditionalFormat, HighlightRule, Sheet, Workbook};
pub use naming::{resolve_sheet_name, sanitize_file_name, workbook_file_name};
pub use reader::{Reader, YamlReader};
pub use scanner::{collect_files, scan_folders, ScanResult};
pub use style::TableStyle;
pub use table::{CellValue, SheetSpec, TabularDataset};
pub use validator::{parse_dataset_str, validate, validate_value};
pub use writer::{Writer, XlsxWriter};
