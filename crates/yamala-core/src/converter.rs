//! Reshaping of YAML documents into a dataset and the end-to-end pipeline
//!
//! Every list-valued top-level attribute becomes a sheet. Each document is a
//! row, each distinct list item a column, and a cell holds 1 when the
//! document lists that item and 0 otherwise.

use crate::error::Result;
use crate::reader::{Reader, YamlReader};
use crate::scanner::{collect_files, scan_folders, ScanResult};
use crate::table::{CellValue, SheetSpec, TabularDataset};
use crate::writer::{Writer, XlsxWriter};
use indexmap::{IndexMap, IndexSet};
use serde_yaml::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Key whose scalar value labels a document's row
pub const LABEL_KEY: &str = "name";

/// Where the input files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Explicit file paths
    Files(Vec<PathBuf>),
    /// Folders to search for YAML files
    Folders { paths: Vec<PathBuf>, recursive: bool },
}

/// A decoded document together with its row label
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub label: CellValue,
    pub value: Value,
}

impl SourceDocument {
    /// Label the documents of one file: the `name` entry when it is a
    /// scalar, else the file stem, indexed when the file holds several
    /// documents
    pub fn from_file(path: &Path, documents: Vec<Value>) -> Vec<Self> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let indexed = documents.len() > 1;

        documents
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let label = value
                    .get(LABEL_KEY)
                    .and_then(CellValue::from_yaml)
                    .filter(|label| !label.is_empty())
                    .unwrap_or_else(|| {
                        if indexed {
                            CellValue::String(format!("{stem}[{i}]"))
                        } else {
                            CellValue::String(stem.clone())
                        }
                    });
                SourceDocument { label, value }
            })
            .collect()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    CellValue::from_yaml(value)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string_value())
}

/// Build the dataset of list-like attributes across `documents`.
///
/// Non-mapping documents are skipped. Sheets and columns appear in the
/// order they are first seen; non-scalar list items are ignored.
pub fn build_dataset(documents: &[SourceDocument]) -> TabularDataset {
    let mut labels = Vec::new();
    let mut memberships: Vec<HashMap<String, HashSet<String>>> = Vec::new();
    let mut attributes: IndexMap<String, IndexSet<String>> = IndexMap::new();

    for doc in documents {
        let Some(mapping) = doc.value.as_mapping() else {
            log::warn!("skipping document {} that is not a mapping", doc.label);
            continue;
        };

        let mut lists = HashMap::new();
        for (key, value) in mapping {
            let (Some(attribute), Some(items)) = (scalar_text(key), value.as_sequence()) else {
                continue;
            };

            let columns = attributes.entry(attribute.clone()).or_default();
            let mut listed = HashSet::new();
            for item in items {
                match scalar_text(item) {
                    Some(text) => {
                        columns.insert(text.clone());
                        listed.insert(text);
                    }
                    None => {
                        log::debug!("ignoring non-scalar item in {attribute:?} of {}", doc.label)
                    }
                }
            }
            lists.insert(attribute, listed);
        }

        labels.push(doc.label.clone());
        memberships.push(lists);
    }

    attributes
        .into_iter()
        .map(|(attribute, items)| {
            let mut sheet = SheetSpec::new(labels.iter().cloned());
            for item in items {
                let values: Vec<CellValue> = memberships
                    .iter()
                    .map(|lists| {
                        let listed = lists
                            .get(&attribute)
                            .is_some_and(|listed| listed.contains(&item));
                        CellValue::Integer(i64::from(listed))
                    })
                    .collect();
                sheet = sheet.with_column(item, values);
            }
            (attribute, sheet)
        })
        .collect()
}

/// Read YAML files, reshape them, and write one workbook
#[derive(Debug)]
pub struct Converter {
    scan: ScanResult,
    name: String,
    reader: YamlReader,
    writer: XlsxWriter,
    documents: Vec<SourceDocument>,
    dataset: TabularDataset,
    processed_files: usize,
}

impl Converter {
    /// Resolve the input files and prepare a writer for `destination`.
    ///
    /// Fails with `Error::NotFound` if any input is missing.
    pub fn new(
        input: &InputSpec,
        destination: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let scan = match input {
            InputSpec::Files(paths) => collect_files(paths)?,
            InputSpec::Folders { paths, recursive } => scan_folders(paths, *recursive)?,
        };

        Ok(Self {
            scan,
            name: name.into(),
            reader: YamlReader::new(),
            writer: XlsxWriter::new(destination),
            documents: Vec::new(),
            dataset: TabularDataset::new(),
            processed_files: 0,
        })
    }

    /// Files that will be read
    pub fn files(&self) -> &[PathBuf] {
        &self.scan.files
    }

    /// Number of files read so far
    pub fn processed_files(&self) -> usize {
        self.processed_files
    }

    /// Documents loaded so far
    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    /// Dataset produced by [`Converter::transform`]
    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    /// The underlying writer
    pub fn writer(&self) -> &XlsxWriter {
        &self.writer
    }

    /// Load every input file
    pub fn read(&mut self) -> Result<()> {
        for path in &self.scan.files {
            let documents = self.reader.load(path)?;
            self.documents
                .extend(SourceDocument::from_file(path, documents));
            self.processed_files += 1;
        }
        log::info!(
            "read {} document(s) from {} file(s)",
            self.documents.len(),
            self.processed_files
        );
        Ok(())
    }

    /// Reshape the loaded documents into a dataset
    pub fn transform(&mut self) -> Result<()> {
        self.dataset = build_dataset(&self.documents);
        log::info!("built {} sheet(s)", self.dataset.len());
        Ok(())
    }

    /// Build the workbook from the dataset and save it
    pub fn write(&mut self) -> Result<PathBuf> {
        self.writer.process(&self.dataset)?;
        self.writer.save(&self.name)
    }

    /// Run read, transform and write in order
    pub fn execute(&mut self) -> Result<PathBuf> {
        self.read()?;
        self.transform()?;
        self.write()
    }
}
