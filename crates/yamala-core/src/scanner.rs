//! Discovery of input YAML files from file and folder arguments

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of expanding input arguments into files
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Paths given by the caller
    pub roots: Vec<PathBuf>,
    /// Files to read, in discovery order
    pub files: Vec<PathBuf>,
    /// Total number of files found
    pub total_files: usize,
}

impl ScanResult {
    fn new(roots: Vec<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            roots,
            total_files: files.len(),
            files,
        }
    }
}

/// Check if a path has a `.yaml` or `.yml` extension
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Take explicit file arguments as they are, checking they exist
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<ScanResult> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        files.push(path.to_path_buf());
    }

    Ok(ScanResult::new(files.clone(), files))
}

/// Find YAML files inside folders, descending into subfolders only when
/// `recursive` is set
pub fn scan_folders<P: AsRef<Path>>(roots: &[P], recursive: bool) -> Result<ScanResult> {
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_yaml_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    log::info!("found {} YAML file(s) in {} folder(s)", files.len(), roots.len());

    Ok(ScanResult::new(
        roots.iter().map(|r| r.as_ref().to_path_buf()).collect(),
        files,
    ))
}
