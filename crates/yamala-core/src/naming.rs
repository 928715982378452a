//! Sheet name resolution and file name sanitizing

use std::collections::HashSet;

/// Maximum sheet name length, in characters
pub const SHEET_NAME_MAX_LEN: usize = 31;

/// Characters a spreadsheet refuses in sheet names
pub const SHEET_NAME_FORBIDDEN: [char; 7] = ['\\', '/', '*', '[', ']', ':', '?'];

/// Characters replaced in output file names
pub const FILE_NAME_FORBIDDEN: [char; 19] = [
    '\n', '\r', '~', '"', '#', '%', '&', '*', ':', '<', '>', '?', '{', '|', '}', '/', '\\', '[',
    ']',
];

/// Extension forced onto every saved workbook
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Name given to sheets whose key leaves nothing after cleaning
pub const SHEET_NAME_FALLBACK: &str = "sheet";

const REPLACEMENT: char = '_';

/// Replace every forbidden sheet-name character with `_`
pub fn clean_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if SHEET_NAME_FORBIDDEN.contains(&c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Keep the last [`SHEET_NAME_MAX_LEN`] characters of `name`
pub fn truncate_sheet_name(name: &str) -> String {
    let len = name.chars().count();
    name.chars()
        .skip(len.saturating_sub(SHEET_NAME_MAX_LEN))
        .collect()
}

/// Produce a sheet name that is not yet in `used`, and register it.
///
/// The raw name is cleaned, cut down to its suffix, and lowercased, since
/// spreadsheet applications compare sheet names case-insensitively. A
/// leading or trailing apostrophe becomes `_` and an empty name becomes
/// [`SHEET_NAME_FALLBACK`]. On collision `_1`, `_2`, ... is appended to the
/// base until a free name turns up.
///
/// The suffix is added after truncation, so a suffixed name can be longer
/// than [`SHEET_NAME_MAX_LEN`]. Such a name is kept here, but the xlsx
/// encoder refuses it, so saving the workbook fails with `Error::Xlsx`
/// instead of writing an over-long sheet name.
pub fn resolve_sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let base = edge_apostrophes(&truncate_sheet_name(&clean_sheet_name(raw)).to_lowercase());
    let base = if base.is_empty() {
        SHEET_NAME_FALLBACK.to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut counter: usize = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}_{counter}").to_lowercase();
        counter += 1;
    }

    if candidate != raw {
        log::debug!("sheet name {raw:?} resolved to {candidate:?}");
    }

    used.insert(candidate.clone());
    candidate
}

fn edge_apostrophes(name: &str) -> String {
    let last = name.chars().count().saturating_sub(1);
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if c == '\'' && (i == 0 || i == last) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Replace characters that are unsafe in file names with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if FILE_NAME_FORBIDDEN.contains(&c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Sanitize `name` and append the workbook extension
pub fn workbook_file_name(name: &str) -> String {
    format!("{}.{}", sanitize_file_name(name), WORKBOOK_EXTENSION)
}
