use super::readers::open_text_reader;
use crate::{
    constants::{PANEL_SHEET, PANEL_SYMBOL_COLUMN},
    error::VcfFrameError,
    utils::util::Result,
};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::{collections::HashSet, path::Path};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads the gene symbols of a panel, de-duplicated in first-seen order.
///
/// Spreadsheets are read from the `GeneList` sheet, delimited text files
/// (optionally gzipped) from their header row. Either way the symbols come
/// from the `GeneSymbol` column. Any failure is wrapped as a panel error.
pub fn load_panel<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    log::info!("Loading gene panel: {}", path.display());
    let symbols = if is_spreadsheet(path) {
        read_spreadsheet(path)
    } else {
        read_delimited(path)
    }
    .map_err(|e| VcfFrameError::panel_load(path, e))?;
    log::debug!("Panel {} lists {} genes", path.display(), symbols.len());
    Ok(symbols)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn read_spreadsheet(path: &Path) -> std::result::Result<Vec<String>, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range(PANEL_SHEET)
        .map_err(|e| format!("Worksheet '{PANEL_SHEET}': {e}"))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| format!("Worksheet '{PANEL_SHEET}' is empty"))?;
    let column = header
        .iter()
        .position(|cell| cell_text(cell).as_deref() == Some(PANEL_SYMBOL_COLUMN))
        .ok_or_else(missing_symbol_column)?;

    Ok(unique_symbols(
        rows.filter_map(|row| row.get(column).and_then(cell_text)),
    ))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string().trim().to_string()),
    }
}

fn read_delimited(path: &Path) -> std::result::Result<Vec<String>, String> {
    let name = path.to_string_lossy().to_lowercase();
    let name = name.trim_end_matches(".gz").trim_end_matches(".gzip");
    let delimiter = if name.ends_with(".csv") { b',' } else { b'\t' };

    let reader = open_text_reader(path).map_err(|e| e.to_string())?;
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);
    let column = csv_reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .position(|h| h.trim() == PANEL_SYMBOL_COLUMN)
        .ok_or_else(missing_symbol_column)?;

    let mut symbols = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if let Some(symbol) = record.get(column) {
            symbols.push(symbol.trim().to_string());
        }
    }
    Ok(unique_symbols(symbols))
}

fn missing_symbol_column() -> String {
    format!("No column named {PANEL_SYMBOL_COLUMN}")
}

fn unique_symbols(symbols: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
