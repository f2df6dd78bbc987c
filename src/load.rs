use super::{Column, FlightTable, PlotError};
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use std::path::Path;

/// Load a flight log, dispatching by extension:
/// spreadsheets (xlsx, xlsm, xlsb, xls, ods) read the named sheet,
/// csv files are read whole and the sheet is ignored.
/// The first row holds the column names.
pub fn load_file(fin: &Path, sheet: &str) -> Result<FlightTable, PlotError> {
    let ext = fin
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_sheet(fin, sheet)?,
        "csv" => load_csv(fin)?,
        other => return Err(PlotError::UnsupportedFormat(other.to_string())),
    };
    info!(
        "read {} columns x {} rows from {}",
        table.columns.len(),
        table.n_rows(),
        fin.display()
    );
    Ok(table)
}

fn load_sheet(fin: &Path, sheet: &str) -> Result<FlightTable, PlotError> {
    let mut workbook = open_workbook_auto(fin)?;
    let sheets = workbook.sheet_names();
    if !sheets.iter().any(|s| s == sheet) {
        return Err(PlotError::SheetNotFound {
            sheet: sheet.to_string(),
            available: sheets,
        });
    }
    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(h) => h.iter().map(cell_name).collect(),
        None => return Err(PlotError::Empty(fin.to_path_buf())),
    };
    let records = rows.map(|r| r.iter().map(cell_value).collect::<Vec<f64>>());
    Ok(table_from_rows(header, records))
}

fn load_csv(fin: &Path) -> Result<FlightTable, PlotError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(fin)?;
    let header: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if header.is_empty() {
        return Err(PlotError::Empty(fin.to_path_buf()));
    }
    let mut records: Vec<Vec<f64>> = Vec::new();
    for r in reader.records() {
        let record = r?;
        records.push(record.iter().map(parse_value).collect());
    }
    Ok(table_from_rows(header, records.into_iter()))
}

fn cell_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// converts a cell to f64, NAN for anything that is not a number
fn cell_value(cell: &Data) -> f64 {
    let v = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.
            } else {
                0.
            }
        }
        Data::DateTime(dt) => dt.as_f64(),
        Data::String(s) => parse_value(s),
        _ => f64::NAN,
    };
    if v.is_finite() {
        v
    } else {
        f64::NAN
    }
}

fn parse_value(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

/// names every column uniquely (empty names become "Unnamed: i",
/// repeated names get a ".1", ".2", ... suffix)
fn unique_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (i, n) in raw.into_iter().enumerate() {
        let base = if n.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            n
        };
        let mut name = base.clone();
        let mut k = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, k);
            k += 1;
        }
        if name != base {
            debug!("renamed repeated column {} to {}", base, name);
        }
        names.push(name);
    }
    names
}

/// builds the columns from the rows, short rows are padded with NAN
/// and cells past the header are dropped
fn table_from_rows<I: Iterator<Item = Vec<f64>>>(header: Vec<String>, rows: I) -> FlightTable {
    let names = unique_names(header);
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (j, col) in values.iter_mut().enumerate() {
            col.push(row.get(j).copied().unwrap_or(f64::NAN));
        }
    }
    FlightTable::new(
        names
            .into_iter()
            .zip(values.into_iter())
            .map(|(n, v)| Column::new(n, v))
            .collect(),
    )
}
