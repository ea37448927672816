use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::cell::{CellValue, is_valid_identifier};

/// File inspected when no path is given, relative to the working directory.
pub const DEFAULT_INPUT: &str = "Insumo/backlog 06 agosto.xlsx";

/// Columns inspected per row.
pub const MAX_COLUMNS: usize = 13;

const RULE: &str = "==================================================";

/// Result of one inspection. `row_flags` come from the per-row pass, `valid_rows` from the final tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionSummary {
    pub sheet_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub inspected_columns: usize,
    pub row_flags: Vec<(usize, bool)>,
    pub valid_rows: usize,
    pub invalid_rows: Vec<usize>,
}

impl InspectionSummary {
    /// Data rows, header excluded.
    pub fn data_rows(&self) -> usize {
        self.row_count.saturating_sub(1)
    }
}

struct Sheet {
    name: String,
    range: Range<Data>,
    row_count: usize,
    column_count: usize,
}

impl Sheet {
    // 1-based, anchored at A1 regardless of where the range starts
    fn cell(&self, row: usize, col: usize) -> CellValue {
        let pos = ((row - 1) as u32, (col - 1) as u32);
        CellValue::from_data(self.range.get_value(pos))
    }
}

fn open_first_sheet(path: &Path) -> Result<Sheet> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("cannot open file: {}", path.display()))?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("cannot read sheet: {name}"))?;

    let (row_count, column_count) = match range.end() {
        Some((row, col)) => (row as usize + 1, col as usize + 1),
        None => (0, 0),
    };
    info!(sheet = %name, row_count, column_count, "opened sheet");

    Ok(Sheet {
        name,
        range,
        row_count,
        column_count,
    })
}

/// Opens the first sheet of the workbook and writes the row diagnostics to `out`.
///
/// The banner is written before the file is opened, so it survives a failure.
pub fn write_report<W: Write>(path: &Path, out: &mut W) -> Result<InspectionSummary> {
    writeln!(out, "SPREADSHEET ROW INSPECTION")?;
    writeln!(out, "{RULE}")?;

    let sheet = open_first_sheet(path)?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    writeln!(out, "File: {file_name}")?;
    writeln!(out, "Active sheet: {}", sheet.name)?;
    writeln!(
        out,
        "Dimensions: {} rows x {} columns",
        sheet.row_count, sheet.column_count
    )?;
    writeln!(out)?;

    let inspected_columns = sheet.column_count.min(MAX_COLUMNS);
    let mut row_flags = Vec::new();

    for row in 1..=sheet.row_count {
        writeln!(out, "ROW {row}:")?;
        for col in 1..=inspected_columns {
            let marker = if col == 1 { "  *" } else { "   " };
            writeln!(out, "{marker} Col {col:2}: {}", sheet.cell(row, col).describe())?;
        }

        // row 1 is the header
        if row >= 2 {
            let id = sheet.cell(row, 1);
            let valid = is_valid_identifier(&id);
            let verdict = if valid { "VALID" } else { "INVALID" };
            writeln!(
                out,
                "  ID check: {verdict} - processed ID: '{}'",
                id.identifier_text()
            )?;
            debug!(row, valid, "checked identifier");
            row_flags.push((row, valid));
        }
        writeln!(out)?;
    }

    // tally recomputes validity on its own
    let (valid, invalid_rows): (Vec<usize>, Vec<usize>) =
        (2..=sheet.row_count).partition(|&row| is_valid_identifier(&sheet.cell(row, 1)));
    let valid_rows = valid.len();

    writeln!(out, "VALIDATION SUMMARY:")?;
    writeln!(
        out,
        "Valid rows found: {valid_rows}/{}",
        sheet.row_count.saturating_sub(1)
    )?;
    writeln!(out, "Rows that should be imported: {valid_rows}")?;
    if !invalid_rows.is_empty() {
        let list: Vec<String> = invalid_rows.iter().map(|r| r.to_string()).collect();
        writeln!(out, "Invalid rows: {}", list.join(", "))?;
    }
    info!(valid_rows, invalid = invalid_rows.len(), "inspection finished");

    Ok(InspectionSummary {
        sheet_name: sheet.name,
        row_count: sheet.row_count,
        column_count: sheet.column_count,
        inspected_columns,
        row_flags,
        valid_rows,
        invalid_rows,
    })
}

pub fn run(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<()> {
    let mut args = args.into_iter();
    let _exe = args.next();

    let input_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&input_path, &mut out)?;
    out.flush()?;
    Ok(())
}
