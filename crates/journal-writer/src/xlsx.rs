use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use journal_config::OutputConfig;
use journal_core::{JournalEntry, JournalError, Result};

use crate::{COLUMNS, EntryWriter, entry_row};

/// Excel workbook writer.
///
/// rust_xlsxwriter cannot edit a file in place, so an existing workbook is read
/// back with calamine and rewritten in full with the new row appended. Only
/// cell values survive the rewrite; the journal sheet's header style and
/// column widths are re-applied.
pub struct XlsxWriter {
    path: PathBuf,
    sheet_name: String,
}

/// Rows of one worksheet, anchored at `origin` (row, col).
struct SheetData {
    name: String,
    origin: (u32, u32),
    rows: Vec<Vec<Data>>,
}

impl XlsxWriter {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(output.file_path(), output.sheet_name.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing(&self) -> Result<Vec<SheetData>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            JournalError::Writer(format!("cannot open {}: {e}", self.path.display()))
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| JournalError::Writer(format!("cannot read sheet '{name}': {e}")))?;
            let origin = range.start().unwrap_or((0, 0));
            let rows = range.rows().map(|row| row.to_vec()).collect();
            sheets.push(SheetData { name, origin, rows });
        }

        debug!(path = %self.path.display(), sheets = sheets.len(), "read existing workbook");
        Ok(sheets)
    }
}

impl EntryWriter for XlsxWriter {
    fn append(&self, entry: &JournalEntry) -> Result<PathBuf> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }

        let mut sheets = self.read_existing()?;
        match sheets.iter_mut().find(|s| s.name == self.sheet_name) {
            Some(sheet) if !sheet.rows.is_empty() => {}
            Some(sheet) => {
                sheet.origin = (0, 0);
                sheet.rows = vec![header_cells()];
            }
            None => sheets.push(SheetData {
                name: self.sheet_name.clone(),
                origin: (0, 0),
                rows: vec![header_cells()],
            }),
        }

        let mut workbook = Workbook::new();
        let mut appended_at = 0;
        for sheet in &sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(writer_err)?;
            write_cells(worksheet, sheet)?;

            if sheet.name == self.sheet_name {
                style_journal_sheet(worksheet, sheet)?;
                appended_at = next_row(sheet);
                for (col, value) in entry_row(entry).iter().enumerate() {
                    worksheet
                        .write_string(appended_at, col as u16, value)
                        .map_err(writer_err)?;
                }
            }
        }

        workbook.save(&self.path).map_err(writer_err)?;
        info!(path = %self.path.display(), sheet = %self.sheet_name, row = appended_at + 1, "journal entry saved");
        Ok(self.path.clone())
    }
}

fn header_cells() -> Vec<Data> {
    COLUMNS
        .iter()
        .map(|(title, _)| Data::String(title.to_string()))
        .collect()
}

fn writer_err(e: XlsxError) -> JournalError {
    JournalError::Writer(e.to_string())
}

fn write_cells(worksheet: &mut Worksheet, sheet: &SheetData) -> Result<()> {
    let (row0, col0) = sheet.origin;
    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = row0 + r as u32;
        for (c, cell) in row.iter().enumerate() {
            let col_num = (col0 as usize + c) as u16;
            match cell {
                Data::Empty => {}
                Data::Float(f) => {
                    worksheet.write_number(row_num, col_num, *f).map_err(writer_err)?;
                }
                Data::Int(i) => {
                    worksheet
                        .write_number(row_num, col_num, *i as f64)
                        .map_err(writer_err)?;
                }
                Data::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b).map_err(writer_err)?;
                }
                Data::String(s) => {
                    worksheet.write_string(row_num, col_num, s).map_err(writer_err)?;
                }
                other => {
                    worksheet
                        .write_string(row_num, col_num, other.to_string())
                        .map_err(writer_err)?;
                }
            }
        }
    }
    Ok(())
}

/// Bold, centred header row and fixed column widths.
fn style_journal_sheet(worksheet: &mut Worksheet, sheet: &SheetData) -> Result<()> {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(writer_err)?;
        if has_header_row(sheet) {
            worksheet
                .write_string_with_format(0, col as u16, *title, &header)
                .map_err(writer_err)?;
        }
    }
    Ok(())
}

fn has_header_row(sheet: &SheetData) -> bool {
    sheet.origin == (0, 0)
        && sheet.rows.first().is_some_and(|row| {
            row.len() >= COLUMNS.len()
                && row
                    .iter()
                    .zip(COLUMNS.iter())
                    .all(|(cell, (title, _))| matches!(cell, Data::String(s) if s == title))
        })
}

/// First empty row below the sheet's data.
fn next_row(sheet: &SheetData) -> u32 {
    if sheet.rows.is_empty() {
        0
    } else {
        sheet.origin.0 + sheet.rows.len() as u32
    }
}
