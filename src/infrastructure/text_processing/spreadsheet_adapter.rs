use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use calamine::{Reader, Xlsx, open_workbook_from_rs};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileKind, UploadedFile};

use super::blocking::{DEFAULT_EXTRACTION_TIMEOUT, run_blocking};

const COLUMN_SEPARATOR: &str = "  ";

/// Renders the first worksheet of an `.xlsx`, or a `.csv`, as an aligned
/// text table. The first row is treated as the header; no index column.
pub struct SpreadsheetAdapter {
    timeout: Duration,
}

impl Default for SpreadsheetAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn read_xlsx(data: &[u8]) -> Result<Vec<Vec<String>>, FileLoaderError> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to open workbook: {e}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| FileLoaderError::ExtractionFailed("workbook has no sheets".to_string()))?
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to read sheet: {e}")))?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect())
    }

    fn read_csv(data: &[u8]) -> Result<Vec<Vec<String>>, FileLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse CSV: {e}")))
            })
            .collect()
    }
}

/// Right-aligns every column to its widest cell.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    format!("{cell:>width$}")
                })
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl FileLoader for SpreadsheetAdapter {
    fn name(&self) -> &'static str {
        "spreadsheet_table"
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.name))]
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, FileLoaderError> {
        let kind = file.kind();
        let data = file.bytes.clone();
        let rows = match kind {
            Some(FileKind::Xlsx) => run_blocking(self.timeout, "XLSX", move || Self::read_xlsx(&data)).await?,
            Some(FileKind::Csv) => run_blocking(self.timeout, "CSV", move || Self::read_csv(&data)).await?,
            _ => return Err(FileLoaderError::UnsupportedContentType(file.name.clone())),
        };

        tracing::info!(row_count = rows.len(), "Spreadsheet extraction complete");

        let text = render_table(&rows);
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(file.name.clone()));
        }

        Ok(text)
    }
}
