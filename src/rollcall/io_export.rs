// Writers for the result sheet.

use std::str::FromStr;

use roster_core::export::{
    EXPORT_COLUMN_WIDTH, EXPORT_FILE_NAME, EXPORT_HEADER, EXPORT_SHEET_NAME,
};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::rollcall::*;

const CSV_FILE_NAME: &str = "點名結果.csv";

/// Something that can store the rows of a result sheet.
pub trait TabularWriter {
    fn file_name(&self) -> &'static str;
    fn write_table(&self, table: &ExportTable, path: &Path) -> RollcallResult<()>;
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn writer(&self) -> Box<dyn TabularWriter> {
        match self {
            OutputFormat::Xlsx => Box::new(XlsxTabularWriter {}),
            OutputFormat::Csv => Box::new(CsvTabularWriter {}),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RollcallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            x => whatever!("Unknown output format {:?}: expected xlsx or csv", x),
        }
    }
}

pub struct XlsxTabularWriter {}

impl XlsxTabularWriter {
    pub fn build_workbook(table: &ExportTable) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(EXPORT_SHEET_NAME)?;
        for col in 0..EXPORT_HEADER.len() as u16 {
            worksheet.set_column_width(col, EXPORT_COLUMN_WIDTH)?;
        }
        for (r, row) in table.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate().filter(|(_, cell)| !cell.is_empty()) {
                worksheet.write_string(r as u32, c as u16, cell)?;
            }
        }
        Ok(workbook)
    }
}

impl TabularWriter for XlsxTabularWriter {
    fn file_name(&self) -> &'static str {
        EXPORT_FILE_NAME
    }

    fn write_table(&self, table: &ExportTable, path: &Path) -> RollcallResult<()> {
        let p = path.display().to_string();
        let mut workbook =
            XlsxTabularWriter::build_workbook(table).context(WritingXlsxSnafu { path: p.clone() })?;
        workbook.save(path).context(WritingXlsxSnafu { path: p })
    }
}

pub struct CsvTabularWriter {}

impl TabularWriter for CsvTabularWriter {
    fn file_name(&self) -> &'static str {
        CSV_FILE_NAME
    }

    fn write_table(&self, table: &ExportTable, path: &Path) -> RollcallResult<()> {
        let p = path.display().to_string();
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .context(WritingCsvSnafu { path: p.clone() })?;
        for row in table.rows() {
            wtr.write_record(&row)
                .context(WritingCsvSnafu { path: p.clone() })?;
        }
        wtr.flush()
            .map_err(csv::Error::from)
            .context(WritingCsvSnafu { path: p })
    }
}
