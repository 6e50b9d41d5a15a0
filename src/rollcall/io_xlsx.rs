use std::io::Cursor;

use calamine::{DataType, Reader, Xlsx};

use crate::rollcall::*;

/// The cells of the first worksheet, row by row, one non-empty cell per line.
pub fn read_xlsx_text(path: &str, bytes: Vec<u8>) -> RollcallResult<String> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context(ParsingExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path })?
        .context(ParsingExcelSnafu { path })?;
    debug!("read_xlsx_text: {} {:?}", simplify_file_name(path), wrange.get_size());
    let cells: Vec<String> = wrange
        .rows()
        .flat_map(|row| row.iter())
        .filter_map(read_cell)
        .collect();
    Ok(cells.join("\n"))
}

fn read_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) | DataType::DateTime(f) => Some(format_number(*f)),
        DataType::Bool(b) => Some(b.to_string()),
        // Empty and error cells.
        _ => None,
    }
}

// Whole numbers are stored as floats, print them without a fractional part.
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_bytes(sheets: &[&[&[&str]]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        for rows in sheets {
            let worksheet = workbook.add_worksheet();
            for (r, row) in rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    if let Ok(n) = cell.parse::<f64>() {
                        worksheet.write_number(r as u32, c as u16, n).unwrap();
                    } else if !cell.is_empty() {
                        worksheet.write_string(r as u32, c as u16, *cell).unwrap();
                    }
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn first_sheet_row_by_row() {
        let bytes = xlsx_bytes(&[
            &[&["座號", "姓名"], &["1", "王小明"], &["2", ""], &["3", "李四,陳小華"]],
            &[&["張三"]],
        ]);
        let text = read_xlsx_text("class.xlsx", bytes).unwrap();
        assert_eq!(text, "座號\n姓名\n1\n王小明\n2\n3\n李四,陳小華");
        assert_eq!(
            extract_names(&text),
            vec!["座號", "姓名", "王小明", "李四", "陳小華"]
        );
    }

    #[test]
    fn not_a_workbook() {
        let err = read_xlsx_text("bad.xlsx", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, RollcallError::ParsingExcel { .. }));
        assert!(err.to_string().starts_with("無法解析 Excel 文件！"));
    }
}
