use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use rust_xlsxwriter::Workbook;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Options for reading Excel files
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Whether the first row contains headers
    pub has_headers: bool,
}

impl XlsxReadOptions {
    /// Set whether the first row contains headers
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

fn xlsx_error(e: XlsxError) -> SheetError {
    SheetError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl Sheet {
    /// Load a specific sheet from an Excel workbook by name
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or the sheet is not found.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        Self::from_xlsx_sheet_with_options(path, sheet_name, XlsxReadOptions::default())
    }

    /// Load a specific sheet from an Excel workbook with options
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened, the sheet is not found, or the read fails.
    pub fn from_xlsx_sheet_with_options<P: AsRef<Path>>(
        path: P,
        sheet_name: &str,
        options: XlsxReadOptions,
    ) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(xlsx_error)?;

        if !workbook.sheet_names().iter().any(|n| n.as_str() == sheet_name) {
            return Err(SheetError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet_name).map_err(xlsx_error)?;

        let mut data: Vec<Vec<CellValue>> = Vec::new();
        for row in range.rows() {
            data.push(row.iter().map(data_to_cell_value).collect());
        }

        let mut sheet = Sheet::with_name(sheet_name);
        *sheet.data_mut() = data;

        if options.has_headers && sheet.row_count() > 0 {
            sheet.name_columns_by_row(0)?;
        }

        Ok(sheet)
    }

    /// Save the sheet to an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.set_name(self.name()).map_err(|e| {
            SheetError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                e.to_string(),
            ))
        })?;

        for (row_idx, row) in self.data().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let row_num = u32::try_from(row_idx).map_err(|_| {
                    SheetError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "Row index overflow",
                    ))
                })?;
                let col_num = u16::try_from(col_idx).map_err(|_| {
                    SheetError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "Column index overflow",
                    ))
                })?;

                let write_result = match cell {
                    CellValue::Null => continue,
                    CellValue::Bool(b) => worksheet.write_boolean(row_num, col_num, *b),
                    // Excel stores all numbers as f64, so integers > 2^53 may lose precision
                    CellValue::Int(i) => worksheet.write_number(row_num, col_num, *i as f64),
                    CellValue::Float(f) => worksheet.write_number(row_num, col_num, *f),
                    CellValue::String(s) => worksheet.write_string(row_num, col_num, s),
                };
                write_result.map_err(|e| {
                    SheetError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        e.to_string(),
                    ))
                })?;
            }
        }

        workbook.save(path.as_ref()).map_err(|e| {
            SheetError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                e.to_string(),
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("units.xlsx");

        let mut sheet = Sheet::from_data(vec![
            vec!["Country/Area", "Capacity (MW)", "Planned retire"],
            vec!["Germany", "500", ""],
            vec!["Poland", "300", "2030"],
        ]);
        sheet.set_name("Units");
        sheet.save_as_xlsx(&path).unwrap();

        let loaded = Sheet::from_xlsx_sheet_with_options(
            &path,
            "Units",
            XlsxReadOptions::default().with_headers(true),
        )
        .unwrap();

        assert_eq!(loaded.row_count(), 3);
        assert_eq!(loaded.get_by_name(1, "Country/Area").unwrap().as_str(), "Germany");
        assert_eq!(loaded.get_by_name(2, "Planned retire").unwrap().as_int(), Some(2030));
    }

    #[test]
    fn test_xlsx_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");

        let mut sheet = Sheet::new();
        *sheet.data_mut() = vec![vec![
            CellValue::String("text".to_string()),
            CellValue::Int(42),
            CellValue::Float(331.5),
            CellValue::Bool(true),
        ]];

        sheet.save_as_xlsx(&path).unwrap();

        let loaded = Sheet::from_xlsx_sheet(&path, "Sheet1").unwrap();

        assert!(matches!(loaded.get(0, 0).unwrap(), CellValue::String(s) if s == "text"));
        // Int becomes Float in Excel
        assert!(matches!(loaded.get(0, 1).unwrap(), CellValue::Float(f) if (*f - 42.0).abs() < 0.01));
        assert!(matches!(loaded.get(0, 2).unwrap(), CellValue::Float(f) if (*f - 331.5).abs() < 0.01));
        assert!(matches!(loaded.get(0, 3).unwrap(), CellValue::Bool(true)));
    }

    #[test]
    fn test_missing_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.xlsx");

        let mut sheet = Sheet::from_data(vec![vec!["a"]]);
        sheet.set_name("Units");
        sheet.save_as_xlsx(&path).unwrap();

        let result = Sheet::from_xlsx_sheet(&path, "Gas & Oil Units");
        assert!(matches!(result, Err(SheetError::SheetNotFound { .. })));
    }

}
