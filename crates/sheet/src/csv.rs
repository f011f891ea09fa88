use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// CSV reader options
#[derive(Debug, Clone, Default)]
pub struct CsvOptions {
    /// Whether the first row contains headers
    pub has_headers: bool,
}

impl CsvOptions {
    /// Set whether the first row contains headers
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Self::from_csv_reader(reader, options)
    }

    /// Load a sheet from a reader
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false) // We handle headers ourselves
            .from_reader(reader);

        let mut data: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record.iter().map(CellValue::parse).collect();
            data.push(row);
        }

        let mut sheet = Sheet::with_name("Sheet1");
        *sheet.data_mut() = data;

        if options.has_headers && sheet.row_count() > 0 {
            sheet.name_columns_by_row(0)?;
        }

        Ok(sheet)
    }

    /// Save the sheet to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.write_csv(writer)
    }

    /// Write the sheet to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

        for row in self.rows() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_reader_with_headers() {
        let csv = "Country/Area,Capacity (MW),Planned retire\n\
                   Germany,500,\n\
                   Poland,300,2030\n";

        let sheet = Sheet::from_csv_reader(
            csv.as_bytes(),
            CsvOptions::default().with_headers(true),
        )
        .unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.get_by_name(1, "Country/Area").unwrap().as_str(), "Germany");
        // Type inference: numbers become ints, empty cells become null
        assert_eq!(sheet.get_by_name(2, "Planned retire").unwrap().as_int(), Some(2030));
        assert!(sheet.get_by_name(1, "Planned retire").unwrap().is_null());
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.csv");

        let sheet = Sheet::from_data(vec![
            vec!["Country/Area", "Capacity (MW)"],
            vec!["France", "1200"],
        ]);
        sheet.save_as_csv(&path).unwrap();

        let loaded = Sheet::from_csv(&path).unwrap();
        assert_eq!(loaded.row_count(), 2);
        assert_eq!(loaded.get(1, 1).unwrap().as_int(), Some(1200));
    }
}
