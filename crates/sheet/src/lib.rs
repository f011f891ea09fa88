//! Tabular data model for decomchart
//!
//! Provides a small row-oriented table type used to load and reshape the
//! plant-tracker workbooks before they are turned into typed records.
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use decomchart_sheet::Sheet;
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Plant name", "Country/Area"],
//!     vec!["Neurath", "Germany"],
//!     vec!["Belchatow", "Poland"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 3);
//! assert_eq!(sheet.col_count(), 2);
//! ```
//!
//! ## Named column access
//!
//! ```
//! use decomchart_sheet::Sheet;
//!
//! let mut sheet = Sheet::from_data(vec![
//!     vec!["Country/Area", "Capacity (MW)"],
//!     vec!["Germany", "500"],
//! ]);
//!
//! sheet.name_columns_by_row(0).unwrap();
//! assert_eq!(sheet.get_by_name(1, "Country/Area").unwrap().as_str(), "Germany");
//! assert_eq!(sheet.get_by_name(1, "Capacity (MW)").unwrap().as_int(), Some(500));
//! ```
//!
//! ## Loading from files
//!
//! ```no_run
//! use decomchart_sheet::{Sheet, XlsxReadOptions};
//!
//! let units = Sheet::from_xlsx_sheet_with_options(
//!     "coal-tracker.xlsx",
//!     "Units",
//!     XlsxReadOptions::default().with_headers(true),
//! ).unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export XLSX read options.
pub use xlsx::XlsxReadOptions;
