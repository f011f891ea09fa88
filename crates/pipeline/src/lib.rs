//! Normalization and aggregation pipeline for decomchart
//!
//! Turns the two raw plant-tracker tables (fossil gas/oil units and coal
//! units) into a unified set of typed unit records, then into per-country
//! cumulative planned-retirement series suitable for stacked-area charting.
//!
//! ```
//! use decomchart_pipeline::{aggregate, normalize};
//! use decomchart_sheet::Sheet;
//!
//! # fn load() -> (Sheet, Sheet) { unimplemented!() }
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let (gas, coal) = load();
//! let records = normalize(gas, coal)?;
//! let outlook = aggregate(&records);
//! println!("{} countries", outlook.countries.len());
//! # Ok(()) }
//! ```

mod aggregate;
mod error;
mod normalize;
mod record;

pub use aggregate::{aggregate, RetirementOutlook, FIRST_RETIREMENT_YEAR};
pub use error::{PipelineError, PipelineResult};
pub use normalize::{normalize, EUROPEAN_COUNTRIES, GERMAN_COAL_PHASE_OUT_YEAR};
pub use record::{records_to_sheet, FuelCategory, UnitRecord};
