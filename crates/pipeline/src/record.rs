use crate::error::PipelineError;
use decomchart_sheet::Sheet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two-way fuel split used by the retirement charts.
///
/// The source trackers carry a fuel subtype per unit (coal rank, gas vs oil);
/// that subtype is kept on the record but everything downstream of
/// normalization works on this split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelCategory {
    Coal,
    Gas,
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelCategory::Coal => write!(f, "Coal"),
            FuelCategory::Gas => write!(f, "Gas"),
        }
    }
}

impl FromStr for FuelCategory {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Coal" => Ok(FuelCategory::Coal),
            "Gas" => Ok(FuelCategory::Gas),
            _ => Err(PipelineError::UnknownCategory(s.to_string())),
        }
    }
}

/// One row per physical generating unit, unified across both trackers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub plant: String,
    pub unit: String,
    pub country: String,
    pub status: String,
    pub category: FuelCategory,
    /// Source fuel subtype ("Fuel" for gas units, "Coal type" for coal units).
    pub fuel: String,
    /// Combined-heat-and-power flag; gas units only.
    pub chp: Option<String>,
    pub capacity_mw: Option<f64>,
    pub conversion_from: Option<String>,
    pub conversion_to: Option<String>,
    pub start_year: Option<i32>,
    pub retired_year: Option<i32>,
    pub planned_retire: Option<i32>,
}

/// Flatten records back into a sheet with the unified column layout.
///
/// Used by the CLI `--export` option.
#[must_use]
pub fn records_to_sheet(records: &[UnitRecord]) -> Sheet {
    let mut sheet = Sheet::with_name("Normalized units");
    *sheet.data_mut() = std::iter::once(vec![
        "Plant name".into(),
        "Unit name".into(),
        "Country/Area".into(),
        "Status".into(),
        "Plant Type".into(),
        "Fuel".into(),
        "CHP".into(),
        "Capacity (MW)".into(),
        "Start year".into(),
        "Retired year".into(),
        "Planned retire".into(),
    ])
    .chain(records.iter().map(|r| {
        vec![
            r.plant.clone().into(),
            r.unit.clone().into(),
            r.country.clone().into(),
            r.status.clone().into(),
            r.category.to_string().into(),
            r.fuel.clone().into(),
            r.chp.clone().into(),
            r.capacity_mw.into(),
            r.start_year.into(),
            r.retired_year.into(),
            r.planned_retire.into(),
        ]
    }))
    .collect();

    // name_columns_by_row cannot fail here: the header row exists and is unique
    let _ = sheet.name_columns_by_row(0);
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        assert_eq!("Coal".parse::<FuelCategory>().unwrap(), FuelCategory::Coal);
        assert_eq!("Gas".parse::<FuelCategory>().unwrap(), FuelCategory::Gas);
        assert_eq!(FuelCategory::Coal.to_string(), "Coal");
        assert!("Lignite".parse::<FuelCategory>().is_err());
    }

    #[test]
    fn test_records_to_sheet() {
        let record = UnitRecord {
            plant: "Neurath".to_string(),
            unit: "F".to_string(),
            country: "Germany".to_string(),
            status: "operating".to_string(),
            category: FuelCategory::Coal,
            fuel: "lignite".to_string(),
            chp: None,
            capacity_mw: Some(1060.0),
            conversion_from: None,
            conversion_to: None,
            start_year: Some(2012),
            retired_year: None,
            planned_retire: Some(2037),
        };

        let sheet = records_to_sheet(&[record]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.get_by_name(1, "Plant Type").unwrap().as_str(), "Coal");
        assert_eq!(sheet.get_by_name(1, "Planned retire").unwrap().as_int(), Some(2037));
        assert!(sheet.get_by_name(1, "CHP").unwrap().is_null());
    }
}
