use crate::error::{PipelineError, PipelineResult};
use crate::record::{FuelCategory, UnitRecord};
use decomchart_sheet::{CellValue, Sheet};
use tracing::{debug, info};

/// European countries covered by the retirement charts.
///
/// "Czech Republic" and "Czechia" both appear because the trackers have used
/// both spellings across releases.
pub const EUROPEAN_COUNTRIES: [&str; 17] = [
    "Austria",
    "Belgium",
    "Czech Republic",
    "Czechia",
    "Denmark",
    "France",
    "Germany",
    "Ireland",
    "Luxembourg",
    "Netherlands",
    "Norway",
    "Poland",
    "Portugal",
    "Spain",
    "Sweden",
    "Switzerland",
    "United Kingdom",
];

/// Germany's legislated coal phase-out deadline, applied to operating German
/// coal units that have no recorded retirement plan.
pub const GERMAN_COAL_PHASE_OUT_YEAR: i32 = 2037;

/// Coal-tracker headers renamed to the gas-tracker schema.
const COAL_RENAMES: [(&str, &str); 3] = [
    ("Plant Name", "Plant name"),
    ("Planned retirement", "Planned retire"),
    ("Coal type", "Fuel"),
];

/// Columns every input table must carry (post-rename).
const REQUIRED_COLUMNS: [&str; 9] = [
    "Plant name",
    "Unit name",
    "Country/Area",
    "Status",
    "Fuel",
    "Capacity (MW)",
    "Start year",
    "Retired year",
    "Planned retire",
];

/// Columns retained when present (CHP and conversion fuels exist only in
/// some trackers).
const OPTIONAL_COLUMNS: [&str; 3] = [
    "CHP",
    "Conversion from/replacement of (fuel)",
    "Conversion to (fuel)",
];

/// Produce the unified unit-record table from the two raw tracker sheets.
///
/// Reconciles the coal schema to the gas schema, restricts both tables to the
/// European allow-list, and applies the German coal phase-out default. Rows
/// with an unrecognized country are dropped silently; missing capacity or
/// year cells propagate as `None`.
pub fn normalize(gas: Sheet, coal: Sheet) -> PipelineResult<Vec<UnitRecord>> {
    let gas = prepare(gas, "gas")?;
    let mut coal = coal;
    for (from, to) in COAL_RENAMES {
        if coal.has_column(from) {
            coal.rename_column(from, to)?;
        }
    }
    let coal = prepare(coal, "coal")?;

    let mut records = table_records(&gas, FuelCategory::Gas);
    records.extend(table_records(&coal, FuelCategory::Coal));

    info!(
        gas_rows = gas.row_count().saturating_sub(gas.header_rows()),
        coal_rows = coal.row_count().saturating_sub(coal.header_rows()),
        unified = records.len(),
        "normalized tracker tables"
    );
    Ok(records)
}

/// Check required headers and trim the table to the unified column subset.
fn prepare(mut sheet: Sheet, table: &str) -> PipelineResult<Sheet> {
    for column in REQUIRED_COLUMNS {
        if !sheet.has_column(column) {
            return Err(PipelineError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    let keep: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .chain(OPTIONAL_COLUMNS.into_iter().filter(|c| sheet.has_column(c)))
        .collect();
    sheet.select_columns(&keep)?;
    Ok(sheet)
}

/// Convert one prepared table into typed records, filtered to the allow-list.
fn table_records(sheet: &Sheet, category: FuelCategory) -> Vec<UnitRecord> {
    let has_chp = sheet.has_column("CHP");
    let has_conversion_from = sheet.has_column("Conversion from/replacement of (fuel)");
    let has_conversion_to = sheet.has_column("Conversion to (fuel)");

    let mut records = Vec::new();
    let mut dropped = 0usize;
    let mut defaulted = 0usize;

    for row in sheet.header_rows()..sheet.row_count() {
        // Columns were validated in prepare(); per-row lookups cannot miss
        let field = |name: &str| -> CellValue {
            sheet.get_by_name(row, name).ok().cloned().unwrap_or(CellValue::Null)
        };

        let country = field("Country/Area").as_str();
        if !EUROPEAN_COUNTRIES.contains(&country.as_str()) {
            dropped += 1;
            continue;
        }

        let status = field("Status").as_str();
        let mut planned_retire = opt_year(&field("Planned retire"));

        // Business rule: operating German coal units with no recorded plan
        // retire at the phase-out deadline. An explicit year always wins.
        if category == FuelCategory::Coal
            && planned_retire.is_none()
            && country == "Germany"
            && status == "operating"
        {
            planned_retire = Some(GERMAN_COAL_PHASE_OUT_YEAR);
            defaulted += 1;
        }

        records.push(UnitRecord {
            plant: field("Plant name").as_str(),
            unit: field("Unit name").as_str(),
            country,
            status,
            category,
            fuel: field("Fuel").as_str(),
            chp: has_chp.then(|| opt_string(&field("CHP"))).flatten(),
            capacity_mw: field("Capacity (MW)").as_float(),
            conversion_from: has_conversion_from
                .then(|| opt_string(&field("Conversion from/replacement of (fuel)")))
                .flatten(),
            conversion_to: has_conversion_to
                .then(|| opt_string(&field("Conversion to (fuel)")))
                .flatten(),
            start_year: opt_year(&field("Start year")),
            retired_year: opt_year(&field("Retired year")),
            planned_retire,
        });
    }

    debug!(
        category = %category,
        kept = records.len(),
        dropped_non_european = dropped,
        phase_out_defaults = defaulted,
        "typed tracker rows"
    );
    records
}

fn opt_string(cell: &CellValue) -> Option<String> {
    let s = cell.as_str();
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn opt_year(cell: &CellValue) -> Option<i32> {
    cell.as_int().map(|y| y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas_sheet(rows: Vec<Vec<&str>>) -> Sheet {
        let mut data = vec![vec![
            "Plant name",
            "Unit name",
            "Country/Area",
            "Status",
            "Fuel",
            "CHP",
            "Capacity (MW)",
            "Start year",
            "Retired year",
            "Planned retire",
        ]];
        data.extend(rows);
        let mut sheet = Sheet::from_data(data);
        sheet.name_columns_by_row(0).unwrap();
        sheet
    }

    fn coal_sheet(rows: Vec<Vec<&str>>) -> Sheet {
        let mut data = vec![vec![
            "Plant Name",
            "Unit name",
            "Country/Area",
            "Status",
            "Coal type",
            "Capacity (MW)",
            "Start year",
            "Retired year",
            "Planned retirement",
        ]];
        data.extend(rows);
        let mut sheet = Sheet::from_data(data);
        sheet.name_columns_by_row(0).unwrap();
        sheet
    }

    #[test]
    fn test_coal_columns_reconciled() {
        let coal = coal_sheet(vec![vec![
            "Belchatow", "1", "Poland", "operating", "lignite", "370", "1982", "", "2036",
        ]]);
        let records = normalize(gas_sheet(vec![]), coal).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.plant, "Belchatow");
        assert_eq!(r.category, FuelCategory::Coal);
        assert_eq!(r.fuel, "lignite");
        assert_eq!(r.planned_retire, Some(2036));
        assert_eq!(r.chp, None); // coal tracker has no CHP column
    }

    #[test]
    fn test_country_allow_list() {
        let gas = gas_sheet(vec![
            vec!["A", "1", "Italy", "operating", "fossil gas", "", "400", "", "", "2030"],
            vec!["B", "1", "Spain", "operating", "fossil gas", "", "400", "", "", "2030"],
            vec!["C", "1", "", "operating", "fossil gas", "", "400", "", "", "2030"],
        ]);
        let records = normalize(gas, coal_sheet(vec![])).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "Spain");
    }

    #[test]
    fn test_german_coal_default_applies() {
        let coal = coal_sheet(vec![vec![
            "Neurath", "F", "Germany", "operating", "lignite", "1060", "2012", "", "",
        ]]);
        let records = normalize(gas_sheet(vec![]), coal).unwrap();
        assert_eq!(records[0].planned_retire, Some(GERMAN_COAL_PHASE_OUT_YEAR));
    }

    #[test]
    fn test_german_coal_default_never_overrides() {
        let coal = coal_sheet(vec![vec![
            "Jaenschwalde", "A", "Germany", "operating", "lignite", "465", "1981", "", "2028",
        ]]);
        let records = normalize(gas_sheet(vec![]), coal).unwrap();
        assert_eq!(records[0].planned_retire, Some(2028));
    }

    #[test]
    fn test_german_coal_default_requires_operating() {
        let coal = coal_sheet(vec![vec![
            "Moorburg", "A", "Germany", "mothballed", "bituminous", "827", "2015", "", "",
        ]]);
        let records = normalize(gas_sheet(vec![]), coal).unwrap();
        assert_eq!(records[0].planned_retire, None);
    }

    #[test]
    fn test_german_default_not_for_other_countries() {
        let coal = coal_sheet(vec![vec![
            "Opole", "5", "Poland", "operating", "bituminous", "905", "2019", "", "",
        ]]);
        let records = normalize(gas_sheet(vec![]), coal).unwrap();
        assert_eq!(records[0].planned_retire, None);
    }

    #[test]
    fn test_german_default_not_for_gas() {
        let gas = gas_sheet(vec![vec![
            "Irsching", "4", "Germany", "operating", "fossil gas", "", "569", "2011", "", "",
        ]]);
        let records = normalize(gas, coal_sheet(vec![])).unwrap();
        assert_eq!(records[0].planned_retire, None);
    }

    #[test]
    fn test_missing_values_propagate() {
        let gas = gas_sheet(vec![vec![
            "Peaker", "1", "France", "operating", "fossil gas", "", "", "", "", "not a year",
        ]]);
        let records = normalize(gas, coal_sheet(vec![])).unwrap();
        assert_eq!(records[0].capacity_mw, None);
        assert_eq!(records[0].planned_retire, None);
    }

    #[test]
    fn test_missing_required_column() {
        let mut sheet = Sheet::from_data(vec![vec!["Plant name", "Unit name"]]);
        sheet.name_columns_by_row(0).unwrap();
        let err = normalize(sheet, coal_sheet(vec![]));
        assert!(matches!(err, Err(PipelineError::MissingColumn { .. })));
    }
}
