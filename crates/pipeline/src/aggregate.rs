use crate::record::{FuelCategory, UnitRecord};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Retirements before this year are history, not plans; the axis starts here.
pub const FIRST_RETIREMENT_YEAR: i32 = 2025;

/// Cumulative planned-retirement capacity per country, one series map per
/// fuel category, over a shared year axis.
///
/// Both maps carry every country in `countries` in the same (lexicographic)
/// order, including countries whose series is all zero in one category, so
/// the two charts share ordering and color assignment.
#[derive(Debug, Clone)]
pub struct RetirementOutlook {
    /// Contiguous year axis, `FIRST_RETIREMENT_YEAR..=max` observed year.
    pub years: Vec<i32>,
    /// Sorted union of countries with qualifying retirements in either category.
    pub countries: Vec<String>,
    /// Country -> cumulative GW retired, indexed by `years`.
    pub coal: IndexMap<String, Vec<f64>>,
    /// Country -> cumulative GW retired, indexed by `years`.
    pub gas: IndexMap<String, Vec<f64>>,
}

impl RetirementOutlook {
    /// Series map for one fuel category.
    #[must_use]
    pub fn series(&self, category: FuelCategory) -> &IndexMap<String, Vec<f64>> {
        match category {
            FuelCategory::Coal => &self.coal,
            FuelCategory::Gas => &self.gas,
        }
    }

    /// Total cumulative GW for a category: sum of each country's final value.
    #[must_use]
    pub fn total_gw(&self, category: FuelCategory) -> f64 {
        self.series(category)
            .values()
            .map(|series| series.last().copied().unwrap_or(0.0))
            .sum()
    }
}

/// Build the cumulative retirement outlook from normalized unit records.
///
/// Only records with a planned retirement year of `FIRST_RETIREMENT_YEAR` or
/// later contribute; capacity sums are in MW and each emitted value is the
/// running sum divided by 1000 (GW).
#[must_use]
pub fn aggregate(records: &[UnitRecord]) -> RetirementOutlook {
    // (category, country) -> year -> summed MW
    let mut buckets: BTreeMap<(FuelCategory, String), BTreeMap<i32, f64>> = BTreeMap::new();
    let mut countries: BTreeSet<String> = BTreeSet::new();
    let mut max_year = FIRST_RETIREMENT_YEAR;

    for record in records {
        let Some(year) = record.planned_retire else {
            continue;
        };
        if year < FIRST_RETIREMENT_YEAR {
            continue;
        }

        *buckets
            .entry((record.category, record.country.clone()))
            .or_default()
            .entry(year)
            .or_insert(0.0) += record.capacity_mw.unwrap_or(0.0);
        countries.insert(record.country.clone());
        max_year = max_year.max(year);
    }

    let years: Vec<i32> = (FIRST_RETIREMENT_YEAR..=max_year).collect();
    let countries: Vec<String> = countries.into_iter().collect();

    let coal = cumulative_series(FuelCategory::Coal, &buckets, &countries, &years);
    let gas = cumulative_series(FuelCategory::Gas, &buckets, &countries, &years);

    info!(
        countries = countries.len(),
        first_year = years.first().copied().unwrap_or(FIRST_RETIREMENT_YEAR),
        last_year = years.last().copied().unwrap_or(FIRST_RETIREMENT_YEAR),
        "aggregated retirement buckets"
    );

    RetirementOutlook {
        years,
        countries,
        coal,
        gas,
    }
}

/// Prefix-sum each country's yearly buckets along the shared axis, in GW.
fn cumulative_series(
    category: FuelCategory,
    buckets: &BTreeMap<(FuelCategory, String), BTreeMap<i32, f64>>,
    countries: &[String],
    years: &[i32],
) -> IndexMap<String, Vec<f64>> {
    countries
        .iter()
        .map(|country| {
            let by_year = buckets.get(&(category, country.clone()));
            let series: Vec<f64> = years
                .iter()
                .scan(0.0_f64, |running_mw, year| {
                    *running_mw += by_year
                        .and_then(|m| m.get(year))
                        .copied()
                        .unwrap_or(0.0);
                    Some(*running_mw / 1000.0)
                })
                .collect();
            (country.clone(), series)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coal_unit(country: &str, planned: Option<i32>, mw: f64) -> UnitRecord {
        UnitRecord {
            plant: "plant".to_string(),
            unit: "1".to_string(),
            country: country.to_string(),
            status: "operating".to_string(),
            category: FuelCategory::Coal,
            fuel: "lignite".to_string(),
            chp: None,
            capacity_mw: Some(mw),
            conversion_from: None,
            conversion_to: None,
            start_year: None,
            retired_year: None,
            planned_retire: planned,
        }
    }

    #[test]
    fn test_empty_records_degenerate_axis() {
        let outlook = aggregate(&[]);
        assert_eq!(outlook.years, vec![FIRST_RETIREMENT_YEAR]);
        assert!(outlook.countries.is_empty());
    }

    #[test]
    fn test_pre_2025_retirements_excluded() {
        let outlook = aggregate(&[coal_unit("Spain", Some(2024), 900.0)]);
        assert_eq!(outlook.years, vec![FIRST_RETIREMENT_YEAR]);
        assert!(outlook.countries.is_empty());
    }

    #[test]
    fn test_null_planned_retire_excluded() {
        let outlook = aggregate(&[coal_unit("Spain", None, 900.0)]);
        assert!(outlook.countries.is_empty());
    }

    #[test]
    fn test_cumulative_is_running_sum() {
        let outlook = aggregate(&[
            coal_unit("Poland", Some(2026), 1000.0),
            coal_unit("Poland", Some(2026), 500.0),
            coal_unit("Poland", Some(2028), 500.0),
        ]);

        assert_eq!(outlook.years, vec![2025, 2026, 2027, 2028]);
        let poland = &outlook.coal["Poland"];
        assert_eq!(poland, &vec![0.0, 1.5, 1.5, 2.0]);
    }

    #[test]
    fn test_missing_capacity_contributes_zero() {
        let mut unit = coal_unit("Poland", Some(2026), 0.0);
        unit.capacity_mw = None;
        let outlook = aggregate(&[unit]);

        // The year still stretches the axis even though the capacity is unknown
        assert_eq!(outlook.years, vec![2025, 2026]);
        assert_eq!(outlook.coal["Poland"], vec![0.0, 0.0]);
    }

    #[test]
    fn test_countries_shared_across_categories() {
        let mut gas_unit = coal_unit("France", Some(2027), 400.0);
        gas_unit.category = FuelCategory::Gas;
        let outlook = aggregate(&[gas_unit, coal_unit("Poland", Some(2026), 300.0)]);

        assert_eq!(outlook.countries, vec!["France", "Poland"]);
        // Both category maps carry both countries, in the same order
        let coal_keys: Vec<_> = outlook.coal.keys().collect();
        let gas_keys: Vec<_> = outlook.gas.keys().collect();
        assert_eq!(coal_keys, gas_keys);
        // France has no coal retirements: all-zero series, still present
        assert!(outlook.coal["France"].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_total_gw() {
        let outlook = aggregate(&[
            coal_unit("Poland", Some(2026), 1500.0),
            coal_unit("Spain", Some(2030), 500.0),
        ]);
        assert!((outlook.total_gw(FuelCategory::Coal) - 2.0).abs() < 1e-9);
        assert!((outlook.total_gw(FuelCategory::Gas)).abs() < 1e-9);
    }
}
