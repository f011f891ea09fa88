//! Deterministic country -> color assignment.
//!
//! Colors are evenly spaced samples from a fixed 12-color qualitative
//! palette. The assignment is a pure function of the sorted country list and
//! is recomputed each run; both charts receive the same mapping.

use indexmap::IndexMap;

/// Qualitative palette (ColorBrewer Set3).
const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Assign one palette color per country, preserving the input order.
#[must_use]
pub fn assign_colors(countries: &[String]) -> IndexMap<String, String> {
    let n = countries.len();
    countries
        .iter()
        .enumerate()
        .map(|(i, country)| {
            let fraction = if n <= 1 {
                0.0
            } else {
                i as f64 / (n - 1) as f64
            };
            let index = ((fraction * SET3.len() as f64) as usize).min(SET3.len() - 1);
            (country.clone(), SET3[index].to_string())
        })
        .collect()
}
