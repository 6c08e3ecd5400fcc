//! Shapes raw tabular rows into labeled records.
//!
//! The normalizer keeps two faces on every profile: unformatted numeric
//! fields for programmatic consumers and display strings for the
//! user-facing subset. The original header-to-value pairs stay available
//! untouched in a dedicated `raw` map.

use std::collections::BTreeMap;

use serde::Serialize;

use acsdash_api::{variables, RawTable};

use crate::geo::state_name;

/// Target share of total population, 0-100 with one decimal digit.
/// Exactly 0 when the whole is 0; never divides by zero.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    ((part as f64) / (whole as f64) * 1000.0).round() / 10.0
}

/// Display strings for the user-facing subset of a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDisplay {
    pub median_household_income: String,
    pub mexican_percentage: String,
    pub salvadoran_percentage: String,
}

/// A labeled single-unit record for detail views.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceProfile {
    pub name: String,
    pub state: String,
    pub total_population: i64,
    pub mexican_population: i64,
    pub mexican_percentage: f64,
    pub salvadoran_population: i64,
    pub salvadoran_percentage: f64,
    /// 0 when the API suppressed the estimate.
    pub median_household_income: i64,
    pub display: ProfileDisplay,
    /// Original header-to-value pairs, unprocessed.
    pub raw: BTreeMap<String, String>,
}

/// Builds a labeled profile from one table row.
///
/// Numeric fields parse leniently (unparsable reads as 0); the `state`
/// field is translated from the FIPS code when the row carries one, and
/// falls back to the trailing part of `NAME` otherwise (ZCTA rows have no
/// state column).
pub fn place_profile(table: &RawTable, row: usize) -> PlaceProfile {
    let name = table.cell(row, variables::NAME).unwrap_or_default();
    let total = table.count(row, variables::TOTAL_POPULATION);
    let mexican = table.count(row, variables::MEXICAN_POPULATION);
    let salvadoran = table.count(row, variables::SALVADORAN_POPULATION);
    let median_income = table.count(row, variables::MEDIAN_HOUSEHOLD_INCOME);

    let state = match table.cell(row, "state") {
        Some(code) if !code.is_empty() => state_name(code),
        _ => name
            .rsplit(',')
            .next()
            .filter(|_| name.contains(','))
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    };

    let mexican_pct = percentage(mexican, total);
    let salvadoran_pct = percentage(salvadoran, total);

    let mut raw = BTreeMap::new();
    if let Some(values) = table.rows().get(row) {
        for (header, value) in table.headers().iter().zip(values) {
            raw.insert(header.clone(), value.clone());
        }
    }

    PlaceProfile {
        name: display_name(name),
        state,
        total_population: total,
        mexican_population: mexican,
        mexican_percentage: mexican_pct,
        salvadoran_population: salvadoran,
        salvadoran_percentage: salvadoran_pct,
        median_household_income: median_income,
        display: ProfileDisplay {
            median_household_income: format_currency(median_income),
            mexican_percentage: format_percentage(mexican_pct),
            salvadoran_percentage: format_percentage(salvadoran_pct),
        },
        raw,
    }
}

/// The part of an API `NAME` before the state suffix.
fn display_name(full_name: &str) -> String {
    full_name
        .split(',')
        .next()
        .unwrap_or(full_name)
        .trim()
        .to_string()
}

/// `$55,000`, or `N/A` for suppressed estimates.
pub fn format_currency(amount: i64) -> String {
    if amount <= 0 {
        return "N/A".to_string();
    }
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

/// One-decimal percentage string, e.g. `12.3%`.
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RawTable {
        RawTable::parse(
            r#"[["NAME","B01003_001E","B03001_004E","B03001_014E","B19013_001E","state","place"],
                ["Test City, California","100000","50000","2500","55000","06","12345"]]"#,
        )
        .unwrap()
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(50000, 100000), 50.0);
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(12345, 0), 0.0);
    }

    #[test]
    fn percentage_bounds() {
        assert!(percentage(0, 100) >= 0.0);
        assert!(percentage(100, 100) <= 100.0);
        assert_eq!(percentage(100, 100), 100.0);
    }

    #[test]
    fn profile_carries_numeric_and_display_fields() {
        let profile = place_profile(&sample_table(), 0);
        assert_eq!(profile.name, "Test City");
        assert_eq!(profile.state, "California");
        assert_eq!(profile.total_population, 100_000);
        assert_eq!(profile.mexican_population, 50_000);
        assert_eq!(profile.mexican_percentage, 50.0);
        assert_eq!(profile.salvadoran_percentage, 2.5);
        assert_eq!(profile.median_household_income, 55_000);
        assert_eq!(profile.display.median_household_income, "$55,000");
        assert_eq!(profile.display.mexican_percentage, "50.0%");
    }

    #[test]
    fn profile_retains_raw_values() {
        let profile = place_profile(&sample_table(), 0);
        assert_eq!(
            profile.raw.get("NAME").map(String::as_str),
            Some("Test City, California")
        );
        assert_eq!(
            profile.raw.get("B19013_001E").map(String::as_str),
            Some("55000")
        );
        assert_eq!(profile.raw.get("state").map(String::as_str), Some("06"));
    }

    #[test]
    fn zcta_profile_without_state_column() {
        let table = RawTable::parse(
            r#"[["NAME","B01003_001E","B03001_004E","zip code tabulation area"],
                ["ZCTA5 90011","103892","71234","90011"]]"#,
        )
        .unwrap();
        let profile = place_profile(&table, 0);
        assert_eq!(profile.name, "ZCTA5 90011");
        assert_eq!(profile.state, "");
        assert_eq!(profile.mexican_population, 71_234);
    }

    #[test]
    fn suppressed_income_displays_na() {
        let table = RawTable::parse(
            r#"[["NAME","B19013_001E","state"],["Tiny Town, Texas","-666666666","48"]]"#,
        )
        .unwrap();
        let profile = place_profile(&table, 0);
        assert_eq!(profile.median_household_income, 0);
        assert_eq!(profile.display.median_household_income, "N/A");
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(1), "$1");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1,000");
        assert_eq!(format_currency(1234567), "$1,234,567");
        assert_eq!(format_currency(0), "N/A");
    }
}
