use anyhow::Result;
use serde::Serialize;
use tabled::{Table, Tabled};

use acsdash_lib::{GeographicUnit, LocationRecord, PlaceProfile};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Population")]
    population: i64,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "18-24")]
    age_18_to_24: String,
    #[tabled(rename = "Under $25k")]
    under_25k: String,
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "State Code")]
    state_code: String,
    #[tabled(rename = "Place")]
    place_id: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_location_rows(records: &[LocationRecord]) -> Vec<LocationRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| LocationRow {
            rank: i + 1,
            name: r.name.clone(),
            state: r.state.clone(),
            population: r.population,
            share: format!("{:.1}%", r.percentage),
            age_18_to_24: r
                .age_groups
                .as_ref()
                .map(|a| a.age_18_to_24.to_string())
                .unwrap_or_default(),
            under_25k: r
                .income_groups
                .as_ref()
                .map(|i| i.under_25k.to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_profile_rows(profile: &PlaceProfile) -> Vec<FieldRow> {
    let row = |field: &str, value: String| FieldRow {
        field: field.to_string(),
        value,
    };
    vec![
        row("Name", profile.name.clone()),
        row("State", profile.state.clone()),
        row("Total population", profile.total_population.to_string()),
        row("Mexican population", profile.mexican_population.to_string()),
        row("Mexican share", profile.display.mexican_percentage.clone()),
        row(
            "Salvadoran population",
            profile.salvadoran_population.to_string(),
        ),
        row(
            "Salvadoran share",
            profile.display.salvadoran_percentage.clone(),
        ),
        row(
            "Median household income",
            profile.display.median_household_income.clone(),
        ),
    ]
}

fn build_unit_rows(units: &[GeographicUnit]) -> Vec<UnitRow> {
    units
        .iter()
        .map(|u| UnitRow {
            name: u.name.clone(),
            state: u.state_name.clone(),
            state_code: u.state_code.clone(),
            place_id: u.place_id.clone(),
        })
        .collect()
}

// -- Output --

pub fn print_records_table(records: &[LocationRecord]) {
    println!("{}", Table::new(build_location_rows(records)));
}

pub fn print_profile_table(profile: &PlaceProfile) {
    println!("{}", Table::new(build_profile_rows(profile)));
}

pub fn print_units_table(units: &[GeographicUnit]) {
    println!("{}", Table::new(build_unit_rows(units)));
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use acsdash_lib::synthetic;

    fn sample_record() -> LocationRecord {
        LocationRecord {
            name: "El Paso".to_string(),
            state: "Texas".to_string(),
            state_code: Some("48".to_string()),
            place_id: Some("24000".to_string()),
            population: 550_000,
            percentage: 78.2,
            zip_code: String::new(),
            age_groups: Some(synthetic::age_from_population(700_000)),
            income_groups: Some(synthetic::income_from_median(48_000)),
            education_levels: Some(synthetic::education_from_population(700_000)),
        }
    }

    #[test]
    fn location_rows_are_ranked_and_formatted() {
        let rows = build_location_rows(&[sample_record(), sample_record()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[0].share, "78.2%");
        assert_eq!(rows[0].age_18_to_24, "105000");
    }

    #[test]
    fn location_rows_blank_missing_distributions() {
        let mut record = sample_record();
        record.age_groups = None;
        record.income_groups = None;
        let rows = build_location_rows(&[record]);
        assert_eq!(rows[0].age_18_to_24, "");
        assert_eq!(rows[0].under_25k, "");
    }
}
