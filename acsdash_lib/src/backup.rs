//! Last-resort static dataset.
//!
//! Served only when live acquisition produces zero usable records, so the
//! dashboard still renders instead of erroring. Values are hand-curated
//! approximations of well-known concentrations; recognizably a sample
//! set, not live data. No network access, no failure mode.

use crate::types::{
    AgeDistribution, EducationDistribution, Ethnicity, IncomeDistribution, LocationRecord,
};

/// The static dataset for one population group.
pub fn dataset(ethnicity: Ethnicity) -> Vec<LocationRecord> {
    match ethnicity {
        Ethnicity::Mexican => mexican_dataset(),
        Ethnicity::Salvadoran => salvadoran_dataset(),
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    name: &str,
    state: &str,
    state_code: &str,
    place_id: &str,
    zip_code: &str,
    population: i64,
    percentage: f64,
    age: AgeDistribution,
    income: IncomeDistribution,
    education: EducationDistribution,
) -> LocationRecord {
    LocationRecord {
        name: name.to_string(),
        state: state.to_string(),
        state_code: Some(state_code.to_string()),
        place_id: Some(place_id.to_string()),
        population,
        percentage,
        zip_code: zip_code.to_string(),
        age_groups: Some(age),
        income_groups: Some(income),
        education_levels: Some(education),
    }
}

fn mexican_dataset() -> Vec<LocationRecord> {
    vec![
        record(
            "East Los Angeles",
            "California",
            "06",
            "20802",
            "90022",
            113_000,
            95.8,
            AgeDistribution {
                under_18: 30_200,
                age_18_to_24: 13_100,
                age_25_to_34: 18_400,
                age_35_to_44: 16_900,
                age_45_to_54: 13_600,
                age_55_to_64: 11_300,
                age_65_plus: 9_500,
            },
            IncomeDistribution {
                under_25k: 31_500,
                income_25k_to_50k: 35_800,
                income_50k_to_75k: 24_100,
                income_75k_to_100k: 12_900,
                income_100k_plus: 8_700,
            },
            EducationDistribution {
                less_high_school: 34_200,
                high_school: 29_800,
                some_college: 19_100,
                bachelors: 8_400,
                graduate: 2_500,
            },
        ),
        record(
            "El Paso",
            "Texas",
            "48",
            "24000",
            "79901",
            550_000,
            78.2,
            AgeDistribution {
                under_18: 148_000,
                age_18_to_24: 79_000,
                age_25_to_34: 104_000,
                age_35_to_44: 81_000,
                age_45_to_54: 56_000,
                age_55_to_64: 44_000,
                age_65_plus: 38_000,
            },
            IncomeDistribution {
                under_25k: 141_000,
                income_25k_to_50k: 172_000,
                income_50k_to_75k: 128_000,
                income_75k_to_100k: 64_000,
                income_100k_plus: 45_000,
            },
            EducationDistribution {
                less_high_school: 132_000,
                high_school: 148_000,
                some_college: 136_000,
                bachelors: 97_000,
                graduate: 37_000,
            },
        ),
        record(
            "Laredo",
            "Texas",
            "48",
            "41464",
            "78040",
            245_000,
            95.2,
            AgeDistribution {
                under_18: 74_000,
                age_18_to_24: 36_000,
                age_25_to_34: 45_000,
                age_35_to_44: 34_000,
                age_45_to_54: 23_000,
                age_55_to_64: 18_000,
                age_65_plus: 15_000,
            },
            IncomeDistribution {
                under_25k: 68_000,
                income_25k_to_50k: 79_000,
                income_50k_to_75k: 52_000,
                income_75k_to_100k: 26_000,
                income_100k_plus: 20_000,
            },
            EducationDistribution {
                less_high_school: 71_000,
                high_school: 64_000,
                some_college: 52_000,
                bachelors: 43_000,
                graduate: 15_000,
            },
        ),
        record(
            "San Antonio",
            "Texas",
            "48",
            "65000",
            "78201",
            640_000,
            44.3,
            AgeDistribution {
                under_18: 166_000,
                age_18_to_24: 92_000,
                age_25_to_34: 125_000,
                age_35_to_44: 96_000,
                age_45_to_54: 68_000,
                age_55_to_64: 52_000,
                age_65_plus: 41_000,
            },
            IncomeDistribution {
                under_25k: 147_000,
                income_25k_to_50k: 192_000,
                income_50k_to_75k: 160_000,
                income_75k_to_100k: 83_000,
                income_100k_plus: 58_000,
            },
            EducationDistribution {
                less_high_school: 141_000,
                high_school: 179_000,
                some_college: 154_000,
                bachelors: 122_000,
                graduate: 44_000,
            },
        ),
    ]
}

fn salvadoran_dataset() -> Vec<LocationRecord> {
    vec![
        record(
            "Los Angeles",
            "California",
            "06",
            "44000",
            "90057",
            230_000,
            5.9,
            AgeDistribution {
                under_18: 57_000,
                age_18_to_24: 31_000,
                age_25_to_34: 48_000,
                age_35_to_44: 38_000,
                age_45_to_54: 27_000,
                age_55_to_64: 17_000,
                age_65_plus: 12_000,
            },
            IncomeDistribution {
                under_25k: 63_000,
                income_25k_to_50k: 78_000,
                income_50k_to_75k: 49_000,
                income_75k_to_100k: 24_000,
                income_100k_plus: 16_000,
            },
            EducationDistribution {
                less_high_school: 79_000,
                high_school: 64_000,
                some_college: 48_000,
                bachelors: 28_000,
                graduate: 11_000,
            },
        ),
        record(
            "Washington",
            "District of Columbia",
            "11",
            "50000",
            "20009",
            35_000,
            5.1,
            AgeDistribution {
                under_18: 8_200,
                age_18_to_24: 4_600,
                age_25_to_34: 7_500,
                age_35_to_44: 6_100,
                age_45_to_54: 4_200,
                age_55_to_64: 2_600,
                age_65_plus: 1_800,
            },
            IncomeDistribution {
                under_25k: 8_900,
                income_25k_to_50k: 11_200,
                income_50k_to_75k: 7_800,
                income_75k_to_100k: 4_100,
                income_100k_plus: 3_000,
            },
            EducationDistribution {
                less_high_school: 11_400,
                high_school: 9_800,
                some_college: 7_300,
                bachelors: 4_600,
                graduate: 1_900,
            },
        ),
        record(
            "Houston",
            "Texas",
            "48",
            "35000",
            "77081",
            95_000,
            4.1,
            AgeDistribution {
                under_18: 24_800,
                age_18_to_24: 13_200,
                age_25_to_34: 19_900,
                age_35_to_44: 15_300,
                age_45_to_54: 10_400,
                age_55_to_64: 6_900,
                age_65_plus: 4_500,
            },
            IncomeDistribution {
                under_25k: 26_700,
                income_25k_to_50k: 32_400,
                income_50k_to_75k: 19_800,
                income_75k_to_100k: 9_600,
                income_100k_plus: 6_500,
            },
            EducationDistribution {
                less_high_school: 33_600,
                high_school: 26_800,
                some_college: 19_200,
                bachelors: 11_700,
                graduate: 3_700,
            },
        ),
        record(
            "Hempstead",
            "New York",
            "36",
            "33139",
            "11550",
            18_000,
            23.4,
            AgeDistribution {
                under_18: 4_700,
                age_18_to_24: 2_500,
                age_25_to_34: 3_700,
                age_35_to_44: 2_900,
                age_45_to_54: 2_000,
                age_55_to_64: 1_300,
                age_65_plus: 900,
            },
            IncomeDistribution {
                under_25k: 4_600,
                income_25k_to_50k: 5_800,
                income_50k_to_75k: 4_100,
                income_75k_to_100k: 2_100,
                income_100k_plus: 1_400,
            },
            EducationDistribution {
                less_high_school: 6_100,
                high_school: 5_200,
                some_college: 3_700,
                bachelors: 2_200,
                graduate: 800,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasets_are_fully_populated() {
        for ethnicity in [Ethnicity::Mexican, Ethnicity::Salvadoran] {
            let records = dataset(ethnicity);
            assert!(records.len() >= 3 && records.len() <= 5);
            for record in &records {
                assert!(record.population > 0);
                assert!(record.percentage > 0.0 && record.percentage <= 100.0);
                assert!(record.age_groups.is_some());
                assert!(record.income_groups.is_some());
                assert!(record.education_levels.is_some());
                assert!(!record.zip_code.is_empty());
            }
        }
    }

    #[test]
    fn datasets_are_deterministic() {
        assert_eq!(dataset(Ethnicity::Mexican), dataset(Ethnicity::Mexican));
        assert_eq!(
            dataset(Ethnicity::Salvadoran),
            dataset(Ethnicity::Salvadoran)
        );
    }
}
