//! Record shapes shared across the pipeline.
//!
//! All of these are value types passed by clone; serialized field names
//! are the camelCase names the dashboard's JSON consumers expect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use acsdash_api::variables;

use crate::Error;

/// Target population group.
///
/// Carries the ACS variable code selecting its origin-specific count and
/// the basic-list inclusion threshold. The thresholds differ because the
/// two populations differ in scale nationwide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ethnicity {
    Mexican,
    Salvadoran,
}

impl Ethnicity {
    /// ACS variable code for this group's population count.
    pub fn variable(&self) -> &'static str {
        match self {
            Ethnicity::Mexican => variables::MEXICAN_POPULATION,
            Ethnicity::Salvadoran => variables::SALVADORAN_POPULATION,
        }
    }

    /// Minimum target population for a place to enter the basic list.
    pub fn threshold(&self) -> i64 {
        match self {
            Ethnicity::Mexican => 1000,
            Ethnicity::Salvadoran => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ethnicity::Mexican => "Mexican",
            Ethnicity::Salvadoran => "Salvadoran",
        }
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Ethnicity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mexican" => Ok(Ethnicity::Mexican),
            "salvadoran" => Ok(Ethnicity::Salvadoran),
            _ => Err(Error::InvalidInput(format!(
                "unknown population group '{}'. Valid values: mexican, salvadoran",
                s
            ))),
        }
    }
}

/// Seven age buckets. Values approximate the unit's total population; no
/// cross-bucket sum is enforced since synthetic buckets round independently.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDistribution {
    #[serde(rename = "under18")]
    pub under_18: i64,
    #[serde(rename = "age18to24")]
    pub age_18_to_24: i64,
    #[serde(rename = "age25to34")]
    pub age_25_to_34: i64,
    #[serde(rename = "age35to44")]
    pub age_35_to_44: i64,
    #[serde(rename = "age45to54")]
    pub age_45_to_54: i64,
    #[serde(rename = "age55to64")]
    pub age_55_to_64: i64,
    #[serde(rename = "age65plus")]
    pub age_65_plus: i64,
}

/// Five household income buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDistribution {
    #[serde(rename = "under25k")]
    pub under_25k: i64,
    #[serde(rename = "income25kto50k")]
    pub income_25k_to_50k: i64,
    #[serde(rename = "income50kto75k")]
    pub income_50k_to_75k: i64,
    #[serde(rename = "income75kto100k")]
    pub income_75k_to_100k: i64,
    #[serde(rename = "income100kplus")]
    pub income_100k_plus: i64,
}

/// Five educational attainment buckets over the 25-and-over universe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDistribution {
    pub less_high_school: i64,
    pub high_school: i64,
    pub some_college: i64,
    pub bachelors: i64,
    pub graduate: i64,
}

/// The pipeline's primary output unit: one geographic unit with its
/// target-group concentration and optional demographic enrichment.
///
/// `population` is the target-group count, not the total population.
/// `percentage` is the target share of the total, 0-100 with one decimal
/// digit, and exactly 0 when the total is 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub name: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub population: i64,
    pub percentage: f64,
    pub zip_code: String,
    #[serde(default)]
    pub age_groups: Option<AgeDistribution>,
    #[serde(default)]
    pub income_groups: Option<IncomeDistribution>,
    #[serde(default)]
    pub education_levels: Option<EducationDistribution>,
}
