//! Per-unit metric fetchers.
//!
//! Each fetcher issues exactly one request for a fixed variable set and
//! either returns a fully populated value or fails; partial data never
//! escapes. Timeouts read as failures, identical to any other error.

use std::time::Duration;

use acsdash_api::{variables, AcsQuery, Geography};

use crate::client::CachedClient;
use crate::geo::GeographicUnit;
use crate::types::Ethnicity;
use crate::Error;

/// Timeout for the base population fetch.
pub const BASE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for each enrichment sub-fetch.
pub const SUB_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Total and target-group counts for one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasePopulation {
    pub total: i64,
    pub target: i64,
}

/// Raw educational attainment counts for one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EducationRaw {
    pub total_over_25: i64,
    pub high_school_grads: i64,
    pub bachelors_grads: i64,
    pub masters_grads: i64,
}

fn place_query(unit: &GeographicUnit, api_key: Option<&str>) -> AcsQuery {
    let mut query = AcsQuery::new(Geography::Place {
        state: unit.state_code.clone(),
        place: unit.place_id.clone(),
    });
    if let Some(key) = api_key {
        query = query.with_api_key(key);
    }
    query
}

/// Total and target-group population for one unit.
pub async fn fetch_base_population(
    client: &CachedClient,
    unit: &GeographicUnit,
    ethnicity: Ethnicity,
    api_key: Option<&str>,
) -> Result<BasePopulation, Error> {
    let query = place_query(unit, api_key)
        .with_variables(&[variables::TOTAL_POPULATION, ethnicity.variable()]);
    let table = client.get_table(&query, BASE_FETCH_TIMEOUT).await?;
    Ok(BasePopulation {
        total: table.count(0, variables::TOTAL_POPULATION),
        target: table.count(0, ethnicity.variable()),
    })
}

/// Total population, used only to seed synthetic age generation. The
/// per-bucket age variables are not fetched; the original dashboard never
/// requested them.
pub async fn fetch_age_raw(
    client: &CachedClient,
    unit: &GeographicUnit,
    api_key: Option<&str>,
) -> Result<i64, Error> {
    let query = place_query(unit, api_key).with_variable(variables::TOTAL_POPULATION);
    let table = client.get_table(&query, SUB_FETCH_TIMEOUT).await?;
    Ok(table.count(0, variables::TOTAL_POPULATION))
}

/// Median household income. Suppressed medians surface as 0; callers
/// treat 0 as unavailable.
pub async fn fetch_income_raw(
    client: &CachedClient,
    unit: &GeographicUnit,
    api_key: Option<&str>,
) -> Result<i64, Error> {
    let query = place_query(unit, api_key).with_variable(variables::MEDIAN_HOUSEHOLD_INCOME);
    let table = client.get_table(&query, SUB_FETCH_TIMEOUT).await?;
    Ok(table.count(0, variables::MEDIAN_HOUSEHOLD_INCOME))
}

/// Raw educational attainment counts.
pub async fn fetch_education_raw(
    client: &CachedClient,
    unit: &GeographicUnit,
    api_key: Option<&str>,
) -> Result<EducationRaw, Error> {
    let query = place_query(unit, api_key).with_variables(&[
        variables::POPULATION_OVER_25,
        variables::HIGH_SCHOOL_GRADUATES,
        variables::BACHELORS_DEGREES,
        variables::MASTERS_DEGREES,
    ]);
    let table = client.get_table(&query, SUB_FETCH_TIMEOUT).await?;
    Ok(EducationRaw {
        total_over_25: table.count(0, variables::POPULATION_OVER_25),
        high_school_grads: table.count(0, variables::HIGH_SCHOOL_GRADUATES),
        bachelors_grads: table.count(0, variables::BACHELORS_DEGREES),
        masters_grads: table.count(0, variables::MASTERS_DEGREES),
    })
}
