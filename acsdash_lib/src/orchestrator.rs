//! Dataset assembly: broad fetch, concurrent enrichment, fallback
//! selection.
//!
//! A load walks an explicit chain of data sources: the live API first,
//! per-metric synthetic substitution inside each enrichment task, and the
//! static backup dataset when nothing usable survives. Failures resolve
//! to the next source immediately; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use acsdash_api::{variables, AcsQuery, Geography};

use crate::backup;
use crate::client::CachedClient;
use crate::geo::{self, GeographicUnit};
use crate::keystore::CredentialResolver;
use crate::metrics;
use crate::normalize::{self, PlaceProfile};
use crate::synthetic;
use crate::types::{Ethnicity, LocationRecord};
use crate::Error;

/// Cap on enriched units per load. The nationwide basic list runs to tens
/// of thousands of places; only the densest 50 are worth three more
/// requests each.
pub const MAX_UNITS: usize = 50;

/// Default ceiling on the nationwide basic-list fetch.
pub const BASIC_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for single-unit lookup fetches.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// One basic-list row: a unit plus its population counts, tagged with its
/// rank so the final ordering survives unordered task completion.
#[derive(Clone, Debug)]
struct BasicEntry {
    rank: usize,
    unit: GeographicUnit,
    total: i64,
    target: i64,
}

/// The pipeline's public face: dataset loads and single-unit lookups.
pub struct Pipeline {
    client: Arc<CachedClient>,
    credentials: CredentialResolver,
    basic_timeout: Duration,
}

impl Pipeline {
    pub fn new(client: CachedClient, credentials: CredentialResolver) -> Self {
        Self {
            client: Arc::new(client),
            credentials,
            basic_timeout: BASIC_FETCH_TIMEOUT,
        }
    }

    /// Overrides the ceiling on the initial basic-list fetch.
    pub fn with_basic_timeout(mut self, timeout: Duration) -> Self {
        self.basic_timeout = timeout;
        self
    }

    /// Loads the full concentration dataset for one population group.
    ///
    /// Never fails: a missing key, a dead API, or zero usable records all
    /// resolve to the static backup dataset. Given identical API
    /// responses the output ordering is stable (target population
    /// descending, ties in API response order).
    pub async fn load_population_data(&self, ethnicity: Ethnicity) -> Vec<LocationRecord> {
        match self.load_live(ethnicity).await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                tracing::warn!(
                    "live load for {} produced no usable records, serving backup dataset",
                    ethnicity
                );
                backup::dataset(ethnicity)
            }
            Err(err) => {
                tracing::warn!(
                    "live load for {} failed ({}), serving backup dataset",
                    ethnicity,
                    err
                );
                backup::dataset(ethnicity)
            }
        }
    }

    async fn load_live(&self, ethnicity: Ethnicity) -> Result<Vec<LocationRecord>, Error> {
        let api_key = self.credentials.api_key().ok_or(Error::MissingApiKey)?;
        let entries = self.fetch_basic_list(ethnicity, &api_key).await?;

        let mut tasks = JoinSet::new();
        for entry in entries {
            let client = Arc::clone(&self.client);
            let api_key = api_key.clone();
            tasks.spawn(async move {
                let record = enrich_unit(&client, &entry, Some(&api_key)).await;
                (entry.rank, record)
            });
        }

        // Settle-all join: every task completes, success or failure
        // recorded independently. A unit is dropped only when its whole
        // task fails; absorbed sub-metric failures already substituted
        // synthetic data inside the task.
        let mut ranked = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((rank, record)) => ranked.push((rank, record)),
                Err(err) => {
                    tracing::warn!("enrichment task failed outright, dropping unit: {}", err);
                }
            }
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        Ok(ranked.into_iter().map(|(_, record)| record).collect())
    }

    /// The first-pass nationwide fetch: every place with a target
    /// population above the group's threshold, densest first, capped at
    /// [`MAX_UNITS`].
    async fn fetch_basic_list(
        &self,
        ethnicity: Ethnicity,
        api_key: &str,
    ) -> Result<Vec<BasicEntry>, Error> {
        let query = AcsQuery::new(Geography::AllPlaces { state: None })
            .with_variables(&[variables::TOTAL_POPULATION, ethnicity.variable()])
            .with_api_key(api_key);
        let table = self.client.get_table(&query, self.basic_timeout).await?;

        let mut entries: Vec<BasicEntry> = (0..table.rows().len())
            .filter_map(|row| {
                let full_name = table.cell(row, variables::NAME)?;
                let state_code = table.cell(row, "state").unwrap_or_default().to_string();
                let place_id = table.cell(row, "place").unwrap_or_default().to_string();
                let total = table.count(row, variables::TOTAL_POPULATION);
                let target = table.count(row, ethnicity.variable());
                if target <= ethnicity.threshold() {
                    return None;
                }
                Some(BasicEntry {
                    rank: row,
                    unit: GeographicUnit {
                        name: full_name
                            .split(',')
                            .next()
                            .unwrap_or(full_name)
                            .trim()
                            .to_string(),
                        state_name: geo::state_name(&state_code),
                        state_code,
                        place_id,
                    },
                    total,
                    target,
                })
            })
            .collect();

        // Stable sort keeps API response order among equal populations.
        entries.sort_by(|a, b| b.target.cmp(&a.target));
        entries.truncate(MAX_UNITS);
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.rank = rank;
        }
        Ok(entries)
    }

    /// Labeled profile for one ZIP code tabulation area. Validation runs
    /// before any network call; errors propagate to the caller.
    pub async fn lookup_zip(&self, zip: &str) -> Result<PlaceProfile, Error> {
        let unit = geo::resolve_by_zip(zip)?;
        let api_key = self.credentials.api_key().ok_or(Error::MissingApiKey)?;
        let query = AcsQuery::new(Geography::Zcta {
            zip: unit.place_id.clone(),
        })
        .with_variables(&[
            variables::TOTAL_POPULATION,
            variables::MEXICAN_POPULATION,
            variables::SALVADORAN_POPULATION,
            variables::MEDIAN_HOUSEHOLD_INCOME,
        ])
        .with_api_key(&api_key);
        let table = self.client.get_table(&query, LOOKUP_TIMEOUT).await?;
        Ok(normalize::place_profile(&table, 0))
    }

    /// Labeled profile for one place.
    pub async fn lookup_place(
        &self,
        state_code: &str,
        place_id: &str,
    ) -> Result<PlaceProfile, Error> {
        let unit = geo::resolve_by_state_and_place(state_code, place_id)?;
        let api_key = self.credentials.api_key().ok_or(Error::MissingApiKey)?;
        let query = AcsQuery::new(Geography::Place {
            state: unit.state_code.clone(),
            place: unit.place_id.clone(),
        })
        .with_variables(&[
            variables::TOTAL_POPULATION,
            variables::MEXICAN_POPULATION,
            variables::SALVADORAN_POPULATION,
            variables::MEDIAN_HOUSEHOLD_INCOME,
        ])
        .with_api_key(&api_key);
        let table = self.client.get_table(&query, LOOKUP_TIMEOUT).await?;
        Ok(normalize::place_profile(&table, 0))
    }

    /// Resolves a free-text city name, then profiles the winning place.
    pub async fn lookup_city(&self, name: &str) -> Result<PlaceProfile, Error> {
        let api_key = self.credentials.api_key();
        let unit =
            geo::resolve_by_city_name(&self.client, api_key.as_deref(), name).await?;
        self.lookup_place(&unit.state_code, &unit.place_id).await
    }

    /// All places within one state.
    pub async fn places_for_state(&self, state_code: &str) -> Result<Vec<GeographicUnit>, Error> {
        let api_key = self.credentials.api_key();
        geo::resolve_all_places_for_state(&self.client, api_key.as_deref(), state_code).await
    }
}

/// Enriches one unit with its three sub-distributions.
///
/// Each sub-metric fails independently; a failure substitutes only that
/// metric's synthetic value, seeded from the basic-list counts already in
/// hand. This function itself never fails, so a unit only disappears when
/// its task dies at the join boundary.
async fn enrich_unit(
    client: &CachedClient,
    entry: &BasicEntry,
    api_key: Option<&str>,
) -> LocationRecord {
    let age_seed = match metrics::fetch_age_raw(client, &entry.unit, api_key).await {
        Ok(total) => total,
        Err(err) => {
            tracing::warn!(
                "age fetch for {} failed ({}), seeding from basic total",
                entry.unit.name,
                err
            );
            entry.total
        }
    };
    let age_groups = synthetic::age_from_population(age_seed);

    let income_groups = match metrics::fetch_income_raw(client, &entry.unit, api_key).await {
        Ok(median) if median > 0 => synthetic::income_from_median(median),
        Ok(_) => synthetic::income_from_population(entry.total),
        Err(err) => {
            tracing::warn!(
                "income fetch for {} failed ({}), deriving from population",
                entry.unit.name,
                err
            );
            synthetic::income_from_population(entry.total)
        }
    };

    let education_levels = match metrics::fetch_education_raw(client, &entry.unit, api_key).await {
        Ok(raw) => synthetic::education_from_raw_counts(
            raw.total_over_25,
            raw.high_school_grads,
            raw.bachelors_grads,
            raw.masters_grads,
        ),
        Err(err) => {
            tracing::warn!(
                "education fetch for {} failed ({}), deriving from population",
                entry.unit.name,
                err
            );
            synthetic::education_from_population(entry.total)
        }
    };

    LocationRecord {
        name: entry.unit.name.clone(),
        state: entry.unit.state_name.clone(),
        state_code: Some(entry.unit.state_code.clone()),
        place_id: Some(entry.unit.place_id.clone()),
        population: entry.target,
        percentage: normalize::percentage(entry.target, entry.total),
        zip_code: String::new(),
        age_groups: Some(age_groups),
        income_groups: Some(income_groups),
        education_levels: Some(education_levels),
    }
}
