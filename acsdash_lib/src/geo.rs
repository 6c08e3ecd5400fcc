//! Geographic unit resolution.
//!
//! Maps a search input (city name, ZIP code, state+place pair, or state
//! code) to the `(state, place)` identifiers the API addresses. A static
//! table of well-known cities is checked before any network search.

use std::time::Duration;

use serde::Serialize;

use acsdash_api::{AcsQuery, Geography};

use crate::client::CachedClient;
use crate::Error;

/// A place recognized by the statistical API. Immutable once resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicUnit {
    pub name: String,
    pub state_name: String,
    /// 2-digit FIPS state code. Empty for ZCTA units, which the API
    /// addresses without a state.
    pub state_code: String,
    /// FIPS place code, or the ZIP itself for ZCTA units.
    pub place_id: String,
}

/// Timeout for the nationwide fallback search.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Cities with large Mexican or Salvadoran populations, resolved without
/// touching the network. `(name, state code, place code)`.
const KNOWN_CITIES: &[(&str, &str, &str)] = &[
    ("Los Angeles", "06", "44000"),
    ("San Antonio", "48", "65000"),
    ("Houston", "48", "35000"),
    ("Phoenix", "04", "55000"),
    ("Chicago", "17", "14000"),
    ("Dallas", "48", "19000"),
    ("El Paso", "48", "24000"),
    ("San Diego", "06", "66000"),
    ("San Jose", "06", "68000"),
    ("Fort Worth", "48", "27000"),
    ("Austin", "48", "05000"),
    ("Tucson", "04", "77000"),
    ("Fresno", "06", "27000"),
    ("Sacramento", "06", "64000"),
    ("Albuquerque", "35", "02000"),
    ("Santa Ana", "06", "69000"),
];

/// FIPS state codes to names, 50 states plus DC and Puerto Rico.
const STATE_NAMES: &[(&str, &str)] = &[
    ("01", "Alabama"),
    ("02", "Alaska"),
    ("04", "Arizona"),
    ("05", "Arkansas"),
    ("06", "California"),
    ("08", "Colorado"),
    ("09", "Connecticut"),
    ("10", "Delaware"),
    ("11", "District of Columbia"),
    ("12", "Florida"),
    ("13", "Georgia"),
    ("15", "Hawaii"),
    ("16", "Idaho"),
    ("17", "Illinois"),
    ("18", "Indiana"),
    ("19", "Iowa"),
    ("20", "Kansas"),
    ("21", "Kentucky"),
    ("22", "Louisiana"),
    ("23", "Maine"),
    ("24", "Maryland"),
    ("25", "Massachusetts"),
    ("26", "Michigan"),
    ("27", "Minnesota"),
    ("28", "Mississippi"),
    ("29", "Missouri"),
    ("30", "Montana"),
    ("31", "Nebraska"),
    ("32", "Nevada"),
    ("33", "New Hampshire"),
    ("34", "New Jersey"),
    ("35", "New Mexico"),
    ("36", "New York"),
    ("37", "North Carolina"),
    ("38", "North Dakota"),
    ("39", "Ohio"),
    ("40", "Oklahoma"),
    ("41", "Oregon"),
    ("42", "Pennsylvania"),
    ("44", "Rhode Island"),
    ("45", "South Carolina"),
    ("46", "South Dakota"),
    ("47", "Tennessee"),
    ("48", "Texas"),
    ("49", "Utah"),
    ("50", "Vermont"),
    ("51", "Virginia"),
    ("53", "Washington"),
    ("54", "West Virginia"),
    ("55", "Wisconsin"),
    ("56", "Wyoming"),
    ("72", "Puerto Rico"),
];

/// Translates a FIPS state code to its name. Unknown codes echo back.
pub fn state_name(code: &str) -> String {
    STATE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn validate_state_code(state_code: &str) -> Result<(), Error> {
    if state_code.len() == 2 && is_digits(state_code) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "invalid state code '{}'. Expected a 2-digit FIPS code (e.g. 06 for California)",
            state_code
        )))
    }
}

/// Validates a ZIP and returns the ZCTA unit. No network access.
pub fn resolve_by_zip(zip: &str) -> Result<GeographicUnit, Error> {
    let trimmed = zip.trim();
    if trimmed.len() != 5 || !is_digits(trimmed) {
        return Err(Error::InvalidInput(format!(
            "invalid ZIP code '{}'. Expected exactly 5 digits",
            zip
        )));
    }
    Ok(GeographicUnit {
        name: format!("ZCTA {}", trimmed),
        state_name: String::new(),
        state_code: String::new(),
        place_id: trimmed.to_string(),
    })
}

/// Validates a `(state, place)` pair and returns the unit. The display
/// name stays generic until a fetch supplies the real one.
pub fn resolve_by_state_and_place(
    state_code: &str,
    place_id: &str,
) -> Result<GeographicUnit, Error> {
    validate_state_code(state_code)?;
    if !is_digits(place_id) {
        return Err(Error::InvalidInput(format!(
            "invalid place code '{}'. Expected digits only",
            place_id
        )));
    }
    Ok(GeographicUnit {
        name: format!("Place {}", place_id),
        state_name: state_name(state_code),
        state_code: state_code.to_string(),
        place_id: place_id.to_string(),
    })
}

/// Resolves a free-text city name.
///
/// The static table is checked first with a case-insensitive substring
/// match in either direction. On a miss, one nationwide query fetches all
/// place names and the first substring match in API response order wins;
/// no ranking by population or exactness is attempted.
pub async fn resolve_by_city_name(
    client: &CachedClient,
    api_key: Option<&str>,
    name: &str,
) -> Result<GeographicUnit, Error> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::InvalidInput("city name is empty".to_string()));
    }

    for (city, state_code, place_id) in KNOWN_CITIES {
        let city_lower = city.to_lowercase();
        if city_lower.contains(&needle) || needle.contains(&city_lower) {
            return Ok(GeographicUnit {
                name: city.to_string(),
                state_name: state_name(state_code),
                state_code: state_code.to_string(),
                place_id: place_id.to_string(),
            });
        }
    }

    let mut query = AcsQuery::new(Geography::AllPlaces { state: None });
    if let Some(key) = api_key {
        query = query.with_api_key(key);
    }
    let table = client.get_table(&query, SEARCH_TIMEOUT).await?;

    for row in 0..table.rows().len() {
        let Some(full_name) = table.cell(row, "NAME") else {
            continue;
        };
        if full_name.to_lowercase().contains(&needle) {
            return Ok(unit_from_search_row(
                full_name,
                table.cell(row, "state").unwrap_or_default(),
                table.cell(row, "place").unwrap_or_default(),
            ));
        }
    }

    Err(Error::NotFound(format!(
        "no place matching '{}' was found",
        name
    )))
}

/// All places within one state.
pub async fn resolve_all_places_for_state(
    client: &CachedClient,
    api_key: Option<&str>,
    state_code: &str,
) -> Result<Vec<GeographicUnit>, Error> {
    validate_state_code(state_code)?;

    let mut query = AcsQuery::new(Geography::AllPlaces {
        state: Some(state_code.to_string()),
    });
    if let Some(key) = api_key {
        query = query.with_api_key(key);
    }
    let table = client.get_table(&query, SEARCH_TIMEOUT).await?;

    let units = (0..table.rows().len())
        .filter_map(|row| {
            let full_name = table.cell(row, "NAME")?;
            Some(unit_from_search_row(
                full_name,
                table.cell(row, "state").unwrap_or(state_code),
                table.cell(row, "place").unwrap_or_default(),
            ))
        })
        .collect();
    Ok(units)
}

/// Builds a unit from a search result row. API names look like
/// `"Los Angeles city, California"`; the part before the first comma is
/// kept as the display name.
fn unit_from_search_row(full_name: &str, state_code: &str, place_id: &str) -> GeographicUnit {
    let name = full_name
        .split(',')
        .next()
        .unwrap_or(full_name)
        .trim()
        .to_string();
    GeographicUnit {
        name,
        state_name: state_name(state_code),
        state_code: state_code.to_string(),
        place_id: place_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_accepts_five_digits() {
        let unit = resolve_by_zip("90011").unwrap();
        assert_eq!(unit.place_id, "90011");
        assert_eq!(unit.name, "ZCTA 90011");
    }

    #[test]
    fn zip_rejects_short_input() {
        assert!(matches!(
            resolve_by_zip("9002"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn zip_rejects_long_input() {
        assert!(matches!(
            resolve_by_zip("900112"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn zip_rejects_non_digits() {
        assert!(matches!(
            resolve_by_zip("9001a"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(resolve_by_zip(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn state_and_place_valid() {
        let unit = resolve_by_state_and_place("06", "44000").unwrap();
        assert_eq!(unit.state_name, "California");
        assert_eq!(unit.place_id, "44000");
    }

    #[test]
    fn state_and_place_rejects_bad_state() {
        assert!(resolve_by_state_and_place("6", "44000").is_err());
        assert!(resolve_by_state_and_place("CA", "44000").is_err());
        assert!(resolve_by_state_and_place("", "44000").is_err());
    }

    #[test]
    fn state_and_place_rejects_bad_place() {
        assert!(resolve_by_state_and_place("06", "").is_err());
        assert!(resolve_by_state_and_place("06", "44a00").is_err());
    }

    #[test]
    fn state_name_lookup() {
        assert_eq!(state_name("48"), "Texas");
        assert_eq!(state_name("72"), "Puerto Rico");
        assert_eq!(state_name("99"), "99");
    }

    #[test]
    fn search_row_name_is_trimmed_at_comma() {
        let unit = unit_from_search_row("El Paso city, Texas", "48", "24000");
        assert_eq!(unit.name, "El Paso city");
        assert_eq!(unit.state_name, "Texas");
    }

    #[tokio::test]
    async fn known_city_resolves_without_network() {
        // Base URL points nowhere; a network attempt would fail loudly.
        let client = crate::client::CachedClient::with_base_url(
            "http://127.0.0.1:1",
            crate::cache::ResponseCache::new(Duration::from_secs(1)),
        );
        let unit = resolve_by_city_name(&client, None, "los angeles")
            .await
            .unwrap();
        assert_eq!(unit.state_code, "06");
        assert_eq!(unit.place_id, "44000");
    }

    #[tokio::test]
    async fn known_city_substring_matches_either_direction() {
        let client = crate::client::CachedClient::with_base_url(
            "http://127.0.0.1:1",
            crate::cache::ResponseCache::new(Duration::from_secs(1)),
        );
        // Input is a superstring of the table entry.
        let unit = resolve_by_city_name(&client, None, "El Paso, TX")
            .await
            .unwrap();
        assert_eq!(unit.place_id, "24000");
    }
}
