//! ACS variable codes used by the dashboard.
//!
//! Codes come from the 2022 ACS 5-year detail tables and must be preserved
//! exactly for API compatibility.

/// Total population (table B01003).
pub const TOTAL_POPULATION: &str = "B01003_001E";

/// Mexican-origin population, from the "Hispanic or Latino by specific
/// origin" table (B03001).
pub const MEXICAN_POPULATION: &str = "B03001_004E";

/// Salvadoran-origin population, same table, Central American block.
pub const SALVADORAN_POPULATION: &str = "B03001_014E";

/// Median household income in the past 12 months (table B19013).
pub const MEDIAN_HOUSEHOLD_INCOME: &str = "B19013_001E";

/// Population 25 years and over (educational attainment universe, B15003).
pub const POPULATION_OVER_25: &str = "B15003_001E";

/// Regular high school diploma holders (B15003).
pub const HIGH_SCHOOL_GRADUATES: &str = "B15003_017E";

/// Bachelor's degree holders (B15003).
pub const BACHELORS_DEGREES: &str = "B15003_022E";

/// Master's degree holders (B15003).
pub const MASTERS_DEGREES: &str = "B15003_023E";

/// Human-readable unit name, returned alongside every variable set.
pub const NAME: &str = "NAME";
