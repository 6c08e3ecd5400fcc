//! Pure filtering over normalized records.

use serde::{Deserialize, Serialize};

use crate::types::{AgeDistribution, EducationDistribution, IncomeDistribution, LocationRecord};

/// Three independent lists of category tags. An empty list or the sole
/// sentinel `"all"` leaves that dimension unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub age_range: Vec<String>,
    pub income_range: Vec<String>,
    pub education_level: Vec<String>,
}

impl FilterCriteria {
    /// True when no dimension restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        !is_active(&self.age_range)
            && !is_active(&self.income_range)
            && !is_active(&self.education_level)
    }
}

fn is_active(tags: &[String]) -> bool {
    !(tags.is_empty() || (tags.len() == 1 && tags[0] == "all"))
}

/// Filters records by the given criteria. Pure and synchronous.
///
/// A record passes an active dimension when its distribution exists and
/// any named bucket is nonzero; records lacking the distribution are
/// excluded while that dimension is active. Dimensions combine with AND.
pub fn apply_filters(records: &[LocationRecord], criteria: &FilterCriteria) -> Vec<LocationRecord> {
    records
        .iter()
        .filter(|record| passes(record, criteria))
        .cloned()
        .collect()
}

fn passes(record: &LocationRecord, criteria: &FilterCriteria) -> bool {
    if is_active(&criteria.age_range) {
        let Some(age) = &record.age_groups else {
            return false;
        };
        if !criteria
            .age_range
            .iter()
            .any(|tag| age_bucket(age, tag) > 0)
        {
            return false;
        }
    }

    if is_active(&criteria.income_range) {
        let Some(income) = &record.income_groups else {
            return false;
        };
        if !criteria
            .income_range
            .iter()
            .any(|tag| income_bucket(income, tag) > 0)
        {
            return false;
        }
    }

    if is_active(&criteria.education_level) {
        let Some(education) = &record.education_levels else {
            return false;
        };
        if !criteria
            .education_level
            .iter()
            .any(|tag| education_bucket(education, tag) > 0)
        {
            return false;
        }
    }

    true
}

/// Unknown tags read as zero, so they never match.
fn age_bucket(dist: &AgeDistribution, tag: &str) -> i64 {
    match tag {
        "under18" => dist.under_18,
        "18to24" => dist.age_18_to_24,
        "25to34" => dist.age_25_to_34,
        "35to44" => dist.age_35_to_44,
        "45to54" => dist.age_45_to_54,
        "55to64" => dist.age_55_to_64,
        "65plus" => dist.age_65_plus,
        _ => 0,
    }
}

fn income_bucket(dist: &IncomeDistribution, tag: &str) -> i64 {
    match tag {
        "under25k" => dist.under_25k,
        "25kto50k" => dist.income_25k_to_50k,
        "50kto75k" => dist.income_50k_to_75k,
        "75kto100k" => dist.income_75k_to_100k,
        "100kplus" => dist.income_100k_plus,
        _ => 0,
    }
}

fn education_bucket(dist: &EducationDistribution, tag: &str) -> i64 {
    match tag {
        "lessHighSchool" => dist.less_high_school,
        "highSchool" => dist.high_school,
        "someCollege" => dist.some_college,
        "bachelors" => dist.bachelors,
        "graduate" => dist.graduate,
        _ => 0,
    }
}
