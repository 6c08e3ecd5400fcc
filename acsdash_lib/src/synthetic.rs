//! Deterministic synthetic distributions.
//!
//! When a per-category fetch fails or the API does not carry the needed
//! variables, these derive a plausible breakdown from a single scalar.
//! Everything here is pure: the same input always yields the same buckets,
//! and every bucket is a non-negative integer.

use crate::types::{AgeDistribution, EducationDistribution, IncomeDistribution};

/// Income-from-median is computed against this fixed base, not the unit's
/// real population. The absolute counts are illustrative only; the
/// proportions are what track the median band. Preserved as-is from the
/// original dashboard rather than corrected to population scale.
pub const MEDIAN_INCOME_BASE: i64 = 10_000;

fn share(total: i64, pct: f64) -> i64 {
    ((total as f64) * pct / 100.0).round() as i64
}

/// Age split: 25/15/20/15/10/8/7 percent from youngest to oldest.
pub fn age_from_population(total: i64) -> AgeDistribution {
    AgeDistribution {
        under_18: share(total, 25.0),
        age_18_to_24: share(total, 15.0),
        age_25_to_34: share(total, 20.0),
        age_35_to_44: share(total, 15.0),
        age_45_to_54: share(total, 10.0),
        age_55_to_64: share(total, 8.0),
        age_65_plus: share(total, 7.0),
    }
}

/// Income split: 22/30/25/13/10 percent from lowest to highest bucket.
pub fn income_from_population(total: i64) -> IncomeDistribution {
    income_with_split(total, [22.0, 30.0, 25.0, 13.0, 10.0])
}

/// Income derived from a median, shifted by band: low medians weight the
/// bottom buckets, high medians the top. Always computed against
/// [`MEDIAN_INCOME_BASE`].
pub fn income_from_median(median: i64) -> IncomeDistribution {
    let split = if median < 40_000 {
        [32.0, 35.0, 25.0, 5.0, 3.0]
    } else if median < 60_000 {
        [22.0, 35.0, 30.0, 8.0, 5.0]
    } else {
        [12.0, 25.0, 25.0, 20.0, 18.0]
    };
    income_with_split(MEDIAN_INCOME_BASE, split)
}

fn income_with_split(total: i64, split: [f64; 5]) -> IncomeDistribution {
    IncomeDistribution {
        under_25k: share(total, split[0]),
        income_25k_to_50k: share(total, split[1]),
        income_50k_to_75k: share(total, split[2]),
        income_75k_to_100k: share(total, split[3]),
        income_100k_plus: share(total, split[4]),
    }
}

/// Education split: 30/28/22/15/5 percent from least to most attainment.
pub fn education_from_population(total: i64) -> EducationDistribution {
    EducationDistribution {
        less_high_school: share(total, 30.0),
        high_school: share(total, 28.0),
        some_college: share(total, 22.0),
        bachelors: share(total, 15.0),
        graduate: share(total, 5.0),
    }
}

/// Education derived from the real attainment counts.
///
/// The API's counts are cumulative-ish (a bachelor's holder is also a
/// high-school graduate), so buckets are derived by subtraction with a
/// fixed 20% some-college approximation, then clamped to zero
/// independently. The five buckets may therefore not sum to
/// `total_over_25`; that is accepted, not silently corrected.
pub fn education_from_raw_counts(
    total_over_25: i64,
    high_school_grads: i64,
    bachelors_grads: i64,
    masters_grads: i64,
) -> EducationDistribution {
    let some_college = share(total_over_25, 20.0).max(0);
    EducationDistribution {
        less_high_school: (total_over_25 - high_school_grads).max(0),
        high_school: (high_school_grads - bachelors_grads - some_college).max(0),
        some_college,
        bachelors: (bachelors_grads - masters_grads).max(0),
        graduate: masters_grads.max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_deterministic() {
        assert_eq!(age_from_population(10_000), age_from_population(10_000));
    }

    #[test]
    fn age_split_of_ten_thousand() {
        let age = age_from_population(10_000);
        assert_eq!(age.under_18, 2500);
        assert_eq!(age.age_18_to_24, 1500);
        assert_eq!(age.age_25_to_34, 2000);
        assert_eq!(age.age_35_to_44, 1500);
        assert_eq!(age.age_45_to_54, 1000);
        assert_eq!(age.age_55_to_64, 800);
        assert_eq!(age.age_65_plus, 700);
        // Whole-percent splits of a round total sum exactly.
        let sum = age.under_18
            + age.age_18_to_24
            + age.age_25_to_34
            + age.age_35_to_44
            + age.age_45_to_54
            + age.age_55_to_64
            + age.age_65_plus;
        assert_eq!(sum, 10_000);
    }

    #[test]
    fn age_of_zero_population_is_all_zero() {
        assert_eq!(age_from_population(0), AgeDistribution::default());
    }

    #[test]
    fn income_from_population_split() {
        let income = income_from_population(10_000);
        assert_eq!(income.under_25k, 2200);
        assert_eq!(income.income_25k_to_50k, 3000);
        assert_eq!(income.income_50k_to_75k, 2500);
        assert_eq!(income.income_75k_to_100k, 1300);
        assert_eq!(income.income_100k_plus, 1000);
    }

    #[test]
    fn income_from_low_median_weights_bottom() {
        let income = income_from_median(30_000);
        assert_eq!(income.under_25k, 3200);
        assert_eq!(income.income_25k_to_50k, 3500);
        assert_eq!(income.income_50k_to_75k, 2500);
        assert_eq!(income.income_75k_to_100k, 500);
        assert_eq!(income.income_100k_plus, 300);
    }

    #[test]
    fn income_from_middle_median() {
        let income = income_from_median(50_000);
        assert_eq!(income.under_25k, 2200);
        assert_eq!(income.income_25k_to_50k, 3500);
        assert_eq!(income.income_50k_to_75k, 3000);
        assert_eq!(income.income_75k_to_100k, 800);
        assert_eq!(income.income_100k_plus, 500);
    }

    #[test]
    fn income_from_high_median_weights_top() {
        let income = income_from_median(85_000);
        assert_eq!(income.under_25k, 1200);
        assert_eq!(income.income_25k_to_50k, 2500);
        assert_eq!(income.income_50k_to_75k, 2500);
        assert_eq!(income.income_75k_to_100k, 2000);
        assert_eq!(income.income_100k_plus, 1800);
    }

    #[test]
    fn income_band_edges() {
        // 40k falls in the middle band, 60k in the upper band.
        assert_eq!(income_from_median(39_999).under_25k, 3200);
        assert_eq!(income_from_median(40_000).under_25k, 2200);
        assert_eq!(income_from_median(59_999).under_25k, 2200);
        assert_eq!(income_from_median(60_000).under_25k, 1200);
    }

    #[test]
    fn income_from_median_ignores_real_population_scale() {
        // Fixed 10,000 base regardless of the true unit size.
        assert_eq!(income_from_median(30_000), income_from_median(30_000));
        let total: i64 = {
            let i = income_from_median(30_000);
            i.under_25k
                + i.income_25k_to_50k
                + i.income_50k_to_75k
                + i.income_75k_to_100k
                + i.income_100k_plus
        };
        assert_eq!(total, MEDIAN_INCOME_BASE);
    }

    #[test]
    fn education_from_population_split() {
        let edu = education_from_population(10_000);
        assert_eq!(edu.less_high_school, 3000);
        assert_eq!(edu.high_school, 2800);
        assert_eq!(edu.some_college, 2200);
        assert_eq!(edu.bachelors, 1500);
        assert_eq!(edu.graduate, 500);
    }

    #[test]
    fn education_from_raw_counts_derivation() {
        let edu = education_from_raw_counts(10_000, 7000, 2500, 800);
        assert_eq!(edu.less_high_school, 3000); // 10000 - 7000
        assert_eq!(edu.some_college, 2000); // 20% of 10000
        assert_eq!(edu.high_school, 2500); // 7000 - 2500 - 2000
        assert_eq!(edu.bachelors, 1700); // 2500 - 800
        assert_eq!(edu.graduate, 800);
    }

    #[test]
    fn education_from_raw_counts_clamps_negative_buckets() {
        // High-school grads fewer than bachelors + some-college forces the
        // subtraction negative; the bucket clamps to zero instead.
        let edu = education_from_raw_counts(1000, 300, 500, 600);
        assert_eq!(edu.high_school, 0);
        assert_eq!(edu.bachelors, 0);
        assert_eq!(edu.less_high_school, 700);
        assert_eq!(edu.graduate, 600);
    }
}
