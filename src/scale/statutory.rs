//! Statutory scale 44 (full contribution record) generated from the minimum rent
//!
//! The old-age rent is a step function of the average determining income:
//! - up to 36x the minimum rent: 74% of the minimum rent + 13/600 of income
//! - above: 104% of the minimum rent + 8/600 of income
//! - clamped to [minimum rent, 2x minimum rent]
//!
//! Brackets run from 12x to 72x the minimum rent in steps of 1.2x the minimum rent.

use super::{BenefitScale, BenefitScaleRow, ScaleRepository};
use crate::error::Result;
use crate::format::round_currency;

/// Minimum monthly old-age rent in force for 2025
pub const DEFAULT_MINIMUM_RENT: f64 = 1260.0;

/// Number of brackets in the published table
const BRACKET_COUNT: u32 = 51;

/// Build the row for a given bracket threshold
pub fn statutory_row(income_threshold: f64, minimum_rent: f64) -> BenefitScaleRow {
    let maximum_rent = 2.0 * minimum_rent;

    let raw = if income_threshold <= minimum_rent * 36.0 {
        0.74 * minimum_rent + 13.0 / 600.0 * income_threshold
    } else {
        1.04 * minimum_rent + 8.0 / 600.0 * income_threshold
    };
    let rent = round_currency(raw.max(minimum_rent).min(maximum_rent));

    BenefitScaleRow {
        income_threshold,
        old_age_rent_full: rent,
        disability_rent_full: rent,
        disability_rent_3_4: round_currency(rent * 0.75),
        disability_rent_1_2: round_currency(rent * 0.5),
        disability_rent_1_4: round_currency(rent * 0.25),
        widow_rent_full: round_currency(rent * 0.8),
        widow_rent_3_4: round_currency(rent * 0.8 * 0.75),
        widow_rent_1_2: round_currency(rent * 0.8 * 0.5),
        widow_rent_1_4: round_currency(rent * 0.8 * 0.25),
        widow_additional_rent: round_currency(rent * 0.3),
        child_rent: round_currency(rent * 0.4),
        // Two child rents for the same child are capped at 60% of the maximum rent
        double_child_rent: round_currency((rent * 0.8).min(maximum_rent * 0.6)),
        orphan_rent_60pct: round_currency(rent * 0.6),
    }
}

/// Generates the full-contribution scale for a given minimum rent
#[derive(Debug, Clone, Copy)]
pub struct StatutoryScale {
    pub minimum_rent: f64,
}

impl Default for StatutoryScale {
    fn default() -> Self {
        Self {
            minimum_rent: DEFAULT_MINIMUM_RENT,
        }
    }
}

impl StatutoryScale {
    pub fn new(minimum_rent: f64) -> Self {
        Self { minimum_rent }
    }

    /// All bracket rows in ascending threshold order
    pub fn rows(&self) -> Vec<BenefitScaleRow> {
        (0..BRACKET_COUNT)
            .map(|k| {
                let threshold =
                    round_currency(self.minimum_rent * 12.0 * (1.0 + 0.1 * k as f64));
                statutory_row(threshold, self.minimum_rent)
            })
            .collect()
    }
}

impl ScaleRepository for StatutoryScale {
    fn load_scale(&self) -> Result<BenefitScale> {
        BenefitScale::new(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_bounds() {
        let rows = StatutoryScale::default().rows();
        assert_eq!(rows.len(), 51);

        let first = &rows[0];
        assert_eq!(first.income_threshold, 15_120.0);
        assert_eq!(first.old_age_rent_full, 1260.0);

        let last = rows.last().unwrap();
        assert_eq!(last.income_threshold, 90_720.0);
        assert_eq!(last.old_age_rent_full, 2520.0);
    }

    #[test]
    fn test_formula_switch_at_36x_minimum() {
        // 45,360 = 36 x 1,260, both formulas agree on 1,915.20 here
        let row = statutory_row(45_360.0, DEFAULT_MINIMUM_RENT);
        assert_eq!(row.old_age_rent_full, 1915.0);

        let row = statutory_row(16_632.0, DEFAULT_MINIMUM_RENT);
        assert_eq!(row.old_age_rent_full, 1293.0);

        let row = statutory_row(51_408.0, DEFAULT_MINIMUM_RENT);
        assert_eq!(row.old_age_rent_full, 1996.0);
    }

    #[test]
    fn test_dependant_tiers() {
        let row = statutory_row(90_720.0, DEFAULT_MINIMUM_RENT);
        assert_eq!(row.widow_rent_full, 2016.0);
        assert_eq!(row.child_rent, 1008.0);
        assert_eq!(row.orphan_rent_60pct, 1512.0);
        // 80% of 2,520 exceeds the 60%-of-maximum cap
        assert_eq!(row.double_child_rent, 1512.0);

        let row = statutory_row(15_120.0, DEFAULT_MINIMUM_RENT);
        assert_eq!(row.double_child_rent, 1008.0);
        assert_eq!(row.disability_rent_3_4, 945.0);
    }

    #[test]
    fn test_rents_never_decrease() {
        let rows = StatutoryScale::default().rows();
        for pair in rows.windows(2) {
            assert!(pair[0].income_threshold < pair[1].income_threshold);
            assert!(pair[0].old_age_rent_full <= pair[1].old_age_rent_full);
        }
    }
}
