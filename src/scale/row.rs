//! One bracket of the AVS/AI full-contribution pension scale

use serde::{Deserialize, Serialize};

use crate::avs::DisabilityTier;

/// A single bracket of the statutory scale
///
/// Amounts are monthly, in francs, for a full contribution record.
/// Column names in the CSV files match the field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitScaleRow {
    /// Upper bound of the average determining income for this bracket
    pub income_threshold: f64,

    /// Full old-age rent
    pub old_age_rent_full: f64,

    // Disability rents by degree
    pub disability_rent_full: f64,
    pub disability_rent_3_4: f64,
    pub disability_rent_1_2: f64,
    pub disability_rent_1_4: f64,

    // Survivor rents
    pub widow_rent_full: f64,
    pub widow_rent_3_4: f64,
    pub widow_rent_1_2: f64,
    pub widow_rent_1_4: f64,
    /// Supplementary rent for a spouse of a disability pensioner
    pub widow_additional_rent: f64,

    // Dependants
    pub child_rent: f64,
    pub double_child_rent: f64,
    pub orphan_rent_60pct: f64,
}

impl BenefitScaleRow {
    /// Full-contribution disability rent for a given degree
    ///
    /// A full disability rent equals the full old-age rent, so `1/1` reads
    /// `old_age_rent_full` rather than `disability_rent_full`.
    pub fn disability_rent(&self, tier: DisabilityTier) -> f64 {
        match tier {
            DisabilityTier::Full => self.old_age_rent_full,
            DisabilityTier::ThreeQuarters => self.disability_rent_3_4,
            DisabilityTier::Half => self.disability_rent_1_2,
            DisabilityTier::Quarter => self.disability_rent_1_4,
        }
    }

    /// Survivor rent at a given degree
    pub fn widow_rent(&self, tier: DisabilityTier) -> f64 {
        match tier {
            DisabilityTier::Full => self.widow_rent_full,
            DisabilityTier::ThreeQuarters => self.widow_rent_3_4,
            DisabilityTier::Half => self.widow_rent_1_2,
            DisabilityTier::Quarter => self.widow_rent_1_4,
        }
    }

    /// Check the amounts are usable (finite and non-negative)
    pub(crate) fn amounts_are_valid(&self) -> bool {
        [
            self.old_age_rent_full,
            self.disability_rent_full,
            self.disability_rent_3_4,
            self.disability_rent_1_2,
            self.disability_rent_1_4,
            self.widow_rent_full,
            self.widow_rent_3_4,
            self.widow_rent_1_2,
            self.widow_rent_1_4,
            self.widow_additional_rent,
            self.child_rent,
            self.double_child_rent,
            self.orphan_rent_60pct,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}
