//! Summary fields written back onto a claimant profile after a calculation
//!
//! Deriving the summary is pure; storing it goes through `ProfileStore`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calculator::AvsCalculationResult;

/// Persistable subset of an `AvsCalculationResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvsProfileSummary {
    pub profile_id: String,
    pub full_rent_fraction: f64,
    pub scale_threshold: f64,
    pub old_age_monthly: f64,
    pub disability_monthly: f64,
    pub survivor_monthly: f64,
    pub calculated_at: DateTime<Utc>,
}

impl AvsProfileSummary {
    pub fn from_result(
        profile_id: impl Into<String>,
        result: &AvsCalculationResult,
        calculated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            profile_id: profile_id.into(),
            full_rent_fraction: result.full_rent_fraction,
            scale_threshold: result.scale_row.income_threshold,
            old_age_monthly: result.old_age.monthly,
            disability_monthly: result.disability.monthly,
            survivor_monthly: result.survivor.monthly,
            calculated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avs::{AvsCalculator, DisabilityTier};
    use crate::scale::StatutoryScale;
    use chrono::TimeZone;

    #[test]
    fn test_summary_from_result() {
        let calc = AvsCalculator::from_repository(&StatutoryScale::default()).unwrap();
        let result = calc.calculate_pensions(50_000.0, 22, DisabilityTier::Full).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let summary = AvsProfileSummary::from_result("p1", &result, at);
        assert_eq!(summary.profile_id, "p1");
        assert_eq!(summary.full_rent_fraction, 0.5);
        assert_eq!(summary.scale_threshold, 51_408.0);
        assert_eq!(summary.old_age_monthly, 998.0);
        assert_eq!(summary.calculated_at, at);
    }
}
