//! Household overview across the three pillars
//!
//! `PensionService` pulls a profile's data from a provider, runs the pure
//! calculators and combines their results. Profiles are independent, so a
//! batch is computed in parallel.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::avs::{AvsCalculationResult, AvsCalculator, AvsClaimantProfile, AvsProfileSummary};
use crate::error::Result;
use crate::lpp::{self, LppAccount, LppAnalysis};
use crate::pillar3::{self, ThirdPillarAccount, ThirdPillarAnalysis};
use crate::provider::{PensionDataProvider, ProfileStore};
use crate::scale::BenefitScale;

/// Combined benefits of all three pillars
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementOverview {
    /// AVS old-age rent plus LPP rent at 65
    pub monthly_income_at_reference_age: f64,
    pub annual_income_at_reference_age: f64,

    /// AVS disability rent plus LPP and insured third-pillar disability rents
    pub disability_monthly_income: f64,

    /// AVS child rents for the claimant's children
    pub children_monthly_supplement: f64,

    /// AVS survivor rent plus LPP widow rent
    pub survivor_monthly_income: f64,
    pub has_spouse: bool,

    /// LPP projected savings plus third-pillar projected amounts
    pub retirement_capital: f64,

    /// LPP and insured third-pillar death capital
    pub death_capital: f64,
}

impl RetirementOverview {
    pub fn build(
        profile: &AvsClaimantProfile,
        avs: &AvsCalculationResult,
        lpp: &LppAnalysis,
        pillar3: &ThirdPillarAnalysis,
    ) -> Self {
        Self {
            monthly_income_at_reference_age: avs.old_age.monthly + lpp.total_monthly_rent_65,
            annual_income_at_reference_age: avs.old_age.annual + lpp.total_annual_rent_65,
            disability_monthly_income: avs.disability.monthly
                + lpp.total_disability_rent_monthly
                + pillar3.total_disability_rent_monthly,
            children_monthly_supplement: avs.children_monthly_total(profile.number_of_children),
            survivor_monthly_income: avs.survivor.monthly + lpp.total_widow_rent_monthly,
            has_spouse: profile.marital_status.has_spouse(),
            retirement_capital: lpp.total_projected_savings + pillar3.total_projected_amount,
            death_capital: lpp.total_death_capital + pillar3.total_death_capital,
        }
    }
}

/// Everything computed for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdAnalysis {
    pub profile_id: String,
    pub avs: AvsCalculationResult,
    pub lpp: LppAnalysis,
    pub third_pillar: ThirdPillarAnalysis,
    pub overview: RetirementOverview,
}

impl HouseholdAnalysis {
    /// Pure computation from already-fetched inputs
    pub fn compute(
        calculator: &AvsCalculator,
        profile: &AvsClaimantProfile,
        lpp_accounts: &[LppAccount],
        third_pillar_accounts: &[ThirdPillarAccount],
    ) -> Result<Self> {
        let avs = calculator.calculate_for_profile(profile)?;
        let lpp = lpp::aggregate(lpp_accounts);
        let third_pillar = pillar3::aggregate(third_pillar_accounts);
        let overview = RetirementOverview::build(profile, &avs, &lpp, &third_pillar);

        Ok(Self {
            profile_id: profile.profile_id.clone(),
            avs,
            lpp,
            third_pillar,
            overview,
        })
    }

    /// Summary to write back onto the claimant profile
    pub fn avs_summary(&self, calculated_at: DateTime<Utc>) -> AvsProfileSummary {
        AvsProfileSummary::from_result(self.profile_id.clone(), &self.avs, calculated_at)
    }
}

/// Calculation service over a data provider
pub struct PensionService<P> {
    provider: P,
    calculator: AvsCalculator,
}

impl<P: PensionDataProvider> PensionService<P> {
    /// Load the scale once from the provider and keep it in memory
    pub fn new(provider: P) -> Result<Self> {
        let scale = BenefitScale::new(provider.scale_rows()?)?;
        Ok(Self {
            provider,
            calculator: AvsCalculator::new(scale),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn calculator(&self) -> &AvsCalculator {
        &self.calculator
    }

    /// Fetch and compute one profile
    pub fn household(&self, profile_id: &str) -> Result<HouseholdAnalysis> {
        let profile = self.provider.claimant_profile(profile_id)?;
        let lpp_accounts = self.provider.lpp_accounts(profile_id)?;
        let third_pillar_accounts = self.provider.third_pillar_accounts(profile_id)?;

        debug!(
            "Profile {}: {} LPP accounts, {} third-pillar accounts",
            profile_id,
            lpp_accounts.len(),
            third_pillar_accounts.len()
        );

        HouseholdAnalysis::compute(&self.calculator, &profile, &lpp_accounts, &third_pillar_accounts)
    }

    /// Compute and store the first-pillar summary for a profile
    pub fn refresh_avs_summary<S: ProfileStore + ?Sized>(
        &self,
        store: &S,
        profile_id: &str,
        calculated_at: DateTime<Utc>,
    ) -> Result<AvsProfileSummary> {
        let profile = self.provider.claimant_profile(profile_id)?;
        let result = self.calculator.calculate_for_profile(&profile)?;
        let summary = AvsProfileSummary::from_result(profile_id, &result, calculated_at);
        store.save_avs_summary(&summary)?;
        Ok(summary)
    }
}

impl<P: PensionDataProvider + Sync> PensionService<P> {
    /// Compute many profiles in parallel, results in input order
    pub fn households(&self, profile_ids: &[String]) -> Vec<Result<HouseholdAnalysis>> {
        info!("Computing {} households", profile_ids.len());
        profile_ids
            .par_iter()
            .map(|id| self.household(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::provider::{load_from_dir, InMemoryProvider};
    use chrono::TimeZone;
    use std::path::Path;

    fn sample_service() -> PensionService<InMemoryProvider> {
        let loaded = load_from_dir(Path::new("data/sample")).unwrap();
        PensionService::new(InMemoryProvider::from_loaded(loaded)).unwrap()
    }

    #[test]
    fn test_sample_household_anna() {
        let analysis = sample_service().household("anna").unwrap();

        assert_eq!(analysis.avs.old_age.monthly, 1_996.0);
        assert_eq!(analysis.lpp.total_annual_rent_65, 30_000.0);
        assert_eq!(analysis.lpp.total_monthly_rent_65, 2_500.0);

        let overview = &analysis.overview;
        assert_eq!(overview.monthly_income_at_reference_age, 4_496.0);
        assert_eq!(overview.annual_income_at_reference_age, 23_952.0 + 30_000.0);
        // 1,996 AVS + 20,400 / 12 LPP + 12,000 / 12 insured 3a
        assert_eq!(overview.disability_monthly_income, 4_696.0);
        assert_eq!(overview.children_monthly_supplement, 1_596.0);
        // 1,597 AVS + 12,240 / 12 LPP
        assert_eq!(overview.survivor_monthly_income, 2_617.0);
        assert!(overview.has_spouse);
        assert_eq!(overview.retirement_capital, 830_000.0);
        assert_eq!(overview.death_capital, 205_000.0);
    }

    #[test]
    fn test_sample_household_marc_skips_closed_account() {
        let analysis = sample_service().household("marc").unwrap();

        assert_eq!(analysis.lpp.total_accounts, 1);
        assert_eq!(analysis.lpp.total_current_savings, 140_000.0);
        assert_eq!(analysis.avs.scale_row.income_threshold, 72_576.0);
        // Half disability: 1,139 x 30/44
        assert_eq!(analysis.avs.disability.monthly, 777.0);
        // Bank 3a disability figure is not counted
        assert_eq!(analysis.third_pillar.total_disability_rent_annual, 0.0);
        assert!(!analysis.overview.has_spouse);
    }

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let service = sample_service();
        let ids = vec!["marc".to_string(), "nobody".to_string(), "anna".to_string()];
        let results = service.households(&ids);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().profile_id, "marc");
        assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(results[2].as_ref().unwrap().profile_id, "anna");
    }

    #[test]
    fn test_refresh_avs_summary_persists() {
        let service = sample_service();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();

        let summary = service
            .refresh_avs_summary(service.provider(), "anna", at)
            .unwrap();
        assert_eq!(summary.old_age_monthly, 1_996.0);
        assert_eq!(service.provider().avs_summary("anna").unwrap(), Some(summary));
    }

    #[test]
    fn test_compute_without_accounts() {
        let calculator = sample_service().calculator().clone();
        let profile = AvsClaimantProfile::new("solo", 50_000.0, 22);
        let analysis = HouseholdAnalysis::compute(&calculator, &profile, &[], &[]).unwrap();

        assert_eq!(analysis.lpp.total_accounts, 0);
        assert_eq!(analysis.overview.monthly_income_at_reference_age, 998.0);
        assert_eq!(analysis.overview.retirement_capital, 0.0);
        assert_eq!(analysis.avs_summary(Utc::now()).full_rent_fraction, 0.5);
    }
}
