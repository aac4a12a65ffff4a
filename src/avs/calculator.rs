//! First-pillar (AVS/AI) pension calculator
//!
//! Every rent is the full-contribution amount from the resolved scale bracket
//! scaled by the full-rent fraction `min(years / 44, 1)`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::profile::{AvsClaimantProfile, DisabilityTier, FULL_CONTRIBUTION_YEARS};
use crate::error::{validate_income, PensionError, Result};
use crate::format::round_currency;
use crate::scale::{BenefitScale, BenefitScaleRow, ScaleRepository};

/// A rent expressed per month and per year, both rounded to the franc
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PensionAmount {
    pub monthly: f64,
    pub annual: f64,
}

impl PensionAmount {
    /// Scale a full monthly rent. Monthly and annual are rounded independently,
    /// so `annual` may differ from `12 * monthly` by a few francs.
    pub fn scaled(full_monthly: f64, fraction: f64) -> Self {
        let exact = full_monthly * fraction;
        Self {
            monthly: round_currency(exact),
            annual: round_currency(exact * 12.0),
        }
    }
}

/// Output of one first-pillar calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvsCalculationResult {
    /// Average determining income used for bracket resolution
    pub income_used: f64,
    pub years_contributed: u8,
    pub full_rent_fraction: f64,
    pub disability_tier: DisabilityTier,

    /// Bracket the income resolved to
    pub scale_row: BenefitScaleRow,

    pub old_age: PensionAmount,
    /// Disability rent at the requested tier
    pub disability: PensionAmount,
    /// Widow/widower rent
    pub survivor: PensionAmount,
    /// Rate per child
    pub child: PensionAmount,
    /// Rate per orphan
    pub orphan: PensionAmount,
}

impl AvsCalculationResult {
    /// Monthly child rents for a number of children
    pub fn children_monthly_total(&self, children: u8) -> f64 {
        self.child.monthly * children as f64
    }

    /// Monthly orphan rents for a number of orphans
    pub fn orphans_monthly_total(&self, orphans: u8) -> f64 {
        self.orphan.monthly * orphans as f64
    }
}

/// Validate contribution years and compute `min(years / 44, 1)`
pub fn full_rent_fraction(years_contributed: u8) -> Result<f64> {
    if years_contributed > FULL_CONTRIBUTION_YEARS {
        return Err(PensionError::validation(format!(
            "years contributed must be between 0 and {}, got {}",
            FULL_CONTRIBUTION_YEARS, years_contributed
        )));
    }
    Ok((years_contributed as f64 / FULL_CONTRIBUTION_YEARS as f64).min(1.0))
}

/// Calculator holding an in-memory copy of the scale
#[derive(Debug, Clone)]
pub struct AvsCalculator {
    scale: BenefitScale,
}

impl AvsCalculator {
    pub fn new(scale: BenefitScale) -> Self {
        Self { scale }
    }

    /// Load the scale once from a repository
    pub fn from_repository<R: ScaleRepository + ?Sized>(repository: &R) -> Result<Self> {
        Ok(Self::new(repository.load_scale()?))
    }

    pub fn scale(&self) -> &BenefitScale {
        &self.scale
    }

    /// Compute all first-pillar rents for an income, contribution record and disability tier
    pub fn calculate_pensions(
        &self,
        income: f64,
        years_contributed: u8,
        disability_tier: DisabilityTier,
    ) -> Result<AvsCalculationResult> {
        validate_income(income)?;
        let fraction = full_rent_fraction(years_contributed)?;
        let row = self.scale.resolve(income)?;

        debug!(
            "AVS calculation: income={:.2} years={} fraction={:.4} bracket={:.2}",
            income, years_contributed, fraction, row.income_threshold
        );

        Ok(AvsCalculationResult {
            income_used: income,
            years_contributed,
            full_rent_fraction: fraction,
            disability_tier,
            old_age: PensionAmount::scaled(row.old_age_rent_full, fraction),
            disability: PensionAmount::scaled(row.disability_rent(disability_tier), fraction),
            survivor: PensionAmount::scaled(row.widow_rent_full, fraction),
            child: PensionAmount::scaled(row.child_rent, fraction),
            orphan: PensionAmount::scaled(row.orphan_rent_60pct, fraction),
            scale_row: row.clone(),
        })
    }

    /// Compute the rents for a stored claimant profile
    pub fn calculate_for_profile(&self, profile: &AvsClaimantProfile) -> Result<AvsCalculationResult> {
        self.calculate_pensions(
            profile.average_annual_income,
            profile.years_contributed,
            profile.effective_disability_tier(),
        )
    }
}
