//! Household rollup of occupational pension accounts
//!
//! Each category is summed across accounts (missing values count as zero).
//! Monthly figures are derived from the summed annual total, never summed
//! per account, so `monthly == round(annual / 12)` always holds.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::account::{LppAccount, RetirementAge};
use crate::format::round_currency;

/// Early-retirement rent stated on one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyRetirementOption {
    pub account_id: String,
    pub provider: String,
    pub age: u8,
    pub annual_rent: f64,
    pub monthly_rent: f64,
}

/// Summed occupational pension benefits for one profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LppAnalysis {
    pub total_current_savings: f64,
    pub total_projected_savings: f64,

    pub total_annual_rent_65: f64,
    pub total_monthly_rent_65: f64,

    pub total_disability_rent_annual: f64,
    pub total_disability_rent_monthly: f64,
    pub total_disability_child_rent_annual: f64,

    /// Base plus supplementary death capital
    pub total_death_capital: f64,

    pub total_widow_rent_annual: f64,
    pub total_widow_rent_monthly: f64,

    pub total_orphan_rent_annual: f64,
    pub total_orphan_rent_monthly: f64,

    /// Ages 60-64 with a stated rent, per account
    pub early_retirement_options: Vec<EarlyRetirementOption>,

    pub total_accounts: usize,

    pub longest_waiting_period_days: Option<u32>,
    pub latest_certificate_date: Option<NaiveDate>,
}

fn monthly_from_annual(annual: f64) -> f64 {
    round_currency(annual / 12.0)
}

/// Aggregate the active accounts of one profile
///
/// Soft-deleted accounts are skipped. An empty list gives an all-zero analysis.
pub fn aggregate(accounts: &[LppAccount]) -> LppAnalysis {
    let mut analysis = LppAnalysis::default();

    for account in accounts {
        if !account.is_active {
            warn!("Skipping inactive LPP account {}", account.id);
            continue;
        }

        analysis.total_accounts += 1;
        analysis.total_current_savings += account.current_savings.unwrap_or(0.0);
        analysis.total_projected_savings += account.projected_savings_at_retirement.unwrap_or(0.0);
        analysis.total_annual_rent_65 += account.annual_rent_at_65();
        analysis.total_disability_rent_annual += account.disability_rent.unwrap_or(0.0);
        analysis.total_disability_child_rent_annual += account.disability_child_rent.unwrap_or(0.0);
        analysis.total_death_capital += account.total_death_capital();
        analysis.total_widow_rent_annual += account.widow_rent.unwrap_or(0.0);
        analysis.total_orphan_rent_annual += account.orphan_rent.unwrap_or(0.0);

        for age in RetirementAge::EARLY {
            if let Some(rent) = account.projected_rents.get(age).filter(|r| *r > 0.0) {
                analysis.early_retirement_options.push(EarlyRetirementOption {
                    account_id: account.id.clone(),
                    provider: account.provider.clone(),
                    age: age.years(),
                    annual_rent: rent,
                    monthly_rent: monthly_from_annual(rent),
                });
            }
        }

        analysis.longest_waiting_period_days =
            analysis.longest_waiting_period_days.max(account.waiting_period_days);
        analysis.latest_certificate_date =
            analysis.latest_certificate_date.max(account.certificate_date);
    }

    analysis.total_monthly_rent_65 = monthly_from_annual(analysis.total_annual_rent_65);
    analysis.total_disability_rent_monthly =
        monthly_from_annual(analysis.total_disability_rent_annual);
    analysis.total_widow_rent_monthly = monthly_from_annual(analysis.total_widow_rent_annual);
    analysis.total_orphan_rent_monthly = monthly_from_annual(analysis.total_orphan_rent_annual);

    debug!(
        "LPP aggregate over {} accounts: rent at 65 = {:.2}/year",
        analysis.total_accounts, analysis.total_annual_rent_65
    );

    analysis
}

impl LppAnalysis {
    /// Early-retirement options for one age across all accounts
    pub fn options_at(&self, age: u8) -> impl Iterator<Item = &EarlyRetirementOption> {
        self.early_retirement_options.iter().filter(move |o| o.age == age)
    }
}
