//! Household rollup of third-pillar accounts

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::account::{ThirdPillarAccount, ThirdPillarType};
use crate::format::round_currency;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThirdPillarAnalysis {
    pub total_current_amount: f64,
    pub total_projected_amount: f64,
    pub total_annual_contribution: f64,

    /// Insurance subtypes only
    pub total_disability_rent_annual: f64,
    pub total_disability_rent_monthly: f64,
    pub total_death_capital: f64,

    /// Return rate weighted by current amount, `None` when no account states one
    pub weighted_return_rate: Option<f64>,

    pub total_accounts: usize,
    pub bank_3a_accounts: usize,
    pub insurance_3a_accounts: usize,
    pub pillar_3b_accounts: usize,
}

/// Aggregate the active third-pillar accounts of one profile
pub fn aggregate(accounts: &[ThirdPillarAccount]) -> ThirdPillarAnalysis {
    let mut analysis = ThirdPillarAnalysis::default();
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;

    for account in accounts {
        if !account.is_active {
            warn!("Skipping inactive third-pillar account {}", account.id);
            continue;
        }

        analysis.total_accounts += 1;
        match account.account_type {
            ThirdPillarType::Bank3a => analysis.bank_3a_accounts += 1,
            ThirdPillarType::Insurance3a => analysis.insurance_3a_accounts += 1,
            ThirdPillarType::Pillar3b => analysis.pillar_3b_accounts += 1,
        }

        let current = account.current_amount.unwrap_or(0.0);
        analysis.total_current_amount += current;
        analysis.total_projected_amount += account.projected_amount_at_retirement.unwrap_or(0.0);
        analysis.total_annual_contribution += account.annual_contribution.unwrap_or(0.0);
        analysis.total_disability_rent_annual += account.insured_disability_rent();
        analysis.total_death_capital += account.insured_death_capital();

        if let Some(rate) = account.return_rate {
            weighted_sum += rate * current;
            weight += current;
        }
    }

    analysis.total_disability_rent_monthly =
        round_currency(analysis.total_disability_rent_annual / 12.0);
    if weight > 0.0 {
        analysis.weighted_return_rate = Some(weighted_sum / weight);
    }

    debug!(
        "Third-pillar aggregate over {} accounts: current = {:.2}",
        analysis.total_accounts, analysis.total_current_amount
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn account(id: &str, account_type: ThirdPillarType, current: f64) -> ThirdPillarAccount {
        let mut a = ThirdPillarAccount::new(id, "p1", account_type);
        a.current_amount = Some(current);
        a
    }

    #[test]
    fn test_empty_aggregation() {
        let analysis = aggregate(&[]);
        assert_eq!(analysis, ThirdPillarAnalysis::default());
        assert_eq!(analysis.weighted_return_rate, None);
    }

    #[test]
    fn test_mixed_accounts() {
        let mut bank = account("t1", ThirdPillarType::Bank3a, 40_000.0);
        bank.annual_contribution = Some(7_258.0);
        bank.projected_amount_at_retirement = Some(250_000.0);
        bank.disability_rent = Some(6_000.0);
        bank.return_rate = Some(0.01);

        let mut insured = account("t2", ThirdPillarType::Insurance3a, 10_000.0);
        insured.annual_contribution = Some(3_000.0);
        insured.disability_rent = Some(18_000.0);
        insured.death_capital = Some(150_000.0);
        insured.return_rate = Some(0.03);

        let mut free = account("t3", ThirdPillarType::Pillar3b, 0.0);
        free.death_capital = Some(50_000.0);

        let analysis = aggregate(&[bank, insured, free]);

        assert_eq!(analysis.total_accounts, 3);
        assert_eq!(analysis.bank_3a_accounts, 1);
        assert_eq!(analysis.insurance_3a_accounts, 1);
        assert_eq!(analysis.pillar_3b_accounts, 1);
        assert_eq!(analysis.total_current_amount, 50_000.0);
        assert_eq!(analysis.total_projected_amount, 250_000.0);
        assert_eq!(analysis.total_annual_contribution, 10_258.0);

        // The bank account's disability rent is ignored
        assert_eq!(analysis.total_disability_rent_annual, 18_000.0);
        assert_eq!(analysis.total_disability_rent_monthly, 1_500.0);
        assert_eq!(analysis.total_death_capital, 200_000.0);

        // (0.01 x 40,000 + 0.03 x 10,000) / 50,000
        assert_relative_eq!(analysis.weighted_return_rate.unwrap(), 0.014, epsilon = 1e-12);
    }

    #[test]
    fn test_inactive_accounts_skipped() {
        let mut closed = account("t2", ThirdPillarType::Insurance3a, 99_000.0);
        closed.is_active = false;

        let analysis = aggregate(&[account("t1", ThirdPillarType::Bank3a, 1_000.0), closed]);
        assert_eq!(analysis.total_accounts, 1);
        assert_eq!(analysis.total_current_amount, 1_000.0);
        assert_eq!(analysis.insurance_3a_accounts, 0);
    }
}
