//! Data provider seam: where scale rows, profiles and accounts come from
//!
//! The calculators never touch storage. A provider supplies their inputs and a
//! `ProfileStore` receives the summary written back after a calculation.

pub mod loader;

pub use loader::{load_from_dir, LoadedHousehold};

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;

use crate::avs::{AvsClaimantProfile, AvsProfileSummary};
use crate::error::{PensionError, Result};
use crate::lpp::LppAccount;
use crate::pillar3::ThirdPillarAccount;
use crate::scale::{BenefitScale, BenefitScaleRow, ScaleRepository};

/// Inbound data for the calculation core
pub trait PensionDataProvider {
    /// Full list of scale rows
    fn scale_rows(&self) -> Result<Vec<BenefitScaleRow>>;

    /// Claimant facts for a profile
    fn claimant_profile(&self, profile_id: &str) -> Result<AvsClaimantProfile>;

    /// Active occupational pension accounts of a profile
    fn lpp_accounts(&self, profile_id: &str) -> Result<Vec<LppAccount>>;

    /// Active third-pillar accounts of a profile
    fn third_pillar_accounts(&self, profile_id: &str) -> Result<Vec<ThirdPillarAccount>>;
}

/// Write path for calculation summaries
pub trait ProfileStore {
    fn save_avs_summary(&self, summary: &AvsProfileSummary) -> Result<()>;
}

#[derive(Debug, Default)]
struct Tables {
    scale_rows: Vec<BenefitScaleRow>,
    profiles: HashMap<String, AvsClaimantProfile>,
    lpp_accounts: Vec<LppAccount>,
    third_pillar_accounts: Vec<ThirdPillarAccount>,
    summaries: HashMap<String, AvsProfileSummary>,
}

/// Provider and store backed by in-memory tables
///
/// Accounts are written with full-record upserts and removed by soft delete.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    tables: RwLock<Tables>,
}

fn poisoned() -> PensionError {
    PensionError::data("in-memory tables are unavailable after a panic in another thread")
}

impl InMemoryProvider {
    pub fn new(scale_rows: Vec<BenefitScaleRow>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                scale_rows,
                ..Default::default()
            }),
        }
    }

    /// Build from the tables read by `load_from_dir`
    pub fn from_loaded(loaded: LoadedHousehold) -> Self {
        let profiles = loaded
            .profiles
            .into_iter()
            .map(|p| (p.profile_id.clone(), p))
            .collect();
        Self {
            tables: RwLock::new(Tables {
                scale_rows: loaded.scale_rows,
                profiles,
                lpp_accounts: loaded.lpp_accounts,
                third_pillar_accounts: loaded.third_pillar_accounts,
                summaries: HashMap::new(),
            }),
        }
    }

    pub fn upsert_profile(&self, profile: AvsClaimantProfile) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        tables.profiles.insert(profile.profile_id.clone(), profile);
        Ok(())
    }

    pub fn upsert_lpp_account(&self, account: LppAccount) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        match tables.lpp_accounts.iter().position(|a| a.id == account.id) {
            Some(index) => tables.lpp_accounts[index] = account,
            None => tables.lpp_accounts.push(account),
        }
        Ok(())
    }

    pub fn upsert_third_pillar_account(&self, account: ThirdPillarAccount) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        match tables.third_pillar_accounts.iter().position(|a| a.id == account.id) {
            Some(index) => tables.third_pillar_accounts[index] = account,
            None => tables.third_pillar_accounts.push(account),
        }
        Ok(())
    }

    /// Soft-delete an occupational pension account
    pub fn deactivate_lpp_account(&self, account_id: &str) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        let account = tables
            .lpp_accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| PensionError::not_found(format!("LPP account {}", account_id)))?;
        account.is_active = false;
        debug!("LPP account {} deactivated", account_id);
        Ok(())
    }

    /// Soft-delete a third-pillar account
    pub fn deactivate_third_pillar_account(&self, account_id: &str) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        let account = tables
            .third_pillar_accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| PensionError::not_found(format!("third-pillar account {}", account_id)))?;
        account.is_active = false;
        debug!("Third-pillar account {} deactivated", account_id);
        Ok(())
    }

    /// Last summary saved for a profile
    pub fn avs_summary(&self, profile_id: &str) -> Result<Option<AvsProfileSummary>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.summaries.get(profile_id).cloned())
    }

    /// Identifiers of all known profiles, sorted
    pub fn profile_ids(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let mut ids: Vec<String> = tables.profiles.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn ensure_profile(tables: &Tables, profile_id: &str) -> Result<()> {
        if tables.profiles.contains_key(profile_id) {
            Ok(())
        } else {
            Err(PensionError::not_found(format!("profile {}", profile_id)))
        }
    }
}

impl PensionDataProvider for InMemoryProvider {
    fn scale_rows(&self) -> Result<Vec<BenefitScaleRow>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.scale_rows.clone())
    }

    fn claimant_profile(&self, profile_id: &str) -> Result<AvsClaimantProfile> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        tables
            .profiles
            .get(profile_id)
            .cloned()
            .ok_or_else(|| PensionError::not_found(format!("profile {}", profile_id)))
    }

    fn lpp_accounts(&self, profile_id: &str) -> Result<Vec<LppAccount>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Self::ensure_profile(&tables, profile_id)?;
        Ok(tables
            .lpp_accounts
            .iter()
            .filter(|a| a.profile_id == profile_id && a.is_active)
            .cloned()
            .collect())
    }

    fn third_pillar_accounts(&self, profile_id: &str) -> Result<Vec<ThirdPillarAccount>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Self::ensure_profile(&tables, profile_id)?;
        Ok(tables
            .third_pillar_accounts
            .iter()
            .filter(|a| a.profile_id == profile_id && a.is_active)
            .cloned()
            .collect())
    }
}

impl ScaleRepository for InMemoryProvider {
    fn load_scale(&self) -> Result<BenefitScale> {
        BenefitScale::new(self.scale_rows()?)
    }
}

impl ProfileStore for InMemoryProvider {
    fn save_avs_summary(&self, summary: &AvsProfileSummary) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        Self::ensure_profile(&tables, &summary.profile_id)?;
        tables
            .summaries
            .insert(summary.profile_id.clone(), summary.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lpp::{ProjectedRents, RetirementAge};
    use crate::pillar3::ThirdPillarType;
    use crate::scale::StatutoryScale;
    use chrono::Utc;

    fn provider() -> InMemoryProvider {
        let provider = InMemoryProvider::new(StatutoryScale::default().rows());
        provider
            .upsert_profile(AvsClaimantProfile::new("p1", 50_000.0, 44))
            .unwrap();
        provider
    }

    #[test]
    fn test_unknown_profile_is_not_found() {
        let provider = provider();
        assert_eq!(
            provider.claimant_profile("nobody").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(provider.lpp_accounts("nobody").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            provider.third_pillar_accounts("nobody").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_known_profile_without_accounts() {
        let provider = provider();
        assert!(provider.lpp_accounts("p1").unwrap().is_empty());
        assert!(provider.third_pillar_accounts("p1").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_full_record() {
        let provider = provider();
        let mut account = LppAccount::new("a1", "p1");
        account.current_savings = Some(10_000.0);
        account.widow_rent = Some(4_000.0);
        provider.upsert_lpp_account(account).unwrap();

        let mut replacement = LppAccount::new("a1", "p1");
        replacement.projected_rents = ProjectedRents::default().with(RetirementAge::Age65, 9_000.0);
        provider.upsert_lpp_account(replacement).unwrap();

        let accounts = provider.lpp_accounts("p1").unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].current_savings, None);
        assert_eq!(accounts[0].widow_rent, None);
        assert_eq!(accounts[0].annual_rent_at_65(), 9_000.0);
    }

    #[test]
    fn test_soft_delete_hides_accounts() {
        let provider = provider();
        provider.upsert_lpp_account(LppAccount::new("a1", "p1")).unwrap();
        provider.upsert_lpp_account(LppAccount::new("a2", "p1")).unwrap();
        provider
            .upsert_third_pillar_account(ThirdPillarAccount::new("t1", "p1", ThirdPillarType::Bank3a))
            .unwrap();

        provider.deactivate_lpp_account("a1").unwrap();
        provider.deactivate_third_pillar_account("t1").unwrap();

        let accounts = provider.lpp_accounts("p1").unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "a2");
        assert!(provider.third_pillar_accounts("p1").unwrap().is_empty());

        assert_eq!(
            provider.deactivate_lpp_account("zzz").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_accounts_filtered_by_profile() {
        let provider = provider();
        provider
            .upsert_profile(AvsClaimantProfile::new("p2", 30_000.0, 20))
            .unwrap();
        provider.upsert_lpp_account(LppAccount::new("a1", "p1")).unwrap();
        provider.upsert_lpp_account(LppAccount::new("a2", "p2")).unwrap();

        assert_eq!(provider.lpp_accounts("p2").unwrap()[0].id, "a2");
        assert_eq!(provider.profile_ids().unwrap(), vec!["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn test_provider_as_scale_repository() {
        let scale = provider().load_scale().unwrap();
        assert_eq!(scale.len(), 51);
    }

    #[test]
    fn test_save_summary() {
        let provider = provider();
        let summary = AvsProfileSummary {
            profile_id: "p1".to_string(),
            full_rent_fraction: 1.0,
            scale_threshold: 51_408.0,
            old_age_monthly: 1_996.0,
            disability_monthly: 1_996.0,
            survivor_monthly: 1_597.0,
            calculated_at: Utc::now(),
        };
        provider.save_avs_summary(&summary).unwrap();
        assert_eq!(provider.avs_summary("p1").unwrap(), Some(summary.clone()));

        let mut orphaned = summary;
        orphaned.profile_id = "nobody".to_string();
        assert!(provider.save_avs_summary(&orphaned).is_err());
    }
}
