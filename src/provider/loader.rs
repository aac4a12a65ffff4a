//! Load a household data set from a directory of CSV files
//!
//! Expected files:
//! - scale.csv (optional, statutory scale 44 when absent)
//! - profiles.csv
//! - lpp_accounts.csv
//! - third_pillar_accounts.csv (optional)

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::avs::{AvsClaimantProfile, DisabilityTier, MaritalStatus};
use crate::error::{PensionError, Result};
use crate::lpp::{LppAccount, ProjectedRents};
use crate::pillar3::{ThirdPillarAccount, ThirdPillarType};
use crate::scale::{load_scale_rows, BenefitScaleRow, StatutoryScale};

fn default_active() -> bool {
    true
}

/// Raw CSV row of profiles.csv
#[derive(Debug, Deserialize)]
struct ProfileRow {
    profile_id: String,
    average_annual_income: f64,
    years_contributed: u8,
    marital_status: String,
    #[serde(default)]
    disability_tier: Option<String>,
    #[serde(default)]
    number_of_children: Option<u8>,
    #[serde(default)]
    birth_date: Option<NaiveDate>,
}

impl ProfileRow {
    fn to_profile(self) -> Result<AvsClaimantProfile> {
        let marital_status: MaritalStatus = self.marital_status.parse()?;

        let disability_tier = match self.disability_tier.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(code.parse::<DisabilityTier>().map_err(|e| {
                PensionError::data(format!("profile {}: {}", self.profile_id, e))
            })?),
        };

        Ok(AvsClaimantProfile {
            profile_id: self.profile_id,
            average_annual_income: self.average_annual_income,
            years_contributed: self.years_contributed,
            marital_status,
            disability_tier,
            number_of_children: self.number_of_children.unwrap_or(0),
            birth_date: self.birth_date,
        })
    }
}

/// Raw CSV row of lpp_accounts.csv, one column per projected rent age
#[derive(Debug, Deserialize)]
struct LppRow {
    id: String,
    profile_id: String,
    #[serde(default)]
    provider: String,
    current_savings: Option<f64>,
    projected_savings_at_retirement: Option<f64>,
    projected_retirement_rent_at_60: Option<f64>,
    projected_retirement_rent_at_61: Option<f64>,
    projected_retirement_rent_at_62: Option<f64>,
    projected_retirement_rent_at_63: Option<f64>,
    projected_retirement_rent_at_64: Option<f64>,
    projected_retirement_rent_at_65: Option<f64>,
    disability_rent: Option<f64>,
    disability_child_rent: Option<f64>,
    widow_rent: Option<f64>,
    orphan_rent: Option<f64>,
    death_capital: Option<f64>,
    supplementary_death_capital: Option<f64>,
    waiting_period_days: Option<u32>,
    certificate_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    is_active: bool,
}

impl LppRow {
    fn to_account(self) -> LppAccount {
        let projected_rents = ProjectedRents {
            at_60: self.projected_retirement_rent_at_60,
            at_61: self.projected_retirement_rent_at_61,
            at_62: self.projected_retirement_rent_at_62,
            at_63: self.projected_retirement_rent_at_63,
            at_64: self.projected_retirement_rent_at_64,
            at_65: self.projected_retirement_rent_at_65,
        };

        LppAccount {
            id: self.id,
            profile_id: self.profile_id,
            provider: self.provider,
            current_savings: self.current_savings,
            projected_savings_at_retirement: self.projected_savings_at_retirement,
            projected_rents,
            disability_rent: self.disability_rent,
            disability_child_rent: self.disability_child_rent,
            widow_rent: self.widow_rent,
            orphan_rent: self.orphan_rent,
            death_capital: self.death_capital,
            supplementary_death_capital: self.supplementary_death_capital,
            waiting_period_days: self.waiting_period_days,
            certificate_date: self.certificate_date,
            is_active: self.is_active,
        }
    }
}

/// Raw CSV row of third_pillar_accounts.csv
#[derive(Debug, Deserialize)]
struct ThirdPillarRow {
    id: String,
    profile_id: String,
    #[serde(default)]
    provider: String,
    account_type: String,
    current_amount: Option<f64>,
    annual_contribution: Option<f64>,
    return_rate: Option<f64>,
    projected_amount_at_retirement: Option<f64>,
    disability_rent: Option<f64>,
    death_capital: Option<f64>,
    #[serde(default = "default_active")]
    is_active: bool,
}

impl ThirdPillarRow {
    fn to_account(self) -> Result<ThirdPillarAccount> {
        let account_type: ThirdPillarType = self.account_type.parse()?;

        Ok(ThirdPillarAccount {
            id: self.id,
            profile_id: self.profile_id,
            provider: self.provider,
            account_type,
            current_amount: self.current_amount,
            annual_contribution: self.annual_contribution,
            return_rate: self.return_rate,
            projected_amount_at_retirement: self.projected_amount_at_retirement,
            disability_rent: self.disability_rent,
            death_capital: self.death_capital,
            is_active: self.is_active,
        })
    }
}

/// Load claimant profiles from any reader
pub fn load_profiles_from_reader<R: Read>(reader: R) -> Result<Vec<AvsClaimantProfile>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut profiles = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ProfileRow = result?;
        profiles.push(row.to_profile()?);
    }

    Ok(profiles)
}

/// Load occupational pension accounts from any reader
pub fn load_lpp_accounts_from_reader<R: Read>(reader: R) -> Result<Vec<LppAccount>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LppRow = result?;
        accounts.push(row.to_account());
    }

    Ok(accounts)
}

/// Load third-pillar accounts from any reader
pub fn load_third_pillar_accounts_from_reader<R: Read>(reader: R) -> Result<Vec<ThirdPillarAccount>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ThirdPillarRow = result?;
        accounts.push(row.to_account()?);
    }

    Ok(accounts)
}

/// Load occupational pension accounts from a CSV file
pub fn load_lpp_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<LppAccount>> {
    load_lpp_accounts_from_reader(std::fs::File::open(path)?)
}

/// Load third-pillar accounts from a CSV file
pub fn load_third_pillar_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<ThirdPillarAccount>> {
    load_third_pillar_accounts_from_reader(std::fs::File::open(path)?)
}

/// All tables of a household data directory
#[derive(Debug, Clone)]
pub struct LoadedHousehold {
    pub scale_rows: Vec<BenefitScaleRow>,
    pub profiles: Vec<AvsClaimantProfile>,
    pub lpp_accounts: Vec<LppAccount>,
    pub third_pillar_accounts: Vec<ThirdPillarAccount>,
}

/// Load every table from a data directory
pub fn load_from_dir(path: &Path) -> Result<LoadedHousehold> {
    let scale_path = path.join("scale.csv");
    let scale_rows = if scale_path.exists() {
        load_scale_rows(&scale_path)?
    } else {
        StatutoryScale::default().rows()
    };

    let profiles = load_profiles_from_reader(std::fs::File::open(path.join("profiles.csv"))?)?;
    let lpp_accounts = load_lpp_accounts(path.join("lpp_accounts.csv"))?;

    let third_pillar_path = path.join("third_pillar_accounts.csv");
    let third_pillar_accounts = if third_pillar_path.exists() {
        load_third_pillar_accounts(&third_pillar_path)?
    } else {
        Vec::new()
    };

    info!(
        "Loaded {} profiles, {} LPP accounts, {} third-pillar accounts from {}",
        profiles.len(),
        lpp_accounts.len(),
        third_pillar_accounts.len(),
        path.display()
    );

    Ok(LoadedHousehold {
        scale_rows,
        profiles,
        lpp_accounts,
        third_pillar_accounts,
    })
}
