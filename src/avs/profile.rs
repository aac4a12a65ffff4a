//! Claimant data structures for first-pillar calculations

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PensionError, Result};

/// Years of contributions required for a full rent
pub const FULL_CONTRIBUTION_YEARS: u8 = 44;

/// Reference retirement age
pub const REFERENCE_AGE: u32 = 65;

/// Legally recognized degree of disability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisabilityTier {
    #[serde(rename = "1/1")]
    Full,
    #[serde(rename = "3/4")]
    ThreeQuarters,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "1/4")]
    Quarter,
}

impl DisabilityTier {
    pub const ALL: [DisabilityTier; 4] = [
        DisabilityTier::Full,
        DisabilityTier::ThreeQuarters,
        DisabilityTier::Half,
        DisabilityTier::Quarter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisabilityTier::Full => "1/1",
            DisabilityTier::ThreeQuarters => "3/4",
            DisabilityTier::Half => "1/2",
            DisabilityTier::Quarter => "1/4",
        }
    }

    /// Degree as a fraction of a full rent
    pub fn degree(&self) -> f64 {
        match self {
            DisabilityTier::Full => 1.0,
            DisabilityTier::ThreeQuarters => 0.75,
            DisabilityTier::Half => 0.5,
            DisabilityTier::Quarter => 0.25,
        }
    }
}

impl Default for DisabilityTier {
    fn default() -> Self {
        DisabilityTier::Full
    }
}

impl FromStr for DisabilityTier {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1/1" => Ok(DisabilityTier::Full),
            "3/4" => Ok(DisabilityTier::ThreeQuarters),
            "1/2" => Ok(DisabilityTier::Half),
            "1/4" => Ok(DisabilityTier::Quarter),
            other => Err(PensionError::validation(format!(
                "unknown disability fraction '{}', expected one of 1/1, 3/4, 1/2, 1/4",
                other
            ))),
        }
    }
}

impl fmt::Display for DisabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Civil status of the claimant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Widowed,
    Divorced,
    RegisteredPartnership,
}

impl MaritalStatus {
    /// Whether a surviving spouse or partner could claim a survivor rent
    pub fn has_spouse(&self) -> bool {
        matches!(self, MaritalStatus::Married | MaritalStatus::RegisteredPartnership)
    }
}

impl FromStr for MaritalStatus {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "single" => Ok(MaritalStatus::Single),
            "married" => Ok(MaritalStatus::Married),
            "widowed" => Ok(MaritalStatus::Widowed),
            "divorced" => Ok(MaritalStatus::Divorced),
            "registered_partnership" => Ok(MaritalStatus::RegisteredPartnership),
            other => Err(PensionError::data(format!("unknown marital status: {}", other))),
        }
    }
}

/// Pension-relevant facts about one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvsClaimantProfile {
    pub profile_id: String,

    /// Average determining annual income
    pub average_annual_income: f64,

    /// Full contribution years (0-44)
    pub years_contributed: u8,

    #[serde(default)]
    pub marital_status: MaritalStatus,

    /// Degree of disability, if the claimant receives a disability rent
    #[serde(default)]
    pub disability_tier: Option<DisabilityTier>,

    #[serde(default)]
    pub number_of_children: u8,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl AvsClaimantProfile {
    pub fn new(profile_id: impl Into<String>, average_annual_income: f64, years_contributed: u8) -> Self {
        Self {
            profile_id: profile_id.into(),
            average_annual_income,
            years_contributed,
            marital_status: MaritalStatus::default(),
            disability_tier: None,
            number_of_children: 0,
            birth_date: None,
        }
    }

    /// Tier used for the disability calculation (full when none is recorded)
    pub fn effective_disability_tier(&self) -> DisabilityTier {
        self.disability_tier.unwrap_or_default()
    }

    /// Age in completed years on a given date
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if date < birth {
            return None;
        }
        let mut age = date.year() - birth.year();
        if (date.month(), date.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age as u32)
    }

    /// Whether the claimant has reached the reference age on a given date
    pub fn reaches_reference_age_on(&self, date: NaiveDate) -> Option<bool> {
        self.age_on(date).map(|age| age >= REFERENCE_AGE)
    }
}
