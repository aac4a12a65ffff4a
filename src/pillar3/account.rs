//! Private retirement savings (third pillar) accounts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PensionError, Result};

fn default_active() -> bool {
    true
}

/// Account subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThirdPillarType {
    /// Tied pension provision with a bank
    #[serde(rename = "3a_bank")]
    Bank3a,
    /// Tied pension provision with an insurer
    #[serde(rename = "3a_insurance")]
    Insurance3a,
    /// Free pension provision
    #[serde(rename = "3b")]
    Pillar3b,
}

impl ThirdPillarType {
    /// Insurance-only benefits (disability rent, death capital) apply to this subtype
    pub fn carries_insurance(&self) -> bool {
        matches!(self, ThirdPillarType::Insurance3a | ThirdPillarType::Pillar3b)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThirdPillarType::Bank3a => "3a_bank",
            ThirdPillarType::Insurance3a => "3a_insurance",
            ThirdPillarType::Pillar3b => "3b",
        }
    }
}

impl FromStr for ThirdPillarType {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "3a_bank" => Ok(ThirdPillarType::Bank3a),
            "3a_insurance" => Ok(ThirdPillarType::Insurance3a),
            "3b" => Ok(ThirdPillarType::Pillar3b),
            other => Err(PensionError::data(format!("unknown third-pillar account type: {}", other))),
        }
    }
}

impl fmt::Display for ThirdPillarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdPillarAccount {
    pub id: String,
    pub profile_id: String,
    #[serde(default)]
    pub provider: String,
    pub account_type: ThirdPillarType,

    #[serde(default)]
    pub current_amount: Option<f64>,
    #[serde(default)]
    pub annual_contribution: Option<f64>,
    /// Expected annual return, e.g. 0.02 for 2%
    #[serde(default)]
    pub return_rate: Option<f64>,
    /// Stored projection at retirement (not derived here)
    #[serde(default)]
    pub projected_amount_at_retirement: Option<f64>,

    // Insurance subtypes only
    /// Annual disability rent
    #[serde(default)]
    pub disability_rent: Option<f64>,
    #[serde(default)]
    pub death_capital: Option<f64>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ThirdPillarAccount {
    pub fn new(
        id: impl Into<String>,
        profile_id: impl Into<String>,
        account_type: ThirdPillarType,
    ) -> Self {
        Self {
            id: id.into(),
            profile_id: profile_id.into(),
            provider: String::new(),
            account_type,
            current_amount: None,
            annual_contribution: None,
            return_rate: None,
            projected_amount_at_retirement: None,
            disability_rent: None,
            death_capital: None,
            is_active: true,
        }
    }

    /// Disability rent, always zero for bank accounts
    pub fn insured_disability_rent(&self) -> f64 {
        if self.account_type.carries_insurance() {
            self.disability_rent.unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Death capital, always zero for bank accounts
    pub fn insured_death_capital(&self) -> f64 {
        if self.account_type.carries_insurance() {
            self.death_capital.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}
