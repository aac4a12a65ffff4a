//! Occupational pension (LPP) account records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Discrete retirement ages for which a fund projects an annual rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RetirementAge {
    Age60,
    Age61,
    Age62,
    Age63,
    Age64,
    Age65,
}

impl RetirementAge {
    pub const ALL: [RetirementAge; 6] = [
        RetirementAge::Age60,
        RetirementAge::Age61,
        RetirementAge::Age62,
        RetirementAge::Age63,
        RetirementAge::Age64,
        RetirementAge::Age65,
    ];

    /// Early-retirement ages (before the reference age)
    pub const EARLY: [RetirementAge; 5] = [
        RetirementAge::Age60,
        RetirementAge::Age61,
        RetirementAge::Age62,
        RetirementAge::Age63,
        RetirementAge::Age64,
    ];

    pub fn years(&self) -> u8 {
        60 + self.index() as u8
    }

    pub fn from_years(years: u8) -> Option<Self> {
        match years {
            60..=65 => Some(Self::ALL[(years - 60) as usize]),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            RetirementAge::Age60 => 0,
            RetirementAge::Age61 => 1,
            RetirementAge::Age62 => 2,
            RetirementAge::Age63 => 3,
            RetirementAge::Age64 => 4,
            RetirementAge::Age65 => 5,
        }
    }
}

/// Projected annual rents at ages 60 to 65, as stated on the pension certificate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRents {
    #[serde(default)]
    pub at_60: Option<f64>,
    #[serde(default)]
    pub at_61: Option<f64>,
    #[serde(default)]
    pub at_62: Option<f64>,
    #[serde(default)]
    pub at_63: Option<f64>,
    #[serde(default)]
    pub at_64: Option<f64>,
    #[serde(default)]
    pub at_65: Option<f64>,
}

impl ProjectedRents {
    fn slot_mut(&mut self, age: RetirementAge) -> &mut Option<f64> {
        match age {
            RetirementAge::Age60 => &mut self.at_60,
            RetirementAge::Age61 => &mut self.at_61,
            RetirementAge::Age62 => &mut self.at_62,
            RetirementAge::Age63 => &mut self.at_63,
            RetirementAge::Age64 => &mut self.at_64,
            RetirementAge::Age65 => &mut self.at_65,
        }
    }

    pub fn get(&self, age: RetirementAge) -> Option<f64> {
        match age {
            RetirementAge::Age60 => self.at_60,
            RetirementAge::Age61 => self.at_61,
            RetirementAge::Age62 => self.at_62,
            RetirementAge::Age63 => self.at_63,
            RetirementAge::Age64 => self.at_64,
            RetirementAge::Age65 => self.at_65,
        }
    }

    pub fn set(&mut self, age: RetirementAge, annual_rent: Option<f64>) {
        *self.slot_mut(age) = annual_rent;
    }

    pub fn with(mut self, age: RetirementAge, annual_rent: f64) -> Self {
        self.set(age, Some(annual_rent));
        self
    }

    /// Ages with a strictly positive projected rent
    pub fn populated(&self) -> impl Iterator<Item = (RetirementAge, f64)> + '_ {
        RetirementAge::ALL
            .into_iter()
            .filter_map(|age| self.get(age).filter(|rent| *rent > 0.0).map(|rent| (age, rent)))
    }
}

/// One occupational pension policy of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LppAccount {
    pub id: String,
    pub profile_id: String,

    /// Pension fund or collective foundation
    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub current_savings: Option<f64>,
    #[serde(default)]
    pub projected_savings_at_retirement: Option<f64>,

    #[serde(default)]
    pub projected_rents: ProjectedRents,

    /// Annual disability rent
    #[serde(default)]
    pub disability_rent: Option<f64>,
    /// Annual disability rent per child of a disabled insured
    #[serde(default)]
    pub disability_child_rent: Option<f64>,
    /// Annual widow/widower rent
    #[serde(default)]
    pub widow_rent: Option<f64>,
    /// Annual orphan rent
    #[serde(default)]
    pub orphan_rent: Option<f64>,

    #[serde(default)]
    pub death_capital: Option<f64>,
    #[serde(default)]
    pub supplementary_death_capital: Option<f64>,

    /// Waiting period before disability benefits start
    #[serde(default)]
    pub waiting_period_days: Option<u32>,

    /// Date of the pension certificate the figures come from
    #[serde(default)]
    pub certificate_date: Option<NaiveDate>,

    /// Soft-delete flag
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl LppAccount {
    /// Create an active account with no benefit figures
    pub fn new(id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile_id: profile_id.into(),
            provider: String::new(),
            current_savings: None,
            projected_savings_at_retirement: None,
            projected_rents: ProjectedRents::default(),
            disability_rent: None,
            disability_child_rent: None,
            widow_rent: None,
            orphan_rent: None,
            death_capital: None,
            supplementary_death_capital: None,
            waiting_period_days: None,
            certificate_date: None,
            is_active: true,
        }
    }

    /// Projected annual rent at the reference age
    pub fn annual_rent_at_65(&self) -> f64 {
        self.projected_rents.get(RetirementAge::Age65).unwrap_or(0.0)
    }

    /// Base plus supplementary death capital
    pub fn total_death_capital(&self) -> f64 {
        self.death_capital.unwrap_or(0.0) + self.supplementary_death_capital.unwrap_or(0.0)
    }
}
