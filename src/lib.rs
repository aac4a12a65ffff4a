//! Pension Engine - Swiss retirement benefit calculations
//!
//! This library provides:
//! - AVS/AI scale resolution (ceiling lookup over the statutory bracket table)
//! - First-pillar rents: old-age, disability, survivor, child and orphan
//! - Occupational pension (LPP) household aggregation across accounts
//! - Third-pillar (3a/3b) aggregation with insurance-only benefits
//! - A combined three-pillar overview over a pluggable data provider

pub mod error;
pub mod format;
pub mod scale;
pub mod avs;
pub mod lpp;
pub mod pillar3;
pub mod provider;
pub mod overview;

// Re-export commonly used types
pub use error::{ErrorKind, PensionError, Result};
pub use scale::{BenefitScale, BenefitScaleRow, ScaleRepository, StatutoryScale};
pub use avs::{AvsCalculationResult, AvsCalculator, AvsClaimantProfile, DisabilityTier};
pub use lpp::{LppAccount, LppAnalysis};
pub use pillar3::{ThirdPillarAccount, ThirdPillarAnalysis, ThirdPillarType};
pub use provider::{InMemoryProvider, PensionDataProvider, ProfileStore};
pub use overview::{HouseholdAnalysis, PensionService, RetirementOverview};
