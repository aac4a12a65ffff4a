//! First-pillar (AVS/AI) state pension: claimant data, calculator, persisted summary

mod profile;
mod calculator;
mod summary;

pub use profile::{
    AvsClaimantProfile, DisabilityTier, MaritalStatus, FULL_CONTRIBUTION_YEARS, REFERENCE_AGE,
};
pub use calculator::{full_rent_fraction, AvsCalculationResult, AvsCalculator, PensionAmount};
pub use summary::AvsProfileSummary;
