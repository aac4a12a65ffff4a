//! Occupational pension (second pillar): accounts, certificate merge, household rollup

mod account;
mod analysis;
pub mod certificate;

pub use account::{LppAccount, ProjectedRents, RetirementAge};
pub use analysis::{aggregate, EarlyRetirementOption, LppAnalysis};
pub use certificate::CertificateExtraction;
