//! Private retirement savings (third pillar): accounts and household rollup

mod account;
mod analysis;

pub use account::{ThirdPillarAccount, ThirdPillarType};
pub use analysis::{aggregate, ThirdPillarAnalysis};
