//! AVS/AI pension scale: bracket rows, lookup table and its sources

mod row;
pub mod statutory;
pub mod loader;

pub use row::BenefitScaleRow;
pub use statutory::{StatutoryScale, DEFAULT_MINIMUM_RENT};
pub use loader::{CsvScaleSource, load_scale_rows, load_scale_rows_from_reader, DEFAULT_SCALE_PATH};

use crate::error::{validate_income, PensionError, Result};
use log::debug;

/// Source of the read-only scale table (file, embedded table, remote service)
pub trait ScaleRepository {
    /// Load the complete scale
    fn load_scale(&self) -> Result<BenefitScale>;
}

/// Immutable scale table sorted by income threshold
///
/// Resolution is a ceiling search: the bracket with the smallest threshold
/// greater than or equal to the income.
#[derive(Debug, Clone, Default)]
pub struct BenefitScale {
    rows: Vec<BenefitScaleRow>,
}

impl BenefitScale {
    /// Build a scale from rows in any order
    pub fn new(mut rows: Vec<BenefitScaleRow>) -> Result<Self> {
        for row in &rows {
            if !row.income_threshold.is_finite() || row.income_threshold <= 0.0 {
                return Err(PensionError::validation(format!(
                    "scale threshold must be a positive amount, got {}",
                    row.income_threshold
                )));
            }
            if !row.amounts_are_valid() {
                return Err(PensionError::validation(format!(
                    "scale row at threshold {} has a negative or non-finite amount",
                    row.income_threshold
                )));
            }
        }

        rows.sort_by(|a, b| a.income_threshold.total_cmp(&b.income_threshold));

        if let Some(pair) = rows
            .windows(2)
            .find(|pair| pair[0].income_threshold == pair[1].income_threshold)
        {
            return Err(PensionError::validation(format!(
                "duplicate scale threshold {}",
                pair[0].income_threshold
            )));
        }

        debug!("Scale loaded with {} brackets", rows.len());
        Ok(Self { rows })
    }

    /// Find the bracket for an average determining income
    pub fn resolve(&self, income: f64) -> Result<&BenefitScaleRow> {
        validate_income(income)?;

        let idx = self.rows.partition_point(|row| row.income_threshold < income);
        match self.rows.get(idx) {
            Some(row) => {
                debug!("Income {:.2} resolved to bracket {:.2}", income, row.income_threshold);
                Ok(row)
            }
            None => Err(PensionError::not_found(format!(
                "no scale bracket covers income {:.2} (highest threshold: {})",
                income,
                self.top_threshold()
                    .map(|t| format!("{:.2}", t))
                    .unwrap_or_else(|| "none".to_string())
            ))),
        }
    }

    /// Rows in ascending threshold order
    pub fn rows(&self) -> &[BenefitScaleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest defined threshold, if any
    pub fn top_threshold(&self) -> Option<f64> {
        self.rows.last().map(|row| row.income_threshold)
    }
}
