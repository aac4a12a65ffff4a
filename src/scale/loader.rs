//! CSV-based scale loader
//!
//! Loads the pension scale from data/scale/

use std::io::Read;
use std::path::{Path, PathBuf};

use super::{BenefitScale, BenefitScaleRow, ScaleRepository};
use crate::error::Result;

/// Default path to the scale 44 table
pub const DEFAULT_SCALE_PATH: &str = "data/scale/avs_scale_44.csv";

/// Load scale rows from a CSV file
pub fn load_scale_rows<P: AsRef<Path>>(path: P) -> Result<Vec<BenefitScaleRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: BenefitScaleRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load scale rows from any reader (e.g., string buffer, request body)
pub fn load_scale_rows_from_reader<R: Read>(reader: R) -> Result<Vec<BenefitScaleRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: BenefitScaleRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Scale stored in a CSV file
#[derive(Debug, Clone)]
pub struct CsvScaleSource {
    path: PathBuf,
}

impl CsvScaleSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CsvScaleSource {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_PATH)
    }
}

impl ScaleRepository for CsvScaleSource {
    fn load_scale(&self) -> Result<BenefitScale> {
        BenefitScale::new(load_scale_rows(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::StatutoryScale;

    #[test]
    fn test_load_default_scale() {
        let result = CsvScaleSource::default().load_scale();
        assert!(result.is_ok(), "Failed to load scale: {:?}", result.err());

        let scale = result.unwrap();
        assert_eq!(scale.len(), 51);
        assert_eq!(scale.top_threshold(), Some(90_720.0));
    }

    #[test]
    fn test_default_file_matches_statutory_table() {
        let loaded = load_scale_rows(DEFAULT_SCALE_PATH).unwrap();
        let generated = StatutoryScale::default().rows();
        assert_eq!(loaded, generated);
    }

    #[test]
    fn test_load_from_reader() {
        let data = "\
income_threshold,old_age_rent_full,disability_rent_full,disability_rent_3_4,disability_rent_1_2,disability_rent_1_4,widow_rent_full,widow_rent_3_4,widow_rent_1_2,widow_rent_1_4,widow_additional_rent,child_rent,double_child_rent,orphan_rent_60pct
30000,1500,1500,1125,750,375,1200,900,600,300,450,600,1200,900
20000,1300,1300,975,650,325,1040,780,520,260,390,520,1040,780
";
        let rows = load_scale_rows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let scale = BenefitScale::new(rows).unwrap();
        assert_eq!(scale.resolve(25_000.0).unwrap().old_age_rent_full, 1500.0);
    }

    #[test]
    fn test_missing_file() {
        let source = CsvScaleSource::new("data/scale/does_not_exist.csv");
        assert!(source.load_scale().is_err());
    }
}
