//! Fields extracted from a pension certificate by the external extraction service
//!
//! The service returns a flat JSON object. Only keys it could read are present;
//! merging into an account overwrites exactly those fields.

use chrono::NaiveDate;
use serde::Deserialize;

use super::account::{LppAccount, RetirementAge};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CertificateExtraction {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub certificate_date: Option<NaiveDate>,
    #[serde(default)]
    pub current_savings: Option<f64>,
    #[serde(default)]
    pub projected_savings_at_retirement: Option<f64>,

    #[serde(default)]
    pub projected_retirement_rent_at_60: Option<f64>,
    #[serde(default)]
    pub projected_retirement_rent_at_61: Option<f64>,
    #[serde(default)]
    pub projected_retirement_rent_at_62: Option<f64>,
    #[serde(default)]
    pub projected_retirement_rent_at_63: Option<f64>,
    #[serde(default)]
    pub projected_retirement_rent_at_64: Option<f64>,
    #[serde(default)]
    pub projected_retirement_rent_at_65: Option<f64>,

    #[serde(default)]
    pub disability_rent: Option<f64>,
    #[serde(default)]
    pub disability_child_rent: Option<f64>,
    #[serde(default)]
    pub widow_rent: Option<f64>,
    #[serde(default)]
    pub orphan_rent: Option<f64>,
    #[serde(default)]
    pub death_capital: Option<f64>,
    #[serde(default)]
    pub supplementary_death_capital: Option<f64>,
    #[serde(default)]
    pub waiting_period_days: Option<u32>,
}

fn overwrite<T>(target: &mut Option<T>, extracted: Option<T>) {
    if extracted.is_some() {
        *target = extracted;
    }
}

impl CertificateExtraction {
    /// Parse the JSON payload returned by the extraction service
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    fn projected_rent(&self, age: RetirementAge) -> Option<f64> {
        match age {
            RetirementAge::Age60 => self.projected_retirement_rent_at_60,
            RetirementAge::Age61 => self.projected_retirement_rent_at_61,
            RetirementAge::Age62 => self.projected_retirement_rent_at_62,
            RetirementAge::Age63 => self.projected_retirement_rent_at_63,
            RetirementAge::Age64 => self.projected_retirement_rent_at_64,
            RetirementAge::Age65 => self.projected_retirement_rent_at_65,
        }
    }

    /// Number of fields the service managed to extract
    pub fn extracted_field_count(&self) -> usize {
        let amounts = [
            self.current_savings,
            self.projected_savings_at_retirement,
            self.disability_rent,
            self.disability_child_rent,
            self.widow_rent,
            self.orphan_rent,
            self.death_capital,
            self.supplementary_death_capital,
        ];
        amounts.iter().filter(|v| v.is_some()).count()
            + RetirementAge::ALL
                .iter()
                .filter(|age| self.projected_rent(**age).is_some())
                .count()
            + usize::from(self.provider.is_some())
            + usize::from(self.certificate_date.is_some())
            + usize::from(self.waiting_period_days.is_some())
    }

    /// Overwrite the account fields present in the extraction
    pub fn apply_to(&self, account: &mut LppAccount) {
        if let Some(provider) = &self.provider {
            account.provider = provider.clone();
        }
        overwrite(&mut account.certificate_date, self.certificate_date);
        overwrite(&mut account.current_savings, self.current_savings);
        overwrite(
            &mut account.projected_savings_at_retirement,
            self.projected_savings_at_retirement,
        );

        for age in RetirementAge::ALL {
            if let Some(rent) = self.projected_rent(age) {
                account.projected_rents.set(age, Some(rent));
            }
        }

        overwrite(&mut account.disability_rent, self.disability_rent);
        overwrite(&mut account.disability_child_rent, self.disability_child_rent);
        overwrite(&mut account.widow_rent, self.widow_rent);
        overwrite(&mut account.orphan_rent, self.orphan_rent);
        overwrite(&mut account.death_capital, self.death_capital);
        overwrite(
            &mut account.supplementary_death_capital,
            self.supplementary_death_capital,
        );
        overwrite(&mut account.waiting_period_days, self.waiting_period_days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_extraction_merges_present_fields_only() {
        let mut account = LppAccount::new("a1", "p1");
        account.provider = "Old Fund".to_string();
        account.widow_rent = Some(9_000.0);
        account.projected_rents.set(RetirementAge::Age60, Some(11_000.0));

        let payload = r#"{
            "provider": "Fondation Collective",
            "certificate_date": "2025-01-01",
            "current_savings": 182000.5,
            "projected_retirement_rent_at_63": 16400,
            "projected_retirement_rent_at_65": 18250,
            "waiting_period_days": 720,
            "unrelated_key": "ignored"
        }"#;
        let extraction = CertificateExtraction::from_json(payload).unwrap();
        assert_eq!(extraction.extracted_field_count(), 6);

        extraction.apply_to(&mut account);

        assert_eq!(account.provider, "Fondation Collective");
        assert_eq!(account.certificate_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(account.current_savings, Some(182_000.5));
        assert_eq!(account.projected_rents.get(RetirementAge::Age63), Some(16_400.0));
        assert_eq!(account.annual_rent_at_65(), 18_250.0);
        assert_eq!(account.waiting_period_days, Some(720));

        // Untouched by the extraction
        assert_eq!(account.widow_rent, Some(9_000.0));
        assert_eq!(account.projected_rents.get(RetirementAge::Age60), Some(11_000.0));
    }

    #[test]
    fn test_invalid_payload() {
        assert!(CertificateExtraction::from_json("not json").is_err());
        assert!(CertificateExtraction::from_json(r#"{"current_savings":"a lot"}"#).is_err());
    }
}
