//! AWS Lambda handler computing a three-pillar household overview
//!
//! Accepts a JSON household (claimant profile plus pension accounts) and returns
//! the first-pillar rents, the LPP and third-pillar rollups and the combined overview.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use pension_engine::{
    avs::AvsClaimantProfile,
    lpp::LppAccount,
    pillar3::ThirdPillarAccount,
    scale::{StatutoryScale, DEFAULT_MINIMUM_RENT},
    AvsCalculator, ErrorKind, HouseholdAnalysis, PensionError,
};

/// Input household for the calculation
#[derive(Debug, Deserialize)]
pub struct HouseholdRequest {
    pub profile: AvsClaimantProfile,

    #[serde(default)]
    pub lpp_accounts: Vec<LppAccount>,

    #[serde(default)]
    pub third_pillar_accounts: Vec<ThirdPillarAccount>,

    /// Minimum monthly old-age rent the scale is generated from (default: 1,260)
    #[serde(default = "default_minimum_rent")]
    pub minimum_rent: f64,
}

fn default_minimum_rent() -> f64 { DEFAULT_MINIMUM_RENT }

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

fn response(status_code: i64, body: String) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, kind: &'static str, message: String) -> LambdaFunctionUrlResponse {
    warn!("Request failed ({}): {}", status_code, message);
    let body = ErrorBody { error: message, kind };
    let json = serde_json::to_string(&body)
        .unwrap_or_else(|_| "{\"error\":\"internal error\"}".to_string());
    response(status_code, json)
}

fn pension_error_response(err: PensionError) -> LambdaFunctionUrlResponse {
    match err.kind() {
        ErrorKind::Validation => error_response(400, "validation", err.to_string()),
        ErrorKind::NotFound => error_response(404, "not_found", err.to_string()),
        ErrorKind::Data => error_response(422, "data", err.to_string()),
    }
}

fn compute(request: &HouseholdRequest) -> Result<HouseholdAnalysis, PensionError> {
    if !request.minimum_rent.is_finite() || request.minimum_rent <= 0.0 {
        return Err(PensionError::validation(format!(
            "minimum rent must be greater than zero, got {}",
            request.minimum_rent
        )));
    }
    let calculator = AvsCalculator::from_repository(&StatutoryScale::new(request.minimum_rent))?;
    HouseholdAnalysis::compute(
        &calculator,
        &request.profile,
        &request.lpp_accounts,
        &request.third_pillar_accounts,
    )
}

async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;

    if request.is_base64_encoded {
        return Ok(error_response(400, "validation", "Base64-encoded bodies are not supported".to_string()));
    }

    let body = match request.body.as_deref() {
        Some(body) if !body.trim().is_empty() => body,
        _ => return Ok(error_response(400, "validation", "Request body is required".to_string())),
    };

    let household: HouseholdRequest = match serde_json::from_str(body) {
        Ok(h) => h,
        Err(e) => return Ok(error_response(400, "validation", format!("Invalid JSON: {}", e))),
    };

    info!(
        "Computing profile {} with {} LPP and {} third-pillar accounts",
        household.profile.profile_id,
        household.lpp_accounts.len(),
        household.third_pillar_accounts.len()
    );

    match compute(&household) {
        Ok(analysis) => Ok(response(200, serde_json::to_string(&analysis)?)),
        Err(err) => Ok(pension_error_response(err)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household_json(income: f64, years: u8) -> String {
        format!(
            r#"{{
                "profile": {{"profile_id": "p1", "average_annual_income": {}, "years_contributed": {}}},
                "lpp_accounts": [
                    {{"id": "a1", "profile_id": "p1", "projected_rents": {{"at_65": 12000.0}}}},
                    {{"id": "a2", "profile_id": "p1", "projected_rents": {{"at_65": 18000.0}}}}
                ]
            }}"#,
            income, years
        )
    }

    #[test]
    fn test_compute_household() {
        let request: HouseholdRequest = serde_json::from_str(&household_json(50_000.0, 44)).unwrap();
        assert_eq!(request.minimum_rent, DEFAULT_MINIMUM_RENT);

        let analysis = compute(&request).unwrap();
        assert_eq!(analysis.avs.old_age.monthly, 1_996.0);
        assert_eq!(analysis.lpp.total_monthly_rent_65, 2_500.0);
        assert_eq!(analysis.overview.monthly_income_at_reference_age, 4_496.0);
    }

    #[test]
    fn test_error_statuses() {
        let request: HouseholdRequest = serde_json::from_str(&household_json(50_000.0, 45)).unwrap();
        let response = pension_error_response(compute(&request).unwrap_err());
        assert_eq!(response.status_code, 400);

        let request: HouseholdRequest = serde_json::from_str(&household_json(500_000.0, 44)).unwrap();
        let response = pension_error_response(compute(&request).unwrap_err());
        assert_eq!(response.status_code, 404);
        assert!(response.body.unwrap().contains("not_found"));
    }
}
