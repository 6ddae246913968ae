//! EU VIES REST client — the online complement to the structural check.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const VIES_ENDPOINT: &str =
    "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Outcome of a VIES lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViesCheck {
    /// Whether the member state reports the number as currently valid.
    pub valid: bool,
    /// Date of the request (YYYY-MM-DD).
    pub request_date: Option<String>,
    /// Registered company name, when the member state discloses it.
    pub company_name: Option<String>,
    /// Registered address, when disclosed.
    pub company_address: Option<String>,
}

/// Error from a VIES lookup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViesError {
    #[error("VIES network error: {0}")]
    Network(String),
    /// The API itself reported a failure, e.g. MS_UNAVAILABLE.
    #[error("VIES API error: {0}")]
    Api(String),
    #[error("VIES parse error: {0}")]
    Parse(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    error_wrappers: Option<Vec<ErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

/// Async client for the EU VIES VAT-number service.
///
/// VIES is a free public API with no authentication. Member states are
/// regularly unavailable; callers should treat [`ViesError::Api`] as a
/// transient condition and fall back to the structural check.
#[derive(Debug, Clone)]
pub struct ViesClient {
    http: reqwest::Client,
}

impl ViesClient {
    /// Client with a 30 second request timeout.
    pub fn new() -> Result<Self, ViesError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ViesError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    /// Check a VAT number. `country_code` is the 2-letter VIES prefix
    /// (e.g. "DE", "EL" for Greece), `vat_number` the part after it.
    pub async fn check(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<ViesCheck, ViesError> {
        let country_code = country_code.to_ascii_uppercase();
        let body = CheckRequest {
            country_code: &country_code,
            vat_number,
        };

        let resp = self
            .http
            .post(VIES_ENDPOINT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ViesError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ViesError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ViesError::Api(format!("HTTP {status}: {text}")));
        }

        let parsed: CheckResponse =
            serde_json::from_str(&text).map_err(|e| ViesError::Parse(e.to_string()))?;

        if let Some(first) = parsed.error_wrappers.as_ref().and_then(|w| w.first()) {
            let msg = first
                .message
                .clone()
                .or_else(|| first.error.clone())
                .unwrap_or_else(|| "unknown error".into());
            return Err(ViesError::Api(msg));
        }

        Ok(ViesCheck {
            valid: parsed.valid.unwrap_or(false),
            request_date: parsed.request_date,
            company_name: parsed.name.filter(|n| n != "---" && !n.is_empty()),
            company_address: parsed.address.filter(|a| a != "---" && !a.is_empty()),
        })
    }
}
