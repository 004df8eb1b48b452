// src/api/stripe_client.rs
//
// Minimal client for the payment processor's charge list API
// (https://api.stripe.com). Auth: Authorization: Bearer <secret key>,
// optional Stripe-Version header.

use std::fmt;

use async_trait::async_trait;

use crate::models::ChargeList;

const STRIPE_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug)]
pub enum StripeError {
    Http(reqwest::Error),
    Api { status: u16, body: String },
    InvalidResponse(String),
}

impl fmt::Display for StripeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StripeError::Http(e) => write!(f, "http error: {e}"),
            StripeError::Api { status, body } => {
                write!(f, "stripe api error status={status} body={body}")
            }
            StripeError::InvalidResponse(e) => write!(f, "invalid response: {e}"),
        }
    }
}

impl From<reqwest::Error> for StripeError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Query for one page of the charge list. Creation bounds are inclusive
/// whole-second epoch timestamps; `starting_after` resumes strictly after
/// the identified charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChargesParams {
    pub created_gte: i64,
    pub created_lte: i64,
    pub limit: u32,
    pub status: &'static str,
    pub starting_after: Option<String>,
}

/// Seam over the upstream charge list so handlers and the pagination loop
/// can run against a scripted source in tests.
#[async_trait]
pub trait ChargeSource: Send + Sync {
    async fn list_charges(&self, params: ListChargesParams) -> Result<ChargeList, StripeError>;
}

/// Immutable handle built once at startup; credentials never change after.
pub struct ChargeClient {
    http: reqwest::Client,
    api_key: String,
    api_version: Option<String>,
    base_url: String,
}

impl ChargeClient {
    pub fn new(api_key: String, api_version: Option<String>, base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_version,
            base_url: base_url.unwrap_or_else(|| STRIPE_API_BASE.to_string()),
        }
    }
}

#[async_trait]
impl ChargeSource for ChargeClient {
    async fn list_charges(&self, params: ListChargesParams) -> Result<ChargeList, StripeError> {
        let mut query: Vec<(&str, String)> = vec![
            ("created[gte]", params.created_gte.to_string()),
            ("created[lte]", params.created_lte.to_string()),
            ("limit", params.limit.to_string()),
            ("status", params.status.to_string()),
        ];
        if let Some(after) = &params.starting_after {
            query.push(("starting_after", after.clone()));
        }

        let mut req = self
            .http
            .get(format!("{}/v1/charges", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&query);
        if let Some(version) = &self.api_version {
            req = req.header("Stripe-Version", version);
        }

        let resp = req.send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(StripeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<ChargeList>(&body)
            .map_err(|e| StripeError::InvalidResponse(format!("{e}; body={body}")))
    }
}
