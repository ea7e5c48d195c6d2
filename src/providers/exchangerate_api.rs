use super::util::{build_client, get_json};
use crate::core::quote::{CrossRateSource, Currency, QuoteError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Cross-rates against USD from exchangerate-api.com.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QuoteError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl CrossRateSource for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_usd_rate(&self, base: Currency) -> Result<f64, QuoteError> {
        let url = format!("{}/v4/latest/{}", self.base_url, base.code());
        let data: LatestRatesResponse = get_json(&self.client, &url).await?;

        let rate = data
            .rates
            .get(Currency::Usd.code())
            .copied()
            .ok_or_else(|| QuoteError::Data(format!("No USD rate found for base: {base}")))?;

        debug!(rate, "Received cross-rate");
        Ok(rate)
    }
}
