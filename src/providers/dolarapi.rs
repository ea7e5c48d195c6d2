use super::util::{build_client, get_json, lenient_f64};
use crate::core::quote::{OfficialRateSource, Quote, QuoteError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://dolarapi.com";

#[derive(Debug, Deserialize)]
struct OfficialDollarResponse {
    compra: serde_json::Value,
    venta: serde_json::Value,
}

/// Official USD/ARS quote from DolarApi.
pub struct DolarApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl DolarApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QuoteError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl OfficialRateSource for DolarApiProvider {
    #[instrument(name = "DolarApiFetch", skip(self))]
    async fn fetch_official_usd(&self) -> Result<Quote, QuoteError> {
        let url = format!("{}/v1/dolares/oficial", self.base_url);
        let data: OfficialDollarResponse = get_json(&self.client, &url).await?;

        let quote = Quote {
            buy: lenient_f64(&data.compra, "compra")?,
            sell: lenient_f64(&data.venta, "venta")?,
        };
        debug!(?quote, "Received official dollar quote");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/dolares/oficial"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> DolarApiProvider {
        DolarApiProvider::new(&mock_server.uri(), Duration::from_secs(10)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_quote_fetch() {
        let mock_response = r#"{
            "moneda": "USD",
            "casa": "oficial",
            "nombre": "Oficial",
            "compra": 1000.25,
            "venta": 1050.75,
            "fechaActualizacion": "2026-10-16T15:00:00.000Z"
        }"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let quote = provider(&mock_server).fetch_official_usd().await.unwrap();
        assert_eq!(quote.buy, 1000.25);
        assert_eq!(quote.sell, 1050.75);
    }

    #[tokio::test]
    async fn test_numeric_strings_are_accepted() {
        let mock_response = r#"{"compra": "1000", "venta": "1050.5"}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let quote = provider(&mock_server).fetch_official_usd().await.unwrap();
        assert_eq!(quote, Quote { buy: 1000.0, sell: 1050.5 });
    }

    #[tokio::test]
    async fn test_missing_field_is_data_failure() {
        let mock_response = r#"{"compra": 1000}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let err = provider(&mock_server).fetch_official_usd().await.unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
        assert!(err.to_string().contains("venta"));
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_data_failure() {
        let mock_response = r#"{"compra": "n/a", "venta": 1050}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let err = provider(&mock_server).fetch_official_usd().await.unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;

        let err = provider(&mock_server).fetch_official_usd().await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
        assert!(err.to_string().contains("HTTP error: 500"));
    }

    #[tokio::test]
    async fn test_timeout_is_network_failure() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"compra": 1, "venta": 2}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let provider =
            DolarApiProvider::new(&mock_server.uri(), Duration::from_millis(50)).unwrap();
        let err = provider.fetch_official_usd().await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let provider = DolarApiProvider::new(&uri, Duration::from_secs(1)).unwrap();
        let err = provider.fetch_official_usd().await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
    }
}
