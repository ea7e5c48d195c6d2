//! Composes the official dollar and cross-rate sources into ARS quotes.

use super::quote::{CrossRateSource, Currency, OfficialRateSource, Quote, QuoteError, QuoteProvider};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Rounds to cents. Exact half-cent ties go to the even cent.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Builds the ARS quote of a currency worth `cross_rate` USD per unit.
pub fn derive_quote(cross_rate: f64, usd: &Quote) -> Quote {
    Quote {
        buy: round2(cross_rate * usd.buy),
        sell: round2(cross_rate * usd.sell),
    }
}

pub struct RateProvider {
    official: Box<dyn OfficialRateSource>,
    cross: Box<dyn CrossRateSource>,
}

impl RateProvider {
    pub fn new(official: Box<dyn OfficialRateSource>, cross: Box<dyn CrossRateSource>) -> Self {
        Self { official, cross }
    }

    /// Official dollar quote, unrounded.
    pub async fn get_usd_quote(&self) -> Result<Quote, QuoteError> {
        self.official.fetch_official_usd().await
    }

    pub async fn get_eur_quote(&self) -> Result<Quote, QuoteError> {
        self.get_cross_quote(Currency::Eur).await
    }

    pub async fn get_brl_quote(&self) -> Result<Quote, QuoteError> {
        self.get_cross_quote(Currency::Brl).await
    }

    #[instrument(name = "CrossQuote", skip(self), fields(currency = %currency))]
    async fn get_cross_quote(&self, currency: Currency) -> Result<Quote, QuoteError> {
        let cross_rate = self.cross.fetch_usd_rate(currency).await?;
        debug!(cross_rate, "Fetched cross-rate");

        let usd = self
            .get_usd_quote()
            .await
            .map_err(|e| QuoteError::BaseUnavailable {
                currency,
                source: Box::new(e),
            })?;

        let quote = derive_quote(cross_rate, &usd);
        debug!(?usd, ?quote, "Derived quote");
        Ok(quote)
    }
}

#[async_trait]
impl QuoteProvider for RateProvider {
    async fn get_quote(&self, currency: Currency) -> Result<Quote, QuoteError> {
        match currency {
            Currency::Usd => self.get_usd_quote().await,
            Currency::Eur => self.get_eur_quote().await,
            Currency::Brl => self.get_brl_quote().await,
            Currency::Ars => Err(QuoteError::Data("ARS is not quoted against itself".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedOfficial {
        quote: Option<Quote>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl OfficialRateSource for FixedOfficial {
        async fn fetch_official_usd(&self) -> Result<Quote, QuoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.quote
                .ok_or_else(|| QuoteError::Network("connection refused".to_string()))
        }
    }

    struct FixedCross {
        rates: HashMap<Currency, f64>,
    }

    #[async_trait]
    impl CrossRateSource for FixedCross {
        async fn fetch_usd_rate(&self, base: Currency) -> Result<f64, QuoteError> {
            self.rates
                .get(&base)
                .copied()
                .ok_or_else(|| QuoteError::Data(format!("missing rate for {base}")))
        }
    }

    fn provider(usd: Option<Quote>, rates: &[(Currency, f64)]) -> (RateProvider, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let official = FixedOfficial {
            quote: usd,
            calls: Arc::clone(&calls),
        };
        let cross = FixedCross {
            rates: rates.iter().copied().collect(),
        };
        (RateProvider::new(Box::new(official), Box::new(cross)), calls)
    }

    const USD: Quote = Quote {
        buy: 1000.0,
        sell: 1050.0,
    };

    #[test]
    fn test_derive_quote_rounds_to_cents() {
        let usd = Quote {
            buy: 1234.567,
            sell: 1299.991,
        };
        let quote = derive_quote(0.19, &usd);
        assert_eq!(quote.buy, 234.57);
        assert_eq!(quote.sell, 247.0);
    }

    #[test]
    fn test_derive_quote_half_cent_ties_go_to_even() {
        let usd = Quote {
            buy: 1000.25,
            sell: 1000.75,
        };
        let quote = derive_quote(0.5, &usd);
        assert_eq!(quote.buy, 500.12);
        assert_eq!(quote.sell, 500.38);
    }

    #[test]
    fn test_derive_quote_passes_inverted_quote_through() {
        let usd = Quote {
            buy: 1100.0,
            sell: 1000.0,
        };
        let quote = derive_quote(2.0, &usd);
        assert_eq!(quote.buy, 2200.0);
        assert_eq!(quote.sell, 2000.0);
    }

    #[tokio::test]
    async fn test_usd_quote_is_not_rounded() {
        let usd = Quote {
            buy: 1000.125,
            sell: 1050.875,
        };
        let (provider, _) = provider(Some(usd), &[]);
        assert_eq!(provider.get_usd_quote().await.unwrap(), usd);
    }

    #[tokio::test]
    async fn test_eur_quote_is_derived_from_usd() {
        let (provider, calls) = provider(Some(USD), &[(Currency::Eur, 1.08)]);
        let quote = provider.get_eur_quote().await.unwrap();
        assert_eq!(quote, Quote { buy: 1080.0, sell: 1134.0 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_brl_quote_is_derived_from_usd() {
        let (provider, _) = provider(Some(USD), &[(Currency::Brl, 0.1834)]);
        let quote = provider.get_quote(Currency::Brl).await.unwrap();
        assert_eq!(quote, Quote { buy: 183.4, sell: 192.57 });
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_identical() {
        let (provider, calls) = provider(Some(USD), &[(Currency::Eur, 1.08)]);
        let first = provider.get_eur_quote().await.unwrap();
        let second = provider.get_eur_quote().await.unwrap();
        assert_eq!(first, second);
        // nothing is cached between lookups
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_usd_failure_makes_derived_quotes_unavailable() {
        let (provider, _) = provider(None, &[(Currency::Eur, 1.08), (Currency::Brl, 0.18)]);

        for currency in [Currency::Eur, Currency::Brl] {
            let err = provider.get_quote(currency).await.unwrap_err();
            match err {
                QuoteError::BaseUnavailable { currency: c, source } => {
                    assert_eq!(c, currency);
                    assert!(matches!(*source, QuoteError::Network(_)));
                }
                other => panic!("Expected BaseUnavailable, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_cross_rate_failure_skips_usd_lookup() {
        let (provider, calls) = provider(Some(USD), &[]);
        let err = provider.get_eur_quote().await.unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_both_failures_report_unavailable() {
        let (provider, _) = provider(None, &[]);
        assert!(provider.get_brl_quote().await.is_err());
    }
}
