//! Quote types and the rate source abstractions

use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Buy and sell price, in ARS, for one unit of a foreign currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub buy: f64,
    pub sell: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Currency {
    Usd,
    Eur,
    Brl,
    Ars,
}

impl Currency {
    /// Currencies that can be quoted against ARS, in menu order.
    pub const QUOTED: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Brl];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Brl => "BRL",
            Currency::Ars => "ARS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "US DOLLAR",
            Currency::Eur => "EURO",
            Currency::Brl => "BRAZILIAN REAL",
            Currency::Ars => "ARGENTINE PESO",
        }
    }

    /// Plural noun used when asking for an amount.
    pub fn plural(&self) -> &'static str {
        match self {
            Currency::Usd => "dollars",
            Currency::Eur => "euros",
            Currency::Brl => "reais",
            Currency::Ars => "pesos",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "USD $",
            Currency::Eur => "EUR €",
            Currency::Brl => "BRL R$",
            Currency::Ars => "ARS $",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency: {0}")]
pub struct InvalidSelection(pub String);

impl FromStr for Currency {
    type Err = InvalidSelection;

    /// Only the quotable currencies parse; ARS is a display target.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "BRL" => Ok(Currency::Brl),
            _ => Err(InvalidSelection(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Data failure: {0}")]
    Data(String),

    #[error("{currency} quote unavailable, official dollar lookup failed: {source}")]
    BaseUnavailable {
        currency: Currency,
        #[source]
        source: Box<QuoteError>,
    },
}

/// Source of the official USD/ARS quote.
#[async_trait]
pub trait OfficialRateSource: Send + Sync {
    async fn fetch_official_usd(&self) -> Result<Quote, QuoteError>;
}

/// Source of cross-rates: the value of one unit of `base` in USD.
#[async_trait]
pub trait CrossRateSource: Send + Sync {
    async fn fetch_usd_rate(&self, base: Currency) -> Result<f64, QuoteError>;
}

/// Anything that can produce an ARS quote for a currency.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn get_quote(&self, currency: Currency) -> Result<Quote, QuoteError>;
}
