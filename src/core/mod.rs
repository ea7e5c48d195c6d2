//! Core business logic abstractions

pub mod config;
pub mod log;
pub mod money;
pub mod quote;
pub mod rates;

// Re-export main types for cleaner imports
pub use money::{AmountError, format_money, parse_amount};
pub use quote::{
    CrossRateSource, Currency, InvalidSelection, OfficialRateSource, Quote, QuoteError,
    QuoteProvider,
};
pub use rates::{RateProvider, derive_quote};
