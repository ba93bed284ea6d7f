//! Currency codes and display formatting for monetary amounts.
//!
//! Amounts throughout the crate are plain [`Decimal`] values in the
//! currency's standard unit (dollars, not cents). [`Money`] pairs an amount
//! with its [`CurrencyCode`] for display only.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 codes for the currencies Amazon marketplaces settle in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    CAD,
    MXN,
    BRL,
    GBP,
    EUR,
    SEK,
    PLN,
    TRY,
    AED,
    SAR,
    EGP,
    INR,
    JPY,
    SGD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol (e.g. `$`, `€`). Currencies without a widely used
    /// symbol fall back to their code followed by a space.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::CAD => "CA$",
            Self::MXN => "MX$",
            Self::BRL => "R$",
            Self::GBP => "£",
            Self::EUR => "€",
            Self::SEK => "SEK ",
            Self::PLN => "zł ",
            Self::TRY => "₺",
            Self::AED => "AED ",
            Self::SAR => "SAR ",
            Self::EGP => "EGP ",
            Self::INR => "₹",
            Self::JPY => "¥",
            Self::SGD => "S$",
            Self::AUD => "A$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::CAD => "CAD",
            Self::MXN => "MXN",
            Self::BRL => "BRL",
            Self::GBP => "GBP",
            Self::EUR => "EUR",
            Self::SEK => "SEK",
            Self::PLN => "PLN",
            Self::TRY => "TRY",
            Self::AED => "AED",
            Self::SAR => "SAR",
            Self::EGP => "EGP",
            Self::INR => "INR",
            Self::JPY => "JPY",
            Self::SGD => "SGD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "CAD" => Ok(Self::CAD),
            "MXN" => Ok(Self::MXN),
            "BRL" => Ok(Self::BRL),
            "GBP" => Ok(Self::GBP),
            "EUR" => Ok(Self::EUR),
            "SEK" => Ok(Self::SEK),
            "PLN" => Ok(Self::PLN),
            "TRY" => Ok(Self::TRY),
            "AED" => Ok(Self::AED),
            "SAR" => Ok(Self::SAR),
            "EGP" => Ok(Self::EGP),
            "INR" => Ok(Self::INR),
            "JPY" => Ok(Self::JPY),
            "SGD" => Ok(Self::SGD),
            "AUD" => Ok(Self::AUD),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}

/// An amount paired with its currency, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

impl fmt::Display for Money {
    /// Formats as `$1,234.56`, with a leading `-` for negative amounts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        write!(
            f,
            "{sign}{}{}.{cents}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
