//! Session preferences: theme, display currency and interface language.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::PreferenceError;

/// Colour scheme of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme (default).
    #[default]
    Dark,
}

impl Theme {
    /// Returns the other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the lowercase theme name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PreferenceError::UnknownTheme(s.to_string())),
        }
    }
}

/// Currency used to display balances and prizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Malaysian Ringgit (default).
    #[default]
    #[serde(rename = "MYR")]
    Myr,
    /// US Dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// Bitcoin.
    #[serde(rename = "BTC")]
    Btc,
    /// Ethereum.
    #[serde(rename = "ETH")]
    Eth,
    /// Tether.
    #[serde(rename = "USDT")]
    Usdt,
}

impl Currency {
    /// Every supported currency, in selector order.
    pub const ALL: [Self; 6] = [
        Self::Myr,
        Self::Usd,
        Self::Eur,
        Self::Btc,
        Self::Eth,
        Self::Usdt,
    ];

    /// Returns the ISO-style code (`"MYR"`, `"BTC"`, ...).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Myr => "MYR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Myr => "RM",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Btc => "₿",
            Self::Eth => "Ξ",
            Self::Usdt => "₮",
        }
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Myr => "Malaysian Ringgit",
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Btc => "Bitcoin",
            Self::Eth => "Ethereum",
            Self::Usdt => "Tether",
        }
    }

    /// Whether the currency is a crypto token rather than fiat money.
    #[must_use]
    pub fn is_crypto(self) -> bool {
        matches!(self, Self::Btc | Self::Eth | Self::Usdt)
    }

    /// Formats an amount with the currency symbol.
    ///
    /// Fiat amounts use two decimals, crypto amounts eight.
    #[must_use]
    pub fn format_amount(self, amount: f64) -> String {
        if self.is_crypto() {
            format!("{} {amount:.8}", self.symbol())
        } else {
            format!("{} {amount:.2}", self.symbol())
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| PreferenceError::UnknownCurrency(s.to_string()))
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English (default and translation fallback).
    #[default]
    #[serde(rename = "EN")]
    En,
    /// Chinese.
    #[serde(rename = "ZH")]
    Zh,
    /// Malay.
    #[serde(rename = "MS")]
    Ms,
    /// Thai.
    #[serde(rename = "TH")]
    Th,
}

impl Language {
    /// Every supported language, in selector order.
    pub const ALL: [Self; 4] = [Self::En, Self::Zh, Self::Ms, Self::Th];

    /// Returns the upper-case language code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Zh => "ZH",
            Self::Ms => "MS",
            Self::Th => "TH",
        }
    }

    /// Returns the English name of the language.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Chinese",
            Self::Ms => "Malay",
            Self::Th => "Thai",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| PreferenceError::UnknownLanguage(s.to_string()))
    }
}
