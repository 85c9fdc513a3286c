use std::convert::Infallible;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::UnsupportedCode;

/// ISO 4217 code of the funds moved by a transaction.
///
/// Codes outside the supported set still parse (into `Unsupported`) so that a
/// decoded record can reach validation and be rejected there.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Rub,
    Unsupported(UnsupportedCode)
}

impl Currency {
    pub fn as_str(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
            Currency::Unsupported(code) => code.as_str()
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Currency::Unsupported(_))
    }
}

impl Display for Currency {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Currency::from(value.to_string()))
    }
}

impl From<String> for Currency {
    fn from(value: String) -> Self {
        //NOTE: Codes are case sensitive, "usd" is unsupported
        match value.as_str() {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "RUB" => Currency::Rub,
            _ => Currency::Unsupported(UnsupportedCode::new(value))
        }
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        match value {
            Currency::Unsupported(code) => code.into(),
            supported => supported.as_str().to_string()
        }
    }
}
