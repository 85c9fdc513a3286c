mod errors;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::types::UnsupportedCode;

pub use errors::ValidationError;
pub use transaction::Transaction;

/// Kind of money movement a transaction describes.
///
/// Unknown codes are kept as `Unsupported` so that validation, not decoding,
/// decides whether the record is acceptable.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Unsupported(UnsupportedCode)
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
            TransactionType::Unsupported(code) => code.as_str()
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, TransactionType::Unsupported(_))
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "deposit" => TransactionType::Deposit,
            "withdrawal" => TransactionType::Withdrawal,
            "transfer" => TransactionType::Transfer,
            _ => TransactionType::Unsupported(UnsupportedCode::new(value))
        }
    }
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        TransactionType::from(value.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Unsupported(code) => code.into(),
            supported => supported.as_str().to_string()
        }
    }
}

/// Processing state of a transaction.
///
/// Owned by whatever drives the transaction lifecycle; validation never reads it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed
}
