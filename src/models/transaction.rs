use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{TransactionStatus, TransactionType, ValidationError};
use crate::types::{AccountId, Currency, TransactionId};

/// A single money movement as submitted by a caller.
///
/// Construction performs no checks; call [`Transaction::validate`] before
/// handing the record to anything downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Caller assigned identifier, never inspected here.
    pub id: TransactionId,
    /// The kind of operation (deposit, withdrawal, transfer)
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Source account, only meaningful for transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_from: Option<AccountId>,
    /// Destination account.
    pub account_to: AccountId,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>
}

impl Transaction {
    /// Checks the structural rules a transaction must satisfy.
    ///
    /// Rules are evaluated in a fixed order and only the first violation is
    /// reported:
    /// 1. `amount` must be strictly positive.
    /// 2. `currency` must be USD, EUR or RUB.
    /// 3. `type` must be deposit, withdrawal or transfer.
    /// 4. `account_to` must be present.
    /// 5. `account_from` must be present for transfers.
    ///
    /// `status`, `description` and `created_at` are not inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount)
        }

        if !self.currency.is_supported() {
            return Err(ValidationError::InvalidCurrency)
        }

        if !self.transaction_type.is_supported() {
            return Err(ValidationError::InvalidType)
        }

        if self.account_to.is_empty() {
            return Err(ValidationError::MissingAccountTo)
        }

        let has_source = self.account_from.as_deref().is_some_and(|account| !account.is_empty());

        if self.transaction_type == TransactionType::Transfer && !has_source {
            return Err(ValidationError::MissingAccountFrom)
        }

        Ok(())
    }
}
