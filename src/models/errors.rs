use thiserror::Error;

/// The first structural rule a transaction breaks.
///
/// Variants are listed in the order `Transaction::validate` checks them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than 0")]
    InvalidAmount,
    #[error("currency must be one of: USD, EUR, RUB")]
    InvalidCurrency,
    #[error("type must be one of: deposit, withdrawal, transfer")]
    InvalidType,
    #[error("account_to is required")]
    MissingAccountTo,
    #[error("account_from is required for transfer")]
    MissingAccountFrom
}
