mod code;
mod currency;

pub use code::UnsupportedCode;
pub use currency::Currency;

pub type AccountId = String;
pub type TransactionId = String;
