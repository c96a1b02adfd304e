//! Error types for value conversion

use thiserror::Error;

/// Failure converting between ether-denominated decimals and wei
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must not be negative: {value}")]
    Negative { value: String },

    #[error("Amount has precision finer than one wei: {value}")]
    SubWeiPrecision { value: String },

    #[error("Amount out of representable range: {value}")]
    OutOfRange { value: String },
}
