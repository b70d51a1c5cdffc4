use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction has {0} operations, maximum is {max}", max = crate::MAX_OPERATIONS)]
    TooManyOperations(usize),

    #[error("payment amount must be positive")]
    ZeroAmountPayment,

    #[error("offer price must have nonzero numerator and denominator")]
    ZeroPrice,

    #[error("set-options operation sets nothing")]
    EmptySetOptions,

    #[error("offer cannot trade an asset against itself")]
    SelfTrade,

    #[error("envelope is not valid hex: {0}")]
    BadEnvelopeHex(String),

    #[error("envelope bytes did not decode: {0}")]
    BadEnvelopeBytes(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
