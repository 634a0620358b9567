use num_bigint::BigUint;
use thiserror::Error;

pub type ShamirResult<T> = Result<T, ShamirError>;

#[derive(Debug, Error)]
pub enum ShamirError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// Two field elements from different fields were combined. Correct callers never see this.
    #[error("field mismatch: operands live in GF({left}) and GF({right})")]
    FieldMismatch { left: BigUint, right: BigUint },
    #[error("{0} has no inverse in the field")]
    NotInvertible(BigUint),
    #[error("cannot reconstruct from {supplied} shares (threshold {threshold}, at most {num_shares})")]
    InsufficientOrExcessShares {
        supplied: usize,
        threshold: usize,
        num_shares: usize,
    },
    #[error("share {index} has a coordinate outside the field")]
    ShareOutOfRange { index: usize },
    #[error("generated shares kept exposing the secret")]
    LeakingShare,
    #[error("malformed shares: {0}")]
    MalformedShares(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
