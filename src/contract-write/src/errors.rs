use core::fmt;

use alloy_primitives::{Address, U256};
use contract_write_types::ChainId;
use thiserror::Error;

/// Reasons a wallet provider gives for not completing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The user declined the request in their wallet.
    #[error("user rejected the request")]
    UserRejected,
    /// The request was dropped before the user answered.
    #[error("request was cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserRejected | Self::Cancelled)
    }
}

/// Errors raised by an ABI source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("contract not found")]
    NotFound,
    #[error("contract is not verified")]
    Unverified,
    #[error("address is not a proxy")]
    NotProxy,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Terminal failure of a single write submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("no ABI available for {address}: {reason}")]
    AbiUnavailable { address: Address, reason: String },
    #[error("method `{method}` not found in ABI ({candidates} matching entries)")]
    MethodNotFound { method: String, candidates: usize },
    #[error("expected {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("method is not payable but a value of {value} was attached")]
    UnexpectedValue { value: U256 },
    #[error("argument #{index} is not a valid `{expected_type}`: {reason}")]
    ArgumentTypeError {
        index: usize,
        expected_type: String,
        reason: String,
    },
    #[error("wallet is not connected")]
    WalletNotConnected,
    #[error("switching wallet from chain {actual} to chain {expected} failed: {reason}")]
    ChainSwitchRejected {
        expected: ChainId,
        actual: ChainId,
        reason: ProviderError,
    },
    #[error("submission failed: {reason}")]
    SubmissionFailed { reason: ProviderError },
}

impl WriteError {
    /// Stage of the submission state machine in which this error terminated.
    pub fn stage(&self) -> Stage {
        match self {
            Self::WalletNotConnected => Stage::ChainChecking,
            Self::ChainSwitchRejected { .. } => Stage::Switching,
            Self::AbiUnavailable { .. }
            | Self::MethodNotFound { .. }
            | Self::ArityMismatch { .. }
            | Self::UnexpectedValue { .. }
            | Self::ArgumentTypeError { .. } => Stage::Building,
            Self::SubmissionFailed { .. } => Stage::Submitting,
        }
    }
}

/// Steps of one submission in which it can fail:
/// `ChainChecking -> [Switching] -> Building -> Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ChainChecking,
    Switching,
    Building,
    Submitting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ChainChecking => "chain_checking",
            Self::Switching => "switching",
            Self::Building => "building",
            Self::Submitting => "submitting",
        };
        f.write_str(s)
    }
}
