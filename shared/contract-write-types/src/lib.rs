//! Shared types for contract ABIs, method descriptors and submission handles.

pub mod abi;
pub mod descriptor;

pub use abi::{AbiFragment, FragmentKind, Param, StateMutability};
pub use descriptor::MethodDescriptor;

use core::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Numeric network id (EIP-155).
pub type ChainId = u64;

/// Hash of a transaction accepted by the wallet provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHandle(pub B256);

impl From<B256> for TransactionHandle {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
