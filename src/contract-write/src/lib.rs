//! Write-invocation core for verified smart contracts.
//!
//! Given a contract address, the method a user picked and the values they typed, this crate
//! decides which ABI entry to call and how:
//!
//! - [`resolver`] finds the effective ABI (direct, behind a proxy, or user-supplied).
//! - [`matcher`] picks exactly one entry, telling overloads apart by input types.
//! - [`builder`] coerces the input into typed arguments and a native-currency value.
//! - [`chain_guard`] moves the wallet to the explorer's chain first.
//! - [`gateway`] hands the call (or plain value transfer) to the wallet.
//!
//! [`ContractWriter`] runs the whole sequence for one submission.

pub mod builder;
pub mod chain_guard;
pub mod errors;
pub mod gateway;
pub mod matcher;
pub mod mock;
pub mod providers;
pub mod resolver;
pub mod utils;
pub mod writer;

pub use builder::{build, build_positional, CallInput, PreparedCall, WriteKind};
pub use chain_guard::{ensure_chain, ChainStatus};
pub use errors::{ProviderError, SourceError, Stage, WriteError};
pub use gateway::submit;
pub use matcher::{match_fragment, match_method};
pub use providers::{AbiSource, ContractCall, WalletProvider};
pub use resolver::{resolve, AbiMode, ResolvedAbi};
pub use writer::{ContractWriter, WriteRequest, WriterConfig};

pub use contract_write_types as types;

#[cfg(test)]
mod tests;
