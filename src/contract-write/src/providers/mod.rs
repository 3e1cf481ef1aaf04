//! Collaborator interfaces consumed by the core.
//!
//! The explorer backend (ABI source) and the user's wallet are external; the core only talks
//! to them through these traits. Wallet methods are async because they suspend until the user
//! answers in their wallet.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use contract_write_types::{AbiFragment, ChainId, TransactionHandle};

use crate::errors::{ProviderError, SourceError};

/// Source of verified contract ABIs.
#[async_trait]
pub trait AbiSource: Send + Sync {
    /// Write-relevant ABI entries of the contract at `address`.
    async fn fetch_write_abi(&self, address: Address) -> Result<Vec<AbiFragment>, SourceError>;

    /// Implementation behind the proxy at `proxy`.
    async fn fetch_implementation_address(&self, proxy: Address) -> Result<Address, SourceError>;
}

/// A contract call as handed to the wallet.
#[derive(Clone, Debug)]
pub struct ContractCall<'a> {
    pub to: Address,
    pub fragment: &'a AbiFragment,
    pub args: &'a [DynSolValue],
    /// Selector followed by the ABI-encoded arguments.
    pub calldata: Bytes,
    pub value: U256,
}

/// Connected wallet (EIP-1193 style provider).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Chain the wallet currently targets, if known.
    fn connected_chain(&self) -> Option<ChainId>;

    async fn request_chain_switch(&self, chain_id: ChainId) -> Result<(), ProviderError>;

    /// Plain native-currency transfer. `Ok(None)` means the wallet produced no transaction.
    async fn send_value_transfer(
        &self,
        to: Address,
        value: U256,
    ) -> Result<Option<TransactionHandle>, ProviderError>;

    async fn send_contract_call(
        &self,
        call: &ContractCall<'_>,
    ) -> Result<Option<TransactionHandle>, ProviderError>;
}
