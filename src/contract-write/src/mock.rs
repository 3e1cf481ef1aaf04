//! In-memory collaborators for tests and dry runs.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use contract_write_types::{AbiFragment, ChainId, TransactionHandle};

use crate::{
    errors::{ProviderError, SourceError},
    providers::{AbiSource, ContractCall, WalletProvider},
};

/// ABI source backed by maps.
#[derive(Clone, Debug, Default)]
pub struct MockAbiSource {
    abis: HashMap<Address, Vec<AbiFragment>>,
    implementations: HashMap<Address, Address>,
}

impl MockAbiSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abi(mut self, address: Address, abi: Vec<AbiFragment>) -> Self {
        self.abis.insert(address, abi);
        self
    }

    pub fn with_implementation(mut self, proxy: Address, implementation: Address) -> Self {
        self.implementations.insert(proxy, implementation);
        self
    }
}

#[async_trait]
impl AbiSource for MockAbiSource {
    async fn fetch_write_abi(&self, address: Address) -> Result<Vec<AbiFragment>, SourceError> {
        self.abis.get(&address).cloned().ok_or(SourceError::Unverified)
    }

    async fn fetch_implementation_address(&self, proxy: Address) -> Result<Address, SourceError> {
        self.implementations
            .get(&proxy)
            .copied()
            .ok_or(SourceError::NotProxy)
    }
}

/// What a [`MockWallet`] was asked to send.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedSubmission {
    ContractCall {
        to: Address,
        signature: String,
        args: Vec<DynSolValue>,
        calldata: Bytes,
        value: U256,
    },
    ValueTransfer {
        to: Address,
        value: U256,
    },
}

/// Wallet that records every request and answers from its configuration.
#[derive(Debug, Default)]
pub struct MockWallet {
    connected: bool,
    chain: Mutex<Option<ChainId>>,
    switch_error: Option<ProviderError>,
    submission_error: Option<ProviderError>,
    switch_requests: Mutex<Vec<ChainId>>,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl MockWallet {
    pub fn connected(chain_id: ChainId) -> Self {
        Self {
            connected: true,
            chain: Mutex::new(Some(chain_id)),
            ..Self::default()
        }
    }

    pub fn connected_without_chain() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn rejecting_switch(mut self, reason: ProviderError) -> Self {
        self.switch_error = Some(reason);
        self
    }

    pub fn failing_submission(mut self, reason: ProviderError) -> Self {
        self.submission_error = Some(reason);
        self
    }

    pub fn switch_requests(&self) -> Vec<ChainId> {
        lock(&self.switch_requests).clone()
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        lock(&self.submissions).clone()
    }

    fn record(&self, submission: RecordedSubmission) -> Result<Option<TransactionHandle>, ProviderError> {
        if let Some(err) = &self.submission_error {
            return Err(err.clone());
        }
        let mut submissions = lock(&self.submissions);
        let seed = format!("{}:{:?}", submissions.len(), submission);
        submissions.push(submission);
        Ok(Some(TransactionHandle(keccak256(seed.as_bytes()))))
    }
}

// Poisoning is ignored.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connected_chain(&self) -> Option<ChainId> {
        *lock(&self.chain)
    }

    async fn request_chain_switch(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        lock(&self.switch_requests).push(chain_id);
        if let Some(err) = &self.switch_error {
            return Err(err.clone());
        }
        *lock(&self.chain) = Some(chain_id);
        Ok(())
    }

    async fn send_value_transfer(
        &self,
        to: Address,
        value: U256,
    ) -> Result<Option<TransactionHandle>, ProviderError> {
        self.record(RecordedSubmission::ValueTransfer { to, value })
    }

    async fn send_contract_call(
        &self,
        call: &ContractCall<'_>,
    ) -> Result<Option<TransactionHandle>, ProviderError> {
        self.record(RecordedSubmission::ContractCall {
            to: call.to,
            signature: call.fragment.signature(),
            args: call.args.to_vec(),
            calldata: call.calldata.clone(),
            value: call.value,
        })
    }
}
