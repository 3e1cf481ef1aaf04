//! End-to-end write submission: chain check, ABI resolution, matching, building and
//! submission, in that order.

use alloy_primitives::Address;
use contract_write_types::{AbiFragment, ChainId, MethodDescriptor, TransactionHandle};
use tracing::{debug, instrument};

use crate::{
    builder::{build, CallInput, PreparedCall},
    chain_guard::ensure_chain,
    errors::WriteError,
    gateway::submit,
    matcher::match_method,
    providers::{AbiSource, WalletProvider},
    resolver::{resolve, AbiMode},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterConfig {
    /// Chain the explorer serves; the wallet is moved there before submitting.
    pub chain_id: ChainId,
}

/// One user-initiated write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub address: Address,
    pub mode: AbiMode,
    pub custom_abi: Option<Vec<AbiFragment>>,
    pub descriptor: MethodDescriptor,
    pub input: CallInput,
}

impl WriteRequest {
    pub fn new(address: Address, descriptor: MethodDescriptor, input: CallInput) -> Self {
        Self {
            address,
            mode: AbiMode::Direct,
            custom_abi: None,
            descriptor,
            input,
        }
    }

    pub fn via_proxy(mut self) -> Self {
        self.mode = AbiMode::Proxy;
        self
    }

    pub fn with_custom_abi(mut self, abi: Vec<AbiFragment>) -> Self {
        self.mode = AbiMode::Custom;
        self.custom_abi = Some(abi);
        self
    }
}

/// Write-invocation entry point for a UI or CLI.
///
/// Holds no state between submissions; concurrent calls are independent and not deduplicated.
#[derive(Debug)]
pub struct ContractWriter<S, W> {
    source: S,
    wallet: W,
    config: WriterConfig,
}

impl<S: AbiSource, W> ContractWriter<S, W> {
    pub fn new(source: S, wallet: W, config: WriterConfig) -> Self {
        Self {
            source,
            wallet,
            config,
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Resolve, match and build without touching the wallet.
    pub async fn prepare(&self, request: &WriteRequest) -> Result<PreparedCall, WriteError> {
        let abi = resolve(
            &self.source,
            request.address,
            request.mode,
            request.custom_abi.as_deref(),
        )
        .await?;
        let fragment = match_method(&abi, &request.descriptor)?;
        let call = build(abi.address, fragment, &request.input)?;
        debug!(
            method = %fragment.signature(),
            args = call.args().len(),
            value = %call.value(),
            "call prepared"
        );
        Ok(call)
    }
}

impl<S: AbiSource, W: WalletProvider> ContractWriter<S, W> {
    /// Check the chain, then prepare and submit the call.
    ///
    /// A rejected chain switch never reaches the builder and a failed build never reaches
    /// the wallet.
    #[instrument(
        skip_all,
        fields(address = %request.address, mode = %request.mode, method = %request.descriptor.label())
    )]
    pub async fn submit_method_call(
        &self,
        request: &WriteRequest,
    ) -> Result<Option<TransactionHandle>, WriteError> {
        let status = ensure_chain(&self.wallet, self.config.chain_id).await?;
        debug!(?status, "chain checked");

        let call = self.prepare(request).await?;
        submit(&self.wallet, &call).await
    }
}
