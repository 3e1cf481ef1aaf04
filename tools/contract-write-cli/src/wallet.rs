//! Wallet provider backed by an RPC endpoint and a local signing key.

use alloy_primitives::{Address, B256, U256};
use anyhow::{Context, Result};
use async_trait::async_trait;
use contract_write::{
    types::{ChainId, TransactionHandle},
    ContractCall, ProviderError, WalletProvider,
};
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{TransactionRequest, H160, U256 as EthU256},
};
use tracing::info;

pub struct EthersWallet {
    client: SignerMiddleware<Provider<Http>, LocalWallet>,
    chain_id: ChainId,
}

impl EthersWallet {
    pub async fn connect(rpc_url: &str, private_key: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .with_context(|| format!("invalid RPC URL {rpc_url}"))?;
        let chain_id = provider
            .get_chainid()
            .await
            .context("failed fetching chain id from RPC")?
            .as_u64();
        let signer = private_key
            .trim()
            .parse::<LocalWallet>()
            .context("invalid private key")?
            .with_chain_id(chain_id);

        info!(account = ?signer.address(), chain_id, "wallet connected");
        Ok(Self {
            client: SignerMiddleware::new(provider, signer),
            chain_id,
        })
    }

    async fn send(&self, tx: TransactionRequest) -> Result<Option<TransactionHandle>, ProviderError> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|e| classify(e.to_string()))?;
        Ok(Some(TransactionHandle::from(B256::from(pending.tx_hash().0))))
    }
}

#[async_trait]
impl WalletProvider for EthersWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn connected_chain(&self) -> Option<ChainId> {
        Some(self.chain_id)
    }

    // A key-backed session is bound to its RPC endpoint; it cannot hop networks.
    async fn request_chain_switch(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        Err(ProviderError::Other(format!(
            "RPC endpoint serves chain {}, not {chain_id}",
            self.chain_id
        )))
    }

    async fn send_value_transfer(
        &self,
        to: Address,
        value: U256,
    ) -> Result<Option<TransactionHandle>, ProviderError> {
        let tx = TransactionRequest::new().to(to_h160(to)).value(to_eth_u256(value));
        self.send(tx).await
    }

    async fn send_contract_call(
        &self,
        call: &ContractCall<'_>,
    ) -> Result<Option<TransactionHandle>, ProviderError> {
        let tx = TransactionRequest::new()
            .to(to_h160(call.to))
            .data(call.calldata.to_vec())
            .value(to_eth_u256(call.value));
        self.send(tx).await
    }
}

fn to_h160(address: Address) -> H160 {
    H160::from_slice(address.as_slice())
}

fn to_eth_u256(value: U256) -> EthU256 {
    EthU256::from_big_endian(&value.to_be_bytes::<32>())
}

fn classify(message: String) -> ProviderError {
    let lower = message.to_lowercase();
    if lower.contains("user rejected") || lower.contains("user denied") {
        ProviderError::UserRejected
    } else {
        ProviderError::Transport(message)
    }
}
