//! ABI source backed by a Blockscout-style explorer API (`/api/v2/smart-contracts`).

use alloy_primitives::Address;
use async_trait::async_trait;
use contract_write::{types::AbiFragment, AbiSource, SourceError};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

pub struct ExplorerAbiSource {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SmartContract {
    #[serde(default)]
    implementations: Vec<Implementation>,
    #[serde(default)]
    implementation_address: Option<Address>,
}

#[derive(Deserialize)]
struct Implementation {
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    address_hash: Option<Address>,
}

impl SmartContract {
    /// First non-zero implementation address, preferring the `implementations` list over the
    /// legacy `implementation_address` field.
    fn implementation(&self) -> Result<Address, SourceError> {
        self.implementations
            .first()
            .and_then(|i| i.address.or(i.address_hash))
            .or(self.implementation_address)
            .filter(|a| !a.is_zero())
            .ok_or(SourceError::NotProxy)
    }
}

/// Error for a non-success explorer response, `None` when the status is a success.
fn status_error(url: &str, status: StatusCode) -> Option<SourceError> {
    match status {
        StatusCode::NOT_FOUND => Some(SourceError::NotFound),
        StatusCode::UNPROCESSABLE_ENTITY => Some(SourceError::Unverified),
        status if !status.is_success() => {
            Some(SourceError::Transport(format!("{url} returned {status}")))
        }
        _ => None,
    }
}

impl ExplorerAbiSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn contract_url(&self, address: Address) -> String {
        format!("{}/api/v2/smart-contracts/{}", self.base_url, address)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        debug!(url, "explorer request");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if let Some(err) = status_error(url, response.status()) {
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl AbiSource for ExplorerAbiSource {
    async fn fetch_write_abi(&self, address: Address) -> Result<Vec<AbiFragment>, SourceError> {
        let url = format!("{}/methods-write", self.contract_url(address));
        self.get_json(&url, &[("is_custom_abi", "false")]).await
    }

    async fn fetch_implementation_address(&self, proxy: Address) -> Result<Address, SourceError> {
        let contract: SmartContract = self.get_json(&self.contract_url(proxy), &[]).await?;
        contract.implementation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const IMPL: Address = address!("00000000000000000000000000000000000000bb");

    fn contract(json: &str) -> SmartContract {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_implementation_from_implementations_list() {
        let c = contract(
            r#"{
                "name": "TransparentUpgradeableProxy",
                "implementations": [
                    {"address": "0x00000000000000000000000000000000000000bb", "name": "Token"},
                    {"address": "0x00000000000000000000000000000000000000cc", "name": null}
                ],
                "implementation_address": "0x00000000000000000000000000000000000000dd"
            }"#,
        );
        assert_eq!(c.implementation(), Ok(IMPL));
    }

    #[test]
    fn test_implementation_from_address_hash() {
        let c = contract(
            r#"{"implementations": [{"address_hash": "0x00000000000000000000000000000000000000bb"}]}"#,
        );
        assert_eq!(c.implementation(), Ok(IMPL));
    }

    #[test]
    fn test_implementation_from_legacy_field() {
        let c = contract(
            r#"{"implementations": [], "implementation_address": "0x00000000000000000000000000000000000000bb"}"#,
        );
        assert_eq!(c.implementation(), Ok(IMPL));
    }

    #[test]
    fn test_zero_or_missing_implementation_is_not_a_proxy() {
        let zero = contract(
            r#"{"implementations": [{"address": "0x0000000000000000000000000000000000000000"}]}"#,
        );
        assert_eq!(zero.implementation(), Err(SourceError::NotProxy));

        let none = contract(r#"{"name": "Token", "implementation_address": null}"#);
        assert_eq!(none.implementation(), Err(SourceError::NotProxy));

        let empty = contract(r#"{"implementations": []}"#);
        assert_eq!(empty.implementation(), Err(SourceError::NotProxy));
    }

    #[test]
    fn test_status_mapping() {
        let url = "https://explorer.test/api/v2/smart-contracts/0x00";
        assert_eq!(status_error(url, StatusCode::OK), None);
        assert_eq!(status_error(url, StatusCode::NOT_FOUND), Some(SourceError::NotFound));
        assert_eq!(
            status_error(url, StatusCode::UNPROCESSABLE_ENTITY),
            Some(SourceError::Unverified)
        );
        assert!(matches!(
            status_error(url, StatusCode::BAD_GATEWAY),
            Some(SourceError::Transport(msg)) if msg.contains("502")
        ));
    }
}
