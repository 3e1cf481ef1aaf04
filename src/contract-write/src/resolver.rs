//! Effective write ABI for a contract.

use core::{fmt, str::FromStr};

use alloy_primitives::Address;
use contract_write_types::AbiFragment;
use thiserror::Error;
use tracing::debug;

use crate::{errors::WriteError, providers::AbiSource};

/// Where the ABI for write calls comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AbiMode {
    /// The contract's own verified ABI.
    #[default]
    Direct,
    /// The ABI of the implementation behind a proxy; calls still target the proxy.
    Proxy,
    /// A caller-supplied ABI.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ABI mode `{0}`")]
pub struct ParseAbiModeError(pub String);

impl FromStr for AbiMode {
    type Err = ParseAbiModeError;

    /// Accepts the explorer tab names as well as the bare mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direct" | "write_contract" => Ok(Self::Direct),
            "proxy" | "write_proxy" => Ok(Self::Proxy),
            "custom" | "write_custom_methods" => Ok(Self::Custom),
            other => Err(ParseAbiModeError(other.to_string())),
        }
    }
}

impl fmt::Display for AbiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Direct => "direct",
            Self::Proxy => "proxy",
            Self::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// ABI resolved for one contract address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAbi {
    pub mode: AbiMode,
    /// Call target. For proxies this is the proxy, not the implementation.
    pub address: Address,
    /// Address the ABI was sourced from (proxy mode only).
    pub implementation: Option<Address>,
    pub fragments: Vec<AbiFragment>,
}

/// Resolve the ABI used for write calls against `address`.
///
/// An empty direct ABI is a valid resolution (no public write methods). An empty proxy
/// implementation ABI is not: it means the proxy could not be resolved.
pub async fn resolve<S: AbiSource + ?Sized>(
    source: &S,
    address: Address,
    mode: AbiMode,
    custom_abi: Option<&[AbiFragment]>,
) -> Result<ResolvedAbi, WriteError> {
    let unavailable = |reason: String| WriteError::AbiUnavailable { address, reason };

    let (implementation, fragments) = match mode {
        AbiMode::Direct => {
            let fragments = source
                .fetch_write_abi(address)
                .await
                .map_err(|e| unavailable(e.to_string()))?;
            (None, fragments)
        }
        AbiMode::Proxy => {
            let implementation = source
                .fetch_implementation_address(address)
                .await
                .map_err(|e| unavailable(format!("proxy implementation: {e}")))?;
            let fragments = source
                .fetch_write_abi(implementation)
                .await
                .map_err(|e| unavailable(format!("implementation {implementation}: {e}")))?;
            if fragments.is_empty() {
                return Err(unavailable(format!(
                    "implementation {implementation} exposes no ABI"
                )));
            }
            (Some(implementation), fragments)
        }
        AbiMode::Custom => {
            let fragments = custom_abi
                .ok_or_else(|| unavailable("no custom ABI supplied".to_string()))?
                .to_vec();
            (None, fragments)
        }
    };

    debug!(%address, %mode, ?implementation, entries = fragments.len(), "resolved ABI");
    Ok(ResolvedAbi {
        mode,
        address,
        implementation,
        fragments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAbiSource;
    use alloy_primitives::address;
    use contract_write_types::{Param, StateMutability};

    const PROXY: Address = address!("00000000000000000000000000000000000000aa");
    const IMPL: Address = address!("00000000000000000000000000000000000000bb");

    fn set_abi() -> Vec<AbiFragment> {
        vec![AbiFragment::function(
            "set",
            vec![Param::new("v", "uint256")],
            StateMutability::NonPayable,
        )]
    }

    #[tokio::test]
    async fn test_proxy_sources_implementation_but_targets_proxy() {
        let source = MockAbiSource::new()
            .with_abi(IMPL, set_abi())
            .with_implementation(PROXY, IMPL);

        let abi = resolve(&source, PROXY, AbiMode::Proxy, None).await.unwrap();
        assert_eq!(abi.address, PROXY);
        assert_eq!(abi.implementation, Some(IMPL));
        assert_eq!(abi.fragments, set_abi());
    }

    #[tokio::test]
    async fn test_proxy_with_empty_implementation_abi_is_unavailable() {
        let source = MockAbiSource::new()
            .with_abi(IMPL, vec![])
            .with_implementation(PROXY, IMPL);

        let err = resolve(&source, PROXY, AbiMode::Proxy, None).await.unwrap_err();
        assert!(matches!(err, WriteError::AbiUnavailable { address, .. } if address == PROXY));
    }

    #[tokio::test]
    async fn test_unverified_direct_contract_is_unavailable() {
        let source = MockAbiSource::new();
        let err = resolve(&source, PROXY, AbiMode::Direct, None).await.unwrap_err();
        assert!(matches!(err, WriteError::AbiUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_custom_abi_is_used_verbatim() {
        let source = MockAbiSource::new().with_abi(PROXY, vec![]);
        let custom = set_abi();

        let abi = resolve(&source, PROXY, AbiMode::Custom, Some(&custom))
            .await
            .unwrap();
        assert_eq!(abi.fragments, custom);
        assert_eq!(abi.implementation, None);

        let err = resolve(&source, PROXY, AbiMode::Custom, None).await.unwrap_err();
        assert!(matches!(err, WriteError::AbiUnavailable { .. }));
    }

    #[test]
    fn test_mode_from_explorer_tab() {
        assert_eq!("write_proxy".parse::<AbiMode>(), Ok(AbiMode::Proxy));
        assert_eq!("write_custom_methods".parse::<AbiMode>(), Ok(AbiMode::Custom));
        assert_eq!("write_contract".parse::<AbiMode>(), Ok(AbiMode::Direct));
        assert!("read_contract".parse::<AbiMode>().is_err());
    }
}
