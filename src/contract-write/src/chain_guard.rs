use contract_write_types::ChainId;
use tracing::{debug, info, warn};

use crate::{errors::WriteError, providers::WalletProvider};

/// Result of a successful chain check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainStatus {
    /// Wallet already on the expected chain.
    Matched,
    /// Wallet accepted a switch to the expected chain.
    Switched { from: ChainId },
    /// Wallet did not report a chain; nothing to compare against.
    Unknown,
}

/// Make sure the wallet is connected and on `expected` before anything is built.
///
/// At most one switch request is issued. The call suspends until the user answers it.
pub async fn ensure_chain<W: WalletProvider + ?Sized>(
    wallet: &W,
    expected: ChainId,
) -> Result<ChainStatus, WriteError> {
    if !wallet.is_connected() {
        return Err(WriteError::WalletNotConnected);
    }

    let actual = match wallet.connected_chain() {
        Some(actual) => actual,
        None => {
            debug!(expected, "wallet did not report a chain");
            return Ok(ChainStatus::Unknown);
        }
    };
    if actual == expected {
        return Ok(ChainStatus::Matched);
    }

    info!(actual, expected, "requesting wallet chain switch");
    match wallet.request_chain_switch(expected).await {
        Ok(()) => Ok(ChainStatus::Switched { from: actual }),
        Err(reason) => {
            warn!(actual, expected, %reason, "chain switch rejected");
            Err(WriteError::ChainSwitchRejected {
                expected,
                actual,
                reason,
            })
        }
    }
}
