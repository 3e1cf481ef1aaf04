//! Hands a prepared call to the wallet. Never retries: resubmitting a value-bearing call is
//! the caller's decision.

use contract_write_types::TransactionHandle;
use tracing::{info, warn};

use crate::{
    builder::{PreparedCall, WriteKind},
    errors::WriteError,
    providers::{ContractCall, WalletProvider},
};

/// Submit `call` through `wallet`.
///
/// `Ok(None)` means the wallet accepted the request without producing a transaction.
pub async fn submit<W: WalletProvider + ?Sized>(
    wallet: &W,
    call: &PreparedCall,
) -> Result<Option<TransactionHandle>, WriteError> {
    let to = call.address();
    let value = call.value();

    let result = match call.kind() {
        WriteKind::Function => {
            let contract_call = ContractCall {
                to,
                fragment: call.fragment(),
                args: call.args(),
                calldata: call.calldata(),
                value,
            };
            wallet.send_contract_call(&contract_call).await
        }
        WriteKind::Receive | WriteKind::Fallback => wallet.send_value_transfer(to, value).await,
    };

    match result {
        Ok(Some(handle)) => {
            info!(%to, %value, tx = %handle, "transaction submitted");
            Ok(Some(handle))
        }
        Ok(None) => {
            warn!(%to, "wallet returned no transaction");
            Ok(None)
        }
        Err(reason) if reason.is_cancellation() => {
            info!(%to, %reason, "submission cancelled in wallet");
            Err(WriteError::SubmissionFailed { reason })
        }
        Err(reason) => {
            warn!(%to, %reason, "submission failed");
            Err(WriteError::SubmissionFailed { reason })
        }
    }
}
