use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, Address, U256};
use contract_write_types::{AbiFragment, MethodDescriptor, Param, StateMutability};
use serde_json::json;

use crate::{
    errors::{ProviderError, Stage, WriteError},
    mock::{MockAbiSource, MockWallet, RecordedSubmission},
    writer::{ContractWriter, WriteRequest, WriterConfig},
    CallInput, WriteKind,
};

const TOKEN: Address = address!("000000000000000000000000000000000000abc1");
const PROXY: Address = address!("00000000000000000000000000000000000000a1");
const IMPL: Address = address!("00000000000000000000000000000000000000b2");
const RECIPIENT: &str = "0x0000000000000000000000000000000000000abc";

fn transfer_abi() -> Vec<AbiFragment> {
    vec![AbiFragment::function(
        "transfer",
        vec![Param::new("to", "address"), Param::new("amount", "uint256")],
        StateMutability::NonPayable,
    )]
}

fn overloaded_set_abi() -> Vec<AbiFragment> {
    vec![
        AbiFragment::function("set", vec![Param::new("v", "uint256")], StateMutability::NonPayable),
        AbiFragment::function("set", vec![Param::new("v", "string")], StateMutability::NonPayable),
    ]
}

fn writer(source: MockAbiSource, wallet: MockWallet) -> ContractWriter<MockAbiSource, MockWallet> {
    ContractWriter::new(source, wallet, WriterConfig { chain_id: 1 })
}

#[tokio::test]
async fn test_transfer_without_amount_prepares_zero_value_call() {
    let writer = writer(MockAbiSource::new().with_abi(TOKEN, transfer_abi()), MockWallet::connected(1));
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("transfer", ["address", "uint256"]),
        CallInput::positional(vec![json!(RECIPIENT), json!("100")]),
    );

    let call = writer.prepare(&request).await.unwrap();
    assert_eq!(call.kind(), WriteKind::Function);
    assert_eq!(
        call.args(),
        &[
            DynSolValue::Address(address!("0000000000000000000000000000000000000abc")),
            DynSolValue::Uint(U256::from(100u64), 256),
        ]
    );
    assert_eq!(call.value(), U256::ZERO);

    let handle = writer.submit_method_call(&request).await.unwrap();
    assert!(handle.is_some());
    assert_eq!(writer.wallet().submissions().len(), 1);
}

#[tokio::test]
async fn test_receive_sends_plain_native_transfer() {
    let abi = vec![transfer_abi().remove(0), AbiFragment::receive()];
    let writer = writer(MockAbiSource::new().with_abi(TOKEN, abi), MockWallet::connected(1));
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::receive(),
        CallInput::positional(vec![json!("1000")]),
    );

    writer.submit_method_call(&request).await.unwrap();
    assert_eq!(
        writer.wallet().submissions(),
        vec![RecordedSubmission::ValueTransfer {
            to: TOKEN,
            value: U256::from(1000u64)
        }]
    );
}

#[tokio::test]
async fn test_overloaded_set_resolves_by_input_types() {
    let writer = writer(
        MockAbiSource::new().with_abi(TOKEN, overloaded_set_abi()),
        MockWallet::connected(1),
    );

    let by_uint = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("set", ["uint256"]),
        CallInput::positional(vec![json!("5")]),
    );
    let call = writer.prepare(&by_uint).await.unwrap();
    assert_eq!(call.fragment().signature(), "set(uint256)");

    let neither = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("set", ["bool"]),
        CallInput::positional(vec![json!(true)]),
    );
    let err = writer.submit_method_call(&neither).await.unwrap_err();
    assert!(matches!(err, WriteError::MethodNotFound { candidates: 0, .. }));
    assert_eq!(err.stage(), Stage::Building);
    assert!(writer.wallet().submissions().is_empty());
}

#[tokio::test]
async fn test_rejected_switch_never_reaches_wallet_submission() {
    let wallet = MockWallet::connected(5).rejecting_switch(ProviderError::UserRejected);
    let writer = writer(MockAbiSource::new().with_abi(TOKEN, transfer_abi()), wallet);
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("transfer", ["address", "uint256"]),
        CallInput::positional(vec![json!(RECIPIENT), json!("100")]),
    );

    let err = writer.submit_method_call(&request).await.unwrap_err();
    assert!(matches!(
        err,
        WriteError::ChainSwitchRejected { expected: 1, actual: 5, .. }
    ));
    assert_eq!(err.stage(), Stage::Switching);
    assert_eq!(writer.wallet().switch_requests(), vec![1]);
    assert!(writer.wallet().submissions().is_empty());
}

#[tokio::test]
async fn test_switch_then_submit() {
    let writer = writer(
        MockAbiSource::new().with_abi(TOKEN, transfer_abi()),
        MockWallet::connected(5),
    );
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("transfer", ["address", "uint256"]),
        CallInput::positional(vec![json!(RECIPIENT), json!("1")]),
    );

    writer.submit_method_call(&request).await.unwrap();
    assert_eq!(writer.wallet().switch_requests(), vec![1]);
    assert_eq!(writer.wallet().submissions().len(), 1);
}

#[tokio::test]
async fn test_disconnected_wallet_fails_before_resolution() {
    // No ABI registered: resolving would fail, but the wallet check comes first.
    let writer = writer(MockAbiSource::new(), MockWallet::disconnected());
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::receive(),
        CallInput::positional(vec![]),
    );

    let err = writer.submit_method_call(&request).await.unwrap_err();
    assert_eq!(err, WriteError::WalletNotConnected);
    assert_eq!(err.stage(), Stage::ChainChecking);
}

#[tokio::test]
async fn test_proxy_call_targets_proxy_address() {
    let source = MockAbiSource::new()
        .with_abi(IMPL, transfer_abi())
        .with_implementation(PROXY, IMPL);
    let writer = writer(source, MockWallet::connected(1));
    let request = WriteRequest::new(
        PROXY,
        MethodDescriptor::function("transfer", ["address", "uint256"]),
        CallInput::positional(vec![json!(RECIPIENT), json!("1")]),
    )
    .via_proxy();

    writer.submit_method_call(&request).await.unwrap();
    match writer.wallet().submissions().as_slice() {
        [RecordedSubmission::ContractCall { to, .. }] => assert_eq!(*to, PROXY),
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_custom_abi_with_explicit_value() {
    let custom = vec![AbiFragment::function(
        "mint",
        vec![Param::new("qty", "uint256")],
        StateMutability::Payable,
    )];
    let writer = writer(MockAbiSource::new(), MockWallet::connected(1));
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("mint", ["uint256"]),
        CallInput::explicit(vec![json!("2")], Some(json!("500"))),
    )
    .with_custom_abi(custom);

    let call = writer.prepare(&request).await.unwrap();
    assert_eq!(call.value(), U256::from(500u64));
    assert_eq!(call.args().len(), 1);
}

#[tokio::test]
async fn test_provider_failure_is_not_retried() {
    let wallet = MockWallet::connected(1).failing_submission(ProviderError::Transport(
        "connection reset".into(),
    ));
    let writer = writer(MockAbiSource::new().with_abi(TOKEN, transfer_abi()), wallet);
    let request = WriteRequest::new(
        TOKEN,
        MethodDescriptor::function("transfer", ["address", "uint256"]),
        CallInput::positional(vec![json!(RECIPIENT), json!("1")]),
    );

    let err = writer.submit_method_call(&request).await.unwrap_err();
    assert_eq!(
        err,
        WriteError::SubmissionFailed {
            reason: ProviderError::Transport("connection reset".into())
        }
    );
    assert_eq!(err.stage(), Stage::Submitting);
}
