//! Turns a matched ABI entry and raw user input into a [`PreparedCall`].

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use contract_write_types::{AbiFragment, FragmentKind};
use serde_json::Value;

use crate::{
    errors::WriteError,
    utils::{coerce::coerce_arg, value::parse_native_value},
};

/// Shape of a write call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteKind {
    /// Contract call with calldata.
    Function,
    /// Plain value transfer hitting `receive()`.
    Receive,
    /// Plain value transfer hitting `fallback()`.
    Fallback,
}

impl WriteKind {
    /// `None` for entries that cannot be written to.
    pub fn of(fragment: &AbiFragment) -> Option<Self> {
        if !fragment.is_write() {
            return None;
        }
        match fragment.kind {
            FragmentKind::Function => Some(Self::Function),
            FragmentKind::Receive => Some(Self::Receive),
            FragmentKind::Fallback => Some(Self::Fallback),
            FragmentKind::Constructor | FragmentKind::Event | FragmentKind::Error => None,
        }
    }

    pub fn is_value_transfer(self) -> bool {
        matches!(self, Self::Receive | Self::Fallback)
    }
}

/// Raw user input for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallInput {
    /// Form values in parameter order. One element past the declared inputs, if present, is
    /// the native-currency amount; for `receive`/`fallback` the only element is the amount.
    Positional(Vec<Value>),
    /// Arguments and amount given separately.
    Explicit {
        args: Vec<Value>,
        value: Option<Value>,
    },
}

impl CallInput {
    pub fn positional(raw: Vec<Value>) -> Self {
        Self::Positional(raw)
    }

    pub fn explicit(args: Vec<Value>, value: Option<Value>) -> Self {
        Self::Explicit { args, value }
    }

    /// Split into `(args, amount)` for a method with `inputs` declared parameters.
    pub fn split(&self, inputs: usize) -> (&[Value], Option<&Value>) {
        match self {
            Self::Positional(raw) if raw.len() > inputs => {
                let (value, args) = raw.split_last().map_or((None, &raw[..]), |(v, a)| (Some(v), a));
                (args, value)
            }
            Self::Positional(raw) => (raw.as_slice(), None),
            Self::Explicit { args, value } => (args.as_slice(), value.as_ref()),
        }
    }
}

/// A validated call, ready for the wallet.
///
/// `args.len()` always equals the entry's input count, and `value` is non-zero only for
/// payable functions and value transfers.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedCall {
    address: Address,
    fragment: AbiFragment,
    kind: WriteKind,
    args: Vec<DynSolValue>,
    value: U256,
}

impl PreparedCall {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn fragment(&self) -> &AbiFragment {
        &self.fragment
    }

    pub fn kind(&self) -> WriteKind {
        self.kind
    }

    pub fn args(&self) -> &[DynSolValue] {
        &self.args
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    /// Selector followed by the ABI-encoded arguments. Empty for value transfers.
    pub fn calldata(&self) -> Bytes {
        match self.kind {
            WriteKind::Function => {
                let encoded = DynSolValue::Tuple(self.args.clone()).abi_encode_params();
                let mut data = Vec::with_capacity(4 + encoded.len());
                data.extend_from_slice(&self.fragment.selector());
                data.extend_from_slice(&encoded);
                Bytes::from(data)
            }
            WriteKind::Receive | WriteKind::Fallback => Bytes::new(),
        }
    }
}

/// Build a call to `fragment` on `address` from raw input.
pub fn build(
    address: Address,
    fragment: &AbiFragment,
    input: &CallInput,
) -> Result<PreparedCall, WriteError> {
    let kind = WriteKind::of(fragment).ok_or_else(|| WriteError::MethodNotFound {
        method: fragment.signature(),
        candidates: 0,
    })?;

    let expected = fragment.inputs.len();
    let (raw_args, raw_value) = input.split(expected);
    if raw_args.len() != expected {
        return Err(WriteError::ArityMismatch {
            expected,
            actual: raw_args.len(),
        });
    }

    let value = parse_native_value(raw_value).map_err(|reason| WriteError::ArgumentTypeError {
        index: expected,
        expected_type: "native value".to_string(),
        reason,
    })?;

    let args = match kind {
        WriteKind::Function => {
            if !value.is_zero() && !fragment.is_payable() {
                return Err(WriteError::UnexpectedValue { value });
            }
            fragment
                .inputs
                .iter()
                .zip(raw_args)
                .enumerate()
                .map(|(index, (param, raw))| {
                    coerce_arg(param, raw).map_err(|reason| WriteError::ArgumentTypeError {
                        index,
                        expected_type: param.canonical_type(),
                        reason,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        WriteKind::Receive | WriteKind::Fallback => Vec::new(),
    };

    Ok(PreparedCall {
        address,
        fragment: fragment.clone(),
        kind,
        args,
        value,
    })
}

/// [`build`] with the trailing-slot convention for the amount.
pub fn build_positional(
    address: Address,
    fragment: &AbiFragment,
    raw: Vec<Value>,
) -> Result<PreparedCall, WriteError> {
    build(address, fragment, &CallInput::Positional(raw))
}
