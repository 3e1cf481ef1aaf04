//! Picks the single ABI entry a method descriptor refers to.

use alloy_dyn_abi::DynSolType;
use contract_write_types::{AbiFragment, FragmentKind, MethodDescriptor, Param};
use tracing::debug;

use crate::{errors::WriteError, resolver::ResolvedAbi};

/// Find the write entry of `abi` matching `descriptor`.
pub fn match_method<'a>(
    abi: &'a ResolvedAbi,
    descriptor: &MethodDescriptor,
) -> Result<&'a AbiFragment, WriteError> {
    match_fragment(&abi.fragments, descriptor)
}

/// Functions match on `(name, input type sequence)`; `receive` and `fallback` match on kind.
/// Anything other than exactly one candidate is an error, including duplicated entries.
pub fn match_fragment<'a>(
    fragments: &'a [AbiFragment],
    descriptor: &MethodDescriptor,
) -> Result<&'a AbiFragment, WriteError> {
    if descriptor.kind == FragmentKind::Function && descriptor.name.is_none() {
        return Err(WriteError::MethodNotFound {
            method: descriptor.label(),
            candidates: 0,
        });
    }

    let mut found = fragments
        .iter()
        .filter(|f| f.is_write() && fragment_matches(f, descriptor));
    match (found.next(), found.count()) {
        (Some(fragment), 0) => {
            debug!(method = %fragment.signature(), "matched ABI entry");
            Ok(fragment)
        }
        (None, _) => Err(WriteError::MethodNotFound {
            method: descriptor.label(),
            candidates: 0,
        }),
        (Some(_), rest) => Err(WriteError::MethodNotFound {
            method: descriptor.label(),
            candidates: rest + 1,
        }),
    }
}

fn fragment_matches(fragment: &AbiFragment, descriptor: &MethodDescriptor) -> bool {
    match descriptor.kind {
        FragmentKind::Function => {
            fragment.kind == FragmentKind::Function
                && fragment.name == descriptor.name
                && same_type_sequence(&fragment.inputs, &descriptor.inputs)
        }
        FragmentKind::Receive | FragmentKind::Fallback => fragment.kind == descriptor.kind,
        FragmentKind::Constructor | FragmentKind::Event | FragmentKind::Error => false,
    }
}

/// Ordered, element-wise type equality. Parameter names are ignored.
pub fn same_type_sequence(lhs: &[Param], rhs: &[Param]) -> bool {
    lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| same_type(a, b))
}

// Compares resolved types so aliases like `uint` and `uint256` are equal.
fn same_type(a: &Param, b: &Param) -> bool {
    let (a, b) = (a.canonical_type(), b.canonical_type());
    match (DynSolType::parse(&a), DynSolType::parse(&b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
