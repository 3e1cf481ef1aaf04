//! Coercion of raw form input into `DynSolValue`s.
//!
//! Scalars go through alloy's string coercion, so `"1 ether"`, checksummed or lowercase
//! addresses and `0x` hex all behave as they do in wallets. `string` values are passed
//! through untouched. Arrays and tuples accept JSON
//! arrays element by element, or a single string literal such as `"[1,2]"`.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use contract_write_types::Param;
use serde_json::Value;

/// Coerce `raw` to the canonical type of `param`.
pub fn coerce_arg(param: &Param, raw: &Value) -> Result<DynSolValue, String> {
    let ty = DynSolType::parse(&param.canonical_type()).map_err(|e| e.to_string())?;
    coerce_value(&ty, raw)
}

pub fn coerce_value(ty: &DynSolType, raw: &Value) -> Result<DynSolValue, String> {
    match (ty, raw) {
        (DynSolType::Array(inner), Value::Array(items)) => {
            let values = coerce_all(inner, items)?;
            Ok(DynSolValue::Array(values))
        }
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(format!("expected {len} elements, got {}", items.len()));
            }
            Ok(DynSolValue::FixedArray(coerce_all(inner, items)?))
        }
        (DynSolType::Tuple(types), Value::Array(items)) => {
            if items.len() != types.len() {
                return Err(format!(
                    "expected {} tuple members, got {}",
                    types.len(),
                    items.len()
                ));
            }
            let values = types
                .iter()
                .zip(items)
                .map(|(ty, item)| coerce_value(ty, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        (_, Value::Array(_)) => Err(format!("a list is not a `{}`", ty.sol_type_name())),
        (DynSolType::String, Value::String(s)) => Ok(DynSolValue::String(s.clone())),
        (_, Value::String(s)) => ty.coerce_str(s.trim()).map_err(|e| e.to_string()),
        // Integers past u64 arrive as lossy floats; only exact JSON integers are coerced.
        (_, Value::Number(n)) if n.is_f64() => Err(format!(
            "`{n}` is not an exact integer; pass large or fractional numbers as strings"
        )),
        (_, Value::Number(n)) => ty.coerce_str(&n.to_string()).map_err(|e| e.to_string()),
        (_, Value::Bool(b)) => ty
            .coerce_str(if *b { "true" } else { "false" })
            .map_err(|e| e.to_string()),
        (_, Value::Null) => Err("value is missing".to_string()),
        (_, Value::Object(_)) => Err(format!("an object is not a `{}`", ty.sol_type_name())),
    }
}

fn coerce_all(inner: &DynSolType, items: &[Value]) -> Result<Vec<DynSolValue>, String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| coerce_value(inner, item).map_err(|e| format!("element {i}: {e}")))
        .collect()
}
