use core::str::FromStr;

use alloy_primitives::U256;
use serde_json::Value;

/// Parse the native-currency amount slot of a call.
///
/// The amount is already in the smallest unit: no decimal scaling is applied. A missing
/// slot, `null` or an empty string means zero.
pub fn parse_native_value(raw: Option<&Value>) -> Result<U256, String> {
    match raw {
        None | Some(Value::Null) => Ok(U256::ZERO),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(U256::ZERO);
            }
            U256::from_str(s).map_err(|e| format!("`{s}` is not an integer amount: {e}"))
        }
        Some(Value::Number(n)) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| format!("`{n}` is not a non-negative integer amount")),
        Some(other) => Err(format!("`{other}` is not an amount")),
    }
}
