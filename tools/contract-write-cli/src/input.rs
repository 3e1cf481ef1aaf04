//! Command-line method signatures and argument values.

use anyhow::{anyhow, bail, Result};
use contract_write::types::MethodDescriptor;
use regex::Regex;
use serde_json::Value;

/// Parse `name(type,...)`, `receive` or `fallback`.
pub fn parse_method(signature: &str) -> Result<MethodDescriptor> {
    let signature = signature.trim();
    match signature {
        "receive" | "receive()" => return Ok(MethodDescriptor::receive()),
        "fallback" | "fallback()" => return Ok(MethodDescriptor::fallback()),
        _ => {}
    }

    let re = Regex::new(r"^([A-Za-z_$][A-Za-z0-9_$]*)\s*\((.*)\)$")?;
    let caps = re
        .captures(signature)
        .ok_or_else(|| anyhow!("invalid method `{signature}`: expected name(type,...)"))?;
    let types = split_types(&caps[2])?;
    Ok(MethodDescriptor::function(&caps[1], types))
}

// Splits on commas outside parentheses so tuple types stay whole.
fn split_types(list: &str) -> Result<Vec<String>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| anyhow!("unbalanced parentheses in `{list}`"))?;
            }
            ',' if depth == 0 => {
                types.push(list[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        bail!("unbalanced parentheses in `{list}`");
    }
    types.push(list[start..].trim().to_string());

    if let Some(empty) = types.iter().position(String::is_empty) {
        bail!("empty type at position {empty} in `{list}`");
    }
    Ok(types)
}

/// Raw form value for one argument.
///
/// Lists and objects are read as JSON; everything else stays a string so large integers keep
/// full precision.
pub fn parse_arg(raw: &str) -> Value {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_write::types::FragmentKind;
    use serde_json::json;

    #[test]
    fn test_parse_method_signatures() {
        let m = parse_method("transfer(address,uint256)").unwrap();
        assert_eq!(m.name.as_deref(), Some("transfer"));
        assert_eq!(m.input_types(), vec!["address", "uint256"]);

        let m = parse_method("fill((uint256,address)[], bool)").unwrap();
        assert_eq!(m.input_types(), vec!["(uint256,address)[]", "bool"]);

        assert!(parse_method("pause()").unwrap().inputs.is_empty());
        assert_eq!(parse_method("receive").unwrap().kind, FragmentKind::Receive);
        assert_eq!(parse_method("fallback()").unwrap().kind, FragmentKind::Fallback);
    }

    #[test]
    fn test_parse_method_rejects_garbage() {
        assert!(parse_method("transfer").is_err());
        assert!(parse_method("set((uint256)").is_err());
        assert!(parse_method("set(uint256,)").is_err());
    }

    #[test]
    fn test_parse_arg_keeps_big_integers_as_strings() {
        assert_eq!(
            parse_arg("123456789012345678901234567890"),
            json!("123456789012345678901234567890")
        );
        assert_eq!(parse_arg("[1,\"2\"]"), json!([1, "2"]));
        assert_eq!(parse_arg("[unterminated"), json!("[unterminated"));
    }
}
