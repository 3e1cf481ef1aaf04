use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};

/// Entry kinds that can appear in a JSON ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Function,
    Receive,
    Fallback,
    Constructor,
    Event,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

/// One function input or output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Vec::new(),
            internal_type: None,
        }
    }

    /// Canonical Solidity type with `tuple` expanded from its components,
    /// eg `tuple[]` over `(uint256 a, address b)` becomes `(uint256,address)[]`.
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> =
                    self.components.iter().map(Param::canonical_type).collect();
                format!("({}){}", inner.join(","), suffix)
            }
            None => self.ty.clone(),
        }
    }
}

/// A single ABI entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFragment", rename_all = "camelCase")]
pub struct AbiFragment {
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub state_mutability: StateMutability,
}

impl AbiFragment {
    pub fn function(
        name: impl Into<String>,
        inputs: Vec<Param>,
        state_mutability: StateMutability,
    ) -> Self {
        Self {
            kind: FragmentKind::Function,
            name: Some(name.into()),
            inputs,
            outputs: Vec::new(),
            state_mutability,
        }
    }

    /// `receive() external payable`.
    pub fn receive() -> Self {
        Self {
            kind: FragmentKind::Receive,
            name: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: StateMutability::Payable,
        }
    }

    pub fn fallback(state_mutability: StateMutability) -> Self {
        Self {
            kind: FragmentKind::Fallback,
            name: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability,
        }
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }

    /// Whether the entry can be the target of a state-changing call.
    pub fn is_write(&self) -> bool {
        match self.kind {
            FragmentKind::Function => !self.state_mutability.is_read_only(),
            FragmentKind::Receive | FragmentKind::Fallback => true,
            FragmentKind::Constructor | FragmentKind::Event | FragmentKind::Error => false,
        }
    }

    pub fn input_types(&self) -> Vec<String> {
        self.inputs.iter().map(Param::canonical_type).collect()
    }

    /// `name(type,...)` for functions, the bare kind otherwise.
    pub fn signature(&self) -> String {
        match (self.kind, &self.name) {
            (FragmentKind::Function, Some(name)) => {
                format!("{}({})", name, self.input_types().join(","))
            }
            (FragmentKind::Receive, _) => "receive()".to_string(),
            (FragmentKind::Fallback, _) => "fallback()".to_string(),
            (_, name) => format!(
                "{}({})",
                name.as_deref().unwrap_or_default(),
                self.input_types().join(",")
            ),
        }
    }

    /// 4-byte function selector (keccak256 of the signature).
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&hash[..4]);
        sel
    }
}

// Accepts both current and legacy (`constant` / `payable` flag) ABI JSON.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFragment {
    #[serde(rename = "type", default)]
    kind: Option<FragmentKind>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<Param>,
    #[serde(default)]
    outputs: Vec<Param>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    payable: Option<bool>,
    #[serde(default)]
    constant: Option<bool>,
}

impl From<RawFragment> for AbiFragment {
    fn from(raw: RawFragment) -> Self {
        let state_mutability = match (raw.state_mutability, raw.payable, raw.constant) {
            (Some(m), _, _) => m,
            (None, Some(true), _) => StateMutability::Payable,
            (None, _, Some(true)) => StateMutability::View,
            _ => StateMutability::NonPayable,
        };
        Self {
            kind: raw.kind.unwrap_or(FragmentKind::Function),
            name: raw.name.filter(|n| !n.is_empty()),
            inputs: raw.inputs,
            outputs: raw.outputs,
            state_mutability,
        }
    }
}
