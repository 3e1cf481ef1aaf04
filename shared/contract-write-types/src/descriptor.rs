use serde::{Deserialize, Serialize};

use crate::abi::{AbiFragment, FragmentKind, Param};

/// The method a caller selected for invocation.
///
/// Deserializes from the same JSON shape as an ABI entry, since explorers hand out their
/// write-method lists in ABI form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AbiFragment")]
pub struct MethodDescriptor {
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub inputs: Vec<Param>,
}

impl MethodDescriptor {
    /// Function descriptor from a name and its ordered input types.
    pub fn function<I, S>(name: impl Into<String>, input_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: FragmentKind::Function,
            name: Some(name.into()),
            inputs: input_types
                .into_iter()
                .map(|ty| Param::new("", ty))
                .collect(),
        }
    }

    pub fn receive() -> Self {
        Self {
            kind: FragmentKind::Receive,
            name: None,
            inputs: Vec::new(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            kind: FragmentKind::Fallback,
            name: None,
            inputs: Vec::new(),
        }
    }

    pub fn input_types(&self) -> Vec<String> {
        self.inputs.iter().map(Param::canonical_type).collect()
    }

    /// Human-readable label used in errors and logs.
    pub fn label(&self) -> String {
        match self.kind {
            FragmentKind::Receive => "receive()".to_string(),
            FragmentKind::Fallback => "fallback()".to_string(),
            _ => format!(
                "{}({})",
                self.name.as_deref().unwrap_or("<unnamed>"),
                self.input_types().join(",")
            ),
        }
    }
}

impl From<AbiFragment> for MethodDescriptor {
    fn from(fragment: AbiFragment) -> Self {
        Self {
            kind: fragment.kind,
            name: fragment.name,
            inputs: fragment.inputs,
        }
    }
}

impl From<&AbiFragment> for MethodDescriptor {
    fn from(fragment: &AbiFragment) -> Self {
        fragment.clone().into()
    }
}
