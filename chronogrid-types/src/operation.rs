use serde::{Deserialize, Serialize};

/// Arithmetic transform applied to the selected cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Assign,
    Add,
    #[serde(rename = "sub", alias = "subtract")]
    Subtract,
    #[serde(rename = "mul", alias = "multiply")]
    Multiply,
    #[serde(rename = "div", alias = "divide")]
    Divide,
    #[serde(rename = "abs", alias = "absolute")]
    Absolute,
}

impl OperationKind {
    /// Whether the operand `value` participates in the transform.
    pub const fn uses_value(self) -> bool {
        !matches!(self, OperationKind::Absolute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    #[serde(default)]
    pub value: f64,
}

impl Operation {
    pub const fn new(kind: OperationKind, value: f64) -> Self {
        Self { kind, value }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::new(OperationKind::Assign, 0.0)
    }
}
