use crate::aggregate::AggregateType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Datetime,
    Number,
    Aggregate,
}

/// One visual grid column. Only `Number` columns map onto the data array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    #[serde(default)]
    pub title: String,
    pub kind: ColumnKind,
    #[serde(default)]
    pub editable: bool,
}

impl ColumnDescriptor {
    pub fn new(title: impl Into<String>, kind: ColumnKind, editable: bool) -> Self {
        Self {
            title: title.into(),
            kind,
            editable,
        }
    }

    pub fn text(title: impl Into<String>) -> Self {
        Self::new(title, ColumnKind::Text, false)
    }

    pub fn datetime(title: impl Into<String>) -> Self {
        Self::new(title, ColumnKind::Datetime, false)
    }

    pub fn number(title: impl Into<String>) -> Self {
        Self::new(title, ColumnKind::Number, true)
    }

    pub fn aggregate(aggregate: AggregateType) -> Self {
        Self::new(aggregate.as_str(), ColumnKind::Aggregate, false)
    }

    pub fn is_data(&self) -> bool {
        self.kind == ColumnKind::Number
    }
}
