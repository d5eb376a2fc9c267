use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateType {
    Min,
    Max,
    Avg,
    Total,
}

impl AggregateType {
    pub const ALL: [AggregateType; 4] = [
        AggregateType::Min,
        AggregateType::Max,
        AggregateType::Avg,
        AggregateType::Total,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AggregateType::Min => "min",
            AggregateType::Max => "max",
            AggregateType::Avg => "avg",
            AggregateType::Total => "total",
        }
    }
}

/// Per-row statistics. A type that was not requested has an empty vector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregates {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
    pub avg: Vec<f64>,
    pub total: Vec<f64>,
}

impl Aggregates {
    pub fn get(&self, aggregate: AggregateType) -> &[f64] {
        match aggregate {
            AggregateType::Min => &self.min,
            AggregateType::Max => &self.max,
            AggregateType::Avg => &self.avg,
            AggregateType::Total => &self.total,
        }
    }

    pub fn get_mut(&mut self, aggregate: AggregateType) -> &mut Vec<f64> {
        match aggregate {
            AggregateType::Min => &mut self.min,
            AggregateType::Max => &mut self.max,
            AggregateType::Avg => &mut self.avg,
            AggregateType::Total => &mut self.total,
        }
    }

    pub fn value(&self, aggregate: AggregateType, row: usize) -> Option<f64> {
        self.get(aggregate).get(row).copied()
    }

    pub fn is_empty(&self) -> bool {
        AggregateType::ALL.iter().all(|a| self.get(*a).is_empty())
    }
}
