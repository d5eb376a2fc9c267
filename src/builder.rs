//! Session builder for flexible configuration
//!
//! Collects configuration, an optional history backend and optional initial
//! data, then produces a ready [`MatrixSession`].

use crate::config::{AggregateType, EngineConfig, LayoutConfig, MatrixData, TimeSeriesRecipe};
use crate::error::Result;
use crate::session::{HistoryBackend, MatrixSession, MemoryHistory};

/// Builder for matrix sessions.
pub struct SessionBuilder {
    config: EngineConfig,
    history: Option<Box<dyn HistoryBackend>>,
    data: Option<MatrixData>,
    recipe: Option<TimeSeriesRecipe>,
}

impl SessionBuilder {
    /// Create a new builder with the default configuration and no data.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            history: None,
            data: None,
            recipe: None,
        }
    }

    /// Set the engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn aggregates(mut self, aggregates: Vec<AggregateType>) -> Self {
        self.config = self.config.with_aggregates(aggregates);
        self
    }

    pub fn aggregate_precision(mut self, precision: u32) -> Self {
        self.config = self.config.with_aggregate_precision(precision);
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config = self.config.with_layout(layout);
        self
    }

    /// Keep at most `capacity` undo snapshots in memory.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_history_capacity(capacity);
        self
    }

    /// Record undo snapshots into a custom backend instead of memory.
    pub fn history(mut self, history: Box<dyn HistoryBackend>) -> Self {
        self.history = Some(history);
        self
    }

    /// Matrix loaded when the session is built.
    pub fn data(mut self, data: MatrixData) -> Self {
        self.data = Some(data);
        self
    }

    /// Time series recipe for the initial matrix. Ignored without `data`.
    pub fn recipe(mut self, recipe: TimeSeriesRecipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    /// Build the session, loading the initial matrix if one was given.
    pub fn build(self) -> Result<MatrixSession> {
        let history = self
            .history
            .unwrap_or_else(|| Box::new(MemoryHistory::new(self.config.history_capacity)));
        let mut session = MatrixSession::with_history(self.config, history)?;

        match (self.data, self.recipe) {
            (Some(data), Some(recipe)) => session.load_with_recipe(data, &recipe)?,
            (Some(data), None) => session.load(data, None)?,
            (None, Some(_)) => log::warn!("Series recipe given without data; ignoring it"),
            (None, None) => {}
        }

        Ok(session)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("config", &self.config)
            .field("custom_history", &self.history.is_some())
            .field("data", &self.data.as_ref().map(MatrixData::row_count))
            .field("recipe", &self.recipe)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeLevel;
    use crate::error::GridError;

    #[test]
    fn test_builder_default() {
        let session = SessionBuilder::new().build().unwrap();
        assert!(session.matrix().is_empty());
        assert_eq!(session.config(), &EngineConfig::default());
    }

    #[test]
    fn test_builder_with_data_and_recipe() {
        let session = SessionBuilder::new()
            .data(MatrixData::new(vec![vec![1.0], vec![2.0]]))
            .recipe(TimeSeriesRecipe::new("2024-02-28", 2, TimeLevel::Daily))
            .build()
            .unwrap();

        assert_eq!(session.series().map(|s| s.len()), Some(2));
        assert_eq!(session.stats().loads, 1);
    }

    #[test]
    fn test_builder_history_capacity() {
        let mut session = SessionBuilder::new()
            .history_capacity(1)
            .data(MatrixData::new(vec![vec![0.0]]))
            .build()
            .unwrap();

        session.set_cell(0, 1, 1.0).unwrap();
        session.set_cell(0, 1, 2.0).unwrap();

        assert!(session.undo().unwrap());
        assert!(!session.undo().unwrap());
        assert_eq!(session.matrix().get(0, 0), Some(1.0));
    }

    #[test]
    fn test_builder_custom_history() {
        let session = SessionBuilder::new()
            .history(Box::new(MemoryHistory::new(3)))
            .aggregate_precision(2)
            .build()
            .unwrap();
        assert_eq!(session.config().aggregate_precision, 2);
    }

    #[test]
    fn test_builder_rejects_ragged_data() {
        let result = SessionBuilder::new()
            .data(MatrixData::new(vec![vec![1.0, 2.0], vec![]]))
            .build();
        assert!(matches!(result, Err(GridError::InvalidInput(_))));
    }
}
