//! Core analyzer traits.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::column::{ColumnIter, Row};
use super::types::AnalysisResult;

/// Core trait for analyzers that turn one column into an [`AnalysisResult`].
///
/// Analysis is split in two steps so that a large dataset can be processed
/// in partitions: each partition produces a state, the states are merged in
/// partition order, and the result is computed once from the merged state.
///
/// # Example
///
/// ```rust
/// use column_analysis::analyzers::{ColumnAnalyzer, ColumnIter, StatisticsAnalyzer};
///
/// let rows = vec![vec!["1", "a"], vec!["2", "b"], vec!["oops", "c"]];
/// let analyzer = StatisticsAnalyzer::new();
///
/// let column = ColumnIter::new(&rows, 1, 0).unwrap();
/// let state = analyzer.compute_state(column);
/// let result = analyzer.compute_result_from_state(&state);
///
/// assert_eq!(result.as_statistics().unwrap().count, 2);
/// ```
pub trait ColumnAnalyzer: Send + Sync + Debug {
    /// The state type for incremental computation.
    type State: AnalyzerState;

    /// Consumes the column and accumulates the analyzer state.
    fn compute_state<R: Row>(&self, column: ColumnIter<'_, R>) -> Self::State;

    /// Computes the final result from the accumulated state.
    fn compute_result_from_state(&self, state: &Self::State) -> AnalysisResult;

    /// Merges multiple states into a single state.
    fn merge_states(&self, states: Vec<Self::State>) -> Self::State {
        Self::State::merge(states)
    }

    /// Runs the whole analysis over one column.
    fn analyze<R: Row>(&self, column: ColumnIter<'_, R>) -> AnalysisResult {
        let state = self.compute_state(column);
        self.compute_result_from_state(&state)
    }

    /// Returns the name of this analyzer.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer computes.
    fn description(&self) -> &str {
        ""
    }
}

/// Trait for analyzer state that supports incremental computation.
///
/// States are serializable so partial results can be cached or shipped
/// between workers.
pub trait AnalyzerState:
    Clone + Default + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Merges states computed over consecutive partitions, in order.
    fn merge(states: Vec<Self>) -> Self
    where
        Self: Sized;

    /// Returns whether this state represents an empty computation.
    fn is_empty(&self) -> bool {
        false
    }
}
