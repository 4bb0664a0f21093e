//! Pagination state with invalidation and stale-run rejection

use crate::document::DocumentModel;
use crate::error::Result;
use crate::layout::font::FontSpec;
use crate::layout::oracle::MeasurementOracle;
use crate::layout::pagination::{paginate, Budget, Pagination, WordSearch};
use std::sync::Arc;

/// Identifies the inputs a pagination run was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket {
    generation: u64,
}

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A self-contained pagination run.
///
/// Holds its own snapshot of every input, so it can be computed after the
/// session has moved on; the result is then offered back with its ticket.
#[derive(Debug, Clone)]
pub struct PaginationJob {
    pub ticket: RunTicket,
    pub document: DocumentModel,
    pub budget: Budget,
    pub font: FontSpec,
    pub search: WordSearch,
}

impl PaginationJob {
    pub fn run<O: MeasurementOracle + ?Sized>(&self, oracle: &O) -> Result<Pagination> {
        paginate(&self.document, self.budget, &self.font, oracle, self.search)
    }
}

/// What happened to a finished run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The result replaced the current page set
    Applied,
    /// Inputs changed while the run was in flight; the result was dropped
    Stale,
}

/// Holds the latest successful pagination and tracks whether it is current.
#[derive(Debug, Default)]
pub struct PaginationState {
    /// Last successful result
    current: Option<Arc<Pagination>>,
    /// Bumped on every input change
    generation: u64,
    /// Generation the current result was computed for
    applied_generation: Option<u64>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark inputs as changed; any run in flight becomes stale
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether the current result is missing or older than the inputs
    pub fn is_dirty(&self) -> bool {
        self.applied_generation != Some(self.generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket for a run over the current inputs
    pub fn ticket(&self) -> RunTicket {
        RunTicket {
            generation: self.generation,
        }
    }

    /// Offer a finished run.
    ///
    /// Stale results are dropped whether they succeeded or not. A current
    /// error leaves the previous page set in place and is returned.
    pub fn finish(&mut self, ticket: RunTicket, result: Result<Pagination>) -> Result<RunOutcome> {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping pagination for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return Ok(RunOutcome::Stale);
        }

        let pagination = result?;
        self.current = Some(Arc::new(pagination));
        self.applied_generation = Some(ticket.generation);
        Ok(RunOutcome::Applied)
    }

    /// Latest successful pagination, possibly older than the inputs
    pub fn pages(&self) -> Option<&Arc<Pagination>> {
        self.current.as_ref()
    }

    /// Get page count of the latest result
    pub fn page_count(&self) -> usize {
        self.current.as_ref().map_or(0, |p| p.page_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockNode;
    use crate::error::Error;
    use crate::layout::oracle::testing::{OfflineOracle, WordOracle};

    fn job(state: &PaginationState, doc: &DocumentModel) -> PaginationJob {
        PaginationJob {
            ticket: state.ticket(),
            document: doc.clone(),
            budget: Budget::new(630.0, 850.0).unwrap(),
            font: FontSpec::default(),
            search: WordSearch::Binary,
        }
    }

    #[test]
    fn test_new_state_is_dirty() {
        let state = PaginationState::new();
        assert!(state.is_dirty());
        assert!(state.pages().is_none());
        assert_eq!(state.page_count(), 0);
    }

    #[test]
    fn test_apply_and_invalidate() {
        let mut state = PaginationState::new();
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("a b c")]);
        let j = job(&state, &doc);
        let outcome = state.finish(j.ticket, j.run(&WordOracle::new(2.0))).unwrap();

        assert_eq!(outcome, RunOutcome::Applied);
        assert!(!state.is_dirty());
        assert_eq!(state.page_count(), 1);

        state.invalidate();
        assert!(state.is_dirty());
        // previous result is still shown until a new one lands
        assert_eq!(state.page_count(), 1);
    }

    #[test]
    fn test_stale_run_is_dropped() {
        let mut state = PaginationState::new();
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("a")]);
        let old = job(&state, &doc);

        state.invalidate();
        let newer = job(&state, &doc);

        let outcome = state.finish(old.ticket, old.run(&WordOracle::new(2.0))).unwrap();
        assert_eq!(outcome, RunOutcome::Stale);
        assert!(state.pages().is_none());

        let outcome = state
            .finish(newer.ticket, newer.run(&WordOracle::new(2.0)))
            .unwrap();
        assert_eq!(outcome, RunOutcome::Applied);
        assert_eq!(state.page_count(), 1);
    }

    #[test]
    fn test_error_keeps_previous_result() {
        let mut state = PaginationState::new();
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("a")]);
        let first = job(&state, &doc);
        state
            .finish(first.ticket, first.run(&WordOracle::new(2.0)))
            .unwrap();
        let before = state.pages().cloned();

        state.invalidate();
        let failing = job(&state, &doc);
        let result = state.finish(failing.ticket, failing.run(&OfflineOracle));

        assert!(matches!(result, Err(Error::OracleUnavailable(_))));
        assert!(state.is_dirty());
        assert_eq!(state.pages().cloned(), before);
    }
}
