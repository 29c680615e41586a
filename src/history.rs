//! Session-scoped result cache and rolling history.
//!
//! The session is the only mutable shared state in the pipeline. It is an
//! explicit object owned by the caller (through the
//! [`Analyzer`](crate::pipeline::Analyzer)), never a process-wide
//! singleton. Inserts are serialized behind one lock, so concurrent
//! analyses completing out of order still produce a coherent,
//! insertion-ordered history for display.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::telemetry;
use crate::types::{AnalysisResult, ComparisonResult};

/// One completed analysis, as recorded for the history table.
///
/// Entries are immutable after insertion and leave the ring only through
/// overflow eviction or an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unix epoch milliseconds at completion.
    pub timestamp_ms: u64,
    /// Fingerprint digest of the originating request text(s).
    pub request_digest: u128,
    /// Scalar score of the (first) result.
    pub score_a: f64,
    /// Second score, present for pair analyses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_b: Option<f64>,
}

impl HistoryEntry {
    /// Build an entry stamped with the current wall clock.
    pub fn now(request_digest: u128, score_a: f64, score_b: Option<f64>) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            timestamp_ms,
            request_digest,
            score_a,
            score_b,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    entries: VecDeque<HistoryEntry>,
    last_result: Option<AnalysisResult>,
    last_comparison: Option<ComparisonResult>,
}

/// Bounded ring of history entries plus the most recent result(s).
///
/// Newest entries sit at the front, matching the display order of the
/// history table; the oldest entry is evicted when the ring is full.
#[derive(Debug)]
pub struct Session {
    inner: Mutex<SessionState>,
    capacity: usize,
}

impl Session {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SessionState::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a completed analysis. Evicts the oldest entry on overflow.
    pub fn record(&self, entry: HistoryEntry) {
        let mut state = self.lock();
        if state.entries.len() == self.capacity {
            state.entries.pop_back();
            metrics::counter!(telemetry::HISTORY_EVICTIONS_TOTAL).increment(1);
        }
        state.entries.push_front(entry);
    }

    /// Remember the most recent single-analysis result.
    pub fn remember_result(&self, result: &AnalysisResult) {
        self.lock().last_result = Some(result.clone());
    }

    /// Remember the most recent comparison.
    pub fn remember_comparison(&self, comparison: &ComparisonResult) {
        self.lock().last_comparison = Some(comparison.clone());
    }

    pub fn last_result(&self) -> Option<AnalysisResult> {
        self.lock().last_result.clone()
    }

    pub fn last_comparison(&self) -> Option<ComparisonResult> {
        self.lock().last_comparison.clone()
    }

    /// Clone the history out, newest first, for rendering or export.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drop all history and remembered results.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.last_result = None;
        state.last_comparison = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // Writers never panic while holding the lock; poisoning would be
        // a bug, not a recoverable state.
        self.inner.lock().expect("session lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_come_back_newest_first() {
        let session = Session::new(8);
        session.record(HistoryEntry::now(1, 1.0, None));
        session.record(HistoryEntry::now(2, 2.0, None));
        let snapshot = session.snapshot();
        assert_eq!(snapshot[0].request_digest, 2);
        assert_eq!(snapshot[1].request_digest, 1);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let session = Session::new(2);
        for digest in 1..=3u128 {
            session.record(HistoryEntry::now(digest, 0.0, None));
        }
        let snapshot = session.snapshot();
        assert_eq!(session.len(), 2);
        assert_eq!(snapshot[0].request_digest, 3);
        assert_eq!(snapshot[1].request_digest, 2);
    }

    #[test]
    fn reset_clears_everything() {
        let session = Session::new(4);
        session.record(HistoryEntry::now(1, 5.0, Some(6.0)));
        session.reset();
        assert!(session.is_empty());
        assert!(session.last_result().is_none());
    }
}
