// Analyzer session state
//
// Tracks the one piece of state that survives between analysis runs: whether
// the previous run reported conflicts, and the resolution notice shown once
// they disappear.

use crate::analysis::AnalysisResult;
use chrono::{DateTime, Local};

/// Timestamp format used in resolution notices.
const RESOLVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Notice recorded when a run clears the previous run's conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub at: DateTime<Local>,
    pub message: String,
}

/// What the caution area should show after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CautionState {
    /// Current conflict messages
    Conflicts(Vec<String>),
    /// Earlier conflicts were resolved
    Resolved(String),
    /// Nothing to report
    Clear,
}

/// State carried across analysis runs of one session.
///
/// Created at session start, updated by [`AnalyzerSession::record`] after
/// every run, dropped when the session ends.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerSession {
    last_conflict_count: usize,
    resolution: Option<Resolution>,
    runs: usize,
}

impl AnalyzerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the session with a finished run and return what to display.
    ///
    /// A clean run right after a run with conflicts produces a fresh
    /// resolution notice stamped with `now`. Later clean runs keep showing
    /// that notice until a new conflict replaces it.
    pub fn record(&mut self, result: &AnalysisResult, now: DateTime<Local>) -> CautionState {
        self.runs += 1;

        if result.has_conflicts() {
            self.last_conflict_count = result.conflict_messages.len();
            self.resolution = None;
            return CautionState::Conflicts(result.conflict_messages.clone());
        }

        if self.last_conflict_count > 0 {
            let message = format!(
                "Previous warnings were resolved ({}).",
                now.format(RESOLVED_AT_FORMAT)
            );
            tracing::info!(previous = self.last_conflict_count, "conflicts resolved");
            self.last_conflict_count = 0;
            self.resolution = Some(Resolution {
                at: now,
                message: message.clone(),
            });
            return CautionState::Resolved(message);
        }

        match &self.resolution {
            Some(resolution) => CautionState::Resolved(resolution.message.clone()),
            None => CautionState::Clear,
        }
    }

    /// [`record`](Self::record) stamped with the current local time.
    pub fn record_now(&mut self, result: &AnalysisResult) -> CautionState {
        self.record(result, Local::now())
    }

    pub fn last_conflict_count(&self) -> usize {
        self.last_conflict_count
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// Number of runs recorded so far.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn with_conflicts(messages: &[&str]) -> AnalysisResult {
        AnalysisResult {
            conflict_messages: messages.iter().map(|m| m.to_string()).collect(),
            ..AnalysisResult::default()
        }
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, hour, 15, 9).unwrap()
    }

    #[test]
    fn test_clean_session_stays_clear() {
        let mut session = AnalyzerSession::new();
        assert_eq!(session.record(&AnalysisResult::default(), at(9)), CautionState::Clear);
        assert_eq!(session.record(&AnalysisResult::default(), at(10)), CautionState::Clear);
        assert_eq!(session.runs(), 2);
    }

    #[test]
    fn test_conflicts_then_resolution() {
        let mut session = AnalyzerSession::new();
        let state = session.record(&with_conflicts(&["m1", "m2"]), at(9));
        assert_eq!(state, CautionState::Conflicts(vec!["m1".into(), "m2".into()]));
        assert_eq!(session.last_conflict_count(), 2);

        let state = session.record(&AnalysisResult::default(), at(10));
        assert_eq!(
            state,
            CautionState::Resolved("Previous warnings were resolved (2026-03-14 10:15:09).".into())
        );
        assert_eq!(session.last_conflict_count(), 0);
    }

    #[test]
    fn test_resolution_persists_until_new_conflict() {
        let mut session = AnalyzerSession::new();
        session.record(&with_conflicts(&["m"]), at(9));
        let resolved = session.record(&AnalysisResult::default(), at(10));
        assert_eq!(session.record(&AnalysisResult::default(), at(11)), resolved);
        assert_eq!(session.resolution().map(|r| r.at), Some(at(10)));

        session.record(&with_conflicts(&["again"]), at(12));
        assert!(session.resolution().is_none());
        let fresh = session.record(&AnalysisResult::default(), at(13));
        assert_eq!(
            fresh,
            CautionState::Resolved("Previous warnings were resolved (2026-03-14 13:15:09).".into())
        );
    }
}
