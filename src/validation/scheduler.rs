use std::time::Duration;

use tokio::time::Instant;

use crate::graph::GraphSignature;

/// Default quiet period between the last structural edit and the validation
/// request it triggers.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Observable phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Idle,
    Pending,
    InFlight,
}

/// Debounces structural changes into at most one validation request per quiet
/// period.
///
/// The scheduler is a plain state machine driven by explicit instants: the
/// async driver sleeps until [`deadline`](Self::deadline) and then calls
/// [`take_due`](Self::take_due). One instance exists per open flow; the
/// deadline is an owned field, re-armed (superseded) on every effective
/// mutation, never process-wide state.
///
/// In-flight requests are never cancelled. A response that arrives after a
/// newer edit is still applied by the caller, but `last_validated` only
/// advances when the signature captured at request-issue time still matches
/// the live graph (see [`complete`](Self::complete)); otherwise the no-op
/// guard in [`note_mutation`](Self::note_mutation) would short-circuit the
/// follow-up validation the newer edit still needs.
#[derive(Debug)]
pub struct ValidationScheduler {
    quiet_period: Duration,
    deadline: Option<Instant>,
    in_flight: usize,
    last_validated: Option<GraphSignature>,
}

impl Default for ValidationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl ValidationScheduler {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
            in_flight: 0,
            last_validated: None,
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        if self.in_flight > 0 {
            SchedulerPhase::InFlight
        } else if self.deadline.is_some() {
            SchedulerPhase::Pending
        } else {
            SchedulerPhase::Idle
        }
    }

    pub fn last_validated(&self) -> Option<&GraphSignature> {
        self.last_validated.as_ref()
    }

    /// Deadline of the pending quiet period, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Records a graph mutation.
    ///
    /// A signature equal to the last validated one is ignored; this is what
    /// keeps applying a validation result (which mutates auto connections and
    /// port metadata, but never the user-authored structure) from triggering
    /// the next round. Any other signature re-arms the quiet period,
    /// superseding a previously armed deadline.
    pub fn note_mutation(&mut self, signature: GraphSignature, now: Instant) {
        if self.last_validated.as_ref() == Some(&signature) {
            return;
        }
        self.deadline = Some(now + self.quiet_period);
    }

    /// Claims the pending validation if its quiet period has elapsed.
    ///
    /// `current` is the live graph signature at fire time — the request
    /// carries the full current graph, so that is the signature the round is
    /// issued for. If the graph has meanwhile drifted back to the last
    /// validated state the armed deadline is discarded instead of issued. On
    /// claim the scheduler moves to InFlight and returns the issued
    /// signature, which the caller must hand back to
    /// [`complete`](Self::complete).
    pub fn take_due(&mut self, now: Instant, current: &GraphSignature) -> Option<GraphSignature> {
        let due = self.deadline.is_some_and(|deadline| deadline <= now);
        if !due {
            return None;
        }
        self.deadline = None;
        if self.last_validated.as_ref() == Some(current) {
            return None;
        }
        self.in_flight += 1;
        Some(current.clone())
    }

    /// Settles one request.
    ///
    /// `issued` is the signature captured when the request was sent and
    /// `current` the live signature now that the response landed. The
    /// compare-and-set advances `last_validated` only when the request
    /// succeeded and the graph has not changed underneath it; a stale
    /// response is still merged by the caller but must not mask the
    /// follow-up validation the newer state needs. Failures never advance
    /// `last_validated`, leaving the last known validation state in place.
    pub fn complete(&mut self, issued: &GraphSignature, current: &GraphSignature, success: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if success && issued == current {
            self.last_validated = Some(issued.clone());
        }
    }
}
