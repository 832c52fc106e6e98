/*!
 * Per-kind lifecycle state machine.
 *
 * ```text
 * Idle|Succeeded|Failed --submit, guard ok-->   Running
 * Idle|Succeeded|Failed --submit, guard fails--> Idle
 * Running --success--> Succeeded
 * Running --failure--> Failed
 * ```
 *
 * Every start takes a ticket carrying a per-kind sequence number. A run can
 * be restarted while a request is still in flight; the older request is not
 * cancelled. Whether its late completion is applied is decided by the caller
 * through `discard_stale`.
 */

use serde::{Deserialize, Serialize};

use super::kind::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl WorkflowStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Proof that a run was started, handed back on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: OperationKind,
    pub seq: u64,
}

/// Lifecycle of one operation kind for the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    kind: OperationKind,
    status: WorkflowStatus,
    error_message: Option<String>,
    // highest sequence number handed out
    issued: u64,
    in_flight: usize,
}

impl WorkflowRun {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            status: WorkflowStatus::Idle,
            error_message: None,
            issued: 0,
            in_flight: 0,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.status == WorkflowStatus::Running
    }

    /// A failed run can be resubmitted explicitly; nothing retries on its own
    pub fn may_retry(&self) -> bool {
        self.status == WorkflowStatus::Failed
    }

    /// Sequence number of the most recent start, 0 before the first
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Requests dispatched for this kind that have not completed yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.kind == self.kind && ticket.seq == self.issued
    }

    /// Guard passed: enter `Running` and issue a new ticket
    pub fn start(&mut self) -> Ticket {
        self.issued += 1;
        self.in_flight += 1;
        self.status = WorkflowStatus::Running;
        self.error_message = None;
        Ticket { kind: self.kind, seq: self.issued }
    }

    /// Guard failed. A run with a request in flight keeps running.
    pub fn reject(&mut self) {
        if self.status != WorkflowStatus::Running {
            self.status = WorkflowStatus::Idle;
            self.error_message = None;
        }
    }

    /// Apply a dispatcher result.
    ///
    /// Returns false when the result was dropped because a newer ticket
    /// exists for this kind and `discard_stale` is set.
    pub fn complete(&mut self, ticket: Ticket, result: Result<(), String>, discard_stale: bool) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if discard_stale && !self.is_current(&ticket) {
            return false;
        }

        match result {
            Ok(()) => {
                self.status = WorkflowStatus::Succeeded;
                self.error_message = None;
            }
            Err(message) => {
                self.status = WorkflowStatus::Failed;
                self.error_message = Some(message);
            }
        }
        true
    }
}

/// The three runs of a session, one per kind, never coupled
#[derive(Debug, Clone)]
pub struct WorkflowSet {
    runs: [WorkflowRun; 3],
}

impl WorkflowSet {
    pub fn new() -> Self {
        Self {
            runs: OperationKind::ALL.map(WorkflowRun::new),
        }
    }

    pub fn get(&self, kind: OperationKind) -> &WorkflowRun {
        &self.runs[kind.index()]
    }

    pub fn get_mut(&mut self, kind: OperationKind) -> &mut WorkflowRun {
        &mut self.runs[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowRun> {
        self.runs.iter()
    }
}

impl Default for WorkflowSet {
    fn default() -> Self {
        Self::new()
    }
}
