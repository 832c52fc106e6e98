use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::app_config::{Config, WorkflowConfig};
use crate::dispatcher::{DispatchOutcome, RequestDispatcher};
use crate::errors::{AppError, ValidationError};
use crate::service::{HttpService, ProcessingService};
use crate::validation::{self, GuardPolicy};
use crate::workflow::{
    InputSlot, OperationInputs, OperationKind, StatusBoard, StatusMessage, Ticket, WorkflowRun,
    WorkflowSet, WorkflowStatus,
};

// @module: Session controller for the three operations

/// Everything a submit can mutate
#[derive(Debug, Default)]
struct SessionState {
    runs: WorkflowSet,
    status: StatusBoard,
}

/// How a submit ended, from the caller's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guard failed; no request was issued
    Rejected(ValidationError),
    /// Request finished and its result was applied
    Completed {
        status: WorkflowStatus,
        message: StatusMessage,
    },
    /// Request finished after a newer submit of the same kind; result dropped
    Superseded { seq: u64 },
}

impl SubmitOutcome {
    /// Status text produced by this submit, if it produced one
    pub fn status_message(&self) -> Option<StatusMessage> {
        match self {
            Self::Rejected(e) => Some(StatusMessage::error(e.to_string())),
            Self::Completed { message, .. } => Some(message.clone()),
            Self::Superseded { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { status: WorkflowStatus::Succeeded, .. })
    }
}

/// Render state of one input slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub slot: InputSlot,
    pub value: String,
    /// False only for a non-empty value that fails its predicate
    pub display_valid: bool,
}

/// What the presentation needs to draw one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindView {
    pub kind: OperationKind,
    pub fields: Vec<FieldView>,
    pub running: bool,
    /// Requests of this kind still waiting on the service
    pub in_flight: usize,
    /// Guard passes and nothing is in flight
    pub can_submit: bool,
    pub may_retry: bool,
    /// Banner for this tab under the configured status scope
    pub status: Option<StatusMessage>,
}

/// Main controller: owns the session state and runs submits against the service.
///
/// Cloning is cheap and every clone shares the same session.
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: Submit and status behaviour
    settings: WorkflowConfig,
    dispatcher: RequestDispatcher,
    state: Arc<Mutex<SessionState>>,
}

impl Controller {
    /// Create a controller that talks to `service`
    pub fn new(settings: WorkflowConfig, service: Arc<dyn ProcessingService>) -> Self {
        Self {
            settings,
            dispatcher: RequestDispatcher::new(service),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    // @method: Create a controller with an HTTP client built from the configuration
    pub fn with_config(config: &Config) -> Result<Self, AppError> {
        let service = HttpService::from_config(&config.service)?;
        Ok(Self::new(config.workflow.clone(), Arc::new(service)))
    }

    pub fn settings(&self) -> &WorkflowConfig {
        &self.settings
    }

    pub fn service(&self) -> &Arc<dyn ProcessingService> {
        self.dispatcher.service()
    }

    fn guard_policy(&self) -> GuardPolicy {
        self.settings.guard_policy()
    }

    /// Submit one operation and wait for it to finish.
    ///
    /// The session lock is only held while state changes, never across the
    /// request, so other kinds (and resubmits of this kind) proceed meanwhile.
    pub async fn submit(&self, inputs: OperationInputs) -> SubmitOutcome {
        match self.begin(&inputs) {
            Ok(ticket) => self.finish(ticket, &inputs).await,
            Err(e) => SubmitOutcome::Rejected(e),
        }
    }

    /// Guard `inputs` and, if they pass, move the run to `Running`.
    ///
    /// Synchronous so that a caller checking `is_running` right afterwards
    /// sees the new run.
    pub fn begin(&self, inputs: &OperationInputs) -> Result<Ticket, ValidationError> {
        let kind = inputs.kind();
        let mut state = self.state.lock();

        if let Err(e) = validation::check(inputs, &self.guard_policy()) {
            debug!("{} submit blocked: {}", kind, e);
            state.runs.get_mut(kind).reject();
            state.status.publish(kind, StatusMessage::error(e.to_string()));
            return Err(e);
        }

        state.status.begin_submit(kind);
        let ticket = state.runs.get_mut(kind).start();
        debug!("{} run #{} started", kind, ticket.seq);
        Ok(ticket)
    }

    /// Issue the request for a run started by `begin` and apply its result
    pub async fn finish(&self, ticket: Ticket, inputs: &OperationInputs) -> SubmitOutcome {
        let kind = ticket.kind;
        let outcome = self.dispatcher.dispatch(inputs).await;

        let mut state = self.state.lock();
        let applied = state.runs.get_mut(kind)
            .complete(ticket, outcome.as_run_result(), self.settings.discard_stale_results);

        if !applied {
            debug!("{} run #{} superseded by #{}, result dropped",
                   kind, ticket.seq, state.runs.get(kind).latest_seq());
            return SubmitOutcome::Superseded { seq: ticket.seq };
        }

        let message = outcome.status_message();
        state.status.publish(kind, message.clone());
        SubmitOutcome::Completed {
            status: terminal_status(&outcome),
            message,
        }
    }

    /// Start a submit and run its request as a background task.
    ///
    /// The guard and the move to `Running` happen before this returns; only
    /// the request itself runs in the task.
    pub fn spawn_submit(&self, inputs: OperationInputs) -> JoinHandle<SubmitOutcome> {
        let started = self.begin(&inputs);
        let controller = self.clone();
        tokio::spawn(async move {
            match started {
                Ok(ticket) => controller.finish(ticket, &inputs).await,
                Err(e) => SubmitOutcome::Rejected(e),
            }
        })
    }

    /// Snapshot of the run for `kind`
    pub fn run(&self, kind: OperationKind) -> WorkflowRun {
        self.state.lock().runs.get(kind).clone()
    }

    pub fn is_running(&self, kind: OperationKind) -> bool {
        self.state.lock().runs.get(kind).is_running()
    }

    /// The session-wide slot: last completed event of any kind
    pub fn latest_status(&self) -> Option<StatusMessage> {
        self.state.lock().status.latest().cloned()
    }

    pub fn status_for(&self, kind: OperationKind) -> Option<StatusMessage> {
        self.state.lock().status.for_kind(kind).cloned()
    }

    /// Banner for the tab `active` under the configured scope
    pub fn banner(&self, active: OperationKind) -> Option<StatusMessage> {
        self.state.lock().status.banner(self.settings.status_scope, active).cloned()
    }

    /// Render state for the tab holding `inputs`
    pub fn view(&self, inputs: &OperationInputs) -> KindView {
        let kind = inputs.kind();
        let fields = inputs.fields().into_iter()
            .map(|(slot, value)| FieldView {
                slot,
                value: value.to_string(),
                display_valid: slot.rule().display_valid(value),
            })
            .collect();
        let guard_ok = validation::check(inputs, &self.guard_policy()).is_ok();

        let state = self.state.lock();
        let run = state.runs.get(kind);
        KindView {
            kind,
            fields,
            running: run.is_running(),
            in_flight: run.in_flight(),
            can_submit: guard_ok && !run.is_running(),
            may_retry: run.may_retry(),
            status: state.status.banner(self.settings.status_scope, kind).cloned(),
        }
    }
}

fn terminal_status(outcome: &DispatchOutcome) -> WorkflowStatus {
    if outcome.is_success() {
        WorkflowStatus::Succeeded
    } else {
        WorkflowStatus::Failed
    }
}
