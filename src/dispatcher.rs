/*!
 * Request dispatch.
 *
 * Turns a started run into exactly one request to the processing service
 * and maps whatever comes back onto a terminal outcome:
 *
 * | Reply | Outcome | Status text |
 * |---|---|---|
 * | 2xx, `message == "success"` | Succeeded | per-kind success text |
 * | parsed, anything else | Failed | `error` field, else per-kind failure text |
 * | transport failure or non-JSON body | Failed | "Failed to connect to the service" |
 *
 * Transport details are logged and never shown to the user. There is no
 * retry and no idempotency key; a duplicate submit is a duplicate request.
 */

use log::{debug, error, info};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::errors::{DispatchError, ServiceError, TransportError};
use crate::service::{ProcessingService, ServiceReply};
use crate::workflow::{OperationInputs, OperationKind, StatusMessage};

/// Status text for any transport failure
pub const CONNECTION_FAILURE_TEXT: &str = "Failed to connect to the service";

/// Terminal result of one dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
        cause: DispatchError,
    },
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// User-facing text
    pub fn message(&self) -> &str {
        match self {
            Self::Succeeded { message } | Self::Failed { message, .. } => message,
        }
    }

    pub fn status_message(&self) -> StatusMessage {
        match self {
            Self::Succeeded { message } => StatusMessage::success(message.clone()),
            Self::Failed { message, .. } => StatusMessage::error(message.clone()),
        }
    }

    /// Shape expected by `WorkflowRun::complete`
    pub fn as_run_result(&self) -> Result<(), String> {
        match self {
            Self::Succeeded { .. } => Ok(()),
            Self::Failed { message, .. } => Err(message.clone()),
        }
    }
}

/// JSON body sent for a submit
pub fn request_body(inputs: &OperationInputs) -> Value {
    match inputs {
        OperationInputs::Extract { file_path } => json!({ "file_path": file_path }),
        OperationInputs::Merge { chs_subtitle_path, eng_subtitle_path } => json!({
            "chs_subtitle_path": chs_subtitle_path,
            "eng_subtitle_path": eng_subtitle_path,
        }),
        OperationInputs::Batch { path } => json!({ "path": path }),
    }
}

/// Map a transport result onto an outcome for `kind`
pub fn interpret(kind: OperationKind, result: Result<ServiceReply, TransportError>) -> DispatchOutcome {
    match result {
        Ok(reply) if reply.is_success() => DispatchOutcome::Succeeded {
            message: kind.success_text().to_string(),
        },
        Ok(reply) => {
            let message = reply.error.clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| kind.failure_text().to_string());
            DispatchOutcome::Failed {
                message,
                cause: DispatchError::Service(ServiceError {
                    status_code: reply.status_code,
                    message: reply.error,
                }),
            }
        }
        Err(err) => DispatchOutcome::Failed {
            message: CONNECTION_FAILURE_TEXT.to_string(),
            cause: DispatchError::Transport(err),
        },
    }
}

/// Sends submits to a `ProcessingService`
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    service: Arc<dyn ProcessingService>,
}

impl RequestDispatcher {
    pub fn new(service: Arc<dyn ProcessingService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<dyn ProcessingService> {
        &self.service
    }

    /// Issue one request for `inputs` and wait for its outcome
    pub async fn dispatch(&self, inputs: &OperationInputs) -> DispatchOutcome {
        let kind = inputs.kind();
        let path = kind.endpoint_path();
        let body = request_body(inputs);

        debug!("Dispatching {} request to {}", kind, path);
        let result = self.service.post_json(path, &body).await;

        if let Err(e) = &result {
            error!("Error running {} request on {}: {}", kind, path, e);
        }

        let outcome = interpret(kind, result);
        match &outcome {
            DispatchOutcome::Succeeded { .. } => info!("{} request completed", kind),
            DispatchOutcome::Failed { cause: DispatchError::Service(e), .. } => {
                debug!("{} request rejected by service: {}", kind, e)
            }
            DispatchOutcome::Failed { .. } => {}
        }
        outcome
    }
}
