/*!
 * Workflow model: operation kinds, their inputs, lifecycle and status.
 *
 * - `kind`: `OperationKind`, `InputSlot` and `OperationInputs`
 * - `state`: the per-kind state machine (`WorkflowRun`, `WorkflowSet`)
 * - `status`: user-facing status messages (`StatusBoard`)
 */

pub mod kind;
pub mod state;
pub mod status;

pub use kind::{InputSlot, OperationInputs, OperationKind};
pub use state::{Ticket, WorkflowRun, WorkflowSet, WorkflowStatus};
pub use status::{StatusBoard, StatusKind, StatusMessage, StatusScope};
