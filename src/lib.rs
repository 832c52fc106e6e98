/*!
 * # Fusionn - control surface for a subtitle processing service
 *
 * A Rust library and CLI that submits subtitle jobs to a remote Fusionn
 * service and reports their outcome.
 *
 * ## Features
 *
 * - Three operations, each with its own lifecycle:
 *   - Extract: pull subtitles out of a single video
 *   - Merge: combine a Chinese and an English `.srt` file
 *   - Batch: process every video in a directory
 * - Syntactic path validation before anything is sent
 * - Per-operation status, with stale results from superseded submits dropped
 * - Request timeouts, no automatic retries
 * - English and Chinese interface strings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `validation`: path predicates and the submit guard
 * - `workflow`: operation kinds, run state machine and status board
 * - `dispatcher`: request bodies and reply interpretation
 * - `service`: transport to the processing service (`service::http`)
 * - `app_controller`: session controller tying the above together
 * - `app_config`: configuration management
 * - `messages`: translated interface strings
 * - `errors`: custom error types for the application
 *
 * The service itself does all file work; this crate never opens the paths
 * it is given.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dispatcher;
pub mod errors;
pub mod messages;
pub mod service;
pub mod validation;
pub mod workflow;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, KindView, SubmitOutcome};
pub use dispatcher::{DispatchOutcome, RequestDispatcher};
pub use errors::{AppError, DispatchError, ServiceError, TransportError, ValidationError};
pub use service::{HttpService, ProcessingService, ServiceReply};
pub use workflow::{OperationInputs, OperationKind, StatusMessage, WorkflowStatus};
