/*!
 * Status messages surfaced to the user.
 *
 * The board keeps two views of the same events. `latest` is the single
 * session-wide slot: cleared whenever any submit starts and overwritten by
 * whichever evaluation finished last. `for_kind` keeps one entry per
 * operation so a tab shows its own result even while another operation
 * completes.
 */

use serde::{Deserialize, Serialize};

use super::kind::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// One line of feedback for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub kind: StatusKind,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Which status view the banner renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusScope {
    /// Last completed event of any kind
    Shared,
    /// Only the active tab's own result
    #[default]
    PerKind,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    latest: Option<StatusMessage>,
    per_kind: [Option<StatusMessage>; 3],
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A submit of `kind` passed its guard and is about to be dispatched
    pub fn begin_submit(&mut self, kind: OperationKind) {
        self.latest = None;
        self.per_kind[kind.index()] = None;
    }

    pub fn publish(&mut self, kind: OperationKind, message: StatusMessage) {
        self.per_kind[kind.index()] = Some(message.clone());
        self.latest = Some(message);
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.latest.as_ref()
    }

    pub fn for_kind(&self, kind: OperationKind) -> Option<&StatusMessage> {
        self.per_kind[kind.index()].as_ref()
    }

    /// Message to show while `active` is the selected tab
    pub fn banner(&self, scope: StatusScope, active: OperationKind) -> Option<&StatusMessage> {
        match scope {
            StatusScope::Shared => self.latest(),
            StatusScope::PerKind => self.for_kind(active),
        }
    }
}
