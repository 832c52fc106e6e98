/*!
 * Operation kinds and their path inputs.
 */

use serde::{Deserialize, Serialize};

use crate::messages::MessageKey;
use crate::validation::PathRule;

/// One of the three workflows the service offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Extract subtitles from a single video
    Extract,
    /// Merge a Chinese and an English subtitle file
    Merge,
    /// Process every video in a directory
    Batch,
}

impl OperationKind {
    /// All kinds, in tab order
    pub const ALL: [OperationKind; 3] = [Self::Extract, Self::Merge, Self::Batch];

    /// Stable index used for per-kind storage
    pub fn index(&self) -> usize {
        match self {
            Self::Extract => 0,
            Self::Merge => 1,
            Self::Batch => 2,
        }
    }

    /// Service route for this kind
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Extract => "/api/v1/merge",
            Self::Merge => "/api/v1/async_merge",
            Self::Batch => "/api/v1/batch",
        }
    }

    /// Input slots this kind requires, in display order
    pub fn slots(&self) -> &'static [InputSlot] {
        match self {
            Self::Extract => &[InputSlot::VideoPath],
            Self::Merge => &[InputSlot::ChsSubtitle, InputSlot::EngSubtitle],
            Self::Batch => &[InputSlot::FolderPath],
        }
    }

    /// Status text for a successful run
    pub fn success_text(&self) -> &'static str {
        match self {
            Self::Extract => "Process completed successfully",
            Self::Merge => "Merge completed successfully",
            Self::Batch => "Batch process completed successfully",
        }
    }

    /// Status text when the service fails without an `error` field
    pub fn failure_text(&self) -> &'static str {
        match self {
            Self::Extract => "Failed to process video",
            Self::Merge => "Failed to merge subtitles",
            Self::Batch => "Failed to process folder",
        }
    }

    pub fn tab_label(&self) -> MessageKey {
        match self {
            Self::Extract => MessageKey::TabExtract,
            Self::Merge => MessageKey::TabMerge,
            Self::Batch => MessageKey::TabBatch,
        }
    }

    /// Label for the submit button, idle and busy variants
    pub fn button_labels(&self) -> (MessageKey, MessageKey) {
        match self {
            Self::Extract => (MessageKey::ButtonProcess, MessageKey::ButtonProcessing),
            Self::Merge => (MessageKey::ButtonMerge, MessageKey::ButtonMerging),
            Self::Batch => (MessageKey::ButtonProcessFolder, MessageKey::ButtonProcessing),
        }
    }

    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Extract => "extract".to_string(),
            Self::Merge => "merge".to_string(),
            Self::Batch => "batch".to_string(),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "extract" => Ok(Self::Extract),
            "merge" => Ok(Self::Merge),
            "batch" => Ok(Self::Batch),
            _ => Err(anyhow::anyhow!("Invalid operation kind: {}", s)),
        }
    }
}

/// A named path slot belonging to one operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSlot {
    VideoPath,
    ChsSubtitle,
    EngSubtitle,
    FolderPath,
}

impl InputSlot {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::VideoPath => OperationKind::Extract,
            Self::ChsSubtitle | Self::EngSubtitle => OperationKind::Merge,
            Self::FolderPath => OperationKind::Batch,
        }
    }

    pub fn rule(&self) -> PathRule {
        match self {
            Self::VideoPath => PathRule::Video,
            Self::ChsSubtitle | Self::EngSubtitle => PathRule::Subtitle,
            Self::FolderPath => PathRule::Folder,
        }
    }

    /// Catalog keys for the label and placeholder of this slot
    pub fn labels(&self) -> (MessageKey, MessageKey) {
        match self {
            Self::VideoPath => (MessageKey::InputVideoPath, MessageKey::PlaceholderVideoPath),
            Self::ChsSubtitle => (MessageKey::InputChsSubtitle, MessageKey::PlaceholderChsSubtitle),
            Self::EngSubtitle => (MessageKey::InputEngSubtitle, MessageKey::PlaceholderEngSubtitle),
            Self::FolderPath => (MessageKey::InputFolderPath, MessageKey::PlaceholderFolderPath),
        }
    }
}

/// Raw path strings for one submit, shaped by operation kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationInputs {
    Extract {
        file_path: String,
    },
    Merge {
        chs_subtitle_path: String,
        eng_subtitle_path: String,
    },
    Batch {
        path: String,
    },
}

impl OperationInputs {
    pub fn extract(file_path: impl Into<String>) -> Self {
        Self::Extract { file_path: file_path.into() }
    }

    pub fn merge(chs_subtitle_path: impl Into<String>, eng_subtitle_path: impl Into<String>) -> Self {
        Self::Merge {
            chs_subtitle_path: chs_subtitle_path.into(),
            eng_subtitle_path: eng_subtitle_path.into(),
        }
    }

    pub fn batch(path: impl Into<String>) -> Self {
        Self::Batch { path: path.into() }
    }

    /// Empty inputs for a kind, as a freshly opened tab holds them
    pub fn empty(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Extract => Self::extract(""),
            OperationKind::Merge => Self::merge("", ""),
            OperationKind::Batch => Self::batch(""),
        }
    }

    /// Build inputs from positional values in slot order.
    ///
    /// Missing values are treated as empty strings so the guard can report them.
    pub fn from_values(kind: OperationKind, values: &[String]) -> Self {
        let value = |i: usize| values.get(i).cloned().unwrap_or_default();
        match kind {
            OperationKind::Extract => Self::extract(value(0)),
            OperationKind::Merge => Self::merge(value(0), value(1)),
            OperationKind::Batch => Self::batch(value(0)),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Extract { .. } => OperationKind::Extract,
            Self::Merge { .. } => OperationKind::Merge,
            Self::Batch { .. } => OperationKind::Batch,
        }
    }

    /// Slot and value pairs in display order
    pub fn fields(&self) -> Vec<(InputSlot, &str)> {
        match self {
            Self::Extract { file_path } => vec![(InputSlot::VideoPath, file_path.as_str())],
            Self::Merge { chs_subtitle_path, eng_subtitle_path } => vec![
                (InputSlot::ChsSubtitle, chs_subtitle_path.as_str()),
                (InputSlot::EngSubtitle, eng_subtitle_path.as_str()),
            ],
            Self::Batch { path } => vec![(InputSlot::FolderPath, path.as_str())],
        }
    }
}
