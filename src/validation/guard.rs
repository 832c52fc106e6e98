/*!
 * Submit guard.
 *
 * Decides whether a submit may start a remote request. Checks run in a fixed
 * order per kind and the first failure wins, so the user always sees one
 * message: required-field errors before shape errors, and for merges the
 * Chinese input before the English one.
 */

use log::warn;

use crate::errors::ValidationError;
use crate::workflow::OperationInputs;

use super::paths::{is_folder_path, is_subtitle_path, is_video_path};

/// Knobs that change how strict the guard is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    /// When false, a folder path with a dotted last segment only logs a
    /// warning and the submit proceeds; the service decides.
    pub strict_folder_check: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self { strict_folder_check: true }
    }
}

/// Run the guard for one submit
pub fn check(inputs: &OperationInputs, policy: &GuardPolicy) -> Result<(), ValidationError> {
    match inputs {
        OperationInputs::Extract { file_path } => {
            if file_path.is_empty() {
                return Err(ValidationError::MissingVideoPath);
            }
            if !is_video_path(file_path) {
                return Err(ValidationError::InvalidVideoPath);
            }
        }
        OperationInputs::Merge { chs_subtitle_path, eng_subtitle_path } => {
            if chs_subtitle_path.is_empty() || eng_subtitle_path.is_empty() {
                return Err(ValidationError::MissingSubtitlePaths);
            }
            if !is_subtitle_path(chs_subtitle_path) {
                return Err(ValidationError::InvalidChsSubtitle);
            }
            if !is_subtitle_path(eng_subtitle_path) {
                return Err(ValidationError::InvalidEngSubtitle);
            }
        }
        OperationInputs::Batch { path } => {
            if path.is_empty() {
                return Err(ValidationError::MissingFolderPath);
            }
            if !is_folder_path(path) {
                if policy.strict_folder_check {
                    return Err(ValidationError::InvalidFolderPath);
                }
                warn!("Folder path '{}' looks like a file, submitting anyway", path);
            }
        }
    }

    Ok(())
}
