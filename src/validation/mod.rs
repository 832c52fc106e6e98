/*!
 * Path validation for submit requests.
 *
 * Paths are judged purely by their surface syntax. Nothing here touches the
 * filesystem: a path is acceptable when its suffix or last segment has the
 * right shape, whether or not the target exists.
 *
 * # Architecture
 *
 * - `paths`: pure predicates over a single path string
 * - `guard`: the per-operation submit check built on those predicates
 */

pub mod paths;
pub mod guard;

// Re-export main types
pub use paths::{PathRule, is_folder_path, is_subtitle_path, is_video_path};
pub use guard::{GuardPolicy, check};
