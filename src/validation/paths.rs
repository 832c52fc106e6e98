/*!
 * Syntactic path predicates.
 */

/// Video container suffixes accepted for extraction
pub const VIDEO_EXTENSIONS: [&str; 7] = [".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm"];

/// Suffix accepted for subtitle inputs
pub const SUBTITLE_EXTENSION: &str = ".srt";

/// True when the lowercased path ends with one of `VIDEO_EXTENSIONS`
pub fn is_video_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// True when the lowercased path ends with `.srt`
pub fn is_subtitle_path(path: &str) -> bool {
    path.to_lowercase().ends_with(SUBTITLE_EXTENSION)
}

/// True when the segment after the last `/` has no `.` in it.
///
/// A directory whose name contains a dot ("v1.2") is rejected; the check
/// only looks at shape.
pub fn is_folder_path(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    !last_segment.contains('.')
}

/// Which predicate applies to an input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRule {
    Video,
    Subtitle,
    Folder,
}

impl PathRule {
    /// Run the predicate for this rule
    pub fn accepts(&self, path: &str) -> bool {
        match self {
            Self::Video => is_video_path(path),
            Self::Subtitle => is_subtitle_path(path),
            Self::Folder => is_folder_path(path),
        }
    }

    /// Display validity: an empty input is not flagged.
    ///
    /// This differs from submit eligibility, where an empty input blocks
    /// the submit with its own required-field message.
    pub fn display_valid(&self, path: &str) -> bool {
        path.is_empty() || self.accepts(path)
    }
}
