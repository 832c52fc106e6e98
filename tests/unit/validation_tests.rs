/*!
 * Tests for path predicates and the submit guard
 */

use fusionn::errors::ValidationError;
use fusionn::validation::paths::VIDEO_EXTENSIONS;
use fusionn::validation::{GuardPolicy, PathRule, check, is_folder_path, is_subtitle_path, is_video_path};
use fusionn::workflow::{InputSlot, OperationInputs, OperationKind};

const SAMPLES: &[&str] = &[
    "",
    ".",
    "/",
    "movie.mp4",
    "MOVIE.MP4",
    "movie.Mkv",
    "/media/a b/clip.webm",
    "clip.webm ",
    "clip.mp4.txt",
    "mp4",
    "/media/shows",
    "/media/shows/",
    "/media.d/shows",
    "/media/v1.2",
    "C:\\Media\\movie.avi",
    "C:\\Media\\Shows",
    "ep1.chs.srt",
    "EP1.ENG.SRT",
    "ep1.srt.bak",
    "srt",
    "字幕.srt",
    "视频.MOV",
];

/// Test the video predicate against its definition for a spread of inputs
#[test]
fn test_isVideoPath_withSamples_shouldMatchLowercaseSuffixDefinition() {
    for sample in SAMPLES {
        let expected = VIDEO_EXTENSIONS.iter().any(|ext| sample.to_lowercase().ends_with(ext));
        assert_eq!(is_video_path(sample), expected, "sample: {:?}", sample);
    }
}

#[test]
fn test_isSubtitlePath_withSamples_shouldMatchLowercaseSuffixDefinition() {
    for sample in SAMPLES {
        let expected = sample.to_lowercase().ends_with(".srt");
        assert_eq!(is_subtitle_path(sample), expected, "sample: {:?}", sample);
    }
}

#[test]
fn test_isFolderPath_withSamples_shouldOnlyInspectLastSegment() {
    for sample in SAMPLES {
        let last = sample.split('/').last().unwrap_or("");
        assert_eq!(is_folder_path(sample), !last.contains('.'), "sample: {:?}", sample);
    }
}

/// Backslashes are not separators; a Windows directory with a dot anywhere is rejected
#[test]
fn test_isFolderPath_withWindowsPath_shouldTreatWholeStringAsOneSegment() {
    assert!(is_folder_path("C:\\Media\\Shows"));
    assert!(!is_folder_path("C:\\Media.old\\Shows"));
}

#[test]
fn test_displayValid_withEmptyInput_shouldNotFlagButGuardShouldBlock() {
    for kind in OperationKind::ALL {
        for slot in kind.slots() {
            assert!(slot.rule().display_valid(""));
        }
        let result = check(&OperationInputs::empty(kind), &GuardPolicy::default());
        assert!(result.unwrap_err().is_missing_input());
    }
}

#[test]
fn test_slotRules_shouldMatchOperation() {
    assert_eq!(InputSlot::VideoPath.rule(), PathRule::Video);
    assert_eq!(InputSlot::ChsSubtitle.rule(), PathRule::Subtitle);
    assert_eq!(InputSlot::EngSubtitle.rule(), PathRule::Subtitle);
    assert_eq!(InputSlot::FolderPath.rule(), PathRule::Folder);
}

#[test]
fn test_guard_withExtractTxt_shouldListSevenExtensions() {
    let err = check(&OperationInputs::extract("movie.txt"), &GuardPolicy::default()).unwrap_err();
    assert_eq!(err, ValidationError::InvalidVideoPath);

    let text = err.to_string();
    for ext in VIDEO_EXTENSIONS {
        assert!(text.contains(ext), "missing {} in {}", ext, text);
    }
    assert_eq!(text.matches(", ").count(), 6);
}

#[test]
fn test_guard_withMergeOneEmpty_shouldRequireBoth() {
    for inputs in [
        OperationInputs::merge("", "b.srt"),
        OperationInputs::merge("a.srt", ""),
        OperationInputs::merge("", ""),
    ] {
        assert_eq!(
            check(&inputs, &GuardPolicy::default()),
            Err(ValidationError::MissingSubtitlePaths)
        );
    }
}

#[test]
fn test_guard_withValidInputs_shouldPass() {
    let policy = GuardPolicy::default();
    assert!(check(&OperationInputs::extract("/m/Movie.WEBM"), &policy).is_ok());
    assert!(check(&OperationInputs::merge("a.SRT", "b.srt"), &policy).is_ok());
    assert!(check(&OperationInputs::batch("/media/season 1"), &policy).is_ok());
}
