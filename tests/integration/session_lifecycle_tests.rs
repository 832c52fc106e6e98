/*!
 * Submit lifecycle tests against an in-process service
 */

use serde_json::json;

use fusionn::app_config::WorkflowConfig;
use fusionn::errors::ValidationError;
use fusionn::workflow::{OperationInputs, OperationKind, StatusMessage, WorkflowStatus};
use fusionn::SubmitOutcome;

use crate::common::{MockReply, MockService, controller_with, controller_with_settings};

#[tokio::test]
async fn test_extract_withEmptyPath_shouldRejectWithoutRequest() {
    let service = MockService::new();
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::extract("")).await;

    assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingVideoPath));
    assert_eq!(service.call_count(), 0);
    assert_eq!(controller.latest_status(), Some(StatusMessage::error("No video file path provided")));
    assert_eq!(controller.run(OperationKind::Extract).status(), WorkflowStatus::Idle);
}

#[tokio::test]
async fn test_extract_withTxtFile_shouldRejectListingExtensions() {
    let service = MockService::new();
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::extract("movie.txt")).await;

    let message = outcome.status_message().unwrap();
    assert!(message.is_error());
    assert_eq!(message.message, "File must end with one of: .mp4, .mkv, .avi, .mov, .wmv, .flv, .webm");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_extract_withSuccessReply_shouldSucceed() {
    let service = MockService::new();
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::extract("/media/movie.mkv")).await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            status: WorkflowStatus::Succeeded,
            message: StatusMessage::success("Process completed successfully"),
        }
    );
    assert_eq!(service.calls(), vec![("/api/v1/merge".to_string(), json!({"file_path": "/media/movie.mkv"}))]);
    assert_eq!(controller.run(OperationKind::Extract).status(), WorkflowStatus::Succeeded);
}

#[tokio::test]
async fn test_merge_withErrorReply_shouldFailWithServiceText() {
    let service = MockService::new();
    service.reply("/api/v1/async_merge", MockReply::error(500, "disk full"));
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::merge("a.chs.srt", "a.eng.srt")).await;

    assert_eq!(outcome.status_message(), Some(StatusMessage::error("disk full")));
    let run = controller.run(OperationKind::Merge);
    assert_eq!(run.status(), WorkflowStatus::Failed);
    assert_eq!(run.error_message(), Some("disk full"));
    assert!(run.may_retry());
    assert_eq!(
        service.calls()[0].1,
        json!({"chs_subtitle_path": "a.chs.srt", "eng_subtitle_path": "a.eng.srt"})
    );
}

#[tokio::test]
async fn test_batch_withConnectionRefused_shouldFailWithGenericText() {
    let service = MockService::new();
    service.reply("/api/v1/batch", MockReply::refused());
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::batch("/media/shows")).await;

    assert_eq!(outcome.status_message(), Some(StatusMessage::error("Failed to connect to the service")));
    assert_eq!(controller.run(OperationKind::Batch).status(), WorkflowStatus::Failed);
    assert_eq!(service.calls()[0].1, json!({"path": "/media/shows"}));
}

#[tokio::test]
async fn test_batch_withNonSuccessMessage_shouldFallBackToGenericFailure() {
    let service = MockService::new();
    service.reply("/api/v1/batch", MockReply::Json { status: 200, body: json!({"message": "queued"}) });
    let controller = controller_with(&service);

    let outcome = controller.submit(OperationInputs::batch("/media/shows")).await;

    assert_eq!(outcome.status_message(), Some(StatusMessage::error("Failed to process folder")));
}

#[tokio::test]
async fn test_guardFailureAfterSuccess_shouldReturnRunToIdle() {
    let service = MockService::new();
    let controller = controller_with(&service);

    controller.submit(OperationInputs::batch("/media/shows")).await;
    assert_eq!(controller.run(OperationKind::Batch).status(), WorkflowStatus::Succeeded);

    let outcome = controller.submit(OperationInputs::batch("/media/v1.2")).await;
    assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidFolderPath));
    assert_eq!(controller.run(OperationKind::Batch).status(), WorkflowStatus::Idle);
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_advisoryFolderCheck_shouldSubmitDottedFolder() {
    let service = MockService::new();
    let settings = WorkflowConfig { strict_folder_check: false, ..WorkflowConfig::default() };
    let controller = controller_with_settings(&service, settings);

    let outcome = controller.submit(OperationInputs::batch("/media/v1.2")).await;

    assert!(outcome.is_success());
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_submitStart_shouldClearStatusAndMarkRunning() {
    let service = MockService::new();
    let controller = controller_with(&service);

    controller.submit(OperationInputs::extract("")).await;
    assert!(controller.latest_status().is_some());

    let gate = service.reply_gated("/api/v1/merge", MockReply::success());
    let handle = controller.spawn_submit(OperationInputs::extract("/media/movie.mp4"));
    service.wait_for_calls(1).await;

    assert!(controller.latest_status().is_none());
    assert!(controller.status_for(OperationKind::Extract).is_none());
    let view = controller.view(&OperationInputs::extract("/media/movie.mp4"));
    assert!(view.running);
    assert!(!view.can_submit);

    gate.notify_one();
    let outcome = handle.await.unwrap();
    assert!(outcome.is_success());
    assert!(!controller.is_running(OperationKind::Extract));
}

#[tokio::test]
async fn test_view_shouldSeparateDisplayValidityFromEligibility() {
    let service = MockService::new();
    let controller = controller_with(&service);

    let empty = controller.view(&OperationInputs::merge("", "b.txt"));
    assert!(empty.fields[0].display_valid);
    assert!(!empty.fields[1].display_valid);
    assert!(!empty.can_submit);

    let ready = controller.view(&OperationInputs::merge("a.srt", "b.srt"));
    assert!(ready.fields.iter().all(|f| f.display_valid));
    assert!(ready.can_submit);
    assert!(ready.status.is_none());
}

#[tokio::test]
async fn test_duplicateSubmit_shouldIssueTwoRequests() {
    let service = MockService::new();
    let controller = controller_with(&service);
    let inputs = OperationInputs::extract("/media/movie.avi");

    controller.submit(inputs.clone()).await;
    controller.submit(inputs).await;

    let calls = service.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}
