/*!
 * Tests for the run state machine and the status board
 */

use fusionn::workflow::{
    OperationKind, StatusBoard, StatusMessage, StatusScope, WorkflowRun, WorkflowSet, WorkflowStatus,
};

#[test]
fn test_workflowRun_new_shouldStartIdleWithoutTicket() {
    let run = WorkflowRun::new(OperationKind::Batch);
    assert_eq!(run.status(), WorkflowStatus::Idle);
    assert_eq!(run.latest_seq(), 0);
    assert_eq!(run.in_flight(), 0);
    assert!(!run.may_retry());
}

#[test]
fn test_workflowRun_start_shouldIssueIncreasingSequenceNumbers() {
    let mut run = WorkflowRun::new(OperationKind::Extract);
    let first = run.start();
    let second = run.start();
    let third = run.start();
    assert!(first.seq < second.seq && second.seq < third.seq);
    assert!(run.is_current(&third));
    assert!(!run.is_current(&first));
}

#[test]
fn test_workflowRun_restartAfterFailure_shouldClearErrorMessage() {
    let mut run = WorkflowRun::new(OperationKind::Merge);
    let ticket = run.start();
    run.complete(ticket, Err("disk full".to_string()), true);
    assert_eq!(run.error_message(), Some("disk full"));

    run.start();
    assert!(run.is_running());
    assert!(run.error_message().is_none());
}

#[test]
fn test_workflowRun_ticketFromOtherKind_shouldNotBeCurrent() {
    let mut extract = WorkflowRun::new(OperationKind::Extract);
    let mut batch = WorkflowRun::new(OperationKind::Batch);
    let ticket = batch.start();
    extract.start();
    assert!(!extract.is_current(&ticket));
}

#[test]
fn test_workflowSet_shouldHoldOneRunPerKind() {
    let set = WorkflowSet::new();
    let kinds: Vec<OperationKind> = set.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, OperationKind::ALL.to_vec());
}

#[test]
fn test_terminalStatuses() {
    assert!(WorkflowStatus::Succeeded.is_terminal());
    assert!(WorkflowStatus::Failed.is_terminal());
    assert!(!WorkflowStatus::Running.is_terminal());
    assert!(!WorkflowStatus::Idle.is_terminal());
}

#[test]
fn test_statusBoard_publish_shouldOverwriteLatestRegardlessOfKind() {
    let mut board = StatusBoard::new();
    board.publish(OperationKind::Extract, StatusMessage::success("Process completed successfully"));
    board.publish(OperationKind::Merge, StatusMessage::error("disk full"));

    assert_eq!(board.latest(), Some(&StatusMessage::error("disk full")));
    assert!(board.latest().unwrap().is_error());
    assert_eq!(
        board.banner(StatusScope::PerKind, OperationKind::Extract),
        Some(&StatusMessage::success("Process completed successfully"))
    );
}

#[test]
fn test_statusBoard_beginSubmit_shouldClearOwnEntry() {
    let mut board = StatusBoard::new();
    board.publish(OperationKind::Batch, StatusMessage::error("Folder path is required"));
    board.begin_submit(OperationKind::Batch);
    assert!(board.for_kind(OperationKind::Batch).is_none());
    assert!(board.latest().is_none());
}
