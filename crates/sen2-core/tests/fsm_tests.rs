// Rust guideline compliant 2026-10-15

//! Unit tests for the status transition allow-lists.

use sen2_core::{allow_list, is_allowed, Status, TransitionTarget};

const RERUN: TransitionTarget = TransitionTarget::Status(Status::Created);
const ABORT: TransitionTarget = TransitionTarget::Status(Status::Aborted);

#[test]
fn test_rerun_from_terminal_states() {
    for status in [Status::Aborted, Status::Failed, Status::Succeeded] {
        assert!(
            is_allowed(status, RERUN),
            "Should allow {:?} → CREATED",
            status
        );
    }
}

#[test]
fn test_rerun_rejected_while_active() {
    for status in [
        Status::Created,
        Status::Scheduled,
        Status::Started,
        Status::Offline,
        Status::Unknown,
    ] {
        assert!(
            !is_allowed(status, RERUN),
            "Should reject {:?} → CREATED",
            status
        );
    }
}

#[test]
fn test_abort_only_before_completion() {
    for status in [Status::Created, Status::Scheduled, Status::Started] {
        assert!(is_allowed(status, ABORT));
    }
    for status in [
        Status::Aborted,
        Status::Failed,
        Status::Succeeded,
        Status::Offline,
        Status::Unknown,
    ] {
        assert!(!is_allowed(status, ABORT));
    }
}

#[test]
fn test_delete_terminal_or_not_started() {
    for status in [
        Status::Created,
        Status::Aborted,
        Status::Failed,
        Status::Succeeded,
    ] {
        assert!(status.can_transition_to(TransitionTarget::Delete));
    }
    for status in [Status::Scheduled, Status::Started, Status::Offline] {
        assert!(!status.can_transition_to(TransitionTarget::Delete));
    }
}

#[test]
fn test_ungoverned_targets_fail_closed() {
    for target in [
        Status::Succeeded,
        Status::Failed,
        Status::Scheduled,
        Status::Started,
        Status::Offline,
        Status::Unknown,
    ] {
        let target = TransitionTarget::Status(target);
        assert!(allow_list(target).is_none());
        for current in Status::KNOWN {
            assert!(!is_allowed(current, target));
        }
    }
}

#[test]
fn test_target_display() {
    assert_eq!(RERUN.to_string(), "CREATED");
    assert_eq!(TransitionTarget::Delete.to_string(), "DELETE");
}
