// Rust guideline compliant 2026-10-14

//! Status transition rules for inference mutations.
//!
//! Only three targets are governed:
//!
//! - CREATED (rerun) ← ABORTED, FAILED, SUCCEEDED
//! - ABORTED (abort) ← CREATED, SCHEDULED, STARTED
//! - DELETE ← CREATED, ABORTED, FAILED, SUCCEEDED
//!
//! Every other target has no allow-list and rejects every transition.

use crate::Status;
use std::fmt;

/// What a mutation wants to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionTarget {
    /// Write a new status.
    Status(Status),
    /// Remove the record.
    Delete,
}

impl fmt::Display for TransitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionTarget::Status(status) => write!(f, "{}", status),
            TransitionTarget::Delete => f.write_str("DELETE"),
        }
    }
}

impl From<Status> for TransitionTarget {
    fn from(status: Status) -> Self {
        TransitionTarget::Status(status)
    }
}

const RERUN_FROM: &[Status] = &[Status::Aborted, Status::Failed, Status::Succeeded];
const ABORT_FROM: &[Status] = &[Status::Created, Status::Scheduled, Status::Started];
const DELETE_FROM: &[Status] = &[
    Status::Created,
    Status::Aborted,
    Status::Failed,
    Status::Succeeded,
];

/// Returns the statuses a record may be in for `target` to be applied.
///
/// `None` means the target is not governed at all, which callers must treat
/// as a configuration error rather than a per-record rejection.
#[must_use]
pub fn allow_list(target: TransitionTarget) -> Option<&'static [Status]> {
    match target {
        TransitionTarget::Status(Status::Created) => Some(RERUN_FROM),
        TransitionTarget::Status(Status::Aborted) => Some(ABORT_FROM),
        TransitionTarget::Delete => Some(DELETE_FROM),
        TransitionTarget::Status(_) => None,
    }
}

/// Checks whether a record in `current` may move to `target`.
#[must_use]
pub fn is_allowed(current: Status, target: TransitionTarget) -> bool {
    allow_list(target).is_some_and(|allowed| allowed.contains(&current))
}

impl Status {
    /// Checks whether this status may move to `target`.
    #[must_use]
    pub fn can_transition_to(&self, target: TransitionTarget) -> bool {
        is_allowed(*self, target)
    }
}
