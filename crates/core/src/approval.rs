//! Approval vote values, overall status codes and group approval modes.
//!
//! A member's vote is stored as a nullable small integer. The file-level
//! student approval is stored as a separate code. Both are decoded here so
//! the DB and API layers never compare raw integers.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Member, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Stored vote value for a member who rejected the file.
pub const VOTE_REJECTED: i16 = 0;

/// Stored vote value for a member who approved the file.
pub const VOTE_APPROVED: i16 = 1;

/// Overall student approval code for a rejected file.
pub const STATUS_CODE_REJECTED: i16 = 1;

/// Overall student approval code for an approved file.
pub const STATUS_CODE_APPROVED: i16 = 2;

/// Stored `group_approval` value: every member has to approve.
pub const GROUP_APPROVAL_ALL: i16 = 0;

/// Stored `group_approval` value: one approving member is enough.
pub const GROUP_APPROVAL_SINGLE: i16 = 1;

/* --------------------------------------------------------------------------
Votes
-------------------------------------------------------------------------- */

/// One member's approval vote on a submitted file.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalVote {
    pub member: Member,
    /// `None` = pending, `0` = rejected, `1` = approved.
    pub approval: Option<i16>,
    pub approved_at: Option<Timestamp>,
}

/// The bucket a vote falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteBucket {
    Approved,
    Rejected,
    Pending,
}

impl VoteBucket {
    /// Classify a stored vote value. Values outside `{None, 0, 1}` are a
    /// data integrity violation.
    pub fn classify(record_id: DbId, member_id: DbId, value: Option<i16>) -> Result<Self, CoreError> {
        match value {
            None => Ok(VoteBucket::Pending),
            Some(VOTE_REJECTED) => Ok(VoteBucket::Rejected),
            Some(VOTE_APPROVED) => Ok(VoteBucket::Approved),
            Some(other) => Err(CoreError::DataIntegrity(format!(
                "Approval vote of member {member_id} on submission {record_id} has value {other}, \
                 expected null, {VOTE_REJECTED} or {VOTE_APPROVED}"
            ))),
        }
    }
}

/// How the aggregator treats votes with out-of-range values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VotePolicy {
    /// Fail the whole summary with [`CoreError::DataIntegrity`].
    #[default]
    Strict,
    /// Log the vote at warn level and leave it out of every bucket.
    Lenient,
}

impl VotePolicy {
    /// Parse a policy name as used in configuration (`strict` / `lenient`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(VotePolicy::Strict),
            "lenient" => Ok(VotePolicy::Lenient),
            other => Err(CoreError::Validation(format!(
                "Invalid vote policy '{other}'. Must be one of: strict, lenient"
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Overall status
-------------------------------------------------------------------------- */

/// Overall approval verdict for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Approved,
    Rejected,
    Pending,
}

impl OverallStatus {
    /// Map a stored student approval code: `2` approved, `1` rejected,
    /// anything else (including null) pending.
    pub fn from_code(code: Option<i16>) -> Self {
        match code {
            Some(STATUS_CODE_APPROVED) => OverallStatus::Approved,
            Some(STATUS_CODE_REJECTED) => OverallStatus::Rejected,
            _ => OverallStatus::Pending,
        }
    }

    /// The flag triple sent to the tooltip widget. Exactly one flag is set.
    pub fn flags(self) -> StatusFlags {
        StatusFlags {
            approved: self == OverallStatus::Approved,
            rejected: self == OverallStatus::Rejected,
            pending: self == OverallStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OverallStatus::Approved => "Approved",
            OverallStatus::Rejected => "Rejected",
            OverallStatus::Pending => "Pending",
        }
    }
}

/// Boolean view of an [`OverallStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusFlags {
    pub approved: bool,
    pub rejected: bool,
    pub pending: bool,
}

/* --------------------------------------------------------------------------
Group approval mode
-------------------------------------------------------------------------- */

/// How member votes combine into a file verdict in group mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupApprovalMode {
    All,
    Single,
}

impl GroupApprovalMode {
    pub fn from_code(code: i16) -> Result<Self, CoreError> {
        match code {
            GROUP_APPROVAL_ALL => Ok(GroupApprovalMode::All),
            GROUP_APPROVAL_SINGLE => Ok(GroupApprovalMode::Single),
            other => Err(CoreError::DataIntegrity(format!(
                "Unknown group approval mode {other}"
            ))),
        }
    }

    /// Label handed to the approval status widget.
    pub fn label(self) -> &'static str {
        match self {
            GroupApprovalMode::All => "All group members have to approve",
            GroupApprovalMode::Single => "At least one group member has to approve",
        }
    }

    /// Derive the verdict from bucket counts.
    ///
    /// A group without counted votes is always pending.
    pub fn derive(self, approved: usize, rejected: usize, total: usize) -> OverallStatus {
        if total == 0 {
            return OverallStatus::Pending;
        }
        match self {
            GroupApprovalMode::All if rejected > 0 => OverallStatus::Rejected,
            GroupApprovalMode::All if approved == total => OverallStatus::Approved,
            GroupApprovalMode::Single if approved > 0 => OverallStatus::Approved,
            GroupApprovalMode::Single if rejected == total => OverallStatus::Rejected,
            _ => OverallStatus::Pending,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
