use crate::model::{EntryId, MemberId, Planner};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaveError {
    #[error("invalid leave period: end date must not be before start date")]
    InvalidPeriod,
    #[error("unknown leave request: {0}")]
    UnknownRequest(String),
    #[error("leave request already decided: {0}")]
    AlreadyDecided(String),
}

/// Statut d'une demande de congés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Demande de congés multi-jours, soumise à approbation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: EntryId,
    pub member: MemberId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: String,
    /// Moyen de contact pendant l'absence.
    #[serde(default)]
    pub contact: String,
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl LeaveRequest {
    pub fn new<T: Into<String>, R: Into<String>>(
        member: MemberId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: T,
        reason: R,
    ) -> Result<Self, LeaveError> {
        if end_date < start_date {
            return Err(LeaveError::InvalidPeriod);
        }
        Ok(Self {
            id: EntryId::random(),
            member,
            start_date,
            end_date,
            leave_type: leave_type.into(),
            reason: reason.into(),
            contact: String::new(),
            status: LeaveStatus::Pending,
            decided_at: None,
            comments: None,
        })
    }

    /// Nombre de jours couverts, bornes incluses.
    pub fn total_days(&self) -> i64 {
        self.end_date.signed_duration_since(self.start_date).num_days() + 1
    }
}

/// Approuve une demande en attente.
pub fn approve(
    planner: &mut Planner,
    id: &EntryId,
    now: DateTime<Utc>,
    comments: Option<String>,
) -> Result<(), LeaveError> {
    decide(planner, id, LeaveStatus::Approved, now, comments)
}

/// Refuse une demande en attente.
pub fn reject(
    planner: &mut Planner,
    id: &EntryId,
    now: DateTime<Utc>,
    comments: Option<String>,
) -> Result<(), LeaveError> {
    decide(planner, id, LeaveStatus::Rejected, now, comments)
}

fn decide(
    planner: &mut Planner,
    id: &EntryId,
    status: LeaveStatus,
    now: DateTime<Utc>,
    comments: Option<String>,
) -> Result<(), LeaveError> {
    let Some(request) = planner.find_request_mut(id) else {
        return Err(LeaveError::UnknownRequest(id.as_str().to_string()));
    };
    if request.status != LeaveStatus::Pending {
        return Err(LeaveError::AlreadyDecided(id.as_str().to_string()));
    }
    request.status = status;
    request.decided_at = Some(now);
    request.comments = comments;
    Ok(())
}

/// Compteurs pour les badges pending/approved/rejected du tableau de bord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn counts_by_status(requests: &[LeaveRequest]) -> LeaveCounts {
    let mut counts = LeaveCounts::default();
    for request in requests {
        match request.status {
            LeaveStatus::Pending => counts.pending += 1,
            LeaveStatus::Approved => counts.approved += 1,
            LeaveStatus::Rejected => counts.rejected += 1,
        }
    }
    counts
}
