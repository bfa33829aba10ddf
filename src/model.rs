use crate::leave::LeaveRequest;
use crate::timesheet::TimesheetEntry;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre de l'équipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Fenêtre horaire par défaut du profil, pré-remplie dans les formulaires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_end_time: Option<NaiveTime>,
}

impl Member {
    pub fn new<U: Into<String>, E: Into<String>>(username: U, email: E) -> Self {
        Self {
            id: MemberId::random(),
            username: username.into(),
            email: email.into(),
            is_admin: false,
            default_start_time: None,
            default_end_time: None,
        }
    }
}

/// Identifiant fort pour les enregistrements du planner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Créneau de disponibilité (une journée, une fenêtre horaire)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: EntryId,
    pub member: MemberId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub recurring: bool,
}

impl AvailabilitySlot {
    /// Crée un créneau en validant que `end_time > start_time`.
    pub fn new(
        member: MemberId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, String> {
        if end_time <= start_time {
            return Err("end_time must be strictly after start_time".to_string());
        }
        Ok(Self {
            id: EntryId::random(),
            member,
            date,
            start_time,
            end_time,
            recurring: false,
        })
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Créneau occupé (réunion, rendez-vous, …)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusySlot {
    pub id: EntryId,
    pub member: MemberId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl BusySlot {
    pub fn new(
        member: MemberId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, String> {
        if end_time <= start_time {
            return Err("end_time must be strictly after start_time".to_string());
        }
        Ok(Self {
            id: EntryId::random(),
            member,
            date,
            start_time,
            end_time,
            title: "Busy".to_string(),
            description: String::new(),
        })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Journée de congé posée au calendrier (toute la journée)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDay {
    pub id: EntryId,
    pub member: MemberId,
    pub date: NaiveDate,
    pub leave_type: String,
    #[serde(default)]
    pub notes: String,
}

impl LeaveDay {
    pub fn new<T: Into<String>>(member: MemberId, date: NaiveDate, leave_type: T) -> Self {
        Self {
            id: EntryId::random(),
            member,
            date,
            leave_type: leave_type.into(),
            notes: String::new(),
        }
    }
}

/// État complet du tableau de bord
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Planner {
    pub members: Vec<Member>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub busy: Vec<BusySlot>,
    #[serde(default)]
    pub leave: Vec<LeaveDay>,
    #[serde(default)]
    pub requests: Vec<LeaveRequest>,
    #[serde(default)]
    pub timesheet: Vec<TimesheetEntry>,
}

impl Planner {
    pub fn find_member_by_username<'a>(&'a self, username: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.username == username)
    }
    pub fn find_member_by_id<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
    pub fn find_member_mut_by_id(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| &m.id == id)
    }
    pub fn find_request_mut(&mut self, id: &EntryId) -> Option<&mut LeaveRequest> {
        self.requests.iter_mut().find(|r| &r.id == id)
    }
}
