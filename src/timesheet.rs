use crate::model::{EntryId, MemberId, Planner};
use crate::schedule::week_start;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("already clocked in since {0}")]
    AlreadyClockedIn(DateTime<Utc>),
    #[error("no open timesheet entry")]
    NotClockedIn,
    #[error("unknown member: {0}")]
    UnknownMember(String),
}

/// Pointage d'une journée de travail (instants UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub id: EntryId,
    pub member: MemberId,
    pub date: NaiveDate,
    pub clock_in: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl TimesheetEntry {
    pub fn is_active(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Durée travaillée en minutes, pauses déduites (plancher à zéro).
    ///
    /// Pour une entrée encore ouverte, `now` sert de borne de fin.
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.clock_out.unwrap_or(now);
        let worked = (end - self.clock_in).num_minutes() - i64::from(self.break_minutes);
        worked.max(0)
    }
}

/// Ouvre un pointage ; une seule entrée ouverte par membre.
pub fn clock_in(
    planner: &mut Planner,
    member: &MemberId,
    now: DateTime<Utc>,
    location: Option<String>,
    task: Option<String>,
) -> Result<EntryId, ClockError> {
    if planner.find_member_by_id(member).is_none() {
        return Err(ClockError::UnknownMember(member.as_str().to_string()));
    }
    if let Some(open) = planner
        .timesheet
        .iter()
        .find(|entry| &entry.member == member && entry.is_active())
    {
        return Err(ClockError::AlreadyClockedIn(open.clock_in));
    }
    let entry = TimesheetEntry {
        id: EntryId::random(),
        member: member.clone(),
        date: now.date_naive(),
        clock_in: now,
        clock_out: None,
        break_minutes: 0,
        location,
        task,
        notes: String::new(),
    };
    let id = entry.id.clone();
    planner.timesheet.push(entry);
    Ok(id)
}

/// Ferme le pointage ouvert et retourne la durée travaillée en minutes.
pub fn clock_out(
    planner: &mut Planner,
    member: &MemberId,
    now: DateTime<Utc>,
    break_minutes: u32,
    notes: Option<String>,
) -> Result<i64, ClockError> {
    let Some(entry) = planner
        .timesheet
        .iter_mut()
        .find(|entry| &entry.member == member && entry.is_active())
    else {
        return Err(ClockError::NotClockedIn);
    };
    entry.clock_out = Some(now);
    entry.break_minutes = break_minutes;
    if let Some(notes) = notes {
        entry.notes = notes;
    }
    Ok(entry.duration_minutes(now))
}

/// Minutes travaillées aujourd'hui et sur la semaine en cours
/// (semaine alignée sur le dimanche, comme l'aperçu des récurrences).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkTotals {
    pub today_minutes: i64,
    pub week_minutes: i64,
}

pub fn work_totals(entries: &[TimesheetEntry], member: &MemberId, now: DateTime<Utc>) -> WorkTotals {
    let today = now.date_naive();
    let week = week_start(today);
    let mut totals = WorkTotals::default();
    for entry in entries.iter().filter(|entry| &entry.member == member) {
        let minutes = entry.duration_minutes(now);
        if entry.date == today {
            totals.today_minutes += minutes;
        }
        if entry.date >= week && entry.date <= today {
            totals.week_minutes += minutes;
        }
    }
    totals
}

/// « 7h 30m », comme le compteur du tableau de bord.
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Heures à une décimale pour l'affichage des totaux.
pub fn hours_display(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}
