use crate::model::{MemberId, Planner};
use crate::schedule::PlanError;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Synthèse d'activité sur une plage de dates, bornes incluses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analytics {
    pub total_availability_hours: f64,
    pub total_busy_hours: f64,
    pub total_leave_days: usize,
    /// Dates distinctes portant au moins une entrée.
    pub total_scheduled_days: usize,
    /// Part des jours de la plage couverts par une disponibilité, en %.
    pub availability_rate: f64,
}

pub fn range_analytics(
    planner: &Planner,
    start: NaiveDate,
    end: NaiveDate,
    member: Option<&MemberId>,
) -> Result<Analytics, PlanError> {
    if start > end {
        return Err(PlanError::InvalidRange);
    }
    let in_range = |date: NaiveDate| date >= start && date <= end;
    let keep = |id: &MemberId| member.map(|wanted| wanted == id).unwrap_or(true);

    let mut availability_minutes = 0i64;
    let mut busy_minutes = 0i64;
    let mut leave_days = 0usize;
    let mut scheduled_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut available_dates: BTreeSet<NaiveDate> = BTreeSet::new();

    for slot in &planner.availability {
        if keep(&slot.member) && in_range(slot.date) {
            availability_minutes += slot.duration_minutes();
            scheduled_dates.insert(slot.date);
            available_dates.insert(slot.date);
        }
    }
    for slot in &planner.busy {
        if keep(&slot.member) && in_range(slot.date) {
            busy_minutes += slot.duration_minutes();
            scheduled_dates.insert(slot.date);
        }
    }
    for day in &planner.leave {
        if keep(&day.member) && in_range(day.date) {
            leave_days += 1;
            scheduled_dates.insert(day.date);
        }
    }

    let range_days = end.signed_duration_since(start).num_days() + 1;
    let rate = available_dates.len() as f64 / range_days as f64 * 100.0;

    Ok(Analytics {
        total_availability_hours: round1(availability_minutes as f64 / 60.0),
        total_busy_hours: round1(busy_minutes as f64 / 60.0),
        total_leave_days: leave_days,
        total_scheduled_days: scheduled_dates.len(),
        availability_rate: round1(rate),
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
