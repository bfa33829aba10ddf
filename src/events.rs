use crate::model::{MemberId, Planner};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Couleurs du widget calendrier du tableau de bord.
const AVAILABILITY_COLOR: &str = "#28a745";
const BUSY_COLOR: &str = "#dc3545";
const LEAVE_COLOR: &str = "#ffc107";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Availability,
    Busy,
    Leave,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Busy => "busy",
            Self::Leave => "leave",
        }
    }
}

/// Événement aplati au format attendu par le widget calendrier :
/// id préfixé par le type, horodatages `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub color: &'static str,
    #[serde(rename = "allDay")]
    pub all_day: bool,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

fn stamp(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}T{}", date, time.format("%H:%M:%S"))
}

/// Aplati le planner en flux d'événements, filtré sur un membre ou tous,
/// trié par début croissant.
pub fn collect_events(planner: &Planner, member: Option<&MemberId>) -> Vec<CalendarEvent> {
    let username = |id: &MemberId| {
        planner
            .find_member_by_id(id)
            .map(|m| m.username.clone())
            .unwrap_or_else(|| "?".to_string())
    };
    let keep = |id: &MemberId| member.map(|wanted| wanted == id).unwrap_or(true);

    let mut events = Vec::new();

    for slot in planner.availability.iter().filter(|s| keep(&s.member)) {
        events.push(CalendarEvent {
            id: format!("avail-{}", slot.id.as_str()),
            title: format!("{} - Available", username(&slot.member)),
            start: stamp(slot.date, slot.start_time),
            end: Some(stamp(slot.date, slot.end_time)),
            color: AVAILABILITY_COLOR,
            all_day: false,
            user_id: slot.member.as_str().to_string(),
            kind: EventKind::Availability,
        });
    }

    for slot in planner.busy.iter().filter(|s| keep(&s.member)) {
        events.push(CalendarEvent {
            id: format!("busy-{}", slot.id.as_str()),
            title: format!("{} - {}", username(&slot.member), slot.title),
            start: stamp(slot.date, slot.start_time),
            end: Some(stamp(slot.date, slot.end_time)),
            color: BUSY_COLOR,
            all_day: false,
            user_id: slot.member.as_str().to_string(),
            kind: EventKind::Busy,
        });
    }

    for day in planner.leave.iter().filter(|l| keep(&l.member)) {
        events.push(CalendarEvent {
            id: format!("leave-{}", day.id.as_str()),
            title: format!("{} - {}", username(&day.member), day.leave_type),
            start: day.date.to_string(),
            end: None,
            color: LEAVE_COLOR,
            all_day: true,
            user_id: day.member.as_str().to_string(),
            kind: EventKind::Leave,
        });
    }

    // l'ordre lexicographique des horodatages ISO est chronologique
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    events
}
