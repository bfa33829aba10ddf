#![forbid(unsafe_code)]
//! Présence — bibliothèque de gestion des présences d'équipe locale (sans BD).
//!
//! - Récurrences hebdomadaires de disponibilité (aperçu, résumé, envoi groupé).
//! - Congés avec workflow d'approbation ; pointage des heures.
//! - Stockage fichiers (JSON/CSV).
//! - Dates et heures en calendaire naïf, instants de pointage en UTC ;
//!   affichage local en dehors de la lib.

pub mod analytics;
pub mod events;
pub mod io;
pub mod leave;
pub mod model;
pub mod notification;
pub mod schedule;
pub mod storage;
pub mod timesheet;

pub use analytics::{range_analytics, Analytics};
pub use events::{collect_events, CalendarEvent, EventKind};
pub use io::{import_members_csv, ApiResponse, AvailabilityBatch};
pub use leave::{counts_by_status, LeaveCounts, LeaveError, LeaveRequest, LeaveStatus};
pub use model::{
    AvailabilitySlot, BusySlot, EntryId, LeaveDay, Member, MemberId, Planner,
};
pub use notification::{prepare_decision_notice, Notice, NoticeRenderer, TextNotice};
pub use schedule::{
    from_12_hour, group_by_week, parse_12_hour, scheduled_days, summary, Meridiem, PlanError,
    PlanLimits, Recurrence, RecurrencePlan, ScheduleSummary, ScheduledDay, WeekBucket, WeekdaySet,
};
pub use storage::{JsonStorage, Storage};
pub use timesheet::{clock_in, clock_out, work_totals, ClockError, TimesheetEntry, WorkTotals};
