mod clock;
mod recur;
mod types;
mod util;
mod weeks;

pub use clock::{format_hhmm, from_12_hour, parse_12_hour, to_12_hour, Meridiem};
pub use recur::{scheduled_days, scheduled_days_bounded, DayIter, ScheduledDay};
pub use types::{PlanError, PlanLimits, WeekdaySet, MAX_SPAN_DAYS};
pub use weeks::{group_by_week, WeekBucket};

pub(crate) use util::week_start;

use chrono::{NaiveDate, NaiveTime};

/// Résumé chiffré d'une récurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleSummary {
    pub total_days: usize,
    pub hours_per_day: f64,
    pub total_hours: f64,
}

impl ScheduleSummary {
    /// Total arrondi à une décimale pour l'affichage ; la valeur brute
    /// reste dans `total_hours` pour les envois au backend.
    pub fn total_hours_display(&self) -> f64 {
        (self.total_hours * 10.0).round() / 10.0
    }
}

/// Calcule le résumé d'une séquence de jours et d'une fenêtre horaire.
///
/// La fenêtre doit finir strictement après son début ; une fenêtre à
/// cheval sur minuit est rejetée, jamais interprétée.
pub fn summary<I>(
    days: I,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<ScheduleSummary, PlanError>
where
    I: IntoIterator<Item = ScheduledDay>,
{
    let start_minutes = util::minutes_from_midnight(start_time);
    let end_minutes = util::minutes_from_midnight(end_time);
    if end_minutes <= start_minutes {
        return Err(PlanError::InvalidTimeWindow);
    }
    let hours_per_day = (end_minutes - start_minutes) as f64 / 60.0;
    let total_days = days.into_iter().count();
    Ok(ScheduleSummary {
        total_days,
        hours_per_day,
        total_hours: hours_per_day * total_days as f64,
    })
}

/// Saisie complète d'une récurrence hebdomadaire : plage de dates,
/// fenêtre horaire quotidienne, jours de semaine cochés.
#[derive(Debug, Clone, Copy)]
pub struct Recurrence {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub weekdays: WeekdaySet,
}

/// Plan matérialisé : jours concrets, résumé, semaines d'aperçu.
#[derive(Debug, Clone)]
pub struct RecurrencePlan {
    pub days: Vec<ScheduledDay>,
    pub summary: ScheduleSummary,
    pub weeks: Vec<WeekBucket>,
}

impl RecurrencePlan {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|day| day.date)
    }
}

impl Recurrence {
    pub fn plan(&self) -> Result<RecurrencePlan, PlanError> {
        self.plan_with(PlanLimits::default())
    }

    /// Valide la saisie puis matérialise le plan. Toute erreur est levée
    /// ici, avant qu'un envoi au backend ne soit tenté.
    pub fn plan_with(&self, limits: PlanLimits) -> Result<RecurrencePlan, PlanError> {
        if self.weekdays.is_empty() {
            return Err(PlanError::EmptySelection);
        }
        let days: Vec<ScheduledDay> =
            scheduled_days_bounded(self.start, self.end, self.weekdays, limits)?.collect();
        let summary = summary(days.iter().copied(), self.start_time, self.end_time)?;
        let weeks = group_by_week(days.iter().copied());
        Ok(RecurrencePlan {
            days,
            summary,
            weeks,
        })
    }
}
