use super::types::{PlanError, PlanLimits, WeekdaySet};
use super::util;
use chrono::{Datelike, NaiveDate, Weekday};

/// Jour retenu par le filtre hebdomadaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

impl ScheduledDay {
    /// Libellé anglais complet du jour (« Monday », …), comme l'affichage
    /// du tableau de bord.
    pub fn label(&self) -> &'static str {
        util::weekday_label(self.weekday)
    }
}

/// Itérateur paresseux, fini et relançable (`Clone`) sur les jours retenus,
/// en ordre chronologique.
#[derive(Debug, Clone)]
pub struct DayIter {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
    weekdays: WeekdaySet,
}

impl Iterator for DayIter {
    type Item = ScheduledDay;

    fn next(&mut self) -> Option<ScheduledDay> {
        while let Some(date) = self.cursor {
            self.cursor = if date < self.end { date.succ_opt() } else { None };
            let weekday = date.weekday();
            if self.weekdays.contains(weekday) {
                return Some(ScheduledDay { date, weekday });
            }
        }
        None
    }
}

/// Tous les jours de `start..=end` dont le jour de semaine est coché.
///
/// Vide si aucun jour ne correspond ou si l'ensemble est vide.
pub fn scheduled_days(
    start: NaiveDate,
    end: NaiveDate,
    weekdays: WeekdaySet,
) -> Result<DayIter, PlanError> {
    scheduled_days_bounded(start, end, weekdays, PlanLimits::default())
}

pub fn scheduled_days_bounded(
    start: NaiveDate,
    end: NaiveDate,
    weekdays: WeekdaySet,
    limits: PlanLimits,
) -> Result<DayIter, PlanError> {
    if start > end {
        return Err(PlanError::InvalidRange);
    }
    let days = end.signed_duration_since(start).num_days() + 1;
    if days > limits.max_span_days {
        return Err(PlanError::RangeTooLong {
            days,
            max: limits.max_span_days,
        });
    }
    Ok(DayIter {
        cursor: Some(start),
        end,
        weekdays,
    })
}
