use super::recur::ScheduledDay;
use super::util;
use chrono::{Duration, NaiveDate};

/// Semaine d'aperçu alignée sur le dimanche ; `days[0]` = dimanche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: [Option<NaiveDate>; 7],
}

impl WeekBucket {
    fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            week_end: week_start + Duration::days(6),
            days: [None; 7],
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.days.iter().flatten().count()
    }

    /// Dates planifiées de la semaine, dans l'ordre des jours.
    pub fn scheduled_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().flatten().copied()
    }
}

/// Regroupe une séquence chronologique de jours en semaines d'aperçu.
///
/// Un nouveau seau démarre dès que le dimanche englobant change ; les
/// semaines sans aucun jour planifié ne sont pas émises.
pub fn group_by_week<I>(days: I) -> Vec<WeekBucket>
where
    I: IntoIterator<Item = ScheduledDay>,
{
    let mut buckets: Vec<WeekBucket> = Vec::new();
    for day in days {
        let week_start = util::week_start(day.date);
        if buckets.last().map(|bucket| bucket.week_start) != Some(week_start) {
            buckets.push(WeekBucket::new(week_start));
        }
        if let Some(bucket) = buckets.last_mut() {
            bucket.days[day.weekday.num_days_from_sunday() as usize] = Some(day.date);
        }
    }
    buckets
}
