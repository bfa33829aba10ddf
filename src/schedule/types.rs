use chrono::Weekday;
use thiserror::Error;

/// Borne défensive sur la longueur d'une plage de dates (~5 ans).
pub const MAX_SPAN_DAYS: i64 = 1827;

/// Limites appliquées lors de la génération d'un plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanLimits {
    pub max_span_days: i64,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_span_days: MAX_SPAN_DAYS,
        }
    }
}

/// Ensemble de jours de semaine, indexés dimanche = 0 … samedi = 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaySet([bool; 7]);

impl WeekdaySet {
    pub const ALL: WeekdaySet = WeekdaySet([true; 7]);

    pub fn empty() -> Self {
        Self::default()
    }

    /// Construit l'ensemble depuis des indices 0..=6 (dimanche = 0).
    pub fn from_indices(indices: &[u8]) -> Result<Self, PlanError> {
        let mut days = [false; 7];
        for &index in indices {
            if index > 6 {
                return Err(PlanError::InvalidInput("weekday index must be within 0..=6"));
            }
            days[usize::from(index)] = true;
        }
        Ok(Self(days))
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0[day.num_days_from_sunday() as usize] = true;
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_sunday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|selected| *selected)
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|selected| **selected).count()
    }

    /// Indices sélectionnés, en ordre croissant.
    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(|(index, _)| index as u8)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid time input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid date range: start must be on or before end")]
    InvalidRange,
    #[error("date range too long: {days} days (max {max})")]
    RangeTooLong { days: i64, max: i64 },
    #[error("invalid time window: end must be strictly after start")]
    InvalidTimeWindow,
    #[error("no weekday selected")]
    EmptySelection,
}
