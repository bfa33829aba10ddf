use super::types::PlanError;
use chrono::{NaiveTime, Timelike};

/// Demi-journée d'une saisie en format 12 heures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn parse(raw: &str) -> Result<Self, PlanError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(PlanError::InvalidInput("meridiem must be AM or PM")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Convertit une saisie 12 heures en heure de journée.
///
/// 12 AM devient 00, une heure PM autre que 12 est décalée de +12,
/// tout le reste passe inchangé.
pub fn from_12_hour(hour12: u8, minute: u8, meridiem: Meridiem) -> Result<NaiveTime, PlanError> {
    if !(1..=12).contains(&hour12) {
        return Err(PlanError::InvalidInput("hour must be within 1..=12"));
    }
    if minute > 59 {
        return Err(PlanError::InvalidInput("minute must be within 0..=59"));
    }
    let hour24 = match (meridiem, hour12) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Pm, hour) if hour != 12 => hour + 12,
        (_, hour) => hour,
    };
    NaiveTime::from_hms_opt(u32::from(hour24), u32::from(minute), 0)
        .ok_or(PlanError::InvalidInput("time components out of range"))
}

/// Inverse exact de [`from_12_hour`].
pub fn to_12_hour(time: NaiveTime) -> (u8, u8, Meridiem) {
    let hour = time.hour();
    let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
    let hour12 = match hour % 12 {
        0 => 12,
        hour => hour,
    };
    (hour12 as u8, time.minute() as u8, meridiem)
}

/// Format « HH:MM » zéro-complété attendu par le backend.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Saisie « hh:mm AM » ou « hh:mm PM » du formulaire.
pub fn parse_12_hour(raw: &str) -> Result<NaiveTime, PlanError> {
    let (time_part, meridiem_part) = raw
        .trim()
        .split_once(' ')
        .ok_or(PlanError::InvalidInput("expected \"hh:mm AM\" or \"hh:mm PM\""))?;
    let meridiem = Meridiem::parse(meridiem_part)?;
    let (hour_part, minute_part) = time_part
        .split_once(':')
        .ok_or(PlanError::InvalidInput("expected hh:mm before the meridiem"))?;
    let hour12: u8 = hour_part
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput("hour must be a number"))?;
    let minute: u8 = minute_part
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput("minute must be a number"))?;
    from_12_hour(hour12, minute, meridiem)
}
