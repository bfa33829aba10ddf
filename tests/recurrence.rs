#![forbid(unsafe_code)]
use chrono::NaiveDate;
use presence::schedule::{
    format_hhmm, from_12_hour, group_by_week, parse_12_hour, scheduled_days, summary,
    to_12_hour, Meridiem, PlanError, Recurrence, WeekdaySet,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn twelve_hour_conversion_edge_cases() {
    assert_eq!(format_hhmm(from_12_hour(12, 0, Meridiem::Am).unwrap()), "00:00");
    assert_eq!(format_hhmm(from_12_hour(12, 0, Meridiem::Pm).unwrap()), "12:00");
    assert_eq!(format_hhmm(from_12_hour(1, 0, Meridiem::Am).unwrap()), "01:00");
    assert_eq!(format_hhmm(from_12_hour(11, 30, Meridiem::Pm).unwrap()), "23:30");
    assert_eq!(format_hhmm(from_12_hour(12, 15, Meridiem::Am).unwrap()), "00:15");
    assert_eq!(format_hhmm(from_12_hour(12, 15, Meridiem::Pm).unwrap()), "12:15");
}

#[test]
fn twelve_hour_round_trip() {
    for hour12 in 1..=12u8 {
        for &meridiem in &[Meridiem::Am, Meridiem::Pm] {
            let time = from_12_hour(hour12, 30, meridiem).unwrap();
            assert_eq!(to_12_hour(time), (hour12, 30, meridiem));
        }
    }
}

#[test]
fn twelve_hour_rejects_bad_components() {
    assert!(matches!(
        from_12_hour(0, 0, Meridiem::Am),
        Err(PlanError::InvalidInput(_))
    ));
    assert!(matches!(
        from_12_hour(13, 0, Meridiem::Pm),
        Err(PlanError::InvalidInput(_))
    ));
    assert!(matches!(
        from_12_hour(5, 60, Meridiem::Am),
        Err(PlanError::InvalidInput(_))
    ));
    assert!(matches!(
        Meridiem::parse("XM"),
        Err(PlanError::InvalidInput(_))
    ));
}

#[test]
fn parse_form_input() {
    assert_eq!(format_hhmm(parse_12_hour("09:00 AM").unwrap()), "09:00");
    assert_eq!(format_hhmm(parse_12_hour("05:30 pm").unwrap()), "17:30");
    assert!(parse_12_hour("09:00").is_err());
}

#[test]
fn all_weekdays_covers_whole_range() {
    let days: Vec<_> = scheduled_days(date(2024, 2, 1), date(2024, 3, 1), WeekdaySet::ALL)
        .unwrap()
        .collect();
    // 2024 est bissextile
    assert_eq!(days.len(), 30);
    assert_eq!(days[0].date, date(2024, 2, 1));
    assert_eq!(days[29].date, date(2024, 3, 1));
}

#[test]
fn empty_weekday_set_yields_nothing() {
    let days: Vec<_> = scheduled_days(date(2024, 2, 1), date(2024, 3, 1), WeekdaySet::empty())
        .unwrap()
        .collect();
    assert!(days.is_empty());
}

#[test]
fn iterator_is_restartable() {
    let iter = scheduled_days(
        date(2024, 1, 1),
        date(2024, 1, 31),
        WeekdaySet::from_indices(&[2, 4]).unwrap(),
    )
    .unwrap();
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
}

#[test]
fn reversed_range_is_rejected() {
    let err = scheduled_days(date(2024, 1, 10), date(2024, 1, 1), WeekdaySet::ALL).unwrap_err();
    assert_eq!(err, PlanError::InvalidRange);
}

#[test]
fn oversized_range_is_rejected() {
    let err = scheduled_days(date(2020, 1, 1), date(2030, 1, 1), WeekdaySet::ALL).unwrap_err();
    assert!(matches!(err, PlanError::RangeTooLong { .. }));
}

#[test]
fn summary_requires_forward_window() {
    // fenêtre inversée : rejet explicite, pas d'interprétation minuit
    let start = from_12_hour(2, 0, Meridiem::Pm).unwrap();
    let end = from_12_hour(1, 0, Meridiem::Pm).unwrap();
    let err = summary(std::iter::empty(), start, end).unwrap_err();
    assert_eq!(err, PlanError::InvalidTimeWindow);

    let equal = summary(std::iter::empty(), start, start).unwrap_err();
    assert_eq!(equal, PlanError::InvalidTimeWindow);
}

#[test]
fn summary_is_idempotent() {
    let days: Vec<_> = scheduled_days(date(2024, 1, 1), date(2024, 1, 7), WeekdaySet::ALL)
        .unwrap()
        .collect();
    let start = from_12_hour(9, 0, Meridiem::Am).unwrap();
    let end = from_12_hour(5, 0, Meridiem::Pm).unwrap();
    let first = summary(days.iter().copied(), start, end).unwrap();
    let second = summary(days.iter().copied(), start, end).unwrap();
    assert_eq!(first, second);
}

#[test]
fn two_week_monday_wednesday_friday_plan() {
    // 2024-01-01 est un lundi, 2024-01-14 un dimanche
    let recurrence = Recurrence {
        start: date(2024, 1, 1),
        end: date(2024, 1, 14),
        start_time: from_12_hour(9, 0, Meridiem::Am).unwrap(),
        end_time: from_12_hour(5, 0, Meridiem::Pm).unwrap(),
        weekdays: WeekdaySet::from_indices(&[1, 3, 5]).unwrap(),
    };
    let plan = recurrence.plan().unwrap();

    assert_eq!(plan.summary.total_days, 6);
    assert_eq!(plan.summary.hours_per_day, 8.0);
    assert_eq!(plan.summary.total_hours, 48.0);
    assert_eq!(plan.summary.total_hours_display(), 48.0);

    let dates: Vec<NaiveDate> = plan.dates().collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 1, 1),
            date(2024, 1, 3),
            date(2024, 1, 5),
            date(2024, 1, 8),
            date(2024, 1, 10),
            date(2024, 1, 12),
        ]
    );

    assert_eq!(plan.weeks.len(), 2);
    // premier seau : semaine du dimanche 2023-12-31
    assert_eq!(plan.weeks[0].week_start, date(2023, 12, 31));
    assert_eq!(plan.weeks[0].week_end, date(2024, 1, 6));
    assert_eq!(plan.weeks[0].days[1], Some(date(2024, 1, 1)));
    assert_eq!(plan.weeks[0].days[3], Some(date(2024, 1, 3)));
    assert_eq!(plan.weeks[0].days[5], Some(date(2024, 1, 5)));
    assert_eq!(plan.weeks[0].days[0], None);
    assert_eq!(plan.weeks[0].scheduled_count(), 3);
    assert_eq!(plan.weeks[1].week_start, date(2024, 1, 7));
    assert_eq!(plan.weeks[1].days[1], Some(date(2024, 1, 8)));
}

#[test]
fn single_day_range_missing_weekday_is_empty() {
    // 2024-01-02 est un mardi ; seul le lundi est coché
    let recurrence = Recurrence {
        start: date(2024, 1, 2),
        end: date(2024, 1, 2),
        start_time: from_12_hour(9, 0, Meridiem::Am).unwrap(),
        end_time: from_12_hour(5, 0, Meridiem::Pm).unwrap(),
        weekdays: WeekdaySet::from_indices(&[1]).unwrap(),
    };
    let plan = recurrence.plan().unwrap();
    assert!(plan.days.is_empty());
    assert_eq!(plan.summary.total_days, 0);
    assert_eq!(plan.summary.total_hours, 0.0);
    assert!(plan.weeks.is_empty());
}

#[test]
fn plan_rejects_empty_selection() {
    let recurrence = Recurrence {
        start: date(2024, 1, 1),
        end: date(2024, 1, 14),
        start_time: from_12_hour(9, 0, Meridiem::Am).unwrap(),
        end_time: from_12_hour(5, 0, Meridiem::Pm).unwrap(),
        weekdays: WeekdaySet::empty(),
    };
    assert_eq!(recurrence.plan().unwrap_err(), PlanError::EmptySelection);
}

#[test]
fn buckets_follow_sunday_boundaries() {
    // du samedi au lundi : le dimanche ouvre un nouveau seau
    let days: Vec<_> = scheduled_days(date(2024, 1, 6), date(2024, 1, 8), WeekdaySet::ALL)
        .unwrap()
        .collect();
    let buckets = group_by_week(days);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].week_start, date(2023, 12, 31));
    assert_eq!(buckets[0].days[6], Some(date(2024, 1, 6)));
    assert_eq!(buckets[1].week_start, date(2024, 1, 7));
    assert_eq!(buckets[1].days[0], Some(date(2024, 1, 7)));
    assert_eq!(buckets[1].days[1], Some(date(2024, 1, 8)));
}

#[test]
fn scheduled_day_labels() {
    let days: Vec<_> = scheduled_days(
        date(2024, 1, 1),
        date(2024, 1, 2),
        WeekdaySet::ALL,
    )
    .unwrap()
    .collect();
    assert_eq!(days[0].label(), "Monday");
    assert_eq!(days[1].label(), "Tuesday");
}
