use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum WheelKind {
    #[default]
    #[strum(serialize = "week", serialize = "w", serialize = "7")]
    Week,
    #[strum(serialize = "month", serialize = "m")]
    Month,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Date window around {0} is outside the supported calendar range")]
    OutOfRange(NaiveDate),
}

/// The seven days of the week containing `anchor`, starting on `week_start`.
pub fn week_window(anchor: NaiveDate, week_start: Weekday) -> Result<Vec<NaiveDate>, CalendarError> {
    let back = (anchor.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    let first = anchor
        .checked_sub_days(Days::new(back as u64))
        .ok_or(CalendarError::OutOfRange(anchor))?;

    let days: Vec<_> = first.iter_days().take(7).collect();
    if days.len() < 7 {
        return Err(CalendarError::OutOfRange(anchor));
    }
    Ok(days)
}

pub fn month_window(anchor: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
    let first = anchor
        .with_day(1)
        .ok_or(CalendarError::OutOfRange(anchor))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == anchor.month())
        .collect())
}

pub fn window(
    kind: WheelKind,
    anchor: NaiveDate,
    week_start: Weekday,
) -> Result<Vec<NaiveDate>, CalendarError> {
    match kind {
        WheelKind::Week => week_window(anchor, week_start),
        WheelKind::Month => month_window(anchor),
    }
}

/// Moves `anchor` by whole weeks or months. Month shifts clamp to the last day of the target
/// month.
pub fn shift(kind: WheelKind, anchor: NaiveDate, steps: i32) -> Result<NaiveDate, CalendarError> {
    let n = steps.unsigned_abs();
    let shifted = match (kind, steps >= 0) {
        (WheelKind::Week, true) => anchor.checked_add_days(Days::new(7 * n as u64)),
        (WheelKind::Week, false) => anchor.checked_sub_days(Days::new(7 * n as u64)),
        (WheelKind::Month, true) => anchor.checked_add_months(Months::new(n)),
        (WheelKind::Month, false) => anchor.checked_sub_months(Months::new(n)),
    };
    shifted.ok_or(CalendarError::OutOfRange(anchor))
}
