//! Biweekly pay period resolution.
//!
//! A pay date resolves to one of the two biweekly halves of its month based
//! on the active payroll configuration's pay days. The resolved label is the
//! uniqueness key for payroll runs.

use chrono::{Datelike, NaiveDate};

use crate::config::PayrollConfiguration;
use crate::error::{EngineError, EngineResult};

/// Which half of the month a pay date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiweeklyHalf {
    /// The first pay window of the month.
    First,
    /// The second pay window of the month.
    Second,
}

impl BiweeklyHalf {
    fn title(&self) -> &'static str {
        match self {
            BiweeklyHalf::First => "First",
            BiweeklyHalf::Second => "Second",
        }
    }
}

/// A pay date resolved against the active configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    /// Which biweekly half the pay date landed in.
    pub half: BiweeklyHalf,
    /// The period label, e.g. "First Biweekly June 2024". Unique per run.
    pub label: String,
}

/// Returns the day number of the last day of the date's month.
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    match NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() + 1, 1, 1))
        .and_then(|first_of_next| first_of_next.pred_opt())
    {
        Some(last) => last.day(),
        None => date.day(),
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// Resolves a pay date to its biweekly period.
///
/// The pay date must land on the configured first pay day, the configured
/// second pay day, or the last day of its month (which stands in for a
/// second pay day the month is too short to reach, e.g. the 30th in
/// February).
///
/// # Errors
///
/// Returns a `Validation` error naming the two valid pay days when the
/// date matches neither.
///
/// # Examples
///
/// ```
/// use school_payroll_engine::calculation::resolve_period;
/// use school_payroll_engine::config::PayrollConfiguration;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let config = PayrollConfiguration::new(Uuid::new_v4());
/// let period = resolve_period(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(), &config).unwrap();
/// assert_eq!(period.label, "First Biweekly June 2024");
/// ```
pub fn resolve_period(
    pay_date: NaiveDate,
    config: &PayrollConfiguration,
) -> EngineResult<ResolvedPeriod> {
    let day = pay_date.day();

    let half = if day == config.first_pay_day {
        BiweeklyHalf::First
    } else if day == config.second_pay_day || day == last_day_of_month(pay_date) {
        BiweeklyHalf::Second
    } else {
        return Err(EngineError::validation(format!(
            "pay date {} does not fall on a pay day; valid days are {} and {}",
            pay_date, config.first_pay_day, config.second_pay_day
        )));
    };

    let label = format!(
        "{} Biweekly {} {}",
        half.title(),
        month_name(pay_date.month()),
        pay_date.year()
    );

    Ok(ResolvedPeriod { half, label })
}
