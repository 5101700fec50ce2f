use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{ErrorFeedback, ErrorKind, SchemaError, ValidationError};
use crate::schema::{Checked, Constraint, Context, Schema, SchemaCore};
use crate::value::Value;

/// A calendar component that can be restricted to a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Day of the month, 1-31.
    Date,
    /// Month of the year, 1-12.
    Month,
    /// Hour of the day, 0-23.
    Hour,
    /// Day of the week, 0 (Sunday) to 6 (Saturday).
    Weekday,
    /// Minute of the hour, 0-59.
    Minutes,
    /// Second of the minute, 0-59.
    Seconds,
}

impl Component {
    fn option(&self) -> &'static str {
        match self {
            Component::Date => "date_between",
            Component::Month => "month_between",
            Component::Hour => "hour_between",
            Component::Weekday => "weekday_between",
            Component::Minutes => "minutes_between",
            Component::Seconds => "seconds_between",
        }
    }

    fn limits(&self) -> RangeInclusive<u32> {
        match self {
            Component::Date => 1..=31,
            Component::Month => 1..=12,
            Component::Hour => 0..=23,
            Component::Weekday => 0..=6,
            Component::Minutes | Component::Seconds => 0..=59,
        }
    }

    fn extract(&self, d: &NaiveDateTime) -> u32 {
        match self {
            Component::Date => d.day(),
            Component::Month => d.month(),
            Component::Hour => d.hour(),
            Component::Weekday => d.weekday().num_days_from_sunday(),
            Component::Minutes => d.minute(),
            Component::Seconds => d.second(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Date => "day of month",
            Component::Month => "month",
            Component::Hour => "hour",
            Component::Weekday => "weekday",
            Component::Minutes => "minutes",
            Component::Seconds => "seconds",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Before(NaiveDateTime),
    After(NaiveDateTime),
    Between {
        component: Component,
        start: u32,
        end: u32,
    },
}

/// Whether `c` falls outside the window. A window with `start > end`
/// wraps around: only values strictly between `end` and `start` fail.
fn outside_window(c: u32, start: u32, end: u32) -> bool {
    if start <= end {
        c < start || c > end
    } else {
        c > end && c < start
    }
}

/// Interpret a date-like bound: a valid date, an ISO 8601 / RFC 3339
/// string, or milliseconds since the Unix epoch.
fn parse_date_like(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Date(d) => *d,
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok())
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }),
        Value::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Schema for date validation. Created via [`vld_chain::date()`](crate::date).
///
/// Accepts [`Value::Date`] values holding a valid timestamp. Bounds are
/// exclusive: a date equal to the `before` or `after` bound fails.
///
/// Calendar windows (`hour_between` and friends) wrap around when `start`
/// is greater than `end`, so `hour_between(22, 4)` describes a night shift.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use vld_chain::prelude::*;
///
/// let night = vld_chain::date().hour_between(22, 4);
/// let at = |h| Value::from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, 0, 0).unwrap());
/// assert!(night.validate(&at(23), "").is_valid());
/// assert!(night.validate(&at(1), "").is_valid());
/// assert!(!night.validate(&at(12), "").is_valid());
/// ```
#[derive(Clone, Debug)]
pub struct DateSchema {
    core: SchemaCore<DateCheck>,
}

impl DateSchema {
    pub fn new(ctx: Context) -> Self {
        Self {
            core: SchemaCore::new(ctx),
        }
    }

    fn bound(&self, option: &'static str, bound: Value) -> NaiveDateTime {
        match parse_date_like(&bound) {
            Some(d) => d,
            None => SchemaError::InvalidArgument {
                schema: "date",
                option,
                reason: format!("{} is not a valid date", bound),
            }
            .raise(),
        }
    }

    /// Dates must be strictly earlier than `bound`.
    ///
    /// # Panics
    /// If `before` was already set or `bound` is not a valid date.
    pub fn before(mut self, bound: impl Into<Value>) -> Self {
        if self.core.has_check(|c| matches!(c, DateCheck::Before(_))) {
            SchemaError::AlreadySet {
                schema: "date",
                option: "before",
            }
            .raise();
        }
        let bound = self.bound("before", bound.into());
        self.core
            .push_constraint(Constraint::Kind(DateCheck::Before(bound)));
        self
    }

    /// Dates must be strictly later than `bound`.
    ///
    /// # Panics
    /// If `after` was already set or `bound` is not a valid date.
    pub fn after(mut self, bound: impl Into<Value>) -> Self {
        if self.core.has_check(|c| matches!(c, DateCheck::After(_))) {
            SchemaError::AlreadySet {
                schema: "date",
                option: "after",
            }
            .raise();
        }
        let bound = self.bound("after", bound.into());
        self.core
            .push_constraint(Constraint::Kind(DateCheck::After(bound)));
        self
    }

    /// Restrict a calendar component to `start..=end`, wrapping around when
    /// `start > end`.
    ///
    /// # Panics
    /// If the component was already restricted or a bound is outside the
    /// component's range.
    pub fn between(mut self, component: Component, start: u32, end: u32) -> Self {
        let option = component.option();
        if self.core.has_check(
            |c| matches!(c, DateCheck::Between { component: k, .. } if *k == component),
        ) {
            SchemaError::AlreadySet {
                schema: "date",
                option,
            }
            .raise();
        }
        let limits = component.limits();
        for bound in [start, end] {
            if !limits.contains(&bound) {
                SchemaError::InvalidArgument {
                    schema: "date",
                    option,
                    reason: format!(
                        "{} is outside {}..={}",
                        bound,
                        limits.start(),
                        limits.end()
                    ),
                }
                .raise();
            }
        }
        self.core.push_constraint(Constraint::Kind(DateCheck::Between {
            component,
            start,
            end,
        }));
        self
    }

    /// Day of the month (1-31).
    pub fn date_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Date, start, end)
    }

    /// Month of the year (1-12).
    pub fn month_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Month, start, end)
    }

    /// Hour of the day (0-23).
    pub fn hour_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Hour, start, end)
    }

    /// Day of the week, 0 = Sunday (0-6).
    pub fn weekday_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Weekday, start, end)
    }

    /// Minute of the hour (0-59).
    pub fn minutes_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Minutes, start, end)
    }

    /// Second of the minute (0-59).
    pub fn seconds_between(self, start: u32, end: u32) -> Self {
        self.between(Component::Seconds, start, end)
    }
}

impl Checked for DateSchema {
    type Check = DateCheck;

    fn core(&self) -> &SchemaCore<DateCheck> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore<DateCheck> {
        &mut self.core
    }

    fn run_check(&self, check: &DateCheck, value: &Value, path: &str) -> Option<ValidationError> {
        let date = value.as_date()?;
        let ctx = self.core.context();
        match check {
            DateCheck::Before(bound) => (date >= bound).then(|| {
                ctx.error(
                    ErrorKind::Range,
                    format!("Date must be before {}, received {}", Value::from(*bound), value),
                    path,
                )
            }),
            DateCheck::After(bound) => (date <= bound).then(|| {
                ctx.error(
                    ErrorKind::Range,
                    format!("Date must be after {}, received {}", Value::from(*bound), value),
                    path,
                )
            }),
            DateCheck::Between {
                component,
                start,
                end,
            } => {
                let c = component.extract(date);
                outside_window(c, *start, *end).then(|| {
                    ctx.error(
                        ErrorKind::Range,
                        format!(
                            "Expected {} between {} and {}, received {}",
                            component, start, end, c
                        ),
                        path,
                    )
                })
            }
        }
    }
}

impl Schema for DateSchema {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("date")
    }

    fn validate_type(&self, value: &Value) -> bool {
        value.as_date().is_some()
    }

    fn is_required(&self) -> bool {
        self.core.is_required()
    }

    fn context(&self) -> &Context {
        self.core.context()
    }

    fn validate_value_with_correct_type(&self, value: &Value, path: &str) -> ErrorFeedback {
        self.check_constraints(value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_window_is_inclusive() {
        assert!(!outside_window(9, 9, 17));
        assert!(!outside_window(17, 9, 17));
        assert!(outside_window(18, 9, 17));
        assert!(outside_window(8, 9, 17));
    }

    #[test]
    fn reversed_window_wraps_around() {
        assert!(!outside_window(23, 22, 4));
        assert!(!outside_window(22, 22, 4));
        assert!(!outside_window(4, 22, 4));
        assert!(!outside_window(0, 22, 4));
        assert!(outside_window(12, 22, 4));
        assert!(outside_window(5, 22, 4));
    }

    #[test]
    fn parses_date_like_bounds() {
        assert!(parse_date_like(&Value::from("2024-06-15")).is_some());
        assert!(parse_date_like(&Value::from("2024-06-15T10:30:00Z")).is_some());
        assert!(parse_date_like(&Value::from("2024-06-15T10:30:00")).is_some());
        assert!(parse_date_like(&Value::from(0)).is_some());
        assert!(parse_date_like(&Value::from("yesterday")).is_none());
        assert!(parse_date_like(&Value::invalid_date()).is_none());
        assert!(parse_date_like(&Value::Null).is_none());
    }

    #[test]
    #[should_panic(expected = "`hour_between` can only be set once")]
    fn component_window_set_twice_panics() {
        let _ = DateSchema::new(Context::default())
            .hour_between(1, 2)
            .hour_between(3, 4);
    }

    #[test]
    #[should_panic(expected = "24 is outside 0..=23")]
    fn component_window_out_of_range_panics() {
        let _ = DateSchema::new(Context::default()).hour_between(22, 24);
    }

    #[test]
    #[should_panic(expected = "not a valid date")]
    fn invalid_bound_panics() {
        let _ = DateSchema::new(Context::default()).before("not a date");
    }
}
