//! The closed registry of search commands
//!
//! Every command name maps to exactly one [`SearchCommand`] variant. Names
//! coming from the request are looked up explicitly before any transform
//! runs; anything not in [`SearchCommand::ALL`] is ignored.

use super::predicate::{Clause, Condition, FilterPredicate, Pattern};
use crate::core::validation::validators::DATE_FORMAT;
use crate::entities::order::{OrderType, fields};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

const RANGE_SEPARATOR: &str = " TO ";

/// A recognised search command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCommand {
    PaymentMethod,
    OrderType,
    OrderDate,
    Today,
    CurrentWeek,
    CurrentMonth,
    CurrentYear,
    DateRange,
}

impl SearchCommand {
    pub const ALL: [SearchCommand; 8] = [
        SearchCommand::PaymentMethod,
        SearchCommand::OrderType,
        SearchCommand::OrderDate,
        SearchCommand::Today,
        SearchCommand::CurrentWeek,
        SearchCommand::CurrentMonth,
        SearchCommand::CurrentYear,
        SearchCommand::DateRange,
    ];

    /// Name as written in a search phrase
    pub fn name(self) -> &'static str {
        match self {
            SearchCommand::PaymentMethod => "paymentMethod",
            SearchCommand::OrderType => "orderType",
            SearchCommand::OrderDate => "orderDate",
            SearchCommand::Today => "today",
            SearchCommand::CurrentWeek => "currentWeek",
            SearchCommand::CurrentMonth => "currentMonth",
            SearchCommand::CurrentYear => "currentYear",
            SearchCommand::DateRange => "dateRange",
        }
    }

    /// Case-sensitive exact lookup
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Order field the command filters on
    ///
    /// `orderType` spans two flags and has no single target field.
    pub fn target_field(self) -> Option<&'static str> {
        match self {
            SearchCommand::PaymentMethod => Some(fields::PAYMENT_METHOD),
            SearchCommand::OrderType => None,
            SearchCommand::OrderDate
            | SearchCommand::Today
            | SearchCommand::CurrentWeek
            | SearchCommand::CurrentMonth
            | SearchCommand::CurrentYear
            | SearchCommand::DateRange => Some(fields::ORDER_DATE),
        }
    }

    /// Transform a phrase value into a clause
    ///
    /// `None` means the value cannot be used and the phrase is dropped.
    pub fn resolve(self, value: &str) -> Option<Clause> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        match self {
            SearchCommand::PaymentMethod => Pattern::literal(value)
                .ok()
                .map(|pattern| Clause::field(fields::PAYMENT_METHOD, Condition::Matches(pattern))),
            SearchCommand::OrderType => value.parse::<OrderType>().ok().map(order_type_clause),
            SearchCommand::OrderDate | SearchCommand::Today => Some(Clause::field(
                fields::ORDER_DATE,
                Condition::Equals(value.to_string()),
            )),
            SearchCommand::CurrentWeek => period_clause(CalendarPeriod::Week, value),
            SearchCommand::CurrentMonth => period_clause(CalendarPeriod::Month, value),
            SearchCommand::CurrentYear => period_clause(CalendarPeriod::Year, value),
            SearchCommand::DateRange => {
                let (start, end) = value.split_once(RANGE_SEPARATOR)?;
                let from = parse_date(start)?;
                let to = parse_date(end)?;
                Some(date_range(from, to))
            }
        }
    }
}

fn order_type_clause(order_type: OrderType) -> Clause {
    let flag = |field, expected| Clause::field(field, Condition::Is(expected));
    let alternative = match order_type {
        OrderType::Pickup => vec![flag(fields::PICKUP_ORDER, true)],
        OrderType::DineIn => vec![
            flag(fields::PICKUP_ORDER, false),
            flag(fields::ONLINE_ORDER, false),
        ],
        OrderType::Online => vec![flag(fields::ONLINE_ORDER, true)],
    };
    Clause::AnyOf(vec![FilterPredicate::new(alternative)])
}

fn period_clause(period: CalendarPeriod, anchor: &str) -> Option<Clause> {
    let (from, to) = period.bounds(parse_date(anchor)?)?;
    Some(date_range(from, to))
}

fn date_range(from: NaiveDate, to: NaiveDate) -> Clause {
    Clause::field(
        fields::ORDER_DATE,
        Condition::Range {
            from: from.format(DATE_FORMAT).to_string(),
            to: to.format(DATE_FORMAT).to_string(),
        },
    )
}

/// Calendar periods used by the `current*` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarPeriod {
    /// Sunday through Saturday
    Week,
    Month,
    Year,
}

impl CalendarPeriod {
    /// First and last day of the period containing `anchor`
    pub fn bounds(self, anchor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            CalendarPeriod::Week => {
                let offset = u64::from(anchor.weekday().num_days_from_sunday());
                let start = anchor.checked_sub_days(Days::new(offset))?;
                let end = start.checked_add_days(Days::new(6))?;
                Some((start, end))
            }
            CalendarPeriod::Month => {
                let start = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1)?;
                let next = if anchor.month() == 12 {
                    NaiveDate::from_ymd_opt(anchor.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(anchor.year(), anchor.month() + 1, 1)?
                };
                Some((start, next.pred_opt()?))
            }
            CalendarPeriod::Year => Some((
                NaiveDate::from_ymd_opt(anchor.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(anchor.year(), 12, 31)?,
            )),
        }
    }
}

/// Parse a calendar date, an RFC 3339 timestamp or a naive timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
