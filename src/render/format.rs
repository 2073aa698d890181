//! Amount and date formatting for the payslip document.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Formats an amount with two decimals and Indian digit grouping.
///
/// The last three integer digits form one group and every two digits before
/// that form another. Halves round away from zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::render::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::new(123456789, 2)), "12,34,567.89");
/// assert_eq!(format_inr(Decimal::new(1800, 0)), "1,800.00");
/// assert_eq!(format_inr(Decimal::new(-38005, 1)), "-3,800.50");
/// ```
pub fn format_inr(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let grouped = group_indian(integer);
    if negative {
        format!("-{}.{}", grouped, fraction)
    } else {
        format!("{}.{}", grouped, fraction)
    }
}

fn group_indian(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }

    let (head, last_three) = integer.split_at(integer.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

/// Parses an amount produced by [`format_inr`] back into a decimal.
///
/// Grouping commas, whitespace and a leading `₹` are ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the remaining text is not a
/// number.
pub fn parse_inr(text: &str) -> EngineResult<Decimal> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    Decimal::from_str(&cleaned)
        .map_err(|e| EngineError::invalid_input("amount", format!("'{}': {}", text, e)))
}

/// Formats a date as `dd/mm/yyyy`, or an empty string when absent.
///
/// ```
/// use chrono::NaiveDate;
/// use payslip_engine::render::format_date;
///
/// assert_eq!(format_date(NaiveDate::from_ymd_opt(2023, 6, 1)), "01/06/2023");
/// assert_eq!(format_date(None), "");
/// ```
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}
