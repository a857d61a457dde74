//! Null-safe aggregation and total reconciliation.
//!
//! Absent components count as zero when summed; a claimed total is never
//! defaulted. Arithmetic saturates so that adversarial figures cannot panic.
use crate::enums::Period;

use super::{ErrorKey, Errors, JsonPath};

/// Sum of the present values, treating absent values as zero.
pub fn sum_or_zero(values: &[Option<i64>]) -> i64 {
    values
        .iter()
        .flatten()
        .fold(0i64, |acc, v| acc.saturating_add(*v))
}

/// Like [`sum_or_zero`], but `None` when every value is absent.
pub fn sum_present(values: &[Option<i64>]) -> Option<i64> {
    if values.iter().all(Option::is_none) {
        None
    } else {
        Some(sum_or_zero(values))
    }
}

/// `additions - subtractions`, or `None` when every operand is absent.
pub fn net_present(additions: &[Option<i64>], subtractions: &[Option<i64>]) -> Option<i64> {
    if additions.iter().chain(subtractions).all(Option::is_none) {
        None
    } else {
        Some(sum_or_zero(additions).saturating_sub(sum_or_zero(subtractions)))
    }
}

/// Checks a claimed `total` against the `expected` value derived from its
/// components, pushing `incorrect_total` at `path` on mismatch.
///
/// With no expected value, only an absent or zero total is accepted. Returns
/// `true` when the total reconciles.
pub fn validate_aggregate_total(
    total: Option<i64>,
    expected: Option<i64>,
    path: &JsonPath,
    errors: &mut Errors,
) -> bool {
    let ok = match expected {
        None => matches!(total, None | Some(0)),
        Some(expected) => total == Some(expected),
    };
    if !ok {
        errors.push(ErrorKey::IncorrectTotal, path.clone());
    }
    ok
}

/// Checks a note total against its balance-sheet line for `period`.
///
/// Absent is a value of its own here: it equals only absent, never zero.
pub fn cross_validate(
    note_total: Option<i64>,
    sheet_value: Option<i64>,
    period: Period,
    path: &JsonPath,
    errors: &mut Errors,
) -> bool {
    let ok = note_total == sheet_value;
    if !ok {
        errors.push(not_equal_to_balance_sheet(period), path.clone());
    }
    ok
}

pub fn not_equal_to_balance_sheet(period: Period) -> ErrorKey {
    match period {
        Period::Current => ErrorKey::ValueNotEqualToCurrentPeriodOnBalanceSheet,
        Period::Previous => ErrorKey::ValueNotEqualToPreviousPeriodOnBalanceSheet,
    }
}
