//! The shared validation pipeline for notes that reconcile with one
//! balance-sheet line.
//!
//! Stocks, debtors and both creditors notes differ only in their field lists
//! and in which balance-sheet figure they explain. Each describes itself
//! through [`BalanceSheetNote`]; [`validate_balance_sheet_note`] then runs the
//! same steps for all of them:
//!
//! 1. fetch the filer classification and the sibling balance sheets,
//! 2. reject the note whole if neither period has data on either side,
//! 3. for the current period (and the previous period of a multiple-year
//!    filer) apply the presence matrix, the aggregate-total check and the
//!    cross-check against the balance sheet,
//! 4. for a single-year filer, reject every populated previous-period field.
use crate::balance_sheet::BalanceSheet;
use crate::enums::Period;

use super::presence::{PresenceOutcome, check_presence, check_text_length, reject_populated};
use super::reconcile::{cross_validate, sum_present, validate_aggregate_total};
use super::{DataError, ErrorKey, Errors, JsonPath, ValidationContext};

/// One period sub-object of a balance-sheet note.
pub trait NotePeriod {
    /// Names of the populated fields, in wire order.
    fn populated_fields(&self) -> Vec<&'static str>;

    /// The submitted `total`.
    fn total(&self) -> Option<i64>;

    /// The figures that sum to `total`.
    fn components(&self) -> Vec<Option<i64>>;

    /// Free-text fields subject to the length limit.
    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        Vec::new()
    }

    fn has_data(&self) -> bool {
        !self.populated_fields().is_empty()
    }
}

/// A note whose period totals must equal one balance-sheet figure.
pub trait BalanceSheetNote {
    type CurrentPeriod: NotePeriod;
    type PreviousPeriod: NotePeriod;

    /// Top-level JSON key, e.g. `stocks`.
    const ROOT: &'static str;

    fn current_period(&self) -> Option<&Self::CurrentPeriod>;

    fn previous_period(&self) -> Option<&Self::PreviousPeriod>;

    /// The balance-sheet figure this note explains.
    fn sheet_value(sheet: &BalanceSheet) -> Option<i64>;
}

/// Runs the shared pipeline for `note`.
pub fn validate_balance_sheet_note<N: BalanceSheetNote>(
    note: &N,
    ctx: &ValidationContext<'_>,
) -> Result<Errors, DataError> {
    let filer = ctx.filer_classification(N::ROOT)?;
    let current_sheet = ctx.current_balance_sheet(N::ROOT)?;
    let previous_sheet = if filer.is_multiple_year_filer {
        ctx.previous_balance_sheet(N::ROOT)?
    } else {
        None
    };

    let current_value = current_sheet.as_ref().and_then(N::sheet_value);
    let previous_value = previous_sheet.as_ref().and_then(N::sheet_value);
    let current = note.current_period().filter(|p| p.has_data());
    let previous = note.previous_period().filter(|p| p.has_data());

    let root = JsonPath::root(N::ROOT);
    let mut errors = Errors::new();

    if current.is_none() && previous.is_none() && current_value.is_none() && previous_value.is_none()
    {
        errors.push(ErrorKey::EmptyResource, root);
        return Ok(errors);
    }

    validate_period(
        current,
        current_value,
        Period::Current,
        &root.field(Period::Current.key()),
        ctx,
        &mut errors,
    );

    let previous_path = root.field(Period::Previous.key());
    if filer.is_multiple_year_filer {
        validate_period(
            previous,
            previous_value,
            Period::Previous,
            &previous_path,
            ctx,
            &mut errors,
        );
    } else if let Some(period) = previous {
        reject_populated(
            &period.populated_fields(),
            &previous_path,
            ErrorKey::InconsistentData,
            &mut errors,
        );
    }

    tracing::debug!(note = N::ROOT, errors = errors.len(), "validated balance sheet note");
    Ok(errors)
}

/// Presence matrix, aggregate total and cross-check for one period.
///
/// The cross-check is skipped when the period's own total is already wrong,
/// so that one bad figure is reported once.
fn validate_period<P: NotePeriod>(
    period: Option<&P>,
    sheet_value: Option<i64>,
    which: Period,
    path: &JsonPath,
    ctx: &ValidationContext<'_>,
    errors: &mut Errors,
) {
    let outcome = check_presence(sheet_value.is_some(), period.is_some(), path, errors);
    let Some(period) = period else {
        return;
    };
    for (field, text) in period.text_fields() {
        check_text_length(text, ctx.config.max_text_length, &path.field(field), errors);
    }
    if outcome != PresenceOutcome::BothPresent {
        return;
    }
    let total_path = path.field("total");
    let expected = sum_present(&period.components());
    if validate_aggregate_total(period.total(), expected, &total_path, errors) {
        cross_validate(period.total(), sheet_value, which, &total_path, errors);
    }
}
