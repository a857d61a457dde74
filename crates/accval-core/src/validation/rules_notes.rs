//! Validators for the balance-sheet notes and the text/count notes.
//!
//! The four notes that reconcile with a single balance-sheet line only
//! describe their fields here; the checks themselves live in
//! [`note_pipeline`](super::note_pipeline).
use crate::balance_sheet::BalanceSheet;
use crate::enums::{NoteKind, Period};
use crate::notes::{
    CreditorsAfterOneYear, CreditorsAfterOneYearCurrentPeriod,
    CreditorsAfterOneYearPreviousPeriod, CreditorsWithinOneYear,
    CreditorsWithinOneYearCurrentPeriod, CreditorsWithinOneYearPreviousPeriod, Debtors,
    DebtorsCurrentPeriod, DebtorsPreviousPeriod, Employees, Stocks, StocksPeriod,
};
use crate::submission::NoteBody;

use super::note_pipeline::{BalanceSheetNote, NotePeriod, validate_balance_sheet_note};
use super::presence::{
    check_presence, check_text_length, has_text, populated, reject_populated, require_text,
};
use super::{DataError, ErrorKey, Errors, JsonPath, NoteValidator, ValidationContext};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Field descriptions
// ---------------------------------------------------------------------------

impl NotePeriod for StocksPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("stocks", self.stocks.is_some()),
            ("payments_on_account", self.payments_on_account.is_some()),
            ("total", self.total.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![self.stocks, self.payments_on_account]
    }
}

impl BalanceSheetNote for Stocks {
    type CurrentPeriod = StocksPeriod;
    type PreviousPeriod = StocksPeriod;
    const ROOT: &'static str = "stocks";

    fn current_period(&self) -> Option<&StocksPeriod> {
        self.current_period.as_ref()
    }

    fn previous_period(&self) -> Option<&StocksPeriod> {
        self.previous_period.as_ref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.stocks()
    }
}

impl NotePeriod for DebtorsCurrentPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("trade_debtors", self.trade_debtors.is_some()),
            (
                "prepayments_and_accrued_income",
                self.prepayments_and_accrued_income.is_some(),
            ),
            ("other_debtors", self.other_debtors.is_some()),
            ("greater_than_one_year", self.greater_than_one_year.is_some()),
            ("total", self.total.is_some()),
            ("details", self.details.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.trade_debtors,
            self.prepayments_and_accrued_income,
            self.other_debtors,
        ]
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("details", self.details.as_deref())]
    }
}

impl NotePeriod for DebtorsPreviousPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("trade_debtors", self.trade_debtors.is_some()),
            (
                "prepayments_and_accrued_income",
                self.prepayments_and_accrued_income.is_some(),
            ),
            ("other_debtors", self.other_debtors.is_some()),
            ("greater_than_one_year", self.greater_than_one_year.is_some()),
            ("total", self.total.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.trade_debtors,
            self.prepayments_and_accrued_income,
            self.other_debtors,
        ]
    }
}

impl BalanceSheetNote for Debtors {
    type CurrentPeriod = DebtorsCurrentPeriod;
    type PreviousPeriod = DebtorsPreviousPeriod;
    const ROOT: &'static str = "debtors";

    fn current_period(&self) -> Option<&DebtorsCurrentPeriod> {
        self.current_period.as_ref()
    }

    fn previous_period(&self) -> Option<&DebtorsPreviousPeriod> {
        self.previous_period.as_ref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.debtors()
    }
}

impl NotePeriod for CreditorsWithinOneYearCurrentPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("bank_loans_and_overdrafts", self.bank_loans_and_overdrafts.is_some()),
            (
                "finance_leases_and_hire_purchase_contracts",
                self.finance_leases_and_hire_purchase_contracts.is_some(),
            ),
            ("trade_creditors", self.trade_creditors.is_some()),
            (
                "taxation_and_social_security",
                self.taxation_and_social_security.is_some(),
            ),
            (
                "accruals_and_deferred_income",
                self.accruals_and_deferred_income.is_some(),
            ),
            ("other_creditors", self.other_creditors.is_some()),
            ("total", self.total.is_some()),
            ("details", self.details.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.bank_loans_and_overdrafts,
            self.finance_leases_and_hire_purchase_contracts,
            self.trade_creditors,
            self.taxation_and_social_security,
            self.accruals_and_deferred_income,
            self.other_creditors,
        ]
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("details", self.details.as_deref())]
    }
}

impl NotePeriod for CreditorsWithinOneYearPreviousPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("bank_loans_and_overdrafts", self.bank_loans_and_overdrafts.is_some()),
            (
                "finance_leases_and_hire_purchase_contracts",
                self.finance_leases_and_hire_purchase_contracts.is_some(),
            ),
            ("trade_creditors", self.trade_creditors.is_some()),
            (
                "taxation_and_social_security",
                self.taxation_and_social_security.is_some(),
            ),
            (
                "accruals_and_deferred_income",
                self.accruals_and_deferred_income.is_some(),
            ),
            ("other_creditors", self.other_creditors.is_some()),
            ("total", self.total.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.bank_loans_and_overdrafts,
            self.finance_leases_and_hire_purchase_contracts,
            self.trade_creditors,
            self.taxation_and_social_security,
            self.accruals_and_deferred_income,
            self.other_creditors,
        ]
    }
}

impl BalanceSheetNote for CreditorsWithinOneYear {
    type CurrentPeriod = CreditorsWithinOneYearCurrentPeriod;
    type PreviousPeriod = CreditorsWithinOneYearPreviousPeriod;
    const ROOT: &'static str = "creditors_within_one_year";

    fn current_period(&self) -> Option<&CreditorsWithinOneYearCurrentPeriod> {
        self.current_period.as_ref()
    }

    fn previous_period(&self) -> Option<&CreditorsWithinOneYearPreviousPeriod> {
        self.previous_period.as_ref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.creditors_due_within_one_year()
    }
}

impl NotePeriod for CreditorsAfterOneYearCurrentPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("bank_loans_and_overdrafts", self.bank_loans_and_overdrafts.is_some()),
            (
                "finance_leases_and_hire_purchase_contracts",
                self.finance_leases_and_hire_purchase_contracts.is_some(),
            ),
            ("other_creditors", self.other_creditors.is_some()),
            ("total", self.total.is_some()),
            ("details", self.details.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.bank_loans_and_overdrafts,
            self.finance_leases_and_hire_purchase_contracts,
            self.other_creditors,
        ]
    }

    fn text_fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("details", self.details.as_deref())]
    }
}

impl NotePeriod for CreditorsAfterOneYearPreviousPeriod {
    fn populated_fields(&self) -> Vec<&'static str> {
        populated(&[
            ("bank_loans_and_overdrafts", self.bank_loans_and_overdrafts.is_some()),
            (
                "finance_leases_and_hire_purchase_contracts",
                self.finance_leases_and_hire_purchase_contracts.is_some(),
            ),
            ("other_creditors", self.other_creditors.is_some()),
            ("total", self.total.is_some()),
        ])
    }

    fn total(&self) -> Option<i64> {
        self.total
    }

    fn components(&self) -> Vec<Option<i64>> {
        vec![
            self.bank_loans_and_overdrafts,
            self.finance_leases_and_hire_purchase_contracts,
            self.other_creditors,
        ]
    }
}

impl BalanceSheetNote for CreditorsAfterOneYear {
    type CurrentPeriod = CreditorsAfterOneYearCurrentPeriod;
    type PreviousPeriod = CreditorsAfterOneYearPreviousPeriod;
    const ROOT: &'static str = "creditors_after_one_year";

    fn current_period(&self) -> Option<&CreditorsAfterOneYearCurrentPeriod> {
        self.current_period.as_ref()
    }

    fn previous_period(&self) -> Option<&CreditorsAfterOneYearPreviousPeriod> {
        self.previous_period.as_ref()
    }

    fn sheet_value(sheet: &BalanceSheet) -> Option<i64> {
        sheet.creditors_after_one_year()
    }
}

// ---------------------------------------------------------------------------
// Balance-sheet note validators
// ---------------------------------------------------------------------------

/// `stocks` note: reconciles with `current_assets.stocks`.
pub struct StocksValidator;

impl NoteValidator for StocksValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::Stocks
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::Stocks(stocks) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_balance_sheet_note(stocks, ctx)
    }
}

/// `debtors` note: reconciles with `current_assets.debtors`.
pub struct DebtorsValidator;

impl NoteValidator for DebtorsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::Debtors
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::Debtors(debtors) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_balance_sheet_note(debtors, ctx)
    }
}

pub struct CreditorsWithinOneYearValidator;

impl NoteValidator for CreditorsWithinOneYearValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::CreditorsWithinOneYear
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::CreditorsWithinOneYear(creditors) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_balance_sheet_note(creditors, ctx)
    }
}

pub struct CreditorsAfterOneYearValidator;

impl NoteValidator for CreditorsAfterOneYearValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::CreditorsAfterOneYear
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::CreditorsAfterOneYear(creditors) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_balance_sheet_note(creditors, ctx)
    }
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

/// `employees` note: average head count per period.
pub struct EmployeesValidator;

impl EmployeesValidator {
    fn check_average(average: Option<i64>, max: i64, path: &JsonPath, errors: &mut Errors) {
        if average.is_some_and(|n| !(0..=max).contains(&n)) {
            errors.push(ErrorKey::ValueOutsideRange, path.clone());
        }
    }

    fn check(
        employees: &Employees,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let root = JsonPath::root("employees");
        let mut errors = Errors::new();

        let current = employees.current_period.as_ref().filter(|p| {
            p.average_number_of_employees.is_some() || p.details.is_some()
        });
        let previous = employees
            .previous_period
            .as_ref()
            .filter(|p| p.average_number_of_employees.is_some());
        if current.is_none() && previous.is_none() {
            errors.push(ErrorKey::EmptyResource, root);
            return Ok(errors);
        }

        let filer = ctx.filer_classification("employees")?;
        let max = ctx.config.max_employees;

        if let Some(period) = current {
            let path = root.field(Period::Current.key());
            Self::check_average(
                period.average_number_of_employees,
                max,
                &path.field("average_number_of_employees"),
                &mut errors,
            );
            check_text_length(
                period.details.as_deref(),
                ctx.config.max_text_length,
                &path.field("details"),
                &mut errors,
            );
        }

        if let Some(period) = previous {
            let path = root.field(Period::Previous.key());
            if filer.is_multiple_year_filer {
                Self::check_average(
                    period.average_number_of_employees,
                    max,
                    &path.field("average_number_of_employees"),
                    &mut errors,
                );
            } else {
                reject_populated(
                    &["average_number_of_employees"],
                    &path,
                    ErrorKey::InconsistentData,
                    &mut errors,
                );
            }
        }
        Ok(errors)
    }
}

impl NoteValidator for EmployeesValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::Employees
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::Employees(employees) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        Self::check(employees, ctx)
    }
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

/// Details notes explaining a balance-sheet investments line.
///
/// The note is expected exactly when the line has a figure in the current
/// balance sheet or, for multiple-year filers, the previous one.
fn validate_investments_note(
    root: &'static str,
    details: Option<&str>,
    line: fn(&BalanceSheet) -> Option<i64>,
    ctx: &ValidationContext<'_>,
) -> Result<Errors, DataError> {
    let filer = ctx.filer_classification(root)?;
    let mut has_line = ctx.current_balance_sheet(root)?.as_ref().and_then(line).is_some();
    if !has_line && filer.is_multiple_year_filer {
        has_line = ctx.previous_balance_sheet(root)?.as_ref().and_then(line).is_some();
    }

    let mut errors = Errors::new();
    let path = JsonPath::root(root).field("details");
    check_presence(has_line, has_text(details), &path, &mut errors);
    check_text_length(details, ctx.config.max_text_length, &path, &mut errors);
    Ok(errors)
}

pub struct FixedAssetsInvestmentsValidator;

impl NoteValidator for FixedAssetsInvestmentsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::FixedAssetsInvestments
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::FixedAssetsInvestments(body) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_investments_note(
            "fixed_assets_investments",
            body.details.as_deref(),
            BalanceSheet::fixed_asset_investments,
            ctx,
        )
    }
}

pub struct CurrentAssetsInvestmentsValidator;

impl NoteValidator for CurrentAssetsInvestmentsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::CurrentAssetsInvestments
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::CurrentAssetsInvestments(body) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        validate_investments_note(
            "current_assets_investments",
            body.details.as_deref(),
            BalanceSheet::current_asset_investments,
            ctx,
        )
    }
}

// ---------------------------------------------------------------------------
// Text notes
// ---------------------------------------------------------------------------

pub struct AccountingPoliciesValidator;

impl NoteValidator for AccountingPoliciesValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::AccountingPolicies
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::AccountingPolicies(policies) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        let root = JsonPath::root("accounting_policies");
        let max = ctx.config.max_text_length;
        let mut errors = Errors::new();

        require_text(
            policies.basis_of_measurement_and_preparation.as_deref(),
            max,
            &root.field("basis_of_measurement_and_preparation"),
            &mut errors,
        );
        let optional = [
            ("turnover_policy", &policies.turnover_policy),
            (
                "tangible_fixed_assets_depreciation_policy",
                &policies.tangible_fixed_assets_depreciation_policy,
            ),
            (
                "intangible_fixed_assets_amortisation_policy",
                &policies.intangible_fixed_assets_amortisation_policy,
            ),
            (
                "valuation_information_and_policy",
                &policies.valuation_information_and_policy,
            ),
            ("other_accounting_policy", &policies.other_accounting_policy),
        ];
        for (field, text) in optional {
            check_text_length(text.as_deref(), max, &root.field(field), &mut errors);
        }
        Ok(errors)
    }
}

pub struct OffBalanceSheetArrangementsValidator;

impl NoteValidator for OffBalanceSheetArrangementsValidator {
    fn kind(&self) -> NoteKind {
        NoteKind::OffBalanceSheetArrangements
    }

    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let NoteBody::OffBalanceSheetArrangements(body) = note else {
            return Err(DataError::body_mismatch(self.kind(), note.kind()));
        };
        let mut errors = Errors::new();
        require_text(
            body.details.as_deref(),
            ctx.config.max_text_length,
            &JsonPath::root("off_balance_sheet_arrangements").field("details"),
            &mut errors,
        );
        Ok(errors)
    }
}
