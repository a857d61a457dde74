//! Balance sheet, period and profit-and-loss validators.
//!
//! [`BalanceSheetValidator`] checks the internal arithmetic of one balance
//! sheet and the LBG/non-LBG equity rules; it is not registered on its own
//! but consumed by the `current-period` and `previous-period` resource
//! validators.
use crate::balance_sheet::{
    BalanceSheet, CapitalAndReserves, EquitySection, MembersFunds, PeriodResource, ProfitAndLoss,
};
use crate::enums::{Period, ResourceKind};
use crate::submission::ResourceBody;

use super::presence::{forbid, require};
use super::reconcile::{net_present, sum_present, validate_aggregate_total};
use super::{
    DataError, ErrorKey, Errors, GrossProfitConvention, JsonPath, ResourceValidator,
    ValidationContext,
};

#[cfg(test)]
mod tests;

/// Internal aggregation rules of a single balance sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceSheetValidator;

impl BalanceSheetValidator {
    /// Validates `sheet` located at `base`, pushing violations into
    /// `errors`.
    pub fn validate(
        &self,
        sheet: &BalanceSheet,
        base: &JsonPath,
        is_lbg: bool,
        errors: &mut Errors,
    ) {
        let fixed_total = sheet.fixed_assets.as_ref().and_then(|f| f.total);
        if let Some(fixed) = &sheet.fixed_assets {
            validate_aggregate_total(
                fixed.total,
                sum_present(&[fixed.tangible, fixed.intangible, fixed.investments]),
                &base.field("fixed_assets").field("total"),
                errors,
            );
        }

        let current_total = sheet.current_assets.as_ref().and_then(|c| c.total);
        if let Some(current) = &sheet.current_assets {
            validate_aggregate_total(
                current.total,
                sum_present(&current.components()),
                &base.field("current_assets").field("total"),
                errors,
            );
        }

        let other = sheet.other_liabilities_or_assets.clone().unwrap_or_default();
        let other_path = base.field("other_liabilities_or_assets");
        let has_working_capital = sheet
            .current_assets
            .as_ref()
            .is_some_and(|c| c.has_any_figure())
            || other.has_any_figure();

        if has_working_capital {
            let path = other_path.field("net_current_assets");
            if require(other.net_current_assets.is_some(), &path, errors) {
                let expected = net_present(
                    &[current_total, other.prepayments_and_accrued_income],
                    &[other.creditors_due_within_one_year],
                );
                validate_aggregate_total(other.net_current_assets, expected, &path, errors);
            }

            let path = other_path.field("total_assets_less_current_liabilities");
            if require(
                other.total_assets_less_current_liabilities.is_some(),
                &path,
                errors,
            ) {
                let not_paid = if is_lbg {
                    None
                } else {
                    sheet.called_up_share_capital_not_paid
                };
                let expected = net_present(&[fixed_total, other.net_current_assets, not_paid], &[]);
                validate_aggregate_total(
                    other.total_assets_less_current_liabilities,
                    expected,
                    &path,
                    errors,
                );
            }
        }

        let expected_net_assets = net_present(
            &[other.total_assets_less_current_liabilities],
            &[
                other.creditors_after_one_year,
                other.accruals_and_deferred_income,
                other.provision_for_liabilities,
            ],
        );
        validate_aggregate_total(
            other.total_net_assets,
            expected_net_assets,
            &other_path.field("total_net_assets"),
            errors,
        );

        if is_lbg {
            self.validate_lbg_equity(sheet, base, other.total_net_assets, errors);
        } else {
            self.validate_share_equity(sheet, base, other.total_net_assets, errors);
        }
    }

    /// Companies limited by guarantee report members' funds and have no
    /// share capital.
    fn validate_lbg_equity(
        &self,
        sheet: &BalanceSheet,
        base: &JsonPath,
        total_net_assets: Option<i64>,
        errors: &mut Errors,
    ) {
        forbid(
            sheet.called_up_share_capital_not_paid.is_some(),
            ErrorKey::UnexpectedData,
            &base.field("called_up_share_capital_not_paid"),
            errors,
        );
        match &sheet.equity {
            Some(EquitySection::Members(members)) => {
                validate_members_funds(members, base, total_net_assets, errors);
            }
            Some(EquitySection::Shareholders(_)) => {
                errors.push(ErrorKey::UnexpectedData, base.field("capital_and_reserves"));
            }
            None => errors.push(ErrorKey::MandatoryElementMissing, base.field("members_funds")),
        }
    }

    fn validate_share_equity(
        &self,
        sheet: &BalanceSheet,
        base: &JsonPath,
        total_net_assets: Option<i64>,
        errors: &mut Errors,
    ) {
        match &sheet.equity {
            Some(EquitySection::Shareholders(capital)) => {
                validate_capital_and_reserves(capital, base, total_net_assets, errors);
            }
            Some(EquitySection::Members(_)) => {
                errors.push(ErrorKey::UnexpectedData, base.field("members_funds"));
            }
            None => errors.push(
                ErrorKey::MandatoryElementMissing,
                base.field("capital_and_reserves"),
            ),
        }
    }
}

fn validate_members_funds(
    members: &MembersFunds,
    base: &JsonPath,
    total_net_assets: Option<i64>,
    errors: &mut Errors,
) {
    let path = base.field("members_funds").field("total_members_funds");
    let consistent = validate_aggregate_total(
        members.total_members_funds,
        sum_present(&[members.profit_and_loss_account]),
        &path,
        errors,
    );
    if consistent && members.total_members_funds != total_net_assets {
        errors.push(ErrorKey::MembersFundsMismatch, path);
    }
}

fn validate_capital_and_reserves(
    capital: &CapitalAndReserves,
    base: &JsonPath,
    total_net_assets: Option<i64>,
    errors: &mut Errors,
) {
    let path = base
        .field("capital_and_reserves")
        .field("total_shareholders_funds");
    let consistent = validate_aggregate_total(
        capital.total_shareholders_funds,
        sum_present(&[
            capital.called_up_share_capital,
            capital.share_premium_account,
            capital.other_reserves,
            capital.profit_and_loss,
        ]),
        &path,
        errors,
    );
    if consistent && capital.total_shareholders_funds != total_net_assets {
        errors.push(ErrorKey::ShareholdersMismatch, path);
    }
}

// ---------------------------------------------------------------------------
// Period resources
// ---------------------------------------------------------------------------

fn validate_period_resource(
    period: Period,
    resource: &PeriodResource,
    ctx: &ValidationContext<'_>,
) -> Result<Errors, DataError> {
    let root = JsonPath::root(period.key());
    let filer = ctx.filer_classification(period.key())?;
    let mut errors = Errors::new();

    if period == Period::Previous && !filer.is_multiple_year_filer {
        errors.push(ErrorKey::InconsistentData, root);
        return Ok(errors);
    }

    let path = root.field("balance_sheet");
    match &resource.balance_sheet {
        Some(sheet) => BalanceSheetValidator.validate(sheet, &path, filer.is_lbg, &mut errors),
        None => errors.push(ErrorKey::MandatoryElementMissing, path),
    }
    Ok(errors)
}

/// `current-period` resource.
pub struct CurrentPeriodValidator;

impl ResourceValidator for CurrentPeriodValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::CurrentPeriod
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::CurrentPeriod(period) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        validate_period_resource(Period::Current, period, ctx)
    }
}

/// `previous-period` resource; only multiple-year filers may submit one.
pub struct PreviousPeriodValidator;

impl ResourceValidator for PreviousPeriodValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::PreviousPeriod
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::PreviousPeriod(period) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        validate_period_resource(Period::Previous, period, ctx)
    }
}

// ---------------------------------------------------------------------------
// Profit and loss
// ---------------------------------------------------------------------------

/// Profit and loss account of one period.
pub struct ProfitAndLossValidator {
    period: Period,
}

impl ProfitAndLossValidator {
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    fn check(
        &self,
        pl: &ProfitAndLoss,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let root = JsonPath::root("profit_and_loss");
        let mut errors = Errors::new();

        if self.period == Period::Previous {
            let filer = ctx.filer_classification("profit_and_loss")?;
            if !filer.is_multiple_year_filer {
                errors.push(ErrorKey::InconsistentData, root);
                return Ok(errors);
            }
        }

        let gross = pl.gross_profit_or_loss.clone().unwrap_or_default();
        let operating = pl.operating_profit_or_loss.clone().unwrap_or_default();
        let before_tax = pl.profit_or_loss_before_tax.clone().unwrap_or_default();
        let for_year = pl
            .profit_or_loss_for_financial_year
            .clone()
            .unwrap_or_default();

        let expected_gross = match ctx.config.gross_profit_convention {
            GrossProfitConvention::TurnoverLessCostOfSales => {
                net_present(&[gross.turnover], &[gross.cost_of_sales])
            }
            GrossProfitConvention::TurnoverPlusCostOfSales => {
                net_present(&[gross.turnover, gross.cost_of_sales], &[])
            }
        };
        validate_aggregate_total(
            gross.gross_total,
            expected_gross,
            &root.field("gross_profit_or_loss").field("gross_total"),
            &mut errors,
        );

        validate_aggregate_total(
            operating.operating_total,
            net_present(
                &[gross.gross_total, operating.other_operating_income],
                &[
                    operating.distribution_costs,
                    operating.administrative_expenses,
                ],
            ),
            &root.field("operating_profit_or_loss").field("operating_total"),
            &mut errors,
        );

        validate_aggregate_total(
            before_tax.total_profit_or_loss_before_tax,
            net_present(
                &[
                    operating.operating_total,
                    before_tax.interest_receivable_and_similar_income,
                ],
                &[before_tax.interest_payable_and_similar_charges],
            ),
            &root
                .field("profit_or_loss_before_tax")
                .field("total_profit_or_loss_before_tax"),
            &mut errors,
        );

        validate_aggregate_total(
            for_year.total_profit_or_loss_for_financial_year,
            net_present(&[before_tax.total_profit_or_loss_before_tax], &[for_year.tax]),
            &root
                .field("profit_or_loss_for_financial_year")
                .field("total_profit_or_loss_for_financial_year"),
            &mut errors,
        );

        Ok(errors)
    }
}

impl ResourceValidator for ProfitAndLossValidator {
    fn kind(&self) -> ResourceKind {
        match self.period {
            Period::Current => ResourceKind::CurrentPeriodProfitAndLoss,
            Period::Previous => ResourceKind::PreviousPeriodProfitAndLoss,
        }
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ((Period::Current, ResourceBody::CurrentPeriodProfitAndLoss(pl))
        | (Period::Previous, ResourceBody::PreviousPeriodProfitAndLoss(pl))) =
            (self.period, resource)
        else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        self.check(pl, ctx)
    }
}
