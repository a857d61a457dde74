#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use super::*;
use crate::balance_sheet::{
    CurrentAssets, FixedAssets, GrossProfitOrLoss, OperatingProfitOrLoss, OtherLiabilitiesOrAssets,
    ProfitOrLossBeforeTax, ProfitOrLossForFinancialYear,
};
use crate::test_helpers::{
    FailingGateway, filer, keys, sheets_gateway, with_ctx, with_ctx_config,
};
use crate::validation::ValidationConfig;
use crate::validation::gateway::StaticGateway;

/// A reconciled sheet with net assets of 1400 and no equity section.
fn base_sheet() -> BalanceSheet {
    BalanceSheet {
        called_up_share_capital_not_paid: None,
        fixed_assets: Some(FixedAssets {
            tangible: Some(1000),
            total: Some(1000),
            ..FixedAssets::default()
        }),
        current_assets: Some(CurrentAssets {
            stocks: Some(200),
            debtors: Some(300),
            cash_at_bank_and_in_hand: Some(500),
            investments: None,
            total: Some(1000),
        }),
        other_liabilities_or_assets: Some(OtherLiabilitiesOrAssets {
            prepayments_and_accrued_income: Some(50),
            creditors_due_within_one_year: Some(400),
            net_current_assets: Some(650),
            total_assets_less_current_liabilities: Some(1650),
            creditors_after_one_year: Some(150),
            accruals_and_deferred_income: None,
            provision_for_liabilities: Some(100),
            total_net_assets: Some(1400),
        }),
        equity: None,
    }
}

fn shareholders(profit_and_loss: i64, total: i64) -> EquitySection {
    EquitySection::Shareholders(CapitalAndReserves {
        called_up_share_capital: Some(100),
        profit_and_loss: Some(profit_and_loss),
        total_shareholders_funds: Some(total),
        ..CapitalAndReserves::default()
    })
}

fn members(profit_and_loss: i64, total: i64) -> EquitySection {
    EquitySection::Members(MembersFunds {
        profit_and_loss_account: Some(profit_and_loss),
        total_members_funds: Some(total),
    })
}

fn share_sheet() -> BalanceSheet {
    BalanceSheet {
        equity: Some(shareholders(1300, 1400)),
        ..base_sheet()
    }
}

fn lbg_sheet() -> BalanceSheet {
    BalanceSheet {
        equity: Some(members(1400, 1400)),
        ..base_sheet()
    }
}

fn other_mut(sheet: &mut BalanceSheet) -> &mut OtherLiabilitiesOrAssets {
    sheet
        .other_liabilities_or_assets
        .get_or_insert_with(OtherLiabilitiesOrAssets::default)
}

fn check(sheet: &BalanceSheet, is_lbg: bool) -> Errors {
    let mut errors = Errors::new();
    BalanceSheetValidator.validate(sheet, &JsonPath::root("balance_sheet"), is_lbg, &mut errors);
    errors
}

fn run_resource(validator: &dyn ResourceValidator, body: &ResourceBody, gw: &StaticGateway) -> Errors {
    with_ctx(gw, |ctx| validator.validate(body, ctx)).expect("no data error")
}

fn current_period(sheet: Option<BalanceSheet>) -> ResourceBody {
    ResourceBody::CurrentPeriod(PeriodResource {
        balance_sheet: sheet,
    })
}

// ---------------------------------------------------------------------------
// Balance sheet arithmetic
// ---------------------------------------------------------------------------

#[test]
fn reconciled_share_company_sheet_is_valid() {
    let errors = check(&share_sheet(), false);
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn reconciled_lbg_sheet_is_valid() {
    let errors = check(&lbg_sheet(), true);
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn fixed_assets_total_must_match_components() {
    let mut sheet = share_sheet();
    if let Some(fixed) = sheet.fixed_assets.as_mut() {
        fixed.intangible = Some(10);
    }
    let errors = check(&sheet, false);
    assert!(errors.contains(ErrorKey::IncorrectTotal, "$.balance_sheet.fixed_assets.total"));
}

#[test]
fn current_assets_total_must_match_components() {
    let mut sheet = share_sheet();
    if let Some(current) = sheet.current_assets.as_mut() {
        current.total = Some(999);
    }
    let errors = check(&sheet, false);
    assert!(errors.contains(
        ErrorKey::IncorrectTotal,
        "$.balance_sheet.current_assets.total"
    ));
}

#[test]
fn net_current_assets_mandatory_once_current_assets_present() {
    let mut sheet = share_sheet();
    other_mut(&mut sheet).net_current_assets = None;
    let errors = check(&sheet, false);
    assert!(errors.contains(
        ErrorKey::MandatoryElementMissing,
        "$.balance_sheet.other_liabilities_or_assets.net_current_assets"
    ));
}

#[test]
fn total_assets_less_current_liabilities_mandatory_even_when_zero() {
    let sheet = BalanceSheet {
        current_assets: Some(CurrentAssets {
            cash_at_bank_and_in_hand: Some(0),
            total: Some(0),
            ..CurrentAssets::default()
        }),
        other_liabilities_or_assets: Some(OtherLiabilitiesOrAssets {
            net_current_assets: Some(0),
            ..OtherLiabilitiesOrAssets::default()
        }),
        equity: Some(shareholders(0, 0)),
        ..BalanceSheet::default()
    };
    let mut errors = check(&sheet, false);
    assert!(errors.contains(
        ErrorKey::MandatoryElementMissing,
        "$.balance_sheet.other_liabilities_or_assets.total_assets_less_current_liabilities"
    ));

    let mut complete = sheet;
    let other = other_mut(&mut complete);
    other.total_assets_less_current_liabilities = Some(0);
    other.total_net_assets = Some(0);
    errors = check(&complete, false);
    // share capital of 100 is not matched by any net assets
    assert_eq!(
        keys(&errors),
        vec![(
            "incorrect_total",
            "$.balance_sheet.capital_and_reserves.total_shareholders_funds".to_owned()
        )]
    );
}

#[test]
fn called_up_share_capital_not_paid_counts_for_share_companies() {
    let mut sheet = share_sheet();
    sheet.called_up_share_capital_not_paid = Some(10);
    let other = other_mut(&mut sheet);
    other.total_assets_less_current_liabilities = Some(1660);
    other.total_net_assets = Some(1410);
    sheet.equity = Some(shareholders(1310, 1410));
    let errors = check(&sheet, false);
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn total_net_assets_deducts_long_term_liabilities() {
    let mut sheet = share_sheet();
    other_mut(&mut sheet).accruals_and_deferred_income = Some(25);
    let errors = check(&sheet, false);
    assert!(errors.contains(
        ErrorKey::IncorrectTotal,
        "$.balance_sheet.other_liabilities_or_assets.total_net_assets"
    ));
}

// ---------------------------------------------------------------------------
// Equity branch
// ---------------------------------------------------------------------------

#[test]
fn lbg_called_up_share_capital_not_paid_is_unexpected() {
    let mut sheet = lbg_sheet();
    sheet.called_up_share_capital_not_paid = Some(10);
    let gw = sheets_gateway(filer(false, true), None, None);
    let errors = run_resource(&CurrentPeriodValidator, &current_period(Some(sheet)), &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "unexpected_data",
            "$.current_period.balance_sheet.called_up_share_capital_not_paid".to_owned()
        )]
    );
}

#[test]
fn lbg_capital_and_reserves_is_unexpected() {
    let errors = check(&share_sheet(), true);
    assert_eq!(
        keys(&errors),
        vec![(
            "unexpected_data",
            "$.balance_sheet.capital_and_reserves".to_owned()
        )]
    );
}

#[test]
fn lbg_without_members_funds_is_mandatory() {
    let errors = check(&base_sheet(), true);
    assert!(errors.contains(
        ErrorKey::MandatoryElementMissing,
        "$.balance_sheet.members_funds"
    ));
}

#[test]
fn members_funds_must_equal_total_net_assets() {
    let sheet = BalanceSheet {
        equity: Some(members(1300, 1300)),
        ..base_sheet()
    };
    let errors = check(&sheet, true);
    assert_eq!(
        keys(&errors),
        vec![(
            "membersFunds.mismatch",
            "$.balance_sheet.members_funds.total_members_funds".to_owned()
        )]
    );
}

#[test]
fn members_funds_total_must_match_profit_and_loss_account() {
    let sheet = BalanceSheet {
        equity: Some(members(1300, 1400)),
        ..base_sheet()
    };
    let errors = check(&sheet, true);
    assert_eq!(
        keys(&errors),
        vec![(
            "incorrect_total",
            "$.balance_sheet.members_funds.total_members_funds".to_owned()
        )]
    );
}

#[test]
fn share_company_members_funds_is_unexpected() {
    let errors = check(&lbg_sheet(), false);
    assert_eq!(
        keys(&errors),
        vec![("unexpected_data", "$.balance_sheet.members_funds".to_owned())]
    );
}

#[test]
fn share_company_without_capital_and_reserves_is_mandatory() {
    let errors = check(&base_sheet(), false);
    assert!(errors.contains(
        ErrorKey::MandatoryElementMissing,
        "$.balance_sheet.capital_and_reserves"
    ));
}

#[test]
fn shareholders_funds_must_equal_total_net_assets() {
    let sheet = BalanceSheet {
        equity: Some(shareholders(1200, 1300)),
        ..base_sheet()
    };
    let errors = check(&sheet, false);
    assert_eq!(
        keys(&errors),
        vec![(
            "shareholders.mismatch",
            "$.balance_sheet.capital_and_reserves.total_shareholders_funds".to_owned()
        )]
    );
}

// ---------------------------------------------------------------------------
// Period resources
// ---------------------------------------------------------------------------

#[test]
fn current_period_without_balance_sheet_is_mandatory() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let errors = run_resource(&CurrentPeriodValidator, &current_period(None), &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "mandatory_element_missing",
            "$.current_period.balance_sheet".to_owned()
        )]
    );
}

#[test]
fn previous_period_rejected_for_single_year_filer() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let body = ResourceBody::PreviousPeriod(PeriodResource {
        balance_sheet: Some(share_sheet()),
    });
    let errors = run_resource(&PreviousPeriodValidator, &body, &gw);
    assert_eq!(
        keys(&errors),
        vec![("inconsistent_data", "$.previous_period".to_owned())]
    );
}

#[test]
fn previous_period_paths_for_multiple_year_filer() {
    let gw = sheets_gateway(filer(true, false), None, None);
    let body = ResourceBody::PreviousPeriod(PeriodResource {
        balance_sheet: Some(base_sheet()),
    });
    let errors = run_resource(&PreviousPeriodValidator, &body, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "mandatory_element_missing",
            "$.previous_period.balance_sheet.capital_and_reserves".to_owned()
        )]
    );
}

#[test]
fn period_validator_rejects_other_body() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let body = ResourceBody::CurrentPeriodProfitAndLoss(ProfitAndLoss::default());
    let err = with_ctx(&gw, |ctx| CurrentPeriodValidator.validate(&body, ctx))
        .expect_err("body mismatch");
    assert!(matches!(err, DataError::BodyMismatch { .. }));
}

#[test]
fn period_validator_surfaces_fetch_failure() {
    let err = with_ctx(&FailingGateway, |ctx| {
        CurrentPeriodValidator.validate(&current_period(Some(share_sheet())), ctx)
    })
    .expect_err("fetch failure");
    match err {
        DataError::Fetch { resource, .. } => assert_eq!(resource, "current_period"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Profit and loss
// ---------------------------------------------------------------------------

/// Turnover 1000 less cost of sales 400, down to a profit of 250.
fn profit_and_loss() -> ProfitAndLoss {
    ProfitAndLoss {
        gross_profit_or_loss: Some(GrossProfitOrLoss {
            turnover: Some(1000),
            cost_of_sales: Some(400),
            gross_total: Some(600),
        }),
        operating_profit_or_loss: Some(OperatingProfitOrLoss {
            distribution_costs: Some(100),
            administrative_expenses: Some(200),
            other_operating_income: Some(50),
            operating_total: Some(350),
        }),
        profit_or_loss_before_tax: Some(ProfitOrLossBeforeTax {
            interest_receivable_and_similar_income: Some(10),
            interest_payable_and_similar_charges: Some(60),
            total_profit_or_loss_before_tax: Some(300),
        }),
        profit_or_loss_for_financial_year: Some(ProfitOrLossForFinancialYear {
            tax: Some(50),
            total_profit_or_loss_for_financial_year: Some(250),
        }),
    }
}

fn run_pl(period: Period, pl: ProfitAndLoss, gw: &StaticGateway, config: &ValidationConfig) -> Errors {
    let body = match period {
        Period::Current => ResourceBody::CurrentPeriodProfitAndLoss(pl),
        Period::Previous => ResourceBody::PreviousPeriodProfitAndLoss(pl),
    };
    with_ctx_config(gw, config, |ctx| {
        ProfitAndLossValidator::new(period).validate(&body, ctx)
    })
    .expect("no data error")
}

#[test]
fn profit_and_loss_chain_reconciles_under_default_convention() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let errors = run_pl(Period::Current, profit_and_loss(), &gw, &ValidationConfig::default());
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn gross_profit_under_additive_convention() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let config = ValidationConfig {
        gross_profit_convention: GrossProfitConvention::TurnoverPlusCostOfSales,
        ..ValidationConfig::default()
    };
    let errors = run_pl(Period::Current, profit_and_loss(), &gw, &config);
    assert_eq!(
        keys(&errors),
        vec![(
            "incorrect_total",
            "$.profit_and_loss.gross_profit_or_loss.gross_total".to_owned()
        )]
    );

    // cost of sales reported as a negative figure
    let mut pl = profit_and_loss();
    if let Some(gross) = pl.gross_profit_or_loss.as_mut() {
        gross.cost_of_sales = Some(-400);
    }
    let errors = run_pl(Period::Current, pl, &gw, &config);
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn operating_total_mismatch_is_reported() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let mut pl = profit_and_loss();
    if let Some(operating) = pl.operating_profit_or_loss.as_mut() {
        operating.administrative_expenses = Some(201);
    }
    let errors = run_pl(Period::Current, pl, &gw, &ValidationConfig::default());
    assert_eq!(
        keys(&errors),
        vec![(
            "incorrect_total",
            "$.profit_and_loss.operating_profit_or_loss.operating_total".to_owned()
        )]
    );
}

#[test]
fn tax_is_deducted_for_the_financial_year() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let mut pl = profit_and_loss();
    if let Some(year) = pl.profit_or_loss_for_financial_year.as_mut() {
        year.total_profit_or_loss_for_financial_year = Some(350);
    }
    let errors = run_pl(Period::Current, pl, &gw, &ValidationConfig::default());
    assert!(errors.contains(
        ErrorKey::IncorrectTotal,
        "$.profit_and_loss.profit_or_loss_for_financial_year.total_profit_or_loss_for_financial_year"
    ));
}

#[test]
fn previous_profit_and_loss_gated_for_single_year_filer() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let errors = run_pl(Period::Previous, profit_and_loss(), &gw, &ValidationConfig::default());
    assert_eq!(
        keys(&errors),
        vec![("inconsistent_data", "$.profit_and_loss".to_owned())]
    );

    let gw = sheets_gateway(filer(true, false), None, None);
    let errors = run_pl(Period::Previous, profit_and_loss(), &gw, &ValidationConfig::default());
    assert!(errors.is_empty(), "{:?}", keys(&errors));
}

#[test]
fn profit_and_loss_validator_rejects_other_period_body() {
    let gw = sheets_gateway(filer(true, false), None, None);
    let body = ResourceBody::PreviousPeriodProfitAndLoss(ProfitAndLoss::default());
    let err = with_ctx(&gw, |ctx| {
        ProfitAndLossValidator::new(Period::Current).validate(&body, ctx)
    })
    .expect_err("body mismatch");
    match err {
        DataError::BodyMismatch { expected, actual } => {
            assert_eq!(expected, ResourceKind::CurrentPeriodProfitAndLoss.into());
            assert_eq!(actual, ResourceKind::PreviousPeriodProfitAndLoss.into());
        }
        other => panic!("expected body mismatch, got {other:?}"),
    }
}

#[test]
fn profit_and_loss_validator_kind_follows_period() {
    assert_eq!(
        ProfitAndLossValidator::new(Period::Current).kind(),
        ResourceKind::CurrentPeriodProfitAndLoss
    );
    assert_eq!(
        ProfitAndLossValidator::new(Period::Previous).kind(),
        ResourceKind::PreviousPeriodProfitAndLoss
    );
}
