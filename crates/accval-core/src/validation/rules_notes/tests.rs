#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use super::*;
use crate::balance_sheet::{CurrentAssets, FixedAssets, OtherLiabilitiesOrAssets};
use crate::notes::{
    AccountingPolicies, CurrentAssetsInvestments, EmployeesCurrentPeriod, EmployeesPreviousPeriod,
    FixedAssetsInvestments, OffBalanceSheetArrangements,
};
use crate::test_helpers::{
    FailingGateway, filer, keys, sheet_with_current_assets, sheet_with_fixed, sheet_with_other,
    sheet_with_stocks, sheets_gateway, with_ctx, with_ctx_config,
};
use crate::validation::ValidationConfig;
use crate::validation::gateway::StaticGateway;

fn stocks_period(stocks: Option<i64>, payments: Option<i64>, total: Option<i64>) -> StocksPeriod {
    StocksPeriod {
        stocks,
        payments_on_account: payments,
        total,
    }
}

fn run(validator: &dyn NoteValidator, note: &NoteBody, gw: &StaticGateway) -> Errors {
    with_ctx(gw, |ctx| validator.validate(note, ctx)).expect("no data error")
}

// ---------------------------------------------------------------------------
// Stocks
// ---------------------------------------------------------------------------

#[test]
fn stocks_consistent_single_year_filer_is_valid() {
    let gw = sheets_gateway(filer(false, false), Some(sheet_with_stocks(150)), None);
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(100), Some(50), Some(150))),
        previous_period: None,
    });
    assert!(run(&StocksValidator, &note, &gw).is_empty());
}

#[test]
fn stocks_incorrect_total_is_reported_once() {
    let gw = sheets_gateway(filer(false, false), Some(sheet_with_stocks(150)), None);
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(100), Some(50), Some(140))),
        previous_period: None,
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![("incorrect_total", "$.stocks.current_period.total".to_owned())]
    );
}

#[test]
fn stocks_total_differs_from_balance_sheet() {
    let gw = sheets_gateway(filer(false, false), Some(sheet_with_stocks(200)), None);
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(100), Some(50), Some(150))),
        previous_period: None,
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "value_not_equal_to_current_period_on_balance_sheet",
            "$.stocks.current_period.total".to_owned()
        )]
    );
}

#[test]
fn stocks_empty_note_without_balance_sheet_is_empty_resource() {
    let gw = sheets_gateway(filer(true, false), None, None);
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(StocksPeriod::default()),
        previous_period: None,
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(keys(&errors), vec![("empty_resource", "$.stocks".to_owned())]);
}

#[test]
fn stocks_note_without_balance_sheet_line_is_unexpected() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_current_assets(CurrentAssets {
            debtors: Some(5),
            ..CurrentAssets::default()
        })),
        None,
    );
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(10), None, Some(10))),
        previous_period: None,
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![("unexpected_data", "$.stocks.current_period".to_owned())]
    );
}

#[test]
fn stocks_previous_period_rejected_for_single_year_filer() {
    let gw = sheets_gateway(filer(false, false), Some(sheet_with_stocks(150)), None);
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(100), Some(50), Some(150))),
        previous_period: Some(stocks_period(Some(80), None, Some(80))),
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![
            ("inconsistent_data", "$.stocks.previous_period.stocks".to_owned()),
            ("inconsistent_data", "$.stocks.previous_period.total".to_owned()),
        ]
    );
}

#[test]
fn stocks_previous_period_validated_for_multiple_year_filer() {
    let gw = sheets_gateway(
        filer(true, false),
        Some(sheet_with_stocks(150)),
        Some(sheet_with_stocks(90)),
    );
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(100), Some(50), Some(150))),
        previous_period: Some(stocks_period(Some(80), None, Some(80))),
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "value_not_equal_to_previous_period_on_balance_sheet",
            "$.stocks.previous_period.total".to_owned()
        )]
    );
}

#[test]
fn stocks_multiple_year_filer_missing_previous_note() {
    let gw = sheets_gateway(
        filer(true, false),
        Some(sheet_with_stocks(150)),
        Some(sheet_with_stocks(90)),
    );
    let note = NoteBody::Stocks(Stocks {
        current_period: Some(stocks_period(Some(150), None, Some(150))),
        previous_period: None,
    });
    let errors = run(&StocksValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "mandatory_element_missing",
            "$.stocks.previous_period".to_owned()
        )]
    );
}

#[test]
fn stocks_rejects_other_note_body() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let note = NoteBody::Debtors(Debtors::default());
    let err = with_ctx(&gw, |ctx| StocksValidator.validate(&note, ctx)).expect_err("mismatch");
    assert!(matches!(err, DataError::BodyMismatch { .. }));
}

#[test]
fn stocks_propagates_gateway_failure() {
    let note = NoteBody::Stocks(Stocks::default());
    let err = with_ctx(&FailingGateway, |ctx| StocksValidator.validate(&note, ctx))
        .expect_err("fetch failure");
    match err {
        DataError::Fetch { resource, what, .. } => {
            assert_eq!(resource, "stocks");
            assert_eq!(what, "filer classification");
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Debtors and creditors
// ---------------------------------------------------------------------------

#[test]
fn debtors_greater_than_one_year_is_not_summed() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_current_assets(CurrentAssets {
            debtors: Some(30),
            ..CurrentAssets::default()
        })),
        None,
    );
    let note = NoteBody::Debtors(Debtors {
        current_period: Some(DebtorsCurrentPeriod {
            trade_debtors: Some(10),
            prepayments_and_accrued_income: Some(5),
            other_debtors: Some(15),
            greater_than_one_year: Some(7),
            total: Some(30),
            details: Some("Amounts owed by group undertakings".to_owned()),
        }),
        previous_period: None,
    });
    assert!(run(&DebtorsValidator, &note, &gw).is_empty());
}

#[test]
fn debtors_details_length_is_bounded() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_current_assets(CurrentAssets {
            debtors: Some(1),
            ..CurrentAssets::default()
        })),
        None,
    );
    let note = NoteBody::Debtors(Debtors {
        current_period: Some(DebtorsCurrentPeriod {
            trade_debtors: Some(1),
            total: Some(1),
            details: Some("x".repeat(11)),
            ..DebtorsCurrentPeriod::default()
        }),
        previous_period: None,
    });
    let config = ValidationConfig {
        max_text_length: 10,
        ..ValidationConfig::default()
    };
    let errors = with_ctx_config(&gw, &config, |ctx| DebtorsValidator.validate(&note, ctx))
        .expect("no data error");
    assert_eq!(
        keys(&errors),
        vec![(
            "max_length_exceeded",
            "$.debtors.current_period.details".to_owned()
        )]
    );
}

#[test]
fn creditors_within_balance_sheet_present_note_absent() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_other(OtherLiabilitiesOrAssets {
            creditors_due_within_one_year: Some(500),
            ..OtherLiabilitiesOrAssets::default()
        })),
        None,
    );
    let note = NoteBody::CreditorsWithinOneYear(CreditorsWithinOneYear::default());
    let errors = run(&CreditorsWithinOneYearValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "mandatory_element_missing",
            "$.creditors_within_one_year.current_period".to_owned()
        )]
    );
}

#[test]
fn creditors_within_sums_all_six_components() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_other(OtherLiabilitiesOrAssets {
            creditors_due_within_one_year: Some(21),
            ..OtherLiabilitiesOrAssets::default()
        })),
        None,
    );
    let note = NoteBody::CreditorsWithinOneYear(CreditorsWithinOneYear {
        current_period: Some(CreditorsWithinOneYearCurrentPeriod {
            bank_loans_and_overdrafts: Some(1),
            finance_leases_and_hire_purchase_contracts: Some(2),
            trade_creditors: Some(3),
            taxation_and_social_security: Some(4),
            accruals_and_deferred_income: Some(5),
            other_creditors: Some(6),
            total: Some(21),
            details: None,
        }),
        previous_period: None,
    });
    assert!(run(&CreditorsWithinOneYearValidator, &note, &gw).is_empty());
}

#[test]
fn creditors_after_reconciles_with_its_own_line() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_other(OtherLiabilitiesOrAssets {
            creditors_due_within_one_year: Some(999),
            creditors_after_one_year: Some(40),
            ..OtherLiabilitiesOrAssets::default()
        })),
        None,
    );
    let note = NoteBody::CreditorsAfterOneYear(CreditorsAfterOneYear {
        current_period: Some(CreditorsAfterOneYearCurrentPeriod {
            bank_loans_and_overdrafts: Some(40),
            total: Some(40),
            ..CreditorsAfterOneYearCurrentPeriod::default()
        }),
        previous_period: None,
    });
    assert!(run(&CreditorsAfterOneYearValidator, &note, &gw).is_empty());
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[test]
fn employees_empty_is_empty_resource() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let note = NoteBody::Employees(Employees::default());
    let errors = run(&EmployeesValidator, &note, &gw);
    assert_eq!(keys(&errors), vec![("empty_resource", "$.employees".to_owned())]);
}

#[test]
fn employees_average_out_of_range() {
    let gw = sheets_gateway(filer(true, false), None, None);
    let note = NoteBody::Employees(Employees {
        current_period: Some(EmployeesCurrentPeriod {
            average_number_of_employees: Some(100_000),
            details: None,
        }),
        previous_period: Some(EmployeesPreviousPeriod {
            average_number_of_employees: Some(-1),
        }),
    });
    let errors = run(&EmployeesValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![
            (
                "value_outside_range",
                "$.employees.current_period.average_number_of_employees".to_owned()
            ),
            (
                "value_outside_range",
                "$.employees.previous_period.average_number_of_employees".to_owned()
            ),
        ]
    );
}

#[test]
fn employees_previous_period_gated() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let note = NoteBody::Employees(Employees {
        current_period: Some(EmployeesCurrentPeriod {
            average_number_of_employees: Some(12),
            details: None,
        }),
        previous_period: Some(EmployeesPreviousPeriod {
            average_number_of_employees: Some(10),
        }),
    });
    let errors = run(&EmployeesValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "inconsistent_data",
            "$.employees.previous_period.average_number_of_employees".to_owned()
        )]
    );
}

// ---------------------------------------------------------------------------
// Investments and text notes
// ---------------------------------------------------------------------------

#[test]
fn fixed_assets_investments_required_when_line_present() {
    let gw = sheets_gateway(
        filer(false, false),
        Some(sheet_with_fixed(FixedAssets {
            investments: Some(10),
            total: Some(10),
            ..FixedAssets::default()
        })),
        None,
    );
    let note = NoteBody::FixedAssetsInvestments(FixedAssetsInvestments { details: None });
    let errors = run(&FixedAssetsInvestmentsValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "mandatory_element_missing",
            "$.fixed_assets_investments.details".to_owned()
        )]
    );
}

#[test]
fn fixed_assets_investments_line_in_previous_sheet_counts_for_multi_year() {
    let gw = sheets_gateway(
        filer(true, false),
        None,
        Some(sheet_with_fixed(FixedAssets {
            investments: Some(10),
            ..FixedAssets::default()
        })),
    );
    let note = NoteBody::FixedAssetsInvestments(FixedAssetsInvestments {
        details: Some("Shares in subsidiary".to_owned()),
    });
    assert!(run(&FixedAssetsInvestmentsValidator, &note, &gw).is_empty());
}

#[test]
fn current_assets_investments_unexpected_without_line() {
    let gw = sheets_gateway(filer(false, false), Some(sheet_with_stocks(1)), None);
    let note = NoteBody::CurrentAssetsInvestments(CurrentAssetsInvestments {
        details: Some("Listed investments".to_owned()),
    });
    let errors = run(&CurrentAssetsInvestmentsValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "unexpected_data",
            "$.current_assets_investments.details".to_owned()
        )]
    );
}

#[test]
fn accounting_policies_requires_basis() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let note = NoteBody::AccountingPolicies(AccountingPolicies {
        turnover_policy: Some("Recognised on delivery".to_owned()),
        ..AccountingPolicies::default()
    });
    let errors = run(&AccountingPoliciesValidator, &note, &gw);
    assert_eq!(
        keys(&errors),
        vec![(
            "value_required",
            "$.accounting_policies.basis_of_measurement_and_preparation".to_owned()
        )]
    );
}

#[test]
fn off_balance_sheet_requires_details() {
    let gw = sheets_gateway(filer(false, false), None, None);
    let ok = NoteBody::OffBalanceSheetArrangements(OffBalanceSheetArrangements {
        details: Some("None".to_owned()),
    });
    assert!(run(&OffBalanceSheetArrangementsValidator, &ok, &gw).is_empty());

    let blank = NoteBody::OffBalanceSheetArrangements(OffBalanceSheetArrangements {
        details: Some(String::new()),
    });
    let errors = run(&OffBalanceSheetArrangementsValidator, &blank, &gw);
    assert!(errors.contains(
        ErrorKey::ValueRequired,
        "$.off_balance_sheet_arrangements.details"
    ));
}
