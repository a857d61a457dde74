//! Shared test helper functions for constructing test fixtures.
//!
//! This module is compiled only in test builds and provides common
//! constructors for filer classifications, balance sheets, transaction
//! contexts and gateways used across unit test modules throughout
//! `accval-core`.
//!
//! Integration tests in `crates/accval-core/tests/` define their own local
//! helpers because they link against the non-test library build where this
//! module is not available.
#![allow(clippy::expect_used)]

use chrono::NaiveDate;

use crate::balance_sheet::{BalanceSheet, CurrentAssets, FixedAssets, OtherLiabilitiesOrAssets};
use crate::newtypes::{CompanyAccountId, CompanyNumber, TransactionId};
use crate::reports::{Director, Secretary};
use crate::validation::gateway::{
    AccountFixture, AccountsGateway, FilerClassification, GatewayError, StaticGateway,
};
use crate::validation::{Errors, TransactionContext, ValidationConfig, ValidationContext};

pub const COMPANY: &str = "01234567";
pub const ACCOUNT: &str = "acc-1";

/// Parses an ISO date, panicking on invalid input (test-only).
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn company_number() -> CompanyNumber {
    CompanyNumber::try_from(COMPANY).expect("valid CompanyNumber")
}

pub fn account_id() -> CompanyAccountId {
    CompanyAccountId::try_from(ACCOUNT).expect("valid CompanyAccountId")
}

pub fn transaction() -> TransactionContext {
    TransactionContext {
        transaction_id: TransactionId::try_from("tx-1").expect("valid TransactionId"),
        company_number: company_number(),
        company_account_id: account_id(),
    }
}

/// A filer whose period runs 2023-04-01 to 2024-03-31.
pub fn filer(multiple_year: bool, lbg: bool) -> FilerClassification {
    FilerClassification {
        is_multiple_year_filer: multiple_year,
        is_cic: false,
        is_lbg: lbg,
        period_start_on: date("2023-04-01"),
        period_end_on: date("2024-03-31"),
    }
}

/// A gateway holding one company profile and one account.
pub fn gateway(classification: FilerClassification, fixture: AccountFixture) -> StaticGateway {
    StaticGateway::new()
        .with_company(company_number(), classification)
        .with_account(account_id(), fixture)
}

/// A gateway holding only balance sheets.
pub fn sheets_gateway(
    classification: FilerClassification,
    current: Option<BalanceSheet>,
    previous: Option<BalanceSheet>,
) -> StaticGateway {
    gateway(
        classification,
        AccountFixture {
            current_period_balance_sheet: current,
            previous_period_balance_sheet: previous,
            ..AccountFixture::default()
        },
    )
}

/// A gateway holding only directors and a secretary.
pub fn officers_gateway(
    classification: FilerClassification,
    directors: Vec<Director>,
    secretary: Option<Secretary>,
) -> StaticGateway {
    gateway(
        classification,
        AccountFixture {
            directors,
            secretary,
            ..AccountFixture::default()
        },
    )
}

pub fn director(name: &str, appointed: Option<&str>, resigned: Option<&str>) -> Director {
    Director {
        name: Some(name.to_owned()),
        appointment_date: appointed.map(date),
        resignation_date: resigned.map(date),
    }
}

pub fn sheet_with_current_assets(current_assets: CurrentAssets) -> BalanceSheet {
    BalanceSheet {
        current_assets: Some(current_assets),
        ..BalanceSheet::default()
    }
}

pub fn sheet_with_stocks(stocks: i64) -> BalanceSheet {
    sheet_with_current_assets(CurrentAssets {
        stocks: Some(stocks),
        ..CurrentAssets::default()
    })
}

pub fn sheet_with_other(other: OtherLiabilitiesOrAssets) -> BalanceSheet {
    BalanceSheet {
        other_liabilities_or_assets: Some(other),
        ..BalanceSheet::default()
    }
}

pub fn sheet_with_fixed(fixed: FixedAssets) -> BalanceSheet {
    BalanceSheet {
        fixed_assets: Some(fixed),
        ..BalanceSheet::default()
    }
}

/// Runs `f` with a context over `gateway` and the default configuration.
pub fn with_ctx<T>(
    gateway: &dyn AccountsGateway,
    f: impl FnOnce(&ValidationContext<'_>) -> T,
) -> T {
    with_ctx_config(gateway, &ValidationConfig::default(), f)
}

pub fn with_ctx_config<T>(
    gateway: &dyn AccountsGateway,
    config: &ValidationConfig,
    f: impl FnOnce(&ValidationContext<'_>) -> T,
) -> T {
    let tx = transaction();
    let ctx = ValidationContext::new(&tx, gateway, config);
    f(&ctx)
}

/// `(key, location)` pairs of an error collection, in order.
pub fn keys(errors: &Errors) -> Vec<(&'static str, String)> {
    errors
        .iter()
        .map(|e| (e.error.code(), e.location.to_string()))
        .collect()
}

/// A gateway whose every call fails as unavailable.
pub struct FailingGateway;

impl AccountsGateway for FailingGateway {
    fn filer_classification(
        &self,
        _company_number: &CompanyNumber,
    ) -> Result<FilerClassification, GatewayError> {
        Err(GatewayError::Unavailable("profile service down".to_owned()))
    }

    fn current_period_balance_sheet(
        &self,
        _account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        Err(GatewayError::Unavailable("accounts store down".to_owned()))
    }

    fn previous_period_balance_sheet(
        &self,
        _account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        Err(GatewayError::Unavailable("accounts store down".to_owned()))
    }

    fn directors(&self, _account: &CompanyAccountId) -> Result<Vec<Director>, GatewayError> {
        Err(GatewayError::Unavailable("officers store down".to_owned()))
    }

    fn secretary(&self, _account: &CompanyAccountId) -> Result<Option<Secretary>, GatewayError> {
        Err(GatewayError::Unavailable("officers store down".to_owned()))
    }
}
