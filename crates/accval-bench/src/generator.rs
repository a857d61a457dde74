//! Filing generator.
//!
//! Produces internally consistent small-full filings: a balance sheet whose
//! running totals reconcile, notes that agree with it, a profit and loss
//! account, and approvals dated after the period end. Every generated
//! submission validates without errors under the default configuration.

use accval_core::balance_sheet::{
    GrossProfitOrLoss, OperatingProfitOrLoss, ProfitOrLossBeforeTax, ProfitOrLossForFinancialYear,
};
use accval_core::notes::{
    CreditorsAfterOneYear, CreditorsAfterOneYearCurrentPeriod, CreditorsWithinOneYear,
    CreditorsWithinOneYearCurrentPeriod, Debtors, DebtorsCurrentPeriod, Stocks, StocksPeriod,
};
use accval_core::reports::{Approval, DirectorsApproval};
use accval_core::{
    AccountFixture, BalanceSheet, CapitalAndReserves, CompanyAccountId, CompanyNumber,
    CurrentAssets, Director, EquitySection, FilerClassification, FixedAssets, MembersFunds,
    NewtypeError, NoteBody, NoteKind, OtherLiabilitiesOrAssets, PeriodResource, ProfitAndLoss,
    ResourceBody, ResourceKind, StaticGateway, Submission, SubmissionKind, TransactionContext,
    TransactionId,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Configuration for the filing generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of filings, one company each.
    pub num_filings: usize,
    /// Fraction of companies limited by guarantee (0.0-1.0).
    pub lbg_fraction: f64,
    /// Upper bound of each generated component figure.
    pub max_figure: i64,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 10 filings.
    Small,
    /// 100 filings.
    Medium,
    /// 1000 filings.
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let num_filings = match self {
            SizeTier::Small => 10,
            SizeTier::Medium => 100,
            SizeTier::Large => 1000,
        };
        GeneratorConfig {
            seed,
            num_filings,
            lbg_fraction: 0.2,
            max_figure: 1_000_000,
        }
    }
}

/// One company's filing: its identity, the sibling data the gateway
/// serves, and every body submitted for it.
#[derive(Debug, Clone)]
pub struct Filing {
    pub transaction: TransactionContext,
    pub gateway: StaticGateway,
    pub submissions: Vec<Submission>,
    /// The same submissions as `(kind, JSON body)` pairs.
    pub bodies: Vec<(SubmissionKind, String)>,
}

/// Failure to build a filing.
#[derive(Debug)]
pub enum GeneratorError {
    Identifier(NewtypeError),
    Json(serde_json::Error),
}

impl From<NewtypeError> for GeneratorError {
    fn from(err: NewtypeError) -> Self {
        Self::Identifier(err)
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Generates `config.num_filings` consistent filings.
///
/// # Errors
///
/// Returns [`GeneratorError`] if an identifier or body cannot be built.
pub fn generate_filings(config: &GeneratorConfig) -> Result<Vec<Filing>, GeneratorError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.num_filings)
        .map(|index| generate_filing(&mut rng, config, index))
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

struct Builder {
    submissions: Vec<Submission>,
    bodies: Vec<(SubmissionKind, String)>,
}

impl Builder {
    fn note<T: Serialize>(
        &mut self,
        kind: NoteKind,
        body: T,
        wrap: fn(T) -> NoteBody,
    ) -> Result<(), serde_json::Error> {
        self.bodies
            .push((SubmissionKind::Note(kind), serde_json::to_string(&body)?));
        self.submissions.push(Submission::Note(wrap(body)));
        Ok(())
    }

    fn resource<T: Serialize>(
        &mut self,
        kind: ResourceKind,
        body: T,
        wrap: fn(T) -> ResourceBody,
    ) -> Result<(), serde_json::Error> {
        self.bodies
            .push((SubmissionKind::Resource(kind), serde_json::to_string(&body)?));
        self.submissions.push(Submission::Resource(wrap(body)));
        Ok(())
    }
}

fn generate_filing(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    index: usize,
) -> Result<Filing, GeneratorError> {
    let is_lbg = rng.gen_bool(config.lbg_fraction);
    let mut figure = || rng.gen_range(0..=config.max_figure);

    // Notes.
    let mut stocks = StocksPeriod {
        stocks: Some(figure()),
        payments_on_account: Some(figure()),
        total: None,
    };
    stocks.total = Some(sum(&[stocks.stocks, stocks.payments_on_account]));
    let mut debtors = DebtorsCurrentPeriod {
        trade_debtors: Some(figure()),
        prepayments_and_accrued_income: Some(figure()),
        other_debtors: Some(figure()),
        greater_than_one_year: Some(figure()),
        ..DebtorsCurrentPeriod::default()
    };
    debtors.total = Some(sum(&[
        debtors.trade_debtors,
        debtors.prepayments_and_accrued_income,
        debtors.other_debtors,
    ]));
    let mut within = CreditorsWithinOneYearCurrentPeriod {
        bank_loans_and_overdrafts: Some(figure()),
        finance_leases_and_hire_purchase_contracts: Some(figure()),
        trade_creditors: Some(figure()),
        taxation_and_social_security: Some(figure()),
        accruals_and_deferred_income: Some(figure()),
        other_creditors: Some(figure()),
        ..CreditorsWithinOneYearCurrentPeriod::default()
    };
    within.total = Some(sum(&[
        within.bank_loans_and_overdrafts,
        within.finance_leases_and_hire_purchase_contracts,
        within.trade_creditors,
        within.taxation_and_social_security,
        within.accruals_and_deferred_income,
        within.other_creditors,
    ]));
    let mut after = CreditorsAfterOneYearCurrentPeriod {
        bank_loans_and_overdrafts: Some(figure()),
        finance_leases_and_hire_purchase_contracts: Some(figure()),
        other_creditors: Some(figure()),
        ..CreditorsAfterOneYearCurrentPeriod::default()
    };
    after.total = Some(sum(&[
        after.bank_loans_and_overdrafts,
        after.finance_leases_and_hire_purchase_contracts,
        after.other_creditors,
    ]));

    // Balance sheet running totals.
    let mut fixed = FixedAssets {
        tangible: Some(figure()),
        intangible: Some(figure()),
        investments: Some(figure()),
        total: None,
    };
    fixed.total = Some(sum(&[fixed.tangible, fixed.intangible, fixed.investments]));
    let mut current = CurrentAssets {
        stocks: stocks.total,
        debtors: debtors.total,
        cash_at_bank_and_in_hand: Some(figure()),
        investments: Some(figure()),
        total: None,
    };
    current.total = Some(sum(&current.components()));

    let not_paid = (!is_lbg).then(|| figure() / 100);
    let prepayments = figure();
    let accruals = figure();
    let provision = figure();
    let net_current_assets = sum(&[current.total, Some(prepayments)]) - sum(&[within.total]);
    let talcl = sum(&[fixed.total, Some(net_current_assets), not_paid]);
    let total_net_assets = talcl - sum(&[after.total, Some(accruals), Some(provision)]);
    let other = OtherLiabilitiesOrAssets {
        prepayments_and_accrued_income: Some(prepayments),
        creditors_due_within_one_year: within.total,
        net_current_assets: Some(net_current_assets),
        total_assets_less_current_liabilities: Some(talcl),
        creditors_after_one_year: after.total,
        accruals_and_deferred_income: Some(accruals),
        provision_for_liabilities: Some(provision),
        total_net_assets: Some(total_net_assets),
    };

    let equity = if is_lbg {
        EquitySection::Members(MembersFunds {
            profit_and_loss_account: Some(total_net_assets),
            total_members_funds: Some(total_net_assets),
        })
    } else {
        let called_up = figure() / 10;
        let premium = figure() / 10;
        let reserves = figure() / 10;
        EquitySection::Shareholders(CapitalAndReserves {
            called_up_share_capital: Some(called_up),
            share_premium_account: Some(premium),
            other_reserves: Some(reserves),
            profit_and_loss: Some(total_net_assets - called_up - premium - reserves),
            total_shareholders_funds: Some(total_net_assets),
        })
    };
    let sheet = BalanceSheet {
        called_up_share_capital_not_paid: not_paid,
        fixed_assets: Some(fixed),
        current_assets: Some(current),
        other_liabilities_or_assets: Some(other),
        equity: Some(equity),
    };

    let profit_and_loss = profit_and_loss(&mut figure);

    // Identity and sibling data.
    let transaction = TransactionContext {
        transaction_id: TransactionId::try_from(format!("tx-{index}").as_str())?,
        company_number: CompanyNumber::try_from(format!("{:08}", index + 1).as_str())?,
        company_account_id: CompanyAccountId::try_from(format!("acc-{index}").as_str())?,
    };
    let director_name = format!("Director {index}");
    let gateway = StaticGateway::new()
        .with_company(
            transaction.company_number.clone(),
            FilerClassification {
                is_multiple_year_filer: false,
                is_cic: false,
                is_lbg,
                period_start_on: date(2023, 4, 1),
                period_end_on: date(2024, 3, 31),
            },
        )
        .with_account(
            transaction.company_account_id.clone(),
            AccountFixture {
                current_period_balance_sheet: Some(sheet.clone()),
                directors: vec![Director {
                    name: Some(director_name.clone()),
                    appointment_date: Some(date(2020, 1, 6)),
                    resignation_date: None,
                }],
                ..AccountFixture::default()
            },
        );

    let mut builder = Builder {
        submissions: Vec::new(),
        bodies: Vec::new(),
    };
    builder.note(
        NoteKind::Stocks,
        Stocks {
            current_period: Some(stocks),
            previous_period: None,
        },
        NoteBody::Stocks,
    )?;
    builder.note(
        NoteKind::Debtors,
        Debtors {
            current_period: Some(debtors),
            previous_period: None,
        },
        NoteBody::Debtors,
    )?;
    builder.note(
        NoteKind::CreditorsWithinOneYear,
        CreditorsWithinOneYear {
            current_period: Some(within),
            previous_period: None,
        },
        NoteBody::CreditorsWithinOneYear,
    )?;
    builder.note(
        NoteKind::CreditorsAfterOneYear,
        CreditorsAfterOneYear {
            current_period: Some(after),
            previous_period: None,
        },
        NoteBody::CreditorsAfterOneYear,
    )?;
    builder.resource(
        ResourceKind::CurrentPeriod,
        PeriodResource {
            balance_sheet: Some(sheet),
        },
        ResourceBody::CurrentPeriod,
    )?;
    builder.resource(
        ResourceKind::CurrentPeriodProfitAndLoss,
        profit_and_loss,
        ResourceBody::CurrentPeriodProfitAndLoss,
    )?;
    builder.resource(
        ResourceKind::Approval,
        Approval {
            name: Some(director_name.clone()),
            date: Some(date(2024, 6, 28)),
        },
        ResourceBody::Approval,
    )?;
    builder.resource(
        ResourceKind::DirectorsApproval,
        DirectorsApproval {
            name: Some(director_name),
            date: Some(date(2024, 6, 28)),
        },
        ResourceBody::DirectorsApproval,
    )?;

    Ok(Filing {
        transaction,
        gateway,
        submissions: builder.submissions,
        bodies: builder.bodies,
    })
}

/// A profit and loss account whose subtotals follow
/// `TurnoverLessCostOfSales`.
fn profit_and_loss(figure: &mut impl FnMut() -> i64) -> ProfitAndLoss {
    let turnover = figure();
    let cost_of_sales = figure() / 2;
    let gross = turnover - cost_of_sales;
    let distribution = figure() / 10;
    let administrative = figure() / 10;
    let other_income = figure() / 20;
    let operating = gross - distribution - administrative + other_income;
    let receivable = figure() / 100;
    let payable = figure() / 100;
    let before_tax = operating + receivable - payable;
    let tax = before_tax.max(0) / 5;
    ProfitAndLoss {
        gross_profit_or_loss: Some(GrossProfitOrLoss {
            turnover: Some(turnover),
            cost_of_sales: Some(cost_of_sales),
            gross_total: Some(gross),
        }),
        operating_profit_or_loss: Some(OperatingProfitOrLoss {
            distribution_costs: Some(distribution),
            administrative_expenses: Some(administrative),
            other_operating_income: Some(other_income),
            operating_total: Some(operating),
        }),
        profit_or_loss_before_tax: Some(ProfitOrLossBeforeTax {
            interest_receivable_and_similar_income: Some(receivable),
            interest_payable_and_similar_charges: Some(payable),
            total_profit_or_loss_before_tax: Some(before_tax),
        }),
        profit_or_loss_for_financial_year: Some(ProfitOrLossForFinancialYear {
            tax: Some(tax),
            total_profit_or_loss_for_financial_year: Some(before_tax - tax),
        }),
    }
}

fn sum(figures: &[Option<i64>]) -> i64 {
    figures.iter().flatten().sum()
}
