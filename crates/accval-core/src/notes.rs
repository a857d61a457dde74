//! Note sub-resources of the small-full accounts.
//!
//! Each note elaborates one balance-sheet line item. Notes with a
//! current/previous structure carry one optional sub-object per period; every
//! numeric field is optional so that "not submitted" and "zero" stay distinct.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StocksPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stocks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments_on_account: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stocks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period: Option<StocksPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<StocksPeriod>,
}

// ---------------------------------------------------------------------------
// Debtors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorsCurrentPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_debtors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayments_and_accrued_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_debtors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_one_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorsPreviousPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_debtors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayments_and_accrued_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_debtors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than_one_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debtors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period: Option<DebtorsCurrentPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<DebtorsPreviousPeriod>,
}

// ---------------------------------------------------------------------------
// Creditors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsWithinOneYearCurrentPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_loans_and_overdrafts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_leases_and_hire_purchase_contracts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxation_and_social_security: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accruals_and_deferred_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsWithinOneYearPreviousPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_loans_and_overdrafts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_leases_and_hire_purchase_contracts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxation_and_social_security: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accruals_and_deferred_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsWithinOneYear {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period: Option<CreditorsWithinOneYearCurrentPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<CreditorsWithinOneYearPreviousPeriod>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsAfterOneYearCurrentPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_loans_and_overdrafts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_leases_and_hire_purchase_contracts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsAfterOneYearPreviousPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_loans_and_overdrafts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_leases_and_hire_purchase_contracts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_creditors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorsAfterOneYear {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period: Option<CreditorsAfterOneYearCurrentPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<CreditorsAfterOneYearPreviousPeriod>,
}

// ---------------------------------------------------------------------------
// Tangible and intangible fixed assets
// ---------------------------------------------------------------------------

/// Cost (or valuation) movement schedule of one asset category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_period_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revaluations: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_period_end: Option<i64>,
}

/// Depreciation (tangible) or amortisation (intangible) schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteDown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_period_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_for_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_disposals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_adjustments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_period_end: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangibleAssetsCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation: Option<WriteDown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_book_value_at_end_of_current_period: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_book_value_at_end_of_previous_period: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangibleAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_and_buildings: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_and_machinery: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_and_fittings: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_equipment: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_vehicles: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntangibleAssetsCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amortisation: Option<WriteDown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_book_value_at_end_of_current_period: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_book_value_at_end_of_previous_period: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntangibleAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goodwill: Option<IntangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_intangible_assets: Option<IntangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<IntangibleAssetsCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

// ---------------------------------------------------------------------------
// Text and count notes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeesCurrentPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_number_of_employees: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeesPreviousPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_number_of_employees: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employees {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period: Option<EmployeesCurrentPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period: Option<EmployeesPreviousPeriod>,
}

/// `fixed-assets-investments` note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssetsInvestments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// `current-assets-investments` note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssetsInvestments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingPolicies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_of_measurement_and_preparation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangible_fixed_assets_depreciation_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intangible_fixed_assets_amortisation_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_information_and_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_accounting_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffBalanceSheetArrangements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
