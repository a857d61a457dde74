//! Balance sheet and profit-and-loss records for one accounting period.
//!
//! All monetary figures are whole pounds held as `Option<i64>`: an absent
//! figure is distinct from a submitted zero. The equity section is a sum type
//! ([`EquitySection`]) so that a balance sheet can never carry both
//! shareholders' funds and members' funds at once.
use serde::{Deserialize, Serialize};

/// Fixed assets section of a balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangible: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intangible: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Current assets section of a balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stocks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_at_bank_and_in_hand: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investments: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl CurrentAssets {
    /// The four component figures that make up `total`.
    pub fn components(&self) -> [Option<i64>; 4] {
        [
            self.stocks,
            self.debtors,
            self.cash_at_bank_and_in_hand,
            self.investments,
        ]
    }

    /// Returns `true` if any figure, including the total, is present.
    pub fn has_any_figure(&self) -> bool {
        self.components().iter().any(Option::is_some) || self.total.is_some()
    }
}

/// Liabilities and the running net-asset totals of a balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherLiabilitiesOrAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayments_and_accrued_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditors_due_within_one_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_current_assets: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets_less_current_liabilities: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditors_after_one_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accruals_and_deferred_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_for_liabilities: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_net_assets: Option<i64>,
}

impl OtherLiabilitiesOrAssets {
    /// Returns `true` if any figure in the section is present.
    pub fn has_any_figure(&self) -> bool {
        [
            self.prepayments_and_accrued_income,
            self.creditors_due_within_one_year,
            self.net_current_assets,
            self.total_assets_less_current_liabilities,
            self.creditors_after_one_year,
            self.accruals_and_deferred_income,
            self.provision_for_liabilities,
            self.total_net_assets,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// Shareholders' funds, reported by companies limited by shares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalAndReserves {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_up_share_capital: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_premium_account: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_reserves: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_and_loss: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shareholders_funds: Option<i64>,
}

/// Members' funds, reported by companies limited by guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersFunds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_and_loss_account: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_members_funds: Option<i64>,
}

/// The equity section of a balance sheet: exactly one of the two forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquitySection {
    /// `capital_and_reserves` on the wire.
    Shareholders(CapitalAndReserves),
    /// `members_funds` on the wire.
    Members(MembersFunds),
}

/// A balance sheet for a single period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBalanceSheet", into = "RawBalanceSheet")]
pub struct BalanceSheet {
    pub called_up_share_capital_not_paid: Option<i64>,
    pub fixed_assets: Option<FixedAssets>,
    pub current_assets: Option<CurrentAssets>,
    pub other_liabilities_or_assets: Option<OtherLiabilitiesOrAssets>,
    pub equity: Option<EquitySection>,
}

impl BalanceSheet {
    /// `fixed_assets.tangible`, if submitted.
    pub fn tangible_fixed_assets(&self) -> Option<i64> {
        self.fixed_assets.as_ref().and_then(|f| f.tangible)
    }

    /// `fixed_assets.intangible`, if submitted.
    pub fn intangible_fixed_assets(&self) -> Option<i64> {
        self.fixed_assets.as_ref().and_then(|f| f.intangible)
    }

    /// `fixed_assets.investments`, if submitted.
    pub fn fixed_asset_investments(&self) -> Option<i64> {
        self.fixed_assets.as_ref().and_then(|f| f.investments)
    }

    /// `current_assets.stocks`, if submitted.
    pub fn stocks(&self) -> Option<i64> {
        self.current_assets.as_ref().and_then(|c| c.stocks)
    }

    /// `current_assets.debtors`, if submitted.
    pub fn debtors(&self) -> Option<i64> {
        self.current_assets.as_ref().and_then(|c| c.debtors)
    }

    /// `current_assets.investments`, if submitted.
    pub fn current_asset_investments(&self) -> Option<i64> {
        self.current_assets.as_ref().and_then(|c| c.investments)
    }

    /// `other_liabilities_or_assets.creditors_due_within_one_year`, if submitted.
    pub fn creditors_due_within_one_year(&self) -> Option<i64> {
        self.other_liabilities_or_assets
            .as_ref()
            .and_then(|o| o.creditors_due_within_one_year)
    }

    /// `other_liabilities_or_assets.creditors_after_one_year`, if submitted.
    pub fn creditors_after_one_year(&self) -> Option<i64> {
        self.other_liabilities_or_assets
            .as_ref()
            .and_then(|o| o.creditors_after_one_year)
    }
}

/// Wire form of [`BalanceSheet`], with the equity section as two keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawBalanceSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    called_up_share_capital_not_paid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_assets: Option<FixedAssets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_assets: Option<CurrentAssets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    other_liabilities_or_assets: Option<OtherLiabilitiesOrAssets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capital_and_reserves: Option<CapitalAndReserves>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    members_funds: Option<MembersFunds>,
}

impl TryFrom<RawBalanceSheet> for BalanceSheet {
    type Error = String;

    fn try_from(raw: RawBalanceSheet) -> Result<Self, Self::Error> {
        let equity = match (raw.capital_and_reserves, raw.members_funds) {
            (Some(_), Some(_)) => {
                return Err(
                    "capital_and_reserves and members_funds are mutually exclusive".to_owned(),
                );
            }
            (Some(capital), None) => Some(EquitySection::Shareholders(capital)),
            (None, Some(members)) => Some(EquitySection::Members(members)),
            (None, None) => None,
        };
        Ok(Self {
            called_up_share_capital_not_paid: raw.called_up_share_capital_not_paid,
            fixed_assets: raw.fixed_assets,
            current_assets: raw.current_assets,
            other_liabilities_or_assets: raw.other_liabilities_or_assets,
            equity,
        })
    }
}

impl From<BalanceSheet> for RawBalanceSheet {
    fn from(sheet: BalanceSheet) -> Self {
        let (capital_and_reserves, members_funds) = match sheet.equity {
            Some(EquitySection::Shareholders(capital)) => (Some(capital), None),
            Some(EquitySection::Members(members)) => (None, Some(members)),
            None => (None, None),
        };
        Self {
            called_up_share_capital_not_paid: sheet.called_up_share_capital_not_paid,
            fixed_assets: sheet.fixed_assets,
            current_assets: sheet.current_assets,
            other_liabilities_or_assets: sheet.other_liabilities_or_assets,
            capital_and_reserves,
            members_funds,
        }
    }
}

/// The `current_period` / `previous_period` accounts resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_sheet: Option<BalanceSheet>,
}

// ---------------------------------------------------------------------------
// Profit and loss
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossProfitOrLoss {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_of_sales: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingProfitOrLoss {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_costs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_expenses: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_operating_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitOrLossBeforeTax {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_receivable_and_similar_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_payable_and_similar_charges: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_profit_or_loss_before_tax: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitOrLossForFinancialYear {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_profit_or_loss_for_financial_year: Option<i64>,
}

/// Profit and loss account for a single period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_profit_or_loss: Option<GrossProfitOrLoss>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_profit_or_loss: Option<OperatingProfitOrLoss>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_or_loss_before_tax: Option<ProfitOrLossBeforeTax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_or_loss_for_financial_year: Option<ProfitOrLossForFinancialYear>,
}
