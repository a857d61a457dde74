//! Resource-kind discriminators used to dispatch a submission to its validator.
//!
//! Both enums serialize to/from the kebab-case names used in the filing API's
//! resource paths (e.g. `creditors-within-one-year`). [`NoteKind::ALL`] and
//! [`ResourceKind::ALL`] list every kind so that registries can check
//! completeness when they are built.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a kind name does not match any known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} kind {got:?}")]
pub struct UnknownKindError {
    /// `"note"`, `"resource"` or `"submission"`.
    pub family: &'static str,
    /// The rejected name.
    pub got: String,
}

/// A note sub-resource of the small-full accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteKind {
    Stocks,
    Debtors,
    CreditorsWithinOneYear,
    CreditorsAfterOneYear,
    TangibleAssets,
    IntangibleAssets,
    Employees,
    FixedAssetsInvestments,
    CurrentAssetsInvestments,
    AccountingPolicies,
    OffBalanceSheetArrangements,
}

impl NoteKind {
    /// Every note kind, in registration order.
    pub const ALL: [NoteKind; 11] = [
        NoteKind::Stocks,
        NoteKind::Debtors,
        NoteKind::CreditorsWithinOneYear,
        NoteKind::CreditorsAfterOneYear,
        NoteKind::TangibleAssets,
        NoteKind::IntangibleAssets,
        NoteKind::Employees,
        NoteKind::FixedAssetsInvestments,
        NoteKind::CurrentAssetsInvestments,
        NoteKind::AccountingPolicies,
        NoteKind::OffBalanceSheetArrangements,
    ];

    /// The kebab-case name used on the command line and in resource paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Debtors => "debtors",
            Self::CreditorsWithinOneYear => "creditors-within-one-year",
            Self::CreditorsAfterOneYear => "creditors-after-one-year",
            Self::TangibleAssets => "tangible-assets",
            Self::IntangibleAssets => "intangible-assets",
            Self::Employees => "employees",
            Self::FixedAssetsInvestments => "fixed-assets-investments",
            Self::CurrentAssetsInvestments => "current-assets-investments",
            Self::AccountingPolicies => "accounting-policies",
            Self::OffBalanceSheetArrangements => "off-balance-sheet-arrangements",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKindError {
                family: "note",
                got: s.to_owned(),
            })
    }
}

/// A non-note accounts resource: periods, reports and the company account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    CurrentPeriod,
    PreviousPeriod,
    CurrentPeriodProfitAndLoss,
    PreviousPeriodProfitAndLoss,
    Approval,
    CicApproval,
    DirectorsApproval,
    Director,
    Secretary,
    Loan,
    RptTransaction,
    CompanyAccount,
}

impl ResourceKind {
    /// Every resource kind, in registration order.
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::CurrentPeriod,
        ResourceKind::PreviousPeriod,
        ResourceKind::CurrentPeriodProfitAndLoss,
        ResourceKind::PreviousPeriodProfitAndLoss,
        ResourceKind::Approval,
        ResourceKind::CicApproval,
        ResourceKind::DirectorsApproval,
        ResourceKind::Director,
        ResourceKind::Secretary,
        ResourceKind::Loan,
        ResourceKind::RptTransaction,
        ResourceKind::CompanyAccount,
    ];

    /// The kebab-case name used on the command line and in resource paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentPeriod => "current-period",
            Self::PreviousPeriod => "previous-period",
            Self::CurrentPeriodProfitAndLoss => "current-period-profit-and-loss",
            Self::PreviousPeriodProfitAndLoss => "previous-period-profit-and-loss",
            Self::Approval => "approval",
            Self::CicApproval => "cic-approval",
            Self::DirectorsApproval => "directors-approval",
            Self::Director => "director",
            Self::Secretary => "secretary",
            Self::Loan => "loan",
            Self::RptTransaction => "rpt-transaction",
            Self::CompanyAccount => "company-account",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKindError {
                family: "resource",
                got: s.to_owned(),
            })
    }
}

/// Either family of kind; what a caller names when submitting a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Note(NoteKind),
    Resource(ResourceKind),
}

impl SubmissionKind {
    /// Every submission kind: notes first, then resources.
    pub fn all() -> impl Iterator<Item = SubmissionKind> {
        NoteKind::ALL
            .into_iter()
            .map(SubmissionKind::Note)
            .chain(ResourceKind::ALL.into_iter().map(SubmissionKind::Resource))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note(k) => k.as_str(),
            Self::Resource(k) => k.as_str(),
        }
    }
}

impl From<NoteKind> for SubmissionKind {
    fn from(kind: NoteKind) -> Self {
        Self::Note(kind)
    }
}

impl From<ResourceKind> for SubmissionKind {
    fn from(kind: ResourceKind) -> Self {
        Self::Resource(kind)
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(k) = s.parse::<NoteKind>() {
            return Ok(Self::Note(k));
        }
        s.parse::<ResourceKind>()
            .map(Self::Resource)
            .map_err(|_| UnknownKindError {
                family: "submission",
                got: s.to_owned(),
            })
    }
}

/// Which of the two reporting periods a figure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Current,
    Previous,
}

impl Period {
    /// The JSON key of the period sub-object (`current_period` / `previous_period`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Current => "current_period",
            Self::Previous => "previous_period",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Previous => f.write_str("previous"),
        }
    }
}
