//! Submitted bodies, tagged by the kind they were submitted as.
use crate::balance_sheet::{PeriodResource, ProfitAndLoss};
use crate::enums::{NoteKind, ResourceKind, SubmissionKind};
use crate::notes::{
    AccountingPolicies, CreditorsAfterOneYear, CreditorsWithinOneYear, CurrentAssetsInvestments,
    Debtors, Employees, FixedAssetsInvestments, IntangibleAssets, OffBalanceSheetArrangements,
    Stocks, TangibleAssets,
};
use crate::reports::{
    Approval, CicApproval, CompanyAccount, Director, DirectorsApproval, Loan, RptTransaction,
    Secretary,
};

/// A submitted note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteBody {
    Stocks(Stocks),
    Debtors(Debtors),
    CreditorsWithinOneYear(CreditorsWithinOneYear),
    CreditorsAfterOneYear(CreditorsAfterOneYear),
    TangibleAssets(TangibleAssets),
    IntangibleAssets(IntangibleAssets),
    Employees(Employees),
    FixedAssetsInvestments(FixedAssetsInvestments),
    CurrentAssetsInvestments(CurrentAssetsInvestments),
    AccountingPolicies(AccountingPolicies),
    OffBalanceSheetArrangements(OffBalanceSheetArrangements),
}

impl NoteBody {
    pub fn kind(&self) -> NoteKind {
        match self {
            Self::Stocks(_) => NoteKind::Stocks,
            Self::Debtors(_) => NoteKind::Debtors,
            Self::CreditorsWithinOneYear(_) => NoteKind::CreditorsWithinOneYear,
            Self::CreditorsAfterOneYear(_) => NoteKind::CreditorsAfterOneYear,
            Self::TangibleAssets(_) => NoteKind::TangibleAssets,
            Self::IntangibleAssets(_) => NoteKind::IntangibleAssets,
            Self::Employees(_) => NoteKind::Employees,
            Self::FixedAssetsInvestments(_) => NoteKind::FixedAssetsInvestments,
            Self::CurrentAssetsInvestments(_) => NoteKind::CurrentAssetsInvestments,
            Self::AccountingPolicies(_) => NoteKind::AccountingPolicies,
            Self::OffBalanceSheetArrangements(_) => NoteKind::OffBalanceSheetArrangements,
        }
    }

    /// Parses `json` as a note of the given kind.
    pub fn from_json(kind: NoteKind, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            NoteKind::Stocks => Self::Stocks(serde_json::from_str(json)?),
            NoteKind::Debtors => Self::Debtors(serde_json::from_str(json)?),
            NoteKind::CreditorsWithinOneYear => {
                Self::CreditorsWithinOneYear(serde_json::from_str(json)?)
            }
            NoteKind::CreditorsAfterOneYear => {
                Self::CreditorsAfterOneYear(serde_json::from_str(json)?)
            }
            NoteKind::TangibleAssets => Self::TangibleAssets(serde_json::from_str(json)?),
            NoteKind::IntangibleAssets => Self::IntangibleAssets(serde_json::from_str(json)?),
            NoteKind::Employees => Self::Employees(serde_json::from_str(json)?),
            NoteKind::FixedAssetsInvestments => {
                Self::FixedAssetsInvestments(serde_json::from_str(json)?)
            }
            NoteKind::CurrentAssetsInvestments => {
                Self::CurrentAssetsInvestments(serde_json::from_str(json)?)
            }
            NoteKind::AccountingPolicies => Self::AccountingPolicies(serde_json::from_str(json)?),
            NoteKind::OffBalanceSheetArrangements => {
                Self::OffBalanceSheetArrangements(serde_json::from_str(json)?)
            }
        })
    }
}

/// A submitted non-note accounts resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBody {
    CurrentPeriod(PeriodResource),
    PreviousPeriod(PeriodResource),
    CurrentPeriodProfitAndLoss(ProfitAndLoss),
    PreviousPeriodProfitAndLoss(ProfitAndLoss),
    Approval(Approval),
    CicApproval(CicApproval),
    DirectorsApproval(DirectorsApproval),
    Director(Director),
    Secretary(Secretary),
    Loan(Loan),
    RptTransaction(RptTransaction),
    CompanyAccount(CompanyAccount),
}

impl ResourceBody {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::CurrentPeriod(_) => ResourceKind::CurrentPeriod,
            Self::PreviousPeriod(_) => ResourceKind::PreviousPeriod,
            Self::CurrentPeriodProfitAndLoss(_) => ResourceKind::CurrentPeriodProfitAndLoss,
            Self::PreviousPeriodProfitAndLoss(_) => ResourceKind::PreviousPeriodProfitAndLoss,
            Self::Approval(_) => ResourceKind::Approval,
            Self::CicApproval(_) => ResourceKind::CicApproval,
            Self::DirectorsApproval(_) => ResourceKind::DirectorsApproval,
            Self::Director(_) => ResourceKind::Director,
            Self::Secretary(_) => ResourceKind::Secretary,
            Self::Loan(_) => ResourceKind::Loan,
            Self::RptTransaction(_) => ResourceKind::RptTransaction,
            Self::CompanyAccount(_) => ResourceKind::CompanyAccount,
        }
    }

    /// Parses `json` as a resource of the given kind.
    pub fn from_json(kind: ResourceKind, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ResourceKind::CurrentPeriod => Self::CurrentPeriod(serde_json::from_str(json)?),
            ResourceKind::PreviousPeriod => Self::PreviousPeriod(serde_json::from_str(json)?),
            ResourceKind::CurrentPeriodProfitAndLoss => {
                Self::CurrentPeriodProfitAndLoss(serde_json::from_str(json)?)
            }
            ResourceKind::PreviousPeriodProfitAndLoss => {
                Self::PreviousPeriodProfitAndLoss(serde_json::from_str(json)?)
            }
            ResourceKind::Approval => Self::Approval(serde_json::from_str(json)?),
            ResourceKind::CicApproval => Self::CicApproval(serde_json::from_str(json)?),
            ResourceKind::DirectorsApproval => Self::DirectorsApproval(serde_json::from_str(json)?),
            ResourceKind::Director => Self::Director(serde_json::from_str(json)?),
            ResourceKind::Secretary => Self::Secretary(serde_json::from_str(json)?),
            ResourceKind::Loan => Self::Loan(serde_json::from_str(json)?),
            ResourceKind::RptTransaction => Self::RptTransaction(serde_json::from_str(json)?),
            ResourceKind::CompanyAccount => Self::CompanyAccount(serde_json::from_str(json)?),
        })
    }
}

/// Any submitted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Note(NoteBody),
    Resource(ResourceBody),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Self::Note(n) => SubmissionKind::Note(n.kind()),
            Self::Resource(r) => SubmissionKind::Resource(r.kind()),
        }
    }

    /// Parses `json` as a body of the given kind.
    ///
    /// A balance sheet carrying both `capital_and_reserves` and
    /// `members_funds` is rejected here.
    pub fn from_json(kind: SubmissionKind, json: &str) -> Result<Self, serde_json::Error> {
        match kind {
            SubmissionKind::Note(k) => NoteBody::from_json(k, json).map(Self::Note),
            SubmissionKind::Resource(k) => ResourceBody::from_json(k, json).map(Self::Resource),
        }
    }
}

impl From<NoteBody> for Submission {
    fn from(body: NoteBody) -> Self {
        Self::Note(body)
    }
}

impl From<ResourceBody> for Submission {
    fn from(body: ResourceBody) -> Self {
        Self::Resource(body)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_note_by_kind() {
        let s = Submission::from_json(
            SubmissionKind::Note(NoteKind::Stocks),
            r#"{"current_period": {"stocks": 100, "total": 100}}"#,
        )
        .expect("parse");
        assert_eq!(s.kind(), SubmissionKind::Note(NoteKind::Stocks));
    }

    #[test]
    fn parses_resource_by_kind() {
        let s = Submission::from_json(
            SubmissionKind::Resource(ResourceKind::Approval),
            r#"{"name": "A Person", "date": "2024-05-01"}"#,
        )
        .expect("parse");
        assert_eq!(s.kind(), SubmissionKind::Resource(ResourceKind::Approval));
    }

    #[test]
    fn rejects_period_with_both_equity_sections() {
        let json = r#"{"balance_sheet": {"capital_and_reserves": {}, "members_funds": {}}}"#;
        let err = Submission::from_json(
            SubmissionKind::Resource(ResourceKind::CurrentPeriod),
            json,
        )
        .expect_err("must reject");
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn rejects_wrongly_typed_figure() {
        let res = Submission::from_json(
            SubmissionKind::Note(NoteKind::Debtors),
            r#"{"current_period": {"trade_debtors": "lots"}}"#,
        );
        assert!(res.is_err());
    }
}
