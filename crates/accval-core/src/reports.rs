//! Report, approval and company-account resources.
//!
//! Dates are ISO `YYYY-MM-DD` strings on the wire, held as
//! [`chrono::NaiveDate`].
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Approval of the accounts by the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Approval of the community interest company report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CicApproval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Approval of the directors' report by a named signatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorsApproval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A director named in the directors' report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resignation_date: Option<NaiveDate>,
}

impl Director {
    /// A director is validly serving when they never resigned, or resigned
    /// strictly after a recorded appointment.
    pub fn is_validly_serving(&self) -> bool {
        match (self.appointment_date, self.resignation_date) {
            (_, None) => true,
            (Some(appointed), Some(resigned)) => resigned > appointed,
            (None, Some(_)) => false,
        }
    }
}

/// The company secretary named in the directors' report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secretary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_at_period_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advances_credits_made: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advances_credits_repaid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_at_period_end: Option<i64>,
}

/// A loan to a director.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<LoanBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RptTransactionBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_at_period_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_at_period_end: Option<i64>,
}

/// A related-party transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RptTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_of_related_party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_of_transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<RptTransactionBreakdown>,
}

/// The company-account aggregate: the accounting period being filed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
    }

    #[test]
    fn director_without_resignation_is_serving() {
        let d = Director {
            name: Some("A".to_owned()),
            appointment_date: None,
            resignation_date: None,
        };
        assert!(d.is_validly_serving());
    }

    #[test]
    fn director_resigned_after_appointment_is_serving() {
        let d = Director {
            name: Some("A".to_owned()),
            appointment_date: Some(date("2023-01-01")),
            resignation_date: Some(date("2023-06-01")),
        };
        assert!(d.is_validly_serving());
    }

    #[test]
    fn director_resigned_on_appointment_day_is_not_serving() {
        let d = Director {
            name: Some("A".to_owned()),
            appointment_date: Some(date("2023-01-01")),
            resignation_date: Some(date("2023-01-01")),
        };
        assert!(!d.is_validly_serving());
    }

    #[test]
    fn approval_date_parses_iso() {
        let a: Approval =
            serde_json::from_str(r#"{"name": "Jo Bloggs", "date": "2024-04-01"}"#).expect("parse");
        assert_eq!(a.date, Some(date("2024-04-01")));
    }

    #[test]
    fn approval_rejects_non_iso_date() {
        assert!(serde_json::from_str::<Approval>(r#"{"date": "01/04/2024"}"#).is_err());
    }
}
