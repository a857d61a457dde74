//! Validators for approvals, the directors' report and the company-account
//! aggregate.
//!
//! Approvals must be dated strictly after the end of the filing period.
//! Where a signatory is named it must be the company secretary or a validly
//! serving director; names are compared after trimming, ignoring ASCII case.
use chrono::{Days, NaiveDate};

use crate::enums::ResourceKind;
use crate::reports::{Director, Loan, RptTransaction, Secretary};
use crate::submission::ResourceBody;

use super::gateway::FilerClassification;
use super::presence::{check_text_length, forbid, has_text, require, require_text};
use super::reconcile::{net_present, validate_aggregate_total};
use super::{DataError, ErrorKey, Errors, JsonPath, ResourceValidator, ValidationContext};


fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Returns `true` if `name` belongs to the secretary or to a validly serving
/// director.
fn is_known_signatory(name: &str, directors: &[Director], secretary: Option<&Secretary>) -> bool {
    let is_secretary = secretary
        .and_then(|s| s.name.as_deref())
        .is_some_and(|s| names_match(s, name));
    is_secretary || is_serving_director(name, directors)
}

fn is_serving_director(name: &str, directors: &[Director]) -> bool {
    directors.iter().any(|d| {
        d.is_validly_serving() && d.name.as_deref().is_some_and(|n| names_match(n, name))
    })
}

/// The approval date exists and falls strictly after the period end.
fn check_approval_date(
    date: Option<NaiveDate>,
    filer: &FilerClassification,
    path: &JsonPath,
    errors: &mut Errors,
) {
    match date {
        None => errors.push(ErrorKey::ValueRequired, path.clone()),
        Some(date) if date <= filer.period_end_on => {
            errors.push(ErrorKey::DateInvalid, path.clone());
        }
        Some(_) => {}
    }
}

/// Shared body of the three approval validators.
fn validate_approval(
    root: &'static str,
    name: Option<&str>,
    date: Option<NaiveDate>,
    match_signatory: bool,
    filer: &FilerClassification,
    ctx: &ValidationContext<'_>,
) -> Result<Errors, DataError> {
    let base = JsonPath::root(root);
    let mut errors = Errors::new();

    let name_path = base.field("name");
    require_text(name, ctx.config.max_text_length, &name_path, &mut errors);
    if match_signatory {
        if let Some(name) = name.filter(|n| has_text(Some(*n))) {
            let directors = ctx.directors(root)?;
            let secretary = ctx.secretary(root)?;
            if !is_known_signatory(name, &directors, secretary.as_ref()) {
                errors.push(ErrorKey::InvalidValue, name_path);
            }
        }
    }

    check_approval_date(date, filer, &base.field("date"), &mut errors);
    tracing::debug!(resource = root, errors = errors.len(), "approval validated");
    Ok(errors)
}

/// `approval`: approval of the accounts.
pub struct ApprovalValidator;

impl ResourceValidator for ApprovalValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Approval
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::Approval(approval) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let filer = ctx.filer_classification("approval")?;
        validate_approval(
            "approval",
            approval.name.as_deref(),
            approval.date,
            false,
            &filer,
            ctx,
        )
    }
}

/// `cic-approval`: approval of the community interest company report,
/// signed by a secretary or serving director. Only a CIC may file one.
pub struct CicApprovalValidator;

impl ResourceValidator for CicApprovalValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::CicApproval
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::CicApproval(approval) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let filer = ctx.filer_classification("cic_approval")?;
        if !filer.is_cic {
            let mut errors = Errors::new();
            errors.push(ErrorKey::InconsistentData, JsonPath::root("cic_approval"));
            return Ok(errors);
        }
        validate_approval(
            "cic_approval",
            approval.name.as_deref(),
            approval.date,
            true,
            &filer,
            ctx,
        )
    }
}

/// `directors-approval`: approval of the directors' report.
pub struct DirectorsApprovalValidator;

impl ResourceValidator for DirectorsApprovalValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::DirectorsApproval
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::DirectorsApproval(approval) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let filer = ctx.filer_classification("directors_approval")?;
        validate_approval(
            "directors_approval",
            approval.name.as_deref(),
            approval.date,
            true,
            &filer,
            ctx,
        )
    }
}

// ---------------------------------------------------------------------------
// Directors' report officers
// ---------------------------------------------------------------------------

fn check_within_period(
    date: Option<NaiveDate>,
    filer: &FilerClassification,
    path: &JsonPath,
    errors: &mut Errors,
) -> bool {
    let Some(date) = date else {
        return true;
    };
    let inside = filer.period_start_on <= date && date <= filer.period_end_on;
    if !inside {
        errors.push(ErrorKey::DateOutsideRange, path.clone());
    }
    inside
}

pub struct DirectorValidator;

impl ResourceValidator for DirectorValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Director
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::Director(director) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let base = JsonPath::root("director");
        let filer = ctx.filer_classification("director")?;
        let mut errors = Errors::new();

        require_text(
            director.name.as_deref(),
            ctx.config.max_text_length,
            &base.field("name"),
            &mut errors,
        );
        let appointed_ok = check_within_period(
            director.appointment_date,
            &filer,
            &base.field("appointment_date"),
            &mut errors,
        );
        let resigned_path = base.field("resignation_date");
        let resigned_ok =
            check_within_period(director.resignation_date, &filer, &resigned_path, &mut errors);
        let resigned_first = director
            .appointment_date
            .zip(director.resignation_date)
            .is_some_and(|(appointed, resigned)| resigned <= appointed);
        if appointed_ok && resigned_ok && resigned_first {
            errors.push(ErrorKey::DateInvalid, resigned_path);
        }
        Ok(errors)
    }
}

pub struct SecretaryValidator;

impl ResourceValidator for SecretaryValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Secretary
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::Secretary(secretary) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let mut errors = Errors::new();
        require_text(
            secretary.name.as_deref(),
            ctx.config.max_text_length,
            &JsonPath::root("secretary").field("name"),
            &mut errors,
        );
        Ok(errors)
    }
}

// ---------------------------------------------------------------------------
// Loans and related-party transactions
// ---------------------------------------------------------------------------

/// `loan`: a loan to a director.
pub struct LoanValidator;

impl LoanValidator {
    fn check(&self, loan: &Loan, ctx: &ValidationContext<'_>) -> Result<Errors, DataError> {
        let base = JsonPath::root("loan");
        let filer = ctx.filer_classification("loan")?;
        let mut errors = Errors::new();

        let name_path = base.field("director_name");
        let name = loan.director_name.as_deref();
        require_text(name, ctx.config.max_text_length, &name_path, &mut errors);
        if let Some(name) = name.filter(|n| has_text(Some(*n))) {
            let directors = ctx.directors("loan")?;
            if !is_serving_director(name, &directors) {
                errors.push(ErrorKey::InvalidValue, name_path);
            }
        }

        check_text_length(
            loan.description.as_deref(),
            ctx.config.max_text_length,
            &base.field("description"),
            &mut errors,
        );

        let breakdown_path = base.field("breakdown");
        let Some(breakdown) = &loan.breakdown else {
            errors.push(ErrorKey::MandatoryElementMissing, breakdown_path);
            return Ok(errors);
        };

        let start_path = breakdown_path.field("balance_at_period_start");
        let opening = if filer.is_multiple_year_filer {
            breakdown.balance_at_period_start
        } else {
            forbid(
                breakdown.balance_at_period_start.is_some(),
                ErrorKey::InconsistentData,
                &start_path,
                &mut errors,
            );
            None
        };

        let end_path = breakdown_path.field("balance_at_period_end");
        if require(breakdown.balance_at_period_end.is_some(), &end_path, &mut errors) {
            let expected = net_present(
                &[opening, breakdown.advances_credits_made],
                &[breakdown.advances_credits_repaid],
            );
            validate_aggregate_total(
                breakdown.balance_at_period_end,
                expected,
                &end_path,
                &mut errors,
            );
        }
        Ok(errors)
    }
}

impl ResourceValidator for LoanValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Loan
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::Loan(loan) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        self.check(loan, ctx)
    }
}

/// `rpt-transaction`: a transaction with a related party.
pub struct RptTransactionValidator;

impl RptTransactionValidator {
    fn check(
        &self,
        transaction: &RptTransaction,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let base = JsonPath::root("rpt_transaction");
        let filer = ctx.filer_classification("rpt_transaction")?;
        let mut errors = Errors::new();
        let max = ctx.config.max_text_length;

        for (field, value) in [
            ("name_of_related_party", &transaction.name_of_related_party),
            ("relationship", &transaction.relationship),
            ("description_of_transaction", &transaction.description_of_transaction),
            ("transaction_type", &transaction.transaction_type),
        ] {
            require_text(value.as_deref(), max, &base.field(field), &mut errors);
        }

        let breakdown_path = base.field("breakdown");
        let Some(breakdown) = &transaction.breakdown else {
            errors.push(ErrorKey::MandatoryElementMissing, breakdown_path);
            return Ok(errors);
        };
        if !filer.is_multiple_year_filer {
            forbid(
                breakdown.balance_at_period_start.is_some(),
                ErrorKey::InconsistentData,
                &breakdown_path.field("balance_at_period_start"),
                &mut errors,
            );
        }
        require(
            breakdown.balance_at_period_end.is_some(),
            &breakdown_path.field("balance_at_period_end"),
            &mut errors,
        );
        Ok(errors)
    }
}

impl ResourceValidator for RptTransactionValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::RptTransaction
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::RptTransaction(transaction) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        self.check(transaction, ctx)
    }
}

// ---------------------------------------------------------------------------
// Company account
// ---------------------------------------------------------------------------

/// `company-account`: the accounting period being filed, checked against the
/// company profile.
pub struct CompanyAccountValidator;

impl ResourceValidator for CompanyAccountValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::CompanyAccount
    }

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError> {
        let ResourceBody::CompanyAccount(account) = resource else {
            return Err(DataError::body_mismatch(self.kind(), resource.kind()));
        };
        let base = JsonPath::root("company_account");
        let filer = ctx.filer_classification("company_account")?;
        let mut errors = Errors::new();

        let start_path = base.field("period_start_on");
        let end_path = base.field("period_end_on");
        if account.period_start_on.is_none() {
            errors.push(ErrorKey::ValueRequired, start_path.clone());
        }
        if account.period_end_on.is_none() {
            errors.push(ErrorKey::ValueRequired, end_path.clone());
        }

        if let Some(start) = account.period_start_on {
            let window = u64::try_from(ctx.config.period_start_window_days).unwrap_or(0);
            let earliest = filer
                .period_start_on
                .checked_sub_days(Days::new(window))
                .unwrap_or(NaiveDate::MIN);
            if start < earliest || start > filer.period_start_on {
                errors.push(ErrorKey::DateOutsideRange, start_path);
            }
            if account.period_end_on.is_some_and(|end| end <= start) {
                errors.push(ErrorKey::DateInvalid, end_path);
            }
        }
        Ok(errors)
    }
}
