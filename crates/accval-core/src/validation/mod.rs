//! Error types, validator traits and shared context for the accounts
//! validation engine.
//!
//! This module defines [`ErrorKey`], [`JsonPath`], [`ValidationError`] and
//! [`Errors`], the types that represent every business-rule violation found in
//! a submission. It also defines the [`NoteValidator`] and
//! [`ResourceValidator`] traits, [`ValidationConfig`], and the per-request
//! [`ValidationContext`] through which validators reach the injected
//! [`AccountsGateway`].
pub mod engine;
pub mod gateway;
pub mod note_pipeline;
pub mod presence;
pub mod reconcile;
pub mod registry;
pub mod rules_balance_sheet;
pub mod rules_fixed_assets;
pub mod rules_notes;
pub mod rules_reports;

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::balance_sheet::BalanceSheet;
use crate::enums::{NoteKind, ResourceKind, SubmissionKind};
use crate::newtypes::{CompanyAccountId, CompanyNumber, TransactionId};
use crate::reports::{Director, Secretary};
use crate::submission::{NoteBody, ResourceBody};
use gateway::{AccountsGateway, FilerClassification, GatewayError};

#[cfg(test)]
mod tests;

/// Machine-readable message key of a validation error.
///
/// [`ErrorKey::code`] returns the stable string used in serialised output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    /// A total does not equal the sum of its components.
    IncorrectTotal,
    /// A field required in this context was not submitted.
    MandatoryElementMissing,
    /// A field was submitted that has nothing backing it.
    UnexpectedData,
    /// A field was submitted that the filer category forbids.
    InconsistentData,
    /// A note was submitted with no data and no backing balance-sheet figure.
    EmptyResource,
    /// A note total differs from the current-period balance sheet.
    ValueNotEqualToCurrentPeriodOnBalanceSheet,
    /// A note total differs from the previous-period balance sheet.
    ValueNotEqualToPreviousPeriodOnBalanceSheet,
    DateInvalid,
    ValueRequired,
    InvalidValue,
    ValueOutsideRange,
    DateOutsideRange,
    MaxLengthExceeded,
    /// Shareholders' funds differ from total net assets.
    ShareholdersMismatch,
    /// Members' funds differ from total net assets.
    MembersFundsMismatch,
    /// Sibling data could not be fetched; only ever carried by
    /// [`ErrorType::Service`] errors.
    ServiceUnavailable,
}

impl ErrorKey {
    /// Returns the message key string.
    pub fn code(self) -> &'static str {
        match self {
            Self::IncorrectTotal => "incorrect_total",
            Self::MandatoryElementMissing => "mandatory_element_missing",
            Self::UnexpectedData => "unexpected_data",
            Self::InconsistentData => "inconsistent_data",
            Self::EmptyResource => "empty_resource",
            Self::ValueNotEqualToCurrentPeriodOnBalanceSheet => {
                "value_not_equal_to_current_period_on_balance_sheet"
            }
            Self::ValueNotEqualToPreviousPeriodOnBalanceSheet => {
                "value_not_equal_to_previous_period_on_balance_sheet"
            }
            Self::DateInvalid => "date_invalid",
            Self::ValueRequired => "value_required",
            Self::InvalidValue => "invalid_value",
            Self::ValueOutsideRange => "value_outside_range",
            Self::DateOutsideRange => "date_outside_range",
            Self::MaxLengthExceeded => "max_length_exceeded",
            Self::ShareholdersMismatch => "shareholders.mismatch",
            Self::MembersFundsMismatch => "membersFunds.mismatch",
            Self::ServiceUnavailable => "service_unavailable",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for ErrorKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.code())
    }
}

/// A JSON-path-like location inside a submitted body, e.g.
/// `$.stocks.current_period.total`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPath(String);

impl JsonPath {
    /// The document root, `$`.
    pub fn document() -> Self {
        Self("$".to_owned())
    }

    /// A top-level key, e.g. `JsonPath::root("stocks")` is `$.stocks`.
    pub fn root(key: &str) -> Self {
        Self(format!("$.{key}"))
    }

    /// A child key of this path.
    pub fn field(&self, key: &str) -> Self {
        Self(format!("{}.{key}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

/// How [`ValidationError::location`] should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    #[serde(rename = "json-path")]
    JsonPath,
    #[serde(rename = "request-body")]
    RequestBody,
}

/// Whether an error is a business-rule violation or an infrastructure fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "ch:validation")]
    Validation,
    #[serde(rename = "ch:service")]
    Service,
}

/// A single error in an [`Errors`] collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub error: ErrorKey,
    pub location: JsonPath,
    pub location_type: LocationType,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
}

impl ValidationError {
    /// A validation error located by JSON path.
    pub fn new(error: ErrorKey, location: JsonPath) -> Self {
        Self {
            error,
            location,
            location_type: LocationType::JsonPath,
            error_type: ErrorType::Validation,
        }
    }

    /// A service error against the request body as a whole.
    pub fn service(error: ErrorKey) -> Self {
        Self {
            error,
            location: JsonPath::document(),
            location_type: LocationType::RequestBody,
            error_type: ErrorType::Service,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.error, self.location)
    }
}

/// The ordered, append-only error collection produced by a validator.
///
/// An empty collection means the submission is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Errors {
    pub errors: Vec<ValidationError>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validation error at `location`.
    pub fn push(&mut self, error: ErrorKey, location: JsonPath) {
        self.errors.push(ValidationError::new(error, location));
    }

    /// Appends every error of `other`, preserving order.
    pub fn extend(&mut self, other: Errors) {
        self.errors.extend(other.errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Returns an iterator over all errors carrying the given key.
    pub fn by_key(&self, key: ErrorKey) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.error == key)
    }

    /// Returns `true` if an error with `key` was raised at `location`.
    pub fn contains(&self, key: ErrorKey, location: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.error == key && e.location.as_str() == location)
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Sign convention for the gross profit line of the profit and loss account.
///
/// Filings disagree on whether `cost_of_sales` is submitted as a positive
/// figure to subtract or as a signed figure to add; the engine supports both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrossProfitConvention {
    /// `gross_total = turnover - cost_of_sales`.
    #[default]
    TurnoverLessCostOfSales,
    /// `gross_total = turnover + cost_of_sales`.
    TurnoverPlusCostOfSales,
}

/// Tunable limits and conventions applied by every validator.
///
/// # Default
///
/// ```
/// # use accval_core::ValidationConfig;
/// let cfg = ValidationConfig::default();
/// assert_eq!(cfg.max_text_length, 20_000);
/// assert_eq!(cfg.max_employees, 99_999);
/// assert_eq!(cfg.period_start_window_days, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum length, in characters, of any free-text field.
    pub max_text_length: usize,
    /// Upper bound of `average_number_of_employees`.
    pub max_employees: i64,
    pub gross_profit_convention: GrossProfitConvention,
    /// How many days a company account's `period_start_on` may precede the
    /// company profile's.
    pub period_start_window_days: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_text_length: 20_000,
            max_employees: 99_999,
            gross_profit_convention: GrossProfitConvention::default(),
            period_start_window_days: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Identity of the filing a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
    pub transaction_id: TransactionId,
    pub company_number: CompanyNumber,
    pub company_account_id: CompanyAccountId,
}

/// Everything a validator may consult beyond the submitted body.
///
/// Every sibling fetch goes through the methods below, which log the call and
/// wrap a [`GatewayError`] with the resource being validated.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub transaction: &'a TransactionContext,
    pub gateway: &'a dyn AccountsGateway,
    pub config: &'a ValidationConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        transaction: &'a TransactionContext,
        gateway: &'a dyn AccountsGateway,
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            transaction,
            gateway,
            config,
        }
    }

    fn fetch<T>(
        &self,
        resource: &'static str,
        what: &'static str,
        call: impl FnOnce(&dyn AccountsGateway) -> Result<T, GatewayError>,
    ) -> Result<T, DataError> {
        tracing::debug!(
            resource,
            what,
            company_number = %self.transaction.company_number,
            company_account_id = %self.transaction.company_account_id,
            "fetching sibling data"
        );
        call(self.gateway).map_err(|source| {
            tracing::warn!(resource, what, error = %source, "gateway call failed");
            DataError::Fetch {
                resource,
                what,
                source,
            }
        })
    }

    /// Filer classification of the company being filed for.
    pub fn filer_classification(
        &self,
        resource: &'static str,
    ) -> Result<FilerClassification, DataError> {
        let number = &self.transaction.company_number;
        self.fetch(resource, "filer classification", |g| {
            g.filer_classification(number)
        })
    }

    pub fn current_balance_sheet(
        &self,
        resource: &'static str,
    ) -> Result<Option<BalanceSheet>, DataError> {
        let account = &self.transaction.company_account_id;
        self.fetch(resource, "current period balance sheet", |g| {
            g.current_period_balance_sheet(account)
        })
    }

    pub fn previous_balance_sheet(
        &self,
        resource: &'static str,
    ) -> Result<Option<BalanceSheet>, DataError> {
        let account = &self.transaction.company_account_id;
        self.fetch(resource, "previous period balance sheet", |g| {
            g.previous_period_balance_sheet(account)
        })
    }

    pub fn directors(&self, resource: &'static str) -> Result<Vec<Director>, DataError> {
        let account = &self.transaction.company_account_id;
        self.fetch(resource, "directors", |g| g.directors(account))
    }

    pub fn secretary(&self, resource: &'static str) -> Result<Option<Secretary>, DataError> {
        let account = &self.transaction.company_account_id;
        self.fetch(resource, "secretary", |g| g.secretary(account))
    }
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// A validator could not complete because sibling data was unavailable, or
/// because it was handed the wrong kind of body.
///
/// Never folded into [`Errors`]: a fetch failure is not a verdict on the
/// submission.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("validating {resource}: could not fetch {what}")]
    Fetch {
        resource: &'static str,
        what: &'static str,
        #[source]
        source: GatewayError,
    },
    #[error("validator for {expected} was handed a {actual} body")]
    BodyMismatch {
        expected: SubmissionKind,
        actual: SubmissionKind,
    },
}

impl DataError {
    pub fn body_mismatch(
        expected: impl Into<SubmissionKind>,
        actual: impl Into<SubmissionKind>,
    ) -> Self {
        Self::BodyMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// The service-typed error collection reported to a caller when
    /// validation could not run.
    pub fn to_service_errors(&self) -> Errors {
        Errors {
            errors: vec![ValidationError::service(ErrorKey::ServiceUnavailable)],
        }
    }
}

// ---------------------------------------------------------------------------
// Validator traits
// ---------------------------------------------------------------------------

/// A validator for one [`NoteKind`].
///
/// Validators are stateless apart from fixed construction parameters and are
/// shared across requests, hence `Send + Sync`. They push every violation they
/// find; only the whole-note emptiness rule returns early.
pub trait NoteValidator: Send + Sync {
    /// The note kind this validator is registered under.
    fn kind(&self) -> NoteKind;

    /// Validates `note` against its siblings, fetched through `ctx`.
    fn validate(&self, note: &NoteBody, ctx: &ValidationContext<'_>) -> Result<Errors, DataError>;
}

/// A validator for one [`ResourceKind`].
pub trait ResourceValidator: Send + Sync {
    fn kind(&self) -> ResourceKind;

    fn validate(
        &self,
        resource: &ResourceBody,
        ctx: &ValidationContext<'_>,
    ) -> Result<Errors, DataError>;
}
