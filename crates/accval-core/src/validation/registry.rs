//! Build-once dispatch tables from submission kind to validator.
//!
//! A registry is checked for completeness when it is built: every kind of its
//! family must be bound to exactly one validator. After construction it is
//! read-only and may be shared freely across threads.
use std::collections::BTreeMap;

use crate::enums::{NoteKind, Period, ResourceKind, SubmissionKind};

use super::rules_balance_sheet::{
    CurrentPeriodValidator, PreviousPeriodValidator, ProfitAndLossValidator,
};
use super::rules_fixed_assets::{IntangibleAssetsValidator, TangibleAssetsValidator};
use super::rules_notes::{
    AccountingPoliciesValidator, CreditorsAfterOneYearValidator, CreditorsWithinOneYearValidator,
    CurrentAssetsInvestmentsValidator, DebtorsValidator, EmployeesValidator,
    FixedAssetsInvestmentsValidator, OffBalanceSheetArrangementsValidator, StocksValidator,
};
use super::rules_reports::{
    ApprovalValidator, CicApprovalValidator, CompanyAccountValidator, DirectorValidator,
    DirectorsApprovalValidator, LoanValidator, RptTransactionValidator, SecretaryValidator,
};
use super::{NoteValidator, ResourceValidator};

/// A validator registry is misconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("more than one validator registered for `{0}`")]
    Duplicate(SubmissionKind),
    #[error("no validator registered for `{0}`")]
    Missing(SubmissionKind),
}

/// A validator trait object that a [`ValidatorRegistry`] can index.
pub trait RegisteredValidator: Send + Sync {
    type Kind: Copy + Ord + Into<SubmissionKind> + 'static;

    /// Every kind the registry must bind.
    const ALL: &'static [Self::Kind];

    fn registered_kind(&self) -> Self::Kind;
}

impl RegisteredValidator for dyn NoteValidator {
    type Kind = NoteKind;
    const ALL: &'static [NoteKind] = &NoteKind::ALL;

    fn registered_kind(&self) -> NoteKind {
        self.kind()
    }
}

impl RegisteredValidator for dyn ResourceValidator {
    type Kind = ResourceKind;
    const ALL: &'static [ResourceKind] = &ResourceKind::ALL;

    fn registered_kind(&self) -> ResourceKind {
        self.kind()
    }
}

/// One-to-one map from kind to validator.
pub struct ValidatorRegistry<V: RegisteredValidator + ?Sized> {
    validators: BTreeMap<V::Kind, Box<V>>,
}

pub type NoteValidatorRegistry = ValidatorRegistry<dyn NoteValidator>;
pub type ResourceValidatorRegistry = ValidatorRegistry<dyn ResourceValidator>;

impl<V: RegisteredValidator + ?Sized> ValidatorRegistry<V> {
    /// Builds a registry from `validators`, failing on the first kind that is
    /// bound twice or not at all.
    pub fn build(validators: Vec<Box<V>>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for validator in validators {
            let kind = validator.registered_kind();
            if map.insert(kind, validator).is_some() {
                return Err(RegistryError::Duplicate(kind.into()));
            }
        }
        if let Some(missing) = V::ALL.iter().find(|k| !map.contains_key(*k)) {
            return Err(RegistryError::Missing((*missing).into()));
        }
        Ok(Self { validators: map })
    }

    pub fn get(&self, kind: V::Kind) -> Result<&V, RegistryError> {
        self.validators
            .get(&kind)
            .map(Box::as_ref)
            .ok_or_else(|| RegistryError::Missing(kind.into()))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Registered kinds in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = V::Kind> + '_ {
        self.validators.keys().copied()
    }
}

impl NoteValidatorRegistry {
    /// The registry of every built-in note validator.
    pub fn standard() -> Result<Self, RegistryError> {
        let validators: Vec<Box<dyn NoteValidator>> = vec![
            Box::new(StocksValidator),
            Box::new(DebtorsValidator),
            Box::new(CreditorsWithinOneYearValidator),
            Box::new(CreditorsAfterOneYearValidator),
            Box::new(TangibleAssetsValidator),
            Box::new(IntangibleAssetsValidator),
            Box::new(EmployeesValidator),
            Box::new(FixedAssetsInvestmentsValidator),
            Box::new(CurrentAssetsInvestmentsValidator),
            Box::new(AccountingPoliciesValidator),
            Box::new(OffBalanceSheetArrangementsValidator),
        ];
        Self::build(validators)
    }
}

impl ResourceValidatorRegistry {
    /// The registry of every built-in resource validator.
    pub fn standard() -> Result<Self, RegistryError> {
        let validators: Vec<Box<dyn ResourceValidator>> = vec![
            Box::new(CurrentPeriodValidator),
            Box::new(PreviousPeriodValidator),
            Box::new(ProfitAndLossValidator::new(Period::Current)),
            Box::new(ProfitAndLossValidator::new(Period::Previous)),
            Box::new(ApprovalValidator),
            Box::new(CicApprovalValidator),
            Box::new(DirectorsApprovalValidator),
            Box::new(DirectorValidator),
            Box::new(SecretaryValidator),
            Box::new(LoanValidator),
            Box::new(RptTransactionValidator),
            Box::new(CompanyAccountValidator),
        ];
        Self::build(validators)
    }
}
