//! The validation entry point.
//!
//! [`ValidationEngine`] owns the configuration and both dispatch registries.
//! It is built once and then shared: [`ValidationEngine::validate`] takes
//! `&self` and holds no per-request state.
use crate::submission::Submission;

use super::gateway::AccountsGateway;
use super::registry::{NoteValidatorRegistry, RegistryError, ResourceValidatorRegistry};
use super::{DataError, Errors, TransactionContext, ValidationConfig, ValidationContext};

/// A submission could not be validated.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Data(#[from] DataError),
}

pub struct ValidationEngine {
    config: ValidationConfig,
    notes: NoteValidatorRegistry,
    resources: ResourceValidatorRegistry,
}

impl ValidationEngine {
    /// Builds the engine with the standard registries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a registry does not bind every kind
    /// exactly once.
    pub fn new(config: ValidationConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            config,
            notes: NoteValidatorRegistry::standard()?,
            resources: ResourceValidatorRegistry::standard()?,
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates `submission` for the filing identified by `transaction`,
    /// fetching sibling data through `gateway`.
    ///
    /// An empty [`Errors`] means the submission is valid. A gateway failure
    /// aborts validation and is returned as [`EngineError::Data`]; no partial
    /// error collection is reported.
    pub fn validate(
        &self,
        submission: &Submission,
        transaction: &TransactionContext,
        gateway: &dyn AccountsGateway,
    ) -> Result<Errors, EngineError> {
        let ctx = ValidationContext::new(transaction, gateway, &self.config);
        let kind = submission.kind();
        tracing::debug!(
            %kind,
            company_number = %transaction.company_number,
            company_account_id = %transaction.company_account_id,
            "validating submission"
        );

        let errors = match submission {
            Submission::Note(body) => self.notes.get(body.kind())?.validate(body, &ctx)?,
            Submission::Resource(body) => self.resources.get(body.kind())?.validate(body, &ctx)?,
        };

        tracing::info!(
            %kind,
            transaction_id = %transaction.transaction_id,
            errors = errors.len(),
            "validation complete"
        );
        Ok(errors)
    }
}
