#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod balance_sheet;
pub mod enums;
pub mod newtypes;
pub mod notes;
pub mod reports;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod test_helpers;

pub use balance_sheet::{
    BalanceSheet, CapitalAndReserves, CurrentAssets, EquitySection, FixedAssets, MembersFunds,
    OtherLiabilitiesOrAssets, PeriodResource, ProfitAndLoss,
};
pub use enums::{NoteKind, Period, ResourceKind, SubmissionKind, UnknownKindError};
pub use newtypes::{CompanyAccountId, CompanyNumber, NewtypeError, TransactionId};
pub use reports::{Director, Secretary};
pub use submission::{NoteBody, ResourceBody, Submission};
pub use validation::engine::{EngineError, ValidationEngine};
pub use validation::gateway::{
    AccountFixture, AccountsGateway, CancellationToken, DeadlineGateway, FilerClassification,
    GatewayConfig, GatewayError, StaticGateway,
};
pub use validation::registry::{
    NoteValidatorRegistry, RegistryError, ResourceValidatorRegistry, ValidatorRegistry,
};
pub use validation::{
    DataError, ErrorKey, ErrorType, Errors, GrossProfitConvention, JsonPath, LocationType,
    NoteValidator, ResourceValidator, TransactionContext, ValidationConfig, ValidationContext,
    ValidationError,
};

/// Returns the current version of the accval-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
