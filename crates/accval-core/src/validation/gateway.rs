//! Aggregate lookup gateway: the injected source of sibling filing data.
//!
//! Validators never perform I/O themselves. Everything they need beyond the
//! submitted body (the filer classification from the company profile, the
//! sibling balance sheets, the directors and secretary) is fetched through
//! the [`AccountsGateway`] trait. Callers wire in a concrete implementation;
//! this module provides an in-memory [`StaticGateway`] and a
//! [`DeadlineGateway`] wrapper that bounds every call by a timeout and a
//! shared [`CancellationToken`].
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::balance_sheet::BalanceSheet;
use crate::newtypes::{CompanyAccountId, CompanyNumber};
use crate::reports::{Director, Secretary};


/// Per-company flags that decide which fields are mandatory or forbidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilerClassification {
    /// The company must report previous-period comparatives.
    #[serde(default)]
    pub is_multiple_year_filer: bool,
    /// Community interest company.
    #[serde(default)]
    pub is_cic: bool,
    /// Company limited by guarantee.
    #[serde(default)]
    pub is_lbg: bool,
    pub period_start_on: NaiveDate,
    pub period_end_on: NaiveDate,
}

/// Failure of an upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("upstream service unavailable: {0}")]
    Unavailable(String),
    #[error("{what} not found for {key}")]
    NotFound { what: &'static str, key: String },
    #[error("gateway call exceeded {0:?}")]
    Timeout(Duration),
    #[error("gateway call cancelled")]
    Cancelled,
}

/// Read-only access to the sibling data of a filing.
///
/// Calls are synchronous: a validator waits for each result before
/// continuing, and any error aborts the validation of that submission.
pub trait AccountsGateway: Send + Sync {
    /// Fails with [`GatewayError::NotFound`] when the company profile does
    /// not exist.
    fn filer_classification(
        &self,
        company_number: &CompanyNumber,
    ) -> Result<FilerClassification, GatewayError>;

    fn current_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError>;

    fn previous_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError>;

    fn directors(&self, account: &CompanyAccountId) -> Result<Vec<Director>, GatewayError>;

    fn secretary(&self, account: &CompanyAccountId) -> Result<Option<Secretary>, GatewayError>;
}

impl<G: AccountsGateway + ?Sized> AccountsGateway for Arc<G> {
    fn filer_classification(
        &self,
        company_number: &CompanyNumber,
    ) -> Result<FilerClassification, GatewayError> {
        (**self).filer_classification(company_number)
    }

    fn current_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        (**self).current_period_balance_sheet(account)
    }

    fn previous_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        (**self).previous_period_balance_sheet(account)
    }

    fn directors(&self, account: &CompanyAccountId) -> Result<Vec<Director>, GatewayError> {
        (**self).directors(account)
    }

    fn secretary(&self, account: &CompanyAccountId) -> Result<Option<Secretary>, GatewayError> {
        (**self).secretary(account)
    }
}

// ---------------------------------------------------------------------------
// StaticGateway
// ---------------------------------------------------------------------------

/// Sibling resources persisted under one company account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_balance_sheet: Option<BalanceSheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period_balance_sheet: Option<BalanceSheet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directors: Vec<Director>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretary: Option<Secretary>,
}

/// An in-memory gateway, loadable from JSON.
///
/// Unknown company numbers fail with [`GatewayError::NotFound`]; unknown
/// company accounts simply have no sibling data.
///
/// ```
/// # use accval_core::StaticGateway;
/// let gw: StaticGateway = serde_json::from_str(r#"{
///     "companies": {
///         "01234567": {"period_start_on": "2023-04-01", "period_end_on": "2024-03-31"}
///     }
/// }"#).unwrap();
/// assert_eq!(gw.companies.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticGateway {
    #[serde(default)]
    pub companies: BTreeMap<CompanyNumber, FilerClassification>,
    #[serde(default)]
    pub accounts: BTreeMap<CompanyAccountId, AccountFixture>,
}

impl StaticGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(
        mut self,
        number: CompanyNumber,
        classification: FilerClassification,
    ) -> Self {
        self.companies.insert(number, classification);
        self
    }

    pub fn with_account(mut self, account: CompanyAccountId, fixture: AccountFixture) -> Self {
        self.accounts.insert(account, fixture);
        self
    }

    fn account(&self, account: &CompanyAccountId) -> Option<&AccountFixture> {
        self.accounts.get(account)
    }
}

impl AccountsGateway for StaticGateway {
    fn filer_classification(
        &self,
        company_number: &CompanyNumber,
    ) -> Result<FilerClassification, GatewayError> {
        self.companies
            .get(company_number)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                what: "company profile",
                key: company_number.to_string(),
            })
    }

    fn current_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        Ok(self
            .account(account)
            .and_then(|a| a.current_period_balance_sheet.clone()))
    }

    fn previous_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        Ok(self
            .account(account)
            .and_then(|a| a.previous_period_balance_sheet.clone()))
    }

    fn directors(&self, account: &CompanyAccountId) -> Result<Vec<Director>, GatewayError> {
        Ok(self
            .account(account)
            .map(|a| a.directors.clone())
            .unwrap_or_default())
    }

    fn secretary(&self, account: &CompanyAccountId) -> Result<Option<Secretary>, GatewayError> {
        Ok(self.account(account).and_then(|a| a.secretary.clone()))
    }
}

// ---------------------------------------------------------------------------
// DeadlineGateway
// ---------------------------------------------------------------------------

/// Limits applied by [`DeadlineGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Upper bound on a single gateway call.
    pub call_timeout: Duration,
    /// Calls allowed to wait behind the one in progress. Further calls fail
    /// with [`GatewayError::Unavailable`] until the queue drains.
    pub max_queued_calls: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(5),
            max_queued_calls: 32,
        }
    }
}

/// A cancellation flag shared between a caller and in-flight validations.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How often a waiting caller re-checks its cancellation token.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

type Job<G> = Box<dyn FnOnce(&G) + Send>;

/// Wraps a gateway so that every call is bounded by
/// [`GatewayConfig::call_timeout`] and abandoned once the token is cancelled.
///
/// Calls are executed one at a time by a single worker thread owned by the
/// gateway, fed through a queue of at most
/// [`GatewayConfig::max_queued_calls`] jobs. A call that overruns is reported
/// as [`GatewayError::Timeout`] and its eventual result is dropped. The
/// worker exits once the gateway is dropped and its current call returns.
pub struct DeadlineGateway<G> {
    jobs: mpsc::SyncSender<Job<G>>,
    config: GatewayConfig,
    cancel: CancellationToken,
}

impl<G: AccountsGateway + 'static> DeadlineGateway<G> {
    pub fn new(inner: G, config: GatewayConfig) -> Self {
        let (jobs, queue) = mpsc::sync_channel::<Job<G>>(config.max_queued_calls.max(1));
        thread::spawn(move || {
            for job in queue {
                job(&inner);
            }
        });
        Self {
            jobs,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token, so a caller can share one token
    /// across several gateways.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle to this gateway's cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn bounded<T, F>(&self, call: F) -> Result<T, GatewayError>
    where
        T: Send + 'static,
        F: FnOnce(&G) -> Result<T, GatewayError> + Send + 'static,
    {
        if self.cancel.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }
        let (reply, result) = mpsc::sync_channel(1);
        let cancel = self.cancel.clone();
        let job: Job<G> = Box::new(move |gateway| {
            // Skipped if cancelled while queued.
            if !cancel.is_cancelled() {
                // The receiver is gone once the caller has given up.
                let _sent = reply.send(call(gateway));
            }
        });
        match self.jobs.try_send(job) {
            Ok(()) => self.wait(&result),
            Err(mpsc::TrySendError::Full(_)) => {
                tracing::warn!(
                    max_queued_calls = self.config.max_queued_calls,
                    "gateway call rejected, queue full"
                );
                Err(GatewayError::Unavailable(
                    "too many gateway calls in flight".to_owned(),
                ))
            }
            Err(mpsc::TrySendError::Disconnected(_)) => Err(GatewayError::Unavailable(
                "gateway worker has stopped".to_owned(),
            )),
        }
    }

    /// Waits for a queued call, re-checking the token between short slices.
    fn wait<T>(
        &self,
        result: &mpsc::Receiver<Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        let deadline = Instant::now() + self.config.call_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(timeout = ?self.config.call_timeout, "gateway call timed out");
                return Err(GatewayError::Timeout(self.config.call_timeout));
            }
            match result.recv_timeout(remaining.min(CANCEL_POLL_INTERVAL)) {
                Ok(outcome) => return outcome,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if self.cancel.is_cancelled() {
                        tracing::debug!("gateway call cancelled while in flight");
                        return Err(GatewayError::Cancelled);
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) if self.cancel.is_cancelled() => {
                    return Err(GatewayError::Cancelled);
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(GatewayError::Unavailable(
                        "gateway worker exited without a result".to_owned(),
                    ));
                }
            }
        }
    }
}

impl<G: AccountsGateway + 'static> AccountsGateway for DeadlineGateway<G> {
    fn filer_classification(
        &self,
        company_number: &CompanyNumber,
    ) -> Result<FilerClassification, GatewayError> {
        let number = company_number.clone();
        self.bounded(move |g| g.filer_classification(&number))
    }

    fn current_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        let account = account.clone();
        self.bounded(move |g| g.current_period_balance_sheet(&account))
    }

    fn previous_period_balance_sheet(
        &self,
        account: &CompanyAccountId,
    ) -> Result<Option<BalanceSheet>, GatewayError> {
        let account = account.clone();
        self.bounded(move |g| g.previous_period_balance_sheet(&account))
    }

    fn directors(&self, account: &CompanyAccountId) -> Result<Vec<Director>, GatewayError> {
        let account = account.clone();
        self.bounded(move |g| g.directors(&account))
    }

    fn secretary(&self, account: &CompanyAccountId) -> Result<Option<Secretary>, GatewayError> {
        let account = account.clone();
        self.bounded(move |g| g.secretary(&account))
    }
}
