//! Sequenced state slots.
//!
//! Every piece of fetched view state lives in a [`Slot`]. Each fetch takes a
//! [`RequestToken`] before the request goes out and hands it back with the
//! response; a response whose token is older than the last applied one is
//! dropped, so a slow reply can never overwrite fresher data.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tiadmin_domain::error::ApiError;

/// Ticket tagging one fetch of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What happened to a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied.
    Updated,
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// The request failed; the slot kept its previous value.
    Failed(ApiError),
}

impl FetchOutcome {
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Inner<T> {
    value: T,
    issued: u64,
    applied: u64,
}

/// Shared, sequenced holder for one piece of view state.
///
/// Clones share the same value.
pub struct Slot<T> {
    inner: Arc<RwLock<Inner<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|value| f.debug_tuple("Slot").field(value).finish())
    }
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                value,
                issued: 0,
                applied: 0,
            })),
        }
    }

    /// Take a token for a request that is about to be sent.
    pub fn begin(&self) -> RequestToken {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.issued += 1;
        RequestToken(inner.issued)
    }

    /// Apply the result of the request tagged `token` with `apply`.
    ///
    /// Nothing is written when the request failed or when a newer token has
    /// already been applied.
    pub fn complete_with<V>(
        &self,
        token: RequestToken,
        result: Result<V, ApiError>,
        apply: impl FnOnce(&mut T, V),
    ) -> FetchOutcome {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if token.0 <= inner.applied {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(value) => {
                apply(&mut inner.value, value);
                inner.applied = token.0;
                FetchOutcome::Updated
            }
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    /// Replace the value with the result of the request tagged `token`.
    pub fn complete(&self, token: RequestToken, result: Result<T, ApiError>) -> FetchOutcome {
        self.complete_with(token, result, |slot, value| *slot = value)
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner.value)
    }

    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.read(Clone::clone)
    }
}

impl<T> Slot<Option<T>> {
    /// Store the result of the request tagged `token` as the present value.
    pub fn complete_some(
        &self,
        token: RequestToken,
        result: Result<T, ApiError>,
    ) -> FetchOutcome {
        self.complete_with(token, result, |slot, value| *slot = Some(value))
    }
}

/// Outcomes of one refresh routine, labelled by the slot they touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    outcomes: Vec<(&'static str, FetchOutcome)>,
}

impl RefreshReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of the fetch behind `label`.
    pub fn record(&mut self, label: &'static str, outcome: FetchOutcome) -> &mut Self {
        match &outcome {
            FetchOutcome::Updated => {}
            FetchOutcome::Stale => tracing::debug!(slot = label, "dropped stale response"),
            FetchOutcome::Failed(err) => tracing::warn!(slot = label, error = %err, "fetch failed"),
        }
        self.outcomes.push((label, outcome));
        self
    }

    pub fn merge(&mut self, other: Self) -> &mut Self {
        self.outcomes.extend(other.outcomes);
        self
    }

    #[must_use]
    pub fn outcome(&self, label: &str) -> Option<&FetchOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, outcome)| outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &ApiError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, outcome)| outcome.error().map(|err| (*name, err)))
    }

    /// `true` when no fetch failed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures().next().is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(msg: &str) -> ApiError {
        ApiError::Transport(msg.to_string())
    }

    #[test]
    fn should_apply_response_when_token_is_newest() {
        let slot = Slot::new(Vec::<u32>::new());
        let token = slot.begin();
        assert_eq!(slot.complete(token, Ok(vec![1, 2])), FetchOutcome::Updated);
        assert_eq!(slot.snapshot(), vec![1, 2]);
    }

    #[test]
    fn should_discard_older_response_when_newer_already_applied() {
        let slot = Slot::new(0_u32);
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.complete(second, Ok(2)), FetchOutcome::Updated);
        assert_eq!(slot.complete(first, Ok(1)), FetchOutcome::Stale);
        assert_eq!(slot.snapshot(), 2);
    }

    #[test]
    fn should_apply_older_response_when_newer_has_not_arrived() {
        let slot = Slot::new(0_u32);
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.complete(first, Ok(1)), FetchOutcome::Updated);
        assert_eq!(slot.complete(second, Ok(2)), FetchOutcome::Updated);
        assert_eq!(slot.snapshot(), 2);
    }

    #[test]
    fn should_keep_previous_value_when_fetch_fails() {
        let slot = Slot::new(vec!["h1".to_string()]);
        let token = slot.begin();
        let outcome = slot.complete(token, Err(transport("connection refused")));

        assert_eq!(outcome, FetchOutcome::Failed(transport("connection refused")));
        assert_eq!(slot.snapshot(), vec!["h1".to_string()]);
    }

    #[test]
    fn should_still_apply_newer_response_after_a_failure() {
        let slot = Slot::new(0_u32);
        let failed = slot.begin();
        let ok = slot.begin();

        slot.complete(failed, Err(transport("timeout")));
        assert_eq!(slot.complete(ok, Ok(7)), FetchOutcome::Updated);
        assert_eq!(slot.snapshot(), 7);
    }

    #[test]
    fn should_share_value_between_clones() {
        let slot = Slot::<Option<u32>>::default();
        let reader = slot.clone();
        let token = slot.begin();
        slot.complete_some(token, Ok(3));
        assert_eq!(reader.snapshot(), Some(3));
    }

    #[test]
    fn should_merge_with_existing_value_when_applying_with_closure() {
        let slot = Slot::new(vec![1]);
        let token = slot.begin();
        slot.complete_with(token, Ok(2), |values, value| values.push(value));
        assert_eq!(slot.snapshot(), vec![1, 2]);
    }

    #[test]
    fn should_report_failures_by_label() {
        let mut report = RefreshReport::new();
        report
            .record("hosts", FetchOutcome::Updated)
            .record("services", FetchOutcome::Failed(transport("boom")));

        assert!(!report.is_ok());
        assert_eq!(report.len(), 2);
        assert_eq!(report.outcome("hosts"), Some(&FetchOutcome::Updated));
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, vec![("services", &transport("boom"))]);
    }

    #[test]
    fn should_be_ok_when_only_stale_outcomes() {
        let mut report = RefreshReport::new();
        report.record("hosts", FetchOutcome::Stale);
        assert!(report.is_ok());
    }
}
