//! # Optimistic mutations with rollback
//!
//! Views mutate their local state first and confirm with the server after.
//! [`reconcile`] captures that pattern once:
//!
//! 1. snapshot the slot,
//! 2. apply the mutation synchronously (the view reflects it immediately),
//! 3. await the remote call,
//! 4. on success keep the new state; on failure roll back according to a
//!    [`Rollback`] strategy.
//!
//! | Strategy | On failure |
//! |----------|------------|
//! | [`Rollback::Restore`] | The snapshot is put back verbatim. |
//! | [`Rollback::Refetch`] | The slot is replaced by a fresh copy from the server. If that reload fails too, the snapshot is restored instead. |
//!
//! Either way the slot ends up in exactly one of two states: the optimistic
//! one or a consistent rollback state. The slot is held through a `&mut`
//! borrow for the whole mutation, so a second mutation on the same view
//! cannot interleave with the first.
//!
//! [`Pending`] exposes the same lifecycle step by step for callers that need
//! to inspect the optimistic state before settling it.

use std::fmt::Display;
use std::future::{Future, Ready};

/// Lifecycle of one optimistic mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationState {
    /// Optimistic state applied, remote call in flight.
    Pending,
    /// Remote call succeeded; the optimistic state is canonical.
    Committed,
    /// Remote call failed; the slot was restored or reloaded.
    RolledBack,
}

/// What to do with the slot when the remote call fails.
pub enum Rollback<F> {
    Restore,
    Refetch(F),
}

/// Refetch type used by [`Rollback::restore`]; never called.
pub type NoRefetch<T, E> = fn() -> Ready<Result<T, E>>;

impl<T, E> Rollback<NoRefetch<T, E>> {
    /// Restore the snapshot on failure.
    pub fn restore() -> Self {
        Rollback::Restore
    }
}

impl<F> Rollback<F> {
    /// Reload the slot with `refetch` on failure.
    pub fn refetch(refetch: F) -> Self {
        Rollback::Refetch(refetch)
    }
}

/// How a settled mutation ended.
#[derive(Debug)]
pub enum Outcome<E> {
    Committed,
    /// The remote call failed and the snapshot was put back.
    Restored(E),
    /// The remote call failed and the slot was reloaded from the server.
    Refetched(E),
}

impl<E> Outcome<E> {
    pub fn state(&self) -> MutationState {
        match self {
            Outcome::Committed => MutationState::Committed,
            Outcome::Restored(_) | Outcome::Refetched(_) => MutationState::RolledBack,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }

    /// Error of the failed remote call.
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Committed => None,
            Outcome::Restored(e) | Outcome::Refetched(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<(), E> {
        match self {
            Outcome::Committed => Ok(()),
            Outcome::Restored(e) | Outcome::Refetched(e) => Err(e),
        }
    }
}

/// An optimistic change applied to a slot, awaiting the remote verdict.
///
/// Dropping a `Pending` without settling it keeps the optimistic state.
pub struct Pending<'a, T> {
    slot: &'a mut T,
    snapshot: T,
}

impl<'a, T: Clone> Pending<'a, T> {
    /// Snapshot `slot`, then apply `mutate` to it.
    pub fn apply(slot: &'a mut T, mutate: impl FnOnce(&mut T)) -> Self {
        let snapshot = slot.clone();
        mutate(slot);
        Self { slot, snapshot }
    }
}

impl<'a, T> Pending<'a, T> {
    pub fn state(&self) -> MutationState {
        MutationState::Pending
    }

    /// The optimistic state the view currently shows.
    pub fn current(&self) -> &T {
        self.slot
    }

    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }

    pub fn commit<E>(self) -> Outcome<E> {
        Outcome::Committed
    }

    /// Put the snapshot back.
    pub fn restore<E>(self, error: E) -> Outcome<E> {
        let Pending { slot, snapshot } = self;
        *slot = snapshot;
        Outcome::Restored(error)
    }

    /// Replace the slot with server state.
    pub fn replace<E>(self, fresh: T, error: E) -> Outcome<E> {
        *self.slot = fresh;
        Outcome::Refetched(error)
    }
}

/// Apply `mutate` to `slot` optimistically, then settle it against `remote`.
///
/// `remote` is not polled until the mutation is applied.
pub async fn reconcile<T, E, Fut, R, RFut>(
    slot: &mut T,
    mutate: impl FnOnce(&mut T),
    remote: Fut,
    rollback: Rollback<R>,
) -> Outcome<E>
where
    T: Clone,
    E: Display,
    Fut: Future<Output = Result<(), E>>,
    R: FnOnce() -> RFut,
    RFut: Future<Output = Result<T, E>>,
{
    let pending = Pending::apply(slot, mutate);
    let error = match remote.await {
        Ok(()) => return pending.commit(),
        Err(error) => error,
    };

    match rollback {
        Rollback::Restore => pending.restore(error),
        Rollback::Refetch(refetch) => match refetch().await {
            Ok(fresh) => pending.replace(fresh, error),
            Err(refetch_error) => {
                tracing::warn!("Refetch after failed mutation also failed: {}", refetch_error);
                pending.restore(error)
            }
        },
    }
}
