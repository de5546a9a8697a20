//! Async facade over [`LibraryLedger`] that simulates I/O latency.
//!
//! Every operation sleeps for the configured latency and then runs the
//! synchronous ledger call. Methods take `&mut self`, so callers still issue
//! one operation at a time.

use std::time::Duration;

use bookledger_core::{Clock, Isbn, LedgerResult, SystemClock, UserId};

use crate::book::Book;
use crate::ledger::LibraryLedger;
use crate::outcome::{BookAdded, CheckoutReceipt, Registered, ReturnReceipt};
use crate::user::User;

#[derive(Debug)]
pub struct AsyncLedger<C: Clock = SystemClock> {
    inner: LibraryLedger<C>,
    latency: Duration,
}

impl<C: Clock> AsyncLedger<C> {
    /// Wrap `ledger`, using its configured `simulated_latency`.
    pub fn new(ledger: LibraryLedger<C>) -> Self {
        let latency = ledger.config().simulated_latency();
        Self {
            inner: ledger,
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn ledger(&self) -> &LibraryLedger<C> {
        &self.inner
    }

    pub fn into_inner(self) -> LibraryLedger<C> {
        self.inner
    }

    pub async fn add_book(&mut self, book: Book) -> BookAdded {
        self.settle().await;
        self.inner.add_book(book)
    }

    pub async fn register_user(&mut self, user: User) -> LedgerResult<Registered> {
        self.settle().await;
        self.inner.register_user(user)
    }

    pub async fn borrow_book(&mut self, user_id: &UserId, isbn: &Isbn) -> LedgerResult<CheckoutReceipt> {
        self.settle().await;
        self.inner.borrow_book(user_id, isbn)
    }

    pub async fn return_book(&mut self, user_id: &UserId, isbn: &Isbn) -> LedgerResult<ReturnReceipt> {
        self.settle().await;
        self.inner.return_book(user_id, isbn)
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use bookledger_core::{LedgerError, ManualClock};
    use chrono::{TimeZone, Utc};
    use tokio::time::Instant;

    fn async_ledger(latency: Duration) -> AsyncLedger<ManualClock> {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
        let config = LedgerConfig::default().with_simulated_latency(latency);
        AsyncLedger::new(LibraryLedger::with_clock(config, ManualClock::new(start)))
    }

    #[tokio::test(start_paused = true)]
    async fn each_operation_waits_for_the_configured_latency() {
        let mut ledger = async_ledger(Duration::from_millis(1000));
        assert_eq!(ledger.latency(), Duration::from_secs(1));

        let before = Instant::now();
        ledger.add_book(Book::new("Harry Potter", "Harry", 1, 10)).await;
        ledger.register_user(User::new("Daniel", 202)).await.unwrap();
        ledger
            .borrow_book(&UserId::from(202), &Isbn::from(1))
            .await
            .unwrap();
        ledger
            .return_book(&UserId::from(202), &Isbn::from(1))
            .await
            .unwrap();

        assert!(before.elapsed() >= Duration::from_secs(4));
        assert_eq!(ledger.ledger().book(&Isbn::from(1)).unwrap().stock(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_latency_does_not_sleep() {
        let mut ledger = async_ledger(Duration::ZERO);
        let before = Instant::now();
        ledger.add_book(Book::new("Harry Potter", "Harry", 1, 10)).await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn errors_pass_through_after_the_delay() {
        let mut ledger = async_ledger(Duration::from_millis(5));
        ledger.register_user(User::new("Daniel", 202)).await.unwrap();

        let err = ledger
            .register_user(User::new("James", 202))
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateUser(UserId::from(202)));

        let ledger = ledger.into_inner();
        assert_eq!(ledger.user_count(), 1);
    }
}
