//! The circulation ledger: inventory, users, checkouts and returns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use bookledger_core::{Clock, Isbn, LedgerError, LedgerResult, SystemClock, UserId};

use crate::book::Book;
use crate::config::LedgerConfig;
use crate::fee::LateReturn;
use crate::outcome::{BookAdded, CheckoutReceipt, OverdueLoan, Registered, ReturnReceipt};
use crate::user::{BorrowRecord, User};

/// In-memory book inventory and borrowing state.
///
/// # Invariants
/// - One [`Book`] per ISBN; adding a known ISBN only grows its stock.
/// - One [`User`] per id.
/// - Every operation validates fully before mutating anything.
///
/// A user may borrow the same ISBN more than once. Returning that ISBN then
/// clears all of the user's loans for it while restocking a single copy.
#[derive(Debug)]
pub struct LibraryLedger<C: Clock = SystemClock> {
    books: HashMap<Isbn, Book>,
    users: HashMap<UserId, User>,
    config: LedgerConfig,
    clock: C,
}

impl LibraryLedger<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for LibraryLedger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LibraryLedger<C> {
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        Self {
            books: HashMap::new(),
            users: HashMap::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Catalogue a book, or merge its stock into the existing record with the
    /// same ISBN. On merge the incoming title and author are discarded.
    pub fn add_book(&mut self, book: Book) -> BookAdded {
        if let Some(existing) = self.books.get_mut(book.isbn()) {
            existing.restock(book.stock());
            info!(
                isbn = %existing.isbn(),
                added = book.stock(),
                stock = existing.stock(),
                "stock updated"
            );
            return BookAdded::StockUpdated {
                isbn: existing.isbn().clone(),
                title: existing.title().to_owned(),
                stock: existing.stock(),
            };
        }

        info!(isbn = %book.isbn(), title = book.title(), stock = book.stock(), "book added");
        let outcome = BookAdded::Added {
            isbn: book.isbn().clone(),
            title: book.title().to_owned(),
        };
        self.books.insert(book.isbn().clone(), book);
        outcome
    }

    /// # Errors
    ///
    /// [`LedgerError::DuplicateUser`] if the id is already registered.
    pub fn register_user(&mut self, user: User) -> LedgerResult<Registered> {
        if self.users.contains_key(user.id()) {
            return Err(rejected("register_user", LedgerError::DuplicateUser(user.id().clone())));
        }

        info!(user_id = %user.id(), name = user.name(), "user registered");
        let outcome = Registered {
            user_id: user.id().clone(),
            name: user.name().to_owned(),
        };
        self.users.insert(user.id().clone(), user);
        Ok(outcome)
    }

    /// Check one copy of `isbn` out to `user_id`, due one loan period from now.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`LedgerError::UserNotFound`],
    /// [`LedgerError::BookNotFound`], [`LedgerError::BookUnavailable`].
    pub fn borrow_book(&mut self, user_id: &UserId, isbn: &Isbn) -> LedgerResult<CheckoutReceipt> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Err(rejected("borrow_book", LedgerError::UserNotFound(user_id.clone())));
        };
        let Some(book) = self.books.get_mut(isbn) else {
            return Err(rejected("borrow_book", LedgerError::BookNotFound(isbn.clone())));
        };
        if !book.take_copy() {
            return Err(rejected("borrow_book", LedgerError::BookUnavailable(isbn.clone())));
        }

        // Saturates instead of overflowing for clocks pinned near the end of time.
        let due_date = self
            .clock
            .now()
            .checked_add_signed(self.config.loan_period())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        user.push_loan(BorrowRecord {
            isbn: isbn.clone(),
            title: book.title().to_owned(),
            due_date,
        });

        info!(
            user_id = %user_id,
            isbn = %isbn,
            stock = book.stock(),
            due_date = %due_date,
            "book checked out"
        );
        Ok(CheckoutReceipt {
            user_id: user_id.clone(),
            isbn: isbn.clone(),
            title: book.title().to_owned(),
            due_date,
        })
    }

    /// Take back `isbn` from `user_id` and assess any late fee against the
    /// user's first loan of that ISBN.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`LedgerError::UserNotFound`],
    /// [`LedgerError::BookNotFound`], [`LedgerError::NotBorrowed`].
    pub fn return_book(&mut self, user_id: &UserId, isbn: &Isbn) -> LedgerResult<ReturnReceipt> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Err(rejected("return_book", LedgerError::UserNotFound(user_id.clone())));
        };
        let Some(book) = self.books.get_mut(isbn) else {
            return Err(rejected("return_book", LedgerError::BookNotFound(isbn.clone())));
        };
        let Some(loan) = user.loan_of(isbn).cloned() else {
            return Err(rejected(
                "return_book",
                LedgerError::not_borrowed(user_id.clone(), isbn.clone()),
            ));
        };

        book.restock(1);
        let cleared = user.clear_loans(isbn);
        let late = LateReturn::assess(
            loan.due_date,
            self.clock.now(),
            self.config.late_fee_cents_per_day(),
        );

        match &late {
            Some(late) => info!(
                user_id = %user_id,
                isbn = %isbn,
                stock = book.stock(),
                cleared,
                days_late = late.days_late,
                fee_cents = late.fee.cents(),
                "book returned late"
            ),
            None => info!(
                user_id = %user_id,
                isbn = %isbn,
                stock = book.stock(),
                cleared,
                "book returned"
            ),
        }

        Ok(ReturnReceipt {
            user_id: user_id.clone(),
            isbn: isbn.clone(),
            title: loan.title,
            cleared,
            late,
        })
    }

    pub fn book(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Outstanding loans past their due date, oldest due date first.
    pub fn overdue_loans(&self) -> Vec<OverdueLoan> {
        let now = self.clock.now();
        let rate = self.config.late_fee_cents_per_day();

        let mut overdue: Vec<OverdueLoan> = self
            .users
            .values()
            .flat_map(|user| {
                user.borrowed_books().iter().filter_map(move |record| {
                    LateReturn::assess(record.due_date, now, rate).map(|late| OverdueLoan {
                        user_id: user.id().clone(),
                        record: record.clone(),
                        late,
                    })
                })
            })
            .collect();

        overdue.sort_by(|a, b| {
            a.record
                .due_date
                .cmp(&b.record.due_date)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        overdue
    }

    /// Point-in-time copy of every record, ordered by key.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));

        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));

        LedgerSnapshot { books, users }
    }
}

/// Serializable view of the ledger's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub books: Vec<Book>,
    pub users: Vec<User>,
}

fn rejected(operation: &'static str, error: LedgerError) -> LedgerError {
    warn!(operation, kind = error.kind(), error = %error, "operation rejected");
    error
}
