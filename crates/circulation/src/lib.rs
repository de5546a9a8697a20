//! Circulation module: book inventory, users, checkouts, returns and late fees.
//!
//! [`LibraryLedger`] holds the bookkeeping rules as plain synchronous logic.
//! [`AsyncLedger`] wraps it with a simulated I/O delay.

pub mod async_ledger;
pub mod book;
pub mod config;
pub mod fee;
pub mod ledger;
pub mod outcome;
pub mod user;

pub use async_ledger::AsyncLedger;
pub use book::Book;
pub use config::{ConfigError, LedgerConfig};
pub use fee::{LateFee, LateReturn};
pub use ledger::{LedgerSnapshot, LibraryLedger};
pub use outcome::{BookAdded, CheckoutReceipt, OverdueLoan, Registered, ReturnReceipt};
pub use user::{BorrowRecord, User};

pub use bookledger_core::{Clock, Isbn, LedgerError, LedgerResult, ManualClock, SystemClock, UserId};
