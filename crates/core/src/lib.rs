//! `bookledger-core` — shared building blocks for the circulation ledger.
//!
//! Identifiers, the error model and the time source. No bookkeeping logic
//! lives here.

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LedgerError, LedgerResult};
pub use id::{Isbn, UserId};
