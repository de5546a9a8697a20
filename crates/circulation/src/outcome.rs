//! Confirmations returned by successful ledger operations.
//!
//! Each outcome carries the facts of what happened; its `Display` impl is the
//! human-readable status line.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookledger_core::{Isbn, UserId};

use crate::fee::LateReturn;
use crate::user::BorrowRecord;

/// Result of adding a book to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BookAdded {
    /// A new ISBN was catalogued.
    Added { isbn: Isbn, title: String },
    /// The ISBN already existed; its stock grew. `title` is the existing one.
    StockUpdated { isbn: Isbn, title: String, stock: u32 },
}

impl core::fmt::Display for BookAdded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BookAdded::Added { title, .. } => write!(f, "Book added: {title}"),
            BookAdded::StockUpdated { title, .. } => write!(f, "Stock updated for {title}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registered {
    pub user_id: UserId,
    pub name: String,
}

impl core::fmt::Display for Registered {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "User registered: {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub user_id: UserId,
    pub isbn: Isbn,
    pub title: String,
    pub due_date: DateTime<Utc>,
}

impl core::fmt::Display for CheckoutReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Checkout Successful. Due: {}", self.due_date.format("%a %b %d %Y"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    pub user_id: UserId,
    pub isbn: Isbn,
    pub title: String,
    /// Loans of this ISBN cleared from the user (more than one if it was
    /// borrowed repeatedly).
    pub cleared: usize,
    /// `None` when returned on or before the due date.
    pub late: Option<LateReturn>,
}

impl core::fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.late {
            Some(late) => write!(f, "Return successful. Late fee: {}", late.fee),
            None => write!(f, "Return Successful"),
        }
    }
}

/// An outstanding loan already past its due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueLoan {
    pub user_id: UserId,
    pub record: BorrowRecord,
    /// What the return would cost right now.
    pub late: LateReturn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::LateFee;
    use chrono::TimeZone;

    #[test]
    fn checkout_message_shows_readable_due_date() {
        let receipt = CheckoutReceipt {
            user_id: UserId::from(202),
            isbn: Isbn::from(1),
            title: "Harry Potter".to_string(),
            due_date: Utc.with_ymd_and_hms(2026, 10, 30, 8, 0, 0).unwrap(),
        };
        assert_eq!(receipt.to_string(), "Checkout Successful. Due: Fri Oct 30 2026");
    }

    #[test]
    fn return_message_mentions_fee_only_when_late() {
        let mut receipt = ReturnReceipt {
            user_id: UserId::from(202),
            isbn: Isbn::from(2),
            title: "48 Laws of Power".to_string(),
            cleared: 1,
            late: None,
        };
        assert_eq!(receipt.to_string(), "Return Successful");

        receipt.late = Some(LateReturn {
            days_late: 3,
            fee: LateFee::from_cents(150),
        });
        assert_eq!(receipt.to_string(), "Return successful. Late fee: $1.50");
    }
}
