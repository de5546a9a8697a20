use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookledger_core::{Isbn, UserId};

/// One outstanding loan of a book to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub isbn: Isbn,
    pub title: String,
    pub due_date: DateTime<Utc>,
}

/// A registered borrower.
///
/// # Invariants
/// - Constructed with no loans; loans are only added by the ledger on checkout.
/// - Loans keep checkout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    name: String,
    id: UserId,
    borrowed_books: Vec<BorrowRecord>,
}

impl User {
    pub fn new(name: impl Into<String>, id: impl Into<UserId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            borrowed_books: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn borrowed_books(&self) -> &[BorrowRecord] {
        &self.borrowed_books
    }

    /// First loan of `isbn` in checkout order.
    pub fn loan_of(&self, isbn: &Isbn) -> Option<&BorrowRecord> {
        self.borrowed_books.iter().find(|r| &r.isbn == isbn)
    }

    pub fn holds(&self, isbn: &Isbn) -> bool {
        self.loan_of(isbn).is_some()
    }

    pub(crate) fn push_loan(&mut self, record: BorrowRecord) {
        self.borrowed_books.push(record);
    }

    /// Drop every loan of `isbn`, returning how many were removed.
    pub(crate) fn clear_loans(&mut self, isbn: &Isbn) -> usize {
        let before = self.borrowed_books.len();
        self.borrowed_books.retain(|r| &r.isbn != isbn);
        before - self.borrowed_books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(isbn: &str, day: u32) -> BorrowRecord {
        BorrowRecord {
            isbn: Isbn::from(isbn),
            title: format!("Book {isbn}"),
            due_date: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn loan_of_returns_first_match_in_checkout_order() {
        let mut user = User::new("Daniel", 202);
        user.push_loan(record("1", 1));
        user.push_loan(record("2", 2));
        user.push_loan(record("1", 3));

        let found = user.loan_of(&Isbn::from("1")).unwrap();
        assert_eq!(found.due_date.format("%d").to_string(), "01");
    }

    #[test]
    fn clear_loans_removes_every_match_and_keeps_order() {
        let mut user = User::new("Daniel", 202);
        user.push_loan(record("1", 1));
        user.push_loan(record("2", 2));
        user.push_loan(record("1", 3));
        user.push_loan(record("3", 4));

        assert_eq!(user.clear_loans(&Isbn::from("1")), 2);
        let left: Vec<_> = user.borrowed_books().iter().map(|r| r.isbn.as_str()).collect();
        assert_eq!(left, vec!["2", "3"]);
        assert_eq!(user.clear_loans(&Isbn::from("1")), 0);
    }
}
