//! Ledger error model.

use thiserror::Error;

use crate::id::{Isbn, UserId};

/// Result type used by ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Circulation failure.
///
/// Every variant is a business rejection the caller can recover from. The
/// ledger runs all validations before mutating, so an error never leaves
/// partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Registration attempted with an id that is already taken.
    #[error("User ID: {0} already exists")]
    DuplicateUser(UserId),

    #[error("User with ID: {0} doesn't exist")]
    UserNotFound(UserId),

    #[error("Book with ISBN: {0} doesn't exist")]
    BookNotFound(Isbn),

    /// The book exists but every copy is checked out.
    #[error("Book with ISBN: {0} is currently unavailable")]
    BookUnavailable(Isbn),

    /// Return attempted for a book the user does not hold.
    #[error("User with ID: {user_id} doesn't have book {isbn}")]
    NotBorrowed { user_id: UserId, isbn: Isbn },
}

impl LedgerError {
    pub fn not_borrowed(user_id: UserId, isbn: Isbn) -> Self {
        Self::NotBorrowed { user_id, isbn }
    }

    /// Stable, machine-readable name of the failure (used as a log field).
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::DuplicateUser(_) => "duplicate_user",
            LedgerError::UserNotFound(_) => "user_not_found",
            LedgerError::BookNotFound(_) => "book_not_found",
            LedgerError::BookUnavailable(_) => "book_unavailable",
            LedgerError::NotBorrowed { .. } => "not_borrowed",
        }
    }
}
