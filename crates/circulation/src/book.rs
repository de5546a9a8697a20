use serde::{Deserialize, Serialize};

use bookledger_core::Isbn;

/// A catalogued title and the number of copies on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: Isbn,
    stock: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<Isbn>,
        stock: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            stock,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    /// Copies currently available for checkout.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub(crate) fn restock(&mut self, copies: u32) {
        self.stock = self.stock.saturating_add(copies);
    }

    /// Take one copy off the shelf. Returns `false` (and leaves stock at zero)
    /// when nothing is available.
    pub(crate) fn take_copy(&mut self) -> bool {
        match self.stock.checked_sub(1) {
            Some(left) => {
                self.stock = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_copy_never_goes_below_zero() {
        let mut book = Book::new("Dune", "Frank Herbert", 7, 1);
        assert!(book.take_copy());
        assert_eq!(book.stock(), 0);
        assert!(!book.take_copy());
        assert_eq!(book.stock(), 0);
    }

    #[test]
    fn restock_saturates() {
        let mut book = Book::new("Dune", "Frank Herbert", 7, u32::MAX - 1);
        book.restock(5);
        assert_eq!(book.stock(), u32::MAX);
    }
}
