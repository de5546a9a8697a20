//! Scripted walk through the ledger: stock the shelves, register patrons,
//! then check books out and back in (once on time, once late).

use std::borrow::Borrow;

use chrono::Duration;

use bookledger_circulation::{AsyncLedger, Book, User};
use bookledger_core::{Clock, LedgerResult, ManualClock};

/// How far past checkout the clock jumps before the late return.
pub const LATE_RETURN_AFTER_DAYS: i64 = 17;

/// Run the demo sequence, handing every confirmation line to `emit`.
///
/// The late return is staged by advancing the ledger's own [`ManualClock`].
/// Stops at the first failed operation and returns its error; lines emitted
/// before the failure are kept.
pub async fn run_scenario<C, F>(
    ledger: &mut AsyncLedger<C>,
    mut emit: F,
) -> LedgerResult<()>
where
    C: Clock + Borrow<ManualClock>,
    F: FnMut(String),
{
    let harry_potter = Book::new("Harry Potter", "Harry", 1, 10);
    let laws_of_power = Book::new("48 Laws of Power", "Robert Greene", 2, 50);
    // Same ISBN as the first book: only its stock is kept.
    let harry_potter_vol2 = Book::new("Harry Potter Vol 2", "Harry", 1, 5);

    let daniel = User::new("Daniel", 202);
    let james = User::new("James", 203);

    let hp_isbn = harry_potter.isbn().clone();
    let laws_isbn = laws_of_power.isbn().clone();
    let daniel_id = daniel.id().clone();

    emit(ledger.add_book(harry_potter).await.to_string());
    emit(ledger.add_book(laws_of_power).await.to_string());
    emit(ledger.add_book(harry_potter_vol2).await.to_string());

    emit(ledger.register_user(daniel).await?.to_string());
    emit(ledger.register_user(james).await?.to_string());

    emit("\n--- Borrow Test ---".to_string());
    emit(ledger.borrow_book(&daniel_id, &hp_isbn).await?.to_string());

    emit("\n--- Return Test ---".to_string());
    emit(ledger.return_book(&daniel_id, &hp_isbn).await?.to_string());

    emit("\n--- Late Fee Test ---".to_string());
    emit(ledger.borrow_book(&daniel_id, &laws_isbn).await?.to_string());
    Borrow::<ManualClock>::borrow(ledger.ledger().clock())
        .advance(Duration::days(LATE_RETURN_AFTER_DAYS));
    emit(ledger.return_book(&daniel_id, &laws_isbn).await?.to_string());

    Ok(())
}
