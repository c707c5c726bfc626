//! Business logic helpers for recording and listing transactions.

use crate::core::clock::Clock;
use crate::core::filters::{search, FilterOptions};
use crate::core::pagination::{paginate, Page};
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Transaction, TransactionDraft};
use crate::ledger::Ledger;

/// Validated append plus the read-side helpers behind the `list` and `search` commands.
pub struct TransactionService;

impl TransactionService {
    /// Validates `draft` against the clock's current day and appends it.
    pub fn add(
        ledger: &mut Ledger,
        draft: &TransactionDraft,
        clock: &dyn Clock,
    ) -> ServiceResult<Transaction> {
        let stored = ledger.append(draft, clock.today())?;
        Ok(stored.clone())
    }

    /// Appends every draft that validates; returns the stored transactions and
    /// the rejected drafts paired with the rule they broke.
    pub fn add_many<'a>(
        ledger: &mut Ledger,
        drafts: &'a [TransactionDraft],
        clock: &dyn Clock,
    ) -> (Vec<Transaction>, Vec<(&'a TransactionDraft, ServiceError)>) {
        let mut stored = Vec::new();
        let mut rejected = Vec::new();
        for draft in drafts {
            match Self::add(ledger, draft, clock) {
                Ok(txn) => stored.push(txn),
                Err(err) => rejected.push((draft, err)),
            }
        }
        (stored, rejected)
    }

    /// Returns a snapshot of the ledger's transactions, oldest first.
    pub fn list(ledger: &Ledger) -> Vec<&Transaction> {
        ledger.transactions().iter().collect()
    }

    pub fn get(ledger: &Ledger, id: u64) -> ServiceResult<&Transaction> {
        ledger
            .transaction(id)
            .ok_or_else(|| ServiceError::Invalid(format!("Transaction {id} not found")))
    }

    pub fn search<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Transaction> {
        search(ledger.transactions(), query)
    }

    pub fn filter<'a>(ledger: &'a Ledger, options: &FilterOptions) -> Vec<&'a Transaction> {
        options.apply(ledger.transactions())
    }

    /// Search, then filter, then paginate: the pipeline behind the listing view.
    pub fn page<'a>(
        ledger: &'a Ledger,
        query: &str,
        options: &FilterOptions,
        page: usize,
        page_size: usize,
    ) -> ServiceResult<Page<&'a Transaction>> {
        let matched: Vec<&Transaction> = search(ledger.transactions(), query)
            .into_iter()
            .filter(|txn| options.matches(*txn))
            .collect();
        paginate(&matched, page, page_size).map_err(ServiceError::from)
    }
}
