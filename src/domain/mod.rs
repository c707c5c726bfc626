pub mod category;
pub mod common;
pub mod draft;
pub mod transaction;

pub use category::{Category, CategoryCatalog, CategoryName};
pub use common::{parse_iso_date, Displayable, Identifiable, LedgerEntry, NamedEntity};
pub use draft::{DateChoice, TransactionDraft, ValidatedDraft, MAX_AMOUNT};
pub use transaction::{RawTransaction, Transaction, TransactionKind};
