//! Canonical note state and everything that reads or writes it.

mod collection;
mod engine;
mod reconcile;
pub mod selectors;
mod sync_guard;
mod vault;

pub use collection::{CollectionState, MAX_PINNED, SortBy, SortDirection};
pub(crate) use collection::decode_index;
pub use engine::{NoteStore, Outcome, Rejection};
pub use reconcile::{ReconcileReport, reconcile};
pub use sync_guard::{SyncReport, run_sync_guard};
pub use vault::{VaultError, decrypt_with_password, encrypt_with_password, peek_with_password};
