//! Revocation bookkeeping on top of the cache collaborator.

mod ledger;


pub use ledger::{invalidated_key, logout_key, RevocationLedger};
