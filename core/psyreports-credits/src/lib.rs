//! Usage-credit ledger for PsyReports.
//!
//! Each report the application produces spends credits from the local
//! ledger; activation codes top it up. The ledger records every change with
//! a reason and a timestamp and persists as a single JSON file.
//!
//! Redeeming the same code twice credits it twice. Keeping codes single-use
//! is left to the caller.

mod error;
mod ledger;

pub use error::{CreditsError, CreditsResult};
pub use ledger::{
    CreditBalance, CreditChange, CreditEntry, CreditLedger, INITIAL_BALANCE,
    UNLIMITED_DISPLAY_THRESHOLD,
};
