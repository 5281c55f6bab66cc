//! Credit balance and its history.

use crate::error::{CreditsError, CreditsResult};
use psyreports_activation::{validate, Entitlement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Credits a fresh installation starts with.
pub const INITIAL_BALANCE: u64 = 3;

/// Finite balances at or above this are displayed as unlimited.
pub const UNLIMITED_DISPLAY_THRESHOLD: u64 = 9999;

const REDEEM_REASON: &str = "activation code";

/// Current credit balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditBalance {
    /// A finite number of credits.
    Finite(u64),
    /// Unlimited usage; spends never reduce it.
    Unlimited,
}

impl CreditBalance {
    /// Returns true if `amount` credits can be spent.
    #[must_use]
    pub fn covers(&self, amount: u64) -> bool {
        match self {
            Self::Finite(n) => *n >= amount,
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for CreditBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) if *n < UNLIMITED_DISPLAY_THRESHOLD => write!(f, "{n}"),
            _ => f.write_str("∞"),
        }
    }
}

/// A single change to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum CreditChange {
    /// Finite credits added.
    Granted(u64),
    /// Balance switched to unlimited.
    GrantedUnlimited,
    /// Credits spent.
    Spent(u64),
}

/// A history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEntry {
    /// What changed.
    pub change: CreditChange,
    /// Why it changed.
    pub reason: String,
    /// When it changed (milliseconds since epoch).
    pub timestamp: i64,
}

/// The installation's credit balance and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLedger {
    balance: CreditBalance,
    history: Vec<CreditEntry>,
}

impl Default for CreditLedger {
    fn default() -> Self {
        Self {
            balance: CreditBalance::Finite(INITIAL_BALANCE),
            history: Vec::new(),
        }
    }
}

impl CreditLedger {
    /// Creates a ledger holding [`INITIAL_BALANCE`] credits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current balance.
    #[must_use]
    pub fn balance(&self) -> CreditBalance {
        self.balance
    }

    /// Returns the history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[CreditEntry] {
        &self.history
    }

    /// Validates `code` for this installation and credits its entitlement.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsError::Rejected`] if the code does not validate, or
    /// [`CreditsError::UnreadableEntitlement`] if it grants no positive amount.
    pub fn redeem(&mut self, code: &str, salt: &str, device: &str) -> CreditsResult<Entitlement> {
        let entitlement = validate(code.trim(), salt, device)?;
        self.grant(entitlement, REDEEM_REASON)?;
        info!(entitlement = %entitlement, balance = %self.balance, "Redeemed activation code");
        Ok(entitlement)
    }

    /// Adds an entitlement to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsError::UnreadableEntitlement`] for non-numeric or
    /// non-positive credit counts. The balance is left unchanged.
    pub fn grant(&mut self, entitlement: Entitlement, reason: &str) -> CreditsResult<()> {
        let change = match entitlement {
            Entitlement::Unlimited => {
                self.balance = CreditBalance::Unlimited;
                CreditChange::GrantedUnlimited
            }
            Entitlement::Credits(n) if n > 0 => {
                let n = n.unsigned_abs();
                if let CreditBalance::Finite(current) = self.balance {
                    self.balance = CreditBalance::Finite(current.saturating_add(n));
                }
                CreditChange::Granted(n)
            }
            other => return Err(CreditsError::UnreadableEntitlement(other.to_string())),
        };
        self.record(change, reason);
        Ok(())
    }

    /// Spends `amount` credits.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsError::InsufficientCredits`] if the finite balance is
    /// too small. The balance is left unchanged.
    pub fn spend(&mut self, amount: u64, reason: &str) -> CreditsResult<()> {
        if let CreditBalance::Finite(available) = self.balance {
            if !self.balance.covers(amount) {
                return Err(CreditsError::InsufficientCredits { needed: amount, available });
            }
            self.balance = CreditBalance::Finite(available - amount);
        }
        self.record(CreditChange::Spent(amount), reason);
        Ok(())
    }

    fn record(&mut self, change: CreditChange, reason: &str) {
        debug!(?change, reason, "Ledger updated");
        self.history.push(CreditEntry {
            change,
            reason: reason.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
    }

    /// Loads the ledger from `path`, or a fresh one if the file is missing
    /// or blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> CreditsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the ledger to `path`, creating parent directories.
    ///
    /// The ledger is written to a sibling temp file and renamed over `path`,
    /// so an interrupted save leaves the previous ledger in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> CreditsResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
