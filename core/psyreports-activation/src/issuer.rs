//! Activation code issuance.
//!
//! Runs on the administrator's machine. The issuer performs no validation:
//! any credits string, salt and target device produce a code, degenerate
//! empty strings included.

use crate::payload::{random_alphanumeric, ActivationPayload, NONCE_LEN, UNLIMITED_CREDITS};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Credit packages offered by the administrator tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditPackage {
    /// 10 reports.
    Ten,
    /// 50 reports.
    Fifty,
    /// 100 reports.
    Hundred,
    /// Unlimited reports.
    Unlimited,
}

impl CreditPackage {
    /// All packages, in the order the tool lists them.
    pub const ALL: [Self; 4] = [Self::Ten, Self::Fifty, Self::Hundred, Self::Unlimited];

    /// Returns the credits field this package encodes to.
    #[must_use]
    pub fn credits(&self) -> &'static str {
        match self {
            Self::Ten => "10",
            Self::Fifty => "50",
            Self::Hundred => "100",
            Self::Unlimited => UNLIMITED_CREDITS,
        }
    }
}

impl fmt::Display for CreditPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.credits())
    }
}

impl FromStr for CreditPackage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.credits().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown credit package: {s}"))
    }
}

/// Issues a code granting `credits` to `target_device`.
///
/// `credits` is a decimal count or `INF`. The target device is trimmed and
/// uppercased before it is bound. Two calls with the same inputs produce
/// different codes because of the random nonce.
#[must_use]
pub fn issue(credits: &str, salt: &str, target_device: &str) -> String {
    issue_with_rng(&mut rand::thread_rng(), credits, salt, target_device)
}

/// Issues a code drawing the nonce from `rng`.
pub fn issue_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    credits: &str,
    salt: &str,
    target_device: &str,
) -> String {
    let payload = ActivationPayload {
        credits: credits.to_string(),
        salt: salt.to_string(),
        device: target_device.trim().to_uppercase(),
        nonce: random_alphanumeric(rng, NONCE_LEN),
    };
    debug!(device = %payload.device, credits = %payload.credits, "Issued activation code");
    payload.encode()
}
