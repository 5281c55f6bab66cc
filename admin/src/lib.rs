//! Issuing and redeeming activation codes from the command line.

use anyhow::{bail, Context, Result};
use psyreports_activation::{
    issue, ActivationConfig, CreditPackage, DeviceId, DeviceIdentityProvider, Entitlement,
    FileStore, StoredDeviceIdentity, UNLIMITED_CREDITS,
};
use psyreports_credits::{CreditBalance, CreditLedger};
use tracing::info;

/// Resolves a `--credits` argument to the credits field a client will accept:
/// a package name (any case) or a positive count.
pub fn resolve_credits(credits: &str) -> Result<String> {
    let credits = credits.trim();
    if let Ok(package) = credits.parse::<CreditPackage>() {
        return Ok(package.credits().to_string());
    }
    match credits.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n.to_string()),
        _ => bail!("credits must be 10, 50, 100, INF or a positive count, got {credits:?}"),
    }
}

/// Issues a code for `target_device`, refusing a blank device id and
/// credits no client would redeem.
///
/// The library issuer binds whatever it is given; an empty target would
/// produce a code no installation can redeem.
pub fn issue_for_device(credits: &str, salt: &str, target_device: &str) -> Result<String> {
    if target_device.trim().is_empty() {
        bail!("target device id is required");
    }
    let credits = resolve_credits(credits)?;
    Ok(issue(&credits, salt, target_device))
}

/// Human-readable package name for a credits field.
#[must_use]
pub fn package_name(credits: &str) -> String {
    if credits == UNLIMITED_CREDITS {
        "Unlimited package".to_string()
    } else {
        format!("{credits} reports")
    }
}

/// Message the administrator sends to the client along with the code.
#[must_use]
pub fn share_message(code: &str, target_device: &str, credits: &str) -> String {
    format!(
        "Here is your activation code ({}) for device {}:\n\n{}\n\n\
         This code works on this device only.",
        package_name(credits),
        target_device.trim().to_uppercase(),
        code
    )
}

/// The local installation: its device identity and credit ledger.
pub struct Installation {
    config: ActivationConfig,
    identity: StoredDeviceIdentity<FileStore>,
}

impl Installation {
    /// Opens the installation described by `config`.
    pub fn open(config: ActivationConfig) -> Result<Self> {
        let store = FileStore::open(config.storage_path()).with_context(|| {
            format!("Failed to open storage at {}", config.storage_path().display())
        })?;
        Ok(Self {
            config,
            identity: StoredDeviceIdentity::new(store),
        })
    }

    /// Returns the device id, generating and persisting it on first use.
    pub fn device_id(&mut self) -> DeviceId {
        self.identity.device_id()
    }

    /// Validates `code` for this device and credits the ledger.
    pub fn redeem(&mut self, code: &str) -> Result<(Entitlement, CreditBalance)> {
        let device = self.device_id();
        let path = self.config.ledger_path();
        let mut ledger = CreditLedger::load_or_default(&path)
            .with_context(|| format!("Failed to load ledger from {}", path.display()))?;

        let entitlement = ledger.redeem(code, &self.config.salt, device.as_str())?;
        ledger
            .save(&path)
            .with_context(|| format!("Failed to write ledger to {}", path.display()))?;

        info!(device_id = %device, "Ledger saved after redemption");
        Ok((entitlement, ledger.balance()))
    }

    /// Returns the current ledger balance.
    pub fn balance(&self) -> Result<CreditBalance> {
        let path = self.config.ledger_path();
        let ledger = CreditLedger::load_or_default(&path)
            .with_context(|| format!("Failed to load ledger from {}", path.display()))?;
        Ok(ledger.balance())
    }
}
