//! Device-bound activation codes for PsyReports.
//!
//! This crate handles:
//! - A stable, persisted identifier for the current installation
//! - Issuing activation codes that grant usage credits to one device
//! - Validating a received code against the local device and shared salt
//!
//! # Design Principles
//!
//! - **Offline**: codes travel out-of-band (read off a screen, sent by message)
//! - **Device binding**: a code only validates on the device it was issued for
//! - **Opaque rejection**: every failed check yields the same [`CodeRejected`]
//!
//! # Code Format
//!
//! Codes are formatted as: `base64(credits:salt:DEVICE-ID:NONCE)` with the
//! trailing `=` padding stripped. The standard alphabet is used, not url-safe.
//!
//! # Limitations
//!
//! This is not a cryptographically strong licensing scheme. The encoding is
//! reversible by anyone; the only secret is the salt string, and a reader of
//! one code can recover it. There is no signature and no replay protection.
//! Neither the salt nor the credits field may contain `:`, and the issuer does
//! not check this: such a code splits into the wrong number of fields and is
//! rejected on validation.

mod config;
mod device;
mod error;
mod issuer;
mod payload;
mod store;
mod validator;

pub use config::{default_config_path, ActivationConfig, DATA_DIR_ENV, DEFAULT_SALT, SALT_ENV};
pub use device::{
    generate_device_id, generate_device_id_with, DeviceId, DeviceIdentityProvider,
    StoredDeviceIdentity, DEVICE_ID_KEY, DEVICE_ID_PREFIX,
};
pub use error::{ActivationError, ActivationResult, CodeRejected};
pub use issuer::{issue, issue_with_rng, CreditPackage};
pub use payload::{ActivationPayload, NONCE_LEN, UNLIMITED_CREDITS};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use validator::{validate, Entitlement};
