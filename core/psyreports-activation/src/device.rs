//! Per-installation device identity.
//!
//! Each installation carries a short pseudo-random label, `DEV-` plus six
//! alphanumeric characters, that the administrator reads off the client's
//! screen and binds activation codes to. It is generated lazily on first use
//! and persisted in the installation's key-value store.

use crate::payload::{random_alphanumeric, UPPER_ALPHANUMERIC};
use crate::store::KeyValueStore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Store key under which the device identity is persisted.
pub const DEVICE_ID_KEY: &str = "psyreports_device_id";

/// Prefix of every generated device identity.
pub const DEVICE_ID_PREFIX: &str = "DEV-";

const DEVICE_ID_SUFFIX_LEN: usize = 6;

/// An installation's device identity.
///
/// Holds the string as stored or as typed by an operator. Comparisons go
/// through [`DeviceId::normalized`], which trims and uppercases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wraps an existing identity string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identity trimmed and uppercased, the form codes are bound to.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.trim().to_uppercase()
    }

    /// Returns true if the identity has the generated shape: the prefix
    /// followed by six alphanumeric characters, in any case.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let normalized = self.normalized();
        normalized
            .strip_prefix(DEVICE_ID_PREFIX)
            .is_some_and(|suffix| {
                suffix.len() == DEVICE_ID_SUFFIX_LEN
                    && suffix.bytes().all(|b| UPPER_ALPHANUMERIC.contains(&b))
            })
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Generates a fresh device identity from the thread-local RNG.
#[must_use]
pub fn generate_device_id() -> DeviceId {
    generate_device_id_with(&mut rand::thread_rng())
}

/// Generates a fresh device identity from `rng`.
pub fn generate_device_id_with<R: Rng + ?Sized>(rng: &mut R) -> DeviceId {
    DeviceId(format!(
        "{DEVICE_ID_PREFIX}{}",
        random_alphanumeric(rng, DEVICE_ID_SUFFIX_LEN)
    ))
}

/// Source of the current installation's device identity.
pub trait DeviceIdentityProvider {
    /// Returns this installation's identity, creating it on first call.
    fn device_id(&mut self) -> DeviceId;
}

/// Device identity persisted in a [`KeyValueStore`] under [`DEVICE_ID_KEY`].
#[derive(Debug)]
pub struct StoredDeviceIdentity<S> {
    store: S,
}

impl<S: KeyValueStore> StoredDeviceIdentity<S> {
    /// Creates a provider backed by `store`. Nothing is generated until the
    /// first [`DeviceIdentityProvider::device_id`] call.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the persisted identity without generating one.
    #[must_use]
    pub fn existing(&self) -> Option<DeviceId> {
        self.store
            .get(DEVICE_ID_KEY)
            .filter(|id| !id.trim().is_empty())
            .map(DeviceId)
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the provider, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> DeviceIdentityProvider for StoredDeviceIdentity<S> {
    fn device_id(&mut self) -> DeviceId {
        if let Some(id) = self.existing() {
            return id;
        }

        let id = generate_device_id();
        match self.store.set(DEVICE_ID_KEY, id.as_str()) {
            Ok(()) => info!(device_id = %id, "Generated new device identity"),
            // The id is still usable for this session; the next run generates another.
            Err(e) => warn!(device_id = %id, "Failed to persist device identity: {}", e),
        }
        id
    }
}
