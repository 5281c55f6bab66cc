//! Shared test helpers for activation tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};

/// Salt used throughout the tests.
pub const TEST_SALT: &str = "PSY_PRO_SECRET_2024";

/// Device used throughout the tests.
pub const TEST_DEVICE: &str = "DEV-X9Y2Z1";

/// Encodes an arbitrary payload the way the issuer does: standard base64,
/// padding stripped. Lets tests build codes the issuer would never produce.
pub fn encode_raw(payload: &str) -> String {
    STANDARD.encode(payload.as_bytes()).trim_end_matches('=').to_string()
}

/// Encodes an arbitrary payload keeping the padding.
pub fn encode_padded(payload: &str) -> String {
    STANDARD.encode(payload.as_bytes())
}
