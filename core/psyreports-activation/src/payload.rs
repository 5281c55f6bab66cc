//! Wire format of activation codes.
//!
//! A code is the standard base64 encoding of
//! `credits:salt:DEVICE-ID:NONCE` with trailing `=` stripped. Decoding
//! re-pads to the 4-character block size first, so codes survive upstream
//! stripping (and copy-paste tools that drop the padding).

use crate::error::CodeRejected;
use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use rand::Rng;

/// Credits field value granting unlimited usage.
pub const UNLIMITED_CREDITS: &str = "INF";

/// Length of the per-issuance nonce.
pub const NONCE_LEN: usize = 4;

const FIELD_SEPARATOR: char = ':';
const PAD: char = '=';
const BLOCK_SIZE: usize = 4;

/// Fields in the current strict format.
const FIELD_COUNT: usize = 4;
/// Anything below this is not even a legacy code.
const MIN_FIELD_COUNT: usize = 3;

pub(crate) const UPPER_ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Standard alphabet; decoding tolerates non-zero trailing bits the way
/// browser `atob` does.
const CODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// The decoded contents of an activation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationPayload {
    /// Decimal credit count or [`UNLIMITED_CREDITS`].
    pub credits: String,
    /// Shared secret between issuer and validator.
    pub salt: String,
    /// Target device, uppercased.
    pub device: String,
    /// Per-issuance random component.
    pub nonce: String,
}

impl ActivationPayload {
    /// Serializes the payload as `credits:salt:device:nonce`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.credits,
            self.salt,
            self.device,
            self.nonce,
            sep = FIELD_SEPARATOR
        )
    }

    /// Encodes the payload into code text, padding stripped.
    #[must_use]
    pub fn encode(&self) -> String {
        let encoded = CODE_ENGINE.encode(self.to_wire().as_bytes());
        encoded.trim_end_matches(PAD).to_string()
    }

    /// Decodes code text into a payload.
    ///
    /// Only the strict 4-field format is accepted. Legacy 3-field codes
    /// (`credits:salt:nonce`) decode fine but are refused here.
    ///
    /// # Errors
    ///
    /// Returns [`CodeRejected`] for malformed base64, non-UTF-8 content, or
    /// any field count other than four.
    pub fn decode(code: &str) -> Result<Self, CodeRejected> {
        let decoded = decode_text(code).ok_or(CodeRejected)?;
        let fields: Vec<&str> = decoded.split(FIELD_SEPARATOR).collect();

        if fields.len() < MIN_FIELD_COUNT {
            return Err(CodeRejected);
        }
        if fields.len() != FIELD_COUNT {
            return Err(CodeRejected);
        }

        Ok(Self {
            credits: fields[0].to_string(),
            salt: fields[1].to_string(),
            device: fields[2].to_string(),
            nonce: fields[3].to_string(),
        })
    }
}

/// Re-pads `code` to the block size and decodes it to text.
pub(crate) fn decode_text(code: &str) -> Option<String> {
    let mut padded = code.to_string();
    while padded.len() % BLOCK_SIZE != 0 {
        padded.push(PAD);
    }
    let bytes = CODE_ENGINE.decode(padded.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Draws `len` characters from [`UPPER_ALPHANUMERIC`].
pub(crate) fn random_alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| UPPER_ALPHANUMERIC[rng.gen_range(0..UPPER_ALPHANUMERIC.len())] as char)
        .collect()
}
