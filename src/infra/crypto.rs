//! Password-based content encryption and password strength scoring.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;

/// Marker prepended to every ciphertext produced by [`AesCipher`].
const ENVELOPE_PREFIX: &str = "nk1:";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_ROUNDS: u32 = 100_000;

/// Errors from the encryption collaborator.
///
/// None of these are fatal: the note involved is left untouched and the
/// message is meant to be shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Content or password was empty.
    #[error("{0} is required")]
    MissingInput(&'static str),

    /// The cipher refused to encrypt.
    #[error("failed to encrypt content: {0}")]
    Encryption(String),

    /// Wrong password, tampered ciphertext, or an empty result.
    #[error("failed to decrypt content; the password may be incorrect")]
    Decryption,

    /// The stored value is not something this cipher produced.
    #[error("encrypted content is malformed: {0}")]
    MalformedPayload(String),
}

/// Encryption collaborator used by the vault operations.
pub trait Cipher {
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, CryptoError>;
    fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String, CryptoError>;
}

/// AES-256-GCM with a per-message random salt and nonce.
///
/// Output is `nk1:` followed by base64 of `salt || nonce || ciphertext`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCipher;

impl AesCipher {
    /// PBKDF2-HMAC-SHA256 over the per-message salt.
    fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, KEY_ROUNDS, &mut key);
        key
    }

    fn cipher_for(password: &str, salt: &[u8]) -> Result<Aes256Gcm, CryptoError> {
        let key = Self::derive_key(password, salt);
        Aes256Gcm::new_from_slice(&key).map_err(|e| CryptoError::Encryption(e.to_string()))
    }
}

impl Cipher for AesCipher {
    fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, CryptoError> {
        if plaintext.is_empty() {
            return Err(CryptoError::MissingInput("content"));
        }
        if password.is_empty() {
            return Err(CryptoError::MissingInput("password"));
        }

        let salt: [u8; SALT_LEN] = rand::random();
        let nonce_bytes: [u8; NONCE_LEN] = rand::random();
        let cipher = Self::cipher_for(password, &salt)?;
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut payload = Vec::with_capacity(SALT_LEN + NONCE_LEN + sealed.len());
        payload.extend_from_slice(&salt);
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);

        tracing::debug!(
            plaintext_len = plaintext.len(),
            payload_len = payload.len(),
            "encrypted content"
        );
        Ok(format!("{ENVELOPE_PREFIX}{}", STANDARD.encode(payload)))
    }

    fn decrypt(&self, ciphertext: &str, password: &str) -> Result<String, CryptoError> {
        if ciphertext.is_empty() {
            return Err(CryptoError::MissingInput("encrypted content"));
        }
        if password.is_empty() {
            return Err(CryptoError::MissingInput("password"));
        }

        let encoded = ciphertext
            .trim()
            .strip_prefix(ENVELOPE_PREFIX)
            .ok_or_else(|| CryptoError::MalformedPayload("missing envelope prefix".into()))?;
        let payload = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedPayload(e.to_string()))?;
        if payload.len() <= SALT_LEN + NONCE_LEN {
            return Err(CryptoError::MalformedPayload("payload too short".into()));
        }

        let (salt, rest) = payload.split_at(SALT_LEN);
        let (nonce_bytes, sealed) = rest.split_at(NONCE_LEN);
        let cipher = Self::cipher_for(password, salt)?;
        let opened = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| CryptoError::Decryption)?;

        let plaintext = String::from_utf8(opened).map_err(|_| CryptoError::Decryption)?;
        if plaintext.is_empty() {
            return Err(CryptoError::Decryption);
        }
        Ok(plaintext)
    }
}

/// Scores a password from 0 to 100.
///
/// One point each for length >= 8, length >= 12, a lowercase letter, an
/// uppercase letter, a digit and any other character; two more when the
/// password is at least 8 long and has all four classes. The total out of 8
/// is scaled to a percentage and floored.
///
/// # Examples
///
/// ```
/// use notekeep::infra::password_strength;
///
/// assert_eq!(password_strength(""), 0);
/// assert_eq!(password_strength("Tr0ub4dor&3xyz"), 100);
/// ```
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let len = password.chars().count();
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let other = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut score = [len >= 8, len >= 12, lower, upper, digit, other]
        .into_iter()
        .filter(|hit| *hit)
        .count() as u32;
    if len >= 8 && lower && upper && digit && other {
        score += 2;
    }

    (score * 100 / 8).min(100) as u8
}

/// Coarse rating for a [`password_strength`] score.
pub fn strength_label(score: u8) -> &'static str {
    match score {
        75.. => "strong",
        50..=74 => "moderate",
        _ => "weak",
    }
}
