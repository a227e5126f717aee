//! Password-based encryption of whole notes.
//!
//! The cipher runs first; the store is only touched once it succeeds, so a
//! wrong password or corrupt payload leaves the note exactly as it was.

use crate::domain::NoteId;
use crate::infra::{Cipher, Clock, CryptoError};
use crate::state::NoteStore;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VaultError {
    #[error("note not found: {0}")]
    UnknownNote(NoteId),

    #[error("note {0} is already encrypted")]
    AlreadyEncrypted(NoteId),

    #[error("note {0} is not encrypted")]
    NotEncrypted(NoteId),

    #[error("note {0} has no content to encrypt")]
    EmptyContent(NoteId),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Encrypts a note's content with `password` and stores the ciphertext.
pub fn encrypt_with_password<C: Clock>(
    store: &mut NoteStore<C>,
    cipher: &impl Cipher,
    id: &NoteId,
    password: &str,
) -> Result<(), VaultError> {
    let note = store
        .note(id)
        .ok_or_else(|| VaultError::UnknownNote(id.clone()))?;
    if note.is_encrypted() {
        return Err(VaultError::AlreadyEncrypted(id.clone()));
    }
    if note.content().is_empty() {
        return Err(VaultError::EmptyContent(id.clone()));
    }

    let ciphertext = cipher.encrypt(note.content(), password)?;
    store.encrypt_note(id, ciphertext);
    tracing::info!(id = %id, "note encrypted with password");
    Ok(())
}

/// Decrypts a note in place. On failure the note stays encrypted.
pub fn decrypt_with_password<C: Clock>(
    store: &mut NoteStore<C>,
    cipher: &impl Cipher,
    id: &NoteId,
    password: &str,
) -> Result<(), VaultError> {
    let note = store
        .note(id)
        .ok_or_else(|| VaultError::UnknownNote(id.clone()))?;
    if !note.is_encrypted() {
        return Err(VaultError::NotEncrypted(id.clone()));
    }

    let plaintext = cipher.decrypt(note.content(), password).inspect_err(|e| {
        tracing::warn!(id = %id, error = %e, "decryption failed");
    })?;
    store.decrypt_note(id, plaintext);
    tracing::info!(id = %id, "note decrypted");
    Ok(())
}

/// Decrypts a note's content without modifying the store.
pub fn peek_with_password<C: Clock>(
    store: &NoteStore<C>,
    cipher: &impl Cipher,
    id: &NoteId,
    password: &str,
) -> Result<String, VaultError> {
    let note = store
        .note(id)
        .ok_or_else(|| VaultError::UnknownNote(id.clone()))?;
    if !note.is_encrypted() {
        return Err(VaultError::NotEncrypted(id.clone()));
    }
    Ok(cipher.decrypt(note.content(), password)?)
}
