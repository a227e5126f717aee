//! Encryption and password strength handlers.

use anyhow::{Context, Result};

use super::{Workspace, label};
use crate::cli::{PasswordArgs, StrengthArgs};
use crate::infra::{AesCipher, password_strength, strength_label};
use crate::state::{decrypt_with_password, encrypt_with_password};

pub fn handle_encrypt(args: &PasswordArgs, ws: &mut Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;
    warn_if_weak(&args.password);

    encrypt_with_password(ws.store_mut(), &AesCipher, &id, &args.password)
        .with_context(|| format!("failed to encrypt {}", id.prefix()))?;
    println!("Encrypted: {}", label(ws.note(&id)?));
    Ok(())
}

pub fn handle_decrypt(args: &PasswordArgs, ws: &mut Workspace) -> Result<()> {
    let id = ws.resolve(&args.note)?;

    decrypt_with_password(ws.store_mut(), &AesCipher, &id, &args.password)
        .with_context(|| format!("failed to decrypt {}", id.prefix()))?;
    println!("Decrypted: {}", label(ws.note(&id)?));
    Ok(())
}

pub fn handle_strength(args: &StrengthArgs) -> Result<()> {
    let score = password_strength(&args.password);
    println!("{}% ({})", score, strength_label(score));
    Ok(())
}

fn warn_if_weak(password: &str) {
    let score = password_strength(password);
    if score < 50 {
        eprintln!(
            "Warning: password strength is {}% ({})",
            score,
            strength_label(score)
        );
    }
}
